//! 实验参数. 每一项都可以通过环境变量覆盖, 否则使用默认值.

use std::env;
use std::str::FromStr;

/// 读取环境变量 `key` 并解析为 `T`. 变量不存在或无法解析时返回 `default`.
fn from_env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// 合成网格的边长 (像素).
///
/// 1. 若环境变量 `$ROI_BENCH_SIZE` 是正整数, 则返回其值;
/// 2. 否则, 返回 512.
pub fn grid_size_from_env_or_default() -> usize {
    match from_env_or("ROI_BENCH_SIZE", 512usize) {
        0 => 512,
        n => n,
    }
}

/// 每种负载的重复次数.
///
/// 1. 若环境变量 `$ROI_BENCH_REPEAT` 是正整数, 则返回其值;
/// 2. 否则, 返回 8.
pub fn repeat_from_env_or_default() -> u32 {
    match from_env_or("ROI_BENCH_REPEAT", 8u32) {
        0 => 8,
        n => n,
    }
}

/// 星形多边形的尖角个数.
///
/// 1. 若环境变量 `$ROI_BENCH_VERTICES` 是不小于 3 的整数, 则返回其值;
/// 2. 否则, 返回 10.
pub fn star_vertices_from_env_or_default() -> usize {
    match from_env_or("ROI_BENCH_VERTICES", 10usize) {
        n if n >= 3 => n,
        _ => 10,
    }
}
