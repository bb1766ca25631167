//! 消融实验依赖的通用组件.

use roi_berry::WindowOptions;

pub mod config;

const SEP: &str = "--------------------------------------------------------";

/// 简单分隔线.
#[inline]
pub fn sep() {
    println!("{SEP}");
}

/// 简单分隔线.
#[inline]
pub fn sep_to<W: std::io::Write>(mut w: W) -> std::io::Result<()> {
    writeln!(&mut w, "{SEP}")
}

/// 获得可并行核心数.
pub fn cpus() -> usize {
    std::thread::available_parallelism().map_or_else(|_| num_cpus::get(), usize::from)
}

/// 创建一般情况下合适的、用于观察腹部软组织的窗口.
/// 该窗口窗位为 40, 窗宽为 400.
#[inline]
pub fn soft_tissue_window() -> WindowOptions {
    WindowOptions::new(40.0, 400.0)
}
