#![warn(missing_docs)] // <= 合适时移除它.

//! 核心库. 在二维像素网格上, 对用户绘制的多边形感兴趣区域 (ROI) 做统计分析.
//!
//! 该 crate 只提供 `safe` 接口, 且不做任何 IO: 像素数据由外部解码器读出后,
//! 以内存数据的形式交给本库.
//!
//! # 注意
//!
//! 1. 多边形直接在整数像素索引坐标系上光栅化, 不考虑图像方向 (旋转/仿射) 和亚像素覆盖.
//! 2. 仅支持 16-bit 有符号采样, 单帧图像.
//! 3. 所有由输入导致的失败都以 [`RoiError`] 返回, 不会 panic.
//!
//! # 功能
//!
//! ### 多边形光栅化 ✅
//!
//! 以射线法 (奇偶规则) 判断每个像素是否位于多边形内部, 得到与网格同形状的布尔掩码.
//!
//! 实现位于 `roi-berry/src/data/mask.rs`.
//!
//! ### 窗宽窗位 ✅
//!
//! 可选的线性灰度映射, 将采样值映射到 `[0, 255]`.
//!
//! 实现位于 `roi-berry/src/data/window.rs`.
//!
//! ### 区域统计 ✅
//!
//! 掩码内像素的均值, 最值, 总体标准差与面积.
//!
//! 实现位于 `roi-berry/src/stats.rs`.
//!
//! ### 周长 ✅
//!
//! 累加所有暴露的像素边. 支持不连通区域和带洞区域.
//!
//! 实现位于 `roi-berry/src/perimeter.rs`.
//!
//! ### 一站式分析 ✅
//!
//! 组合上述步骤, 输出 [`RoiStats`]. 开启 `rayon` feature 后可以并行处理一批互不相关的请求.
//!
//! 实现位于 `roi-berry/src/analyzer.rs`.
//!
//! # 坐标约定
//!
//! 网格按行优先存储, 索引为 `(h, w)` 即 `(row, column)`.
//! 多边形顶点为 `(x, y)`, 其中 `x` 对应列, `y` 对应行. 因此像素 `(h, w)`
//! 的测试点为 `(x, y) = (w, h)`.

/// 二维索引 `(row, column)`, 同时也可一定程度上用作非负整数向量.
pub type Idx2d = (usize, usize);

mod analyzer;
mod data;
mod error;
mod geometry;
mod perimeter;
mod stats;

pub mod consts;
pub mod prelude;

pub use analyzer::{analyze, analyze_batch, analyze_decoded, RoiRequest, RoiStats};
pub use data::{
    apply_window, DecodedImage, Intensities, IntensityWindow, Mask, PixelGrid, PixelSpacing,
    TagValue, WindowOptions,
};
pub use error::{RoiError, RoiResult};
pub use geometry::{Point, Polygon};
pub use perimeter::perimeter;
pub use stats::RegionStats;
