//! 一站式 ROI 分析.
//!
//! 流程: 光栅化掩码 -> 窗口映射 (与掩码无关) -> 掩码内统计 -> 周长 -> 组装结果.
//! 任一步骤失败都会中止整个分析, 不产生部分结果. 分析是输入的纯函数,
//! 不持有任何跨调用的状态, 因此可以在任意多个线程上同时运行.

use std::fmt::Formatter;
use std::io::{self, Write};

use crate::{
    apply_window, perimeter, DecodedImage, Mask, PixelGrid, Polygon, RegionStats, RoiResult,
    WindowOptions,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// ROI 分析结果.
///
/// 面积与周长的单位由像素间距的单位决定 (一般为 mm² 和 mm).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RoiStats {
    /// 强度均值.
    pub mean: f64,

    /// 强度最小值.
    pub min: f64,

    /// 强度最大值.
    pub max: f64,

    /// 强度总体标准差.
    pub std_dev: f64,

    /// 面积.
    pub area: f64,

    /// 周长.
    pub perimeter: f64,

    /// 原样返回的输入多边形顶点.
    pub coordinates: Polygon,
}

impl RoiStats {
    /// 将可读的分析报告写进 `w` 中. 数值保留两位小数.
    pub fn describe_into<W: Write>(&self, w: &mut W) -> io::Result<()> {
        const S4: &str = "    ";

        writeln!(w, "Intensity:")?;
        writeln!(w, "{S4}Mean: {:.2}", self.mean)?;
        writeln!(w, "{S4}Min: {:.2}", self.min)?;
        writeln!(w, "{S4}Max: {:.2}", self.max)?;
        writeln!(w, "{S4}Std dev: {:.2}", self.std_dev)?;
        writeln!(w, "Geometry:")?;
        writeln!(w, "{S4}Area: {:.2} mm²", self.area)?;
        writeln!(w, "{S4}Perimeter: {:.2} mm", self.perimeter)?;
        write!(w, "ROI points:")?;
        for p in self.coordinates.points() {
            write!(w, " {p}")?;
        }
        Ok(())
    }
}

impl std::fmt::Display for RoiStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut buf = Vec::with_capacity(256);
        self.describe_into(&mut buf).map_err(|_| std::fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&buf))
    }
}

/// 对 `grid` 上由 `polygon` 围成的区域做分析.
///
/// # 返回值
///
/// - 当窗口参数非法时, 返回 `Err(RoiError::InvalidWindow)`;
/// - 当多边形光栅化后不含任何像素时, 返回 `Err(RoiError::EmptyRegion)`;
/// - 其他情况下成功, 且 `coordinates` 与 `polygon` 完全相同.
pub fn analyze(
    grid: &PixelGrid,
    polygon: &Polygon,
    options: &WindowOptions,
) -> RoiResult<RoiStats> {
    let window = options.window()?;
    let spacing = grid.spacing();

    let mask = Mask::rasterize(polygon, grid.shape());
    let intensities = apply_window(grid.samples(), window.as_ref());
    let region = RegionStats::compute(&intensities, &mask, spacing)?;
    let perimeter = perimeter(&mask, grid.shape(), spacing)?;

    Ok(RoiStats {
        mean: region.mean,
        min: region.min,
        max: region.max,
        std_dev: region.std_dev,
        area: region.area,
        perimeter,
        coordinates: polygon.clone(),
    })
}

/// 对解码器输出的图像做分析.
///
/// 先检查尺寸 (`RoiError::MissingDimensions`), 再检查像素数据
/// (`RoiError::MissingPixelData`), 然后同 [`analyze`].
pub fn analyze_decoded(
    image: &DecodedImage,
    polygon: &Polygon,
    options: &WindowOptions,
) -> RoiResult<RoiStats> {
    let grid = PixelGrid::try_from(image)?;
    analyze(&grid, polygon, options)
}

/// 一次独立的分析请求.
#[derive(Clone, Debug)]
pub struct RoiRequest<'a> {
    /// 像素网格.
    pub grid: &'a PixelGrid,

    /// ROI 多边形.
    pub polygon: Polygon,

    /// 窗口参数.
    pub options: WindowOptions,
}

impl<'a> RoiRequest<'a> {
    /// 构建请求.
    #[inline]
    pub fn new(grid: &'a PixelGrid, polygon: Polygon, options: WindowOptions) -> Self {
        Self {
            grid,
            polygon,
            options,
        }
    }

    /// 执行请求.
    #[inline]
    pub fn run(&self) -> RoiResult<RoiStats> {
        analyze(self.grid, &self.polygon, &self.options)
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

        /// 借助 `rayon`, 并行地执行一批互不相关的请求. 结果顺序与请求顺序一致,
        /// 某个请求失败不影响其它请求.
        pub fn analyze_batch(requests: &[RoiRequest]) -> Vec<RoiResult<RoiStats>> {
            requests.par_iter().map(RoiRequest::run).collect()
        }
    } else {
        /// 依次执行一批互不相关的请求. 结果顺序与请求顺序一致,
        /// 某个请求失败不影响其它请求.
        pub fn analyze_batch(requests: &[RoiRequest]) -> Vec<RoiResult<RoiStats>> {
            requests.iter().map(RoiRequest::run).collect()
        }
    }
}
