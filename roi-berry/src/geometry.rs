//! 平面上的点与多边形.
//!
//! 多边形顶点使用自然的 `(x, y)` 坐标, 其中 `x` 对应图像的列 (Width),
//! `y` 对应图像的行 (Height). 该模块不负责检测图像越界.

use std::fmt::Formatter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 平面上的点.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    /// 横坐标 (列方向).
    pub x: f64,
    /// 纵坐标 (行方向).
    pub y: f64,
}

impl Point {
    /// 构建点.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// 压缩到一行, 与 ROI 报告的格式保持一致.
impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 有序顶点序列描述的多边形, 隐式闭合 (最后一个点连回第一个点).
///
/// 允许自相交; 内外由奇偶规则决定. 少于 3 个点的多边形不包含任何点.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// 以给定顶点顺序构建多边形.
    #[inline]
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// 顶点.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// 顶点个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 是否没有任何顶点?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 直接获得底层数据.
    #[inline]
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// 轴对齐包围盒 `(min, max)`. 多边形为空时返回 `None`.
    pub fn bounding_box(&self) -> Option<(Point, Point)> {
        let first = *self.points.first()?;
        Some(self.points.iter().skip(1).fold((first, first), |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }

    /// 以射线法判断 `point` 是否位于多边形内部.
    ///
    /// 从 `point` 出发向 `x` 正方向发出射线, 统计与各条边的交点个数, 奇数为内.
    /// 一条边只有在 `point.y` 严格位于两端点之间 (一端 `> y`, 另一端 `<= y`)
    /// 时才可能相交, 因此水平边不产生交点. 恰好落在边上的点内外不定.
    pub fn contains(&self, point: Point) -> bool {
        let n = self.points.len();
        let mut inside = false;
        let mut j = n.wrapping_sub(1);
        for i in 0..n {
            let Point { x: xi, y: yi } = self.points[i];
            let Point { x: xj, y: yj } = self.points[j];
            if (yi > point.y) != (yj > point.y)
                && point.x < (xj - xi) * (point.y - yi) / (yj - yi) + xi
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

impl From<Vec<Point>> for Polygon {
    #[inline]
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl From<Vec<(f64, f64)>> for Polygon {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Self::new(points.into_iter().map(Point::from).collect())
    }
}

impl FromIterator<Point> for Polygon {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
