use ndarray::iter::Iter;
use ndarray::{Array2, ArrayView2, Ix2};
use std::ops::Index;

use crate::{Idx2d, Point, Polygon};

/// 与像素网格同形状的布尔掩码. `true` 代表像素属于 ROI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    data: Array2<bool>,
}

impl Index<Idx2d> for Mask {
    type Output = bool;

    #[inline]
    fn index(&self, index: Idx2d) -> &Self::Output {
        &self.data[index]
    }
}

/// 像素 `(h, w)` 对应的测试点 `(x, y) = (w, h)`.
#[inline]
fn test_point((h, w): Idx2d) -> Point {
    Point::new(w as f64, h as f64)
}

impl Mask {
    /// 将 `polygon` 光栅化到形状为 `(rows, columns)` 的网格上.
    ///
    /// 对每个整数像素坐标 `(x, y)` (`x` 为列, `y` 为行), 以射线法判断其是否位于多边形内.
    /// 复杂度为 `O(rows * columns * polygon.len())`.
    pub fn rasterize(polygon: &Polygon, (rows, columns): Idx2d) -> Self {
        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                let mut data = Array2::from_elem((rows, columns), false);
                ndarray::Zip::indexed(&mut data)
                    .par_for_each(|pos, m| *m = polygon.contains(test_point(pos)));
            } else {
                let data = Array2::from_shape_fn((rows, columns), |pos| {
                    polygon.contains(test_point(pos))
                });
            }
        }
        Self { data }
    }

    /// 直接由二维布尔数组构建.
    #[inline]
    pub fn from_array(data: Array2<bool>) -> Self {
        Self { data }
    }

    /// 获得底层数据的一份不可变 shallow copy.
    #[inline]
    pub fn array_view(&self) -> ArrayView2<bool> {
        self.data.view()
    }

    /// 获取可以迭代掩码的迭代器 (行优先).
    #[inline]
    pub fn iter(&self) -> Iter<'_, bool, Ix2> {
        self.data.iter()
    }

    /// 以行优先规则, 获取 ROI 内所有像素的索引.
    pub fn positions(&self) -> impl Iterator<Item = Idx2d> + '_ {
        self.data
            .indexed_iter()
            .filter_map(|(pos, &m)| m.then_some(pos))
    }

    /// 获取给定位置 `(row, column)` 的值. 越界时返回 `None`.
    #[inline]
    pub fn get(&self, pos: Idx2d) -> Option<&bool> {
        self.data.get(pos)
    }

    /// 掩码形状 `(rows, columns)`.
    #[inline]
    pub fn shape(&self) -> Idx2d {
        self.data.dim()
    }

    /// 像素总数.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// ROI 内的像素个数.
    #[inline]
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&m| m).count()
    }

    /// ROI 是否为空?
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.data.iter().any(|&m| m)
    }

    /// 位置 `pos` 是否在 ROI 内? 越界视为不在.
    #[inline]
    pub fn is_inside(&self, pos: Idx2d) -> bool {
        matches!(self.get(pos), Some(&true))
    }

    /// 获取 `(h, w)` 四条边的暴露情况 `[上, 下, 左, 右]`.
    ///
    /// 一条边是暴露的, 当且仅当该边另一侧的像素越界或不在 ROI 内.
    /// 该方法不关心 `(h, w)` 自身是否在 ROI 内.
    #[inline]
    pub fn exposed_edges(&self, (h, w): Idx2d) -> [bool; 4] {
        [
            !self.is_inside((h.wrapping_sub(1), w)),
            !self.is_inside((h.saturating_add(1), w)),
            !self.is_inside((h, w.wrapping_sub(1))),
            !self.is_inside((h, w.saturating_add(1))),
        ]
    }

    /// 直接获得底层数据.
    #[inline]
    pub fn into_raw(self) -> Array2<bool> {
        self.data
    }
}
