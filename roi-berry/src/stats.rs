//! 掩码内像素的强度统计与面积.

use itertools::{Itertools, MinMaxResult};
use ordered_float::OrderedFloat;

use crate::{Intensities, Mask, PixelSpacing, RoiError, RoiResult};

/// 区域统计结果.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RegionStats {
    /// 算术平均值.
    pub mean: f64,

    /// 最小值.
    pub min: f64,

    /// 最大值.
    pub max: f64,

    /// 总体标准差 (除数为像素个数 `N`, 而非 `N - 1`).
    pub std_dev: f64,

    /// 面积, 即像素个数乘以单个像素面积.
    pub area: f64,

    /// ROI 内的像素个数.
    pub count: usize,
}

impl RegionStats {
    /// 计算 `intensities` 在 `mask` 内的统计量.
    ///
    /// # 返回值
    ///
    /// - 当 `mask` 与 `intensities` 形状不一致时, 返回 `Err(RoiError::ShapeMismatch)`;
    /// - 当 `mask` 不含任何像素时, 返回 `Err(RoiError::EmptyRegion)`;
    /// - 其他情况下成功.
    pub fn compute(
        intensities: &Intensities,
        mask: &Mask,
        spacing: PixelSpacing,
    ) -> RoiResult<Self> {
        if mask.shape() != intensities.shape() {
            return Err(RoiError::ShapeMismatch {
                mask: mask.shape(),
                grid: intensities.shape(),
            });
        }

        let selected: Vec<f64> = intensities
            .iter()
            .zip(mask.iter())
            .filter_map(|(v, &m)| m.then_some(v))
            .collect();
        Self::from_selection(&selected, spacing)
    }

    /// 对已经筛选好的像素 (保持原顺序) 计算统计量.
    ///
    /// `selected` 为空时返回 `Err(RoiError::EmptyRegion)`.
    pub fn from_selection(selected: &[f64], spacing: PixelSpacing) -> RoiResult<Self> {
        let (min, max) = match selected.iter().copied().map(OrderedFloat).minmax() {
            MinMaxResult::NoElements => return Err(RoiError::EmptyRegion),
            MinMaxResult::OneElement(v) => (v.0, v.0),
            MinMaxResult::MinMax(lo, hi) => (lo.0, hi.0),
        };

        let count = selected.len();
        let n = count as f64;

        // 两遍法: 先求均值, 再求离差平方和.
        let mean = selected.iter().sum::<f64>() / n;
        let var = selected.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Ok(Self {
            mean,
            min,
            max,
            std_dev: var.sqrt(),
            area: n * spacing.pixel_area(),
            count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::RegionStats;
    use crate::{apply_window, IntensityWindow, Mask, PixelSpacing, RoiError};
    use ndarray::{arr2, Array2};

    fn f64_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-8
    }

    fn grid4() -> Array2<i16> {
        Array2::from_shape_vec((4, 4), (1..=16).collect()).unwrap()
    }

    fn top_left() -> Mask {
        let mut m = Array2::from_elem((4, 4), false);
        m.slice_mut(ndarray::s![0..2, 0..2]).fill(true);
        Mask::from_array(m)
    }

    #[test]
    fn test_top_left_block() {
        let g = grid4();
        let s = RegionStats::compute(
            &apply_window(g.view(), None),
            &top_left(),
            PixelSpacing::default(),
        )
        .unwrap();
        assert!(f64_eq(s.mean, 3.5));
        assert!(f64_eq(s.min, 1.0));
        assert!(f64_eq(s.max, 6.0));
        assert!(f64_eq(s.std_dev, 4.25f64.sqrt()));
        assert!(f64_eq(s.area, 4.0));
        assert_eq!(s.count, 4);
    }

    #[test]
    fn test_full_mask() {
        let g = grid4();
        let m = Mask::from_array(Array2::from_elem((4, 4), true));
        let s = RegionStats::compute(&apply_window(g.view(), None), &m, PixelSpacing::default())
            .unwrap();
        // 1..=16: 均值 8.5, 总体方差 (16^2 - 1) / 12.
        assert!(f64_eq(s.mean, 8.5));
        assert!(f64_eq(s.min, 1.0));
        assert!(f64_eq(s.max, 16.0));
        assert!(f64_eq(s.std_dev, (255.0f64 / 12.0).sqrt()));
    }

    #[test]
    fn test_area_identity() {
        let m = Mask::from_array(arr2(&[[true, false, true], [false, true, true]]));
        let g = Array2::<i16>::zeros((2, 3));
        let sp = PixelSpacing::new(0.7, 1.3);
        let s = RegionStats::compute(&apply_window(g.view(), None), &m, sp).unwrap();
        assert!(f64_eq(s.area, 4.0 * 0.7 * 1.3));
        assert!(f64_eq(s.std_dev, 0.0));
    }

    #[test]
    fn test_single_pixel() {
        let s = RegionStats::from_selection(&[-7.0], PixelSpacing::new(2.0, 3.0)).unwrap();
        assert_eq!((s.mean, s.min, s.max, s.std_dev, s.area), (-7.0, -7.0, -7.0, 0.0, 6.0));
    }

    #[test]
    fn test_windowed() {
        let g = arr2(&[[60i16, 80], [100, -1000]]);
        let w = IntensityWindow::new(80.0, 40.0).unwrap();
        let m = Mask::from_array(arr2(&[[true, true], [true, true]]));
        let s = RegionStats::compute(&apply_window(g.view(), Some(&w)), &m, PixelSpacing::default())
            .unwrap();
        assert!(f64_eq(s.min, 0.0));
        assert!(f64_eq(s.max, 255.0));
        assert!(f64_eq(s.mean, (127.5 + 255.0) / 4.0));
    }

    #[test]
    fn test_empty_region() {
        let g = grid4();
        let m = Mask::from_array(Array2::from_elem((4, 4), false));
        let e = RegionStats::compute(&apply_window(g.view(), None), &m, PixelSpacing::default())
            .unwrap_err();
        assert_eq!(e, RoiError::EmptyRegion);
        assert_eq!(
            RegionStats::from_selection(&[], PixelSpacing::default()).unwrap_err(),
            RoiError::EmptyRegion
        );
    }

    #[test]
    fn test_shape_mismatch() {
        let g = grid4();
        let m = Mask::from_array(Array2::from_elem((4, 3), true));
        let e = RegionStats::compute(&apply_window(g.view(), None), &m, PixelSpacing::default())
            .unwrap_err();
        assert_eq!(
            e,
            RoiError::ShapeMismatch {
                mask: (4, 3),
                grid: (4, 4)
            }
        );
    }

    /// 大偏移量下两遍法仍然稳定.
    #[test]
    fn test_large_offset() {
        let v: Vec<f64> = (0..1000).map(|i| 32000.0 + (i % 2) as f64).collect();
        let s = RegionStats::from_selection(&v, PixelSpacing::default()).unwrap();
        assert!(f64_eq(s.mean, 32000.5));
        assert!(f64_eq(s.std_dev, 0.5));
    }
}
