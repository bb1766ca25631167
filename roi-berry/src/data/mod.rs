use ndarray::{Array2, ArrayView2};
use std::ops::Index;

use crate::consts::{DEFAULT_SPACING, SPACING_SEPARATOR};
use crate::{Idx2d, RoiError, RoiResult};

mod decoded;
mod mask;
mod window;

pub use decoded::{DecodedImage, TagValue};
pub use mask::Mask;
pub use window::{apply as apply_window, Intensities, IntensityWindow, WindowOptions};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 像素间距, 即相邻像素在两个方向上代表的实际距离 (单位一般为毫米).
///
/// 两个分量总是有限正数; 非法值在构建时被替换为 [`DEFAULT_SPACING`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PixelSpacing {
    x: f64,
    y: f64,
}

#[inline]
fn sanitize(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        DEFAULT_SPACING
    }
}

impl PixelSpacing {
    /// 构建像素间距. `x` 为水平 (列) 方向, `y` 为垂直 (行) 方向.
    /// 非有限或非正的分量会被替换为 `1.0`.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: sanitize(x),
            y: sanitize(y),
        }
    }

    /// 从形如 `"0.7\\0.8"` 的字符串解析像素间距.
    ///
    /// 第一个分量作为 `x`, 第二个作为 `y`. 缺失或无法解析的分量取 `1.0`.
    pub fn parse(s: &str) -> Self {
        let mut it = s
            .split(SPACING_SEPARATOR)
            .map(|part| part.trim().parse::<f64>().unwrap_or(DEFAULT_SPACING));
        let x = it.next().unwrap_or(DEFAULT_SPACING);
        let y = it.next().unwrap_or(DEFAULT_SPACING);
        Self::new(x, y)
    }

    /// 水平 (列) 方向的像素间距.
    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// 垂直 (行) 方向的像素间距.
    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// 单个像素的实际面积.
    #[inline]
    pub fn pixel_area(&self) -> f64 {
        self.x * self.y
    }
}

impl Default for PixelSpacing {
    #[inline]
    fn default() -> Self {
        Self {
            x: DEFAULT_SPACING,
            y: DEFAULT_SPACING,
        }
    }
}

/// 解码后的二维像素网格, 采样为 16-bit 有符号整数, 行优先存储.
///
/// 网格构建后只读. 形状总是 `(rows, columns)`, 两者均为正.
#[derive(Clone, Debug)]
pub struct PixelGrid {
    data: Array2<i16>,
    spacing: PixelSpacing,
}

impl Index<Idx2d> for PixelGrid {
    type Output = i16;

    #[inline]
    fn index(&self, index: Idx2d) -> &Self::Output {
        &self.data[index]
    }
}

impl PixelGrid {
    /// 以行优先的扁平采样序列构建网格.
    ///
    /// # 返回值
    ///
    /// - 当 `rows` 或 `columns` 为 0 时, 返回 `Err(RoiError::MissingDimensions)`;
    /// - 当 `samples.len() != rows * columns` 时, 返回 `Err(RoiError::MissingPixelData)`;
    /// - 其他情况下成功.
    pub fn new(
        rows: usize,
        columns: usize,
        spacing: PixelSpacing,
        samples: Vec<i16>,
    ) -> RoiResult<Self> {
        let expected = check_dims(Some(rows), Some(columns))?;
        if samples.len() != expected {
            return Err(RoiError::MissingPixelData {
                expected,
                actual: Some(samples.len()),
            });
        }
        let data = Array2::from_shape_vec((rows, columns), samples).map_err(|_| {
            RoiError::MissingPixelData {
                expected,
                actual: None,
            }
        })?;
        Ok(Self { data, spacing })
    }

    /// 直接从二维数组构建网格. 数组任一维为 0 时返回 `Err(RoiError::MissingDimensions)`.
    pub fn from_array(data: Array2<i16>, spacing: PixelSpacing) -> RoiResult<Self> {
        let (rows, columns) = data.dim();
        check_dims(Some(rows), Some(columns))?;
        Ok(Self { data, spacing })
    }

    /// 获得底层数据的一份不可变 shallow copy.
    #[inline]
    pub fn samples(&self) -> ArrayView2<i16> {
        self.data.view()
    }

    /// 像素间距.
    #[inline]
    pub fn spacing(&self) -> PixelSpacing {
        self.spacing
    }

    /// 网格形状 `(rows, columns)`.
    #[inline]
    pub fn shape(&self) -> Idx2d {
        self.data.dim()
    }

    /// 行数.
    #[inline]
    pub fn rows(&self) -> usize {
        self.shape().0
    }

    /// 列数.
    #[inline]
    pub fn columns(&self) -> usize {
        self.shape().1
    }

    /// 采样个数.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// 获取给定位置 `(row, column)` 的采样值. 越界时返回 `None`.
    #[inline]
    pub fn get(&self, pos: Idx2d) -> Option<&i16> {
        self.data.get(pos)
    }

    /// 直接获得底层数据.
    #[inline]
    pub fn into_raw(self) -> Array2<i16> {
        self.data
    }
}

/// 检查行列数是否存在且为正. 成功时返回采样总数.
pub(crate) fn check_dims(rows: Option<usize>, columns: Option<usize>) -> RoiResult<usize> {
    match (rows, columns) {
        (Some(r), Some(c)) if r > 0 && c > 0 => {
            r.checked_mul(c).ok_or(RoiError::MissingDimensions { rows, columns })
        }
        _ => Err(RoiError::MissingDimensions { rows, columns }),
    }
}

#[cfg(test)]
mod tests {
    use super::{PixelGrid, PixelSpacing};
    use crate::RoiError;
    use ndarray::Array2;

    #[test]
    fn test_spacing_sanitize() {
        let s = PixelSpacing::new(0.5, 0.25);
        assert_eq!((s.x(), s.y()), (0.5, 0.25));
        assert_eq!(s.pixel_area(), 0.125);

        let s = PixelSpacing::new(0.0, -2.0);
        assert_eq!((s.x(), s.y()), (1.0, 1.0));

        let s = PixelSpacing::new(f64::NAN, f64::INFINITY);
        assert_eq!(s, PixelSpacing::default());
    }

    #[test]
    fn test_spacing_parse() {
        let s = PixelSpacing::parse("0.7\\0.8");
        assert_eq!((s.x(), s.y()), (0.7, 0.8));

        let s = PixelSpacing::parse(" 0.5 \\ 2 ");
        assert_eq!((s.x(), s.y()), (0.5, 2.0));

        let s = PixelSpacing::parse("0.5");
        assert_eq!((s.x(), s.y()), (0.5, 1.0));

        let s = PixelSpacing::parse("abc\\0.3");
        assert_eq!((s.x(), s.y()), (1.0, 0.3));

        assert_eq!(PixelSpacing::parse(""), PixelSpacing::default());
        assert_eq!(PixelSpacing::parse("0\\0"), PixelSpacing::default());
    }

    #[test]
    fn test_grid_new() {
        let g = PixelGrid::new(2, 3, PixelSpacing::default(), (0..6).collect()).unwrap();
        assert_eq!(g.shape(), (2, 3));
        assert_eq!(g.size(), 6);
        assert_eq!(g[(1, 0)], 3);
        assert_eq!(g.get((1, 2)), Some(&5));
        assert_eq!(g.get((2, 0)), None);
    }

    #[test]
    fn test_grid_invalid() {
        let e = PixelGrid::new(0, 3, PixelSpacing::default(), vec![]).unwrap_err();
        assert_eq!(
            e,
            RoiError::MissingDimensions {
                rows: Some(0),
                columns: Some(3)
            }
        );

        let e = PixelGrid::new(2, 2, PixelSpacing::default(), vec![1, 2, 3]).unwrap_err();
        assert_eq!(
            e,
            RoiError::MissingPixelData {
                expected: 4,
                actual: Some(3)
            }
        );

        let e = PixelGrid::from_array(Array2::zeros((0, 4)), PixelSpacing::default()).unwrap_err();
        assert!(matches!(e, RoiError::MissingDimensions { .. }));
    }
}
