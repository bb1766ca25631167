use either::Either;
use ndarray::{Array2, ArrayView2};

use crate::consts::gray::{GRAY_MAX, GRAY_MIN};
use crate::{Idx2d, RoiError, RoiResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 灰度窗口, 包含窗位 (center) 和窗宽 (width).
///
/// 该窗口是只读的. 若要修改窗口参数, 你应该创建新的实例.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntensityWindow {
    center: f64,
    width: f64,
}

impl IntensityWindow {
    /// 构建灰度窗.
    ///
    /// `width` 为 0 或任一参数不是有限值时返回 `Err(RoiError::InvalidWindow)`.
    /// 负窗宽是合法的, 此时映射方向反转.
    pub fn new(center: f64, width: f64) -> RoiResult<Self> {
        if center.is_finite() && width.is_finite() && width != 0.0 {
            Ok(Self { center, width })
        } else {
            Err(RoiError::InvalidWindow { center, width })
        }
    }

    /// 窗下限.
    #[inline]
    pub fn lower_bound(&self) -> f64 {
        self.center - self.width / 2.0
    }

    /// 窗上限.
    #[inline]
    pub fn upper_bound(&self) -> f64 {
        self.center + self.width / 2.0
    }

    /// 窗位.
    #[inline]
    pub fn center(&self) -> f64 {
        self.center
    }

    /// 窗宽.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// 求在当前窗口设置下, 采样值 `v` 对应的灰度 (`0.0 <= value <= 255.0`).
    ///
    /// 即 `((v - center) / width + 0.5) * 255` 再截断到 `[0, 255]`.
    #[inline]
    pub fn eval(&self, v: f64) -> f64 {
        (((v - self.center) / self.width + 0.5) * GRAY_MAX).clamp(GRAY_MIN, GRAY_MAX)
    }
}

/// 可选的窗口参数.
///
/// 只有 `center` 和 `width` 同时给出时才会启用窗口; 只给出其中一个等同于都不给.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WindowOptions {
    /// 窗位.
    #[cfg_attr(feature = "serde", serde(rename = "windowCenter", default))]
    pub center: Option<f64>,

    /// 窗宽.
    #[cfg_attr(feature = "serde", serde(rename = "windowWidth", default))]
    pub width: Option<f64>,
}

impl WindowOptions {
    /// 不做窗口映射.
    #[inline]
    pub const fn none() -> Self {
        Self {
            center: None,
            width: None,
        }
    }

    /// 以窗位 `center` 和窗宽 `width` 做窗口映射.
    #[inline]
    pub const fn new(center: f64, width: f64) -> Self {
        Self {
            center: Some(center),
            width: Some(width),
        }
    }

    /// 解析出实际使用的窗口. 不做映射时返回 `Ok(None)`.
    pub fn window(&self) -> RoiResult<Option<IntensityWindow>> {
        match (self.center, self.width) {
            (Some(c), Some(w)) => IntensityWindow::new(c, w).map(Some),
            _ => Ok(None),
        }
    }
}

/// 窗口映射的结果.
///
/// 不做映射时直接借用原始采样, 不产生拷贝.
#[derive(Clone, Debug)]
pub enum Intensities<'a> {
    /// 原始采样.
    Raw(ArrayView2<'a, i16>),

    /// 映射后的灰度.
    Windowed(Array2<f64>),
}

impl Intensities<'_> {
    /// 形状 `(rows, columns)`.
    #[inline]
    pub fn shape(&self) -> Idx2d {
        match self {
            Self::Raw(v) => v.dim(),
            Self::Windowed(a) => a.dim(),
        }
    }

    /// 获取给定位置的强度值. 越界时返回 `None`.
    #[inline]
    pub fn get(&self, pos: Idx2d) -> Option<f64> {
        match self {
            Self::Raw(v) => v.get(pos).map(|&s| f64::from(s)),
            Self::Windowed(a) => a.get(pos).copied(),
        }
    }

    /// 以行优先规则迭代所有强度值.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        match self {
            Self::Raw(v) => Either::Left(v.iter().map(|&s| f64::from(s))),
            Self::Windowed(a) => Either::Right(a.iter().copied()),
        }
    }

    /// 是否做过窗口映射?
    #[inline]
    pub fn is_windowed(&self) -> bool {
        matches!(self, Self::Windowed(_))
    }
}

/// 对整幅采样做窗口映射. 与掩码无关.
///
/// `window` 为 `None` 时为恒等映射.
pub fn apply<'a>(samples: ArrayView2<'a, i16>, window: Option<&IntensityWindow>) -> Intensities<'a> {
    let Some(w) = window else {
        return Intensities::Raw(samples);
    };

    cfg_if::cfg_if! {
        if #[cfg(feature = "rayon")] {
            let out = ndarray::Zip::from(&samples).par_map_collect(|&s| w.eval(f64::from(s)));
        } else {
            let out = samples.map(|&s| w.eval(f64::from(s)));
        }
    }
    Intensities::Windowed(out)
}

#[cfg(test)]
mod tests {
    use super::{apply, IntensityWindow, Intensities, WindowOptions};
    use crate::consts::gray::is_gray;
    use crate::RoiError;
    use ndarray::{arr2, Array2};

    fn f64_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-8
    }

    #[test]
    fn test_window_invalid_input() {
        assert_eq!(
            IntensityWindow::new(40.0, 0.0).unwrap_err(),
            RoiError::InvalidWindow {
                center: 40.0,
                width: 0.0
            }
        );
        assert!(IntensityWindow::new(f64::NAN, 10.0).is_err());
        assert!(IntensityWindow::new(0.0, f64::INFINITY).is_err());
        assert!(IntensityWindow::new(0.0, -10.0).is_ok());
    }

    #[test]
    fn test_window_generic() {
        // [60, 100]
        let w = IntensityWindow::new(80.0, 40.0).unwrap();
        assert!(f64_eq(w.lower_bound(), 60.0));
        assert!(f64_eq(w.upper_bound(), 100.0));

        assert!(f64_eq(w.eval(-3000.0), 0.0));
        assert!(f64_eq(w.eval(50.0), 0.0));
        assert!(f64_eq(w.eval(60.0), 0.0));

        // boundary 1
        assert!(w.eval(60.1) > 0.0);
        assert!(w.eval(60.1) < 1.0);
        // -- boundary 1

        assert!(f64_eq(w.eval(70.0), 255.0 * 0.25));
        assert!(f64_eq(w.eval(80.0), 255.0 * 0.5));
        assert!(f64_eq(w.eval(90.0), 255.0 * 0.75));

        // boundary 2
        assert!(w.eval(99.999) < 255.0);
        assert!(w.eval(99.999) > 254.0);
        // -- boundary 2

        assert!(f64_eq(w.eval(100.0), 255.0));
        assert!(f64_eq(w.eval(3000.0), 255.0));
    }

    #[test]
    fn test_window_negative_width() {
        let w = IntensityWindow::new(0.0, -100.0).unwrap();
        assert!(f64_eq(w.eval(-50.0), 255.0));
        assert!(f64_eq(w.eval(50.0), 0.0));
        assert!(f64_eq(w.eval(25.0), 255.0 * 0.25));
    }

    #[test]
    fn test_window_clamp() {
        let samples: Vec<i16> = vec![i16::MIN, -1024, -1, 0, 1, 40, 1024, i16::MAX];
        for &(c, wd) in &[(40.0, 400.0), (-600.0, 1500.0), (0.0, 1.0), (3.5, 0.25)] {
            let w = IntensityWindow::new(c, wd).unwrap();
            assert!(samples.iter().all(|&s| is_gray(w.eval(f64::from(s)))));
        }
    }

    #[test]
    fn test_options() {
        assert_eq!(WindowOptions::none().window(), Ok(None));
        assert_eq!(WindowOptions::default().window(), Ok(None));

        // 只给出一半参数视为不映射.
        let half = WindowOptions {
            center: Some(40.0),
            width: None,
        };
        assert_eq!(half.window(), Ok(None));
        let half = WindowOptions {
            center: None,
            width: Some(0.0),
        };
        assert_eq!(half.window(), Ok(None));

        let w = WindowOptions::new(40.0, 400.0).window().unwrap().unwrap();
        assert_eq!((w.center(), w.width()), (40.0, 400.0));

        assert!(matches!(
            WindowOptions::new(40.0, 0.0).window(),
            Err(RoiError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn test_apply_identity() {
        let raw = arr2(&[[1i16, -2], [300, i16::MIN]]);
        let out = apply(raw.view(), None);
        assert!(!out.is_windowed());
        assert_eq!(out.shape(), (2, 2));
        assert!(Iterator::eq(out.iter(), raw.iter().map(|&s| f64::from(s))));
        assert_eq!(out.get((1, 0)), Some(300.0));
        assert_eq!(out.get((2, 0)), None);
    }

    #[test]
    fn test_apply_windowed() {
        let raw = Array2::from_shape_vec((1, 4), vec![60i16, 70, 80, 120]).unwrap();
        let w = IntensityWindow::new(80.0, 40.0).unwrap();
        let out = apply(raw.view(), Some(&w));
        let Intensities::Windowed(ref a) = out else {
            panic!("expected windowed output");
        };
        assert_eq!(a.dim(), (1, 4));
        let v: Vec<f64> = out.iter().collect();
        assert!(f64_eq(v[0], 0.0));
        assert!(f64_eq(v[1], 63.75));
        assert!(f64_eq(v[2], 127.5));
        assert!(f64_eq(v[3], 255.0));
    }
}
