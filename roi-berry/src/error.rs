//! 运行时错误.

use crate::Idx2d;
use thiserror::Error;

/// ROI 分析的运行时错误. 变体本身即错误种类, `Display` 给出可读信息.
///
/// 这些都是确定性的输入校验失败, 重试没有意义.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoiError {
    /// 图像的行数或列数缺失, 或不为正.
    #[error("无法获取图像尺寸 (rows: {rows:?}, columns: {columns:?})")]
    MissingDimensions {
        /// 行数. `None` 代表缺失.
        rows: Option<usize>,
        /// 列数. `None` 代表缺失.
        columns: Option<usize>,
    },

    /// 像素数据缺失, 或长度与 `rows * columns` 不符.
    #[error("像素数据缺失或长度不符: 期望 {expected}, 实际 {actual:?}")]
    MissingPixelData {
        /// 期望的采样个数.
        expected: usize,
        /// 实际的采样个数. `None` 代表缺失.
        actual: Option<usize>,
    },

    /// 窗宽为零 (或窗参数不是有限值).
    #[error("无效的窗口参数 (center: {center}, width: {width})")]
    InvalidWindow {
        /// 窗位.
        center: f64,
        /// 窗宽.
        width: f64,
    },

    /// 光栅化后的多边形不包含任何像素.
    #[error("ROI 不包含任何像素")]
    EmptyRegion,

    /// 掩码形状与采样网格形状不一致.
    #[error("掩码形状 {mask:?} 与网格形状 {grid:?} 不符")]
    ShapeMismatch {
        /// 掩码形状 `(rows, columns)`.
        mask: Idx2d,
        /// 网格形状 `(rows, columns)`.
        grid: Idx2d,
    },
}

/// ROI 分析结果.
pub type RoiResult<T> = Result<T, RoiError>;

#[cfg(test)]
mod tests {
    use super::RoiError;

    #[test]
    fn test_error_message() {
        let e = RoiError::MissingDimensions {
            rows: Some(4),
            columns: None,
        };
        assert!(e.to_string().contains("columns: None"));

        let e = RoiError::MissingPixelData {
            expected: 16,
            actual: Some(15),
        };
        assert!(e.to_string().contains("16"));
        assert!(e.to_string().contains("Some(15)"));

        assert_eq!(RoiError::EmptyRegion.to_string(), "ROI 不包含任何像素");
    }
}
