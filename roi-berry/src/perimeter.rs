//! ROI 周长.
//!
//! 对 ROI 内每个像素检查上下左右四条边. 如果某条边另一侧的像素越界或不在 ROI 内,
//! 则该边属于边界. 左右两条 (竖直) 边各贡献 `spacing.y()`, 上下两条 (水平)
//! 边各贡献 `spacing.x()`. 不连通区域和带洞区域的每一段边界都会被计入.

use crate::{Idx2d, Mask, PixelSpacing, RoiError, RoiResult};

impl Mask {
    /// 以 `spacing` 为像素间距, 求 ROI 的总边界长度. 空 ROI 的周长为 0.
    pub fn perimeter(&self, spacing: PixelSpacing) -> f64 {
        self.positions()
            .map(|pos| {
                let [up, down, left, right] = self.exposed_edges(pos);
                let vertical = u8::from(left) + u8::from(right);
                let horizontal = u8::from(up) + u8::from(down);
                f64::from(vertical) * spacing.y() + f64::from(horizontal) * spacing.x()
            })
            .sum()
    }
}

/// 求 `mask` 在形状为 `(rows, columns)` 的网格上的周长.
///
/// `mask` 形状与 `(rows, columns)` 不符时返回 `Err(RoiError::ShapeMismatch)`.
pub fn perimeter(mask: &Mask, (rows, columns): Idx2d, spacing: PixelSpacing) -> RoiResult<f64> {
    if mask.shape() != (rows, columns) {
        return Err(RoiError::ShapeMismatch {
            mask: mask.shape(),
            grid: (rows, columns),
        });
    }
    Ok(mask.perimeter(spacing))
}
