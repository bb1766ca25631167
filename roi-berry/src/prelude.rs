//! 🍇欢迎光临🍓
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::Idx2d;

pub use crate::analyzer::{analyze, analyze_batch, analyze_decoded, RoiRequest, RoiStats};
pub use crate::data::{DecodedImage, Mask, PixelGrid, PixelSpacing, WindowOptions};
pub use crate::error::{RoiError, RoiResult};
pub use crate::geometry::{Point, Polygon};

pub use crate::consts::gray::{GRAY_MAX, GRAY_MIN};
pub use crate::consts::DEFAULT_SPACING;
