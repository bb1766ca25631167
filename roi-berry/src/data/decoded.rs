//! 外部解码器的输出.
//!
//! 本库不解析任何图像容器格式. 解码器读出尺寸, 像素间距和原始像素数据后,
//! 以 [`DecodedImage`] 的形式交给本库, 再由 [`PixelGrid`] 完成校验.

use byteorder::{ByteOrder, LittleEndian};
use num::ToPrimitive;
use std::collections::BTreeMap;

use super::{check_dims, PixelGrid, PixelSpacing};
use crate::consts::tags as keys;
use crate::{RoiError, RoiResult};

/// tag 字典中的值.
#[derive(Clone, Debug, PartialEq)]
pub enum TagValue {
    /// 字符串值.
    Text(String),

    /// 数值.
    Number(f64),
}

impl TagValue {
    /// 若为数值则返回之.
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// 若为字符串则返回之.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }
}

/// 解码器读出的单帧图像. 所有字段都可能缺失.
#[derive(Clone, Debug, Default)]
pub struct DecodedImage {
    /// 行数.
    pub rows: Option<u16>,

    /// 列数.
    pub columns: Option<u16>,

    /// 像素间距字符串, 形如 `"0.7\\0.7"`.
    pub pixel_spacing: Option<String>,

    /// 行优先的 16-bit 有符号采样.
    pub pixel_data: Option<Vec<i16>>,

    /// 其余所有 tag.
    pub tags: BTreeMap<String, TagValue>,
}

impl DecodedImage {
    /// 从 tag 字典和像素数据构建.
    ///
    /// 行数, 列数取自 [`keys::ROWS`], [`keys::COLUMNS`] (必须是可以用 `u16`
    /// 表示的数值), 像素间距取自 [`keys::PIXEL_SPACING`] (必须是字符串).
    /// 类型不符的 tag 视为缺失.
    pub fn from_tags(tags: BTreeMap<String, TagValue>, pixel_data: Option<Vec<i16>>) -> Self {
        let dim = |key: &str| {
            tags.get(key)
                .and_then(TagValue::as_number)
                .and_then(|n| (n.fract() == 0.0).then_some(n))
                .and_then(|n| n.to_u16())
        };
        let rows = dim(keys::ROWS);
        let columns = dim(keys::COLUMNS);
        let pixel_spacing = tags
            .get(keys::PIXEL_SPACING)
            .and_then(TagValue::as_text)
            .map(str::to_owned);
        Self {
            rows,
            columns,
            pixel_spacing,
            pixel_data,
            tags,
        }
    }

    /// 将小端序字节流解释为 16-bit 有符号采样. 末尾多出的单个字节被忽略.
    pub fn samples_from_le_bytes(bytes: &[u8]) -> Vec<i16> {
        let mut buf = vec![0i16; bytes.len() / 2];
        LittleEndian::read_i16_into(&bytes[..buf.len() * 2], &mut buf);
        buf
    }

    /// 像素间距. 缺失或无法解析时取默认值.
    #[inline]
    pub fn spacing(&self) -> PixelSpacing {
        self.pixel_spacing
            .as_deref()
            .map_or_else(PixelSpacing::default, PixelSpacing::parse)
    }
}

impl TryFrom<&DecodedImage> for PixelGrid {
    type Error = RoiError;

    /// 先检查尺寸, 再检查像素数据.
    fn try_from(image: &DecodedImage) -> RoiResult<Self> {
        let rows = image.rows.map(usize::from);
        let columns = image.columns.map(usize::from);
        let expected = check_dims(rows, columns)?;
        let samples = image
            .pixel_data
            .as_ref()
            .ok_or(RoiError::MissingPixelData {
                expected,
                actual: None,
            })?;
        PixelGrid::new(
            rows.unwrap_or_default(),
            columns.unwrap_or_default(),
            image.spacing(),
            samples.clone(),
        )
    }
}
