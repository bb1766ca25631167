//! 通用常量.

/// 单通道灰度.
pub mod gray {
    /// 窗口映射后的最小灰度值.
    pub const GRAY_MIN: f64 = 0.0;

    /// 窗口映射后的最大灰度值. 255, not 256.
    pub const GRAY_MAX: f64 = 255.0;

    /// 灰度值是否位于 `[GRAY_MIN, GRAY_MAX]` 之内?
    #[inline]
    pub fn is_gray(v: f64) -> bool {
        (GRAY_MIN..=GRAY_MAX).contains(&v)
    }
}

/// 像素间距缺失或无法解析时使用的默认值 (单位: 毫米).
pub const DEFAULT_SPACING: f64 = 1.0;

/// 像素间距字符串中, 两个分量之间的分隔符.
pub const SPACING_SEPARATOR: char = '\\';

/// 解码器 tag 字典中常用的键.
pub mod tags {
    /// 行数.
    pub const ROWS: &str = "x00280010";

    /// 列数.
    pub const COLUMNS: &str = "x00280011";

    /// 像素间距.
    pub const PIXEL_SPACING: &str = "x00280030";
}
