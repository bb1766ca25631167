//! 合成体模与测试多边形.
//!
//! 多边形坐标均为 `(x, y) = (列, 行)`.

use ndarray::Array2;
use roi_berry::prelude::*;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// 空气的 CT 值.
const AIR: i16 = -1000;

/// 软组织的 CT 值.
const SOFT_TISSUE: i16 = 40;

/// 病灶的 CT 值.
const LESION: i16 = 120;

/// 体模的像素间距 (mm).
const SPACING: f64 = 0.7;

#[inline]
fn center(rows: usize, columns: usize) -> (f64, f64) {
    ((columns as f64 - 1.0) / 2.0, (rows as f64 - 1.0) / 2.0)
}

#[inline]
fn radius(rows: usize, columns: usize) -> f64 {
    0.35 * rows.min(columns) as f64
}

/// 构建 `size * size` 的腹部体模: 空气背景中有一个软组织圆盘, 中心是一个高密度病灶.
/// 每个像素带有确定性的小幅纹理.
pub fn abdomen(size: usize) -> RoiResult<PixelGrid> {
    let (cx, cy) = center(size, size);
    let body = 0.45 * size as f64;
    let lesion = 0.08 * size as f64;

    let data = Array2::from_shape_fn((size, size), |(h, w)| {
        let d = (w as f64 - cx).hypot(h as f64 - cy);
        let base = if d <= lesion {
            LESION
        } else if d <= body {
            SOFT_TISSUE
        } else {
            return AIR;
        };
        base + ((h * 7 + w * 13) % 11) as i16 - 5
    });
    PixelGrid::from_array(data, PixelSpacing::new(SPACING, SPACING))
}

/// 以网格中心为中心的矩形, 半宽与半高分别为 `columns * frac` 与 `rows * frac`.
pub fn rectangle(rows: usize, columns: usize, frac: f64) -> Polygon {
    let (cx, cy) = center(rows, columns);
    let (hx, hy) = (columns as f64 * frac, rows as f64 * frac);
    Polygon::from(vec![
        (cx - hx, cy - hy),
        (cx + hx, cy - hy),
        (cx + hx, cy + hy),
        (cx - hx, cy + hy),
    ])
}

/// 尖端朝上的三角形.
pub fn triangle(rows: usize, columns: usize) -> Polygon {
    let (c, r) = (columns as f64, rows as f64);
    Polygon::from(vec![(0.5 * c, 0.2 * r), (0.8 * c, 0.8 * r), (0.2 * c, 0.8 * r)])
}

/// `vertices` 角星, 外顶点与内顶点交替. 这是一个简单 (不自交) 的凹多边形.
pub fn star(rows: usize, columns: usize, vertices: usize) -> Polygon {
    let (cx, cy) = center(rows, columns);
    let outer = radius(rows, columns);
    let inner = outer * 0.4;
    (0..vertices * 2)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let a = i as f64 * PI / vertices as f64 - FRAC_PI_2;
            Point::new(cx + r * a.cos(), cy + r * a.sin())
        })
        .collect()
}

/// 五角星形 (自交). 按奇偶规则, 中心的五边形不属于 ROI.
pub fn pentagram(rows: usize, columns: usize) -> Polygon {
    let (cx, cy) = center(rows, columns);
    let r = radius(rows, columns);
    (0..5)
        .map(|k| {
            let a = ((k * 2) % 5) as f64 * TAU / 5.0 - FRAC_PI_2;
            Point::new(cx + r * a.cos(), cy + r * a.sin())
        })
        .collect()
}

/// 完全位于网格之外 (左上方) 的矩形.
pub fn outside(rows: usize, columns: usize) -> Polygon {
    let (c, r) = (columns as f64, rows as f64);
    Polygon::from(vec![(-c, -r), (-1.0, -r), (-1.0, -1.0), (-c, -1.0)])
}
