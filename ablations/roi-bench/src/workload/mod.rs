//! 分析负载.

pub mod phantom;
mod profile;

use roi_berry::prelude::*;
use roi_berry::RoiRequest;

pub use profile::Profile;

/// 对单个多边形重复分析 `repeat` 次, 交替使用原始强度和软组织窗口.
pub fn single(name: &str, grid: &PixelGrid, polygon: &Polygon, repeat: u32) -> Profile {
    let mut profile = Profile::new();
    let window = utils::soft_tissue_window();
    for i in 0..repeat {
        let options = if i % 2 == 0 { WindowOptions::none() } else { window };
        profile.count_start();
        let outcome = analyze(grid, polygon, &options);
        profile.record(&outcome);
        if let Err(e) = outcome {
            log::debug!("{name}: run {i} failed: {e}");
        }
    }
    log::info!("{name}: done.");
    profile.finish()
}

/// 将 `polygons` 组成一批独立请求, 整批执行 `repeat` 次.
pub fn batch(grid: &PixelGrid, polygons: &[Polygon], repeat: u32) -> Profile {
    let mut profile = Profile::new();
    let requests: Vec<RoiRequest> = polygons
        .iter()
        .map(|p| RoiRequest::new(grid, p.clone(), utils::soft_tissue_window()))
        .collect();
    for _ in 0..repeat {
        profile.count_start();
        let outcomes = analyze_batch(&requests);
        profile.record_batch(&outcomes);
    }
    log::info!("batch of {}: done.", requests.len());
    profile.finish()
}
