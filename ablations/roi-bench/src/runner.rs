//! 程序运行函数.

use crate::result::BenchResult;
use crate::workload::{self, phantom};
use roi_berry::prelude::*;
use std::thread;

/// 实际运行. 每种负载在独立线程上执行, 共享同一只读网格.
pub fn run(grid: &PixelGrid, repeat: u32, vertices: usize) -> BenchResult {
    let (rows, columns) = grid.shape();
    let batch: Vec<Polygon> = (0..utils::cpus().max(1))
        .map(|i| phantom::rectangle(rows, columns, 0.1 + 0.05 * (i % 8) as f64))
        .collect();

    log::info!("Running ROI workloads on {} cores...", utils::cpus());
    thread::scope(|s| {
        let handles = [
            s.spawn(|| workload::single("rectangle", grid, &phantom::rectangle(rows, columns, 0.25), repeat)),
            s.spawn(|| workload::single("triangle", grid, &phantom::triangle(rows, columns), repeat)),
            s.spawn(|| workload::single("star", grid, &phantom::star(rows, columns, vertices), repeat)),
            s.spawn(|| workload::single("pentagram", grid, &phantom::pentagram(rows, columns), repeat)),
            s.spawn(|| workload::single("outside", grid, &phantom::outside(rows, columns), repeat)),
            s.spawn(|| workload::batch(grid, &batch, repeat)),
        ];

        BenchResult::from_iter(
            ["rectangle", "triangle", "star", "pentagram", "outside", "batch"]
                .into_iter()
                .zip(
                    handles
                        .into_iter()
                        .map(|th| th.join().expect("Thread joining error")),
                ),
        )
    })
}

/// 在体模中心的病灶附近做一次带窗口的分析, 用于展示结果格式.
pub fn sample(grid: &PixelGrid) -> RoiResult<RoiStats> {
    let (rows, columns) = grid.shape();
    analyze(
        grid,
        &phantom::rectangle(rows, columns, 0.1),
        &utils::soft_tissue_window(),
    )
}
