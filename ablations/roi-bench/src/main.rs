//! 在合成的体模网格上运行 ROI 分析, 统计各类多边形负载的耗时.
//!
//! 参数见 `utils::config`. 日志级别可通过 `RUST_LOG` 调整.

mod result;
mod runner;
mod workload;

use log::LevelFilter;
use simple_logger::SimpleLogger;

fn main() {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()
        .expect("Logger initialization error");

    let size = utils::config::grid_size_from_env_or_default();
    let repeat = utils::config::repeat_from_env_or_default();
    let vertices = utils::config::star_vertices_from_env_or_default();
    log::info!("grid {size}x{size}, {repeat} runs per workload, {vertices}-point star");

    let grid = match workload::phantom::abdomen(size) {
        Ok(grid) => grid,
        Err(e) => {
            log::error!("Failed to build phantom: {e}");
            return;
        }
    };
    runner::run(&grid, repeat, vertices).analyze();

    match runner::sample(&grid) {
        Ok(stats) => {
            utils::sep();
            println!("{stats}");
            utils::sep();
            match serde_json::to_string_pretty(&stats) {
                Ok(json) => println!("{json}"),
                Err(e) => log::error!("JSON serialization error: {e}"),
            }
        }
        Err(e) => log::error!("Sample analysis failed: {e}"),
    }
}
