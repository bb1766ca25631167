//! 负载运行统计.

use roi_berry::prelude::*;
use std::time::{Duration, Instant};

/// benchmark 计时器.
///
/// 该计时器支持 "中途中断" 与 "结束中断, 继续开始计时".
#[derive(Clone, Debug)]
struct AccTimer {
    consumed: Duration,
    since: Instant,
}

impl AccTimer {
    /// 初始化计时器. 初始化时会视为已经开始计时 (`self.start()`).
    #[inline]
    pub fn new() -> Self {
        Self {
            consumed: Duration::from_secs(0),
            since: Instant::now(),
        }
    }

    /// 开始计时.
    #[inline]
    pub fn start(&mut self) {
        self.since = Instant::now();
    }

    /// 结束计时, 并将这一区间的时间累加. 返回本轮计时时长.
    ///
    /// # 注意
    ///
    /// 上一次调用必须是 `self.start()`, 否则计算时间值无意义.
    #[inline]
    pub fn elapsed(&mut self) -> Duration {
        let d = self.since.elapsed();
        self.consumed += d;
        d
    }

    /// 获得总共累计下来的时间综合 (以微秒为单位).
    #[inline]
    pub fn get_total_us(&self) -> u64 {
        self.consumed.as_micros() as u64
    }
}

impl Default for AccTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// benchmark 数据统计.
#[derive(Clone, Debug)]
pub struct Profile {
    /// 因 ROI 为空 (或其它输入错误) 而失败的分析次数.
    failed: u64,

    /// 成功的分析次数.
    target: u64,

    /// 所有分析花费的总时间.
    target_time: AccTimer,

    /// 整个负载花费的总时间 (包括构造请求的时间).
    real_time: AccTimer,

    /// 最耗时的一次分析 (或一批分析) 所消耗的时间.
    most: Option<Duration>,

    /// 成功分析的 ROI 面积总和 (mm²).
    area: f64,
}

impl Profile {
    /// 初始化.
    #[inline]
    pub fn new() -> Self {
        Self {
            failed: 0,
            target: 0,
            target_time: AccTimer::default(),
            real_time: AccTimer::default(),
            most: None,
            area: 0.0,
        }
    }

    /// 开始一次新的分析计时.
    #[inline]
    pub fn count_start(&mut self) {
        self.target_time.start();
    }

    /// 结束一次分析计时.
    fn stop(&mut self) {
        let d = self.target_time.elapsed();
        self.most = Some(self.most.map_or(d, |m| m.max(d)));
    }

    fn tally(&mut self, outcome: &RoiResult<RoiStats>) {
        match outcome {
            Ok(stats) => {
                self.target += 1;
                self.area += stats.area;
            }
            Err(_) => self.failed += 1,
        }
    }

    /// 结束计时并记录一次分析结果.
    pub fn record(&mut self, outcome: &RoiResult<RoiStats>) {
        self.stop();
        self.tally(outcome);
    }

    /// 结束计时并记录一批分析结果.
    pub fn record_batch(&mut self, outcomes: &[RoiResult<RoiStats>]) {
        self.stop();
        outcomes.iter().for_each(|o| self.tally(o));
    }

    /// 结束全部计时.
    #[inline]
    pub fn finish(mut self) -> Self {
        self.real_time.elapsed();
        self
    }

    /// 获得失败次数.
    #[inline]
    pub fn get_failed(&self) -> u64 {
        self.failed
    }

    /// 获得成功次数.
    #[inline]
    pub fn get_target(&self) -> u64 {
        self.target
    }

    /// 以微秒为单位获得分析的总花费自然时间.
    #[inline]
    pub fn get_target_time_us(&self) -> u64 {
        self.target_time.get_total_us()
    }

    /// 以微秒为单位获得负载运行到目前的总自然时间.
    #[inline]
    pub fn get_real_time_us(&self) -> u64 {
        self.real_time.get_total_us()
    }

    /// 以微秒为单位获得每次分析的平均时间.
    #[inline]
    pub fn get_avg_time_us(&self) -> Option<f64> {
        match self.target + self.failed {
            0 => None,
            n => Some(self.get_target_time_us() as f64 / n as f64),
        }
    }

    /// 获得成功分析的平均面积.
    #[inline]
    pub fn get_avg_area(&self) -> Option<f64> {
        match self.target {
            0 => None,
            target => Some(self.area / target as f64),
        }
    }

    /// 获取最耗时的一次任务所消耗的时间. 如果不存在任务, 则返回 `None`.
    #[inline]
    pub fn get_most_time_consuming(&self) -> Option<Duration> {
        self.most
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Profile;
    use roi_berry::prelude::*;

    #[test]
    fn test_profile_tally() {
        let grid = PixelGrid::new(2, 2, PixelSpacing::new(0.5, 0.5), vec![0; 4]).unwrap();
        let full = Polygon::from(vec![(-1.0, -1.0), (3.0, -1.0), (3.0, 3.0), (-1.0, 3.0)]);

        let mut p = Profile::new();
        assert_eq!(p.get_avg_time_us(), None);
        assert_eq!(p.get_most_time_consuming(), None);

        p.count_start();
        p.record(&analyze(&grid, &full, &WindowOptions::none()));
        p.count_start();
        p.record(&analyze(&grid, &Polygon::default(), &WindowOptions::none()));
        let p = p.finish();

        assert_eq!(p.get_target(), 1);
        assert_eq!(p.get_failed(), 1);
        assert_eq!(p.get_avg_area(), Some(1.0));
        assert!(p.get_avg_time_us().is_some());
        assert!(p.get_most_time_consuming().is_some());
    }
}
