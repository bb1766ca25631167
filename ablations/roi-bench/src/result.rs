//! 负载运行结果.

use crate::workload::Profile;
use std::io::{self, Write};

/// 将 `p` 的统计写进 `w` 中.
fn describe_into<W: Write>(name: &str, p: &Profile, w: &mut W) -> io::Result<()> {
    const S4: &str = "    ";

    #[inline]
    fn f64_to_display(f: Option<f64>) -> String {
        match f {
            Some(f) => format!("{f:.3}"),
            None => "/".to_string(),
        }
    }

    writeln!(w, "Workload `{name}`:")?;
    writeln!(w, "{S4}Failed analyses: {}", p.get_failed())?;
    writeln!(w, "{S4}Successful analyses: {}", p.get_target())?;
    writeln!(w, "{S4}Analysis total time: {} us", p.get_target_time_us())?;
    writeln!(
        w,
        "{S4}Analysis average time: {} us",
        f64_to_display(p.get_avg_time_us())
    )?;
    writeln!(w, "{S4}Total machine time: {} us", p.get_real_time_us())?;
    writeln!(
        w,
        "{S4}Average ROI area: {} mm²",
        f64_to_display(p.get_avg_area())
    )?;
    let t = p.get_most_time_consuming().map(|d| d.as_micros() as f64);
    write!(w, "{S4}Slowest run costs {} us", f64_to_display(t))?;
    Ok(())
}

/// 所有负载的最终结果.
pub struct BenchResult {
    data: Vec<(&'static str, Profile)>,
}

impl BenchResult {
    pub fn from_iter<I: IntoIterator<Item = (&'static str, Profile)>>(it: I) -> Self {
        Self {
            data: it.into_iter().collect(),
        }
    }

    /// 打印运行结果.
    pub fn analyze(&self) {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        if let Err(e) = self.write_all(&mut out) {
            log::error!("Failed to print results: {e}");
        }
    }

    fn write_all<W: Write>(&self, w: &mut W) -> io::Result<()> {
        utils::sep_to(&mut *w)?;
        for (key, profile) in self.data.iter() {
            describe_into(key, profile, w)?;
            writeln!(w)?;
            utils::sep_to(&mut *w)?;
        }
        Ok(())
    }
}
