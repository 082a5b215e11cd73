//! Metrics report rendering and output
//!
//! One gauge per line: `name{mount_point="<path>"} <value>`. Line order
//! mirrors outcome arrival order, which varies across runs; consumers key
//! on the `mount_point` label, not line position.

use crate::error::OutputError;
use crate::probe::ProbeOutcome;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Gauge reporting whether the marker write succeeded
pub const WRITE_SUCCESS_METRIC: &str = "nfs_write_success";

/// Gauge reporting the write cycle's wall-clock seconds
pub const WRITE_TIME_METRIC: &str = "nfs_write_time_seconds";

/// Render all outcomes as Prometheus-style gauge lines.
///
/// Probes whose write cycle ran to completion get a timing line followed by
/// a success line; everything else gets only a success line with value 0.
pub fn render(outcomes: &[ProbeOutcome]) -> String {
    let mut report = String::new();

    for outcome in outcomes {
        if let Some(elapsed) = outcome.reported_elapsed() {
            report.push_str(&format!(
                "{WRITE_TIME_METRIC}{{mount_point=\"{}\"}} {:.6}\n",
                outcome.mount_point,
                elapsed.as_secs_f64()
            ));
        }
        report.push_str(&format!(
            "{WRITE_SUCCESS_METRIC}{{mount_point=\"{}\"}} {}\n",
            outcome.mount_point,
            u8::from(outcome.is_success())
        ));
    }

    report
}

/// Write the fully rendered report to stdout or a file.
///
/// The report is built in memory before this is called and written with a
/// single call, so a successful run never leaves a partially written file.
pub fn write_report(report: &str, output: Option<&Path>) -> Result<(), OutputError> {
    match output {
        Some(path) => {
            let mut file = File::create(path).map_err(|e| OutputError::Create {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            file.write_all(report.as_bytes())
                .map_err(|e| OutputError::Write {
                    reason: e.to_string(),
                })
        }
        None => io::stdout()
            .write_all(report.as_bytes())
            .map_err(|e| OutputError::Write {
                reason: e.to_string(),
            }),
    }
}
