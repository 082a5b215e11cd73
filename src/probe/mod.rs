//! Write probe for a single mount point
//!
//! Each probe performs one create-write-delete cycle against a marker file
//! inside the mount point and classifies the result. The deadline check is
//! a snapshot taken after the I/O completes, not a wait: a blocked
//! filesystem call cannot be cancelled, only observed to have taken too
//! long.

pub mod orchestrator;

use chrono::Utc;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::debug;

/// How a single mount point probe ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    /// Create, write, and close all finished before the deadline
    Completed { elapsed: Duration },

    /// The write cycle finished, but only after the deadline had passed
    TimedOut { elapsed: Duration },

    /// Creating or writing the marker file failed
    WriteFailed { elapsed: Duration },

    /// Configured in the static table but not currently mounted; never probed
    NotMounted,
}

/// Result of probing (or skipping) one mount point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// The mount point this outcome belongs to
    pub mount_point: String,

    /// How the probe ended
    pub status: ProbeStatus,
}

impl ProbeOutcome {
    /// Outcome for a configured mount point that was never mounted
    pub fn not_mounted(mount_point: impl Into<String>) -> Self {
        Self {
            mount_point: mount_point.into(),
            status: ProbeStatus::NotMounted,
        }
    }

    /// Whether the write cycle completed within the deadline
    pub fn is_success(&self) -> bool {
        matches!(self.status, ProbeStatus::Completed { .. })
    }

    /// Whether any I/O was attempted against this mount point
    pub fn attempted(&self) -> bool {
        !matches!(self.status, ProbeStatus::NotMounted)
    }

    /// Elapsed time to report, if the write cycle ran to completion
    pub fn reported_elapsed(&self) -> Option<Duration> {
        match self.status {
            ProbeStatus::Completed { elapsed } | ProbeStatus::TimedOut { elapsed } => Some(elapsed),
            ProbeStatus::WriteFailed { .. } | ProbeStatus::NotMounted => None,
        }
    }
}

/// Probe one mount point with a create-write-delete cycle.
///
/// Elapsed time always covers start to outcome determination; marker
/// deletion happens afterwards so its latency never pollutes the timing.
pub fn write_probe(mount_point: &Path, deadline: Instant, marker_name: &str) -> ProbeOutcome {
    let start = Instant::now();
    let marker_path = mount_point.join(marker_name);
    let mount_label = mount_point.display().to_string();

    let mut file = match File::create(&marker_path) {
        Ok(file) => file,
        Err(e) => {
            debug!(mount_point = %mount_label, error = %e, "Failed to create marker file");
            // Nothing was created, so there is nothing to delete.
            return ProbeOutcome {
                mount_point: mount_label,
                status: ProbeStatus::WriteFailed {
                    elapsed: start.elapsed(),
                },
            };
        }
    };

    if let Err(e) = file.write_all(Utc::now().to_rfc3339().as_bytes()) {
        debug!(mount_point = %mount_label, error = %e, "Failed to write marker file");
        let elapsed = start.elapsed();
        drop(file);
        remove_marker(&marker_path, &mount_label);
        return ProbeOutcome {
            mount_point: mount_label,
            status: ProbeStatus::WriteFailed { elapsed },
        };
    }

    drop(file);

    // Snapshot against the deadline: the I/O above already returned, but a
    // cycle that outlived the caller's tolerance still counts as a failure.
    let timed_out = Instant::now() >= deadline;
    let elapsed = start.elapsed();

    remove_marker(&marker_path, &mount_label);

    let status = if timed_out {
        ProbeStatus::TimedOut { elapsed }
    } else {
        ProbeStatus::Completed { elapsed }
    };

    ProbeOutcome {
        mount_point: mount_label,
        status,
    }
}

/// Best-effort marker deletion; never affects the probe outcome.
fn remove_marker(marker_path: &Path, mount_point: &str) {
    if let Err(e) = fs::remove_file(marker_path) {
        debug!(mount_point, error = %e, "Failed to delete marker file");
    }
}
