//! Probe orchestration - one probe thread per mount point
//!
//! The orchestrator launches a probe thread per live mount point, each with
//! an independent deadline, and collects every outcome over a bounded result
//! channel. Pre-failed mount points bypass probing and go straight into the
//! channel.
//!
//! There is no preemptive kill: a probe whose filesystem call hangs in the
//! kernel holds up the final join. The per-probe deadline is a cooperative
//! self-check inside the probe, not an external interrupt.

use crate::config::ProbeConfig;
use crate::mounts::Reconciled;
use crate::probe::{write_probe, ProbeOutcome, ProbeStatus};
use crossbeam_channel::bounded;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Runs one write probe per mounted filesystem and collects the outcomes
pub struct ProbeOrchestrator {
    config: Arc<ProbeConfig>,
}

impl ProbeOrchestrator {
    /// Create a new orchestrator
    pub fn new(config: ProbeConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Run every probe and collect exactly one outcome per candidate.
    ///
    /// Returns once all probe threads have finished; outcome order follows
    /// completion order, not candidate order.
    pub fn run(&self, candidates: Reconciled) -> Vec<ProbeOutcome> {
        let run_start = Instant::now();
        let Reconciled {
            to_probe,
            pre_failed,
        } = candidates;
        let probed_count = to_probe.len();
        let skipped_count = pre_failed.len();

        // Sized to the candidate count so no sender ever blocks.
        let (tx, rx) = bounded(probed_count + skipped_count);

        for path in pre_failed {
            debug!(mount_point = %path, "Configured mount point is not mounted");
            let _ = tx.send(ProbeOutcome::not_mounted(path));
        }

        let mut handles = Vec::with_capacity(probed_count);
        for (id, mount_point) in to_probe.into_iter().enumerate() {
            let thread_tx = tx.clone();
            let config = Arc::clone(&self.config);
            let path = mount_point.clone();

            let spawned = thread::Builder::new()
                .name(format!("probe-{id}"))
                .spawn(move || {
                    let deadline = Instant::now() + config.timeout;
                    let outcome = write_probe(Path::new(&path), deadline, &config.marker_name);
                    // Sending is the thread's final action, so exactly one
                    // outcome leaves it on every path.
                    let _ = thread_tx.send(outcome);
                });

            match spawned {
                Ok(handle) => handles.push((mount_point, handle)),
                Err(e) => {
                    warn!(mount_point = %mount_point, error = %e, "Failed to spawn probe thread");
                    let _ = tx.send(failed_outcome(mount_point));
                }
            }
        }

        // Single synchronization point: wait for every probe, then close
        // the channel by dropping the last sender.
        for (mount_point, handle) in handles {
            if handle.join().is_err() {
                warn!(mount_point = %mount_point, "Probe thread panicked");
                let _ = tx.send(failed_outcome(mount_point));
            }
        }
        drop(tx);

        let outcomes: Vec<ProbeOutcome> = rx.iter().collect();

        let failures = outcomes.iter().filter(|o| !o.is_success()).count();
        info!(
            probed = probed_count,
            not_mounted = skipped_count,
            failures,
            duration_ms = run_start.elapsed().as_millis() as u64,
            "Probe run finished"
        );

        outcomes
    }
}

/// Stand-in outcome for a probe that could not run at all
fn failed_outcome(mount_point: String) -> ProbeOutcome {
    ProbeOutcome {
        mount_point,
        status: ProbeStatus::WriteFailed {
            elapsed: Duration::ZERO,
        },
    }
}
