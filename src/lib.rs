//! mount-probe - Write-probe monitor for NFS/CIFS mounts
//!
//! Probes every mounted NFS/CIFS filesystem with a timed write-and-delete
//! of a small marker file and emits Prometheus-style gauges reporting
//! whether the write succeeded and how long it took. Built to catch the
//! classic network-mount failure mode where the mount point is present but
//! I/O hangs indefinitely.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐
//! │ static table │   │  live table  │
//! │   (fstab)    │   │   (df -PT)   │
//! └──────┬───────┘   └──────┬───────┘
//!        │                  │
//!        └────► reconcile ◄─┘
//!                   │
//!        to_probe   │   pre_failed
//!      ┌────────────┴─────────────┐
//!      ▼                          ▼
//! ┌──────────────────────┐        │
//! │  Probe Orchestrator  │        │
//! │ ┌───────┐ ┌───────┐  │        │
//! │ │probe-0│ │probe-N│  │        │
//! │ └───┬───┘ └───┬───┘  │        │
//! └─────┼─────────┼──────┘        │
//!       ▼         ▼               ▼
//!   ┌─────────────────────────────────┐
//!   │  result channel (crossbeam,     │
//!   │  bounded to candidate count)    │
//!   └───────────────┬─────────────────┘
//!                   ▼
//!          ┌─────────────────┐
//!          │ Metrics Reporter│
//!          │ (stdout / file) │
//!          └─────────────────┘
//! ```
//!
//! One run produces one snapshot, then the process exits. Per-mount
//! failures become failure gauges, never process failures; only an
//! unreadable pair of mount tables or an unwritable report aborts the run.
//!
//! # Example
//!
//! ```bash
//! # Probe all NFS/CIFS mounts, report to stdout
//! mount-probe
//!
//! # Report to a node_exporter textfile, 500ms per-probe timeout
//! mount-probe -o /var/lib/node_exporter/nfs.prom -t 500
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod mounts;
pub mod probe;

pub use config::{CliArgs, ProbeConfig};
pub use error::{ProberError, Result};
pub use probe::orchestrator::ProbeOrchestrator;
pub use probe::{ProbeOutcome, ProbeStatus};
