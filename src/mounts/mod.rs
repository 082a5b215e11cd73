//! Mount enumeration and reconciliation
//!
//! Candidate mount points come from two sources: the static mount table
//! (fstab) and the live mount table (the system `df` command). The live
//! table is authoritative for what gets probed; static entries with no live
//! counterpart are reported as failures without any I/O ever touching them.

pub mod fstab;
pub mod live;

use crate::error::ParseError;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// Filesystem type of a mount table entry.
///
/// Only network filesystems are probed; add a variant here to support
/// another type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsType {
    Nfs,
    Cifs,
    /// Any type this tool does not probe
    Other,
}

impl FsType {
    /// Parse a mount table type column
    pub fn parse(s: &str) -> Self {
        match s {
            "nfs" => FsType::Nfs,
            "cifs" => FsType::Cifs,
            _ => FsType::Other,
        }
    }

    /// Whether mounts of this type are probed
    pub fn is_supported(self) -> bool {
        !matches!(self, FsType::Other)
    }
}

/// One entry from a mount table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountCandidate {
    /// Path the filesystem is (or should be) attached at
    pub path: String,

    /// Filesystem type from the table's type column
    pub fs_type: FsType,
}

impl MountCandidate {
    /// Create a new mount candidate
    pub fn new(path: impl Into<String>, fs_type: FsType) -> Self {
        Self {
            path: path.into(),
            fs_type,
        }
    }
}

/// Result of reconciling the static table against the live table
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reconciled {
    /// Currently mounted paths, to be probed concurrently
    pub to_probe: Vec<String>,

    /// Configured but not mounted, reported failed without any I/O
    pub pre_failed: Vec<String>,
}

impl Reconciled {
    /// Total number of candidate mount points
    pub fn total(&self) -> usize {
        self.to_probe.len() + self.pre_failed.len()
    }
}

/// Reconcile configured mounts against live mounts.
///
/// The live table decides what gets probed: mounted-but-unconfigured points
/// are probed too. Static entries absent from the live table are pre-failed.
/// Paths are deduplicated across both sources so each one shows up in the
/// report exactly once.
pub fn reconcile(static_mounts: &[MountCandidate], live_mounts: &[MountCandidate]) -> Reconciled {
    let live_paths: HashSet<&str> = live_mounts.iter().map(|m| m.path.as_str()).collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut reconciled = Reconciled::default();

    for mount in live_mounts {
        if seen.insert(mount.path.as_str()) {
            reconciled.to_probe.push(mount.path.clone());
        }
    }

    for mount in static_mounts {
        if !live_paths.contains(mount.path.as_str()) && seen.insert(mount.path.as_str()) {
            reconciled.pre_failed.push(mount.path.clone());
        }
    }

    reconciled
}

/// Enumerate candidate mount points from both tables and reconcile them.
///
/// Either source may fail independently; a failure degrades that source to
/// zero candidates with a warning. Only when both sources fail is the run
/// aborted, since then no mount point can be determined at all.
pub fn enumerate(fstab_path: &Path) -> Result<Reconciled, ParseError> {
    let static_result = fstab::static_mounts(fstab_path);
    let live_result = live::live_mounts();

    if let (Err(static_err), Err(live_err)) = (&static_result, &live_result) {
        return Err(ParseError::NoMountSources {
            static_reason: static_err.to_string(),
            live_reason: live_err.to_string(),
        });
    }

    let static_mounts = static_result.unwrap_or_else(|e| {
        warn!(path = %fstab_path.display(), error = %e, "Static mount table unavailable, assuming no configured mounts");
        Vec::new()
    });

    let live_mounts = live_result.unwrap_or_else(|e| {
        warn!(error = %e, "Could not list mounted filesystems, assuming none");
        Vec::new()
    });

    debug!(
        configured = static_mounts.len(),
        mounted = live_mounts.len(),
        "Mount tables read"
    );

    Ok(reconcile(&static_mounts, &live_mounts))
}
