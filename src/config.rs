//! Configuration types for mount-probe
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use crate::error::ConfigError;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Maximum reasonable per-probe timeout (ten minutes)
const MAX_TIMEOUT_MS: u64 = 600_000;

/// Write-probe monitor for NFS/CIFS mounts
#[derive(Parser, Debug, Clone)]
#[command(
    name = "mount-probe",
    version,
    about = "Write-probe monitor for NFS/CIFS mounts",
    long_about = "Probes every mounted NFS/CIFS filesystem with a timed write-and-delete of a\n\
                  small marker file and emits Prometheus-style gauges for write success and\n\
                  write latency.\n\n\
                  Mount points are taken from the live mount table; entries configured in the\n\
                  static table but not currently mounted are reported as failures without\n\
                  being probed.",
    after_help = "EXAMPLES:\n    \
        mount-probe\n    \
        mount-probe -o /var/lib/node_exporter/nfs.prom\n    \
        mount-probe -t 500 -f .probe-marker -v"
)]
pub struct CliArgs {
    /// Write the metrics report to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Name of the marker file written inside each mount point
    #[arg(
        short = 'f',
        long = "filename",
        default_value = ".testfile",
        value_name = "NAME"
    )]
    pub filename: String,

    /// Per-probe timeout in milliseconds
    #[arg(short = 't', long, default_value = "200", value_name = "MS")]
    pub timeout: u64,

    /// Static mount table to reconcile against
    #[arg(long, default_value = "/etc/fstab", value_name = "PATH")]
    pub fstab: PathBuf,

    /// Verbose output (debug diagnostics on stderr)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Report destination (stdout if unset)
    pub output_path: Option<PathBuf>,

    /// Marker file name written inside each mount point
    pub marker_name: String,

    /// Per-probe deadline
    pub timeout: Duration,

    /// Static mount table path
    pub fstab_path: PathBuf,

    /// Verbose logging
    pub verbose: bool,
}

impl ProbeConfig {
    /// Create and validate configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        if args.timeout == 0 || args.timeout > MAX_TIMEOUT_MS {
            return Err(ConfigError::InvalidTimeout {
                millis: args.timeout,
                max: MAX_TIMEOUT_MS,
            });
        }

        // The marker lands directly inside each mount point, so it must be
        // a bare file name.
        if args.filename.is_empty() {
            return Err(ConfigError::InvalidMarkerName {
                name: args.filename,
                reason: "must not be empty".into(),
            });
        }
        if args.filename.contains(['/', '\\']) || args.filename == "." || args.filename == ".." {
            return Err(ConfigError::InvalidMarkerName {
                name: args.filename,
                reason: "must be a bare file name".into(),
            });
        }

        // Validate output path
        if let Some(ref output) = args.output {
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(ConfigError::InvalidOutputPath {
                        path: output.clone(),
                        reason: format!("Parent directory '{}' does not exist", parent.display()),
                    });
                }
            }
        }

        Ok(Self {
            output_path: args.output,
            marker_name: args.filename,
            timeout: Duration::from_millis(args.timeout),
            fstab_path: args.fstab,
            verbose: args.verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CliArgs {
        CliArgs {
            output: None,
            filename: ".testfile".into(),
            timeout: 200,
            fstab: PathBuf::from("/etc/fstab"),
            verbose: false,
        }
    }

    #[test]
    fn test_valid_config() {
        let config = ProbeConfig::from_args(args()).unwrap();
        assert_eq!(config.marker_name, ".testfile");
        assert_eq!(config.timeout, Duration::from_millis(200));
        assert!(config.output_path.is_none());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut args = args();
        args.timeout = 0;
        assert!(matches!(
            ProbeConfig::from_args(args),
            Err(ConfigError::InvalidTimeout { .. })
        ));
    }

    #[test]
    fn test_oversized_timeout_rejected() {
        let mut args = args();
        args.timeout = MAX_TIMEOUT_MS + 1;
        assert!(matches!(
            ProbeConfig::from_args(args),
            Err(ConfigError::InvalidTimeout { .. })
        ));
    }

    #[test]
    fn test_marker_name_with_separator_rejected() {
        let mut args = args();
        args.filename = "sub/dir".into();
        assert!(matches!(
            ProbeConfig::from_args(args),
            Err(ConfigError::InvalidMarkerName { .. })
        ));
    }

    #[test]
    fn test_empty_marker_name_rejected() {
        let mut args = args();
        args.filename = String::new();
        assert!(matches!(
            ProbeConfig::from_args(args),
            Err(ConfigError::InvalidMarkerName { .. })
        ));
    }

    #[test]
    fn test_output_with_missing_parent_rejected() {
        let mut args = args();
        args.output = Some(PathBuf::from("/nonexistent-parent-dir/metrics.prom"));
        assert!(matches!(
            ProbeConfig::from_args(args),
            Err(ConfigError::InvalidOutputPath { .. })
        ));
    }
}
