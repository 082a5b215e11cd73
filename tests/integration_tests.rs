//! Integration tests for mount-probe
//!
//! Probes run against temporary directories standing in for mount points;
//! no real NFS server is involved. Live mount listings are constructed
//! directly so tests stay independent of the host's mount state.

use mount_probe::config::ProbeConfig;
use mount_probe::metrics;
use mount_probe::mounts::{self, FsType, MountCandidate};
use mount_probe::probe::orchestrator::ProbeOrchestrator;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::tempdir;

fn config() -> ProbeConfig {
    ProbeConfig {
        output_path: None,
        marker_name: ".testfile".into(),
        timeout: Duration::from_secs(5),
        fstab_path: PathBuf::from("/etc/fstab"),
        verbose: false,
    }
}

fn success_lines(report: &str) -> Vec<&str> {
    report
        .lines()
        .filter(|l| l.starts_with("nfs_write_success"))
        .collect()
}

fn timing_lines(report: &str) -> Vec<&str> {
    report
        .lines()
        .filter(|l| l.starts_with("nfs_write_time_seconds"))
        .collect()
}

#[test]
fn test_configured_but_unmounted_is_failure_only() {
    let static_mounts = vec![MountCandidate::new("/mnt/unmounted-share", FsType::Nfs)];

    let candidates = mounts::reconcile(&static_mounts, &[]);
    let outcomes = ProbeOrchestrator::new(config()).run(candidates);
    let report = metrics::render(&outcomes);

    assert_eq!(
        success_lines(&report),
        vec!["nfs_write_success{mount_point=\"/mnt/unmounted-share\"} 0"]
    );
    assert!(timing_lines(&report).is_empty());
}

#[test]
fn test_unsupported_type_is_excluded_entirely() {
    // Static table defines one nfs mount (present live) and one ext4 mount.
    let mount = tempdir().unwrap();
    let mount_path = mount.path().display().to_string();

    let table = tempdir().unwrap();
    let fstab_path = table.path().join("fstab");
    fs::write(
        &fstab_path,
        format!(
            "server:/export {mount_path} nfs defaults 0 0\n\
             /dev/sda1 /mnt/other ext4 defaults 0 1\n"
        ),
    )
    .unwrap();

    let static_mounts = mounts::fstab::static_mounts(&fstab_path).unwrap();
    let live_mounts = vec![MountCandidate::new(&mount_path, FsType::Nfs)];

    let candidates = mounts::reconcile(&static_mounts, &live_mounts);
    let outcomes = ProbeOrchestrator::new(config()).run(candidates);
    let report = metrics::render(&outcomes);

    assert!(!report.contains("/mnt/other"));
    assert_eq!(success_lines(&report).len(), 1);
    assert_eq!(timing_lines(&report).len(), 1);
    assert!(report.contains(&format!(
        "nfs_write_success{{mount_point=\"{mount_path}\"}} 1"
    )));
}

#[test]
fn test_two_live_mounts_produce_four_lines() {
    let nfs = tempdir().unwrap();
    let cifs = tempdir().unwrap();

    let live_mounts = vec![
        MountCandidate::new(nfs.path().display().to_string(), FsType::Nfs),
        MountCandidate::new(cifs.path().display().to_string(), FsType::Cifs),
    ];

    let candidates = mounts::reconcile(&[], &live_mounts);
    let outcomes = ProbeOrchestrator::new(config()).run(candidates);
    let report = metrics::render(&outcomes);

    assert_eq!(report.lines().count(), 4);
    assert_eq!(success_lines(&report).len(), 2);
    assert_eq!(timing_lines(&report).len(), 2);

    for mount in [&nfs, &cifs] {
        let path = mount.path().display().to_string();
        assert!(report.contains(&format!("nfs_write_success{{mount_point=\"{path}\"}} 1")));
    }
}

#[test]
fn test_denied_creation_reports_failure_without_timing() {
    // A regular file in place of the mount point makes marker creation
    // fail deterministically, without depending on permission handling.
    let dir = tempdir().unwrap();
    let blocked = dir.path().join("blocked-mount");
    fs::write(&blocked, b"not a directory").unwrap();
    let blocked_path = blocked.display().to_string();

    let live_mounts = vec![MountCandidate::new(&blocked_path, FsType::Nfs)];
    let candidates = mounts::reconcile(&[], &live_mounts);
    let outcomes = ProbeOrchestrator::new(config()).run(candidates);
    let report = metrics::render(&outcomes);

    assert_eq!(
        success_lines(&report),
        vec![format!("nfs_write_success{{mount_point=\"{blocked_path}\"}} 0").as_str()]
    );
    assert!(timing_lines(&report).is_empty());
}

#[test]
fn test_probe_is_idempotent() {
    let mount = tempdir().unwrap();
    let live_mounts = vec![MountCandidate::new(
        mount.path().display().to_string(),
        FsType::Nfs,
    )];

    for _ in 0..3 {
        let candidates = mounts::reconcile(&[], &live_mounts);
        let outcomes = ProbeOrchestrator::new(config()).run(candidates);
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].is_success());
        assert!(!mount.path().join(".testfile").exists());
    }
}

#[test]
fn test_expired_deadline_reports_timing_with_failure() {
    let mount = tempdir().unwrap();
    let mount_path = mount.path().display().to_string();

    let mut zero_timeout = config();
    zero_timeout.timeout = Duration::ZERO;

    let candidates = mounts::reconcile(&[], &[MountCandidate::new(&mount_path, FsType::Nfs)]);
    let outcomes = ProbeOrchestrator::new(zero_timeout).run(candidates);
    let report = metrics::render(&outcomes);

    assert!(report.contains(&format!(
        "nfs_write_success{{mount_point=\"{mount_path}\"}} 0"
    )));
    assert_eq!(timing_lines(&report).len(), 1);

    // The reported timing covers the real elapsed write cycle.
    let elapsed = outcomes[0].reported_elapsed().unwrap();
    assert!(elapsed > Duration::ZERO);
}

#[test]
fn test_report_written_to_file() {
    let mount = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    let out_path = out_dir.path().join("metrics.prom");

    let live_mounts = vec![MountCandidate::new(
        mount.path().display().to_string(),
        FsType::Nfs,
    )];
    let candidates = mounts::reconcile(&[], &live_mounts);
    let outcomes = ProbeOrchestrator::new(config()).run(candidates);
    let report = metrics::render(&outcomes);

    metrics::write_report(&report, Some(&out_path)).unwrap();

    let written = fs::read_to_string(&out_path).unwrap();
    assert_eq!(written, report);
    assert!(written.ends_with('\n'));
}

#[test]
fn test_enumerate_with_unreadable_fstab_degrades() {
    // The static table is missing, but the live table (real df) still
    // works, so enumeration must succeed instead of failing the run.
    let missing = PathBuf::from("/nonexistent/fstab");
    let candidates = mounts::enumerate(&missing).unwrap();

    // Nothing was configured, so nothing can be pre-failed.
    assert!(candidates.pre_failed.is_empty());
}
