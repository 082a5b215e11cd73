//! Live mount table via the system `df` command
//!
//! `df -PT` prints POSIX-format output with a filesystem type column:
//! `source fstype blocks used available capacity% mount-point`. The mount
//! point is the last whitespace-delimited field.

use super::{FsType, MountCandidate};
use crate::error::ParseError;
use std::process::Command;
use tracing::debug;

/// Minimum field count of a data row in `df -PT` output
const MIN_FIELDS: usize = 7;

/// List currently mounted filesystems of supported types.
///
/// Fails only when the command itself cannot be run; unparseable rows in
/// its output are skipped.
pub fn live_mounts() -> Result<Vec<MountCandidate>, ParseError> {
    let output = Command::new("df")
        .arg("-PT")
        .output()
        .map_err(|e| ParseError::ListFailed {
            reason: format!("df -PT: {e}"),
        })?;

    // df exits non-zero when any single filesystem is inaccessible, but
    // still prints the rows for the rest.
    if !output.status.success() {
        debug!(status = %output.status, "df exited non-zero, parsing partial output");
    }

    Ok(parse_mount_listing(&String::from_utf8_lossy(&output.stdout)))
}

/// Parse `df -PT` tabular output.
///
/// The header row, blank lines, and rows with too few fields are skipped.
/// Extra columns are tolerated: the mount point is taken from the last
/// field.
fn parse_mount_listing(listing: &str) -> Vec<MountCandidate> {
    let mut mounts = Vec::new();

    for line in listing.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < MIN_FIELDS {
            continue;
        }

        // The header row lands here too: "Type" is not a supported fstype.
        let fs_type = FsType::parse(fields[1]);
        if !fs_type.is_supported() {
            continue;
        }

        mounts.push(MountCandidate::new(fields[fields.len() - 1], fs_type));
    }

    mounts
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Filesystem     Type 1024-blocks     Used Available Capacity Mounted on
/dev/sda1      ext4    41152736 12847104  26191616      33% /
server:/export nfs    104857600 52428800  52428800      50% /mnt/nfs-data
//srv/share    cifs    52428800  1048576  51380224       2% /mnt/share

udev           devtmpfs 8123456        0   8123456       0% /dev
";

    #[test]
    fn test_parse_filters_to_supported_types() {
        let mounts = parse_mount_listing(SAMPLE);
        assert_eq!(
            mounts,
            vec![
                MountCandidate::new("/mnt/nfs-data", FsType::Nfs),
                MountCandidate::new("/mnt/share", FsType::Cifs),
            ]
        );
    }

    #[test]
    fn test_parse_skips_short_rows() {
        let listing = "server:/export nfs 1 2\nserver:/export nfs 100 50 50 50% /mnt/ok\n";
        let mounts = parse_mount_listing(listing);
        assert_eq!(mounts, vec![MountCandidate::new("/mnt/ok", FsType::Nfs)]);
    }

    #[test]
    fn test_parse_takes_last_field_with_extra_columns() {
        let listing = "server:/export nfs 100 50 50 50% extra /mnt/data\n";
        let mounts = parse_mount_listing(listing);
        assert_eq!(mounts, vec![MountCandidate::new("/mnt/data", FsType::Nfs)]);
    }

    #[test]
    fn test_parse_empty_listing() {
        assert!(parse_mount_listing("").is_empty());
    }
}
