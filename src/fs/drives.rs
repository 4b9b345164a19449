use std::path::{Path, PathBuf};

/// Filesystem types that never hold user files.
#[cfg(unix)]
const PSEUDO_FILESYSTEMS: &[&str] = &[
    "proc",
    "sysfs",
    "devpts",
    "devtmpfs",
    "tmpfs",
    "cgroup",
    "cgroup2",
    "securityfs",
    "pstore",
    "debugfs",
    "tracefs",
    "configfs",
    "fusectl",
    "mqueue",
    "hugetlbfs",
    "binfmt_misc",
    "autofs",
    "bpf",
    "nsfs",
    "overlay",
    "squashfs",
    "efivarfs",
    "rpc_pipefs",
];

/// List the roots of mounted, readable volumes, in the order they should be
/// offered to the user.
pub fn list_available_drives() -> Vec<String> {
    let mut drives: Vec<PathBuf> = Vec::new();
    for candidate in candidate_roots() {
        if is_ready(&candidate) && !drives.contains(&candidate) {
            drives.push(candidate);
        }
    }
    drives
        .into_iter()
        .map(|p| p.to_string_lossy().to_string())
        .collect()
}

/// A volume is ready when its root can be listed.
fn is_ready(root: &Path) -> bool {
    root.is_dir() && std::fs::read_dir(root).is_ok()
}

#[cfg(windows)]
fn candidate_roots() -> Vec<PathBuf> {
    (b'A'..=b'Z')
        .map(|letter| PathBuf::from(format!("{}:\\", letter as char)))
        .collect()
}

#[cfg(unix)]
fn candidate_roots() -> Vec<PathBuf> {
    let mut roots = vec![PathBuf::from("/")];
    if let Ok(mounts) = std::fs::read_to_string("/proc/mounts") {
        let mut mount_points = parse_mounts(&mounts);
        mount_points.sort();
        roots.extend(mount_points);
    } else if let Ok(volumes) = std::fs::read_dir("/Volumes") {
        let mut mount_points: Vec<PathBuf> = volumes.flatten().map(|e| e.path()).collect();
        mount_points.sort();
        roots.extend(mount_points);
    }
    if let Some(home) = dirs::home_dir() {
        roots.push(home);
    }
    roots
}

/// Extract mount points of real filesystems from `/proc/mounts` content.
#[cfg(unix)]
fn parse_mounts(content: &str) -> Vec<PathBuf> {
    content
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let _device = fields.next()?;
            let mount_point = fields.next()?;
            let fs_type = fields.next()?;
            if PSEUDO_FILESYSTEMS.contains(&fs_type) {
                return None;
            }
            Some(PathBuf::from(unescape_mount_field(mount_point)))
        })
        .collect()
}

/// Decode the octal escapes (`\040` for space, etc.) the kernel writes in mount fields.
#[cfg(unix)]
fn unescape_mount_field(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 3 < bytes.len() {
            let digits = &bytes[i + 1..i + 4];
            if digits.iter().all(|d| (b'0'..=b'7').contains(d)) {
                let value = digits
                    .iter()
                    .fold(0u32, |acc, d| acc * 8 + u32::from(d - b'0'));
                if let Ok(value) = u8::try_from(value) {
                    out.push(value);
                    i += 4;
                    continue;
                }
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drives_are_unique_and_ready() {
        let drives = list_available_drives();
        for drive in &drives {
            assert!(Path::new(drive).is_dir());
        }
        let unique: std::collections::HashSet<&String> = drives.iter().collect();
        assert_eq!(unique.len(), drives.len());
    }

    #[cfg(unix)]
    #[test]
    fn root_is_listed_first() {
        let drives = list_available_drives();
        assert_eq!(drives.first().map(String::as_str), Some("/"));
    }

    #[cfg(unix)]
    #[test]
    fn parse_mounts_skips_pseudo_filesystems() {
        let content = "\
/dev/sda1 / ext4 rw,relatime 0 0
proc /proc proc rw,nosuid 0 0
tmpfs /run tmpfs rw 0 0
/dev/sdb1 /mnt/backup\\040disk ext4 rw 0 0
";
        let mounts = parse_mounts(content);
        assert_eq!(
            mounts,
            vec![PathBuf::from("/"), PathBuf::from("/mnt/backup disk")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn unescape_leaves_plain_text_alone() {
        assert_eq!(unescape_mount_field("/media/usb"), "/media/usb");
        assert_eq!(unescape_mount_field("/a\\011b"), "/a\tb");
        assert_eq!(unescape_mount_field("/trailing\\"), "/trailing\\");
    }
}
