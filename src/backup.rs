//! Manual backup of the data directory.
//!
//! Packs the embedded database directory into a timestamped, checksummed
//! tar.gz so hobbyists can move their painting log between machines. The
//! SHA256 checksum is written alongside the archive for verification.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use log::info;
use sha2::{Digest, Sha256};
use tar::Builder;

/// Description of one created backup archive.
#[derive(Debug, Clone)]
pub struct BackupInfo {
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
    /// Hex SHA256 of the archive file.
    pub checksum: String,
    pub path: PathBuf,
}

/// Create a tar.gz backup of `data_dir` inside `backup_dir`, plus a
/// `.sha256` sidecar with the archive checksum.
pub fn create_backup(data_dir: &Path, backup_dir: &Path) -> io::Result<BackupInfo> {
    if !data_dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("data directory {} does not exist", data_dir.display()),
        ));
    }
    fs::create_dir_all(backup_dir)?;

    let created_at = Utc::now();
    let archive_name = format!("muster-backup-{}.tar.gz", created_at.format("%Y%m%d-%H%M%S"));
    let archive_path = backup_dir.join(&archive_name);

    let file = File::create(&archive_path)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = Builder::new(encoder);
    builder.append_dir_all("data", data_dir)?;
    builder.into_inner()?.finish()?;

    let checksum = sha256_file(&archive_path)?;
    let sidecar = backup_dir.join(format!("{archive_name}.sha256"));
    fs::write(sidecar, format!("{checksum}  {archive_name}\n"))?;

    let size_bytes = fs::metadata(&archive_path)?.len();
    info!(
        "wrote backup {} ({} bytes, sha256 {})",
        archive_path.display(),
        size_bytes,
        checksum
    );

    Ok(BackupInfo {
        created_at,
        size_bytes,
        checksum,
        path: archive_path,
    })
}

fn sha256_file(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn backup_produces_archive_and_checksum() {
        let root = TempDir::new().expect("tempdir");
        let data_dir = root.path().join("data");
        fs::create_dir_all(&data_dir).unwrap();
        fs::write(data_dir.join("db"), b"payload").unwrap();

        let backup_dir = root.path().join("backups");
        let info = create_backup(&data_dir, &backup_dir).expect("backup");

        assert!(info.path.exists());
        assert!(info.size_bytes > 0);
        assert_eq!(info.checksum.len(), 64);
        let sidecar = PathBuf::from(format!("{}.sha256", info.path.display()));
        assert!(sidecar.exists());
    }

    #[test]
    fn missing_data_dir_is_an_error() {
        let root = TempDir::new().expect("tempdir");
        let result = create_backup(&root.path().join("nope"), &root.path().join("backups"));
        assert!(result.is_err());
    }
}
