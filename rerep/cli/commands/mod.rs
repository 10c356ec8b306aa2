/// Protocol flags
pub mod flags;

/// `master` command
pub mod master;

/// `slave` command
pub mod slave;

use crate::node::RunError;
use nix::unistd::Uid;
use rerep_lib::core::options::OptionsError;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::metadata;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid flags: {0}")]
    ConfigError(#[from] OptionsError),
    #[error("rerep must run as root")]
    NotRoot,
    #[error("{0} doesn't look like a MySQL data directory")]
    InvalidDatadir(PathBuf),
    #[error(transparent)]
    Run(#[from] RunError),
}

/// Service control, data sync and `master.info` removal all need root
fn check_root(uid: Uid) -> Result<(), CommandError> {
    if uid.is_root() {
        Ok(())
    } else {
        Err(CommandError::NotRoot)
    }
}

async fn is_dir(path: &Path) -> bool {
    metadata(path).await.map(|meta| meta.is_dir()).unwrap_or(false)
}

async fn is_file(path: &Path) -> bool {
    metadata(path).await.map(|meta| meta.is_file()).unwrap_or(false)
}

/// Normalize the data directory path and check it looks like a MySQL one
async fn check_datadir(path: &Path) -> Result<PathBuf, CommandError> {
    // Drops trailing separators
    let datadir = path.components().collect::<PathBuf>();
    let system = datadir.join("mysql");

    if is_dir(&datadir).await && is_dir(&system).await && is_file(&system.join("user.frm")).await {
        Ok(datadir)
    } else {
        Err(CommandError::InvalidDatadir(datadir))
    }
}

#[cfg(test)]
mod tests {
    use super::{check_datadir, check_root, CommandError};
    use nix::unistd::Uid;
    use std::fs::{create_dir, write};
    use tempfile::TempDir;

    #[test]
    fn test_check_root() {
        check_root(Uid::from_raw(0)).unwrap();

        assert!(matches!(
            check_root(Uid::from_raw(1000)).unwrap_err(),
            CommandError::NotRoot
        ));
    }

    #[tokio::test]
    async fn test_check_datadir() {
        let tempdir = TempDir::new().expect("Unable to create temporary test directory");
        let datadir = tempdir.path();

        assert!(matches!(
            check_datadir(datadir).await.unwrap_err(),
            CommandError::InvalidDatadir(_)
        ));

        create_dir(datadir.join("mysql")).unwrap();
        check_datadir(datadir).await.unwrap_err();

        write(datadir.join("mysql").join("user.frm"), b"").unwrap();

        let with_slash = format!("{}/", datadir.display());
        assert_eq!(check_datadir(with_slash.as_ref()).await.unwrap(), datadir);

        // A file where a directory is expected
        let file = datadir.join("mysql").join("user.frm");
        assert!(matches!(
            check_datadir(&file).await.unwrap_err(),
            CommandError::InvalidDatadir(_)
        ));
    }

    #[tokio::test]
    async fn test_check_missing_datadir() {
        check_datadir("/this/datadir/does/not/exist".as_ref())
            .await
            .unwrap_err();
    }
}
