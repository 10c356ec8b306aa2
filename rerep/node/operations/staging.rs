use super::error::OperationResult;
use rerep_lib::core::BinlogPosition;
use std::path::Path;
use tokio::fs::{read_to_string, write};

/// File in the staging directory holding the position its snapshot was taken at
pub const STAGING_FILE: &str = "rerep.info";

pub async fn store(staging: &Path, position: &str) -> OperationResult<()> {
    write(staging.join(STAGING_FILE), format!("{}\n", position)).await?;
    Ok(())
}

/// Load the position stored by a previous run
pub async fn load(staging: &Path) -> OperationResult<String> {
    let stored = read_to_string(staging.join(STAGING_FILE)).await?;

    // Reject garbage here rather than in the middle of configuring the slave
    let position = stored.trim().parse::<BinlogPosition>()?;
    Ok(position.to_string())
}

#[cfg(test)]
mod tests {
    use super::{load, store, STAGING_FILE};
    use crate::node::operations::error::OperationError;
    use std::fs::{read_to_string, write};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_store_load() {
        let tempdir = TempDir::new().expect("Unable to create temporary test directory");

        store(tempdir.path(), "mysql-bin.000003 154").await.unwrap();
        assert_eq!(
            read_to_string(tempdir.path().join(STAGING_FILE)).unwrap(),
            "mysql-bin.000003 154\n"
        );

        assert_eq!(load(tempdir.path()).await.unwrap(), "mysql-bin.000003 154");
    }

    #[tokio::test]
    async fn test_load_missing() {
        let tempdir = TempDir::new().expect("Unable to create temporary test directory");

        assert!(matches!(
            load(tempdir.path()).await.unwrap_err(),
            OperationError::Io(_)
        ));
    }

    #[tokio::test]
    async fn test_load_malformed() {
        let tempdir = TempDir::new().expect("Unable to create temporary test directory");
        write(tempdir.path().join(STAGING_FILE), "garbage\n").unwrap();

        assert!(matches!(
            load(tempdir.path()).await.unwrap_err(),
            OperationError::Position(_)
        ));
    }
}
