use crate::node::database::error::DatabaseError;
use rerep_lib::core::{plan::stage::Slot, position::PositionError};
use std::io::Error as IoError;
use thiserror::Error;

fn exit_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => String::from("killed by signal"),
    }
}

#[derive(Error, Debug)]
pub enum OperationError {
    #[error("Result {0} is not available yet")]
    MissingSlot(Slot),
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error("Unable to read operator input: {0}")]
    Prompt(IoError),
    #[error("Aborted by operator")]
    Aborted,
    #[error("Unable to execute {program}: {source}")]
    Spawn { program: String, source: IoError },
    #[error("Host name {0:?} can't be used for the replication user")]
    InvalidHostname(String),
    #[error("Data sync failed: {}", exit_code(.0))]
    SyncFailedError(Option<i32>),
    #[error("MySQL service control failed: {}", exit_code(.0))]
    ServiceControlError(Option<i32>),
    #[error("Replication has failed")]
    ReplicationFailedError,
    #[error("Replication didn't catch up within {0} seconds")]
    ReplicationCatchUpError(u64),
    #[error("Binary logging is disabled on the master")]
    BinaryLogDisabled,
    #[error(transparent)]
    Position(#[from] PositionError),
    #[error("Tables are already locked")]
    AlreadyLocked,
    #[error("Tables are not locked")]
    NotLocked,
    #[error("No staging directory is configured on this side")]
    NoStaging,
    #[error("Data can't be synced from the slave")]
    RemoteSource,
    #[error("Master host is only known on the slave side")]
    NoMasterHost,
    #[error("Filesystem error: {0}")]
    Io(#[from] IoError),
}

pub type OperationResult<T> = Result<T, OperationError>;
