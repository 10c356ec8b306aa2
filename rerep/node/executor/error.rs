use crate::node::{operations::error::OperationError, transport::error::TransportError};
use rerep_lib::core::plan::stage::Slot;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Protocol desync. Expected {expected:?}, received {received:?}")]
    ProtocolDesync { expected: String, received: String },
    #[error("Stage {index} ({operation}) failed: {source}")]
    Operation {
        index: usize,
        operation: &'static str,
        source: OperationError,
    },
    #[error("Result of {0} doesn't fit on a single line")]
    MultilineResult(&'static str),
    #[error("Result {0} was already recorded")]
    SlotOverwrite(Slot),
}

pub type ExecutorResult<T> = Result<T, ExecutorError>;
