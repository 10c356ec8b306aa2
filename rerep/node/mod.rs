/// Line transport
pub mod transport;

/// Version and options handshake
pub mod negotiation;

/// Lockstep stage execution
pub mod executor;

/// Stage operations
pub mod operations;

/// Local MySQL server
pub mod database;

/// External processes and operator prompts
pub mod shell;

use executor::{error::ExecutorError, Executor};
use negotiation::{error::NegotiationError, negotiate};
use operations::RunContext;
use rerep_lib::core::{plan, Options, Role};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use transport::{error::TransportError, LineStream};

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Connection error: {0}")]
    Transport(#[from] TransportError),
    #[error("Handshake failed: {0}")]
    Negotiation(#[from] NegotiationError),
    #[error("Run failed: {0}")]
    Executor(#[from] ExecutorError),
}

/// Run the whole protocol as `role` over an established connection
pub async fn run<T>(
    role: Role,
    mut stream: LineStream<T>,
    options: &Options,
    context: &mut RunContext<'_>,
) -> Result<(), RunError>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    let agreed = negotiate(role, &mut stream, options).await?;
    info!("You're connected to {}", context.peer());

    let plan = plan(&agreed);
    debug!(
        "Plan has {} stages, {} of them run here",
        plan.len(),
        plan.owned_by(role)
    );

    let mut executor = Executor::new(role, stream);
    executor.execute(&plan, context).await?;
    executor.close().await?;

    info!("Done!");

    Ok(())
}
