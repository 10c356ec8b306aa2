//! # Stage execution
//!
//! Both sides walk the same plan in lockstep. For every stage the owner runs the operation
//! and sends two lines, the result and `COMPLETED <index>`, while the other side reads both
//! and checks the marker. Neither side starts stage `i + 1` before stage `i` went over the
//! wire, so the connection is the only barrier the two processes need.

/// Executor error
pub mod error;

/// Stage results
pub mod output;

use super::{operations::error::OperationResult, transport::LineStream};
use async_trait::async_trait;
use error::{ExecutorError, ExecutorResult};
use output::StageOutput;
use rerep_lib::core::{plan::stage::Operation, Plan, Role};
use std::time::Instant;
use tokio::io::{AsyncRead, AsyncWrite};

/// Runs the stages owned by the local side
#[async_trait(?Send)]
pub trait StageRunner {
    /// Run `operation`, returning the line to send to the other side
    async fn run(&mut self, operation: &Operation, output: &StageOutput) -> OperationResult<String>;
}

fn completion_marker(index: usize) -> String {
    format!("COMPLETED {}", index)
}

pub struct Executor<T> {
    role: Role,
    stream: LineStream<T>,
    output: StageOutput,
}

impl<T> Executor<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(role: Role, stream: LineStream<T>) -> Self {
        Executor {
            role,
            stream,
            output: StageOutput::default(),
        }
    }

    #[cfg(test)]
    pub fn output(&self) -> &StageOutput {
        &self.output
    }

    /// Walk the whole plan, stopping at the first error
    pub async fn execute<R>(&mut self, plan: &Plan, runner: &mut R) -> ExecutorResult<()>
    where
        R: StageRunner,
    {
        for (index, stage) in plan.iter().enumerate() {
            let marker = completion_marker(index);

            let result = if stage.owner == self.role {
                info!("Running {}", stage.operation);
                let started = Instant::now();

                let result = runner
                    .run(&stage.operation, &self.output)
                    .await
                    .map_err(|source| ExecutorError::Operation {
                        index,
                        operation: stage.operation.name(),
                        source,
                    })?;

                if result.contains('\n') {
                    return Err(ExecutorError::MultilineResult(stage.operation.name()));
                }

                self.stream.send_line(&result).await?;
                self.stream.send_line(&marker).await?;

                info!(
                    "Finished {} in {:.2}s",
                    stage.operation,
                    started.elapsed().as_secs_f64()
                );

                result
            } else {
                info!("Waiting for remote to complete {}...", stage.operation);

                let result = self.stream.receive_line().await?;
                let received = self.stream.receive_line().await?;

                if received != marker {
                    return Err(ExecutorError::ProtocolDesync {
                        expected: marker,
                        received,
                    });
                }

                match stage.slot {
                    Some(slot) if slot.is_secret() => {
                        info!("Remote completed {}", stage.operation)
                    }
                    _ => info!("Remote completed {}: {:?}", stage.operation, result),
                }

                result
            };

            if let Some(slot) = stage.slot {
                self.output.record(slot, result)?;
            }
        }

        Ok(())
    }

    pub async fn close(self) -> ExecutorResult<()> {
        Ok(self.stream.close().await?)
    }
}
