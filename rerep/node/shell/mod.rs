use async_trait::async_trait;
use dialoguer::{Confirm, Password};
use std::io::{Error as IoError, ErrorKind, Result as IoResult};
use tokio::{process::Command, task::spawn_blocking};

/// External processes and the operator terminal
#[async_trait]
pub trait Shell: Send + Sync {
    /// Run `program` with inherited stdio and wait for it.
    /// Returns its exit code, `None` if it was killed by a signal.
    async fn run(&self, program: &str, args: &[String]) -> IoResult<Option<i32>>;

    /// Local host name
    async fn hostname(&self) -> IoResult<String>;

    /// Ask the operator for a secret value
    async fn read_secret(&self, prompt: &str) -> IoResult<String>;

    /// Ask the operator whether to continue
    async fn confirm(&self, prompt: &str) -> IoResult<bool>;
}

/// Shell of the machine rerep runs on
pub struct SystemShell;

fn other<E>(error: E) -> IoError
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    IoError::new(ErrorKind::Other, error)
}

#[async_trait]
impl Shell for SystemShell {
    async fn run(&self, program: &str, args: &[String]) -> IoResult<Option<i32>> {
        debug!("Executing {} {}", program, args.join(" "));

        let status = Command::new(program).args(args).status().await?;
        Ok(status.code())
    }

    async fn hostname(&self) -> IoResult<String> {
        let output = Command::new("hostname").output().await?;

        if !output.status.success() {
            return Err(other("hostname exited with an error"));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_owned())
    }

    async fn read_secret(&self, prompt: &str) -> IoResult<String> {
        let prompt = prompt.to_owned();

        spawn_blocking(move || Password::new().with_prompt(prompt).interact())
            .await
            .map_err(other)?
            .map_err(other)
    }

    async fn confirm(&self, prompt: &str) -> IoResult<bool> {
        let prompt = prompt.to_owned();

        spawn_blocking(move || {
            Confirm::new()
                .with_prompt(prompt)
                .default(true)
                .interact()
        })
        .await
        .map_err(other)?
        .map_err(other)
    }
}
