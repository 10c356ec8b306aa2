use super::error::{OperationError, OperationResult};
use crate::node::shell::Shell;
use base64::{engine::general_purpose::STANDARD, Engine};
use rand::{rngs::OsRng, RngCore};

const PASSWORD_LENGTH: usize = 32;

/// Replication user name, derived from the slave host name
pub async fn username(shell: &dyn Shell) -> OperationResult<String> {
    let hostname = shell
        .hostname()
        .await
        .map_err(|source| OperationError::Spawn {
            program: String::from("hostname"),
            source,
        })?;

    let host = hostname.split('.').next().unwrap_or_default();
    if host.is_empty() {
        return Err(OperationError::InvalidHostname(hostname.clone()));
    }

    Ok(format!("repl_{}", host))
}

/// Random replication password
pub fn password() -> String {
    let mut bytes = [0u8; 30];
    OsRng.fill_bytes(&mut bytes);

    let mut password = STANDARD.encode(bytes);
    password.truncate(PASSWORD_LENGTH);
    password
}
