/// Database error
pub mod error;

/// MySQL client
pub mod mysql;

use async_trait::async_trait;
use error::DatabaseResult;
use rerep_lib::core::BinlogPosition;

/// Local MySQL server
#[async_trait]
pub trait Database: Send + Sync {
    /// Open a new connection as the administrative user
    async fn connect(&self, password: &str) -> DatabaseResult<Box<dyn Session>>;
}

/// Single open connection. Server side state, like table locks, lives as long as it does.
#[async_trait]
pub trait Session: Send {
    async fn execute(&mut self, statement: &str) -> DatabaseResult<()>;

    /// Current binary log coordinates, `None` if binary logging is disabled
    async fn master_status(&mut self) -> DatabaseResult<Option<BinlogPosition>>;

    /// Block until replication applied everything up to `position`.
    ///
    /// Returns what `MASTER_POS_WAIT` does: `None` if replication isn't running,
    /// `-1` on timeout, amount of events waited for otherwise.
    async fn master_pos_wait(
        &mut self,
        position: &BinlogPosition,
        timeout: u64,
    ) -> DatabaseResult<Option<i64>>;

    async fn close(self: Box<Self>) -> DatabaseResult<()>;
}

/// Quote a value as an SQL string literal
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}
