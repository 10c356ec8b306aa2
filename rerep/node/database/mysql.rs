use super::{
    error::{DatabaseError, DatabaseResult},
    quote, Database, Session,
};
use crate::config::database::DatabaseConfig;
use async_trait::async_trait;
use mysql_async::{prelude::Queryable, Conn, Error as MysqlError, OptsBuilder, Row};
use rerep_lib::core::BinlogPosition;

fn query_error(e: MysqlError) -> DatabaseError {
    DatabaseError::DatabaseQueryError(e.to_string())
}

/// Database backed by a real MySQL server
pub struct MysqlDatabase {
    config: DatabaseConfig,
}

impl MysqlDatabase {
    pub fn new(config: DatabaseConfig) -> Self {
        MysqlDatabase { config }
    }

    fn options(&self, password: &str) -> OptsBuilder {
        let options = OptsBuilder::default()
            .ip_or_hostname(self.config.host.clone())
            .tcp_port(self.config.port)
            .user(Some(self.config.user.clone()))
            .pass(Some(password));

        match self.config.socket.as_ref() {
            Some(socket) => options.socket(Some(socket.to_string_lossy())),
            None => options,
        }
    }
}

#[async_trait]
impl Database for MysqlDatabase {
    async fn connect(&self, password: &str) -> DatabaseResult<Box<dyn Session>> {
        let conn = Conn::new(self.options(password))
            .await
            .map_err(|e| DatabaseError::DatabaseConnectError(e.to_string()))?;

        Ok(Box::new(MysqlSession(conn)))
    }
}

struct MysqlSession(Conn);

#[async_trait]
impl Session for MysqlSession {
    async fn execute(&mut self, statement: &str) -> DatabaseResult<()> {
        self.0.query_drop(statement).await.map_err(query_error)
    }

    async fn master_status(&mut self) -> DatabaseResult<Option<BinlogPosition>> {
        let row: Option<Row> = self
            .0
            .query_first("SHOW MASTER STATUS")
            .await
            .map_err(query_error)?;

        Ok(row.and_then(|row| {
            Some(BinlogPosition::new(
                row.get::<String, _>("File")?,
                row.get::<u64, _>("Position")?,
            ))
        }))
    }

    async fn master_pos_wait(
        &mut self,
        position: &BinlogPosition,
        timeout: u64,
    ) -> DatabaseResult<Option<i64>> {
        let statement = format!(
            "SELECT MASTER_POS_WAIT({}, {}, {})",
            quote(&position.file),
            position.offset,
            timeout
        );

        let waited: Option<Option<i64>> = self
            .0
            .query_first(statement)
            .await
            .map_err(query_error)?;

        Ok(waited.flatten())
    }

    async fn close(self: Box<Self>) -> DatabaseResult<()> {
        let MysqlSession(conn) = *self;
        conn.disconnect().await.map_err(query_error)
    }
}
