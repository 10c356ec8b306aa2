use super::{
    error::{OperationError, OperationResult},
    RunContext,
};
use crate::node::{
    database::{quote, Session},
    executor::output::StageOutput,
};
use rerep_lib::core::{plan::stage::Slot, BinlogPosition};
use tokio::fs::{metadata, remove_file};

impl RunContext<'_> {
    async fn connect(&self, output: &StageOutput) -> OperationResult<Box<dyn Session>> {
        let password = output.require(Slot::RootPassword)?;
        Ok(self.database.connect(password).await?)
    }

    /// Run statements on a new connection and close it
    async fn execute_all(&self, output: &StageOutput, statements: &[&str]) -> OperationResult<()> {
        let mut session = self.connect(output).await?;

        for statement in statements {
            session.execute(statement).await?;
        }

        Ok(session.close().await?)
    }

    /// `'<user>'@'<peer>'`
    fn replication_account(&self, output: &StageOutput) -> OperationResult<String> {
        Ok(format!(
            "{}@{}",
            quote(output.require(Slot::ReplUsername)?),
            quote(&self.peer.to_string())
        ))
    }

    pub(super) async fn verify_connection(&self, output: &StageOutput) -> OperationResult<String> {
        self.connect(output).await?.close().await?;
        Ok(String::new())
    }

    pub(super) async fn reset_slave(
        &self,
        running: bool,
        output: &StageOutput,
    ) -> OperationResult<String> {
        if running {
            self.execute_all(output, &["STOP SLAVE", "RESET SLAVE"])
                .await?;
        } else {
            let master_info = self.datadir.join("master.info");

            if metadata(&master_info).await.is_ok() {
                debug!("Removing {}", master_info.display());
                remove_file(&master_info).await?;
            }
        }

        Ok(String::new())
    }

    pub(super) async fn lock_tables(&mut self, output: &StageOutput) -> OperationResult<String> {
        if self.locked.is_some() {
            return Err(OperationError::AlreadyLocked);
        }

        let mut session = self.connect(output).await?;
        session.execute("FLUSH TABLES WITH READ LOCK").await?;

        // The lock lasts as long as this connection
        self.locked = Some(session);

        Ok(String::new())
    }

    pub(super) async fn unlock_tables(&mut self) -> OperationResult<String> {
        let mut session = self.locked.take().ok_or(OperationError::NotLocked)?;

        session.execute("UNLOCK TABLES").await?;
        session.close().await?;

        Ok(String::new())
    }

    pub(super) async fn master_position(&self, output: &StageOutput) -> OperationResult<String> {
        let mut session = self.connect(output).await?;
        let position = session
            .master_status()
            .await?
            .ok_or(OperationError::BinaryLogDisabled)?;
        session.close().await?;

        Ok(position.to_string())
    }

    /// Replace the replication account of the slave, if any, with a fresh one
    pub(super) async fn create_replication_user(
        &self,
        output: &StageOutput,
    ) -> OperationResult<String> {
        let account = self.replication_account(output)?;
        let password = quote(output.require(Slot::ReplPassword)?);

        let drop_user = format!("DROP USER IF EXISTS {}", account);
        let create = format!("CREATE USER {} IDENTIFIED BY {}", account, password);
        let grant = format!("GRANT REPLICATION SLAVE ON *.* TO {}", account);

        self.execute_all(output, &[drop_user.as_str(), create.as_str(), grant.as_str()])
            .await?;

        Ok(String::new())
    }

    pub(super) async fn configure_slave(&self, output: &StageOutput) -> OperationResult<String> {
        let position = output.require(Slot::MasterInfo)?.parse::<BinlogPosition>()?;
        let host = self
            .master_host
            .as_deref()
            .ok_or(OperationError::NoMasterHost)?;

        let change_master = format!(
            "CHANGE MASTER TO MASTER_HOST={}, MASTER_USER={}, MASTER_PASSWORD={}, \
             MASTER_LOG_FILE={}, MASTER_LOG_POS={}",
            quote(host),
            quote(output.require(Slot::ReplUsername)?),
            quote(output.require(Slot::ReplPassword)?),
            quote(&position.file),
            position.offset
        );

        self.execute_all(output, &[change_master.as_str(), "START SLAVE"])
            .await?;

        Ok(String::new())
    }

    pub(super) async fn wait_for_catch_up(&self, output: &StageOutput) -> OperationResult<String> {
        let position = output.require(Slot::MasterInfo2)?.parse::<BinlogPosition>()?;
        let timeout = self.config.catch_up_timeout;

        info!("Waiting up to {}s for replication to reach {}", timeout, position);

        let mut session = self.connect(output).await?;
        let waited = session.master_pos_wait(&position, timeout).await?;
        session.close().await?;

        match waited {
            None => Err(OperationError::ReplicationFailedError),
            Some(waited) if waited < 0 => Err(OperationError::ReplicationCatchUpError(timeout)),
            Some(_) => Ok(String::new()),
        }
    }

    pub(super) async fn configure_slave_delay(
        &self,
        seconds: u32,
        output: &StageOutput,
    ) -> OperationResult<String> {
        let delay = format!("CHANGE MASTER TO MASTER_DELAY={}", seconds);

        self.execute_all(output, &["STOP SLAVE", delay.as_str(), "START SLAVE"])
            .await?;

        Ok(String::new())
    }
}
