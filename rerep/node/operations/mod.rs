/// Operation error
pub mod error;

/// Replication user name and password
pub mod identity;

/// Statements run against the local MySQL server
mod replication;

/// Staging directory position file
pub mod staging;

/// Data directory sync
pub mod sync;

use super::{
    database::{Database, Session},
    executor::{output::StageOutput, StageRunner},
    shell::Shell,
};
use crate::config::Config;
use async_trait::async_trait;
use error::{OperationError, OperationResult};
use rerep_lib::core::plan::stage::{Endpoint, Operation, Slot};
use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

/// Everything the local side needs to run its stages
pub struct RunContext<'c> {
    config: &'c Config,

    /// Local MySQL data directory
    datadir: PathBuf,

    /// Address of the other side
    peer: IpAddr,

    /// Master host, as given on the slave command line
    master_host: Option<String>,

    /// Staging directory on the master
    staging: Option<PathBuf>,

    database: Box<dyn Database>,

    shell: Box<dyn Shell>,

    /// Connection holding the global read lock
    locked: Option<Box<dyn Session>>,
}

impl<'c> RunContext<'c> {
    pub fn new(
        config: &'c Config,
        datadir: PathBuf,
        peer: IpAddr,
        database: Box<dyn Database>,
        shell: Box<dyn Shell>,
    ) -> Self {
        RunContext {
            config,
            datadir,
            peer,
            master_host: None,
            staging: None,
            database,
            shell,
            locked: None,
        }
    }

    pub fn with_master_host(mut self, host: String) -> Self {
        self.master_host = Some(host);
        self
    }

    pub fn with_staging(mut self, staging: PathBuf) -> Self {
        self.staging = Some(staging);
        self
    }

    pub fn peer(&self) -> IpAddr {
        self.peer
    }

    fn staging(&self) -> OperationResult<&Path> {
        self.staging.as_deref().ok_or(OperationError::NoStaging)
    }

    async fn confirm(&self) -> OperationResult<String> {
        let confirmed = self
            .shell
            .confirm("Are you sure you want to continue?")
            .await
            .map_err(OperationError::Prompt)?;

        if confirmed {
            Ok(String::new())
        } else {
            Err(OperationError::Aborted)
        }
    }

    async fn control_service(&self, start: bool) -> OperationResult<String> {
        let action = if start { "start" } else { "stop" };
        let args = [self.config.service.name.clone(), action.to_owned()];

        match self
            .shell
            .run("service", &args)
            .await
            .map_err(|source| OperationError::Spawn {
                program: String::from("service"),
                source,
            })? {
            Some(0) => Ok(String::new()),
            code => Err(OperationError::ServiceControlError(code)),
        }
    }

    async fn sync(
        &self,
        from: Endpoint,
        to: Endpoint,
        output: &StageOutput,
    ) -> OperationResult<String> {
        let source = match from {
            Endpoint::Local => self.datadir.as_path(),
            Endpoint::Staging => self.staging()?,
            Endpoint::Remote => return Err(OperationError::RemoteSource),
        };

        let destination = match to {
            Endpoint::Local => self.datadir.display().to_string(),
            Endpoint::Staging => self.staging()?.display().to_string(),
            Endpoint::Remote => format!(
                "{}@{}:{}",
                self.config.sync.remote_user,
                self.peer,
                output.require(Slot::SlaveDatadir)?
            ),
        };

        let excludes = sync::excludes(source).await?;
        let args = sync::rsync_arguments(source, &destination, &excludes);
        let program = &self.config.sync.program;

        match self
            .shell
            .run(program, &args)
            .await
            .map_err(|e| OperationError::Spawn {
                program: program.clone(),
                source: e,
            })? {
            Some(0) => Ok(String::new()),
            code => Err(OperationError::SyncFailedError(code)),
        }
    }
}

#[async_trait(?Send)]
impl<'c> StageRunner for RunContext<'c> {
    async fn run(&mut self, operation: &Operation, output: &StageOutput) -> OperationResult<String> {
        match operation {
            Operation::AskRootPassword => self
                .shell
                .read_secret("MySQL root password")
                .await
                .map_err(OperationError::Prompt),
            Operation::VerifyConnection => self.verify_connection(output).await,
            Operation::GenerateUsername => identity::username(&*self.shell).await,
            Operation::GeneratePassword => Ok(identity::password()),
            Operation::ExchangeDatadir => Ok(self.datadir.display().to_string()),
            Operation::AskConfirmation => self.confirm().await,
            Operation::ResetSlave { running } => self.reset_slave(*running, output).await,
            Operation::ControlService { start } => self.control_service(*start).await,
            Operation::Sync { from, to } => self.sync(*from, *to, output).await,
            Operation::LockTables => self.lock_tables(output).await,
            Operation::CaptureMasterPosition => self.master_position(output).await,
            Operation::UnlockTables => self.unlock_tables().await,
            Operation::StoreMasterInfo => {
                staging::store(self.staging()?, output.require(Slot::MasterInfo)?).await?;
                Ok(String::new())
            }
            Operation::LoadMasterInfo => staging::load(self.staging()?).await,
            Operation::CreateReplicationUser => self.create_replication_user(output).await,
            Operation::ConfigureSlave => self.configure_slave(output).await,
            Operation::WaitForCatchUp => self.wait_for_catch_up(output).await,
            Operation::ConfigureSlaveDelay { seconds } => {
                self.configure_slave_delay(*seconds, output).await
            }
        }
    }
}
