use crate::core::Role;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Named result of a stage, readable by every later stage on both sides
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    RootPassword,
    ReplUsername,
    ReplPassword,
    SlaveDatadir,
    MasterInfo,
    MasterInfo2,
}

impl Slot {
    pub fn name(self) -> &'static str {
        match self {
            Slot::RootPassword => "root_password",
            Slot::ReplUsername => "repl_username",
            Slot::ReplPassword => "repl_password",
            Slot::SlaveDatadir => "slave_datadir",
            Slot::MasterInfo => "master_info",
            Slot::MasterInfo2 => "master_info2",
        }
    }

    /// Secret values are transmitted but never logged
    pub fn is_secret(self) -> bool {
        matches!(self, Slot::RootPassword | Slot::ReplPassword)
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

/// Directory a data sync reads from or writes to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// Master data directory
    Local,
    /// Master staging directory
    Staging,
    /// Slave data directory, reached over SSH
    Remote,
}

/// Everything a stage can do, with its fixed arguments
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    AskRootPassword,
    VerifyConnection,
    GenerateUsername,
    GeneratePassword,
    ExchangeDatadir,
    AskConfirmation,
    /// Reset replication state, either through the running server or by removing `master.info`
    ResetSlave { running: bool },
    /// Start or stop the MySQL service
    ControlService { start: bool },
    Sync { from: Endpoint, to: Endpoint },
    LockTables,
    CaptureMasterPosition,
    UnlockTables,
    StoreMasterInfo,
    LoadMasterInfo,
    CreateReplicationUser,
    ConfigureSlave,
    WaitForCatchUp,
    ConfigureSlaveDelay { seconds: u32 },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::AskRootPassword => "ask_rootpass",
            Operation::VerifyConnection => "verify_mysql_connect",
            Operation::GenerateUsername => "generate_username",
            Operation::GeneratePassword => "generate_password",
            Operation::ExchangeDatadir => "exchange_datadir",
            Operation::AskConfirmation => "ask_confirmation",
            Operation::ResetSlave { .. } => "reset_slave",
            Operation::ControlService { .. } => "startstop_mysqld",
            Operation::Sync { .. } => "rsync",
            Operation::LockTables => "lock_tables",
            Operation::CaptureMasterPosition => "get_master_pos",
            Operation::UnlockTables => "unlock_tables",
            Operation::StoreMasterInfo => "store_master_info",
            Operation::LoadMasterInfo => "load_master_info",
            Operation::CreateReplicationUser => "create_repl_user",
            Operation::ConfigureSlave => "configure_slave",
            Operation::WaitForCatchUp => "wait_for_catch_up",
            Operation::ConfigureSlaveDelay { .. } => "configure_slave_delay",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Operation::ResetSlave { running } => write!(
                f,
                "{} ({})",
                self.name(),
                if *running { "running" } else { "stopped" }
            ),
            Operation::ControlService { start } => {
                write!(f, "{} ({})", self.name(), if *start { "start" } else { "stop" })
            }
            Operation::Sync { from, to } => write!(f, "{} ({:?} -> {:?})", self.name(), from, to),
            Operation::ConfigureSlaveDelay { seconds } => write!(f, "{} ({}s)", self.name(), seconds),
            _ => f.write_str(self.name()),
        }
    }
}

/// Single step of the plan
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stage {
    /// The only side that runs this stage
    pub owner: Role,

    pub operation: Operation,

    /// Slot the stage result is stored in, on both sides
    pub slot: Option<Slot>,
}

impl Stage {
    pub fn new(owner: Role, operation: Operation) -> Self {
        Stage {
            owner,
            operation,
            slot: None,
        }
    }

    pub fn with_slot(owner: Role, operation: Operation, slot: Slot) -> Self {
        Stage {
            owner,
            operation,
            slot: Some(slot),
        }
    }
}
