//! # Stage plan
//!
//! Both sides of a run compute the plan from the same merged [`Options`], so they agree on it
//! without ever sending it. The position of a stage in the plan is what the completion markers
//! refer to, which means any divergence between the two plans shows up as a marker mismatch.
//!
//! ```text
//! master                          slave
//! ------                          -----
//! ask_rootpass
//! verify_mysql_connect
//!                                 verify_mysql_connect     (unless slave-is-down)
//!                                 generate_username
//!                                 generate_password
//!                                 exchange_datadir
//!                                 ask_confirmation         (unless noconfirm)
//! ask_confirmation                                         (unless noconfirm)
//!                                 reset_slave / stop
//! rsync, lock, get_master_pos,
//! rsync, unlock ...                                        (or load_master_info)
//! create_repl_user
//! get_master_pos
//! rsync staging -> remote                                  (staging only)
//!                                 start, configure_slave
//!                                 wait_for_catch_up
//!                                 configure_slave_delay    (slave-delay only)
//! ```

/// Stage descriptors
pub mod stage;

use crate::core::{
    options::{Options, Staging},
    Role::{self, Master, Slave},
};
use stage::{Endpoint, Operation, Slot};
use std::ops::Deref;

pub use stage::Stage;

/// Ordered, immutable list of stages
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan(Box<[Stage]>);

impl Plan {
    /// Number of stages run by `role`
    pub fn owned_by(&self, role: Role) -> usize {
        self.0.iter().filter(|stage| stage.owner == role).count()
    }
}

impl Deref for Plan {
    type Target = [Stage];

    fn deref(&self) -> &[Stage] {
        &self.0
    }
}

/// Build the stage plan for the merged options
pub fn plan(options: &Options) -> Plan {
    let mut stages = Vec::new();
    let confirm = !options.noconfirm;

    stages.push(Stage::with_slot(
        Master,
        Operation::AskRootPassword,
        Slot::RootPassword,
    ));
    stages.push(Stage::new(Master, Operation::VerifyConnection));

    if !options.slave_is_down {
        stages.push(Stage::new(Slave, Operation::VerifyConnection));
    }

    stages.push(Stage::with_slot(
        Slave,
        Operation::GenerateUsername,
        Slot::ReplUsername,
    ));
    stages.push(Stage::with_slot(
        Slave,
        Operation::GeneratePassword,
        Slot::ReplPassword,
    ));
    stages.push(Stage::with_slot(
        Slave,
        Operation::ExchangeDatadir,
        Slot::SlaveDatadir,
    ));

    if confirm {
        stages.push(Stage::new(Slave, Operation::AskConfirmation));
        stages.push(Stage::new(Master, Operation::AskConfirmation));
    }

    if options.slave_is_down {
        stages.push(Stage::new(Slave, Operation::ResetSlave { running: false }));
    } else {
        stages.push(Stage::new(Slave, Operation::ResetSlave { running: true }));
        stages.push(Stage::new(Slave, Operation::ControlService { start: false }));
    }

    let staging = options.staging();

    match staging {
        Staging::Direct | Staging::Fresh => {
            let sync = Operation::Sync {
                from: Endpoint::Local,
                to: if staging == Staging::Fresh {
                    Endpoint::Staging
                } else {
                    Endpoint::Remote
                },
            };

            stages.push(Stage::new(Master, sync.clone()));
            if confirm {
                stages.push(Stage::new(Master, Operation::AskConfirmation));
            }
            stages.push(Stage::new(Master, sync.clone()));
            stages.push(Stage::new(Master, Operation::LockTables));
            stages.push(Stage::with_slot(
                Master,
                Operation::CaptureMasterPosition,
                Slot::MasterInfo,
            ));
            stages.push(Stage::new(Master, sync));
            stages.push(Stage::new(Master, Operation::UnlockTables));
            if staging == Staging::Fresh {
                stages.push(Stage::new(Master, Operation::StoreMasterInfo));
            }
            if confirm {
                stages.push(Stage::new(Master, Operation::AskConfirmation));
            }
        }
        Staging::Reuse(_) => {
            stages.push(Stage::with_slot(
                Master,
                Operation::LoadMasterInfo,
                Slot::MasterInfo,
            ));
        }
    }

    // The second position is taken after the grant, so nothing written in between is lost
    stages.push(Stage::new(Master, Operation::CreateReplicationUser));
    stages.push(Stage::with_slot(
        Master,
        Operation::CaptureMasterPosition,
        Slot::MasterInfo2,
    ));

    if staging != Staging::Direct {
        stages.push(Stage::new(
            Master,
            Operation::Sync {
                from: Endpoint::Staging,
                to: Endpoint::Remote,
            },
        ));
    }

    stages.push(Stage::new(Slave, Operation::ControlService { start: true }));
    stages.push(Stage::new(Slave, Operation::ConfigureSlave));
    stages.push(Stage::new(Slave, Operation::WaitForCatchUp));

    if let Some(seconds) = options.delay() {
        stages.push(Stage::new(Slave, Operation::ConfigureSlaveDelay { seconds }));
    }

    Plan(stages.into_boxed_slice())
}
