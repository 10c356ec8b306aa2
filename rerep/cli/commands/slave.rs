use super::{check_datadir, check_root, flags::Flags, CommandError};
use crate::{
    cli::Server,
    node::{
        database::mysql::MysqlDatabase, operations::RunContext, run, shell::SystemShell,
        transport::connect, RunError,
    },
};
use nix::unistd::Uid;
use rerep_lib::core::Role;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt)]
pub struct SlaveCommand {
    /// Host running the master side
    master_host: String,

    /// MySQL data directory
    datadir: PathBuf,

    #[structopt(flatten)]
    flags: Flags,
}

impl SlaveCommand {
    pub async fn dispatch(&self, server: &Server) -> Result<(), CommandError> {
        check_root(Uid::effective())?;

        let config = server.config();
        let options = self.flags.combine(server.flags());
        options.validate(Role::Slave)?;

        let datadir = check_datadir(&self.datadir).await?;

        let (stream, peer) = connect(&self.master_host, config.port)
            .await
            .map_err(RunError::Transport)?;

        let mut context = RunContext::new(
            config,
            datadir,
            peer.ip(),
            Box::new(MysqlDatabase::new(config.database.clone())),
            Box::new(SystemShell),
        )
        .with_master_host(self.master_host.clone());

        run(Role::Slave, stream, &options, &mut context).await?;

        Ok(())
    }
}
