use super::{check_datadir, check_root, flags::Flags, CommandError};
use crate::{
    cli::Server,
    node::{
        database::mysql::MysqlDatabase, operations::RunContext, run, shell::SystemShell,
        transport::listen, RunError,
    },
};
use nix::unistd::Uid;
use rerep_lib::core::{options::Staging, Role};
use std::{env::temp_dir, path::PathBuf, process};
use structopt::StructOpt;

#[derive(StructOpt)]
pub struct MasterCommand {
    /// MySQL data directory
    datadir: PathBuf,

    #[structopt(flatten)]
    flags: Flags,
}

impl MasterCommand {
    pub async fn dispatch(&self, server: &Server) -> Result<(), CommandError> {
        check_root(Uid::effective())?;

        let config = server.config();
        let options = self.flags.combine(server.flags());
        options.validate(Role::Master)?;

        let datadir = check_datadir(&self.datadir).await?;

        let staging = match options.staging() {
            Staging::Direct => None,
            Staging::Fresh => Some(temp_dir().join(format!("rerep-{}", process::id()))),
            Staging::Reuse(path) => Some(path.to_path_buf()),
        };

        let (stream, peer) = listen(config.port).await.map_err(RunError::Transport)?;

        let mut context = RunContext::new(
            config,
            datadir,
            peer.ip(),
            Box::new(MysqlDatabase::new(config.database.clone())),
            Box::new(SystemShell),
        );

        if let Some(staging) = staging.as_ref() {
            debug!("Staging directory: {}", staging.display());
            context = context.with_staging(staging.clone());
        }

        run(Role::Master, stream, &options, &mut context).await?;

        if let Some(staging) = staging {
            warn!(
                "Don't forget to remove the staging directory manually: {}",
                staging.display()
            );
        }

        Ok(())
    }
}
