use rerep_lib::core::Options;
use std::path::PathBuf;
use structopt::StructOpt;

/// Protocol flags
///
/// Accepted both before the subcommand and by either subcommand, so that a flag given
/// to the wrong side is reported by the ownership check instead of the argument parser.
#[derive(StructOpt, Default)]
pub struct Flags {
    /// [slave] MySQL on the slave is already stopped
    #[structopt(long)]
    slave_is_down: bool,

    /// [slave] Replication delay in seconds
    #[structopt(long)]
    slave_delay: Option<u32>,

    /// [master] Copy data through a fresh local staging directory
    #[structopt(long)]
    use_tmpdir: bool,

    /// [master] Reuse the staging directory of a previous run
    #[structopt(long)]
    reuse_tmpdir: Option<PathBuf>,

    /// [slave] Don't ask for confirmations
    #[structopt(long)]
    noconfirm: bool,
}

impl Flags {
    /// Combine flags given after the subcommand with the ones given before it.
    /// Values after the subcommand win.
    pub fn combine(&self, global: &Flags) -> Options {
        Options {
            slave_is_down: self.slave_is_down || global.slave_is_down,
            slave_delay: self.slave_delay.or(global.slave_delay),
            use_tmpdir: self.use_tmpdir || global.use_tmpdir,
            reuse_tmpdir: self
                .reuse_tmpdir
                .as_ref()
                .or_else(|| global.reuse_tmpdir.as_ref())
                .cloned(),
            noconfirm: self.noconfirm || global.noconfirm,
        }
    }
}
