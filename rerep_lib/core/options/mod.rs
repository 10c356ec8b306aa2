/// Static flag declarations
pub mod flag;

use crate::core::Role;
use base64::{engine::general_purpose::STANDARD, DecodeError, Engine};
use flag::{Flag, NOCONFIRM, REUSE_TMPDIR, SLAVE_DELAY, SLAVE_IS_DOWN, USE_TMPDIR};
use serde::{Deserialize, Serialize};
use serde_json::Error as JsonError;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("{} can only be set on the {} side", .flags.join(", "), .owner)]
    MisplacedFlags {
        flags: Vec<&'static str>,
        owner: Role,
    },
    #[error("use-tmpdir and reuse-tmpdir can't be combined")]
    ConflictingStaging,
    #[error("Options payload is not valid base64: {0}")]
    Base64(#[from] DecodeError),
    #[error("Options payload is not valid JSON: {0}")]
    Json(#[from] JsonError),
}

pub type OptionsResult<T> = Result<T, OptionsError>;

/// Where the master copies its data directory to before the slave gets it
#[derive(Debug, PartialEq, Eq)]
pub enum Staging<'a> {
    /// Sync straight into the slave data directory
    Direct,
    /// Sync into a new local staging directory first
    Fresh,
    /// Use a staging directory filled by a previous run
    Reuse(&'a Path),
}

/// Protocol options
///
/// Each side builds one from its own command line, with the other side's flags left at default.
/// Both sides then merge their copy with the peer's one, which yields the same value everywhere.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Options {
    /// Slave MySQL server is already stopped
    #[serde(default)]
    pub slave_is_down: bool,

    /// Replication delay in seconds, applied once the slave caught up
    #[serde(default)]
    pub slave_delay: Option<u32>,

    /// Copy the data directory through a fresh local staging directory
    #[serde(default)]
    pub use_tmpdir: bool,

    /// Reuse a staging directory left by a previous run
    #[serde(default)]
    pub reuse_tmpdir: Option<PathBuf>,

    /// Skip operator confirmations
    #[serde(default)]
    pub noconfirm: bool,
}

impl Options {
    /// Flags that differ from their defaults
    pub fn supplied(&self) -> Vec<&'static Flag> {
        let mut supplied = Vec::new();

        if self.slave_is_down {
            supplied.push(&SLAVE_IS_DOWN);
        }

        if self.slave_delay.is_some() {
            supplied.push(&SLAVE_DELAY);
        }

        if self.use_tmpdir {
            supplied.push(&USE_TMPDIR);
        }

        if self.reuse_tmpdir.is_some() {
            supplied.push(&REUSE_TMPDIR);
        }

        if self.noconfirm {
            supplied.push(&NOCONFIRM);
        }

        supplied
    }

    /// Check that only flags owned by `role` were supplied
    pub fn validate(&self, role: Role) -> OptionsResult<()> {
        let misplaced = self
            .supplied()
            .into_iter()
            .filter(|flag| flag.owner != role)
            .map(|flag| flag.name)
            .collect::<Vec<_>>();

        if !misplaced.is_empty() {
            return Err(OptionsError::MisplacedFlags {
                flags: misplaced,
                owner: role.peer(),
            });
        }

        if self.use_tmpdir && self.reuse_tmpdir.is_some() {
            return Err(OptionsError::ConflictingStaging);
        }

        Ok(())
    }

    /// Take every flag from the side that owns it
    pub fn merge(master: &Options, slave: &Options) -> Options {
        Options {
            slave_is_down: slave.slave_is_down,
            slave_delay: slave.slave_delay,
            use_tmpdir: master.use_tmpdir,
            reuse_tmpdir: master.reuse_tmpdir.clone(),
            noconfirm: slave.noconfirm,
        }
    }

    /// Staging strategy. A reused directory wins over a fresh one.
    pub fn staging(&self) -> Staging<'_> {
        match (&self.reuse_tmpdir, self.use_tmpdir) {
            (Some(path), _) => Staging::Reuse(path),
            (None, true) => Staging::Fresh,
            (None, false) => Staging::Direct,
        }
    }

    /// Delay to configure on the slave, if any
    pub fn delay(&self) -> Option<u32> {
        self.slave_delay.filter(|delay| *delay > 0)
    }

    /// Encode into a single line: JSON, then base64
    pub fn encode(&self) -> OptionsResult<String> {
        Ok(STANDARD.encode(serde_json::to_vec(self)?))
    }

    /// Decode a line produced by [`Options::encode`]
    pub fn decode(line: &str) -> OptionsResult<Options> {
        let json = STANDARD.decode(line.trim())?;
        Ok(serde_json::from_slice(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{Options, OptionsError, Staging};
    use crate::core::Role;
    use serde_json::Value;
    use std::path::{Path, PathBuf};

    fn master_options() -> Options {
        Options {
            use_tmpdir: true,
            ..Default::default()
        }
    }

    fn slave_options() -> Options {
        Options {
            slave_is_down: true,
            slave_delay: Some(3600),
            noconfirm: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_encode_decode() {
        for options in [
            Options::default(),
            master_options(),
            slave_options(),
            Options {
                reuse_tmpdir: Some(PathBuf::from("/tmp/rerep-1234")),
                ..Default::default()
            },
        ]
        .iter()
        {
            let line = options.encode().unwrap();
            assert!(!line.contains('\n'));
            assert_eq!(&Options::decode(&line).unwrap(), options);
        }
    }

    #[test]
    fn test_decode_invalid_base64() {
        assert!(matches!(
            Options::decode("not base64!").unwrap_err(),
            OptionsError::Base64(_)
        ));
    }

    #[test]
    fn test_decode_invalid_json() {
        // "[1, 2"
        assert!(matches!(
            Options::decode("WzEsIDI=").unwrap_err(),
            OptionsError::Json(_)
        ));
    }

    #[test]
    fn test_decode_unknown_flag() {
        // {"slave-is-down":true,"fast":true}
        assert!(matches!(
            Options::decode("eyJzbGF2ZS1pcy1kb3duIjp0cnVlLCJmYXN0Ijp0cnVlfQ==").unwrap_err(),
            OptionsError::Json(_)
        ));
    }

    #[test]
    fn test_decode_missing_fields() {
        // {"noconfirm":true}
        let options = Options::decode("eyJub2NvbmZpcm0iOnRydWV9").unwrap();
        assert_eq!(
            options,
            Options {
                noconfirm: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_flag_names_are_wire_keys() {
        let options = Options {
            slave_is_down: true,
            slave_delay: Some(60),
            use_tmpdir: true,
            reuse_tmpdir: Some(PathBuf::from("/tmp/rerep-42")),
            noconfirm: true,
        };

        let mut names = options
            .supplied()
            .iter()
            .map(|flag| flag.name.to_owned())
            .collect::<Vec<_>>();
        names.sort();

        let mut keys = match serde_json::to_value(&options).unwrap() {
            Value::Object(map) => map.keys().cloned().collect::<Vec<_>>(),
            other => panic!("Options encoded as {}", other),
        };
        keys.sort();

        assert_eq!(names, keys);
        assert!(Options::default().supplied().is_empty());
    }

    #[test]
    fn test_validate() {
        master_options().validate(Role::Master).unwrap();
        slave_options().validate(Role::Slave).unwrap();
        Options::default().validate(Role::Master).unwrap();
        Options::default().validate(Role::Slave).unwrap();
    }

    #[test]
    fn test_validate_misplaced() {
        match slave_options().validate(Role::Master).unwrap_err() {
            OptionsError::MisplacedFlags { flags, owner } => {
                assert_eq!(flags, vec!["slave-is-down", "slave-delay", "noconfirm"]);
                assert_eq!(owner, Role::Slave);
            }
            e => panic!("Unexpected error: {}", e),
        }

        let error = master_options().validate(Role::Slave).unwrap_err();
        assert_eq!(
            error.to_string(),
            "use-tmpdir can only be set on the master side"
        );
    }

    #[test]
    fn test_validate_conflicting_staging() {
        let options = Options {
            use_tmpdir: true,
            reuse_tmpdir: Some(PathBuf::from("/tmp/x")),
            ..Default::default()
        };

        assert!(matches!(
            options.validate(Role::Master).unwrap_err(),
            OptionsError::ConflictingStaging
        ));
    }

    #[test]
    fn test_merge_is_symmetric() {
        let master = master_options();
        let slave = slave_options();

        // Master merges its own options with decoded slave ones and vice versa
        let on_master = Options::merge(&master, &Options::decode(&slave.encode().unwrap()).unwrap());
        let on_slave = Options::merge(&Options::decode(&master.encode().unwrap()).unwrap(), &slave);

        assert_eq!(on_master, on_slave);
        assert!(on_master.use_tmpdir);
        assert!(on_master.slave_is_down);
        assert_eq!(on_master.slave_delay, Some(3600));
    }

    #[test]
    fn test_merge_ignores_foreign_flags() {
        let master = Options {
            noconfirm: true,
            ..master_options()
        };
        let slave = Options {
            use_tmpdir: true,
            ..slave_options()
        };

        let merged = Options::merge(&master, &Options::default());
        assert!(!merged.noconfirm);

        let merged = Options::merge(&Options::default(), &slave);
        assert!(!merged.use_tmpdir);
        assert!(merged.noconfirm);
    }

    #[test]
    fn test_staging() {
        assert_eq!(Options::default().staging(), Staging::Direct);
        assert_eq!(master_options().staging(), Staging::Fresh);

        let options = Options {
            use_tmpdir: true,
            reuse_tmpdir: Some(PathBuf::from("/tmp/x")),
            ..Default::default()
        };
        assert_eq!(options.staging(), Staging::Reuse(Path::new("/tmp/x")));
    }

    #[test]
    fn test_delay() {
        assert_eq!(slave_options().delay(), Some(3600));
        assert_eq!(
            Options {
                slave_delay: Some(0),
                ..Default::default()
            }
            .delay(),
            None
        );
    }
}
