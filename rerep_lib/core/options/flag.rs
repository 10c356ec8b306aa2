use crate::core::Role;

/// Command line flag, as declared for both sides of the protocol
#[derive(Debug, PartialEq, Eq)]
pub struct Flag {
    /// Long flag name, also the key in the encoded options
    pub name: &'static str,

    /// The only side allowed to supply this flag
    pub owner: Role,
}

pub const SLAVE_IS_DOWN: Flag = Flag {
    name: "slave-is-down",
    owner: Role::Slave,
};

pub const SLAVE_DELAY: Flag = Flag {
    name: "slave-delay",
    owner: Role::Slave,
};

pub const USE_TMPDIR: Flag = Flag {
    name: "use-tmpdir",
    owner: Role::Master,
};

pub const REUSE_TMPDIR: Flag = Flag {
    name: "reuse-tmpdir",
    owner: Role::Master,
};

pub const NOCONFIRM: Flag = Flag {
    name: "noconfirm",
    owner: Role::Slave,
};
