/// Protocol roles
pub mod role;

/// Flag table and negotiated options
pub mod options;

/// Binary log coordinates
pub mod position;

/// Stage planner
pub mod plan;

pub use options::Options;
pub use plan::{plan, Plan, Stage};
pub use position::BinlogPosition;
pub use role::Role;
