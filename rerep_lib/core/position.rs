use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Malformed binlog position: {0:?}")]
pub struct PositionError(pub String);

/// Point in the master binary log, transmitted as `"<file> <offset>"`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinlogPosition {
    pub file: String,
    pub offset: u64,
}

impl BinlogPosition {
    pub fn new<F>(file: F, offset: u64) -> Self
    where
        F: Into<String>,
    {
        BinlogPosition {
            file: file.into(),
            offset,
        }
    }
}

impl Display for BinlogPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {}", self.file, self.offset)
    }
}

impl FromStr for BinlogPosition {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split(' ');

        match (parts.next(), parts.next(), parts.next()) {
            (Some(file), Some(offset), None) if !file.is_empty() => offset
                .parse()
                .map(|offset| BinlogPosition::new(file, offset))
                .map_err(|_| PositionError(s.to_owned())),
            _ => Err(PositionError(s.to_owned())),
        }
    }
}
