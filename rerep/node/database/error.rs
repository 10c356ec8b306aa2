use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Unable to connect to MySQL: {0}")]
    DatabaseConnectError(String),
    #[error("MySQL query failed: {0}")]
    DatabaseQueryError(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
