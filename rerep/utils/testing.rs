use crate::{
    config::Config,
    node::{
        database::{
            error::{DatabaseError, DatabaseResult},
            Database, Session,
        },
        shell::Shell,
    },
};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use rerep_lib::core::BinlogPosition;
use std::{
    io::Result as IoResult,
    sync::{Arc, Mutex},
};

pub static CONFIG: Lazy<Config> = Lazy::new(Config::default);

/// Database that records everything done to it
///
/// Clones share the same log, so a test can keep one and hand the other to the code under test.
#[derive(Clone)]
pub struct FakeDatabase {
    log: Arc<Mutex<Vec<String>>>,
    status: Option<BinlogPosition>,
    wait: Option<i64>,
    refuse: bool,
}

impl Default for FakeDatabase {
    fn default() -> Self {
        FakeDatabase {
            log: Arc::default(),
            status: None,
            wait: Some(0),
            refuse: false,
        }
    }
}

impl FakeDatabase {
    pub fn with_status(mut self, position: BinlogPosition) -> Self {
        self.status = Some(position);
        self
    }

    pub fn with_wait(mut self, wait: Option<i64>) -> Self {
        self.wait = wait;
        self
    }

    pub fn refusing(mut self) -> Self {
        self.refuse = true;
        self
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl Database for FakeDatabase {
    async fn connect(&self, password: &str) -> DatabaseResult<Box<dyn Session>> {
        if self.refuse {
            return Err(DatabaseError::DatabaseConnectError(String::from(
                "Access denied for user 'root'@'localhost'",
            )));
        }

        self.log.lock().unwrap().push(format!("connect {}", password));

        Ok(Box::new(FakeSession {
            log: self.log.clone(),
            status: self.status.clone(),
            wait: self.wait,
        }))
    }
}

struct FakeSession {
    log: Arc<Mutex<Vec<String>>>,
    status: Option<BinlogPosition>,
    wait: Option<i64>,
}

impl FakeSession {
    fn push(&self, entry: String) {
        self.log.lock().unwrap().push(entry);
    }
}

#[async_trait]
impl Session for FakeSession {
    async fn execute(&mut self, statement: &str) -> DatabaseResult<()> {
        self.push(statement.to_owned());
        Ok(())
    }

    async fn master_status(&mut self) -> DatabaseResult<Option<BinlogPosition>> {
        self.push(String::from("SHOW MASTER STATUS"));
        Ok(self.status.clone())
    }

    async fn master_pos_wait(
        &mut self,
        position: &BinlogPosition,
        timeout: u64,
    ) -> DatabaseResult<Option<i64>> {
        self.push(format!("MASTER_POS_WAIT {} {}", position, timeout));
        Ok(self.wait)
    }

    async fn close(self: Box<Self>) -> DatabaseResult<()> {
        self.push(String::from("close"));
        Ok(())
    }
}

/// Shell with scripted answers that records the commands it was asked to run
#[derive(Clone)]
pub struct FakeShell {
    commands: Arc<Mutex<Vec<(String, Vec<String>)>>>,
    exit_code: Option<i32>,
    hostname: String,
    secret: String,
    confirmation: bool,
}

impl Default for FakeShell {
    fn default() -> Self {
        FakeShell {
            commands: Arc::default(),
            exit_code: Some(0),
            hostname: String::from("db2.example.com"),
            secret: String::from("hunter2"),
            confirmation: true,
        }
    }
}

impl FakeShell {
    pub fn with_exit_code(mut self, code: Option<i32>) -> Self {
        self.exit_code = code;
        self
    }

    pub fn with_hostname(mut self, hostname: &str) -> Self {
        self.hostname = hostname.to_owned();
        self
    }

    pub fn with_secret(mut self, secret: &str) -> Self {
        self.secret = secret.to_owned();
        self
    }

    pub fn with_confirmation(mut self, confirmation: bool) -> Self {
        self.confirmation = confirmation;
        self
    }

    pub fn commands(&self) -> Vec<(String, Vec<String>)> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl Shell for FakeShell {
    async fn run(&self, program: &str, args: &[String]) -> IoResult<Option<i32>> {
        self.commands
            .lock()
            .unwrap()
            .push((program.to_owned(), args.to_vec()));

        Ok(self.exit_code)
    }

    async fn hostname(&self) -> IoResult<String> {
        Ok(self.hostname.clone())
    }

    async fn read_secret(&self, _: &str) -> IoResult<String> {
        Ok(self.secret.clone())
    }

    async fn confirm(&self, _: &str) -> IoResult<bool> {
        Ok(self.confirmation)
    }
}
