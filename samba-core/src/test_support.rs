//! Test-only spawn backend that records command lines instead of running them.

use std::sync::Mutex;

use crate::{error::RunnerError, service::runner::Spawn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spawned {
    pub command: String,
    pub wait: bool,
}

#[derive(Debug, Default)]
pub struct Recorder {
    exit_code: i32,
    spawned: Mutex<Vec<Spawned>>,
}

impl Recorder {
    /// A recorder whose synchronous runs all exit with `exit_code`.
    pub fn exiting_with(exit_code: i32) -> Self {
        Self {
            exit_code,
            spawned: Mutex::new(Vec::new()),
        }
    }

    pub fn spawned(&self) -> Vec<Spawned> {
        self.spawned.lock().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.spawned()
            .into_iter()
            .map(|spawned| spawned.command)
            .collect()
    }

    fn push(&self, command: &str, wait: bool) {
        self.spawned.lock().unwrap().push(Spawned {
            command: command.to_owned(),
            wait,
        });
    }
}

impl Spawn for Recorder {
    fn run(&self, command_line: &str) -> Result<i32, RunnerError> {
        self.push(command_line, true);
        Ok(self.exit_code)
    }

    fn detach(&self, command_line: &str) -> Result<(), RunnerError> {
        self.push(command_line, false);
        Ok(())
    }
}
