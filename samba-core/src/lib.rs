mod config;
pub mod error;
pub mod message;
pub mod model;
pub mod service;
#[cfg(test)]
mod test_support;

use std::{fs, path::Path};

use anyhow::Context;
use config::Root;

pub use error::{ActionError, DispatchError, ExecuteError, ParseError, RunnerError};
pub use message::ExecutionMessage;
pub use model::{BuildGraph, CompileConfig, Settings, Target, TargetState};
pub use service::{
    executor::Executor,
    runner::{DryRun, Runner, Shell, Spawn},
};

/// Default build-description file name.
pub const BUILD_FILE: &str = "build.samba";

/// Default settings file name, looked up in the working directory.
pub const SETTINGS_FILE: &str = "samba.yaml";

/// Reads and parses a build-description file.
pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<BuildGraph> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to open build file '{}'", path.display()))?;
    let graph = text
        .parse::<BuildGraph>()
        .with_context(|| format!("Failed to parse build file '{}'", path.display()))?;

    Ok(graph)
}

/// Reads a YAML settings file.
pub fn load_settings<P: AsRef<Path>>(path: P) -> anyhow::Result<Settings> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to open settings file '{}'", path.display()))?;
    let config = serde_norway::from_str::<Root>(&text)
        .with_context(|| format!("Failed to parse settings file '{}'", path.display()))?;

    Ok(config.into())
}
