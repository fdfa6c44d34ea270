use std::{fs, path::Path, thread};

use log::{error, info};

use crate::{
    error::ActionError,
    model::CompileConfig,
    service::runner::{Runner, Spawn, shell_quote},
};

#[derive(Debug, Clone, PartialEq)]
pub struct CompileJob {
    pub source: String,
    pub output: String,
    pub shared: bool,
}

impl CompileJob {
    pub fn new(source: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
            shared: false,
        }
    }

    /// Output named after the source's file stem (`src/app.c` -> `app`).
    pub fn from_source(source: &str) -> Self {
        let output = Path::new(source)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(source);
        Self::new(source, output)
    }

    pub fn shared(mut self) -> Self {
        self.shared = true;
        self
    }

    pub fn output_path(&self, config: &CompileConfig) -> String {
        match &config.build_directory {
            Some(directory) => Path::new(directory)
                .join(&self.output)
                .to_string_lossy()
                .into_owned(),
            None => self.output.clone(),
        }
    }

    pub fn command(&self, config: &CompileConfig) -> Runner {
        let defines = config
            .variables
            .iter()
            .map(|(name, value)| format!("-D{name}={}", shell_quote(value)));

        let mut runner = Runner::new();
        runner
            .append([&config.compiler])
            .append(defines)
            .append(prefixed("-I", &config.includes))
            .append(prefixed("-L", &config.library_paths))
            .append(prefixed("-l", &config.libraries))
            .append(&config.flags);
        if self.shared {
            runner.append(["-shared"]);
        }
        runner.append([
            "-o".to_owned(),
            self.output_path(config),
            self.source.clone(),
        ]);
        runner
    }
}

fn prefixed<'a>(prefix: &'a str, values: &'a [String]) -> impl Iterator<Item = String> + 'a {
    values.iter().map(move |value| format!("{prefix}{value}"))
}

/// Compiles one job synchronously. A non-zero compiler exit is an error.
pub fn compile(
    config: &CompileConfig,
    job: &CompileJob,
    spawner: &dyn Spawn,
    dry_run: bool,
) -> Result<(), ActionError> {
    if !dry_run {
        if let Some(directory) = &config.build_directory {
            fs::create_dir_all(directory)?;
        }
    }

    let runner = job.command(config);
    let code = runner.run_sync(spawner)?;
    if code != 0 {
        return Err(ActionError::CommandFailed {
            command: runner.command_line(),
            code,
        });
    }

    if !dry_run {
        info!("Compilation successful: {}", job.output_path(config));
    }
    Ok(())
}

/// Compiles every job on its own thread and waits for all of them.
///
/// Each worker owns a copy of the configuration. Failures are logged per job
/// and not collected.
pub fn compile_parallel(
    config: &CompileConfig,
    jobs: &[CompileJob],
    spawner: &dyn Spawn,
    dry_run: bool,
) {
    thread::scope(|scope| {
        for job in jobs {
            let config = config.clone();
            let job = job.clone();
            scope.spawn(move || {
                if let Err(err) = compile(&config, &job, spawner, dry_run) {
                    error!("Compilation of {} failed: {err}", job.source);
                }
            });
        }
    });
}
