use std::{io::Write, path::Path};

use itertools::Itertools;
use log::log;

use crate::{
    error::{ActionError, ExecuteError},
    message::ExecutionMessage,
    model::{ActionCall, BuildGraph, CompileConfig, TargetState},
    service::{
        compile::{CompileJob, compile, compile_parallel},
        dispatch::{self, Builtin},
        runner::{DryRun, Runner, Spawn},
    },
};

/// Runs targets of a [`BuildGraph`] and their dependencies, depth first.
///
/// Each target runs at most once per executor. Reaching a target that is
/// still running is reported as a dependency cycle.
pub struct Executor<'a> {
    graph: BuildGraph,
    config: CompileConfig,
    spawner: &'a dyn Spawn,
    output: &'a mut dyn Write,
    dry_run: bool,
    visiting: Vec<String>,
    messages: Vec<ExecutionMessage>,
}

impl<'a> Executor<'a> {
    /// `output` receives build output such as `printfn` lines; diagnostics go
    /// through the logger.
    pub fn new(graph: BuildGraph, spawner: &'a dyn Spawn, output: &'a mut dyn Write) -> Self {
        Self {
            graph,
            config: CompileConfig::default(),
            spawner,
            output,
            dry_run: false,
            visiting: Vec::new(),
            messages: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: CompileConfig) -> Self {
        self.config = config;
        self
    }

    /// In dry-run mode every command is logged but no process is created.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn graph(&self) -> &BuildGraph {
        &self.graph
    }

    pub fn config(&self) -> &CompileConfig {
        &self.config
    }

    pub fn messages(&self) -> &[ExecutionMessage] {
        &self.messages
    }

    /// Executes the requested targets in order, or the graph's default target
    /// when none are given. Stops at the first failure.
    pub fn run(&mut self, requested: &[String]) -> Result<(), ExecuteError> {
        if requested.is_empty() {
            let default = self.graph.default_target.clone();
            return self.execute(&default);
        }

        for name in requested {
            self.execute(name)?;
        }
        Ok(())
    }

    pub fn execute(&mut self, name: &str) -> Result<(), ExecuteError> {
        let target = self
            .graph
            .targets
            .get_mut(name)
            .ok_or_else(|| ExecuteError::TargetNotFound(name.to_owned()))?;

        match target.state {
            TargetState::Done => return Ok(()),
            TargetState::Running => {
                let start = self
                    .visiting
                    .iter()
                    .position(|visiting| visiting == name)
                    .unwrap_or_default();
                let mut path = self.visiting[start..].to_vec();
                path.push(name.to_owned());
                return Err(ExecuteError::Cycle { path });
            }
            TargetState::Pending => target.state = TargetState::Running,
        }

        let dependencies = target.dependencies.clone();
        let actions = target.actions.clone();

        self.visiting.push(name.to_owned());
        let result = self.execute_running(name, &dependencies, &actions);
        self.visiting.pop();

        if let Some(target) = self.graph.targets.get_mut(name) {
            target.state = if result.is_ok() {
                TargetState::Done
            } else {
                TargetState::Pending
            };
        }
        result
    }

    fn execute_running(
        &mut self,
        name: &str,
        dependencies: &[String],
        actions: &[String],
    ) -> Result<(), ExecuteError> {
        for dependency in dependencies {
            self.execute(dependency)
                .map_err(|source| ExecuteError::DependencyFailed {
                    target: name.to_owned(),
                    dependency: dependency.clone(),
                    source: Box::new(source),
                })?;
        }

        self.record(ExecutionMessage::TargetStarted {
            target: name.to_owned(),
        });

        for action in actions {
            let Err(err) = self.run_action(action) else {
                continue;
            };

            if err.is_fatal() {
                self.record(ExecutionMessage::ActionFailed {
                    target: name.to_owned(),
                    action: action.clone(),
                    reason: err.to_string(),
                });
                return Err(ExecuteError::ActionFailed {
                    target: name.to_owned(),
                    source: err,
                });
            }

            self.record(ExecutionMessage::ActionSkipped {
                target: name.to_owned(),
                action: action.clone(),
                reason: err.to_string(),
            });
        }

        self.record(ExecutionMessage::TargetFinished {
            target: name.to_owned(),
        });
        Ok(())
    }

    fn run_action(&mut self, action: &str) -> Result<(), ActionError> {
        let call = action.parse::<ActionCall>()?;
        let (builtin, arguments) = dispatch::resolve(&call)?;

        // arity was checked by `resolve`, so indexing below cannot go out of bounds
        match builtin {
            Builtin::Execute => {
                let mut runner = Runner::new();
                runner.append(&arguments);
                self.dispatched(runner.command_line(), false);
                runner.run_async(self.spawner())?;
            }
            Builtin::ExecuteSync => {
                let mut runner = Runner::new();
                runner.append(&arguments);
                let command = runner.command_line();
                self.dispatched(command.clone(), true);
                let code = runner.run_sync(self.spawner())?;
                if code != 0 {
                    return Err(ActionError::CommandFailed { command, code });
                }
            }
            Builtin::Printfn => {
                let text = printf(&arguments[0], &arguments[1..]);
                writeln!(self.output, "{text}")?;
                self.record(ExecutionMessage::Output { text });
            }
            Builtin::RequireFile => {
                if !Path::new(&arguments[0]).exists() {
                    return Err(ActionError::MissingFile(arguments[0].clone()));
                }
            }
            Builtin::DefineVariable => self.config.define_variable(&arguments[0], &arguments[1]),
            Builtin::DefineLibrary => self.config.define_library(&arguments[0]),
            Builtin::DefineInclude => self.config.define_include(&arguments[0]),
            Builtin::DefineLibraryPath => self.config.define_library_path(&arguments[0]),
            Builtin::AddFlag => self.config.add_flag(&arguments[0]),
            Builtin::RemoveLibrary => self.config.remove_library(&arguments[0]),
            Builtin::RemoveInclude => self.config.remove_include(&arguments[0]),
            Builtin::RemoveLibraryPath => self.config.remove_library_path(&arguments[0]),
            Builtin::SetCompiler => self.config.compiler = arguments[0].clone(),
            Builtin::SetBuildDirectory => {
                self.config.build_directory =
                    Some(arguments[0].clone()).filter(|directory| !directory.is_empty());
            }
            Builtin::Compile | Builtin::CompileShared => {
                let mut job = CompileJob::new(&arguments[0], &arguments[1]);
                if builtin == Builtin::CompileShared {
                    job = job.shared();
                }
                self.dispatched(job.command(&self.config).command_line(), true);
                compile(&self.config, &job, self.spawner(), self.dry_run)?;
            }
            Builtin::CompileParallel => {
                let jobs = arguments
                    .iter()
                    .map(|source| CompileJob::from_source(source))
                    .collect_vec();
                for job in &jobs {
                    self.dispatched(job.command(&self.config).command_line(), true);
                }
                compile_parallel(&self.config, &jobs, self.spawner(), self.dry_run);
            }
        }

        Ok(())
    }

    fn spawner(&self) -> &'a dyn Spawn {
        if self.dry_run { &DryRun } else { self.spawner }
    }

    fn dispatched(&mut self, command: String, wait: bool) {
        self.record(ExecutionMessage::CommandDispatched { command, wait });
    }

    fn record(&mut self, message: ExecutionMessage) {
        log!(message.level(), "{message}");
        self.messages.push(message);
    }
}

/// Substitutes each `%s` in `format` with the next argument; `%%` is a
/// literal percent sign. Other sequences are copied as they are.
fn printf(format: &str, arguments: &[String]) -> String {
    let mut rendered = String::with_capacity(format.len());
    let mut arguments = arguments.iter();
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            rendered.push(c);
            continue;
        }
        match chars.peek() {
            Some('s') => {
                chars.next();
                if let Some(argument) = arguments.next() {
                    rendered.push_str(argument);
                }
            }
            Some('%') => {
                chars.next();
                rendered.push('%');
            }
            _ => rendered.push('%'),
        }
    }

    rendered
}
