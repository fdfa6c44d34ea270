use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Duplicate target: {0}")]
    DuplicateTarget(String),

    #[error("Target declaration without a name on line {line}")]
    EmptyTargetName { line: usize },

    #[error("Invalid call format, expected `name(args)`: {0}")]
    MissingOpenParen(String),

    #[error("Missing closing parenthesis for function: {0}")]
    UnterminatedCall(String),

    #[error("Missing function name in call: {0}")]
    EmptyFunctionName(String),

    #[error("Unknown directive `{0}`")]
    UnknownDirective(String),

    #[error("Directive `{name}` expects {expected} argument(s), got {found}")]
    DirectiveArity {
        name: String,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Function `{name}` expects {expected} argument(s), got {found}")]
    Arity {
        name: String,
        expected: String,
        found: usize,
    },

    #[error("Variadic argument expansion (`...`) is not supported in `{0}`")]
    UnsupportedVariadic(String),
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Refusing to run an empty command")]
    EmptyCommand,

    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{0}` was terminated by a signal")]
    Terminated(String),
}

/// Failure of a single action line.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Runner(#[from] RunnerError),

    #[error("Command failed with exit code {code}: {command}")]
    CommandFailed { command: String, code: i32 },

    #[error("Required file not found: {0}")]
    MissingFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ActionError {
    /// Parse and dispatch problems are reported and skipped; everything else
    /// fails the enclosing target.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ActionError::Parse(_) | ActionError::Dispatch(_))
    }
}

#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("Target not found: {0}")]
    TargetNotFound(String),

    #[error("Dependency cycle detected: {}", path.join(" -> "))]
    Cycle { path: Vec<String> },

    #[error("Failed to execute dependency `{dependency}` of `{target}`")]
    DependencyFailed {
        target: String,
        dependency: String,
        #[source]
        source: Box<ExecuteError>,
    },

    #[error("Target `{target}` failed")]
    ActionFailed {
        target: String,
        #[source]
        source: ActionError,
    },
}
