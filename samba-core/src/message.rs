use std::fmt;

use log::Level;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionMessage {
    TargetStarted {
        target: String,
    },
    TargetFinished {
        target: String,
    },
    CommandDispatched {
        command: String,
        wait: bool,
    },
    ActionSkipped {
        target: String,
        action: String,
        reason: String,
    },
    ActionFailed {
        target: String,
        action: String,
        reason: String,
    },
    Output {
        text: String,
    },
}

impl ExecutionMessage {
    pub fn level(&self) -> Level {
        match self {
            ExecutionMessage::TargetStarted { .. } | ExecutionMessage::TargetFinished { .. } => {
                Level::Debug
            }
            ExecutionMessage::CommandDispatched { .. } | ExecutionMessage::Output { .. } => {
                Level::Trace
            }
            ExecutionMessage::ActionSkipped { .. } | ExecutionMessage::ActionFailed { .. } => {
                Level::Error
            }
        }
    }
}

impl fmt::Display for ExecutionMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMessage::TargetStarted { target } => write!(f, "Executing target: {target}"),
            ExecutionMessage::TargetFinished { target } => write!(f, "Finished target: {target}"),
            ExecutionMessage::CommandDispatched { command, wait } => {
                let mode = if *wait { "sync" } else { "async" };
                write!(f, "Dispatching ({mode}): {command}")
            }
            ExecutionMessage::ActionSkipped {
                target,
                action,
                reason,
            } => write!(f, "[{target}] skipping `{action}`: {reason}"),
            ExecutionMessage::ActionFailed {
                target,
                action,
                reason,
            } => write!(f, "[{target}] `{action}` failed: {reason}"),
            ExecutionMessage::Output { text } => write!(f, "Output: {text}"),
        }
    }
}
