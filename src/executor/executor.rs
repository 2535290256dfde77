use std::io;
use thiserror::Error;
use crate::ast::Pipeline;

/// What the driver loop should do after a line has been executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    /// Keep reading; carries the exit status of the sink stage.
    Code(i32),
    /// Stop the interpreter with this status.
    Exit(i32),
}

pub type ExecStatus = Result<ExecOutcome, ExecError>;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("Fork failed: {0}")]
    ForkFailed(#[source] io::Error),

    #[error("Pipe failed: {0}")]
    PipeFailed(#[source] io::Error),

    #[error("dup2 failed: {program}: {source}")]
    RedirectFailed {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Execvp failed: {program}: {source}")]
    ExecFailed {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Too many arguments: {count} given, at most {max} allowed")]
    TooManyArguments { count: usize, max: usize },

    #[error("Invalid argument: {0:?}")]
    InvalidArgument(String),

    #[error("Wait failed: {0}")]
    WaitFailed(#[source] io::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub trait Executor {
    fn exec(&mut self, pipeline: &Pipeline) -> ExecStatus;
}
