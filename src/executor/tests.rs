use std::io;
use crate::ast::Pipeline;
use crate::executor::{ExecError, ExecOutcome, ExecStatus, Executor};

/// Records every pipeline it is given instead of spawning anything.
///
/// `quit` yields `Exit(0)` and a program named `fail` yields `ExecFailed`,
/// so driver-loop behaviour can be tested without real processes.
pub struct MockExecutor {
    pub log: Vec<String>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self { log: Vec::new() }
    }
}

impl Executor for MockExecutor {
    fn exec(&mut self, pipeline: &Pipeline) -> ExecStatus {
        self.log.push(pipeline.to_string());
        let first = &pipeline.commands()[0];
        if pipeline.is_single() && first.is_quit() {
            return Ok(ExecOutcome::Exit(0));
        }
        if first.program() == "fail" {
            return Err(ExecError::ExecFailed {
                program: "fail".to_string(),
                source: io::Error::from_raw_os_error(libc::ENOENT),
            });
        }
        Ok(ExecOutcome::Code(0))
    }
}
