use crate::ast::Pipeline;
use super::argv::MAX_ARGS;
use super::command::CommandExecutor;
use super::executor::{ExecStatus, Executor};
use super::pipeline::PipelineExecutor;
use super::process::PipelineIo;

/// Sends single commands to [`CommandExecutor`] and everything longer to
/// [`PipelineExecutor`], using the interpreter's own standard streams.
pub struct DefaultExecutor {
    command: CommandExecutor,
    pipeline: PipelineExecutor,
}

impl DefaultExecutor {
    pub fn new(max_args: usize) -> Self {
        DefaultExecutor {
            command: CommandExecutor::new(max_args),
            pipeline: PipelineExecutor::new(max_args),
        }
    }
}

impl Default for DefaultExecutor {
    fn default() -> Self {
        DefaultExecutor::new(MAX_ARGS)
    }
}

impl Executor for DefaultExecutor {
    fn exec(&mut self, pipeline: &Pipeline) -> ExecStatus {
        match pipeline.commands() {
            [single] => self.command.execute(single, PipelineIo::inherit()),
            _ => self.pipeline.execute(pipeline, PipelineIo::inherit()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{ExecError, ExecOutcome};
    use crate::parser::parse_line;

    #[test]
    fn test_quit_routes_to_exit() {
        let mut exec = DefaultExecutor::default();
        let p = parse_line("quit").unwrap();
        assert!(matches!(exec.exec(&p), Ok(ExecOutcome::Exit(0))));
    }

    #[test]
    fn test_quit_inside_pipeline_is_just_a_program() {
        let mut exec = DefaultExecutor::default();
        let p = parse_line("quit | true").unwrap();
        assert!(matches!(exec.exec(&p), Err(ExecError::ExecFailed { .. })));
    }

    #[test]
    fn test_routes_single_and_pipeline() {
        let mut exec = DefaultExecutor::default();
        assert!(matches!(exec.exec(&parse_line("true").unwrap()), Ok(ExecOutcome::Code(0))));
        let status = exec.exec(&parse_line("true | false").unwrap());
        assert!(matches!(status, Ok(ExecOutcome::Code(1))));
    }

    #[test]
    fn test_configured_cap_applies_to_both_paths() {
        let mut exec = DefaultExecutor::new(1);
        assert!(matches!(
            exec.exec(&parse_line("true x").unwrap()),
            Err(ExecError::TooManyArguments { .. })
        ));
        assert!(matches!(
            exec.exec(&parse_line("true | true x").unwrap()),
            Err(ExecError::TooManyArguments { .. })
        ));
    }
}
