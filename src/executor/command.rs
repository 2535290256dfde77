use tracing::debug;
use crate::ast::Command;
use super::argv::{build_argv, MAX_ARGS};
use super::executor::{ExecOutcome, ExecStatus};
use super::process::{spawn_stage, PipelineIo};

/// Runs a one-stage line: fork, exec, wait for that child.
pub struct CommandExecutor {
    max_args: usize,
}

impl CommandExecutor {
    pub fn new(max_args: usize) -> Self {
        CommandExecutor { max_args }
    }

    pub fn execute(&self, command: &Command, io: PipelineIo) -> ExecStatus {
        if command.is_quit() {
            return Ok(ExecOutcome::Exit(0));
        }

        let argv = build_argv(command, self.max_args)?;
        let mut stage = spawn_stage(&argv, io.stage_io(), &io.raw_fds())?;
        drop(io);

        // Reap even when exec failed so no zombie is left behind.
        let started = stage.startup_result();
        let code = stage.reap()?;
        started?;

        debug!(command = %command, code, "command finished");
        Ok(ExecOutcome::Code(code))
    }
}

impl Default for CommandExecutor {
    fn default() -> Self {
        CommandExecutor::new(MAX_ARGS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Seek, SeekFrom};
    use crate::executor::executor::ExecError;

    fn cmd(tokens: &[&str]) -> Command {
        Command::new(tokens.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    fn run_captured(command: &Command) -> (ExecStatus, String) {
        let mut out = tempfile::tempfile().unwrap();
        let sink = out.try_clone().unwrap();
        let status = CommandExecutor::default().execute(command, PipelineIo::with_stdout(sink));
        let mut captured = String::new();
        out.seek(SeekFrom::Start(0)).unwrap();
        out.read_to_string(&mut captured).unwrap();
        (status, captured)
    }

    #[test]
    fn test_echo_output_is_complete_on_return() {
        let (status, out) = run_captured(&cmd(&["echo", "hi"]));
        assert!(matches!(status, Ok(ExecOutcome::Code(0))));
        assert_eq!(out, "hi\n");
    }

    #[test]
    fn test_exit_status_is_reported() {
        let (status, _) = run_captured(&cmd(&["false"]));
        assert!(matches!(status, Ok(ExecOutcome::Code(1))));
    }

    #[test]
    fn test_quit_does_not_spawn() {
        let (status, out) = run_captured(&cmd(&["quit", "echo", "never"]));
        assert!(matches!(status, Ok(ExecOutcome::Exit(0))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_unknown_program() {
        let (status, out) = run_captured(&cmd(&["definitely-not-a-real-program"]));
        match status {
            Err(ExecError::ExecFailed { program, .. }) => {
                assert_eq!(program, "definitely-not-a-real-program")
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(out.is_empty());
    }

    #[test]
    fn test_argument_cap_prevents_spawn() {
        let executor = CommandExecutor::new(2);
        let result = executor.execute(&cmd(&["echo", "a", "b"]), PipelineIo::inherit());
        assert!(matches!(
            result,
            Err(ExecError::TooManyArguments { count: 3, max: 2 })
        ));
    }

    #[test]
    fn test_stdin_from_caller() {
        let mut input = tempfile::tempfile().unwrap();
        std::io::Write::write_all(&mut input, b"one\ntwo\n").unwrap();
        input.seek(SeekFrom::Start(0)).unwrap();

        let mut out = tempfile::tempfile().unwrap();
        let io = PipelineIo {
            stdin: Some(input.into()),
            stdout: Some(out.try_clone().unwrap().into()),
        };
        let status = CommandExecutor::default().execute(&cmd(&["wc", "-l"]), io);
        assert!(matches!(status, Ok(ExecOutcome::Code(0))));

        let mut captured = String::new();
        out.seek(SeekFrom::Start(0)).unwrap();
        out.read_to_string(&mut captured).unwrap();
        assert_eq!(captured.trim(), "2");
    }
}
