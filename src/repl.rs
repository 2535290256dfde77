use std::io::{self, BufRead, Write};
use tracing::debug;
use crate::config::Config;
use crate::executor::{ExecOutcome, Executor};
use crate::parser::parse_line;
use crate::prompt::ShellPrompt;

/// Prefix of every diagnostic line the driver writes to stderr.
pub const DIAGNOSTIC_PREFIX: &str = "myshell";

/// The read-parse-execute loop.
pub struct Repl<E: Executor> {
    prompt: ShellPrompt,
    executor: E,
}

impl<E: Executor> Repl<E> {
    pub fn new(config: &Config, executor: E) -> Self {
        Repl {
            prompt: ShellPrompt::new(config.prompt.as_str()),
            executor,
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run until end of input or a `quit` command and return the status the
    /// interpreter should exit with. Execution failures are reported to
    /// `diag` and never stop the loop.
    pub fn run<R, W, D>(&mut self, mut input: R, mut out: W, mut diag: D) -> io::Result<i32>
    where
        R: BufRead,
        W: Write,
        D: Write,
    {
        loop {
            self.prompt.show_prompt(&mut out)?;
            let line = match self.prompt.read_line(&mut input)? {
                Some(l) => l,
                None => {
                    debug!("end of input");
                    return Ok(0);
                }
            };

            let Some(pipeline) = parse_line(&line) else {
                continue;
            };

            match self.executor.exec(&pipeline) {
                Ok(ExecOutcome::Exit(code)) => return Ok(code),
                Ok(ExecOutcome::Code(code)) => debug!(code, "line finished"),
                Err(e) => writeln!(diag, "{}: {}", DIAGNOSTIC_PREFIX, e)?,
            }
        }
    }
}
