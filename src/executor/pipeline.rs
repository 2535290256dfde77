use std::os::fd::RawFd;
use tracing::{debug, warn};
use crate::ast::Pipeline;
use super::argv::{build_argv, ArgVector, MAX_ARGS};
use super::channel::ChannelSet;
use super::executor::{ExecError, ExecOutcome, ExecStatus};
use super::process::{spawn_stage, PipelineIo, SpawnedStage, StageIo};

/// Runs an N-stage pipeline as N processes joined by N-1 channels.
pub struct PipelineExecutor {
    max_args: usize,
}

impl PipelineExecutor {
    pub fn new(max_args: usize) -> Self {
        PipelineExecutor { max_args }
    }

    pub fn execute(&self, pipeline: &Pipeline, io: PipelineIo) -> ExecStatus {
        let argvs = pipeline
            .commands()
            .iter()
            .map(|cmd| build_argv(cmd, self.max_args))
            .collect::<Result<Vec<_>, _>>()?;

        // 1. All channels exist before the first fork, or none do.
        let channels = ChannelSet::allocate(pipeline.channel_count())?;
        debug!(stages = pipeline.len(), channels = channels.len(), "allocated channels");

        // 2. Spawn every stage; a fork failure stops further spawning.
        let mut close_fds = channels.raw_fds();
        close_fds.extend(io.raw_fds());
        let (spawned, spawn_error) = spawn_all(&argvs, &channels, &io, &close_fds);

        // 3. The parent's endpoints must be gone before any wait, or a reader
        //    may never see end-of-stream.
        drop(channels);
        drop(io);

        // 4. Reap everything that was spawned.
        let mut errors = Vec::new();
        let mut last_code = 0;
        for mut stage in spawned {
            if let Err(e) = stage.startup_result() {
                errors.push(e);
            }
            match stage.reap() {
                Ok(code) => last_code = code,
                Err(e) => errors.push(e),
            }
        }
        errors.extend(spawn_error);

        let mut errors = errors.into_iter();
        match errors.next() {
            None => {
                debug!(pipeline = %pipeline, code = last_code, "pipeline finished");
                Ok(ExecOutcome::Code(last_code))
            }
            Some(first) => {
                for other in errors {
                    warn!(error = %other, "additional pipeline failure");
                }
                Err(first)
            }
        }
    }
}

impl Default for PipelineExecutor {
    fn default() -> Self {
        PipelineExecutor::new(MAX_ARGS)
    }
}

fn spawn_all(
    argvs: &[ArgVector],
    channels: &ChannelSet,
    io: &PipelineIo,
    close_fds: &[RawFd],
) -> (Vec<SpawnedStage>, Option<ExecError>) {
    let last = argvs.len() - 1;
    let outer = io.stage_io();
    let mut spawned = Vec::with_capacity(argvs.len());

    for (i, argv) in argvs.iter().enumerate() {
        let stage_io = StageIo {
            stdin: if i == 0 { outer.stdin } else { Some(channels.get(i - 1).read_end()) },
            stdout: if i == last { outer.stdout } else { Some(channels.get(i).write_end()) },
        };
        match spawn_stage(argv, stage_io, close_fds) {
            Ok(stage) => spawned.push(stage),
            Err(e) => {
                warn!(stage = i, spawned = spawned.len(), "aborting pipeline spawn");
                return (spawned, Some(e));
            }
        }
    }

    (spawned, None)
}
