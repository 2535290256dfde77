mod executor;
mod default_executor;
pub mod argv;
pub mod channel;
pub mod command;
pub mod pipeline;
pub mod process;

#[cfg(test)]
pub(crate) mod tests;

pub use executor::{Executor, ExecError, ExecOutcome, ExecStatus};
pub use default_executor::DefaultExecutor;
pub use command::CommandExecutor;
pub use pipeline::PipelineExecutor;
pub use process::PipelineIo;
