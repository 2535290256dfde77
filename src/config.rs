use crate::cli::CliArgs;
use crate::executor::argv::MAX_ARGS;

/// Prompt shown when none is given on the command line.
pub const DEFAULT_PROMPT: &str = "myshell> ";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub prompt: String,
    pub max_args: usize,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config() -> Config {
        Config {
            prompt: DEFAULT_PROMPT.to_string(),
            max_args: MAX_ARGS,
        }
    }

    /// Defaults, overridden by whatever was passed on the command line.
    pub fn from_args(args: &CliArgs) -> Config {
        let default = ConfigLoader::default_config();
        Config {
            prompt: args.prompt.clone().unwrap_or(default.prompt),
            max_args: args.max_args.map(usize::from).unwrap_or(default.max_args),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        ConfigLoader::default_config()
    }
}
