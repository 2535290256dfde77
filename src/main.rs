use pipe_shell_rs::config::ConfigLoader;
use pipe_shell_rs::executor::DefaultExecutor;
use pipe_shell_rs::repl::Repl;
use pipe_shell_rs::{cli, logging};
use std::io;

fn main() {
    match run_main() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("myshell: {err:#}");
            std::process::exit(1);
        }
    }
}

fn run_main() -> anyhow::Result<i32> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    let config = ConfigLoader::from_args(&args);

    let mut repl = Repl::new(&config, DefaultExecutor::new(config.max_args));
    let code = repl.run(io::stdin().lock(), io::stdout(), io::stderr())?;
    Ok(code)
}
