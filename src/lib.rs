pub mod ast;
pub mod cli;
pub mod config;
pub mod executor;
pub mod logging;
pub mod parser;
pub mod prompt;
pub mod repl;
pub mod tokenizer;
