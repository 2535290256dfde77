use crate::ast::{Command, Pipeline};
use crate::tokenizer::tokenize;

/// Separates pipeline stages.
pub const PIPE: char = '|';
/// Separates words inside a stage.
pub const WORD_DELIMITER: char = ' ';

/// Turn one input line into a pipeline.
///
/// Stages that contain no words are dropped; a line with no words at all
/// gives `None`.
pub fn parse_line(line: &str) -> Option<Pipeline> {
    let commands = tokenize(line, PIPE)
        .iter()
        .filter_map(|stage| Command::new(tokenize(stage, WORD_DELIMITER)))
        .collect();
    Pipeline::new(commands)
}
