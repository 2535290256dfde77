use std::io::{self, BufRead, Write};
use tracing::warn;

pub struct ShellPrompt {
    prompt: String,
}

impl ShellPrompt {
    pub fn new(prompt: impl Into<String>) -> Self {
        ShellPrompt { prompt: prompt.into() }
    }

    pub fn show_prompt<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.prompt)?;
        out.flush()
    }

    /// Next line without its terminator, or `None` at end of input.
    /// Bytes that are not UTF-8 become U+FFFD instead of failing the read.
    pub fn read_line<R: BufRead>(&self, input: &mut R) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        let bytes_read = input.read_until(b'\n', &mut buf)?;
        if bytes_read == 0 {
            // EOF (e.g., Ctrl-D)
            return Ok(None);
        }
        while matches!(buf.last(), Some(b'\n' | b'\r')) {
            buf.pop();
        }
        let line = match String::from_utf8(buf) {
            Ok(line) => line,
            Err(e) => {
                warn!("input line is not valid UTF-8");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        Ok(Some(line))
    }
}
