//! Text source: one command per line.

use std::io::BufRead;

use super::{Heard, InputError, InputSource, ListenWindow};

/// Reads commands from any line-oriented reader (stdin, a file, a test buffer).
///
/// The listen window is ignored; a read blocks until a line or EOF arrives.
pub struct TextSource<R> {
    reader: R,
}

impl<R: BufRead> TextSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> InputSource for TextSource<R> {
    fn listen(&mut self, _window: ListenWindow) -> Heard {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => Heard::Closed,
            Ok(_) => {
                let command = line.trim().to_lowercase();
                if command.is_empty() {
                    Heard::Nothing(None)
                } else {
                    Heard::Text(command)
                }
            }
            Err(e) => Heard::Nothing(Some(InputError::ServiceUnavailable(e.to_string()))),
        }
    }
}
