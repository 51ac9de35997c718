// ABOUTME: Writes framed kitty graphics chunks to an output sink in order
// ABOUTME: Appends the trailing newline and surfaces any write failure as fatal

use crate::error::Result;
use crate::framer::Chunk;
use std::io::Write;

pub struct Emitter<W: Write> {
    sink: W,
}

impl<W: Write> Emitter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Write every chunk as an escape sequence, then a newline
    pub fn emit(&mut self, chunks: &[Chunk<'_>]) -> Result<()> {
        for chunk in chunks {
            write!(self.sink, "{}", chunk)?;
        }
        writeln!(self.sink)?;
        self.sink.flush()?;

        log::debug!("Emitted {} graphics sequence(s)", chunks.len());
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}
