use std::io::{self, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard payload too large ({0} bytes)")]
    TooLarge(usize),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub trait ClipboardSink: Send {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Writes to the system clipboard through the terminal's OSC 52 sequence.
pub struct Osc52Clipboard<W: Write + Send> {
    out: W,
    max_bytes: usize,
}

impl Osc52Clipboard<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> Osc52Clipboard<W> {
    /// Many terminals drop OSC 52 payloads beyond roughly 100 KB.
    pub const DEFAULT_MAX_BYTES: usize = 100_000;

    pub fn new(out: W) -> Self {
        Self {
            out,
            max_bytes: Self::DEFAULT_MAX_BYTES,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> ClipboardSink for Osc52Clipboard<W> {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let encoded = STANDARD.encode(text.as_bytes());
        if encoded.len() > self.max_bytes {
            return Err(ClipboardError::TooLarge(encoded.len()));
        }
        write!(self.out, "\x1b]52;c;{encoded}\x07")?;
        self.out.flush()?;
        Ok(())
    }
}
