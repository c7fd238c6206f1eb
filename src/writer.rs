//! Stream writing: emits the one-byte compression-level prefix ahead of the
//! first record, then delegates all record and block framing to
//! [`crate::block::BlockEncoder`].

use std::io::Write;

use crate::block::BlockEncoder;
use crate::errors;
use crate::Result;

/// Compresses a sequence of `f64` values into an FPC stream.
///
/// `write_float`/`write_bytes` accept values one at a time; `flush` and
/// `close` both force out whatever has been buffered, including a partial
/// trailing block. Neither call touches the underlying sink's own
/// buffering or lifetime — this writer never flushes or closes `sink`
/// itself.
pub struct Writer<W> {
    encoder: BlockEncoder<W>,
    level: u8,
    wrote_header: bool,
    closed: bool,
}

impl<W: Write> Writer<W> {
    /// Creates a writer at the given compression `level` (table size
    /// `2^level`, so `level` must be in `1..=MAX_COMPRESSION`).
    pub fn new(sink: W, level: u8) -> Result<Writer<W>> {
        validate_level(level)?;
        Ok(Writer {
            encoder: BlockEncoder::new(sink, level),
            level,
            wrote_header: false,
            closed: false,
        })
    }

    fn ensure_header(&mut self) -> Result<()> {
        if !self.wrote_header {
            self.wrote_header = true;
            self.encoder.write_raw_byte(self.level)?;
        }
        Ok(())
    }

    /// Encodes one `f64`.
    pub fn write_float(&mut self, f: f64) -> Result<()> {
        self.ensure_header()?;
        self.encoder.encode(f.to_bits())
    }

    /// Encodes `b` as a sequence of little-endian `u64` bit patterns.
    /// `b.len()` must be a multiple of 8.
    pub fn write_bytes(&mut self, b: &[u8]) -> Result<()> {
        if b.len() % 8 != 0 {
            return errors::invalid_argument("buffer length must be a multiple of 8");
        }
        self.ensure_header()?;
        for chunk in b.chunks_exact(8) {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            self.encoder.encode(u64::from_le_bytes(word))?;
        }
        Ok(())
    }

    /// Ensures the stream prefix is written and pushes out any buffered
    /// records, emitting a short final block if needed. Does not flush the
    /// underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        self.ensure_header()?;
        self.encoder.flush()
    }

    /// Idempotent. Equivalent to `flush` on first call; a no-op thereafter.
    /// Does not close the underlying sink.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.flush()
    }

    /// Flushes pending data, then rebinds this writer to `sink` at `level`.
    /// Predictor tables are cleared in place if `level` is unchanged, or
    /// reallocated otherwise.
    pub fn reset(&mut self, sink: W, level: u8) -> Result<()> {
        validate_level(level)?;
        self.encoder.reset(sink, level)?;
        self.level = level;
        self.wrote_header = false;
        self.closed = false;
        Ok(())
    }
}

fn validate_level(level: u8) -> Result<()> {
    if level == 0 || level > crate::MAX_COMPRESSION {
        return errors::invalid_argument("compression level must be in 1..=63");
    }
    Ok(())
}
