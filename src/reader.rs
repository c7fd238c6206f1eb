//! Stream reading: parses the one-byte compression-level prefix, then walks
//! blocks one at a time, reconstructing each value as `predicted XOR residual`
//! and feeding it back into both predictors so they stay in lock-step with
//! the encoder that produced the stream.

use std::io::Read;

use crate::block::{decode_block_header, record_headers_from_bytes, BLOCK_HEADER_SIZE};
use crate::errors::{self, Error};
use crate::pair::{read_residual, Predictor, RecordHeader};
use crate::predictor::{Dfcm, Fcm};
use crate::Result;

/// Bookkeeping for the block currently being consumed. A freshly constructed
/// `Reader` starts with the zero value, which looks like an already fully
/// read empty block and so immediately triggers a read of the first real
/// block header.
#[derive(Default)]
struct BlockState {
    headers: Vec<RecordHeader>,
    n_rec: usize,
    n_byte: usize,
    n_rec_read: usize,
    n_byte_read: usize,
}

/// Reads and decompresses an FPC stream produced by [`crate::Writer`].
pub struct Reader<R> {
    source: R,
    fcm: Option<Fcm>,
    dfcm: Option<Dfcm>,
    initialized: bool,
    block: BlockState,
}

impl<R: Read> Reader<R> {
    /// Wraps `source`. No bytes are read until the first call to `read`.
    pub fn new(source: R) -> Reader<R> {
        Reader {
            source,
            fcm: None,
            dfcm: None,
            initialized: false,
            block: BlockState::default(),
        }
    }

    /// Rebinds this reader to a new source. Predictors are rebuilt from the
    /// next stream's level prefix on the following `read`.
    pub fn reset(&mut self, source: R) {
        self.source = source;
        self.fcm = None;
        self.dfcm = None;
        self.initialized = false;
        self.block = BlockState::default();
    }

    fn initialize(&mut self) -> Result<()> {
        let level = self.read_level_prefix()?;
        self.fcm = Some(Fcm::new(level));
        self.dfcm = Some(Dfcm::new(level));
        self.initialized = true;
        Ok(())
    }

    fn read_level_prefix(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        let n = self.source.read(&mut buf)?;
        if n == 0 {
            return Err(Error::Eof);
        }
        Ok(buf[0])
    }

    /// Fully drains `buf` from the source, or fails. Any shortfall is
    /// reported as `msg` rather than as a clean end-of-stream, since it
    /// always occurs mid-record or mid-header, never at a block boundary.
    fn fill_or_truncated(&mut self, buf: &mut [u8], msg: &'static str) -> Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.source.read(&mut buf[filled..])?;
            if n == 0 {
                tracing::warn!(wanted = buf.len(), got = filled, "{}", msg);
                return errors::parse_error(msg);
            }
            filled += n;
        }
        Ok(())
    }

    /// Reads the 6-byte block header. Returns `Ok(None)` on a clean
    /// end-of-stream (no bytes at all), `Ok(Some(()))` having populated
    /// `self.block` with a fresh block, or an error.
    fn read_block_header(&mut self) -> Result<Option<()>> {
        let mut hdr = [0u8; BLOCK_HEADER_SIZE];
        let mut filled = 0;
        while filled < hdr.len() {
            let n = self.source.read(&mut hdr[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        if filled == 0 {
            return Ok(None);
        }
        if filled < hdr.len() {
            tracing::warn!(got = filled, "block header too short");
            return errors::parse_error("block header too short");
        }

        let (n_rec, n_byte) = decode_block_header(&hdr);
        let n_rec = n_rec as usize;

        let header_bytes_len = (n_rec + 1) / 2;
        let mut header_bytes = vec![0u8; header_bytes_len];
        self.fill_or_truncated(&mut header_bytes, "truncated pair headers")?;

        self.block = BlockState {
            headers: record_headers_from_bytes(&header_bytes, n_rec as u32),
            n_rec,
            n_byte: n_byte as usize,
            n_rec_read: 0,
            n_byte_read: BLOCK_HEADER_SIZE + header_bytes_len,
        };
        Ok(Some(()))
    }

    /// Decodes as many complete records as fit in `buf` (a multiple of 8
    /// bytes) from the current block, stopping at the block's end.
    fn read_from_block(&mut self, mut buf: &mut [u8]) -> Result<usize> {
        let mut bytes_decoded = 0;
        while self.block.n_rec_read < self.block.n_rec && buf.len() >= 8 {
            let h = self.block.headers[self.block.n_rec_read];
            let mut scratch = [0u8; 8];
            self.fill_or_truncated(&mut scratch[..h.len as usize], "missing records")?;
            let residual = read_residual(&scratch[..h.len as usize]);

            let fcm = self.fcm.as_mut().expect("predictors initialized before first block");
            let dfcm = self.dfcm.as_mut().expect("predictors initialized before first block");
            let predicted = match h.predictor {
                Predictor::Fcm => fcm.predict(),
                Predictor::Dfcm => dfcm.predict(),
            };
            let value = predicted ^ residual;
            fcm.update(value);
            dfcm.update(value);

            let (first, rest) = buf.split_at_mut(8);
            first.copy_from_slice(&value.to_le_bytes());
            buf = rest;

            bytes_decoded += 8;
            self.block.n_byte_read += h.len as usize;
            self.block.n_rec_read += 1;
        }
        Ok(bytes_decoded)
    }

    /// Reads `buf.len() / 8` values' worth of little-endian bytes into `buf`.
    /// `buf.len()` must be a multiple of 8. Returns the number of bytes
    /// written. A return less than `buf.len()` can happen *without* an
    /// error, when the stream ends exactly at a block boundary partway
    /// through the fill; `Err(Error::Eof)` is reserved for the case where
    /// no bytes at all could be produced (`n_read == 0`).
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if buf.len() % 8 != 0 {
            return errors::invalid_argument("buffer length must be a multiple of 8");
        }
        if !self.initialized {
            self.initialize()?;
        }

        let mut n_read = 0;
        loop {
            let n = self.read_from_block(&mut buf[n_read..])?;
            n_read += n;
            if n_read == buf.len() {
                return Ok(n_read);
            }

            if self.block.n_rec_read != self.block.n_rec {
                return errors::parse_error("block record length too short");
            }
            if self.block.n_byte_read != self.block.n_byte {
                tracing::error!(
                    have = self.block.n_byte_read,
                    want = self.block.n_byte,
                    "block byte length too short"
                );
                return errors::parse_error("block byte length too short");
            }

            match self.read_block_header() {
                Ok(Some(())) => continue,
                Ok(None) => {
                    if n_read > 0 {
                        return Ok(n_read);
                    }
                    return Err(Error::Eof);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Reads a single `f64` from the stream.
    pub fn read_float(&mut self) -> Result<f64> {
        let mut buf = [0u8; 8];
        self.read(&mut buf)?;
        Ok(f64::from_le_bytes(buf))
    }

    /// Fills `dst` with consecutive values from the stream. Returns the
    /// number of values actually written and the outcome of the final read
    /// attempt, mirroring the reference implementation's `(n, err)` return
    /// so a caller can recover the partial count on error.
    pub fn read_floats(&mut self, dst: &mut [f64]) -> (usize, Result<()>) {
        for (i, slot) in dst.iter_mut().enumerate() {
            match self.read_float() {
                Ok(v) => *slot = v,
                Err(e) => return (i, Err(e)),
            }
        }
        (dst.len(), Ok(()))
    }
}
