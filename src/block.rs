//! Block framing: buffering encoded pairs into fixed-maximum-size blocks on
//! write, and tracking an in-progress block's record/byte bookkeeping on
//! read.

use std::io::Write;

use crate::io::WriteBuffer;
use crate::pair::{PairEncoder, RecordHeader};
use crate::Result;

/// Maximum number of records a single block may contain.
pub const MAX_RECORDS_PER_BLOCK: usize = 32_768;

/// Size, in bytes, of the block header (two little-endian 24-bit integers).
pub const BLOCK_HEADER_SIZE: usize = 6;

/// Buffers pair headers and residual bytes for a writer, flushing complete
/// blocks to the sink as the record cap is reached.
pub struct BlockEncoder<W> {
    headers: Vec<u8>,
    values: Vec<u8>,
    sink: W,
    encoder: PairEncoder,
    level: u8,

    last_value_bits: u64,
    n_records: usize,
}

impl<W: Write> BlockEncoder<W> {
    pub fn new(sink: W, level: u8) -> BlockEncoder<W> {
        BlockEncoder {
            headers: Vec::with_capacity(MAX_RECORDS_PER_BLOCK / 2),
            values: Vec::with_capacity(MAX_RECORDS_PER_BLOCK * 8),
            sink,
            encoder: PairEncoder::new(level),
            level,
            last_value_bits: 0,
            n_records: 0,
        }
    }

    /// Encodes one 64-bit value. Every other call completes a pair and may
    /// trigger a block flush once 32,768 records have accumulated.
    pub fn encode(&mut self, value_bits: u64) -> Result<()> {
        if self.n_records % 2 == 0 {
            self.last_value_bits = value_bits;
            self.n_records += 1;
            return Ok(());
        }

        let (header, data) = self.encoder.encode(self.last_value_bits, value_bits);
        self.headers.push(header.encode());
        self.values.extend_from_slice(data);
        self.n_records += 1;

        if self.n_records == MAX_RECORDS_PER_BLOCK {
            self.flush()?;
        }
        Ok(())
    }

    /// Writes out a block containing whatever records have accumulated.
    ///
    /// If a record is waiting for its pair partner, it is completed with a
    /// dummy zero value; only that record's own residual bytes are kept,
    /// the dummy's are discarded. Predictor state is advanced by both
    /// halves of the dummy pair regardless, so a decoder processing the
    /// same records stays in lock-step (see `RecordHeader`/`PairEncoder`).
    pub fn flush(&mut self) -> Result<()> {
        if self.n_records == 0 {
            return Ok(());
        }

        if self.n_records % 2 == 1 {
            let (header, data) = self.encoder.encode(self.last_value_bits, 0);
            let k1 = header.first.len as usize;
            self.headers.push(header.encode());
            self.values.extend_from_slice(&data[..k1]);
        }

        self.write_block()?;

        self.headers.clear();
        self.values.clear();
        self.n_records = 0;
        Ok(())
    }

    fn write_block(&mut self) -> Result<()> {
        let n_byte = BLOCK_HEADER_SIZE + self.headers.len() + self.values.len();
        let mut block = Vec::with_capacity(n_byte);
        block.write_le_u24(self.n_records as u32)?;
        block.write_le_u24(n_byte as u32)?;
        block.extend_from_slice(&self.headers);
        block.extend_from_slice(&self.values);
        Ok(self.sink.write_all(&block)?)
    }

    /// Writes a single byte directly to the sink, bypassing record framing.
    /// Used once per stream, by `Writer`, to emit the compression-level prefix.
    pub fn write_raw_byte(&mut self, b: u8) -> Result<()> {
        Ok(self.sink.write_u8(b)?)
    }

    /// Flushes any pending data, then rebinds this encoder to a new sink and
    /// compression level. Predictor tables are cleared in place if `level`
    /// is unchanged, or reallocated at the new size otherwise.
    pub fn reset(&mut self, sink: W, level: u8) -> Result<()> {
        self.flush()?;
        if level == self.level {
            self.encoder.clear();
        } else {
            self.encoder = PairEncoder::new(level);
            self.level = level;
        }
        self.sink = sink;
        Ok(())
    }
}

/// Parses the 6-byte block header into `(record_count, total_byte_count)`.
pub fn decode_block_header(bytes: &[u8; 6]) -> (u32, u32) {
    let n_rec = (bytes[0] as u32) | (bytes[1] as u32) << 8 | (bytes[2] as u32) << 16;
    let n_byte = (bytes[3] as u32) | (bytes[4] as u32) << 8 | (bytes[5] as u32) << 16;
    (n_rec, n_byte)
}

/// Per-record byte count implied by a length code; see `pair::RecordHeader`.
pub(crate) fn record_headers_from_bytes(bytes: &[u8], n_rec: u32) -> Vec<RecordHeader> {
    let mut headers = Vec::with_capacity(n_rec as usize);
    for &byte in bytes {
        let (h1, h2) = crate::pair::decode_headers(byte);
        headers.push(h1);
        if headers.len() < n_rec as usize {
            headers.push(h2);
        }
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_header_round_trip() {
        // record count 32768, byte count 144822 => 00 80 00 b6 35 02
        let mut buf = Vec::new();
        buf.write_le_u24(32_768).unwrap();
        buf.write_le_u24(144_822).unwrap();
        assert_eq!(buf, vec![0x00, 0x80, 0x00, 0xb6, 0x35, 0x02]);

        let bytes: [u8; 6] = buf.try_into().unwrap();
        assert_eq!(decode_block_header(&bytes), (32_768, 144_822));
    }

    #[test]
    fn flush_on_empty_encoder_is_a_no_op() {
        let mut enc = BlockEncoder::new(Vec::new(), 4);
        enc.flush().unwrap();
        assert!(enc.sink.is_empty());
    }
}
