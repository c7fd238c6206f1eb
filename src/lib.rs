//! `fpc` implements reading and writing of FPC-format compressed streams.
//! FPC is a fast, lossless format for compressing sequences of IEEE 754
//! binary64 floating-point values, based on Burtscher & Ratanaworabhan's
//! "FPC: A High-Speed Compressor for Double-Precision Floating-Point Data".
//!
//! The format interleaves two on-line predictors (an `Fcm` and a `Dfcm`)
//! that each guess the next value from what has been seen so far, and
//! stores only the XOR residual between the guess and the real value,
//! packed down to its nonzero bytes. [`Writer`] and [`Reader`] are the
//! entry points; everything else in this crate exists to support them.

mod block;
mod errors;
pub mod io;
mod pair;
mod predictor;
mod reader;
mod writer;

pub use errors::Error;
pub use pair::{Predictor, RecordHeader};
pub use predictor::{Dfcm, Fcm};
pub use reader::Reader;
pub use writer::Writer;

/// The default compression level used by the reference implementation and
/// this crate's CLI front end when none is given.
pub const DEFAULT_COMPRESSION: u8 = 10;

/// The largest valid compression level; table size is `2^level` words.
///
/// Bounded at 63 rather than the wire format's nominal 255 so that
/// `1u64 << level` (the table-size computation in [`Fcm`]/[`Dfcm`]) never
/// shifts by the word width or more, which panics in debug builds and
/// silently wraps in release.
pub const MAX_COMPRESSION: u8 = 63;

/// The result type returned by every fallible operation in this crate.
pub type Result<T> = std::result::Result<T, Error>;
