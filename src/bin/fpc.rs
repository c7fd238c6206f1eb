//! Command-line front end: wires standard input/output to the `fpc`
//! library's `Writer`/`Reader`. Pure plumbing — the codec lives in `lib.rs`.

use std::io;
use std::io::{Read, Write};
use std::process::ExitCode;

use clap::Parser;

use fpc::io::DynamicBufReader;
use fpc::{Reader, Writer, DEFAULT_COMPRESSION};

const BUFFER_SIZE: usize = 1024;

/// Lossless compressor/decompressor for streams of IEEE 754 doubles.
#[derive(Parser, Debug)]
#[command(name = "fpc", version, about)]
struct Args {
    /// Decompress input data and write output to stdout.
    #[arg(short = 'd', long = "decompress")]
    decompress: bool,

    /// Compression level to use when compressing. Ignored when decompressing.
    #[arg(short = 'l', long = "level", default_value_t = DEFAULT_COMPRESSION)]
    level: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let buffered_stdin = DynamicBufReader::new(stdin.lock());
    let result = if args.decompress {
        decompress_stream(buffered_stdin, stdout.lock())
    } else {
        compress_stream(buffered_stdin, stdout.lock(), args.level)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("fatal: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn compress_stream<R: Read, W: Write>(mut input: R, output: W, level: u8) -> fpc::Result<()> {
    let mut writer = Writer::new(output, level)?;
    let mut buf = [0u8; BUFFER_SIZE];
    loop {
        let n = input.read(&mut buf)?;
        if n == 0 {
            break;
        }
        // Standard input may hand back a number of bytes that is not a
        // multiple of 8; that can only happen at the very end of a
        // (malformed) stream of doubles, and write_bytes will reject it.
        writer.write_bytes(&buf[..n])?;
    }
    writer.close()
}

fn decompress_stream<R: Read, W: Write>(input: R, mut output: W) -> fpc::Result<()> {
    let mut reader = Reader::new(input);
    let mut buf = [0u8; BUFFER_SIZE];
    loop {
        match reader.read(&mut buf) {
            Ok(n) => output.write_all(&buf[..n])?,
            Err(fpc::Error::Eof) => return Ok(()),
            Err(e) => return Err(e),
        }
    }
}
