mod dynamic_buf_reader;
mod read;
mod write;

pub use dynamic_buf_reader::DynamicBufReader;
pub use read::ReadBuffer;
pub use write::WriteBuffer;
