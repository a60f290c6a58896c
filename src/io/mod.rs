mod byte_reader;
mod file;

pub use byte_reader::{read_u16_be, read_u16_le, read_u32_be, read_u32_le, ByteReader};
pub use file::{read_file, write_file, LoadedFile, DEFAULT_MAX_FILE_SIZE};
