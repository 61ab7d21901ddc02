mod writer;

pub use writer::{EncodeOptions, JPEG_QUALITY, encode, encode_and_write, output_path};
