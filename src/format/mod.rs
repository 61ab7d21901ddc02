mod encode_format;

pub use encode_format::{EncodeFormat, KnownFormats, source_extension};
