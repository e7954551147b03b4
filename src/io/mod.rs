//! I/O layer: decoding source images into pipeline buffers and `writers` for
//! JPEG/TIFF/PNG outputs and metadata sidecars.
pub mod decode;
pub use decode::{ALLOWED_EXTENSIONS, decode_image, has_allowed_extension, read_image};

pub mod writers;
