use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use jpeg_encoder::{ColorType, Encoder};

use crate::core::processing::interchange::InterchangeImage;
use crate::error::{Error, Result};

pub const JPEG_QUALITY: u8 = 95;

fn jpeg_dimensions(image: &InterchangeImage) -> Result<(u16, u16)> {
    let cols = u16::try_from(image.width()).map_err(|_| Error::InvalidArgument {
        arg: "width",
        value: format!("{} exceeds the JPEG limit of {}", image.width(), u16::MAX),
    })?;
    let rows = u16::try_from(image.height()).map_err(|_| Error::InvalidArgument {
        arg: "height",
        value: format!("{} exceeds the JPEG limit of {}", image.height(), u16::MAX),
    })?;
    Ok((cols, rows))
}

fn encode_into<W: Write>(writer: W, image: &InterchangeImage) -> Result<()> {
    let (cols, rows) = jpeg_dimensions(image)?;
    let encoder = Encoder::new(writer, JPEG_QUALITY);
    encoder.encode(&image.to_rgb_bytes(), cols, rows, ColorType::Rgb)?;
    Ok(())
}

pub fn write_rgb_jpeg(output: &Path, image: &InterchangeImage) -> Result<()> {
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    encode_into(&mut writer, image)?;
    writer.flush()?;
    Ok(())
}

/// Encode to an in-memory JPEG, e.g. for download or archive entries.
pub fn encode_rgb_jpeg(image: &InterchangeImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_into(&mut buf, image)?;
    Ok(buf)
}
