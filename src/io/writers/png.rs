use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::ImageError;
use image::codecs::png::PngEncoder;

use crate::core::processing::interchange::InterchangeImage;
use crate::error::{Error, Result};

fn map_encode_error(e: ImageError) -> Error {
    match e {
        ImageError::IoError(io) => Error::Io(io),
        other => Error::processing("png encode", other),
    }
}

pub fn write_rgb_png(output: &Path, image: &InterchangeImage) -> Result<()> {
    let rgb = image.clone().into_rgb_image()?;
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    rgb.write_with_encoder(PngEncoder::new(&mut writer))
        .map_err(map_encode_error)?;
    writer.flush()?;
    Ok(())
}
