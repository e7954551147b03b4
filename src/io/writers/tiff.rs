use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tiff::encoder::{TiffEncoder, colortype};

use crate::core::processing::interchange::InterchangeImage;
use crate::error::Result;

/// Uncompressed 8-bit RGB TIFF.
pub fn write_rgb_tiff(output: &Path, image: &InterchangeImage) -> Result<()> {
    let file = File::create(output)?;
    let mut encoder = TiffEncoder::new(BufWriter::new(file))?;
    encoder.write_image::<colortype::RGB8>(
        image.width() as u32,
        image.height() as u32,
        &image.to_rgb_bytes(),
    )?;
    Ok(())
}
