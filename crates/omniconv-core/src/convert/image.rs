//! Raster image conversion through the `image` crate.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageReader, Rgb, RgbImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::output_path;
use crate::error::ConvertError;
use crate::format::ImageFormat;
use crate::settings::ImageJob;

/// Largest frame an ICO container can hold.
const ICO_MAX_SIDE: u32 = 256;

/// Convert one image into `destination`, returning the written path.
pub fn convert_image(input: &Path, destination: &Path, job: &ImageJob) -> Result<PathBuf, ConvertError> {
    let mut img = ImageReader::open(input)?.with_guessed_format()?.decode()?;

    if let Some(dims) = job.resize {
        img = img.resize_exact(dims.width, dims.height, FilterType::Lanczos3);
    }

    let img = prepare_for(job.target, img);
    let output = output_path(input, destination, job.target.extension(), None);
    debug!(
        input = %input.display(),
        output = %output.display(),
        width = img.width(),
        height = img.height(),
        "Encoding image"
    );

    match job.target {
        ImageFormat::Jpg => {
            let mut writer = BufWriter::new(File::create(&output)?);
            img.write_with_encoder(JpegEncoder::new_with_quality(&mut writer, job.quality))?;
        }
        other => img.save_with_format(&output, other.encoder_format())?,
    }

    Ok(output)
}

/// Normalize pixel layout for the target encoder.
fn prepare_for(target: ImageFormat, img: DynamicImage) -> DynamicImage {
    let img = if target == ImageFormat::Ico && (img.width() > ICO_MAX_SIDE || img.height() > ICO_MAX_SIDE) {
        img.resize(ICO_MAX_SIDE, ICO_MAX_SIDE, FilterType::Lanczos3)
    } else {
        img
    };

    match target {
        _ if !target.supports_alpha() => DynamicImage::ImageRgb8(flatten_onto_white(&img)),
        ImageFormat::Tiff => match img.color() {
            // The TIFF encoder has no gray+alpha layout.
            ColorType::La8 => DynamicImage::ImageRgba8(img.to_rgba8()),
            ColorType::La16 => DynamicImage::ImageRgba16(img.to_rgba16()),
            _ => img,
        },
        ImageFormat::Png => img,
        _ if img.color().has_alpha() => DynamicImage::ImageRgba8(img.to_rgba8()),
        _ => DynamicImage::ImageRgb8(img.to_rgb8()),
    }
}

/// Composite an image over an opaque white background.
pub fn flatten_onto_white(img: &DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }

    let rgba = img.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = u16::from(a);
        let blend = |channel: u8| -> u8 {
            let value = u16::from(channel) * alpha + 255 * (255 - alpha);
            ((value + 127) / 255) as u8
        };
        Rgb([blend(r), blend(g), blend(b)])
    })
}
