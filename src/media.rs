//! Loading of pre-rendered result images and rendering of raw Sigma0 bands
//! into something a browser can display.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{GrayImage, ImageFormat};
use log::debug;
use std::fmt;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::normalize::normalize;
use crate::readers::{self, FileError, Raster, ReadError};

#[derive(Debug)]
pub enum MediaError {
    Io { path: PathBuf, source: std::io::Error },
    Decode { path: PathBuf, source: image::ImageError },
    Encode(image::ImageError),
    Unsupported(PathBuf),
    File(FileError),
    Read(ReadError),
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::Io { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            MediaError::Decode { path, source } => {
                write!(f, "Failed to decode {}: {}", path.display(), source)
            }
            MediaError::Encode(e) => write!(f, "Failed to encode PNG: {}", e),
            MediaError::Unsupported(path) => {
                write!(f, "Unsupported image format: {}", path.display())
            }
            MediaError::File(e) => write!(f, "{}", e),
            MediaError::Read(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for MediaError {}

impl From<FileError> for MediaError {
    fn from(err: FileError) -> MediaError {
        MediaError::File(err)
    }
}

impl From<ReadError> for MediaError {
    fn from(err: ReadError) -> MediaError {
        MediaError::Read(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

/// Reads an image from disk. PNG and JPEG are passed through as-is; TIFF is
/// decoded and re-encoded as PNG since browsers do not display it.
pub fn load_image(path: &Path) -> Result<EncodedImage, MediaError> {
    let bytes = fs::read(path).map_err(|source| MediaError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let format = image::guess_format(&bytes).map_err(|source| MediaError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Loaded {} ({:?}, {} bytes)", path.display(), format, bytes.len());

    match format {
        ImageFormat::Png => Ok(EncodedImage {
            mime: "image/png",
            bytes,
        }),
        ImageFormat::Jpeg => Ok(EncodedImage {
            mime: "image/jpeg",
            bytes,
        }),
        ImageFormat::Tiff => {
            let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Tiff)
                .map_err(|source| MediaError::Decode {
                    path: path.to_path_buf(),
                    source,
                })?;
            encode_png(&decoded)
        }
        _ => Err(MediaError::Unsupported(path.to_path_buf())),
    }
}

/// Renders a raster already scaled to `[0, 255]` as a grayscale PNG.
/// Non-finite cells are drawn black.
pub fn render_grayscale(raster: &Raster) -> Result<EncodedImage, MediaError> {
    let pixels: Vec<u8> = raster
        .buffer
        .iter()
        .map(|&v| if v.is_finite() { v.round().clamp(0.0, 255.0) as u8 } else { 0 })
        .collect();

    let gray = GrayImage::from_raw(raster.width, raster.height, pixels).ok_or(
        MediaError::Read(ReadError::Shape {
            expected: raster.width as usize * raster.height as usize,
            found: raster.buffer.len(),
        }),
    )?;

    encode_png(&image::DynamicImage::ImageLuma8(gray))
}

/// Reads a raw Sigma0 band, keeps every `stride`-th pixel, normalizes it for
/// display and renders it. Returns `None` when the band file is absent.
pub fn sigma0_preview(path: &Path, stride: u32) -> Result<Option<EncodedImage>, MediaError> {
    if !path.exists() {
        debug!("No Sigma0 band at {}", path.display());
        return Ok(None);
    }

    let raster = readers::create_reader(path)?.read_raster()?;
    let normalized = normalize(raster.downsample(stride), 0.0, 255.0);

    render_grayscale(&normalized).map(Some)
}

fn encode_png(image: &image::DynamicImage) -> Result<EncodedImage, MediaError> {
    let mut cursor = Cursor::new(Vec::new());
    image
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(MediaError::Encode)?;

    Ok(EncodedImage {
        mime: "image/png",
        bytes: cursor.into_inner(),
    })
}
