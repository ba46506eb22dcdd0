use std::fmt;

pub trait RasterReader {
    fn read_raster(&self) -> Result<Raster, ReadError>;
}

#[derive(Debug)]
pub enum ReadError {
    GeoTiff(String),
    Shape { expected: usize, found: usize },
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::GeoTiff(e) => write!(f, "GeoTIFF error: {}", e),
            ReadError::Shape { expected, found } => write!(
                f,
                "raster buffer holds {} values, dimensions require {}",
                found, expected
            ),
        }
    }
}

impl std::error::Error for ReadError {}

#[derive(Debug)]
pub enum FileError {
    UnknownFileType(String),
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::UnknownFileType(path) => write!(f, "no raster reader for {}", path),
        }
    }
}

impl std::error::Error for FileError {}

/// A single-band 2-D raster, stored row-major. Missing values are `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub buffer: Vec<f32>,
}

pub enum FileType {
    GeoTiff,
}

impl Raster {
    pub fn new(width: u32, height: u32, buffer: Vec<f32>) -> Result<Self, ReadError> {
        let expected = width as usize * height as usize;
        if buffer.len() != expected {
            return Err(ReadError::Shape {
                expected,
                found: buffer.len(),
            });
        }

        Ok(Raster {
            width,
            height,
            buffer,
        })
    }

    /// Keeps every `stride`-th pixel along both axes, starting at (0, 0).
    pub fn downsample(&self, stride: u32) -> Raster {
        if stride <= 1 {
            return self.clone();
        }

        let width = self.width.div_ceil(stride);
        let height = self.height.div_ceil(stride);
        let mut buffer = Vec::with_capacity(width as usize * height as usize);

        for y in (0..self.height).step_by(stride as usize) {
            let row = y as usize * self.width as usize;
            for x in (0..self.width).step_by(stride as usize) {
                buffer.push(self.buffer[row + x as usize]);
            }
        }

        Raster {
            width,
            height,
            buffer,
        }
    }
}
