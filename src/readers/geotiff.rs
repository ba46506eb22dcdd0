use super::{Raster, RasterReader, ReadError};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tiff::decoder::{Decoder, DecodingResult};

pub struct GeoTiffReader {
    pub path: PathBuf,
}

impl RasterReader for GeoTiffReader {
    fn read_raster(&self) -> Result<Raster, ReadError> {
        let file = File::open(&self.path).map_err(|e| {
            ReadError::GeoTiff(format!("Failed to open {}: {}", self.path.display(), e))
        })?;

        let reader = BufReader::new(file);

        let mut decoder = Decoder::new(reader)
            .map_err(|e| ReadError::GeoTiff(format!("Failed to decode TIFF: {}", e)))?;

        let (width, height) = decoder
            .dimensions()
            .map_err(|e| ReadError::GeoTiff(format!("Failed to get dimensions: {}", e)))?;

        let buffer: Vec<f32> = match decoder
            .read_image()
            .map_err(|e| ReadError::GeoTiff(format!("Failed to read image: {}", e)))?
        {
            DecodingResult::U8(data) => data.iter().map(|&x| x as f32).collect(),
            DecodingResult::U16(data) => data.iter().map(|&x| x as f32).collect(),
            DecodingResult::U32(data) => data.iter().map(|&x| x as f32).collect(),
            DecodingResult::I8(data) => data.iter().map(|&x| x as f32).collect(),
            DecodingResult::I16(data) => data.iter().map(|&x| x as f32).collect(),
            DecodingResult::I32(data) => data.iter().map(|&x| x as f32).collect(),
            DecodingResult::F16(data) => data.iter().map(|x| x.to_f32()).collect(),
            DecodingResult::F32(data) => data,
            DecodingResult::F64(data) => data.iter().map(|&x| x as f32).collect(),
            _ => return Err(ReadError::GeoTiff("Unsupported pixel format".to_string())),
        };

        // Multi-band files decode interleaved; only single-band rasters are accepted.
        Raster::new(width, height, buffer)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::readers::create_reader;
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;
    use tempfile::tempdir;
    use tiff::encoder::{TiffEncoder, colortype};

    fn ifd_entry(bytes: &mut Vec<u8>, tag: u16, value: u32) {
        let is_long = matches!(tag, 273 | 279);
        bytes.extend_from_slice(&tag.to_le_bytes());
        bytes.extend_from_slice(&(if is_long { 4u16 } else { 3u16 }).to_le_bytes());
        bytes.extend_from_slice(&1u32.to_le_bytes());
        if is_long {
            bytes.extend_from_slice(&value.to_le_bytes());
        } else {
            bytes.extend_from_slice(&(value as u16).to_le_bytes());
            bytes.extend_from_slice(&[0, 0]);
        }
    }

    /// Writes an uncompressed single-strip little-endian TIFF with 16-bit
    /// IEEE float samples. `samples` are raw half-precision bit patterns.
    pub(crate) fn write_float16_tiff(path: &Path, width: u32, height: u32, samples: &[u16]) {
        const ENTRIES: u16 = 10;
        let data_offset: u32 = 8 + 2 + ENTRIES as u32 * 12 + 4;

        let mut bytes: Vec<u8> = Vec::new();
        bytes.extend_from_slice(b"II");
        bytes.extend_from_slice(&42u16.to_le_bytes());
        bytes.extend_from_slice(&8u32.to_le_bytes());
        bytes.extend_from_slice(&ENTRIES.to_le_bytes());

        // Tags in ascending order: width, length, bits per sample, no
        // compression, BlackIsZero, strip offset, one sample per pixel,
        // rows per strip, strip byte count, IEEE float sample format.
        for (tag, value) in [
            (256, width),
            (257, height),
            (258, 16),
            (259, 1),
            (262, 1),
            (273, data_offset),
            (277, 1),
            (278, height),
            (279, samples.len() as u32 * 2),
            (339, 3),
        ] {
            ifd_entry(&mut bytes, tag, value);
        }

        bytes.extend_from_slice(&0u32.to_le_bytes());
        assert_eq!(bytes.len() as u32, data_offset);
        for sample in samples {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }

        File::create(path).unwrap().write_all(&bytes).unwrap();
    }

    #[test]
    fn test_read_float_tiff() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Sigma0_HH.tif");

        let values: Vec<f32> = vec![-20.5, -18.0, f32::NAN, -12.25, -30.0, -5.0];
        let file = File::create(&path).unwrap();
        let mut encoder = TiffEncoder::new(file).unwrap();
        encoder
            .write_image::<colortype::Gray32Float>(3, 2, &values)
            .unwrap();

        let raster = create_reader(&path).unwrap().read_raster().unwrap();

        assert_eq!(raster.width, 3);
        assert_eq!(raster.height, 2);
        assert_eq!(raster.buffer[0], -20.5);
        assert_eq!(raster.buffer[5], -5.0);
        assert!(raster.buffer[2].is_nan());
    }

    #[test]
    fn test_read_float16_tiff() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Sigma0_HH_NERSC_db_float16.tif");
        // 1.0, 2.0, -1.0, 0.5
        write_float16_tiff(&path, 2, 2, &[0x3C00, 0x4000, 0xBC00, 0x3800]);

        let raster = create_reader(&path).unwrap().read_raster().unwrap();

        assert_eq!((raster.width, raster.height), (2, 2));
        assert_eq!(raster.buffer, vec![1.0, 2.0, -1.0, 0.5]);
    }

    #[test]
    fn test_read_u8_tiff() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("labels.tif");

        let file = File::create(&path).unwrap();
        let mut encoder = TiffEncoder::new(file).unwrap();
        encoder
            .write_image::<colortype::Gray8>(2, 2, &[0u8, 1, 2, 1])
            .unwrap();

        let raster = GeoTiffReader { path }.read_raster().unwrap();
        assert_eq!(raster.buffer, vec![0.0, 1.0, 2.0, 1.0]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let reader = GeoTiffReader {
            path: dir.path().join("absent.tif"),
        };
        assert!(matches!(reader.read_raster(), Err(ReadError::GeoTiff(_))));
    }
}
