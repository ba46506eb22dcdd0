pub mod geotiff;
pub mod types;
pub mod utils;

pub use geotiff::GeoTiffReader;
pub use types::{FileError, FileType, Raster, RasterReader, ReadError};
pub use utils::reader_from_filetype;

use std::path::Path;

pub fn create_reader<P: AsRef<Path>>(path: P) -> Result<Box<dyn RasterReader>, FileError> {
    let path = path.as_ref();
    match reader_from_filetype(path) {
        Ok(FileType::GeoTiff) => Ok(Box::new(GeoTiffReader {
            path: path.to_path_buf(),
        })),
        Err(e) => Err(e),
    }
}
