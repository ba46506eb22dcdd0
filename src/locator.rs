use glob::{GlobError, MatchOptions, Pattern, PatternError, glob_with};
use log::info;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::aoi::Aoi;

#[derive(Debug)]
pub enum LocateError {
    Pattern(PatternError),
    Glob(GlobError),
}

impl fmt::Display for LocateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocateError::Pattern(e) => write!(f, "Invalid search pattern: {}", e),
            LocateError::Glob(e) => write!(f, "Failed to read directory entry: {}", e),
        }
    }
}

impl std::error::Error for LocateError {}

impl From<PatternError> for LocateError {
    fn from(err: PatternError) -> LocateError {
        LocateError::Pattern(err)
    }
}

impl From<GlobError> for LocateError {
    fn from(err: GlobError) -> LocateError {
        LocateError::Glob(err)
    }
}

/// One Sentinel-1 pass with its directory of rendered results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub path: PathBuf,
    pub basename: String,
}

impl Product {
    pub fn from_path(path: PathBuf) -> Self {
        let basename = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();
        Product { path, basename }
    }
}

pub struct ResultLocator {
    data_dir: PathBuf,
}

impl ResultLocator {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// Glob pattern matching every entry of `dir` whose name contains `stamp`.
    /// The directory part is escaped so it is matched literally.
    pub fn pattern_for(dir: &Path, stamp: &str) -> String {
        let escaped_dir = Pattern::escape(&dir.to_string_lossy());
        let escaped_stamp = Pattern::escape(stamp);
        format!("{}/*{}*", escaped_dir.trim_end_matches('/'), escaped_stamp)
    }

    /// All products of `area` whose name contains the 8-digit `stamp`.
    /// No match is an empty list, not an error. Order follows the glob
    /// crate, which is alphabetical. Hidden entries (leading `.`) are never
    /// matched.
    pub fn locate(&self, area: Aoi, stamp: &str) -> Result<Vec<Product>, LocateError> {
        let pattern = Self::pattern_for(&area.results_dir(&self.data_dir), stamp);
        let options = MatchOptions {
            require_literal_leading_dot: true,
            ..MatchOptions::new()
        };

        let paths = glob_with(&pattern, options)?.collect::<Result<Vec<_>, _>>()?;
        info!("Found {} products matching {}", paths.len(), pattern);

        Ok(paths.into_iter().map(Product::from_path).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn make_dirs(root: &Path, area: Aoi, names: &[&str]) {
        let area_dir = area.results_dir(root);
        for name in names {
            fs::create_dir_all(area_dir.join(name)).unwrap();
        }
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let dir = tempdir().unwrap();
        make_dirs(dir.path(), Aoi::BarentsSea, &["X_20240101"]);

        let products = ResultLocator::new(dir.path())
            .locate(Aoi::BarentsSea, "19000101")
            .unwrap();
        assert!(products.is_empty());
    }

    #[test]
    fn test_missing_area_directory_is_empty() {
        let dir = tempdir().unwrap();
        let products = ResultLocator::new(dir.path())
            .locate(Aoi::FramStrait, "20240101")
            .unwrap();
        assert!(products.is_empty());
    }

    #[test]
    fn test_matches_date_substring_regardless_of_prefix() {
        let dir = tempdir().unwrap();
        make_dirs(
            dir.path(),
            Aoi::BarentsSea,
            &["X_20240101", "Y_20240102", "S1A_EW_GRDM_1SDH_20240101T071253"],
        );

        let products = ResultLocator::new(dir.path())
            .locate(Aoi::BarentsSea, "20240101")
            .unwrap();

        let mut names: Vec<&str> = products.iter().map(|p| p.basename.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["S1A_EW_GRDM_1SDH_20240101T071253", "X_20240101"]);
    }

    #[test]
    fn test_hidden_entries_are_skipped() {
        let dir = tempdir().unwrap();
        make_dirs(
            dir.path(),
            Aoi::BarentsSea,
            &[".partial_S1A_20240101", "S1A_20240101T0500"],
        );

        let products = ResultLocator::new(dir.path())
            .locate(Aoi::BarentsSea, "20240101")
            .unwrap();

        let names: Vec<&str> = products.iter().map(|p| p.basename.as_str()).collect();
        assert_eq!(names, vec!["S1A_20240101T0500"]);
    }

    #[test]
    fn test_areas_do_not_leak_into_each_other() {
        let dir = tempdir().unwrap();
        make_dirs(dir.path(), Aoi::FramStrait, &["F_20240101"]);
        make_dirs(dir.path(), Aoi::BarentsSea, &["B_20240101"]);

        let products = ResultLocator::new(dir.path())
            .locate(Aoi::FramStrait, "20240101")
            .unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].basename, "F_20240101");
        assert_eq!(
            products[0].path,
            dir.path().join("Fram_Strait").join("F_20240101")
        );
    }

    #[test]
    fn test_data_dir_with_glob_characters_is_literal() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("db[1]");
        make_dirs(&root, Aoi::BarentsSea, &["X_20240101"]);

        let products = ResultLocator::new(&root)
            .locate(Aoi::BarentsSea, "20240101")
            .unwrap();
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn test_basename_is_file_stem() {
        let product = Product::from_path(PathBuf::from("/data/Barents_Sea/S1B_20201201.SAFE"));
        assert_eq!(product.basename, "S1B_20201201");
    }
}
