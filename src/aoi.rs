use std::fmt;
use std::path::{Path, PathBuf};

/// Areas of interest covered by the classification pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aoi {
    FramStrait,
    BarentsSea,
}

impl Aoi {
    pub const ALL: [Aoi; 2] = [Aoi::FramStrait, Aoi::BarentsSea];

    /// Text shown in the area selector.
    pub fn label(&self) -> &'static str {
        match self {
            Aoi::FramStrait => "[1] - Fram Strait",
            Aoi::BarentsSea => "[2] - Barents Sea",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Aoi::FramStrait => "Fram Strait",
            Aoi::BarentsSea => "Barents Sea",
        }
    }

    /// Results subdirectory below the data directory.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Aoi::FramStrait => "Fram_Strait",
            Aoi::BarentsSea => "Barents_Sea",
        }
    }

    pub fn results_dir(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.dir_name())
    }

    pub fn from_label(label: &str) -> Option<Aoi> {
        Aoi::ALL.into_iter().find(|aoi| aoi.label() == label)
    }
}

impl fmt::Display for Aoi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_roundtrips_every_area() {
        for aoi in Aoi::ALL {
            assert_eq!(Aoi::from_label(aoi.label()), Some(aoi));
        }
    }

    #[test]
    fn test_unknown_label() {
        assert_eq!(Aoi::from_label("-"), None);
        assert_eq!(Aoi::from_label("Barents Sea"), None);
    }

    #[test]
    fn test_display_is_area_name() {
        assert_eq!(Aoi::FramStrait.to_string(), "Fram Strait");
        assert_eq!(format!("{}", Aoi::BarentsSea), "Barents Sea");
    }

    #[test]
    fn test_results_dir() {
        let dir = Aoi::BarentsSea.results_dir(Path::new("/data/image_database"));
        assert_eq!(dir, PathBuf::from("/data/image_database/Barents_Sea"));
    }
}
