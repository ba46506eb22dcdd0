use serde::Deserialize;
use serde::Deserializer;
use serde::de::Error;

use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub mod error;
pub use error::ConfigError;

pub const DEFAULT_DATA_DIR: &str = "./image_database";
pub const DEFAULT_ADDRESS: &str = "0.0.0.0:8501";
pub const DEFAULT_OVERVIEW_IMAGE: &str = "overview_AOIs.png";
pub const DEFAULT_INTENSITIES_IMAGE: &str = "S1_intensities_on_map.png";
pub const DEFAULT_CLASSIFICATION_IMAGE: &str = "classification_result_on_map.png";
pub const DEFAULT_HH_BAND: &str = "Sigma0_HH_NERSC_db_float16.tif";
pub const DEFAULT_HV_BAND: &str = "Sigma0_HV_NERSC_db_float16.tif";
pub const DEFAULT_STRIDE: u32 = 4;

/// Raw Sigma0 bands shown next to the rendered maps when configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sigma0Preview {
    pub hh: String,
    pub hv: String,
    pub stride: u32,
}

impl Default for Sigma0Preview {
    fn default() -> Self {
        Self {
            hh: DEFAULT_HH_BAND.to_string(),
            hv: DEFAULT_HV_BAND.to_string(),
            stride: DEFAULT_STRIDE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    data_dir: PathBuf,
    address: SocketAddr,
    overview_image: String,
    intensities_image: String,
    classification_image: String,
    sigma0_preview: Option<Sigma0Preview>,
}

fn check_file_name(name: &str) -> Result<(), ConfigError> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(std::path::Component::Normal(_)), None) => Ok(()),
        _ => Err(ConfigError::InvalidFileName(name.to_string())),
    }
}

fn parse_address(address: &str) -> Result<SocketAddr, ConfigError> {
    address
        .parse()
        .map_err(|_| ConfigError::InvalidAddress(address.to_string()))
}

// Deserializes a Config, filling in defaults and checking that the image names
// are plain file names, the address parses and the preview stride is usable.
impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct ConfigHelper {
            data_dir: String,
            address: Option<String>,
            overview_image: Option<String>,
            intensities_image: Option<String>,
            classification_image: Option<String>,
            sigma0_preview: Option<PreviewHelper>,
        }

        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct PreviewHelper {
            hh: Option<String>,
            hv: Option<String>,
            stride: Option<u32>,
        }

        let helper = ConfigHelper::deserialize(deserializer)?;

        if helper.data_dir.trim().is_empty() {
            return Err(D::Error::custom(ConfigError::DataDir));
        }

        let address = parse_address(helper.address.as_deref().unwrap_or(DEFAULT_ADDRESS))
            .map_err(D::Error::custom)?;

        let overview_image = helper
            .overview_image
            .unwrap_or_else(|| DEFAULT_OVERVIEW_IMAGE.to_string());
        let intensities_image = helper
            .intensities_image
            .unwrap_or_else(|| DEFAULT_INTENSITIES_IMAGE.to_string());
        let classification_image = helper
            .classification_image
            .unwrap_or_else(|| DEFAULT_CLASSIFICATION_IMAGE.to_string());

        for name in [&overview_image, &intensities_image, &classification_image] {
            check_file_name(name).map_err(D::Error::custom)?;
        }

        let sigma0_preview = match helper.sigma0_preview {
            Some(preview) => {
                let defaults = Sigma0Preview::default();
                let preview = Sigma0Preview {
                    hh: preview.hh.unwrap_or(defaults.hh),
                    hv: preview.hv.unwrap_or(defaults.hv),
                    stride: preview.stride.unwrap_or(defaults.stride),
                };

                if preview.stride == 0 {
                    return Err(D::Error::custom(ConfigError::Stride));
                }
                check_file_name(&preview.hh).map_err(D::Error::custom)?;
                check_file_name(&preview.hv).map_err(D::Error::custom)?;

                Some(preview)
            }
            None => None,
        };

        Ok(Config {
            data_dir: PathBuf::from(helper.data_dir),
            address,
            overview_image,
            intensities_image,
            classification_image,
            sigma0_preview,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

impl Config {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            address: SocketAddr::from(([0, 0, 0, 0], 8501)),
            overview_image: DEFAULT_OVERVIEW_IMAGE.to_string(),
            intensities_image: DEFAULT_INTENSITIES_IMAGE.to_string(),
            classification_image: DEFAULT_CLASSIFICATION_IMAGE.to_string(),
            sigma0_preview: None,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let config: Config = serde_json::from_reader(reader).map_err(ConfigError::from)?;

        Ok(config)
    }

    pub fn with_data_dir<P: AsRef<Path>>(mut self, data_dir: P) -> Self {
        self.data_dir = data_dir.as_ref().to_path_buf();
        self
    }

    pub fn with_address(mut self, address: &str) -> Result<Self, ConfigError> {
        self.address = parse_address(address)?;
        Ok(self)
    }

    pub fn with_sigma0_preview(mut self, preview: Option<Sigma0Preview>) -> Self {
        self.sigma0_preview = preview;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }

    pub fn overview_path(&self) -> PathBuf {
        self.data_dir.join(&self.overview_image)
    }

    pub fn intensities_image(&self) -> &str {
        &self.intensities_image
    }

    pub fn classification_image(&self) -> &str {
        &self.classification_image
    }

    pub fn sigma0_preview(&self) -> Option<&Sigma0Preview> {
        self.sigma0_preview.as_ref()
    }
}
