//! Page renderer: turns the current widget state and the filesystem snapshot
//! into an ordered list of page blocks.
//!
//! Every request renders from scratch: the locator rescans the disk and every
//! image is read again. An image that cannot be loaded stops the render; the
//! blocks produced up to that point are kept and an error block is appended.

pub mod html;

use chrono::NaiveDate;
use log::error;

use crate::aoi::Aoi;
use crate::config::Config;
use crate::date_gen::{DayGenerator, DayOption};
use crate::locator::{Product, ResultLocator};
use crate::media::{self, EncodedImage};
use crate::selection::{AREA_PARAM, DAY_PARAM, PLACEHOLDER, Selection};

pub const PAGE_TITLE: &str = "CIRFA demo";
pub const TITLE: &str = "Near-real time automated sea ice mapping";
pub const AOI_HEADER: &str = "Areas of interest";
pub const OVERVIEW_CAPTION: &str = "Overview areas of interest";
pub const AREA_LABEL: &str = "Select area of interest";
pub const DAY_LABEL: &str = "Select day";
pub const RESULTS_HEADER: &str = "Results";
pub const NO_RESULTS: &str = "No Sentinel-1 imagery / results found on this date";
pub const INTENSITIES_CAPTION: &str = "Sentinel-1 backscatter intensities in dB";

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Header(String),
    Subheader(String),
    Text(String),
    Strong(String),
    Select {
        name: &'static str,
        label: &'static str,
        options: Vec<String>,
        selected: String,
    },
    Image {
        image: EncodedImage,
        caption: String,
    },
    Divider,
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub title: String,
    pub blocks: Vec<Block>,
    pub failure: Option<String>,
}

impl Page {
    fn new() -> Self {
        Self {
            title: PAGE_TITLE.to_string(),
            blocks: Vec::new(),
            failure: None,
        }
    }

    fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn is_ok(&self) -> bool {
        self.failure.is_none()
    }

    pub fn images(&self) -> impl Iterator<Item = (&EncodedImage, &str)> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Image { image, caption } => Some((image, caption.as_str())),
            _ => None,
        })
    }
}

pub struct PageRenderer<'a> {
    config: &'a Config,
    days: DayGenerator,
}

impl<'a> PageRenderer<'a> {
    pub fn new(config: &'a Config, today: NaiveDate) -> Self {
        Self {
            config,
            days: DayGenerator::new(today),
        }
    }

    pub fn days(&self) -> &DayGenerator {
        &self.days
    }

    pub fn render(&self, selection: &Selection) -> Page {
        let mut page = Page::new();

        if let Err(e) = self.render_blocks(selection, &mut page) {
            let message = e.to_string();
            error!("Page render stopped: {}", message);
            page.push(Block::Error(message.clone()));
            page.failure = Some(message);
        }

        page
    }

    fn render_blocks(
        &self,
        selection: &Selection,
        page: &mut Page,
    ) -> Result<(), Box<dyn std::error::Error>> {
        page.push(Block::Title(TITLE.to_string()));

        page.push(Block::Header(AOI_HEADER.to_string()));
        push_image(page, media::load_image(&self.config.overview_path())?, OVERVIEW_CAPTION);

        self.push_selectors(selection, page);

        let Some((area, day)) = selection.complete() else {
            return Ok(());
        };

        page.push(Block::Header(RESULTS_HEADER.to_string()));

        let products =
            ResultLocator::new(self.config.data_dir()).locate(area, &day.stamp())?;

        if products.is_empty() {
            page.push(Block::Text(NO_RESULTS.to_string()));
            return Ok(());
        }

        page.push(Block::Subheader(format!(
            "Found {} Sentinel-1 products for {} on {}!",
            products.len(),
            area,
            day.label()
        )));

        for product in &products {
            self.push_product(product, page)?;
        }

        Ok(())
    }

    fn push_selectors(&self, selection: &Selection, page: &mut Page) {
        let area_options = std::iter::once(PLACEHOLDER.to_string())
            .chain(Aoi::ALL.iter().map(|aoi| aoi.label().to_string()))
            .collect();
        page.push(Block::Select {
            name: AREA_PARAM,
            label: AREA_LABEL,
            options: area_options,
            selected: selection
                .area
                .map(|aoi| aoi.label().to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        });

        let day_options = std::iter::once(PLACEHOLDER.to_string())
            .chain(self.days.generate_day_series().iter().map(DayOption::label))
            .collect();
        page.push(Block::Select {
            name: DAY_PARAM,
            label: DAY_LABEL,
            options: day_options,
            selected: selection
                .day
                .map(|day| day.label())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        });
    }

    fn push_product(
        &self,
        product: &Product,
        page: &mut Page,
    ) -> Result<(), Box<dyn std::error::Error>> {
        page.push(Block::Strong(format!("Visualizing {}", product.basename)));

        let intensities = media::load_image(&product.path.join(self.config.intensities_image()))?;
        let classification =
            media::load_image(&product.path.join(self.config.classification_image()))?;

        push_image(page, intensities, INTENSITIES_CAPTION);
        push_image(
            page,
            classification,
            &format!("Classification result for {}", product.basename),
        );

        if let Some(preview) = self.config.sigma0_preview() {
            for (band, caption) in [(&preview.hh, "Sigma0 HH"), (&preview.hv, "Sigma0 HV")] {
                if let Some(image) = media::sigma0_preview(&product.path.join(band), preview.stride)? {
                    push_image(page, image, caption);
                }
            }
        }

        page.push(Block::Divider);

        Ok(())
    }
}

fn push_image(page: &mut Page, image: EncodedImage, caption: &str) {
    page.push(Block::Image {
        image,
        caption: caption.to_string(),
    });
}
