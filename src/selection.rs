use log::warn;
use url::form_urlencoded;

use crate::aoi::Aoi;
use crate::date_gen::{DayGenerator, DayOption};

/// Selector value meaning "nothing chosen yet".
pub const PLACEHOLDER: &str = "-";

pub const AREA_PARAM: &str = "area";
pub const DAY_PARAM: &str = "day";

/// Widget state for one page render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub area: Option<Aoi>,
    pub day: Option<DayOption>,
}

impl Selection {
    /// Reads `area` and `day` from a URL query string. Missing, placeholder,
    /// unknown or out-of-window values all leave the field unset.
    pub fn from_query(query: &str, days: &DayGenerator) -> Self {
        let mut selection = Selection::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value == PLACEHOLDER || value.is_empty() {
                continue;
            }

            match &*key {
                AREA_PARAM => {
                    selection.area = Aoi::from_label(&value);
                    if selection.area.is_none() {
                        warn!("Ignoring unknown area of interest {:?}", value);
                    }
                }
                DAY_PARAM => {
                    selection.day = days.find_by_label(&value);
                    if selection.day.is_none() {
                        warn!("Ignoring day {:?} outside the selectable window", value);
                    }
                }
                _ => {}
            }
        }

        selection
    }

    /// Both gates open: an area and a day have been chosen.
    pub fn complete(&self) -> Option<(Aoi, DayOption)> {
        Some((self.area?, self.day?))
    }
}
