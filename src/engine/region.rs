//! Header/footer band and pagination filtering.

use super::text::is_pagination;
use crate::model::{Line, Page};

/// Where a line sits with respect to the running header/footer regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Main content area
    Body,
    /// Inside the top or bottom margin band
    Margin,
    /// A "Page N of M" stamp
    Pagination,
}

impl Region {
    /// Check if the line takes part in heading detection.
    pub fn is_body(&self) -> bool {
        matches!(self, Region::Body)
    }
}

/// Page-local filter for running headers, footers and page stamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionFilter {
    top: f32,
    bottom: f32,
}

impl RegionFilter {
    /// Build the filter for one page.
    pub fn for_page(page: &Page, margin_fraction: f32) -> Self {
        let band = page.height * margin_fraction;
        Self {
            top: band,
            bottom: page.height - band,
        }
    }

    /// Classify a line; `text` is the line's joined text.
    pub fn classify(&self, line: &Line, text: &str) -> Region {
        let y_mid = line.y_mid();
        if y_mid < self.top || y_mid > self.bottom {
            Region::Margin
        } else if is_pagination(text) {
            Region::Pagination
        } else {
            Region::Body
        }
    }
}
