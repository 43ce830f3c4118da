//! Single-page classification pass.
//!
//! Depends only on the page's own lines and the read-only document
//! statistics, so pages can be scanned in any order or concurrently.

use super::aggregate::{HeadingCandidate, LineAggregator};
use super::classify::HeadingClassifier;
use super::fallback::FallbackTracker;
use super::options::OutlineOptions;
use super::region::RegionFilter;
use super::text::has_alphabetic;
use crate::model::Page;

/// Output of scanning one page.
#[derive(Debug, Clone, Default)]
pub struct PageScan {
    /// Heading candidates in reading order
    pub candidates: Vec<HeadingCandidate>,
    /// Lines skipped for missing bounding box or run data
    pub lines_malformed: u32,
    /// Lines in the margin bands or matching the pagination pattern
    pub lines_filtered: u32,
    /// Whether the candidate came from the per-page fallback
    pub used_fallback: bool,
}

/// Scans pages against fixed document statistics.
#[derive(Debug, Clone, Copy)]
pub struct PageScanner<'a> {
    classifier: HeadingClassifier<'a>,
    options: &'a OutlineOptions,
}

impl<'a> PageScanner<'a> {
    /// Create a scanner.
    pub fn new(classifier: HeadingClassifier<'a>, options: &'a OutlineOptions) -> Self {
        Self {
            classifier,
            options,
        }
    }

    /// Classify, merge and, if needed, fall back on one page.
    pub fn scan(&self, page: &Page) -> PageScan {
        let page_number = page.index + 1;
        let filter = RegionFilter::for_page(page, self.options.header_footer_margin_fraction);
        let mut aggregator = LineAggregator::new(page_number, self.options.normalize_titles);
        let mut fallback = FallbackTracker::new();
        let mut scan = PageScan::default();

        for line in page.lines() {
            if !line.is_usable() {
                log::debug!("Page {}: skipping malformed line {:?}", page_number, line.bbox);
                scan.lines_malformed += 1;
                continue;
            }

            let text = line.text();
            if !filter.classify(line, &text).is_body() {
                scan.lines_filtered += 1;
                continue;
            }
            if text.is_empty() || !has_alphabetic(&text) {
                aggregator.flush();
                continue;
            }

            let max_size = line.max_size();
            fallback.observe(&text, max_size, line.y_mid());

            match self.classifier.classify(max_size, line.dominant_color()) {
                Some(level) => aggregator.push(level, &text, line.y_mid()),
                None => aggregator.flush(),
            }
        }

        scan.candidates = aggregator.finish();

        if scan.candidates.is_empty() && self.options.force_page_heading {
            if let Some(candidate) =
                fallback.promote(&self.classifier, page_number, self.options.normalize_titles)
            {
                log::debug!(
                    "Page {}: no heading found, promoting \"{}\" at level {}",
                    page_number,
                    candidate.title,
                    candidate.level
                );
                scan.candidates.push(candidate);
                scan.used_fallback = true;
            }
        }

        scan
    }
}
