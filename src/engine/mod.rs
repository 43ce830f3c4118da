//! Outline inference engine.
//!
//! Generation runs in two phases. Font statistics are gathered over the
//! whole document first, because heading tiers are global. Pages are then
//! classified independently (in parallel when enabled) and the resulting
//! candidates are normalized and deduplicated in one sequential pass.

mod aggregate;
mod builder;
mod classify;
mod fallback;
mod native;
mod normalize;
mod options;
mod page;
mod region;
mod stats;
mod text;

use std::collections::HashSet;

use rayon::prelude::*;

pub use aggregate::{HeadingCandidate, LineAggregator};
pub use builder::OutlineBuilder;
pub use classify::HeadingClassifier;
pub use fallback::FallbackTracker;
pub use native::sanitize as sanitize_native_outline;
pub use normalize::{demote_siblings, sort_candidates};
pub use options::{DemotionCeiling, NativeOutlinePolicy, OutlineOptions};
pub use page::{PageScan, PageScanner};
pub use region::{Region, RegionFilter};
pub use stats::{FontStatistics, SizeLadder};
pub use text::{is_pagination, normalize_title, quantize};

use crate::error::Result;
use crate::model::{
    LayoutDocument, LayoutSource, OutlineResult, OutlineSource, OutlineStats, Page, PageLayout,
};

/// Outline generator over layout documents.
///
/// Holds only validated options; every call is independent, so one engine
/// can serve many documents, including from several threads.
#[derive(Debug, Clone, Default)]
pub struct OutlineEngine {
    options: OutlineOptions,
}

impl OutlineEngine {
    /// Create an engine. Fails with [`crate::Error::InvalidConfiguration`]
    /// when an option is out of range.
    pub fn new(options: OutlineOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Get the engine options.
    pub fn options(&self) -> &OutlineOptions {
        &self.options
    }

    /// Produce an outline, preferring the document's native outline when
    /// the policy allows it and the outline survives sanitizing.
    pub fn resolve(&self, doc: &LayoutDocument) -> OutlineResult {
        if self.options.native_outline == NativeOutlinePolicy::PreferNative {
            if let Some(outline) = doc.native_outline.as_deref() {
                match native::sanitize(
                    outline,
                    doc.page_count,
                    self.options.max_levels,
                    self.options.normalize_titles,
                ) {
                    Some(entries) => {
                        log::debug!("Using native outline with {} entries", entries.len());
                        return OutlineResult::new(
                            entries,
                            OutlineSource::Native,
                            OutlineStats::default(),
                        );
                    }
                    None => {
                        log::warn!("Native outline has no usable entries, inferring instead");
                    }
                }
            }
        }
        self.generate(doc)
    }

    /// Collect a source's pages and resolve its outline.
    pub fn resolve_source<S: LayoutSource + ?Sized>(&self, source: &S) -> OutlineResult {
        self.resolve(&LayoutDocument::from_source(source))
    }

    /// Infer an outline from text layout alone.
    pub fn generate(&self, doc: &LayoutDocument) -> OutlineResult {
        let mut stats = OutlineStats::default();
        let pages = self.usable_pages(doc, &mut stats);

        // Phase A: document-wide statistics
        let Some(font_stats) = FontStatistics::analyze(pages.iter().copied(), &self.options)
        else {
            log::debug!("No alphabetic text in document, outline is empty");
            return OutlineResult::new(Vec::new(), OutlineSource::Inferred, stats);
        };
        stats.body_size = Some(font_stats.body_size);
        stats.body_color = font_stats.body_color;
        stats.heading_sizes = font_stats.ladder.sizes().to_vec();

        // Phase B: independent per-page classification
        let classifier = HeadingClassifier::new(&font_stats, &self.options);
        let scanner = PageScanner::new(classifier, &self.options);
        let scans: Vec<PageScan> = if self.options.parallel {
            pages.par_iter().map(|page| scanner.scan(page)).collect()
        } else {
            pages.iter().map(|page| scanner.scan(page)).collect()
        };

        stats.pages_scanned = scans.len() as u32;
        let mut candidates = Vec::new();
        for scan in scans {
            stats.lines_malformed += scan.lines_malformed;
            stats.lines_filtered += scan.lines_filtered;
            if scan.used_fallback {
                stats.fallback_headings += 1;
            }
            candidates.extend(scan.candidates);
        }

        // Barrier: normalization needs every page
        sort_candidates(&mut candidates);
        stats.demoted = demote_siblings(&mut candidates, self.demotion_ceiling(&font_stats));

        let mut builder = OutlineBuilder::new(doc.page_count, self.options.max_levels);
        builder.extend(&candidates);
        stats.duplicates_dropped = builder.duplicates();
        let entries = builder.build();

        log::debug!(
            "Outline: {} entries from {} pages ({} fallback, {} demoted)",
            entries.len(),
            stats.pages_scanned,
            stats.fallback_headings,
            stats.demoted
        );

        OutlineResult::new(entries, OutlineSource::Inferred, stats)
    }

    /// Compute font statistics only.
    pub fn analyze(&self, doc: &LayoutDocument) -> Option<FontStatistics> {
        let mut stats = OutlineStats::default();
        let pages = self.usable_pages(doc, &mut stats);
        FontStatistics::analyze(pages, &self.options)
    }

    fn demotion_ceiling(&self, font_stats: &FontStatistics) -> u8 {
        match self.options.demotion_ceiling {
            DemotionCeiling::MaxLevels => self.options.max_levels,
            DemotionCeiling::Ladder => font_stats.ladder.deepest().min(self.options.max_levels),
        }
    }

    /// Pages that take part in generation, in input order.
    ///
    /// Failed pages, pages past the page count, pages without a usable
    /// height and repeated page indexes are counted and left out.
    fn usable_pages<'d>(&self, doc: &'d LayoutDocument, stats: &mut OutlineStats) -> Vec<&'d Page> {
        let mut seen = HashSet::new();
        let mut pages = Vec::with_capacity(doc.pages.len());

        for record in &doc.pages {
            let page = match record {
                PageLayout::Extracted(page) => page,
                PageLayout::Failed(failure) => {
                    log::debug!(
                        "Page {} has no layout: {}",
                        failure.index + 1,
                        failure.reason
                    );
                    stats.pages_failed += 1;
                    continue;
                }
            };

            if page.index >= doc.page_count {
                log::warn!(
                    "Skipping page {}: document has {} pages",
                    page.index + 1,
                    doc.page_count
                );
                stats.pages_skipped += 1;
            } else if !page.is_usable() {
                log::warn!(
                    "Skipping page {}: invalid height {}",
                    page.index + 1,
                    page.height
                );
                stats.pages_skipped += 1;
            } else if !seen.insert(page.index) {
                log::warn!("Skipping repeated page {}", page.index + 1);
                stats.pages_skipped += 1;
            } else {
                pages.push(page);
            }
        }

        pages
    }
}
