//! Final outline assembly.

use std::collections::HashSet;

use super::aggregate::HeadingCandidate;
use crate::model::OutlineEntry;

/// Collects outline entries, dropping exact duplicates and anything that
/// falls outside the document's page or level range.
#[derive(Debug)]
pub struct OutlineBuilder {
    page_count: u32,
    max_levels: u8,
    entries: Vec<OutlineEntry>,
    seen: HashSet<(u32, u8, String)>,
    duplicates: u32,
}

impl OutlineBuilder {
    /// Create a builder for a document of `page_count` pages.
    pub fn new(page_count: u32, max_levels: u8) -> Self {
        Self {
            page_count,
            max_levels,
            entries: Vec::new(),
            seen: HashSet::new(),
            duplicates: 0,
        }
    }

    /// Append one entry. Returns `false` when it was dropped.
    pub fn push(&mut self, level: u8, title: &str, page: u32) -> bool {
        if page == 0 || page > self.page_count {
            log::debug!("Dropping \"{}\": page {} out of range", title, page);
            return false;
        }
        if level == 0 || level > self.max_levels {
            log::debug!("Dropping \"{}\": level {} out of range", title, level);
            return false;
        }
        if !self.seen.insert((page, level, title.to_string())) {
            self.duplicates += 1;
            return false;
        }
        self.entries.push(OutlineEntry::new(level, title, page));
        true
    }

    /// Append candidates in order.
    pub fn extend<'a, I>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = &'a HeadingCandidate>,
    {
        for candidate in candidates {
            self.push(candidate.level, &candidate.title, candidate.page);
        }
    }

    /// Number of duplicates dropped so far.
    pub fn duplicates(&self) -> u32 {
        self.duplicates
    }

    /// Finish and return the entries.
    pub fn build(self) -> Vec<OutlineEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_exact_key() {
        let mut builder = OutlineBuilder::new(5, 3);
        assert!(builder.push(1, "Introduction", 1));
        assert!(!builder.push(1, "Introduction", 1));
        // Different level or page is a different key
        assert!(builder.push(2, "Introduction", 1));
        assert!(builder.push(1, "Introduction", 2));
        // No fuzzy matching
        assert!(builder.push(1, "introduction", 1));

        assert_eq!(builder.duplicates(), 1);
        assert_eq!(builder.build().len(), 4);
    }

    #[test]
    fn test_out_of_range_dropped() {
        let mut builder = OutlineBuilder::new(2, 3);
        assert!(!builder.push(1, "Ghost", 3));
        assert!(!builder.push(1, "Zero", 0));
        assert!(!builder.push(4, "Too Deep", 1));
        assert!(!builder.push(0, "Too Shallow", 1));
        assert!(builder.build().is_empty());
    }

    #[test]
    fn test_extend_keeps_order() {
        let candidates = vec![
            HeadingCandidate {
                level: 1,
                title: "A".to_string(),
                page: 1,
                y_mid: 10.0,
            },
            HeadingCandidate {
                level: 2,
                title: "B".to_string(),
                page: 2,
                y_mid: 10.0,
            },
        ];
        let mut builder = OutlineBuilder::new(2, 3);
        builder.extend(&candidates);
        let entries = builder.build();
        assert_eq!(entries[0].as_triple(), (1, "A", 1));
        assert_eq!(entries[1].as_triple(), (2, "B", 2));
    }
}
