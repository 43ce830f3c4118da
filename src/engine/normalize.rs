//! Structural normalization across a page's headings.
//!
//! A large page title is often followed by section headings set at the same
//! size. The first heading on each page is the anchor; later headings at the
//! anchor's level are pushed one level down.

use super::aggregate::HeadingCandidate;

/// Sort candidates by page, then vertical position.
///
/// The sort is stable, so headings at the same position keep reading order.
pub fn sort_candidates(candidates: &mut [HeadingCandidate]) {
    candidates.sort_by(|a, b| a.page.cmp(&b.page).then(a.y_mid.total_cmp(&b.y_mid)));
}

/// Demote same-level siblings of each page anchor by one level, clamped to
/// `ceiling`. Expects sorted candidates. Returns the number of demotions.
///
/// Runs once: an entry that was demoted is not compared again.
pub fn demote_siblings(candidates: &mut [HeadingCandidate], ceiling: u8) -> u32 {
    let mut demoted = 0;
    let mut start = 0;

    while start < candidates.len() {
        let page = candidates[start].page;
        let end = candidates[start..]
            .iter()
            .position(|c| c.page != page)
            .map_or(candidates.len(), |offset| start + offset);

        let anchor_level = candidates[start].level;
        for candidate in &mut candidates[start + 1..end] {
            if candidate.level == anchor_level {
                let level = anchor_level.saturating_add(1).min(ceiling).max(anchor_level);
                if level != candidate.level {
                    log::debug!(
                        "Page {}: demoting \"{}\" from level {} to {}",
                        page,
                        candidate.title,
                        candidate.level,
                        level
                    );
                    candidate.level = level;
                    demoted += 1;
                }
            }
        }

        start = end;
    }

    demoted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(level: u8, title: &str, page: u32, y_mid: f32) -> HeadingCandidate {
        HeadingCandidate {
            level,
            title: title.to_string(),
            page,
            y_mid,
        }
    }

    #[test]
    fn test_sort_by_page_then_position() {
        let mut candidates = vec![
            candidate(1, "C", 2, 100.0),
            candidate(1, "B", 1, 300.0),
            candidate(1, "A", 1, 100.0),
        ];
        sort_candidates(&mut candidates);
        let titles: Vec<&str> = candidates.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_anchor_siblings_demoted() {
        let mut candidates = vec![
            candidate(1, "System Manual", 1, 100.0),
            candidate(1, "Installation", 1, 300.0),
            candidate(2, "Requirements", 1, 400.0),
            candidate(1, "Operation", 1, 500.0),
        ];
        let demoted = demote_siblings(&mut candidates, 3);

        assert_eq!(demoted, 2);
        let levels: Vec<u8> = candidates.iter().map(|c| c.level).collect();
        assert_eq!(levels, vec![1, 2, 2, 2]);
    }

    #[test]
    fn test_single_pass_only() {
        // Already-demoted entries are not demoted again
        let mut candidates = vec![
            candidate(2, "Title", 1, 100.0),
            candidate(2, "First", 1, 200.0),
            candidate(2, "Second", 1, 300.0),
        ];
        demote_siblings(&mut candidates, 3);
        let levels: Vec<u8> = candidates.iter().map(|c| c.level).collect();
        assert_eq!(levels, vec![2, 3, 3]);
    }

    #[test]
    fn test_pages_are_independent() {
        let mut candidates = vec![
            candidate(1, "One", 1, 100.0),
            candidate(1, "Two", 2, 100.0),
            candidate(1, "Three", 2, 200.0),
        ];
        let demoted = demote_siblings(&mut candidates, 3);
        assert_eq!(demoted, 1);
        assert_eq!(candidates[0].level, 1);
        assert_eq!(candidates[1].level, 1);
        assert_eq!(candidates[2].level, 2);
    }

    #[test]
    fn test_ceiling_clamps() {
        let mut candidates = vec![
            candidate(3, "Deep", 1, 100.0),
            candidate(3, "Deeper", 1, 200.0),
        ];
        let demoted = demote_siblings(&mut candidates, 3);
        assert_eq!(demoted, 0);
        assert_eq!(candidates[1].level, 3);
    }
}
