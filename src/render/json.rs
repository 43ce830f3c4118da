//! JSON rendering for outlines.

use crate::error::{Error, Result};
use crate::model::OutlineResult;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline result to JSON, statistics included.
pub fn to_json(result: &OutlineResult, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(result),
        JsonFormat::Compact => serde_json::to_string(result),
    };

    json.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OutlineEntry, OutlineSource, OutlineStats};

    fn result() -> OutlineResult {
        OutlineResult::new(
            vec![
                OutlineEntry::new(1, "Overview", 1),
                OutlineEntry::new(2, "Scope", 2),
            ],
            OutlineSource::Inferred,
            OutlineStats::default(),
        )
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&result(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\": \"Overview\""));
        assert!(json.contains("\"count\": 2"));
        assert!(json.contains("\"source\": \"inferred\""));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&result(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines

        let parsed: OutlineResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result());
    }
}
