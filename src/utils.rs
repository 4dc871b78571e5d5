//! General utility functions for catsave

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobMatcher};

/// Format a byte count in human-readable form (B, KB, MB)
pub fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} B", size)
    }
}

/// Create a case-insensitive matcher for room names
///
/// Plain text without wildcards becomes `*text*` (substring search).
pub fn create_room_matcher(pattern: &str) -> Result<GlobMatcher> {
    let pattern = if !pattern.contains('*') && !pattern.contains('?') {
        format!("*{}*", pattern)
    } else {
        pattern.to_string()
    };

    let glob = GlobBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .with_context(|| format!("Invalid room pattern: {}", pattern))?;
    Ok(glob.compile_matcher())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(12), "12 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_room_matcher_substring() {
        let m = create_room_matcher("den").unwrap();
        assert!(m.is_match("Den"));
        assert!(m.is_match("Garden"));
        assert!(!m.is_match("Attic"));
    }

    #[test]
    fn test_room_matcher_glob() {
        let m = create_room_matcher("Bed*").unwrap();
        assert!(m.is_match("Bedroom"));
        assert!(!m.is_match("Master Bedroom"));
    }

    #[test]
    fn test_room_matcher_invalid() {
        assert!(create_room_matcher("[*").is_err());
    }
}
