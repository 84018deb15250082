//! CLI command implementations.
//!
//! Each command is implemented in its own module with a `run` function
//! that handles the command logic.

pub mod info;
pub mod show;
pub mod view;

use std::path::Path;

use crate::error::Result;
use crate::import::TranscriptReader;
use crate::model::Transcript;
use crate::util::parse_date_arg;
use crate::view::{DateRange, FilterMode, ScrollDirection, ViewFilter};

use super::FilterModeArg;

/// Load a transcript from a file path.
pub fn load_transcript(path: &Path, strict: bool) -> Result<Transcript> {
    let mut reader = TranscriptReader::new().with_lenient(!strict);
    reader.read_file(path)
}

/// Build the filter configuration from command-line flags.
pub fn build_filter(
    mode: FilterModeArg,
    from: Option<&str>,
    to: Option<&str>,
    reverse: bool,
) -> Result<ViewFilter> {
    let range = DateRange {
        start: from.map(|v| parse_date_arg("from", v)).transpose()?,
        end: to.map(|v| parse_date_arg("to", v)).transpose()?,
    };

    let mode = match mode {
        FilterModeArg::Index => FilterMode::Index,
        FilterModeArg::Date => FilterMode::Date,
    };

    let direction = if reverse {
        ScrollDirection::Reverse
    } else {
        ScrollDirection::Forward
    };

    Ok(ViewFilter {
        mode,
        range,
        direction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_defaults() {
        let filter = build_filter(FilterModeArg::Index, None, None, false).unwrap();
        assert_eq!(filter.mode, FilterMode::Index);
        assert_eq!(filter.direction, ScrollDirection::Forward);
        assert!(filter.range.start.is_none());
        assert!(filter.range.end.is_none());
    }

    #[test]
    fn test_build_filter_dates() {
        let filter =
            build_filter(FilterModeArg::Date, Some("2024-03-01"), Some("2024-03-05"), true)
                .unwrap();
        assert_eq!(filter.mode, FilterMode::Date);
        assert_eq!(filter.direction, ScrollDirection::Reverse);
        assert!(filter.range.start.is_some());
    }

    #[test]
    fn test_build_filter_rejects_bad_date() {
        assert!(build_filter(FilterModeArg::Date, Some("yesterday"), None, false).is_err());
    }
}
