//! # tablegantt-parser
//!
//! Loads chart files into validated [`ChartData`].
//!
//! This crate provides:
//! - JSON chart parser (`title`, `global_start_date`, `global_end_date`,
//!   `types`, `tasks`, `breaks`, `major_dates`)
//! - Strict `YYYY-MM-DD` date handling: malformed dates and inverted ranges
//!   are rejected with the offending field location
//!
//! ## Example
//!
//! ```rust
//! use tablegantt_parser::parse_chart;
//!
//! let input = r#"{
//!     "title": "My Chart",
//!     "global_start_date": "2024-03-01",
//!     "global_end_date": "2024-03-31",
//!     "types": ["Build"],
//!     "tasks": [
//!         { "name": "Frame", "start_date": "2024-03-01", "end_date": "2024-03-10", "type": 0 }
//!     ]
//! }"#;
//!
//! let chart = parse_chart(input).unwrap();
//! assert_eq!(chart.title, "My Chart");
//! assert_eq!(chart.tasks.len(), 1);
//! ```

pub mod json;

use std::path::{Path, PathBuf};

use tablegantt_core::{ChartData, ChartError};
use thiserror::Error;

/// Chart loading error
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid chart JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value at {location}: {source}")]
    Invalid {
        location: String,
        #[source]
        source: ChartError,
    },
}

/// Parse a chart from its JSON text
pub fn parse_chart(input: &str) -> Result<ChartData, ParseError> {
    json::parse(input)
}

/// Parse a chart file from a path
pub fn parse_file(path: &Path) -> Result<ChartData, ParseError> {
    let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_chart(&content)
}
