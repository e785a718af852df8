use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} not found in environment variables")]
    MissingCredential { var: &'static str },
}

/// Reasons a post table is rejected before any report view is computed.
/// Row numbers are 1-based and count data rows only (the header is row 0).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Error reading CSV file: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),

    #[error("Error converting Post Date on row {row}: {value:?} is not DD/MM/YYYY")]
    BadDate { row: usize, value: String },

    #[error("Non-numeric {column} on row {row}: {value:?}")]
    NotANumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Likes + Comments on row {row} does not fit in 64 bits")]
    EngagementOverflow { row: usize },
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("No posts in {month:?}; available months: {}", .available.join(", "))]
    UnknownMonth {
        month: String,
        available: Vec<String>,
    },

    #[error("{metric} total for {name:?} does not fit in 64 bits")]
    Overflow { metric: &'static str, name: String },
}
