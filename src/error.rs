use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecommenderError {
    #[error("Invalid observation #{index}: user {user}, item {item}, rating {rating}")]
    InvalidIdentifier {
        index: usize,
        user: i64,
        item: i64,
        rating: f64,
    },
    #[error("Empty dataset: at least one observation is required")]
    EmptyDataset,
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },
    #[error("{field} {value} is out of range, expected {expected}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        expected: String,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl RecommenderError {
    pub(crate) fn out_of_range(field: &'static str, value: i64, max: usize) -> Self {
        Self::OutOfRange {
            field,
            value,
            expected: format!("1..={}", max),
        }
    }
}

pub type Result<T> = std::result::Result<T, RecommenderError>;
