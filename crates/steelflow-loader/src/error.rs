use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Query for {year} failed with status {status:?}")]
    QueryFailed { year: i32, status: String },

    #[error("Query for {year} returned {count} results (limit {max_results}); data is incomplete")]
    ResultTruncated {
        year: i32,
        count: u64,
        max_results: u64,
    },

    #[error("Response for {year} echoes {field} {actual:?}, expected {expected:?}")]
    SchemaMismatch {
        year: i32,
        field: &'static str,
        expected: String,
        actual: String,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Failed to read table {path}: {source}")]
    Table {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
