use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("cannot open input file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid csv: {0}")]
    Csv(#[from] csv::Error),

    // row too short to hold data type, name, env and value
    #[error("line {line}: expected {expected} fields, found {found}")]
    MissingField {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("cannot write command: {0}")]
    Write(#[source] io::Error),
}
