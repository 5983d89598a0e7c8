use csv::{Reader, ReaderBuilder, Terminator};
use std::{fs::File, io, io::Read};
use tracing_subscriber::{fmt, EnvFilter};
use super::config::STDIN_INFILE;
use super::error::GeneratorError;

// open the input file, or standard input for "-"
pub fn open_input(path: &str) -> Result<Box<dyn Read>, GeneratorError> {
    if path == STDIN_INFILE {
        return Ok(Box::new(io::stdin()));
    }

    let file = File::open(path).map_err(|source| GeneratorError::Open {
        path: path.to_string(),
        source,
    })?;

    Ok(Box::new(file))
}

// rows of any length are accepted here, the parser checks the field count.
// Only '\n' ends a line so line positions count every input line, a CRLF
// ending leaves '\r' on the last field for the generator to trim
pub fn csv_reader<R: Read>(input: R, has_header: bool) -> Reader<R> {
    ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_reader(input)
}

// diagnostics go to stderr so stdout only carries commands
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
