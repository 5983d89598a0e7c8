use clap::{clap_app, crate_version, App, Error, ErrorKind};
use std::ffi::OsString;
use super::parser::ColumnOrder;

pub struct Config {
    pub prefix: String,
    pub infile: String,
    pub column_order: ColumnOrder,

    /*
        option: has_header
        default: false
        effect: when has_header is true, the first row names the columns
        (data_type, name, env, value) and every other row is matched by
        column name, so the positional order no longer matters.
    */
    pub has_header: bool,

    /*
        option: escape
        default: false
        effect: when escape is true, the value is encoded as a JSON string
        and the type, name and JSON are single-quoted for the shell. Without
        the flag the value is copied into the command untouched.
    */
    pub escape: bool,
    pub verbose: bool,
}

pub const DEFAULT_INFILE: &str = "params.csv";
pub const DEFAULT_COLUMN_ORDER: &str = "env-value";
pub const STDIN_INFILE: &str = "-";
pub const PREFIX_SEPARATOR: char = '/';

pub fn get_arguments() -> Config {
    parse_arguments(std::env::args_os()).unwrap_or_else(|error| error.exit())
}

pub fn parse_arguments<I, T>(args: I) -> Result<Config, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_app().get_matches_from_safe(args)?;

    let column_order = matches.value_of("COLUMNS")
        .unwrap_or(DEFAULT_COLUMN_ORDER)
        .parse::<ColumnOrder>()
        .map_err(|message| Error::with_description(&message, ErrorKind::InvalidValue))?;

    Ok(Config {
        prefix: normalize_prefix(matches.value_of("PREFIX").unwrap_or_default()),
        infile: matches.value_of("INFILE")
            .unwrap_or(DEFAULT_INFILE)
            .to_string(),
        column_order,
        has_header: matches.is_present("HEADER"),
        escape: matches.is_present("ESCAPE"),
        verbose: matches.is_present("VERBOSE"),
    })
}

fn build_app() -> App<'static, 'static> {
    clap_app!(x =>
        (name: "ssm_params")
        (version: crate_version!())
        (about: "Generate commands to set values in AWS SSM Parameter Store from a CSV file")
        (@arg PREFIX: -p --prefix +required +takes_value "SSM parameter name prefix, e.g., /cogini/foo/dev/app/")
        (@arg INFILE: -i --infile +takes_value "Input CSV file, '-' reads standard input. Default params.csv")
        (@arg COLUMNS: -c --columns +takes_value "Order of the 3rd and 4th columns: env-value or value-env. Default env-value")
        (@arg HEADER: -H --header "First row is a header naming the columns data_type, name, env, value")
        (@arg ESCAPE: -e --escape "JSON-encode values and single-quote the type, name and value for the shell. Without the flag values are copied verbatim")
        (@arg VERBOSE: -v --verbose "Print debug diagnostics to stderr")
    )
}

// append exactly one separator unless the prefix already ends with one
pub fn normalize_prefix(prefix: &str) -> String {
    if prefix.ends_with(PREFIX_SEPARATOR) {
        prefix.to_string()
    } else {
        format!("{}{}", prefix, PREFIX_SEPARATOR)
    }
}
