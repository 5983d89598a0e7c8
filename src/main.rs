use std::{io, io::Write, process::exit};
use tracing::debug;
use modules::config::{get_arguments, Config};
use modules::error::GeneratorError;
use modules::generator::Generator;
use modules::parser::Parser;
use modules::utility::{csv_reader, init_logging, open_input};

mod modules;

fn main() {
    let config = get_arguments();
    init_logging(config.verbose);

    let stdout = io::stdout();
    if let Err(error) = run(config, &mut stdout.lock()) {
        eprintln!("Error: {}", error);
        exit(1);
    }
}

fn run<W: Write>(config: Config, out: &mut W) -> Result<usize, GeneratorError> {
    debug!(
        prefix = %config.prefix,
        infile = %config.infile,
        columns = %config.column_order,
        header = config.has_header,
        escape = config.escape,
        "parsed arguments"
    );

    let input = open_input(&config.infile)?;
    let mut reader = csv_reader(input, config.has_header);
    let parser = Parser::new(config.column_order, config.has_header);
    let generator = Generator::new(config.prefix, config.escape);

    generator.emit(&mut reader, &parser, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::parser::ColumnOrder;
    use tempfile::NamedTempFile;

    fn config(infile: &str) -> Config {
        Config {
            prefix: "/x/y/".to_string(),
            infile: infile.to_string(),
            column_order: ColumnOrder::EnvValue,
            has_header: false,
            escape: false,
            verbose: false,
        }
    }

    #[test]
    fn missing_input_file_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.csv");
        let mut out = Vec::new();

        let result = run(config(path.to_str().unwrap()), &mut out);

        assert!(matches!(result, Err(GeneratorError::Open { .. })));
        assert!(out.is_empty());
    }

    #[test]
    fn file_rows_become_commands() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "String,a/b,ENV_NAME,hello").unwrap();
        let mut out = Vec::new();

        let count = run(config(file.path().to_str().unwrap()), &mut out).unwrap();

        assert_eq!(count, 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "aws ssm put-parameter --type String --name '/x/y/a/b' --cli-input-json '{\"Value\": \"hello\"}' --overwrite\n"
        );
    }
}
