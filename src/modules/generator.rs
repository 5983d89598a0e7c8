use csv::{Reader, StringRecord};
use serde_json::Value;
use std::io::{Read, Write};
use tracing::{debug, info};
use super::error::GeneratorError;
use super::parser::{ParameterRow, Parser, FIELD_COUNT};

pub struct Generator {
    prefix: String,
    escape: bool,
}

impl Generator {

    // prefix must already be normalized, see config::normalize_prefix
    pub fn new(prefix: String, escape: bool) -> Generator {
        Generator {
            prefix,
            escape,
        }
    }

    // read all records in file order and write one command per record
    // every line is flushed before the next record is read, so lines written
    // before a bad row are kept
    pub fn emit<R: Read, W: Write>(&self, reader: &mut Reader<R>, parser: &Parser, out: &mut W) -> Result<usize, GeneratorError> {
        let headers = if parser.has_header {
            Some(trim_line_end(reader.headers()?))
        } else {
            None
        };

        let mut record = StringRecord::new();
        let mut count = 0;
        let mut line = reader.position().line();

        while reader.read_record(&mut record)? {
            let end = reader.position().line();
            check_blank_lines(line, end, Some(&record))?;
            line = end;

            let fields = trim_line_end(&record);
            let row = parser.parse_record(&fields, headers.as_ref())?;
            debug!(name = %row.name, data_type = %row.data_type, "generating command");

            writeln!(out, "{}", self.build_command(&row)).map_err(GeneratorError::Write)?;
            out.flush().map_err(GeneratorError::Write)?;
            count += 1;
        }

        // blank lines after the last record
        check_blank_lines(line, reader.position().line(), None)?;

        info!(count, "generated commands");
        Ok(count)
    }

    pub fn build_command(&self, row: &ParameterRow) -> String {
        if self.escape {
            let name = format!("{}{}", self.prefix, row.name);
            let input_json = format!("{{\"Value\": {}}}", Value::String(row.value.clone()));

            format!(
                "aws ssm put-parameter --type '{}' --name '{}' --cli-input-json '{}' --overwrite",
                quote_single(&row.data_type), quote_single(&name), quote_single(&input_json)
            )
        } else {
            // value is copied verbatim, quotes or backslashes in it are not escaped
            format!(
                "aws ssm put-parameter --type {} --name '{}{}' --cli-input-json '{{\"Value\": \"{}\"}}' --overwrite",
                row.data_type, self.prefix, row.name, row.value
            )
        }
    }
}

// the csv reader skips blank lines, but each one is a row without fields.
// `start` and `end` are the reader's line before and after reading `record`.
// Lines are terminated by '\n' only (see utility::csv_reader), so a record
// consumes its own terminator plus any newlines quoted inside its fields and
// every other consumed line was blank
fn check_blank_lines(start: u64, end: u64, record: Option<&StringRecord>) -> Result<(), GeneratorError> {
    let blank = match record {
        // "\r\n" on its own line
        Some(record) if record.len() == 1 && &record[0] == "\r" => true,
        Some(record) => {
            let embedded: u64 = record.iter().map(|field| field.matches('\n').count() as u64).sum();
            end.saturating_sub(start) > 1 + embedded
        }
        None => end > start,
    };

    if blank {
        return Err(GeneratorError::MissingField {
            line: start,
            expected: FIELD_COUNT,
            found: 0,
        });
    }

    Ok(())
}

// drop the '\r' a CRLF line ending leaves on the last field
fn trim_line_end(record: &StringRecord) -> StringRecord {
    let last = match record.len().checked_sub(1) {
        Some(last) if record[last].ends_with('\r') => last,
        _ => return record.clone(),
    };

    let mut trimmed: StringRecord = record
        .iter()
        .enumerate()
        .map(|(i, field)| if i == last { &field[..field.len() - 1] } else { field })
        .collect();
    trimmed.set_position(record.position().cloned());
    trimmed
}

// make text safe inside a single-quoted shell word
fn quote_single(text: &str) -> String {
    text.replace('\'', "'\\''")
}
