use csv::StringRecord;
use serde::Deserialize;
use std::{fmt, str::FromStr};
use tracing::warn;
use super::error::GeneratorError;

pub const FIELD_COUNT: usize = 4;

// types accepted by `aws ssm put-parameter --type`
const KNOWN_DATA_TYPES: [&str; 3] = ["String", "SecureString", "StringList"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParameterRow {
    #[serde(alias = "type")]
    pub data_type: String,
    pub name: String,
    #[serde(rename = "env", alias = "env_var_name", default)]
    pub env_var_name: String,
    pub value: String,
}

// position of the env var name and the value in a headerless file
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnOrder {
    EnvValue,
    ValueEnv,
}

impl ColumnOrder {
    // (env, value) column indexes
    fn indexes(self) -> (usize, usize) {
        match self {
            ColumnOrder::EnvValue => (2, 3),
            ColumnOrder::ValueEnv => (3, 2),
        }
    }
}

impl FromStr for ColumnOrder {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "env-value" => Ok(ColumnOrder::EnvValue),
            "value-env" => Ok(ColumnOrder::ValueEnv),
            _ => Err(format!("'{}' is not a valid column order, use env-value or value-env", text)),
        }
    }
}

impl fmt::Display for ColumnOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ColumnOrder::EnvValue => write!(f, "env-value"),
            ColumnOrder::ValueEnv => write!(f, "value-env"),
        }
    }
}

pub struct Parser {
    pub column_order: ColumnOrder,
    pub has_header: bool,
}

impl Parser {

    pub fn new(column_order: ColumnOrder, has_header: bool) -> Parser {
        Parser {
            column_order,
            has_header,
        }
    }

    // turn one csv record into a row, by name when headers are given
    pub fn parse_record(&self, record: &StringRecord, headers: Option<&StringRecord>) -> Result<ParameterRow, GeneratorError> {
        let row = match headers {
            Some(headers) => record.deserialize::<ParameterRow>(Some(headers))?,
            None => self.parse_positional(record)?,
        };

        if !KNOWN_DATA_TYPES.contains(&row.data_type.as_str()) {
            warn!(line = line_of(record), data_type = %row.data_type, "unknown parameter type, passing it through");
        }

        Ok(row)
    }

    fn parse_positional(&self, record: &StringRecord) -> Result<ParameterRow, GeneratorError> {
        if record.len() < FIELD_COUNT {
            return Err(GeneratorError::MissingField {
                line: line_of(record),
                expected: FIELD_COUNT,
                found: record.len(),
            });
        }

        let (env_index, value_index) = self.column_order.indexes();

        // length checked above, any extra columns are ignored
        Ok(ParameterRow {
            data_type: record[0].to_string(),
            name: record[1].to_string(),
            env_var_name: record[env_index].to_string(),
            value: record[value_index].to_string(),
        })
    }
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|position| position.line()).unwrap_or_default()
}
