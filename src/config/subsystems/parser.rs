// src/config/subsystems/parser.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;

/// Column layout and dialect of the node and edge tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    pub has_headers: bool,
    pub delimiter: u8,

    // Node table
    pub alias_column: usize,
    pub alias_separator: char,

    // Edge table
    pub percent_identity_column: usize,
    pub pair_column: usize,
    pub pair_separator: char,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            has_headers: true,
            delimiter: b',',
            alias_column: 1,
            alias_separator: '|',
            percent_identity_column: 1,
            pair_column: 5,
            pair_separator: ',',
        }
    }
}

fn parse_column(key: &str, value: &str) -> Result<usize> {
    value.parse().map_err(|_| Error::Config(
        format!("Invalid {} value (must be a column index): {}", key, value)
    ))
}

fn parse_char(key: &str, value: &str) -> Result<char> {
    let value = value.trim_matches('"');
    match value {
        "tab" | "\\t" => return Ok('\t'),
        _ => {}
    }
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(Error::Config(
            format!("Invalid {} value (must be a single character): {}", key, value)
        )),
    }
}

impl FromIni for ParserConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "parser" {
            return None;
        }

        let result = match key {
            "has_headers" => value.parse::<bool>()
                .map(|flag| self.has_headers = flag)
                .map_err(|_| Error::Config(
                    format!("Invalid has_headers value (must be true/false): {}", value)
                )),
            "delimiter" => parse_char(key, value).and_then(|c| {
                if c.is_ascii() {
                    self.delimiter = c as u8;
                    Ok(())
                } else {
                    Err(Error::Config(format!("Delimiter must be ASCII: {}", value)))
                }
            }),
            "alias_column" => parse_column(key, value).map(|c| self.alias_column = c),
            "alias_separator" => parse_char(key, value).map(|c| self.alias_separator = c),
            "percent_identity_column" => parse_column(key, value).map(|c| self.percent_identity_column = c),
            "pair_column" => parse_column(key, value).map(|c| self.pair_column = c),
            "pair_separator" => parse_char(key, value).map(|c| self.pair_separator = c),
            _ => return None,
        };
        Some(result)
    }
}

impl ParserConfig {
    pub fn validate(&self) -> Result<()> {
        if self.percent_identity_column == self.pair_column {
            return Err(Error::Config(format!(
                "percent_identity_column and pair_column both point at column {}",
                self.pair_column
            )));
        }
        Ok(())
    }
}
