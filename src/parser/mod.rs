//! Typed row schema for the node and edge tables.
//!
//! Rows arrive as tokenized fields; this module is the only place that knows
//! which column carries what, so format fragility stays out of the graph code.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use log::debug;
use crate::config::subsystems::ParserConfig;
use crate::error::{Error, Result};
use crate::types::Accession;

pub const NODE_STREAM: &str = "node";
pub const EDGE_STREAM: &str = "edge";

/// One tokenized input row with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub line: u64,
    pub fields: Vec<String>,
}

impl RawRow {
    pub fn new<S: Into<String>>(line: u64, fields: impl IntoIterator<Item = S>) -> Self {
        Self {
            line,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    fn field(&self, stream: &'static str, index: usize) -> Result<&str> {
        self.fields.get(index).map(String::as_str).ok_or(Error::RowShape {
            stream,
            line: self.line,
            field: index,
            found: self.fields.len(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeRow {
    pub line: u64,
    pub aliases: Vec<Accession>,
}

impl NodeRow {
    pub fn parse(row: &RawRow, config: &ParserConfig) -> Result<Self> {
        let raw = row.field(NODE_STREAM, config.alias_column)?;
        let aliases: Vec<Accession> = raw
            .split(config.alias_separator)
            .map(str::to_string)
            .collect();

        if aliases.iter().any(|a| a.is_empty()) {
            return Err(Error::EmptyAlias { line: row.line, value: raw.to_string() });
        }

        Ok(Self { line: row.line, aliases })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRow {
    pub line: u64,
    pub percent_identity: f64,
    pub accession_a: Accession,
    pub accession_b: Accession,
}

impl EdgeRow {
    pub fn parse(row: &RawRow, config: &ParserConfig) -> Result<Self> {
        let percid_raw = row.field(EDGE_STREAM, config.percent_identity_column)?;
        let pair_raw = row.field(EDGE_STREAM, config.pair_column)?;

        let percent_identity = parse_percent_identity(percid_raw)
            .ok_or_else(|| Error::InvalidPercentIdentity {
                line: row.line,
                value: percid_raw.to_string(),
            })?;

        let mut parts = pair_raw.split(config.pair_separator);
        let (accession_a, accession_b) = match (parts.next(), parts.next(), parts.next()) {
            (Some(a), Some(b), None) if !a.is_empty() && !b.is_empty() => (a.to_string(), b.to_string()),
            _ => {
                return Err(Error::MalformedPair { line: row.line, value: pair_raw.to_string() });
            }
        };

        Ok(Self { line: row.line, percent_identity, accession_a, accession_b })
    }
}

fn parse_percent_identity(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Tokenizes a CSV stream into [`RawRow`]s, honouring the configured dialect.
/// The header row, when configured, is consumed and not returned.
pub fn read_rows_from<R: Read>(reader: R, config: &ParserConfig) -> Result<Vec<RawRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(config.has_headers)
        .delimiter(config.delimiter)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        rows.push(RawRow::new(line, record.iter()));
    }
    Ok(rows)
}

pub fn read_rows<P: AsRef<Path>>(path: P, config: &ParserConfig) -> Result<Vec<RawRow>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::input_access(path, e))?;
    let rows = read_rows_from(BufReader::new(file), config)?;
    debug!("Read {} rows from {:?}", rows.len(), path);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(fields: &[&str]) -> Result<EdgeRow> {
        EdgeRow::parse(&RawRow::new(7, fields.iter().copied()), &ParserConfig::default())
    }

    #[test]
    fn test_node_row_splits_aliases() {
        let row = RawRow::new(2, ["n1", "A1|A4|A9", "extra"]);
        let node = NodeRow::parse(&row, &ParserConfig::default()).unwrap();
        assert_eq!(node.aliases, vec!["A1", "A4", "A9"]);
        assert_eq!(node.line, 2);
    }

    #[test]
    fn test_node_row_missing_column() {
        let row = RawRow::new(3, ["n1"]);
        match NodeRow::parse(&row, &ParserConfig::default()) {
            Err(Error::RowShape { stream, line, field, found }) => {
                assert_eq!((stream, line, field, found), (NODE_STREAM, 3, 1, 1));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_node_row_empty_alias() {
        let row = RawRow::new(4, ["n1", "A1||A2"]);
        assert!(matches!(
            NodeRow::parse(&row, &ParserConfig::default()),
            Err(Error::EmptyAlias { line: 4, .. })
        ));
    }

    #[test]
    fn test_edge_row_fields() {
        let e = edge(&["e", " 87.5", "x", "x", "x", "A1,A2"]).unwrap();
        assert_eq!(e.percent_identity, 87.5);
        assert_eq!(e.accession_a, "A1");
        assert_eq!(e.accession_b, "A2");
    }

    #[test]
    fn test_edge_row_errors() {
        assert!(matches!(edge(&["e", "90", "x"]), Err(Error::RowShape { field: 5, .. })));
        assert!(matches!(
            edge(&["e", "ninety", "x", "x", "x", "A1,A2"]),
            Err(Error::InvalidPercentIdentity { line: 7, .. })
        ));
        assert!(matches!(edge(&["e", "inf", "x", "x", "x", "A1,A2"]), Err(Error::InvalidPercentIdentity { .. })));
        assert!(matches!(edge(&["e", "90", "x", "x", "x", "A1"]), Err(Error::MalformedPair { .. })));
        assert!(matches!(edge(&["e", "90", "x", "x", "x", "A1,A2,A3"]), Err(Error::MalformedPair { .. })));
        assert!(matches!(edge(&["e", "90", "x", "x", "x", "A1,"]), Err(Error::MalformedPair { .. })));
    }

    #[test]
    fn test_read_rows_skips_header_and_keeps_quoted_pairs() {
        let data = "name,pid,a,b,c,pair\ne1,99,,,,\"A1,A2\"\ne2,10\n";
        let rows = read_rows_from(data.as_bytes(), &ParserConfig::default()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].fields[5], "A1,A2");
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[1].fields.len(), 2);
    }

    #[test]
    fn test_read_rows_missing_file() {
        let result = read_rows("/definitely/not/here.csv", &ParserConfig::default());
        assert!(matches!(result, Err(Error::InputAccess { .. })));
    }
}
