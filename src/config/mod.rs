pub mod file;
pub mod subsystems;

use serde::{Serialize, Deserialize};
use std::path::Path;
use std::fs;
use crate::error::{Error, Result};
use log::{warn, trace};

pub trait FromIni {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SsnConfig {
    // File paths
    pub files: file::FileConfig,

    // Subsystem configs
    pub parser: subsystems::ParserConfig,
    pub cluster: subsystems::ClusterConfig,
}

impl SsnConfig {
    /// Full validation, including the input paths. Run right before processing,
    /// after command-line overrides have been applied.
    pub fn validate(&self) -> Result<()> {
        self.files.validate()?;
        self.validate_settings()
    }

    /// Validation of everything except file paths.
    pub fn validate_settings(&self) -> Result<()> {
        self.parser.validate()?;
        self.cluster.validate()?;
        Ok(())
    }

    pub fn from_ini<P: AsRef<Path>>(path: P) -> Result<Self> {
        trace!("Loading configuration from: {:?}", path.as_ref());

        let content = fs::read_to_string(&path)
            .map_err(|e| Error::input_access(path.as_ref(), e))?;
        let config = Self::from_ini_str(&content)?;
        config.validate_settings()?;
        Ok(config)
    }

    pub fn from_ini_str(content: &str) -> Result<Self> {
        let mut config = Self::default();
        let mut current_section = String::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                current_section = line[1..line.len()-1].trim().to_string();
                trace!("  Line {}: Found section: [{}]", line_num + 1, current_section);
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim();

                // Delegate to appropriate subsystem config
                let handled = match current_section.as_str() {
                    "file" => config.files.from_ini_section(&current_section, key, value),
                    "parser" => config.parser.from_ini_section(&current_section, key, value),
                    "cluster" => config.cluster.from_ini_section(&current_section, key, value),
                    _ => None,
                };

                match handled {
                    Some(Err(e)) => return Err(e),
                    Some(Ok(())) => {},
                    None => warn!("Unrecognized config key: {}={} in section [{}]", key, value, current_section),
                }
            } else {
                warn!("Ignoring malformed config line {}: {}", line_num + 1, line);
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::subsystems::{DanglingPolicy, RowPolicy};

    #[test]
    fn test_from_ini_str_sections() {
        let ini = r#"
# run settings
[file]
nodes = "net/nodes.csv"
edges = net/edges.csv
clusters_file = out/clusters.txt

[parser]
pair_column = 6
delimiter = tab

[cluster]
min_percent_identity = 42.5
dangling_policy = skip
row_policy = strict
"#;
        let config = SsnConfig::from_ini_str(ini).unwrap();
        assert_eq!(config.files.nodes, Path::new("net/nodes.csv"));
        assert_eq!(config.files.edges, Path::new("net/edges.csv"));
        assert_eq!(config.files.clusters_file, Path::new("out/clusters.txt"));
        assert_eq!(config.files.accession_list, Path::new("cgfp-accessions.txt"));
        assert_eq!(config.parser.pair_column, 6);
        assert_eq!(config.parser.delimiter, b'\t');
        assert_eq!(config.cluster.min_percent_identity, 42.5);
        assert_eq!(config.cluster.dangling_policy, DanglingPolicy::Skip);
        assert_eq!(config.cluster.row_policy, RowPolicy::Strict);
    }

    #[test]
    fn test_bad_value_is_config_error() {
        let ini = "[cluster]\nmin_percent_identity = lots\n";
        assert!(matches!(SsnConfig::from_ini_str(ini), Err(Error::Config(_))));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let ini = "[cluster]\nshiny = yes\n[elsewhere]\nfoo = bar\n";
        let config = SsnConfig::from_ini_str(ini).unwrap();
        assert_eq!(config.cluster.min_percent_identity, 0.0);
    }

    #[test]
    fn test_validate_requires_inputs() {
        let config = SsnConfig::default();
        assert!(config.validate_settings().is_ok());
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
