// src/config/file.rs

use serde::{Serialize, Deserialize};
use std::path::PathBuf;
use crate::error::{Error, Result};
use super::FromIni;

pub const DEFAULT_ACCESSION_LIST: &str = "cgfp-accessions.txt";
pub const DEFAULT_CLUSTERS_FILE: &str = "cgfp-clusters.txt";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub nodes: PathBuf,
    pub edges: PathBuf,
    pub accession_list: PathBuf,
    pub clusters_file: PathBuf,
    pub summary_file: Option<PathBuf>,
    pub skipped_log: Option<PathBuf>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            nodes: PathBuf::new(),
            edges: PathBuf::new(),
            accession_list: PathBuf::from(DEFAULT_ACCESSION_LIST),
            clusters_file: PathBuf::from(DEFAULT_CLUSTERS_FILE),
            summary_file: None,
            skipped_log: None,
        }
    }
}

impl FromIni for FileConfig {
    fn from_ini_section(&mut self, _section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        let path = PathBuf::from(value.trim_matches('"'));
        match key {
            "nodes" => self.nodes = path,
            "edges" => self.edges = path,
            "accession_list" => self.accession_list = path,
            "clusters_file" => self.clusters_file = path,
            "summary_file" => self.summary_file = Some(path),
            "skipped_log" => self.skipped_log = Some(path),
            _ => return None,
        }
        Some(Ok(()))
    }
}

impl FileConfig {
    pub fn validate(&self) -> Result<()> {
        if self.nodes.as_os_str().is_empty() {
            return Err(Error::config("No nodes file given"));
        }
        if self.edges.as_os_str().is_empty() {
            return Err(Error::config("No edges file given"));
        }
        if self.accession_list == self.clusters_file {
            return Err(Error::Config(
                format!("Accession list and clusters file must differ: {:?}", self.clusters_file)
            ));
        }
        Ok(())
    }
}
