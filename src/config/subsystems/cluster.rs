// src/config/subsystems/cluster.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;

/// What to do with an edge naming an accession absent from the node table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DanglingPolicy {
    #[default]
    Fail,
    Skip,
}

impl DanglingPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DanglingPolicy::Fail => "fail",
            DanglingPolicy::Skip => "skip",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim_matches('"').to_lowercase().as_str() {
            "fail" => Some(Self::Fail),
            "skip" => Some(Self::Skip),
            _ => None,
        }
    }
}

/// What to do with a row that fails schema validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RowPolicy {
    #[default]
    Strict,
    Skip,
}

impl RowPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowPolicy::Strict => "strict",
            RowPolicy::Skip => "skip",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim_matches('"').to_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "skip" => Some(Self::Skip),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Inclusive lower bound on edge percent identity.
    pub min_percent_identity: f64,
    pub dangling_policy: DanglingPolicy,
    pub row_policy: RowPolicy,
    pub log_level: String,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            min_percent_identity: 0.0,
            dangling_policy: DanglingPolicy::Fail,
            row_policy: RowPolicy::Strict,
            log_level: "info".to_string(),
        }
    }
}

impl FromIni for ClusterConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "cluster" {
            return None;
        }

        match key {
            "min_percent_identity" | "min_percid" => {
                match value.parse::<f64>() {
                    Ok(v) => {
                        self.min_percent_identity = v;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid min_percent_identity value (must be a number): {}", value)
                    ))),
                }
            },
            "dangling_policy" => {
                match DanglingPolicy::from_str(value) {
                    Some(policy) => {
                        self.dangling_policy = policy;
                        Some(Ok(()))
                    },
                    None => Some(Err(Error::Config(
                        format!("Invalid dangling_policy (must be fail/skip): {}", value)
                    ))),
                }
            },
            "row_policy" => {
                match RowPolicy::from_str(value) {
                    Some(policy) => {
                        self.row_policy = policy;
                        Some(Ok(()))
                    },
                    None => Some(Err(Error::Config(
                        format!("Invalid row_policy (must be strict/skip): {}", value)
                    ))),
                }
            },
            "log_level" => {
                self.log_level = value.trim_matches('"').to_string();
                Some(Ok(()))
            },
            _ => None,
        }
    }
}

impl ClusterConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.min_percent_identity.is_finite() || self.min_percent_identity < 0.0 {
            return Err(Error::Config(format!(
                "min_percent_identity must be a non-negative number, got {}",
                self.min_percent_identity
            )));
        }
        if self.min_percent_identity > 100.0 {
            log::warn!("min_percent_identity {} exceeds 100; every edge will be rejected",
                self.min_percent_identity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_names() {
        assert_eq!(DanglingPolicy::from_str("\"Skip\""), Some(DanglingPolicy::Skip));
        assert_eq!(DanglingPolicy::from_str("maybe"), None);
        assert_eq!(RowPolicy::from_str("STRICT"), Some(RowPolicy::Strict));
        assert_eq!(RowPolicy::Skip.as_str(), "skip");
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let config = ClusterConfig { min_percent_identity: -1.0, ..ClusterConfig::default() };
        assert!(config.validate().is_err());
        let config = ClusterConfig { min_percent_identity: f64::NAN, ..ClusterConfig::default() };
        assert!(config.validate().is_err());
    }
}
