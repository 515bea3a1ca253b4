use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use clap::Parser;
use env_logger::Builder;
use log::{error, info, LevelFilter};
use ssnclust::config::subsystems::{DanglingPolicy, RowPolicy};
use ssnclust::{SsnConfig, Result};

/// Parse a sequence similarity network into connected-component clusters.
#[derive(Debug, Parser)]
#[command(name = "parse_ssn", version)]
struct Cli {
    /// SSN nodes file (csv format)
    nodes: PathBuf,

    /// SSN edges file (csv format)
    edges: PathBuf,

    /// Keep edges with at least this percent identity (0-100)
    #[arg(short = 'e', long = "min-percid", value_name = "0-100")]
    min_percid: Option<f64>,

    /// Output file 1: list of accessions
    #[arg(short = 'a', long = "accession-list", value_name = "PATH")]
    accession_list: Option<PathBuf>,

    /// Output file 2: mapping of accessions to clusters
    #[arg(short = 'c', long = "clusters-file", value_name = "PATH")]
    clusters_file: Option<PathBuf>,

    /// Write a JSON summary of the run
    #[arg(long = "summary", value_name = "PATH")]
    summary: Option<PathBuf>,

    /// INI file with [file], [parser] and [cluster] sections
    #[arg(long = "config", value_name = "INI")]
    config: Option<PathBuf>,

    /// Edges naming unknown accessions: fail or skip
    #[arg(long = "dangling", value_name = "POLICY", value_parser = parse_dangling)]
    dangling: Option<DanglingPolicy>,

    /// Malformed rows: strict or skip
    #[arg(long = "rows", value_name = "POLICY", value_parser = parse_rows)]
    rows: Option<RowPolicy>,

    /// Record skipped rows here
    #[arg(long = "skipped-log", value_name = "PATH")]
    skipped_log: Option<PathBuf>,

    /// error, warn, info, debug, trace or none
    #[arg(long = "log-level", value_name = "LEVEL")]
    log_level: Option<String>,

    /// Send log output to a file instead of stderr
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn parse_dangling(s: &str) -> std::result::Result<DanglingPolicy, String> {
    DanglingPolicy::from_str(s).ok_or_else(|| format!("expected fail or skip, got {}", s))
}

fn parse_rows(s: &str) -> std::result::Result<RowPolicy, String> {
    RowPolicy::from_str(s).ok_or_else(|| format!("expected strict or skip, got {}", s))
}

impl Cli {
    /// Loads the INI file if one was given, then applies command-line overrides.
    fn into_config(self) -> Result<(SsnConfig, Option<PathBuf>)> {
        let mut config = match &self.config {
            Some(path) => SsnConfig::from_ini(path)?,
            None => SsnConfig::default(),
        };

        config.files.nodes = self.nodes;
        config.files.edges = self.edges;
        if let Some(path) = self.accession_list {
            config.files.accession_list = path;
        }
        if let Some(path) = self.clusters_file {
            config.files.clusters_file = path;
        }
        if self.summary.is_some() {
            config.files.summary_file = self.summary;
        }
        if self.skipped_log.is_some() {
            config.files.skipped_log = self.skipped_log;
        }
        if let Some(min) = self.min_percid {
            config.cluster.min_percent_identity = min;
        }
        if let Some(policy) = self.dangling {
            config.cluster.dangling_policy = policy;
        }
        if let Some(policy) = self.rows {
            config.cluster.row_policy = policy;
        }
        if let Some(level) = self.log_level {
            config.cluster.log_level = level;
        }

        Ok((config, self.log_file))
    }
}

fn level_filter(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        "none" => LevelFilter::Off,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to Info", level);
            LevelFilter::Info
        }
    }
}

fn init_logging(level: &str, log_file: Option<&PathBuf>) -> Result<()> {
    let mut builder = Builder::new();
    builder.filter(None, level_filter(level));
    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, log_file) = match cli.into_config() {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.cluster.log_level, log_file.as_ref()) {
        eprintln!("Unable to set up logging: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Clustering {:?} with {:?} at >= {}% identity",
        config.files.nodes, config.files.edges, config.cluster.min_percent_identity);

    match ssnclust::run(&config) {
        Ok(result) => {
            info!("Done: {} clusters, {} rows skipped", result.ranked.len(), result.skipped_rows());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
