pub mod skipped_log;

pub use skipped_log::SkippedLog;
