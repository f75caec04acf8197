pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
#[cfg(feature = "cli")]
pub mod tui;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::HttpReviewService;
pub use config::ReviewSettings;
pub use core::controller::{ReviewController, SkipReason, SubmitOutcome};
pub use utils::error::{FailureKind, Result, ReviewFailure, ReviewerError};
