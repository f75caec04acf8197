pub mod buffer;
pub mod controller;

pub use crate::domain::model::ReviewRequest;
pub use crate::domain::ports::{ConfigProvider, ReviewService};
pub use crate::utils::error::Result;
