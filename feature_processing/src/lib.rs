pub mod error;
pub mod misc;
pub mod processor;

pub use crate::error::FeatureError;
pub use crate::misc::{FeatureRow, FeatureTable};
pub use crate::processor::{HORIZON, MIN_TRAINING_ROWS, WINDOW_SIZE, extract_features};
