//! # refmatch-predict
//!
//! Supervised predictors trained on historical referee/manuscript
//! outcomes. Low data degrades to a structured status, never an error;
//! only a genuinely failed fit on adequate data is reported as one.

mod classifier;
pub mod features;
pub mod labels;
mod predictor;

pub use classifier::Classifier;
pub use predictor::{OutcomePredictor, ResponsePredictor};
