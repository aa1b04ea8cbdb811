//! Prediction logging.

pub mod logger;
