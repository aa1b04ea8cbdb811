//! spamscope: serve a pre-trained spam/ham classifier from the terminal or
//! an embedded web dashboard, with dataset statistics alongside.

pub mod analytics;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod history;
pub mod model;
pub mod web;
