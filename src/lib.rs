//! Core session logic for CalorieTrack: daily-target calculation, meal
//! aggregation, and the photo-logging flow against a pluggable nutrition
//! estimator.

pub mod config;
pub mod errors;
pub mod estimator;
pub mod logger;
pub mod meals;
pub mod profile;
pub mod state;
