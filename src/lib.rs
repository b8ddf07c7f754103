//! Back-translation data augmentation for CSV sentence datasets.

pub mod cli;
pub mod application;
pub mod domain;
pub mod data;
pub mod ml;
pub mod infra;
