//! MacroLab Core: domain table, data retrieval, statistics.
//!
//! This crate contains everything below the reporting layer:
//! - Domain types (provider series, the aligned time-indexed table)
//! - Series provider trait with the FRED implementation
//! - Outer-join alignment and monthly resampling
//! - Descriptive statistics, Pearson correlation, histogram binning and KDE

pub mod data;
pub mod domain;
pub mod stats;
