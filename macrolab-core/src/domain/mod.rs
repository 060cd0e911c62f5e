//! Domain types: provider series and the aligned time-indexed table.

pub mod frame;
pub mod series;

pub use frame::{Column, FrameError, TimeFrame};
pub use series::{Observation, Series};
