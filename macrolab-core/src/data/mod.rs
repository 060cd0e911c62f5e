//! Data retrieval, alignment and resampling.

pub mod align;
pub mod fetch;
pub mod fred;
pub mod provider;
pub mod resample;

pub use align::align_series;
pub use fetch::{fetch_series, FetchRequest, SeriesRequest};
pub use fred::{parse_fredgraph_csv, FredProvider, FRED_GRAPH_URL};
pub use provider::{DataError, SeriesProvider, StaticProvider};
pub use resample::resample_monthly_mean;
