//! Core scene data model.
//!
//! - [`ScenePath`] - structural absolute/relative paths
//! - Data source traits ([`DataSource`], [`ContainerDataSource`],
//!   [`SampledDataSource`], [`PathDataSource`]) and [`Value`]
//! - Retained in-memory data sources
//! - Observer types and notice entries

mod data_source;
mod observer;
mod path;
mod retained;

pub use data_source::*;
pub use observer::*;
pub use path::*;
pub use retained::*;
