//! Data source traits.
//!
//! A data source is one node of a prim's attribute tree. The base trait
//! carries a small closed set of capability casts; concrete sources
//! implement the capabilities they support:
//! - [`ContainerDataSource`] - name -> child lookup
//! - [`SampledDataSource`] - a time-varying leaf value
//! - [`PathDataSource`] - a sampled leaf whose value is a [`ScenePath`]
//!
//! Sources are shared, reference-counted handles; several consumers (and
//! several wrapper layers) may hold the same node without owning it.

use std::sync::Arc;

use crate::core::ScenePath;
use crate::util::SampleTime;

/// Shared handle to any data source.
pub type DataSourceHandle = Arc<dyn DataSource>;

/// Shared handle to a container data source.
pub type ContainerDataSourceHandle = Arc<dyn ContainerDataSource>;

/// A value carried by a sampled data source.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Path(ScenePath),
}

impl Value {
    /// The contained path, if this is a path value.
    pub fn as_path(&self) -> Option<&ScenePath> {
        match self {
            Self::Path(path) => Some(path),
            _ => None,
        }
    }
}

/// Base interface for all data sources.
///
/// The capability casts return `None` by default; a concrete source
/// overrides the ones it supports. Callers dispatch on the result rather
/// than downcasting concrete types.
pub trait DataSource: Send + Sync {
    /// Try to cast to a container data source.
    fn as_container(&self) -> Option<&dyn ContainerDataSource> {
        None
    }

    /// Try to cast to a sampled data source.
    fn as_sampled(&self) -> Option<&dyn SampledDataSource> {
        None
    }

    /// Try to cast to a typed path data source.
    fn as_path(&self) -> Option<&dyn PathDataSource> {
        None
    }
}

/// A data source holding named children.
pub trait ContainerDataSource: DataSource {
    /// Check if a child exists.
    fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Names of all children, in the source's own order.
    fn names(&self) -> Vec<String>;

    /// Get a child by name.
    fn get(&self, name: &str) -> Option<DataSourceHandle>;
}

/// A data source holding a time-varying leaf value.
pub trait SampledDataSource: DataSource {
    /// The value at the given sample time.
    fn value(&self, time: SampleTime) -> Value;

    /// Sample times contributing to the given interval, or `None` when the
    /// source has no time samples beyond the queried value itself.
    fn contributing_sample_times(
        &self,
        start: SampleTime,
        end: SampleTime,
    ) -> Option<Vec<SampleTime>> {
        let _ = (start, end);
        None
    }
}

/// A sampled data source whose value is a scene path.
pub trait PathDataSource: SampledDataSource {
    /// The typed path value at the given sample time.
    fn path_value(&self, time: SampleTime) -> ScenePath;
}
