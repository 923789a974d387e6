//! Retained (in-memory) data sources.
//!
//! Concrete sources for building attribute trees directly in memory, used
//! by tests and by producers that synthesize scene content rather than
//! reading it from elsewhere.

use std::sync::Arc;

use crate::core::{
    ContainerDataSource, ContainerDataSourceHandle, DataSource, DataSourceHandle, PathDataSource,
    SampledDataSource, ScenePath, Value,
};
use crate::util::SampleTime;

// ============================================================================
// Containers
// ============================================================================

/// An in-memory container: an ordered list of named children.
pub struct RetainedContainer {
    entries: Vec<(String, DataSourceHandle)>,
}

impl RetainedContainer {
    /// Build a container from (name, child) pairs, preserving order.
    pub fn new(entries: Vec<(String, DataSourceHandle)>) -> ContainerDataSourceHandle {
        Arc::new(Self { entries })
    }

    /// Start an empty container builder.
    pub fn builder() -> RetainedContainerBuilder {
        RetainedContainerBuilder { entries: Vec::new() }
    }
}

impl DataSource for RetainedContainer {
    fn as_container(&self) -> Option<&dyn ContainerDataSource> {
        Some(self)
    }
}

impl ContainerDataSource for RetainedContainer {
    fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(n, _)| n.clone()).collect()
    }

    fn get(&self, name: &str) -> Option<DataSourceHandle> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, child)| Arc::clone(child))
    }
}

/// Builder for [`RetainedContainer`].
pub struct RetainedContainerBuilder {
    entries: Vec<(String, DataSourceHandle)>,
}

impl RetainedContainerBuilder {
    /// Add a named child.
    pub fn set(mut self, name: impl Into<String>, child: DataSourceHandle) -> Self {
        self.entries.push((name.into(), child));
        self
    }

    /// Finish building the container.
    pub fn build(self) -> ContainerDataSourceHandle {
        RetainedContainer::new(self.entries)
    }
}

// ============================================================================
// Leaves
// ============================================================================

/// An in-memory constant value, the same at every sample time.
pub struct RetainedTypedSource {
    value: Value,
}

impl RetainedTypedSource {
    /// Build a constant-value source.
    pub fn new(value: Value) -> DataSourceHandle {
        Arc::new(Self { value })
    }
}

impl DataSource for RetainedTypedSource {
    fn as_sampled(&self) -> Option<&dyn SampledDataSource> {
        Some(self)
    }

    fn as_path(&self) -> Option<&dyn PathDataSource> {
        if matches!(self.value, Value::Path(_)) {
            Some(self)
        } else {
            None
        }
    }
}

impl SampledDataSource for RetainedTypedSource {
    fn value(&self, _time: SampleTime) -> Value {
        self.value.clone()
    }
}

impl PathDataSource for RetainedTypedSource {
    fn path_value(&self, _time: SampleTime) -> ScenePath {
        self.value.as_path().cloned().unwrap_or_else(ScenePath::empty)
    }
}

/// An in-memory constant path value.
pub struct RetainedPathSource;

impl RetainedPathSource {
    /// Build a constant path source.
    pub fn new(path: ScenePath) -> DataSourceHandle {
        RetainedTypedSource::new(Value::Path(path))
    }
}

/// An in-memory time-sampled value with explicit (time, value) samples.
///
/// Lookup uses held-value semantics: the sample with the greatest time not
/// after the query time, or the first sample before it.
pub struct RetainedSampledSource {
    samples: Vec<(SampleTime, Value)>,
}

impl RetainedSampledSource {
    /// Build a sampled source; `samples` must be sorted by ascending time.
    ///
    /// # Panics
    ///
    /// Panics if `samples` is empty.
    pub fn new(samples: Vec<(SampleTime, Value)>) -> DataSourceHandle {
        assert!(!samples.is_empty(), "sampled source requires at least one sample");
        Arc::new(Self { samples })
    }

    fn sample_at(&self, time: SampleTime) -> &Value {
        let mut current = &self.samples[0].1;
        for (sample_time, value) in &self.samples {
            if *sample_time > time {
                break;
            }
            current = value;
        }
        current
    }
}

impl DataSource for RetainedSampledSource {
    fn as_sampled(&self) -> Option<&dyn SampledDataSource> {
        Some(self)
    }

    fn as_path(&self) -> Option<&dyn PathDataSource> {
        if matches!(self.samples[0].1, Value::Path(_)) {
            Some(self)
        } else {
            None
        }
    }
}

impl SampledDataSource for RetainedSampledSource {
    fn value(&self, time: SampleTime) -> Value {
        self.sample_at(time).clone()
    }

    fn contributing_sample_times(
        &self,
        start: SampleTime,
        end: SampleTime,
    ) -> Option<Vec<SampleTime>> {
        if self.samples.len() <= 1 {
            return None;
        }
        Some(
            self.samples
                .iter()
                .map(|(time, _)| *time)
                .filter(|time| *time >= start && *time <= end)
                .collect(),
        )
    }
}

impl PathDataSource for RetainedSampledSource {
    fn path_value(&self, time: SampleTime) -> ScenePath {
        self.sample_at(time).as_path().cloned().unwrap_or_else(ScenePath::empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_lookup_preserves_order() {
        let container = RetainedContainer::builder()
            .set("z", RetainedTypedSource::new(Value::Int(1)))
            .set("a", RetainedTypedSource::new(Value::Int(2)))
            .build();

        assert_eq!(container.names(), vec!["z", "a"]);
        assert!(container.has("z"));
        assert!(!container.has("missing"));
        assert!(container.get("missing").is_none());

        let child = container.get("a").unwrap();
        let sampled = child.as_sampled().unwrap();
        assert_eq!(sampled.value(0.0), Value::Int(2));
    }

    #[test]
    fn test_capability_casts() {
        let scalar = RetainedTypedSource::new(Value::Double(1.5));
        assert!(scalar.as_container().is_none());
        assert!(scalar.as_sampled().is_some());
        assert!(scalar.as_path().is_none());

        let path = RetainedPathSource::new(ScenePath::parse("/x").unwrap());
        assert!(path.as_path().is_some());
        assert_eq!(
            path.as_path().unwrap().path_value(0.0),
            ScenePath::parse("/x").unwrap()
        );
    }

    #[test]
    fn test_sampled_source_held_values() {
        let source = RetainedSampledSource::new(vec![
            (0.0, Value::Int(10)),
            (1.0, Value::Int(20)),
            (2.0, Value::Int(30)),
        ]);
        let sampled = source.as_sampled().unwrap();

        assert_eq!(sampled.value(-1.0), Value::Int(10));
        assert_eq!(sampled.value(1.5), Value::Int(20));
        assert_eq!(sampled.value(5.0), Value::Int(30));
        assert_eq!(
            sampled.contributing_sample_times(0.5, 2.0),
            Some(vec![1.0, 2.0])
        );
    }

    #[test]
    #[should_panic(expected = "at least one sample")]
    fn test_sampled_source_rejects_empty_samples() {
        RetainedSampledSource::new(Vec::new());
    }

    #[test]
    fn test_constant_source_has_no_sample_times() {
        let source = RetainedTypedSource::new(Value::Bool(true));
        let sampled = source.as_sampled().unwrap();
        assert_eq!(sampled.contributing_sample_times(0.0, 10.0), None);
    }
}
