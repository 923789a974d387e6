//! Prefixing scene index.
//!
//! Re-roots an input scene index under a prefix path so the same scene can
//! be mounted anywhere in a larger graph without path collisions. Queries
//! strip the prefix before delegating to the input; returned attribute
//! trees are wrapped lazily so path-valued attributes read back in the
//! prefixed space; mutation notices flow through with every path
//! re-prefixed, synchronously and in order.
//!
//! The filter owns no scene state. Every call re-derives its result from
//! the live input, so it stays consistent with concurrent input mutation
//! for free.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::core::{
    AddedPrimEntry, ContainerDataSource, ContainerDataSourceHandle, DataSource, DataSourceHandle,
    DirtiedPrimEntry, ObserverList, PathDataSource, RemovedPrimEntry, SampledDataSource,
    SceneIndexObserver, ScenePath, Value,
};
use crate::index::{SceneIndex, SceneIndexPrim};
use crate::util::{Error, Result, SampleTime};

// ============================================================================
// Data source wrappers
// ============================================================================

/// Wraps a path-valued leaf, translating absolute values into the
/// prefixed space on every read.
struct PrefixingPathDataSource {
    prefix: Arc<ScenePath>,
    input: Option<DataSourceHandle>,
}

impl PrefixingPathDataSource {
    fn new(prefix: Arc<ScenePath>, input: DataSourceHandle) -> DataSourceHandle {
        Arc::new(Self { prefix, input: Some(input) })
    }
}

impl DataSource for PrefixingPathDataSource {
    fn as_sampled(&self) -> Option<&dyn SampledDataSource> {
        Some(self)
    }

    fn as_path(&self) -> Option<&dyn PathDataSource> {
        Some(self)
    }
}

impl SampledDataSource for PrefixingPathDataSource {
    fn value(&self, time: SampleTime) -> Value {
        Value::Path(self.path_value(time))
    }

    fn contributing_sample_times(
        &self,
        start: SampleTime,
        end: SampleTime,
    ) -> Option<Vec<SampleTime>> {
        // Time-sampling structure is unaffected by path rewriting.
        self.input
            .as_deref()
            .and_then(|source| source.as_sampled())
            .and_then(|sampled| sampled.contributing_sample_times(start, end))
    }
}

impl PathDataSource for PrefixingPathDataSource {
    fn path_value(&self, time: SampleTime) -> ScenePath {
        let Some(source) = self.input.as_deref().and_then(|source| source.as_path()) else {
            return ScenePath::empty();
        };
        let result = source.path_value(time);
        if result.is_absolute() {
            result.replace_prefix(&ScenePath::absolute_root(), &self.prefix)
        } else {
            // Relative values are mount-point independent.
            result
        }
    }
}

/// Wraps a container, rewrapping children on access so path-valued
/// attributes anywhere in the tree read back in the prefixed space.
///
/// Wrapping is lazy: one wrapper costs O(1) and nothing below it is
/// touched until a consumer fetches it with [`ContainerDataSource::get`].
struct PrefixingContainerDataSource {
    prefix: Arc<ScenePath>,
    input: Option<DataSourceHandle>,
}

impl PrefixingContainerDataSource {
    fn new(prefix: Arc<ScenePath>, input: DataSourceHandle) -> ContainerDataSourceHandle {
        Arc::new(Self { prefix, input: Some(input) })
    }

    fn container(&self) -> Option<&dyn ContainerDataSource> {
        self.input.as_deref().and_then(|source| source.as_container())
    }
}

impl DataSource for PrefixingContainerDataSource {
    fn as_container(&self) -> Option<&dyn ContainerDataSource> {
        Some(self)
    }
}

impl ContainerDataSource for PrefixingContainerDataSource {
    fn has(&self, name: &str) -> bool {
        self.container().is_some_and(|container| container.has(name))
    }

    fn names(&self) -> Vec<String> {
        self.container().map(|container| container.names()).unwrap_or_default()
    }

    fn get(&self, name: &str) -> Option<DataSourceHandle> {
        let child = self.container()?.get(name)?;

        // Wrap child containers so that we can wrap their children.
        if child.as_container().is_some() {
            return Some(Arc::new(Self {
                prefix: Arc::clone(&self.prefix),
                input: Some(child),
            }));
        }

        if child.as_path().is_some() {
            return Some(PrefixingPathDataSource::new(Arc::clone(&self.prefix), child));
        }

        Some(child)
    }
}

// ============================================================================
// Observer relay
// ============================================================================

/// Registered with the input index; re-prefixes every notice batch and
/// forwards it to the filter's own observers within the same call.
struct PrefixingObserverRelay {
    prefix: Arc<ScenePath>,
    downstream: ObserverList,
}

impl PrefixingObserverRelay {
    fn add_prefix(&self, path: &ScenePath) -> ScenePath {
        path.replace_prefix(&ScenePath::absolute_root(), &self.prefix)
    }
}

impl SceneIndexObserver for PrefixingObserverRelay {
    fn prims_added(&self, entries: &[AddedPrimEntry]) {
        trace!(count = entries.len(), "prefixing relay: prims added");
        let prefixed: Vec<AddedPrimEntry> = entries
            .iter()
            .map(|entry| AddedPrimEntry {
                prim_path: self.add_prefix(&entry.prim_path),
                prim_type: entry.prim_type.clone(),
            })
            .collect();
        self.downstream.send_prims_added(&prefixed);
    }

    fn prims_removed(&self, entries: &[RemovedPrimEntry]) {
        trace!(count = entries.len(), "prefixing relay: prims removed");
        let prefixed: Vec<RemovedPrimEntry> = entries
            .iter()
            .map(|entry| RemovedPrimEntry { prim_path: self.add_prefix(&entry.prim_path) })
            .collect();
        self.downstream.send_prims_removed(&prefixed);
    }

    fn prims_dirtied(&self, entries: &[DirtiedPrimEntry]) {
        trace!(count = entries.len(), "prefixing relay: prims dirtied");
        let prefixed: Vec<DirtiedPrimEntry> = entries
            .iter()
            .map(|entry| DirtiedPrimEntry {
                prim_path: self.add_prefix(&entry.prim_path),
                dirty_locators: entry.dirty_locators.clone(),
            })
            .collect();
        self.downstream.send_prims_dirtied(&prefixed);
    }
}

// ============================================================================
// The filter
// ============================================================================

/// A filter scene index exposing the input's scene under a prefix path.
///
/// The prefix is fixed at construction. For every path `p` under the
/// prefix, `get_prim(p)` answers with the input's prim at the path with
/// the prefix stripped, its attribute tree wrapped for lazy path
/// rewriting. Paths outside the prefix are holes, except that ancestors
/// of the prefix enumerate the mount point as a synthetic child so the
/// mounted subtree stays discoverable from the true root.
///
/// With the absolute root as prefix the filter degenerates to an identity
/// passthrough.
pub struct PrefixingSceneIndex {
    input: Arc<dyn SceneIndex>,
    prefix: Arc<ScenePath>,
    relay: Arc<PrefixingObserverRelay>,
}

impl PrefixingSceneIndex {
    /// Mount `input` under `prefix`. The prefix must be an absolute path.
    ///
    /// The filter subscribes to the input's notices at construction;
    /// dropping the filter unsubscribes it.
    pub fn new(input: Arc<dyn SceneIndex>, prefix: ScenePath) -> Result<Arc<Self>> {
        if !prefix.is_absolute() {
            return Err(Error::RelativePrefix(prefix.to_string()));
        }
        debug!(prefix = %prefix, "prefixing scene index: mounting input");

        let prefix = Arc::new(prefix);
        let relay = Arc::new(PrefixingObserverRelay {
            prefix: Arc::clone(&prefix),
            downstream: ObserverList::new(),
        });
        input.add_observer(&(Arc::clone(&relay) as Arc<dyn SceneIndexObserver>));

        Ok(Arc::new(Self { input, prefix, relay }))
    }

    /// The prefix this filter mounts its input under.
    pub fn prefix(&self) -> &ScenePath {
        &self.prefix
    }

    fn add_path_prefix(&self, path: &ScenePath) -> ScenePath {
        path.replace_prefix(&ScenePath::absolute_root(), &self.prefix)
    }

    fn remove_path_prefix(&self, path: &ScenePath) -> ScenePath {
        path.replace_prefix(&self.prefix, &ScenePath::absolute_root())
    }
}

impl SceneIndex for PrefixingSceneIndex {
    fn get_prim(&self, prim_path: &ScenePath) -> SceneIndexPrim {
        if !prim_path.has_prefix(&self.prefix) {
            return SceneIndexPrim::empty();
        }

        let mut prim = self.input.get_prim(&self.remove_path_prefix(prim_path));

        if let Some(data_source) = prim.data_source.take() {
            prim.data_source =
                Some(PrefixingContainerDataSource::new(Arc::clone(&self.prefix), data_source));
        }

        prim
    }

    fn get_child_prim_paths(&self, prim_path: &ScenePath) -> Vec<ScenePath> {
        // Under the prefix: strip it and let the input answer, then move
        // each child back into the prefixed space, preserving order.
        if prim_path.has_prefix(&self.prefix) {
            return self
                .input
                .get_child_prim_paths(&self.remove_path_prefix(prim_path))
                .iter()
                .map(|child| self.add_path_prefix(child))
                .collect();
        }

        // Strict ancestor of the prefix: expose the mount point as a
        // synthetic child. With prefix /A/B/C/D, asking at /A/B answers
        // ["/A/B/C"] even though the input knows nothing above its root.
        if self.prefix.has_prefix(prim_path) {
            return vec![self.prefix.truncated(prim_path.element_count() + 1)];
        }

        Vec::new()
    }

    fn add_observer(&self, observer: &Arc<dyn SceneIndexObserver>) {
        self.relay.downstream.add(observer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{RetainedContainer, RetainedPathSource, RetainedTypedSource};

    fn p(text: &str) -> ScenePath {
        ScenePath::parse(text).unwrap()
    }

    fn prefix() -> Arc<ScenePath> {
        Arc::new(p("/Mount"))
    }

    #[test]
    fn test_path_source_rewrites_absolute_values() {
        let source =
            PrefixingPathDataSource::new(prefix(), RetainedPathSource::new(p("/target/y")));
        let typed = source.as_path().unwrap();
        assert_eq!(typed.path_value(0.0), p("/Mount/target/y"));
        assert_eq!(
            source.as_sampled().unwrap().value(0.0),
            Value::Path(p("/Mount/target/y"))
        );
    }

    #[test]
    fn test_path_source_keeps_relative_values() {
        let source =
            PrefixingPathDataSource::new(prefix(), RetainedPathSource::new(p("sibling/y")));
        assert_eq!(source.as_path().unwrap().path_value(0.0), p("sibling/y"));
    }

    #[test]
    fn test_path_source_over_missing_input() {
        let source = PrefixingPathDataSource { prefix: prefix(), input: None };
        assert_eq!(source.path_value(0.0), ScenePath::empty());
        assert_eq!(source.contributing_sample_times(0.0, 1.0), None);
    }

    #[test]
    fn test_container_wrapper_over_missing_input() {
        let container = PrefixingContainerDataSource { prefix: prefix(), input: None };
        assert!(!container.has("anything"));
        assert!(container.names().is_empty());
        assert!(container.get("anything").is_none());
    }

    #[test]
    fn test_container_wrapper_passes_scalars_through() {
        let inner = RetainedContainer::builder()
            .set("radius", RetainedTypedSource::new(Value::Double(2.0)))
            .build();
        let wrapped = PrefixingContainerDataSource::new(prefix(), inner);

        let leaf = wrapped.get("radius").unwrap();
        assert!(leaf.as_path().is_none());
        assert_eq!(leaf.as_sampled().unwrap().value(0.0), Value::Double(2.0));
    }

    #[test]
    fn test_container_wrapper_rewrites_nested_paths() {
        let inner = RetainedContainer::builder()
            .set(
                "material",
                RetainedContainer::builder()
                    .set("binding", RetainedPathSource::new(p("/looks/steel")))
                    .build(),
            )
            .build();
        let wrapped = PrefixingContainerDataSource::new(prefix(), inner);

        let material = wrapped.get("material").unwrap();
        let binding = material.as_container().unwrap().get("binding").unwrap();
        assert_eq!(
            binding.as_path().unwrap().path_value(0.0),
            p("/Mount/looks/steel")
        );
    }
}
