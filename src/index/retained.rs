//! In-memory scene index.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::core::{
    AddedPrimEntry, ContainerDataSourceHandle, DirtiedPrimEntry, ObserverList, RemovedPrimEntry,
    SceneIndexObserver, ScenePath,
};
use crate::index::{SceneIndex, SceneIndexPrim};

/// One prim to insert into a [`RetainedSceneIndex`].
pub struct RetainedPrimEntry {
    pub prim_path: ScenePath,
    pub prim_type: String,
    pub data_source: Option<ContainerDataSourceHandle>,
}

/// A scene index backed by an in-memory prim map.
///
/// Mutations update the map and synchronously notify observers within the
/// same call. Useful as the input of filter indices and as a scene source
/// for procedurally generated content.
pub struct RetainedSceneIndex {
    prims: RwLock<BTreeMap<ScenePath, StoredPrim>>,
    observers: ObserverList,
}

struct StoredPrim {
    prim_type: String,
    data_source: Option<ContainerDataSourceHandle>,
}

impl RetainedSceneIndex {
    /// Create an empty index.
    pub fn new() -> Arc<Self> {
        Arc::new(Self { prims: RwLock::new(BTreeMap::new()), observers: ObserverList::new() })
    }

    /// Insert prims and notify observers with one added batch, in entry
    /// order.
    pub fn add_prims(&self, entries: Vec<RetainedPrimEntry>) {
        let mut notices = Vec::with_capacity(entries.len());
        {
            let mut prims = self.prims.write();
            for entry in entries {
                notices.push(AddedPrimEntry {
                    prim_path: entry.prim_path.clone(),
                    prim_type: entry.prim_type.clone(),
                });
                prims.insert(
                    entry.prim_path,
                    StoredPrim { prim_type: entry.prim_type, data_source: entry.data_source },
                );
            }
        }
        debug!(count = notices.len(), "retained index: prims added");
        self.observers.send_prims_added(&notices);
    }

    /// Remove each listed prim and its whole subtree, then notify
    /// observers with the batch as given.
    pub fn remove_prims(&self, entries: &[RemovedPrimEntry]) {
        {
            let mut prims = self.prims.write();
            for entry in entries {
                let doomed: Vec<ScenePath> = prims
                    .range(entry.prim_path.clone()..)
                    .take_while(|(path, _)| path.has_prefix(&entry.prim_path))
                    .map(|(path, _)| path.clone())
                    .collect();
                for path in doomed {
                    prims.remove(&path);
                }
            }
        }
        debug!(count = entries.len(), "retained index: prims removed");
        self.observers.send_prims_removed(entries);
    }

    /// Forward a dirtied batch to observers. The stored prims are live
    /// handles, so there is no index state to update.
    pub fn dirty_prims(&self, entries: &[DirtiedPrimEntry]) {
        self.observers.send_prims_dirtied(entries);
    }
}

impl SceneIndex for RetainedSceneIndex {
    fn get_prim(&self, prim_path: &ScenePath) -> SceneIndexPrim {
        match self.prims.read().get(prim_path) {
            Some(stored) => SceneIndexPrim {
                prim_type: stored.prim_type.clone(),
                data_source: stored.data_source.clone(),
            },
            None => SceneIndexPrim::empty(),
        }
    }

    fn get_child_prim_paths(&self, prim_path: &ScenePath) -> Vec<ScenePath> {
        // Descendants are contiguous after the path in the map's ordering.
        self.prims
            .read()
            .range(prim_path.clone()..)
            .take_while(|(path, _)| path.has_prefix(prim_path))
            .filter(|(path, _)| path.element_count() == prim_path.element_count() + 1)
            .map(|(path, _)| path.clone())
            .collect()
    }

    fn add_observer(&self, observer: &Arc<dyn SceneIndexObserver>) {
        self.observers.add(observer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{RetainedContainer, RetainedTypedSource, Value};

    fn p(text: &str) -> ScenePath {
        ScenePath::parse(text).unwrap()
    }

    fn entry(path: &str, prim_type: &str) -> RetainedPrimEntry {
        RetainedPrimEntry {
            prim_path: p(path),
            prim_type: prim_type.to_string(),
            data_source: Some(
                RetainedContainer::builder()
                    .set("value", RetainedTypedSource::new(Value::Int(1)))
                    .build(),
            ),
        }
    }

    #[test]
    fn test_get_prim_and_children() {
        let index = RetainedSceneIndex::new();
        index.add_prims(vec![
            entry("/A", "scope"),
            entry("/A/mesh", "mesh"),
            entry("/A/xform", "xform"),
            entry("/A/mesh/points", "points"),
            entry("/B", "scope"),
        ]);

        assert_eq!(index.get_prim(&p("/A/mesh")).prim_type, "mesh");
        assert!(index.get_prim(&p("/missing")).is_empty());

        assert_eq!(
            index.get_child_prim_paths(&p("/A")),
            vec![p("/A/mesh"), p("/A/xform")]
        );
        assert_eq!(index.get_child_prim_paths(&p("/")), vec![p("/A"), p("/B")]);
        assert_eq!(index.get_child_prim_paths(&p("/B")), Vec::<ScenePath>::new());
    }

    #[test]
    fn test_remove_prunes_subtree() {
        let index = RetainedSceneIndex::new();
        index.add_prims(vec![
            entry("/A", "scope"),
            entry("/A/mesh", "mesh"),
            entry("/A/mesh/points", "points"),
            entry("/AB", "scope"),
        ]);

        index.remove_prims(&[RemovedPrimEntry { prim_path: p("/A") }]);

        assert!(index.get_prim(&p("/A")).is_empty());
        assert!(index.get_prim(&p("/A/mesh/points")).is_empty());
        // A sibling whose name merely starts with "A" must survive.
        assert_eq!(index.get_prim(&p("/AB")).prim_type, "scope");
    }
}
