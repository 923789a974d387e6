//! Scene index interfaces and implementations.
//!
//! A scene index is a pull-queried hierarchical namespace of prims that
//! pushes change notifications to registered observers:
//! - [`SceneIndex`] - the query + observation interface
//! - [`RetainedSceneIndex`] - an in-memory implementation
//! - [`PrefixingSceneIndex`] - a filter re-rooting another index under a
//!   prefix path

mod prefixing;
mod retained;

pub use prefixing::*;
pub use retained::*;

use std::sync::Arc;

use crate::core::{ContainerDataSourceHandle, SceneIndexObserver, ScenePath};

/// A prim returned by a scene index query: a type tag plus the root of
/// the prim's attribute tree. Produced on demand, never persisted by the
/// index layers themselves.
#[derive(Clone)]
pub struct SceneIndexPrim {
    pub prim_type: String,
    pub data_source: Option<ContainerDataSourceHandle>,
}

impl SceneIndexPrim {
    /// The empty prim: no type, no data source. Returned for paths the
    /// index knows nothing about.
    pub fn empty() -> Self {
        Self { prim_type: String::new(), data_source: None }
    }

    /// Check if this is the empty prim.
    pub fn is_empty(&self) -> bool {
        self.prim_type.is_empty() && self.data_source.is_none()
    }
}

/// Query + observation interface of a scene index.
///
/// Queries are synchronous and side-effect free; implementations must be
/// safe for concurrent readers. Notices are pushed to observers on
/// whatever thread performs the mutation.
pub trait SceneIndex: Send + Sync {
    /// The prim at `prim_path`, or the empty prim.
    fn get_prim(&self, prim_path: &ScenePath) -> SceneIndexPrim;

    /// Paths of the direct children of `prim_path`, in the index's own
    /// order.
    fn get_child_prim_paths(&self, prim_path: &ScenePath) -> Vec<ScenePath>;

    /// Register an observer for mutation notices. The registration is
    /// weak; dropping the observer unregisters it.
    fn add_observer(&self, observer: &Arc<dyn SceneIndexObserver>);
}
