//! Change-notification types.
//!
//! Scene indices push mutation notices to registered observers as batches
//! of added / removed / dirtied entries. Delivery is synchronous: a notice
//! reaches every live observer within the call that raised it, in
//! registration order.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::core::ScenePath;

/// An opaque description of which parts of a prim changed.
///
/// Filters carry locator sets through unexamined; only end consumers
/// interpret them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirtyLocatorSet {
    locators: Vec<String>,
}

impl DirtyLocatorSet {
    /// Build a locator set from locator names.
    pub fn new<I, S>(locators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { locators: locators.into_iter().map(Into::into).collect() }
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }

    /// Iterate over the locator names.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.locators.iter().map(String::as_str)
    }
}

/// One prim added to (or re-announced in) the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct AddedPrimEntry {
    pub prim_path: ScenePath,
    pub prim_type: String,
}

/// One prim (and its subtree) removed from the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct RemovedPrimEntry {
    pub prim_path: ScenePath,
}

/// One prim whose data changed.
#[derive(Clone, Debug, PartialEq)]
pub struct DirtiedPrimEntry {
    pub prim_path: ScenePath,
    pub dirty_locators: DirtyLocatorSet,
}

/// Downstream listener for scene mutation notices.
pub trait SceneIndexObserver: Send + Sync {
    /// Prims were added.
    fn prims_added(&self, entries: &[AddedPrimEntry]);

    /// Prims were removed.
    fn prims_removed(&self, entries: &[RemovedPrimEntry]);

    /// Prim data changed.
    fn prims_dirtied(&self, entries: &[DirtiedPrimEntry]);
}

/// Registry of observers held by a scene index.
///
/// Observers are held weakly; a dropped observer unregisters itself, and
/// dead entries are pruned on the next notify pass. Notices are delivered
/// outside the registry lock so an observer may register further
/// observers from within a callback.
#[derive(Default)]
pub struct ObserverList {
    observers: RwLock<Vec<Weak<dyn SceneIndexObserver>>>,
}

impl ObserverList {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer.
    pub fn add(&self, observer: &Arc<dyn SceneIndexObserver>) {
        self.observers.write().push(Arc::downgrade(observer));
    }

    /// Number of live observers.
    pub fn len(&self) -> usize {
        self.observers.read().iter().filter(|weak| weak.strong_count() > 0).count()
    }

    /// Check if there are no live observers.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn live(&self) -> Vec<Arc<dyn SceneIndexObserver>> {
        let mut observers = self.observers.write();
        let mut live = Vec::with_capacity(observers.len());
        observers.retain(|weak| match weak.upgrade() {
            Some(observer) => {
                live.push(observer);
                true
            }
            None => false,
        });
        live
    }

    /// Deliver an added batch to every live observer.
    pub fn send_prims_added(&self, entries: &[AddedPrimEntry]) {
        for observer in self.live() {
            observer.prims_added(entries);
        }
    }

    /// Deliver a removed batch to every live observer.
    pub fn send_prims_removed(&self, entries: &[RemovedPrimEntry]) {
        for observer in self.live() {
            observer.prims_removed(entries);
        }
    }

    /// Deliver a dirtied batch to every live observer.
    pub fn send_prims_dirtied(&self, entries: &[DirtiedPrimEntry]) {
        for observer in self.live() {
            observer.prims_dirtied(entries);
        }
    }
}
