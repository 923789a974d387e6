//! # scene-index
//!
//! A pull-queried hierarchical scene graph with push change notifications,
//! plus a prefixing filter that re-roots one scene under an arbitrary
//! path so the same asset can be mounted several times into a larger
//! graph without path collisions.
//!
//! ## Modules
//!
//! - [`util`] - Basic types (errors, sample time)
//! - [`core`] - Paths, data source traits, retained sources, observers
//! - [`index`] - Scene index trait, retained index, prefixing filter
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use scene_index::prelude::*;
//!
//! let input = RetainedSceneIndex::new();
//! input.add_prims(vec![RetainedPrimEntry {
//!     prim_path: ScenePath::parse("/asset")?,
//!     prim_type: "scope".to_string(),
//!     data_source: None,
//! }]);
//!
//! let mounted = PrefixingSceneIndex::new(
//!     input.clone() as Arc<dyn SceneIndex>,
//!     ScenePath::parse("/World/left")?,
//! )?;
//!
//! assert_eq!(
//!     mounted.get_prim(&ScenePath::parse("/World/left/asset")?).prim_type,
//!     "scope",
//! );
//! # Ok::<(), scene_index::Error>(())
//! ```

pub mod core;
pub mod index;
pub mod util;

// Re-export commonly used types
pub use crate::core::{DataSourceHandle, ScenePath, Value};
pub use crate::index::{PrefixingSceneIndex, SceneIndex, SceneIndexPrim};
pub use crate::util::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        AddedPrimEntry, ContainerDataSource, ContainerDataSourceHandle, DataSource,
        DataSourceHandle, DirtiedPrimEntry, DirtyLocatorSet, PathDataSource, RemovedPrimEntry,
        RetainedContainer, RetainedPathSource, RetainedSampledSource, RetainedTypedSource,
        SampledDataSource, SceneIndexObserver, ScenePath, Value,
    };
    pub use crate::index::{
        PrefixingSceneIndex, RetainedPrimEntry, RetainedSceneIndex, SceneIndex, SceneIndexPrim,
    };
    pub use crate::util::{Error, Result, SampleTime};
}
