//! Generation-checked slot storage for a single entity type.
//!
//! Stores entities contiguously for cache-friendly iteration while
//! handing out stable, copyable [`Handle`]s that survive relocation and
//! detect use-after-destroy with one integer comparison. This crate
//! contains no `unsafe` code.
//!
//! # Architecture
//!
//! ```text
//! Manager<T>
//! ├── Vec<Atom<T>>   storage slots: Option<T> + alive flag + mark index
//! ├── Vec<Mark>      stable indirection: atom index + generation
//! └── ManagerMetrics cumulative counters
//!
//! Handle<T> = (ManagerId, MarkIndex, Generation)
//! ```
//!
//! # Lifecycle
//!
//! - **create:** the entity is constructed at the end of the used range
//!   and is invisible to iteration until the next refresh.
//! - **destroy:** only clears the alive flag. The entity stays in place.
//! - **refresh:** a two-cursor pass swaps survivors into holes, drops dead
//!   entities and advances their marks' generations, invalidating every
//!   handle to them at once.
//!
//! ```
//! use atomark_store::Manager;
//!
//! let mut manager = Manager::new();
//! let a = manager.create("a");
//! let b = manager.create("b");
//! manager.refresh();
//!
//! manager.destroy(a);
//! assert!(manager.is_alive(a));
//! manager.refresh();
//! assert!(!manager.is_alive(a));
//! assert_eq!(manager[b], "b");
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod atom;
pub mod config;
pub mod entity;
pub mod error;
pub mod handle;
pub mod manager;
mod mark;
pub mod metrics;

// Public re-exports for the primary API surface.
pub use atomark_core::{AtomIndex, Generation, ManagerId, MarkIndex};
pub use config::ManagerConfig;
pub use entity::{Entity, UpdateContext};
pub use error::{ConfigError, StoreError};
pub use handle::Handle;
pub use manager::Manager;
pub use metrics::{ManagerMetrics, RefreshStats, UpdateReport};
