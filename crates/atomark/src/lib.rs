//! Atomark: contiguous entity storage with generation-checked handles.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the atomark sub-crates. For most users, adding `atomark` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use atomark::prelude::*;
//!
//! // An entity that lives for a fixed number of ticks.
//! struct Spark {
//!     ttl: u32,
//! }
//!
//! impl Entity for Spark {
//!     fn update(&mut self, ctx: &mut UpdateContext<'_, Self>) {
//!         self.ttl -= 1;
//!         if self.ttl == 0 {
//!             ctx.destroy_self();
//!         }
//!     }
//! }
//!
//! let mut manager = Manager::new();
//! let short = manager.create(Spark { ttl: 1 });
//! let long = manager.create(Spark { ttl: 3 });
//!
//! // New entities become visible on refresh.
//! manager.refresh();
//! manager.update(1.0 / 60.0);
//! manager.refresh();
//!
//! assert!(!manager.is_alive(short));
//! assert_eq!(manager[long].ttl, 2);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `atomark-core` | Mark/atom indices, generations, manager ids |
//! | [`store`] | `atomark-store` | `Manager`, `Handle`, the `Entity` trait, config and errors |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Identifier types (`atomark-core`).
pub use atomark_core as types;

/// Slot storage, handles and the update protocol (`atomark-store`).
///
/// Most users only need [`store::Manager`] and [`store::Handle`]; both
/// are also available in the [`prelude`].
pub use atomark_store as store;

/// Common imports for typical atomark usage.
///
/// ```rust
/// use atomark::prelude::*;
/// ```
pub mod prelude {
    // Storage
    pub use atomark_store::{Handle, Manager, ManagerConfig};

    // Update protocol
    pub use atomark_store::{Entity, UpdateContext, UpdateReport};

    // Errors
    pub use atomark_store::{ConfigError, StoreError};

    // Identifiers
    pub use atomark_core::{Generation, MarkIndex};
}
