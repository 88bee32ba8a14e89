//! Core types for the atomark slot manager.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the strongly-typed identifiers shared by the storage crate and its
//! users: slot indices, generation counters and manager identities.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod id;

pub use id::{AtomIndex, Generation, ManagerId, MarkIndex};
