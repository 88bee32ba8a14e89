//! Test utilities and fixture entities for atomark development.
//!
//! Provides entities that exercise the manager's lifecycle hooks:
//! a [`Countdown`] that destroys itself after a number of ticks, a
//! seeded [`CountdownFactory`], and a [`DropProbe`] that records every
//! destructor call in a shared [`DropLog`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{Countdown, CountdownFactory, DropLog, DropProbe};
