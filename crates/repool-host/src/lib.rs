//! # repool-host
//!
//! Glue between a `repool_core` registry and the host loop that drives it:
//! a deferred release queue drained once per tick, spawn/despawn adapters
//! with activate/deactivate hooks, and a coarse-lock shared registry for
//! hosts with more than one thread.
#![warn(missing_docs)]

pub mod recycler;
pub mod shared;
pub mod spawn;
