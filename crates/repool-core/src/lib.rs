//! # repool-core
//!
//! Keyed object pools for hosts that churn through short-lived items.
//!
//! A [`container::PoolContainer`] owns the reusable items of one kind and
//! services acquire/release requests with round-robin slot selection and
//! on-demand growth. A [`registry::PoolRegistry`] multiplexes many containers
//! behind a single key space and routes releases back to the owning container
//! without the caller having to remember which key an item came from.
//!
//! The core is synchronous and single-threaded; see `repool-host` for the
//! shared wrapper and the deferred release queue.
#![warn(missing_docs)]

pub mod container;
pub mod error;
pub mod registry;
pub mod slot;
pub mod stats;
pub mod ticket;
