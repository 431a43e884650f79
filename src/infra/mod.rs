//! Concrete implementations of the [`services`](crate::services) traits.

pub mod local_store;

pub use local_store::LocalStore;
