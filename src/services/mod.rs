//! Abstractions over the hosted services the tracker talks to.

pub mod user_store;
