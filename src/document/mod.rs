//! The single document buffer and its change notifications.
//!
//! [`DocumentStore`] owns the markdown source. Every [`DocumentStore::set`]
//! notifies subscribers synchronously and in subscription order, so the
//! preview and autosave always observe the value that was just stored.

mod store;

pub use store::{DocumentStore, Subscription};
