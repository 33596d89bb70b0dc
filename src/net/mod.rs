//! Network foundation.

pub mod listener;

pub use listener::{ConnectionPermit, Listener, ListenerError};
