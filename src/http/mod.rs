//! Degenerate HTTP surface.
//!
//! The sentinel speaks just enough HTTP/1.1 for an httpchk-style probe:
//! one fixed-shape response per connection, no request parsing, no
//! keep-alive, no headers beyond content type and length.

pub mod response;
pub mod server;

pub use response::render;
pub use server::Sentinel;
