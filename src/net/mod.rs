//! Network layer: wire types and the blog API client.

pub mod api;
pub mod types;
