//! Backend API access and local caches.

pub mod api;
pub mod cache;
