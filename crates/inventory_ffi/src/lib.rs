//! Flutter-facing bindings for the inventory core.

pub mod api;
