//! Flutter-facing bindings over `stakeboard_core`.

pub mod api;
