//! Scanning layer: image references, normalized reports, snapshots.

pub mod domain;
pub mod normalize;
