/// Domain value types for the scanning pipeline.
///
/// Everything in this module is a pure, immutable value: construction and
/// derived views only, no I/O.
pub mod component;
pub mod image;
pub mod snapshot;
pub mod vulnerability;

pub use component::Component;
pub use image::ImageRef;
pub use snapshot::Snapshot;
pub use vulnerability::{Severity, Vulnerability};
