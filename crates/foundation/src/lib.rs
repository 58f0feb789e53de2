pub mod clip;
pub mod point;

// Foundation crate: small, well-tested primitives only.
pub use clip::*;
pub use point::*;
