pub mod candidates;
pub mod layer;
pub mod pane;

pub use candidates::*;
pub use layer::*;
pub use pane::*;
