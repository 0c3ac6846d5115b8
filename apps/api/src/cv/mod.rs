// Normalized CV view model: normalizer, frozen store, join layer and the
// HTTP handlers that expose it.

pub mod handlers;
pub mod ids;
pub mod joins;
pub mod models;
pub mod normalize;
pub mod stack;
pub mod store;

pub use normalize::{normalize, NormalizeOptions};
pub use store::CvStore;
