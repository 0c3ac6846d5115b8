// Raw Content Store: YAML records as authored under the data directory.
// Nothing here interprets the records; see `cv::normalize` for that.

pub mod loader;
pub mod models;

pub use loader::load_content;
