// LaTeX export: renders the frozen store as a two-column A4 CV.
// Pure functions of `CvStore`; no I/O.

pub mod escape;
pub mod sections;

pub use sections::render_cv;
