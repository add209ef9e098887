//! Document structure extraction: spans, heading detection, hierarchy.

mod detector;
mod hierarchy;
mod options;
mod pipeline;
mod spans;

pub use detector::{detect_candidates, HeadingCandidate};
pub use hierarchy::assign_hierarchy;
pub use options::ExtractOptions;
pub use pipeline::OutlineExtractor;
pub use spans::SpanExtractor;
