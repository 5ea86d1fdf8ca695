//! Static sign-language letter recognition from hand silhouettes.
//!
//! One stateless pipeline, invoked once per frame: decode the payload,
//! crop the fixed capture box, binarize the hand silhouette, extract its
//! contour and convexity defects, and map the valley count to one of the
//! letters A, B, C, V or W. Nothing persists between frames; concurrent
//! invocations are independent.

pub mod gesture;
pub mod pipeline;
pub mod types;

pub use pipeline::{classify_decoded, classify_frame, start_classifier};
pub use types::{FrameError, Letter, Recognition, Tuning};
