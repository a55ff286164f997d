//! Plain-text presentation for fstation.
//!
//! [render] turns a projection and a preview session into the text the `fst` binary prints.
//! Nothing here owns state; everything is computed from the app types passed in.

pub mod render;

pub use render::{EmptyState, empty_state, render_listing, render_preview};
