//! Application state for fstation.
//!
//! - [view]: the [SortFilterEngine] holding the listing, sort order and query.
//! - [search_state]: the debounced [SearchCoordinator] feeding queries into the engine.
//! - [preview]: the [PreviewSlot] and its single live [PreviewSession].

pub mod preview;
pub mod search_state;
pub mod view;

pub use preview::{
    PreviewContent, PreviewError, PreviewSession, PreviewSlot, PreviewStatus,
    TEXT_PREVIEW_MAX_BYTES,
};
pub use search_state::{SEARCH_DEBOUNCE, SearchCoordinator};
pub use view::{SortDirection, SortFilterEngine, SortKey};
