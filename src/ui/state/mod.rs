//! Framework-free state containers behind the interactive widgets.
//!
//! These are plain structs mutated inside Dioxus signals, so the pages own
//! every instance and tests can drive them without a renderer.

pub mod date_range;
pub mod modal;
pub mod sort;

#[allow(unused_imports)]
pub use date_range::{DatePreset, DateRange};
#[allow(unused_imports)]
pub use modal::{ModalGroup, ModalState};
#[allow(unused_imports)]
pub use sort::{sort_rows, SortKey, SortOrder, SortState};
