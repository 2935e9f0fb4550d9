//! The view tree: a story list that renders one item per story.

mod item;
mod top_items;

pub use item::{Author, Id, Item, ItemData};
pub use top_items::{SelectionState, StoryType, TopItems, TopItemsData, STORY_TYPE};

use std::{fmt, sync::Arc};

use query_binding::Fragment;

/// A view renders itself as text and declares, as a fragment, the data it reads.
pub trait View: fmt::Display {
    fn fragment() -> Arc<Fragment>;
}
