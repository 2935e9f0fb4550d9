use std::{
    fmt,
    str::FromStr,
    sync::{Arc, LazyLock},
};

use query_binding::{ArgumentValue, Fragment, Variables};
use serde::Deserialize;

use super::{Item, ItemData, View};
use crate::{UnknownStoryType, VariableSink};

/// The variable that carries the selected story type.
pub const STORY_TYPE: &str = "storyType";

static FRAGMENT: LazyLock<Arc<Fragment>> = LazyLock::new(|| {
    Fragment::new("TopItems_store", "HackerNewsAPI", |api| {
        api.field_with("stories", |stories| {
            stories
                .argument(STORY_TYPE, ArgumentValue::variable(STORY_TYPE))
                .spread(Item::fragment())
        })
    })
});

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StoryType {
    #[default]
    Top,
    New,
    Ask,
    Show,
}

impl StoryType {
    pub const ALL: [StoryType; 4] = [StoryType::Top, StoryType::New, StoryType::Ask, StoryType::Show];

    /// The value sent as the `storyType` argument.
    pub fn as_str(self) -> &'static str {
        match self {
            StoryType::Top => "top",
            StoryType::New => "new",
            StoryType::Ask => "ask",
            StoryType::Show => "show",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StoryType::Top => "Top",
            StoryType::New => "New",
            StoryType::Ask => "Ask HN",
            StoryType::Show => "Show HN",
        }
    }
}

impl FromStr for StoryType {
    type Err = UnknownStoryType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StoryType::ALL
            .into_iter()
            .find(|story_type| story_type.as_str() == s)
            .ok_or_else(|| UnknownStoryType(s.to_owned()))
    }
}

impl fmt::Display for StoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the data on screen matches the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    VariableApplied,
    VariablePending,
}

/// The list fragment's data. The server may return `null` for the list or its entries.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct TopItemsData {
    pub stories: Option<Vec<Option<ItemData>>>,
}

impl TopItemsData {
    pub fn stories(&self) -> impl Iterator<Item = &ItemData> {
        self.stories.iter().flatten().flatten()
    }
}

/// The story list: a selector over the four story types followed by one item per story.
#[derive(Debug)]
pub struct TopItems {
    selected: StoryType,
    state: SelectionState,
    data: TopItemsData,
}

impl TopItems {
    /// A list showing `data`, fetched for the `selected` story type.
    pub fn new(selected: StoryType, data: TopItemsData) -> Self {
        TopItems {
            selected,
            state: SelectionState::VariableApplied,
            data,
        }
    }

    /// Reads the initial selection from the route's `storyType` binding.
    pub fn from_variables(variables: &Variables, data: TopItemsData) -> Result<Self, UnknownStoryType> {
        let selected = match variables.get_str(STORY_TYPE) {
            Some(story_type) => story_type.parse()?,
            None => StoryType::default(),
        };

        Ok(TopItems::new(selected, data))
    }

    pub fn selected(&self) -> StoryType {
        self.selected
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn items(&self) -> impl Iterator<Item = Item<'_>> {
        self.data.stories().map(Item::new)
    }

    /// Handles a change of the selector: records the selection and asks the runtime for the
    /// matching data with exactly one variable update. The data on screen is left alone until
    /// [`TopItems::applied`] is called.
    pub fn on_change(&mut self, story_type: StoryType, runtime: &mut impl VariableSink) {
        tracing::debug!(from = %self.selected, to = %story_type, "story type changed");

        self.selected = story_type;
        self.state = SelectionState::VariablePending;

        runtime.set_variables(Variables::new().with(STORY_TYPE, story_type.as_str()));
    }

    /// Shows the data the runtime resolved for the pending selection.
    pub fn applied(&mut self, data: TopItemsData) {
        self.data = data;
        self.state = SelectionState::VariableApplied;
    }
}

impl View for TopItems {
    fn fragment() -> Arc<Fragment> {
        FRAGMENT.clone()
    }
}

impl fmt::Display for TopItems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("stories:")?;

        for story_type in StoryType::ALL {
            if story_type == self.selected {
                write!(f, " [{}]", story_type.label())?;
            } else {
                write!(f, " {}", story_type.label())?;
            }
        }

        writeln!(f)?;

        for item in self.items() {
            write!(f, "{item}")?;
        }

        Ok(())
    }
}
