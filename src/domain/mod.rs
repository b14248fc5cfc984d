//! Domain layer: topic tree, slug rule, index parser, navigation state
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod navigation;
pub mod parser;
pub mod slug;

pub use entities::{Category, Topic, TopicIndex};
pub use navigation::{filter_index, NavEvent, NavigationState};
pub use parser::{file_name_for, parse_index};
pub use slug::slugify;
