#![forbid(unsafe_code)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::module_name_repetitions)]

//! # keel-widgets
//!
//! Components for keel applications, each a [`keel_core::Model`]:
//!
//! - [`button`] - buttons and icon buttons
//! - [`text`] - styled text runs
//! - [`layout`] - containers and stacks
//! - [`textinput`] - single-line text editor
//! - [`dropdown`] - button with a popup menu
//! - [`modal`] - dismissible overlay
//! - [`autosuggest`] - text input with filtered suggestions
//! - [`table`] - data table with selection, sorting, filtering, grouping,
//!   pagination, expansion and remote fetching
//!
//! Components never call back into the owner. Anything the owner should hear
//! about comes back as a message from the command returned by `update`.
//!
//! # Example
//!
//! ```rust
//! use keel_core::{KeyMsg, KeyType, Message, Model, drain};
//! use keel_widgets::button::{Button, ButtonClickedMsg};
//!
//! let mut button = Button::new("Save");
//! button.focus();
//! let events = drain(button.update(Message::new(KeyMsg::from_type(KeyType::Enter))));
//! assert!(events[0].is::<ButtonClickedMsg>());
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

pub mod autosuggest;
pub mod button;
pub mod dropdown;
pub mod error;
pub mod key;
pub mod layout;
pub mod modal;
pub mod table;
pub mod text;
pub mod textinput;

pub use error::Error;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique component id. Messages carry it so that several instances
/// of the same component can share one program.
pub(crate) fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Commonly used items.
pub mod prelude {
    pub use crate::autosuggest::{
        Autosuggest, FilteringType, OptionGroup, Status, SuggestOption, SuggestionSelectedMsg,
    };
    pub use crate::button::{Button, ButtonClickedMsg, ButtonVariant, IconButton};
    pub use crate::dropdown::{ButtonDropdown, DropdownItem, DropdownItemClickedMsg};
    pub use crate::error::Error;
    pub use crate::layout::{Container, Stack};
    pub use crate::modal::{Modal, ModalClosedMsg};
    pub use crate::table::{
        CellValue, ColumnDefinition, FetchDataMsg, FetchRequest, Record, SelectionChangedMsg,
        Table, TableOptions,
    };
    pub use crate::text::{Text, TextColor, TextVariant};
    pub use crate::textinput::TextInput;
}
