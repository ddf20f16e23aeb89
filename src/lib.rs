//! Pagegrant - grant state for a page access-control widget
//!
//! An operator grants user groups "view" and "edit" access to a page, or
//! lets the page inherit its parent's grants. [`AccessGrantState`] keeps
//! the granted/selectable partition and the two submission lists in step
//! with every interaction.
//!
//! ```
//! use pagegrant::{AccessData, GroupId};
//!
//! let data = AccessData::from_json(r#"{"groupInfo": {"A": "Admins", "B": "Editors"}}"#)?;
//! let mut state = data.into_state()?;
//! state.grant_new_group(&GroupId::new("A"))?;
//! state.toggle_edit(&GroupId::new("A"), true)?;
//! assert_eq!(state.submission().edit_groups, vec![GroupId::new("A")]);
//! # Ok::<(), pagegrant::AccessError>(())
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod grants;
pub mod group;
pub mod mode;
pub mod render;
pub mod replay;
pub mod state;
pub mod submission;

pub use config::{AccessData, Labels};
pub use error::{AccessError, Result};
pub use event::AccessEvent;
pub use grants::{GrantMap, Permission};
pub use group::{Group, GroupDirectory, GroupId};
pub use mode::{Mode, ParentPage};
pub use render::{render_widget, WidgetRenderer};
pub use replay::OutputFormat;
pub use state::{AccessGrantState, GrantPair};
pub use submission::Submission;
