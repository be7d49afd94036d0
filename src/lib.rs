//! searchfield - search results page interaction
//!
//! Drives the interactive bits of a title search page:
//!
//! - **Clear affordance**: shown exactly while the search field has text,
//!   and empties the field when activated
//! - **Loading view**: activating a result link hides the results and shows
//!   the loading indicator until the details page takes over
//!
//! The page itself is an external collaborator reached through
//! [`HostPage`]. [`Document`] is the in-memory page the terminal and window
//! hosts render.
//!
//! # Example
//!
//! ```
//! use searchfield::{AppConfig, MediaType, SearchResult, Session, ViewMode, Visibility};
//!
//! fn main() -> searchfield::Result<()> {
//!     let results = vec![SearchResult::new(949, "Heat", Some("1995"), MediaType::Movie)];
//!     let mut session = Session::open(&AppConfig::default(), "", &results)?;
//!
//!     session.set_query("heat")?;
//!     assert_eq!(session.state()?.clear_button, Visibility::Shown);
//!
//!     session.click_clear()?;
//!     assert_eq!(session.query()?, "");
//!
//!     session.activate(0)?;
//!     assert_eq!(session.state()?.view_mode, ViewMode::Loading);
//!     assert_eq!(session.navigation(), Some("/details/949/Movie/"));
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod gui;
pub mod logging;
pub mod page;
pub mod results;
pub mod session;
pub mod tui;

// Re-export main types
pub use config::{AppConfig, Selectors};
pub use controller::{ClearFocus, Handled, Options, ResultWiring, SearchFieldController, ViewMode};
pub use error::{Result, SearchFieldError};
pub use page::{Document, Element, ElementId, Event, EventKind, HostPage, Selector, Visibility};
pub use results::{load_results, MediaType, SearchResult};
pub use session::{LinkState, PageState, Session, Step};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
