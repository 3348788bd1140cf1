//! Anime search library.
//!
//! Reads a query from a trigger, looks it up through the Jikan API v4 and
//! renders the results as a grid of cards.

pub mod api;
pub mod controller;
pub mod query;
pub mod render;
pub mod view;

pub use api::{FetchError, JikanClient, ResultRecord, ResultSet, SearchBackend};
pub use controller::{SearchController, SearchReport};
pub use query::{SearchQuery, TriggerEvent};
pub use render::{ResultCard, ResultGrid};
pub use view::{DisplayState, ResultsView, SearchOutcome, TerminalView};
