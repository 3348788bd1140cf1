//! Results container state and the views that display it.

use crate::api::{FetchError, ResultSet};
use crate::render::ResultGrid;
use std::io::Write;
use tracing::warn;

/// Outcome of one fetch, success or failure
pub type SearchOutcome = Result<ResultSet, FetchError>;

/// What the results container currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DisplayState {
    /// Nothing rendered yet
    #[default]
    Idle,
    /// Cards of the last accepted search; an empty grid is a cleared container
    Results(ResultGrid),
    /// Visible error message of the last accepted search
    Failed(String),
}

impl DisplayState {
    pub fn from_outcome(outcome: &SearchOutcome) -> Self {
        match outcome {
            Ok(records) => DisplayState::Results(ResultGrid::build(records)),
            Err(e) => DisplayState::Failed(format!("Search failed: {}", e)),
        }
    }
}

/// Render target for search results.
///
/// Every call replaces the previous content in full.
pub trait ResultsView: Send {
    fn show(&mut self, state: DisplayState);
}

/// Draws result grids on a terminal-like writer
pub struct TerminalView<W> {
    out: W,
    card_width: usize,
    clear_screen: bool,
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W, card_width: usize, clear_screen: bool) -> Self {
        Self {
            out,
            card_width,
            clear_screen,
        }
    }

    fn draw(&self, state: &DisplayState) -> String {
        match state {
            DisplayState::Idle => String::new(),
            DisplayState::Results(grid) if grid.is_empty() => "No results.\n".to_string(),
            DisplayState::Results(grid) => grid.draw(self.card_width),
            DisplayState::Failed(message) => format!("{}\n", message),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> ResultsView for TerminalView<W> {
    fn show(&mut self, state: DisplayState) {
        let mut text = String::new();
        if self.clear_screen {
            text.push_str("\x1b[2J\x1b[H");
        }
        text.push_str(&self.draw(&state));

        let written = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush());
        if let Err(e) = written {
            warn!(error = %e, "Failed to write results");
        }
    }
}
