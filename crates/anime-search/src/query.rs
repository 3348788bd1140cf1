//! Input capture: trigger events and search queries.

use std::fmt;

/// A user action on the search surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent<'a> {
    /// Search button activated
    Click,
    /// Key released while the input field has focus
    KeyUp(&'a str),
}

impl TriggerEvent<'_> {
    /// Whether this event starts a search
    pub fn is_trigger(&self) -> bool {
        match self {
            TriggerEvent::Click => true,
            TriggerEvent::KeyUp(key) => *key == "Enter",
        }
    }
}

/// A trimmed, non-empty search string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Trim `raw` and accept it if anything is left
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Read the field value for `event`.
    ///
    /// Returns `None` when the event is not a trigger or the field is blank.
    pub fn capture(event: TriggerEvent<'_>, field_value: &str) -> Option<Self> {
        if event.is_trigger() {
            Self::parse(field_value)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
