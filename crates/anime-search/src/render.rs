//! Result grid construction and text layout.
//!
//! A result set becomes rows of three cards, in the order the API returned
//! them.

use crate::api::ResultRecord;

/// Cards per row
pub const CARDS_PER_ROW: usize = 3;

/// One rendered result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub image_url: String,
    pub title: String,
    pub episodes: u32,
}

impl ResultCard {
    pub fn from_record(record: &ResultRecord) -> Self {
        Self {
            image_url: record.image_url().to_string(),
            title: record.title().to_string(),
            episodes: record.episode_count(),
        }
    }

    pub fn episodes_label(&self) -> String {
        format!("Episodes: {}", self.episodes)
    }

    /// Text lines of this card: image, heading, episode paragraph
    fn lines(&self) -> [String; 3] {
        [
            format!("[image] {}", self.image_url),
            self.title.clone(),
            self.episodes_label(),
        ]
    }
}

/// Rows of cards
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultGrid {
    rows: Vec<Vec<ResultCard>>,
}

impl ResultGrid {
    /// Group `records` into rows of at most `CARDS_PER_ROW` cards
    pub fn build(records: &[ResultRecord]) -> Self {
        let rows = records
            .chunks(CARDS_PER_ROW)
            .map(|chunk| chunk.iter().map(ResultCard::from_record).collect())
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<ResultCard>] {
        &self.rows
    }

    pub fn card_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Lay the grid out as text, cards side by side in `width`-wide columns
    pub fn draw(&self, width: usize) -> String {
        let width = width.max(4);
        let mut out = String::new();

        for (idx, row) in self.rows.iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }

            let card_lines: Vec<[String; 3]> = row.iter().map(ResultCard::lines).collect();
            for line in 0..3 {
                let cells: Vec<String> = card_lines
                    .iter()
                    .map(|lines| format!("{:<width$}", truncate(&lines[line], width), width = width))
                    .collect();
                out.push_str(cells.join("  ").trim_end());
                out.push('\n');
            }
        }

        out
    }
}

/// Cut `text` to at most `width` characters, marking the cut with an ellipsis
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
