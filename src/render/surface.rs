use chrono::{DateTime, Utc};
use serde::Serialize;

use super::card::Card;
use super::html_escape;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SurfaceContent {
    Cards { cards: Vec<Card> },
    Error { message: String },
}

impl Default for SurfaceContent {
    fn default() -> Self {
        SurfaceContent::Cards { cards: Vec::new() }
    }
}

/// The container the grid is drawn into. Holds one display list or one
/// error notice, never both.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OutputSurface {
    content: SurfaceContent,
    token: u64,
    query: Option<String>,
    updated_at: Option<DateTime<Utc>>,
}

impl OutputSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.content = SurfaceContent::default();
    }

    pub fn append(&mut self, card: Card) {
        match self.content {
            SurfaceContent::Cards { ref mut cards } => cards.push(card),
            SurfaceContent::Error { .. } => {
                self.content = SurfaceContent::Cards { cards: vec![card] };
            }
        }
    }

    pub fn show_error(&mut self, message: impl Into<String>, token: u64) {
        self.content = SurfaceContent::Error {
            message: message.into(),
        };
        self.mark_updated(token);
    }

    pub(crate) fn mark_updated(&mut self, token: u64) {
        self.token = token;
        self.updated_at = Some(Utc::now());
    }

    /// Search term behind the current content; `None` for the popular list.
    pub fn set_query(&mut self, query: Option<String>) {
        self.query = query;
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn content(&self) -> &SurfaceContent {
        &self.content
    }

    pub fn cards(&self) -> &[Card] {
        match self.content {
            SurfaceContent::Cards { ref cards } => cards.as_slice(),
            SurfaceContent::Error { .. } => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self.content {
            SurfaceContent::Error { ref message } => Some(message.as_str()),
            SurfaceContent::Cards { .. } => None,
        }
    }

    pub fn len(&self) -> usize {
        self.cards().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards().is_empty()
    }

    /// Token of the render pass that produced the current content, 0 if none.
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Inner markup of the grid container.
    pub fn to_html(&self) -> String {
        match self.content {
            SurfaceContent::Cards { ref cards } => cards.iter().map(Card::to_html).collect(),
            SurfaceContent::Error { ref message } => format!(
                "<div class=\"error\" role=\"alert\">{}</div>\n",
                html_escape(message)
            ),
        }
    }
}
