pub mod card;
pub mod classify;
pub mod page;
pub mod surface;

pub use card::Card;
pub use classify::{classify, Band};
pub use page::render_page;
pub use surface::{OutputSurface, SurfaceContent};

use crate::tmdb::MovieRecord;

/// Turns movie records into cards on an output surface.
#[derive(Debug, Clone)]
pub struct Renderer {
    image_base: String,
}

impl Renderer {
    pub fn new(image_base: impl Into<String>) -> Self {
        Self {
            image_base: image_base.into(),
        }
    }

    /// Replace everything on the surface with one card per record, in order.
    pub fn render(&self, surface: &mut OutputSurface, list: &[MovieRecord], token: u64) {
        surface.clear();
        for record in list {
            surface.append(Card::from_record(record, &self.image_base));
        }
        surface.mark_updated(token);
    }
}

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
