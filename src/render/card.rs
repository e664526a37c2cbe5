use serde::Serialize;

use super::classify::{classify, Band};
use super::html_escape;
use crate::tmdb::MovieRecord;

/// One movie as it appears in the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub id: u64,
    pub title: String,
    pub poster_url: String,
    pub vote_average: f64,
    pub band: Band,
    pub overview: String,
}

impl Card {
    /// A record without a poster still gets a card; its image url is just
    /// the bare image base and will not load.
    pub fn from_record(record: &MovieRecord, image_base: &str) -> Self {
        let poster_url = match record.poster_path {
            Some(ref path) => format!("{}{}", image_base, path),
            None => image_base.to_string(),
        };

        Self {
            id: record.id,
            title: record.title.clone(),
            poster_url,
            vote_average: record.vote_average,
            band: classify(record.vote_average),
            overview: record.overview.clone(),
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="movie">
    <img src="{poster}" alt="">
    <div class="movie-info">
        <h3>{title}</h3>
        <span class="{band}">{vote}</span>
    </div>
    <div class="overview">{overview}</div>
</div>
"#,
            poster = html_escape(&self.poster_url),
            title = html_escape(&self.title),
            band = self.band.css_class(),
            vote = self.vote_average,
            overview = html_escape(&self.overview),
        )
    }
}
