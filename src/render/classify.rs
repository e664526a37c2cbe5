use serde::Serialize;

/// Vote badge colour band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    High,
    Medium,
    Low,
}

impl Band {
    pub fn css_class(self) -> &'static str {
        match self {
            Band::High => "green",
            Band::Medium => "orange",
            Band::Low => "red",
        }
    }
}

/// First match wins. Anything that fails both comparisons, NaN included, is Low.
pub fn classify(vote: f64) -> Band {
    if vote >= 7.0 {
        Band::High
    } else if vote >= 6.0 {
        Band::Medium
    } else {
        Band::Low
    }
}
