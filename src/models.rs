use serde::{Deserialize, Serialize};

/// Sentinel the scraper emits when a job card has no usable link.
pub const NO_LINK: &str = "N/A";

/// One scraped job posting. Every field is optional at the ingest
/// boundary; missing values deserialize to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostingRecord {
    #[serde(default)]
    pub role: String, // the search role that produced this posting
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub apply_link: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source: String, // "linkedin", "indeed", etc.
}

impl PostingRecord {
    /// The dedup key, when the posting has one. Postings without a real
    /// link are never deduplicated against each other.
    pub fn dedup_key(&self) -> Option<&str> {
        let link = self.link.trim();
        if link.is_empty() || link == NO_LINK {
            None
        } else {
            Some(link)
        }
    }

    /// Title, role, and description glued together for keyword matching.
    pub fn combined_text(&self) -> String {
        format!("{} {} {}", self.title, self.role, self.description)
    }
}

/// A posting annotated with its keyword-match results.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPosting {
    pub record: PostingRecord,
    pub matched_keywords: Vec<String>,
    pub match_score: f64,
}

/// Flat row shape for the ranked CSV export.
#[derive(Debug, Serialize)]
pub struct RankedRow<'a> {
    pub role: &'a str,
    pub title: &'a str,
    pub company: &'a str,
    pub link: &'a str,
    pub apply_link: &'a str,
    pub description: &'a str,
    pub source: &'a str,
    pub matched_keywords: String,
    pub match_score: f64,
}

impl<'a> From<&'a RankedPosting> for RankedRow<'a> {
    fn from(ranked: &'a RankedPosting) -> Self {
        RankedRow {
            role: &ranked.record.role,
            title: &ranked.record.title,
            company: &ranked.record.company,
            link: &ranked.record.link,
            apply_link: &ranked.record.apply_link,
            description: &ranked.record.description,
            source: &ranked.record.source,
            matched_keywords: ranked.matched_keywords.join(", "),
            match_score: ranked.match_score,
        }
    }
}
