use serde::{Deserialize, Serialize};

/// Placeholder used when a product page yields no bullet points.
pub const NO_BULLETS_PLACEHOLDER: &str = "No bullet points available";

/// Placeholder used when neither a description block nor bullets exist.
pub const NO_DESCRIPTION_PLACEHOLDER: &str = "No description available";

/// Normalized listing scraped from a product page.
///
/// `title` is never empty and `bullet_points` never is either (a single
/// placeholder stands in when the page has none).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub asin: String,
    pub title: String,
    pub bullet_points: Vec<String>,
    pub description: String,
}

/// Listing content as produced by the language model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedListing {
    pub title: String,
    pub bullet_points: Vec<String>,
    pub description: String,
    pub keywords: Vec<String>,
}

/// The original half of a comparison, without the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginalListing {
    pub title: String,
    pub bullet_points: Vec<String>,
    pub description: String,
}

impl From<&ProductSnapshot> for OriginalListing {
    fn from(snapshot: &ProductSnapshot) -> Self {
        Self {
            title: snapshot.title.clone(),
            bullet_points: snapshot.bullet_points.clone(),
            description: snapshot.description.clone(),
        }
    }
}
