//! Product page extraction heuristic.
//!
//! Turns raw product-page markup into a [`ProductSnapshot`]. Page structure is
//! not stable, so every field is located through ordered fallbacks and the
//! caller only sees success with a normalized shape, or a failure.
//!
//! This is best-effort text extraction. A CAPTCHA or error page is only
//! detected by the absence of a title.

use scraper::{Html, Selector};
use tracing::debug;

use super::locators::{element_text, non_empty, LocatorChain, MatchScope};
use super::models::{ProductSnapshot, NO_BULLETS_PLACEHOLDER, NO_DESCRIPTION_PLACEHOLDER};
use crate::common::{ListingError, Result};

/// Minimum accepted ASIN length.
pub const MIN_ASIN_LENGTH: usize = 10;

/// Description candidates must be longer than this many characters.
pub const MIN_DESCRIPTION_CHARS: usize = 50;

/// Bullet entries containing this breadcrumb marker are navigation, not content.
const BREADCRUMB_MARKER: char = '›';

const TITLE_SELECTORS: &[&str] = &["#productTitle", "span#productTitle"];

const BULLET_SELECTOR: &str = "#feature-bullets ul li span.a-list-item";

const DESCRIPTION_SELECTORS: &[&str] = &[
    "#productDescription p",
    "#feature-bullets",
    "#aplus",
    ".a-section.a-spacing-medium",
];

const NOT_FOUND_MESSAGE: &str = "Product not found or unable to extract data. \
     The ASIN may be invalid or the page structure may have changed.";

/// Validate and normalize a caller-supplied ASIN.
pub fn validate_asin(asin: &str) -> Result<&str> {
    let asin = asin.trim();
    if asin.is_empty() {
        return Err(ListingError::invalid_input("ASIN is required"));
    }
    if asin.chars().count() < MIN_ASIN_LENGTH {
        return Err(ListingError::invalid_input("Invalid ASIN format"));
    }
    Ok(asin)
}

fn long_description(text: &str) -> bool {
    text.chars().count() > MIN_DESCRIPTION_CHARS
}

/// Locators used by [`extract_snapshot`].
pub struct ProductPageExtractor {
    title: LocatorChain,
    description: LocatorChain,
    bullets: Option<Selector>,
}

impl Default for ProductPageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductPageExtractor {
    pub fn new() -> Self {
        let title_rules: Vec<_> = TITLE_SELECTORS
            .iter()
            .map(|css| (*css, non_empty as fn(&str) -> bool))
            .collect();
        let description_rules: Vec<_> = DESCRIPTION_SELECTORS
            .iter()
            .map(|css| (*css, long_description as fn(&str) -> bool))
            .collect();

        Self {
            // Title text spans every match; description takes one block
            title: LocatorChain::new(MatchScope::All, &title_rules),
            description: LocatorChain::new(MatchScope::First, &description_rules),
            bullets: Selector::parse(BULLET_SELECTOR).ok(),
        }
    }

    /// Extract a snapshot from a parsed document.
    pub fn extract(&self, asin: &str, document: &Html) -> Result<ProductSnapshot> {
        let asin = validate_asin(asin)?;

        let title = self
            .title
            .first_match(document)
            .ok_or_else(|| ListingError::not_found(NOT_FOUND_MESSAGE))?;

        let bullet_points = self.bullet_points(document);

        let description = self
            .description
            .first_match(document)
            .unwrap_or_else(|| bullet_points.join(" "));
        let description = if description.is_empty() {
            NO_DESCRIPTION_PLACEHOLDER.to_string()
        } else {
            description
        };

        let bullet_points = if bullet_points.is_empty() {
            vec![NO_BULLETS_PLACEHOLDER.to_string()]
        } else {
            bullet_points
        };

        debug!(
            asin = %asin,
            bullet_count = bullet_points.len(),
            description_chars = description.chars().count(),
            "Extracted product snapshot"
        );

        Ok(ProductSnapshot {
            asin: asin.to_string(),
            title,
            bullet_points,
            description,
        })
    }

    /// Non-empty, non-breadcrumb list items in document order.
    fn bullet_points(&self, document: &Html) -> Vec<String> {
        let Some(selector) = &self.bullets else {
            return Vec::new();
        };

        document
            .select(selector)
            .map(element_text)
            .filter(|text| !text.is_empty() && !text.contains(BREADCRUMB_MARKER))
            .collect()
    }
}

/// Parse `markup` and extract a snapshot for `asin`.
pub fn extract_snapshot(asin: &str, markup: &str) -> Result<ProductSnapshot> {
    let document = Html::parse_document(markup);
    ProductPageExtractor::new().extract(asin, &document)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASIN: &str = "B08N5WRWNW";

    fn page(body: &str) -> String {
        format!("<html><head><title>Amazon.com</title></head><body>{body}</body></html>")
    }

    fn bullets(items: &[&str]) -> String {
        let items: String = items
            .iter()
            .map(|item| format!(r#"<li><span class="a-list-item"> {item} </span></li>"#))
            .collect();
        format!(r#"<div id="feature-bullets"><ul>{items}</ul></div>"#)
    }

    #[test]
    fn test_title_and_bullets_without_description_block() {
        let markup = page(&format!(
            r#"<span id="productTitle">  Wireless Mouse  </span>{}"#,
            bullets(&["Quiet clicks", "USB receiver"])
        ));

        let snapshot = extract_snapshot(ASIN, &markup).unwrap();

        assert_eq!(
            snapshot,
            ProductSnapshot {
                asin: ASIN.to_string(),
                title: "Wireless Mouse".to_string(),
                bullet_points: vec!["Quiet clicks".to_string(), "USB receiver".to_string()],
                description: "Quiet clicks USB receiver".to_string(),
            }
        );
    }

    #[test]
    fn test_repeated_title_elements_are_joined() {
        let markup = page(
            r#"<span id="productTitle"> Desk Lamp, </span><span id="productTitle">Black </span>"#,
        );

        let snapshot = extract_snapshot(ASIN, &markup).unwrap();

        assert_eq!(snapshot.title, "Desk Lamp, Black");
    }

    #[test]
    fn test_missing_title_is_not_found() {
        let markup = page(&bullets(&["Only bullets here"]));
        let err = extract_snapshot(ASIN, &markup).unwrap_err();
        assert!(matches!(err, ListingError::NotFound(_)));
    }

    #[test]
    fn test_blank_title_is_not_found() {
        let markup = page(r#"<span id="productTitle">   </span>"#);
        assert!(matches!(
            extract_snapshot(ASIN, &markup),
            Err(ListingError::NotFound(_))
        ));
    }

    #[test]
    fn test_short_asin_is_invalid_input() {
        let markup = page(r#"<span id="productTitle">Mouse</span>"#);
        let err = extract_snapshot("B08N5", &markup).unwrap_err();
        assert!(matches!(err, ListingError::InvalidInput(ref m) if m == "Invalid ASIN format"));
    }

    #[test]
    fn test_empty_asin_is_required() {
        let err = validate_asin("   ").unwrap_err();
        assert_eq!(err.to_string(), "ASIN is required");
    }

    #[test]
    fn test_validate_asin_trims() {
        assert_eq!(validate_asin("  B08N5WRWNW \n").unwrap(), "B08N5WRWNW");
    }

    #[test]
    fn test_no_bullets_uses_placeholders() {
        let markup = page(r#"<span id="productTitle">Desk Lamp</span>"#);
        let snapshot = extract_snapshot(ASIN, &markup).unwrap();

        assert_eq!(snapshot.bullet_points, vec![NO_BULLETS_PLACEHOLDER.to_string()]);
        assert_eq!(snapshot.description, NO_DESCRIPTION_PLACEHOLDER);
    }

    #[test]
    fn test_breadcrumb_and_empty_items_are_skipped() {
        let markup = page(&format!(
            r#"<span id="productTitle">Lamp</span>{}"#,
            bullets(&["Home › Lighting", "", "Warm light"])
        ));
        let snapshot = extract_snapshot(ASIN, &markup).unwrap();
        assert_eq!(snapshot.bullet_points, vec!["Warm light".to_string()]);
    }

    #[test]
    fn test_product_description_preferred_when_long() {
        let long = "This adjustable desk lamp offers three color temperatures and a memory function.";
        let markup = page(&format!(
            r#"<span id="productTitle">Lamp</span>{}<div id="productDescription"><p>{long}</p></div>"#,
            bullets(&["Warm light"])
        ));
        let snapshot = extract_snapshot(ASIN, &markup).unwrap();
        assert_eq!(snapshot.description, long);
    }

    #[test]
    fn test_short_description_candidates_fall_through() {
        let aplus = "An A+ content block that is comfortably longer than fifty characters.";
        let markup = page(&format!(
            r#"<span id="productTitle">Lamp</span>
               <div id="productDescription"><p>Too short.</p></div>
               <div id="aplus"> {aplus} </div>"#
        ));
        let snapshot = extract_snapshot(ASIN, &markup).unwrap();
        assert_eq!(snapshot.description, aplus);
    }

    #[test]
    fn test_bullet_order_is_preserved() {
        let markup = page(&format!(
            r#"<span id="productTitle">Lamp</span>{}"#,
            bullets(&["c", "a", "b"])
        ));
        let snapshot = extract_snapshot(ASIN, &markup).unwrap();
        assert_eq!(snapshot.bullet_points, vec!["c", "a", "b"]);
    }
}
