//! Prioritized text locators over parsed HTML.
//!
//! A [`LocatorChain`] is an ordered list of (selector, acceptance predicate)
//! rules. Rules are tried in order and the first accepted text wins.

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// Predicate deciding whether located text is usable.
pub type Accept = fn(&str) -> bool;

/// Which matches of a selector contribute text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchScope {
    /// Only the first matching element
    First,
    /// Every matching element, concatenated in document order
    All,
}

/// One rule: a CSS selector plus the predicate its text must satisfy.
pub struct TextLocator {
    selector: Selector,
    scope: MatchScope,
    accept: Accept,
}

impl TextLocator {
    /// Returns `None` (and logs) if `css` does not parse.
    pub fn new(css: &'static str, scope: MatchScope, accept: Accept) -> Option<Self> {
        match Selector::parse(css) {
            Ok(selector) => Some(Self {
                selector,
                scope,
                accept,
            }),
            Err(e) => {
                warn!(selector = css, error = %e, "Skipping unparsable selector");
                None
            }
        }
    }

    /// Trimmed text of the matching element(s), if it is accepted.
    pub fn locate(&self, document: &Html) -> Option<String> {
        let mut matches = document.select(&self.selector);
        let text = match self.scope {
            MatchScope::First => matches.next().map(element_text)?,
            MatchScope::All => matches
                .flat_map(|element| element.text())
                .collect::<String>()
                .trim()
                .to_string(),
        };
        (self.accept)(&text).then_some(text)
    }
}

/// Ordered fallback rules evaluated until one yields accepted text.
pub struct LocatorChain {
    locators: Vec<TextLocator>,
}

impl LocatorChain {
    pub fn new(scope: MatchScope, rules: &[(&'static str, Accept)]) -> Self {
        Self {
            locators: rules
                .iter()
                .filter_map(|(css, accept)| TextLocator::new(css, scope, *accept))
                .collect(),
        }
    }

    pub fn first_match(&self, document: &Html) -> Option<String> {
        self.locators
            .iter()
            .find_map(|locator| locator.locate(document))
    }
}

/// Concatenated descendant text of an element, trimmed.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

pub fn non_empty(text: &str) -> bool {
    !text.is_empty()
}
