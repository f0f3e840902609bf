//! Template metadata shown on the dashboard, and the hash routes that lead
//! from a dashboard card to the full-page template.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{MotionError, Result};
use crate::thumbnail::parse_gradient;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateStatus {
    Live,
    New,
    /// Listed but not yet navigable.
    Soon,
}

impl TemplateStatus {
    pub fn is_navigable(&self) -> bool {
        !matches!(self, TemplateStatus::Soon)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemplateStatus::Live => "LIVE",
            TemplateStatus::New => "NEW",
            TemplateStatus::Soon => "SOON",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TemplateCard {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    /// Tailwind-style `from-<color> to-<color>` pair used for the card
    /// background and its thumbnail.
    pub gradient: &'static str,
    pub status: TemplateStatus,
}

static TEMPLATES: &[TemplateCard] = &[
    TemplateCard {
        id: "flowly",
        title: "Flowly Tech Hero",
        description: "Dark mode, blue tech aesthetics, 3D tilt interface. High fidelity SaaS reproduction.",
        tags: &["SaaS", "Tech", "Blue"],
        gradient: "from-blue-900 to-slate-900",
        status: TemplateStatus::Live,
    },
    TemplateCard {
        id: "flowly-warm",
        title: "Flowly Warm Hero",
        description: "Luxury wood & gold aesthetic with centered layout and floating glass elements.",
        tags: &["Luxury", "Warm", "Gold"],
        gradient: "from-amber-900 to-stone-900",
        status: TemplateStatus::New,
    },
    TemplateCard {
        id: "awwwards",
        title: "Awwwards Journey",
        description: "12-section vertical odyssey. Hyper-motion, parallax, and luxury aesthetics.",
        tags: &["Motion", "Luxury", "Scroll"],
        gradient: "from-orange-900 to-stone-900",
        status: TemplateStatus::Live,
    },
];

pub fn catalog() -> &'static [TemplateCard] {
    TEMPLATES
}

pub fn find_template(id: &str) -> Option<&'static TemplateCard> {
    TEMPLATES.iter().find(|card| card.id == id)
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('-')
        && !id.ends_with('-')
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Checks ids are unique route-safe slugs, titles are present and every
/// gradient resolves to known colors.
pub fn validate_catalog(cards: &[TemplateCard]) -> Result<()> {
    if cards.is_empty() {
        return Err(MotionError::InvalidCatalog("catalog is empty".into()));
    }

    let mut seen = HashSet::new();
    for card in cards {
        if !is_valid_id(card.id) {
            return Err(MotionError::InvalidCatalog(format!(
                "invalid template id {:?}",
                card.id
            )));
        }
        if !seen.insert(card.id) {
            return Err(MotionError::InvalidCatalog(format!(
                "duplicate template id {:?}",
                card.id
            )));
        }
        if card.title.trim().is_empty() {
            return Err(MotionError::InvalidCatalog(format!(
                "template {:?} has no title",
                card.id
            )));
        }
        parse_gradient(card.gradient)?;
    }
    Ok(())
}

pub fn catalog_json() -> Result<String> {
    Ok(serde_json::to_string(TEMPLATES)?)
}

const TEMPLATE_PREFIX: &str = "/template/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Template(&'static str),
    NotFound(String),
}

impl Route {
    /// Parse a location hash such as `#/template/flowly`.
    ///
    /// Ids that are unknown or not yet navigable resolve to `NotFound`.
    pub fn parse_hash(hash: &str) -> Route {
        let path = hash.strip_prefix('#').unwrap_or(hash);
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');

        if trimmed.is_empty() {
            return Route::Dashboard;
        }

        match trimmed.strip_prefix(TEMPLATE_PREFIX) {
            Some(id) => match find_template(id) {
                Some(card) if card.status.is_navigable() => Route::Template(card.id),
                _ => Route::NotFound(path.to_string()),
            },
            None => Route::NotFound(path.to_string()),
        }
    }

    pub fn to_hash(&self) -> String {
        match self {
            Route::Dashboard => "#/".to_string(),
            Route::Template(id) => format!("#{}{}", TEMPLATE_PREFIX, id),
            Route::NotFound(path) => format!("#{}", path),
        }
    }
}

/// Route for a dashboard card click. Cards marked `Soon` go nowhere.
pub fn navigate_to(card: &TemplateCard) -> Option<Route> {
    if card.status.is_navigable() {
        log::debug!("Navigating to template {}", card.id);
        Some(Route::Template(card.id))
    } else {
        log::debug!("Template {} is not available yet", card.id);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        validate_catalog(catalog()).unwrap();
        let ids: Vec<_> = catalog().iter().map(|card| card.id).collect();
        assert_eq!(ids, ["flowly", "flowly-warm", "awwwards"]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let cards = vec![catalog()[0].clone(), catalog()[0].clone()];
        assert!(matches!(
            validate_catalog(&cards),
            Err(MotionError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn bad_slug_is_rejected() {
        let mut card = catalog()[0].clone();
        card.id = "Flowly Hero";
        assert!(validate_catalog(&[card]).is_err());
    }

    #[test]
    fn parses_hash_routes() {
        assert_eq!(Route::parse_hash(""), Route::Dashboard);
        assert_eq!(Route::parse_hash("#/"), Route::Dashboard);
        assert_eq!(
            Route::parse_hash("#/template/flowly"),
            Route::Template("flowly")
        );
        assert_eq!(
            Route::parse_hash("#/template/awwwards/?ref=dash"),
            Route::Template("awwwards")
        );
        assert!(matches!(
            Route::parse_hash("#/template/missing"),
            Route::NotFound(_)
        ));
        assert!(matches!(
            Route::parse_hash("#/template/"),
            Route::NotFound(_)
        ));
    }

    #[test]
    fn route_hash_round_trip() {
        let route = Route::Template("flowly-warm");
        assert_eq!(route.to_hash(), "#/template/flowly-warm");
        assert_eq!(Route::parse_hash(&route.to_hash()), route);
    }

    #[test]
    fn soon_cards_do_not_navigate() {
        let mut upcoming = catalog()[0].clone();
        upcoming.id = "flowly-next";
        upcoming.status = TemplateStatus::Soon;
        assert_eq!(navigate_to(&upcoming), None);
        let flowly = find_template("flowly").unwrap();
        assert_eq!(navigate_to(flowly), Some(Route::Template("flowly")));
    }

    #[test]
    fn json_uses_status_labels() {
        let json = catalog_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["id"], "flowly");
        assert_eq!(value[0]["status"], "LIVE");
        assert_eq!(value[1]["status"], TemplateStatus::New.label());
    }
}
