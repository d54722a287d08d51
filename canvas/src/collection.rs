//! Card data: the immutable records shown on the canvas and the named
//! collections they are grouped into.
//!
//! Collections arrive either from [`Collections::builtin`] or from JSON shaped
//! like `{"prototypes": {"cards": [{"title": "...", "year": "...", "width": 280}]}}`.
//! Cards without an explicit id are named `"{collection}-{index}"`, and every
//! card gets a URL slug derived from its title.

#[cfg(test)]
#[path = "collection_test.rs"]
mod collection_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CanvasError;
use crate::geom::Size;

/// Unique identifier for a card.
pub type CardId = String;

/// A unit of visual content placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: Option<String>,
    /// Display date, e.g. `"1959-03-06"`.
    pub year: String,
    /// Image or video source, if any.
    pub src: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    /// URL-safe name used by the craft detail route.
    pub slug: String,
}

impl Card {
    /// Declared size, filling missing dimensions from `default`.
    #[must_use]
    pub fn size_or(&self, default: Size) -> Size {
        Size::new(self.width.unwrap_or(default.width), self.height.unwrap_or(default.height))
    }
}

/// A card as written in collection data, before ids and slugs are assigned.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardSpec {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CollectionSpec {
    #[serde(default)]
    cards: Vec<CardSpec>,
}

/// An ordered, named list of cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection {
    pub key: String,
    pub cards: Vec<Card>,
}

impl Collection {
    /// Build a collection, assigning default ids and slugs.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::DuplicateCardId`] if two cards end up with the
    /// same id.
    pub fn from_specs(key: &str, specs: Vec<CardSpec>) -> Result<Self, CanvasError> {
        let collection = Self::assemble(key, specs);
        let mut seen = HashSet::new();
        for card in &collection.cards {
            if !seen.insert(card.id.as_str()) {
                return Err(CanvasError::DuplicateCardId { collection: key.to_owned(), id: card.id.clone() });
            }
        }
        Ok(collection)
    }

    fn assemble(key: &str, specs: Vec<CardSpec>) -> Self {
        let cards = specs
            .into_iter()
            .enumerate()
            .map(|(index, spec)| {
                let id = spec.id.unwrap_or_else(|| format!("{key}-{index}"));
                let slug = spec.title.as_deref().map_or_else(|| id.clone(), slugify);
                Card { id, title: spec.title, year: spec.year, src: spec.src, width: spec.width, height: spec.height, slug }
            })
            .collect();
        Self { key: key.to_owned(), cards }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// All collections available to the canvas, in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Collections {
    collections: Vec<Collection>,
}

impl Collections {
    /// The collections shipped with the site.
    #[must_use]
    pub fn builtin() -> Self {
        let spec = |title: &str, src: Option<&str>, width: f64, height: Option<f64>| CardSpec {
            title: Some(title.to_owned()),
            year: "1959-03-06".to_owned(),
            src: src.map(str::to_owned),
            width: Some(width),
            height,
            ..CardSpec::default()
        };
        let prototypes = vec![
            spec("Line Graph", None, 280.0, None),
            spec("Minimap", None, 240.0, Some(180.0)),
            spec("Motion Blur", None, 240.0, None),
            spec("Elastic Slider", None, 270.0, Some(150.0)),
            spec("Test Image", Some("/test-image.jpg"), 320.0, None),
        ];
        // Built-in ids are generated, so they cannot collide.
        Self {
            collections: vec![Collection::assemble("prototypes", prototypes), Collection::assemble("essays", Vec::new())],
        }
    }

    /// Parse collections from a JSON object keyed by collection name.
    ///
    /// Object key order is not preserved; collections are sorted by key.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidCollection`] for malformed JSON and
    /// [`CanvasError::DuplicateCardId`] for repeated ids.
    pub fn from_json(json: &str) -> Result<Self, CanvasError> {
        let raw: std::collections::BTreeMap<String, CollectionSpec> = serde_json::from_str(json)?;
        let collections = raw
            .into_iter()
            .map(|(key, spec)| Collection::from_specs(&key, spec.cards))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { collections })
    }

    /// Look up a collection by key.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::UnknownCollection`] if `key` is not present.
    pub fn get(&self, key: &str) -> Result<&Collection, CanvasError> {
        self.collections
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| CanvasError::UnknownCollection(key.to_owned()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Collection> {
        self.collections.iter()
    }
}

/// Lower-case `title` and join its words with `-`.
#[must_use]
pub fn slugify(title: &str) -> String {
    title.to_lowercase().split(' ').collect::<Vec<_>>().join("-")
}
