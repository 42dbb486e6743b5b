//! Product entity and the admissibility rules for raw backend records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Stable identity of a product as sent by the backend.
///
/// The backend is free to use either numeric or string identifiers, so both
/// shapes are kept verbatim rather than normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Numeric identifier.
    Number(Number),
    /// String identifier.
    Text(String),
}

impl ProductId {
    /// Extracts an identifier from a raw JSON value.
    ///
    /// Empty strings and numeric zero count as missing.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Some(Self::Text(s.clone())),
            Value::Number(n) if n.as_f64().is_some_and(|v| v != 0.0) => {
                Some(Self::Number(n.clone()))
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A catalog product that passed validation.
///
/// Required fields are always present; `description`, `image` and `category`
/// stay optional and are resolved to fallbacks at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    price: f64,
    description: Option<String>,
    image: Option<String>,
    category: Option<String>,
}

impl Product {
    /// Creates a product with its required fields.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            description: None,
            image: None,
            category: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Builds a product from an untyped record.
    ///
    /// Returns `None` when any required field is missing or has the wrong
    /// type. Records are never repaired: a bad `name` or `price` rejects the
    /// whole record, while a non-string optional field is simply ignored.
    #[must_use]
    pub fn from_record(record: &Value) -> Option<Self> {
        let fields = record.as_object()?;

        let id = fields.get("id").and_then(ProductId::from_value)?;
        let name = fields.get("name").and_then(Value::as_str)?.to_string();
        let price = fields
            .get("price")
            .and_then(Value::as_f64)
            .filter(|price| *price >= 0.0)?;

        Some(Self {
            id,
            name,
            price,
            description: optional_string(fields, "description"),
            image: optional_string(fields, "image"),
            category: optional_string(fields, "category"),
        })
    }

    /// Returns the product identity.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.id
    }

    /// Returns the product name. May be empty.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the non-negative price.
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the image URL, if any.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Returns the category, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

fn optional_string(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Decides whether a raw record may enter the rendered product set.
///
/// Total over any JSON value: `null`, scalars and arrays are never admissible.
#[must_use]
pub fn is_admissible(record: &Value) -> bool {
    Product::from_record(record).is_some()
}
