//! Item types: the stored record and its create/update inputs.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Server-assigned item identifier. Stored ids are always >= 1; signed so
/// that any integer in a request path can be looked up.
pub type ItemId = i64;

/// A stored item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Server-assigned id, never reused within a process lifetime.
    #[schema(example = 1)]
    pub id: ItemId,
    /// Item name, 1 to 100 characters.
    #[schema(example = "Widget")]
    pub name: String,
    /// Optional description, at most 500 characters.
    pub description: Option<String>,
    /// Price, strictly positive.
    #[schema(example = 19.99)]
    pub price: f64,
}

/// Input for creating an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemCreate {
    /// Item name, 1 to 100 characters.
    #[schema(example = "Widget", min_length = 1, max_length = 100)]
    pub name: String,
    /// Optional description, at most 500 characters.
    #[serde(default)]
    #[schema(max_length = 500)]
    pub description: Option<String>,
    /// Price, strictly positive.
    #[schema(example = 19.99, exclusive_minimum = 0.0)]
    pub price: f64,
}

impl ItemCreate {
    /// Create input without a description.
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A field in a partial update.
///
/// Distinguishes a field that was left out of the request (`Unset`) from one
/// sent as an explicit `null` (`Cleared`). Use with `#[serde(default)]` so
/// that missing keys deserialize to `Unset`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Patch<T> {
    /// Field absent; keep the stored value.
    #[default]
    Unset,
    /// Field sent as `null`.
    Cleared,
    /// Field sent with a value.
    Value(T),
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Patch::Value(v),
            None => Patch::Cleared,
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the key is present; absence falls back to Default.
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

/// Input for a partial item update. Every field is optional.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, ToSchema)]
pub struct ItemUpdate {
    /// New name. `null` is rejected.
    #[serde(default)]
    #[schema(value_type = Option<String>, min_length = 1, max_length = 100)]
    pub name: Patch<String>,
    /// New description. `null` clears it.
    #[serde(default)]
    #[schema(value_type = Option<String>, max_length = 500)]
    pub description: Patch<String>,
    /// New price. `null` is rejected.
    #[serde(default)]
    #[schema(value_type = Option<f64>, exclusive_minimum = 0.0)]
    pub price: Patch<f64>,
}

impl ItemUpdate {
    /// Update that only sets the name.
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Patch::Value(name.into()),
            ..Self::default()
        }
    }

    /// Update that only sets the description.
    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Patch::Value(description.into()),
            ..Self::default()
        }
    }

    /// Update that only sets the price.
    pub fn price(price: f64) -> Self {
        Self {
            price: Patch::Value(price),
            ..Self::default()
        }
    }
}

impl Item {
    /// Build a stored item from validated input.
    pub fn from_create(id: ItemId, input: ItemCreate) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
        }
    }

    /// Apply an already validated update in place. The id never changes.
    pub(crate) fn apply(&mut self, update: ItemUpdate) {
        if let Patch::Value(name) = update.name {
            self.name = name;
        }
        match update.description {
            Patch::Value(description) => self.description = Some(description),
            Patch::Cleared => self.description = None,
            Patch::Unset => {}
        }
        if let Patch::Value(price) = update.price {
            self.price = price;
        }
    }
}
