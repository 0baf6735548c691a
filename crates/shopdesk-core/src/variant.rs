//! Product variant generation.
//!
//! An operator picks values for a handful of attributes (size, shade,
//! concentration, ...) and the catalog materializes one sellable row per
//! point in the Cartesian product of those picks. Every row is priced and
//! stocked independently, so the full product is built on purpose.

use std::fmt;
use std::iter::FusedIterator;

use rust_decimal::Decimal;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::app_config::AppConfig;
use crate::error::CatalogError;
use crate::sku::generate_sku;

/// Selected values per attribute, in the order the attributes were picked.
///
/// Behaves like a map that remembers insertion order: inserting a key that is
/// already present replaces its values without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSelection {
    entries: Vec<(String, Vec<String>)>,
}

impl AttributeSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, values: Vec<String>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = values,
            None => self.entries.push((key, values)),
        }
    }

    /// Builder form of [`AttributeSelection::insert`].
    #[must_use]
    pub fn with<I, V>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.insert(key, values.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Attributes that contribute an axis, i.e. those with at least one value.
    pub fn dimensions(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.iter().filter(|(_, values)| !values.is_empty())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeSelection
where
    K: Into<String>,
    V: IntoIterator,
    V::Item: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut selection = Self::new();
        for (key, values) in iter {
            selection.insert(key, values.into_iter().map(Into::into).collect());
        }
        selection
    }
}

impl<'de> Deserialize<'de> for AttributeSelection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SelectionVisitor;

        impl<'de> Visitor<'de> for SelectionVisitor {
            type Value = AttributeSelection;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of attribute key to a list of value tokens")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut selection = AttributeSelection::new();
                while let Some((key, values)) = access.next_entry::<String, Vec<String>>()? {
                    selection.insert(key, values);
                }
                Ok(selection)
            }
        }

        deserializer.deserialize_map(SelectionVisitor)
    }
}

/// One point of the product: exactly one value per contributing attribute,
/// in dimension order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantCombination {
    entries: Vec<(String, String)>,
}

impl VariantCombination {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value tokens ordered by attribute key, so the SKU of a combination does
    /// not depend on the order attributes were picked in.
    #[must_use]
    pub fn sku_tokens(&self) -> Vec<String> {
        let mut sorted: Vec<&(String, String)> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));
        sorted.into_iter().map(|(_, v)| v.clone()).collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariantCombination {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Serialize for VariantCombination {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Lazy walk over the Cartesian product of a selection.
///
/// The first dimension varies slowest and each dimension is visited in the
/// order its values were supplied. Yields nothing when no attribute has a
/// value.
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    dimensions: Vec<(&'a str, &'a [String])>,
    /// `None` once exhausted.
    cursor: Option<Vec<usize>>,
    remaining: Option<usize>,
}

impl Iterator for Combinations<'_> {
    type Item = VariantCombination;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor.as_mut()?;

        let combination = self
            .dimensions
            .iter()
            .zip(cursor.iter())
            .map(|((key, values), &idx)| ((*key).to_string(), values[idx].clone()))
            .collect();

        // Odometer step, last dimension fastest.
        let mut wrapped = true;
        for (slot, (_, values)) in cursor.iter_mut().zip(&self.dimensions).rev() {
            *slot += 1;
            if *slot < values.len() {
                wrapped = false;
                break;
            }
            *slot = 0;
        }
        if wrapped {
            self.cursor = None;
        }
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
        }

        Some(VariantCombination {
            entries: combination,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match (&self.cursor, self.remaining) {
            (None, _) => (0, Some(0)),
            (Some(_), Some(n)) => (n, Some(n)),
            (Some(_), None) => (usize::MAX, None),
        }
    }
}

// Once `cursor` is `None` it is never reset.
impl FusedIterator for Combinations<'_> {}

/// Iterate the combinations of `selection` without materializing them.
#[must_use]
pub fn combinations(selection: &AttributeSelection) -> Combinations<'_> {
    let dimensions: Vec<(&str, &[String])> = selection.dimensions().collect();
    let cursor = (!dimensions.is_empty()).then(|| vec![0; dimensions.len()]);
    Combinations {
        remaining: combination_count(selection),
        dimensions,
        cursor,
    }
}

/// Number of combinations `selection` produces.
///
/// `Some(0)` when no attribute has a value; `None` if the count does not fit
/// in a `usize`.
#[must_use]
pub fn combination_count(selection: &AttributeSelection) -> Option<usize> {
    let mut dimensions = selection.dimensions().peekable();
    if dimensions.peek().is_none() {
        return Some(0);
    }
    dimensions.try_fold(1usize, |acc, (_, values)| acc.checked_mul(values.len()))
}

/// Every combination of `selection`, in [`combinations`] order.
///
/// Attributes without values are ignored; if none has a value the result is
/// empty. Identical input always yields the identical list.
#[must_use]
pub fn generate_variant_combinations(selection: &AttributeSelection) -> Vec<VariantCombination> {
    combinations(selection).collect()
}

/// Check a selection before generating rows for it and return the number of
/// rows it would produce.
///
/// # Errors
///
/// Returns [`CatalogError::EmptySelection`] if no attribute has a value,
/// [`CatalogError::TooManyCombinations`] if the row count exceeds
/// `max_combinations`, and [`CatalogError::CombinationOverflow`] if the count
/// cannot be represented at all.
pub fn validate_selection(
    selection: &AttributeSelection,
    max_combinations: usize,
) -> Result<usize, CatalogError> {
    let count = combination_count(selection).ok_or(CatalogError::CombinationOverflow)?;
    if count == 0 {
        return Err(CatalogError::EmptySelection);
    }
    if count > max_combinations {
        return Err(CatalogError::TooManyCombinations {
            count,
            limit: max_combinations,
        });
    }
    Ok(count)
}

/// Values pre-filled into every generated row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantDefaults {
    pub price: Decimal,
    pub stock: u32,
    pub image: Option<String>,
}

impl VariantDefaults {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            price: config.default_price,
            stock: config.default_stock,
            image: None,
        }
    }
}

/// One editable, independently priced and stocked variant row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRow {
    pub sku: String,
    pub attributes: VariantCombination,
    pub price: Decimal,
    pub stock: u32,
    pub image: Option<String>,
}

/// Validate `selection` and build one row per combination, with a SKU derived
/// from `product_slug` and the combination's values.
///
/// # Errors
///
/// Propagates the errors of [`validate_selection`].
pub fn build_variant_rows(
    product_slug: &str,
    selection: &AttributeSelection,
    defaults: &VariantDefaults,
    max_combinations: usize,
) -> Result<Vec<VariantRow>, CatalogError> {
    let count = validate_selection(selection, max_combinations)?;

    let mut rows = Vec::with_capacity(count);
    for attributes in combinations(selection) {
        rows.push(VariantRow {
            sku: generate_sku(product_slug, &attributes.sku_tokens()),
            attributes,
            price: defaults.price,
            stock: defaults.stock,
            image: defaults.image.clone(),
        });
    }
    Ok(rows)
}

#[cfg(test)]
#[path = "variant_test.rs"]
mod tests;
