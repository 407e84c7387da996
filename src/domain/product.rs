//! Product entity and its flat record representation.

use std::fmt::{Display, Formatter};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::domain::types::{ProductId, ProductName, TypeConstraintError};

/// Errors produced when applying an external record to a [`Product`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataValidationError {
    /// The record was not a JSON mapping.
    #[error("invalid product: expected a mapping, got {0}")]
    InvalidPayload(&'static str),
    /// A required attribute was absent from the record.
    #[error("invalid product: missing {0}")]
    MissingField(&'static str),
    /// An attribute carried a value of the wrong JSON type.
    #[error("invalid type for [{field}]: expected {expected}, got {found}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    /// The price value could not be read as an exact decimal.
    #[error("invalid price: {0:?}")]
    InvalidPrice(String),
    /// The category name does not match any member of [`Category`].
    #[error("invalid category: {0:?}")]
    UnknownCategory(String),
    /// An operation requiring an identifier was called before one was assigned.
    #[error("update called with empty id field")]
    MissingId,
    /// A constrained domain type rejected the value.
    #[error(transparent)]
    TypeConstraint(#[from] TypeConstraintError),
}

/// Closed set of product categories.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    #[default]
    Unknown,
    Cloths,
    Food,
    Housewares,
    Automotive,
    Tools,
}

impl Category {
    /// String representation used in persistence and records.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Cloths => "CLOTHS",
            Self::Food => "FOOD",
            Self::Housewares => "HOUSEWARES",
            Self::Automotive => "AUTOMOTIVE",
            Self::Tools => "TOOLS",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Category {
    type Error = DataValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_uppercase().as_str() {
            "UNKNOWN" => Ok(Self::Unknown),
            "CLOTHS" => Ok(Self::Cloths),
            "FOOD" => Ok(Self::Food),
            "HOUSEWARES" => Ok(Self::Housewares),
            "AUTOMOTIVE" => Ok(Self::Automotive),
            "TOOLS" => Ok(Self::Tools),
            _ => Err(DataValidationError::UnknownCategory(value.to_string())),
        }
    }
}

impl TryFrom<String> for Category {
    type Error = DataValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_string()
    }
}

/// A catalog product.
///
/// `id` stays `None` until the repository persists the product; from then on
/// it is never reassigned by record deserialization.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Product {
    pub id: Option<ProductId>,
    pub name: ProductName,
    pub description: String,
    pub price: Decimal,
    pub available: bool,
    pub category: Category,
}

impl Product {
    /// Build an unpersisted product.
    pub fn new(
        name: ProductName,
        description: impl Into<String>,
        price: Decimal,
        available: bool,
        category: Category,
    ) -> Self {
        Self {
            id: None,
            name,
            description: description.into(),
            price,
            available,
            category,
        }
    }

    /// Project the product into its flat record form.
    ///
    /// The price is rendered as a string so the exact decimal value survives
    /// transport through representations without a decimal type.
    pub fn serialize(&self) -> Value {
        json!({
            "id": self.id.map(ProductId::get),
            "name": self.name.as_str(),
            "description": self.description,
            "price": self.price.to_string(),
            "available": self.available,
            "category": self.category.as_str(),
        })
    }

    /// Apply a flat record to this product, replacing every attribute except `id`.
    ///
    /// All values are validated before any field is assigned, so a failed call
    /// leaves the product unchanged. Unknown keys, including `id`, are ignored.
    pub fn deserialize(&mut self, data: &Value) -> Result<&mut Self, DataValidationError> {
        let record = data
            .as_object()
            .ok_or(DataValidationError::InvalidPayload(json_type_name(data)))?;

        let name = ProductName::new(string_field(record, "name")?)?;
        let description = string_field(record, "description")?.to_string();
        let price = price_field(record, "price")?;
        let available = bool_field(record, "available")?;
        let category = category_field(record, "category")?;

        self.name = name;
        self.description = description;
        self.price = price;
        self.available = available;
        self.category = category;

        Ok(self)
    }
}

impl Display for Product {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Product {} id=[{}]>", self.name, id),
            None => write!(f, "<Product {} id=[None]>", self.name),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn required<'a>(
    record: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, DataValidationError> {
    record
        .get(field)
        .ok_or(DataValidationError::MissingField(field))
}

fn string_field<'a>(
    record: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, DataValidationError> {
    let value = required(record, field)?;
    value.as_str().ok_or(DataValidationError::InvalidType {
        field,
        expected: "a string",
        found: json_type_name(value),
    })
}

fn bool_field(
    record: &Map<String, Value>,
    field: &'static str,
) -> Result<bool, DataValidationError> {
    let value = required(record, field)?;
    value.as_bool().ok_or(DataValidationError::InvalidType {
        field,
        expected: "a boolean",
        found: json_type_name(value),
    })
}

fn price_field(
    record: &Map<String, Value>,
    field: &'static str,
) -> Result<Decimal, DataValidationError> {
    let raw = match required(record, field)? {
        Value::String(price) => price.trim().to_string(),
        Value::Number(price) => price.to_string(),
        other => {
            return Err(DataValidationError::InvalidType {
                field,
                expected: "a string or a number",
                found: json_type_name(other),
            });
        }
    };
    raw.parse::<Decimal>()
        .map_err(|_| DataValidationError::InvalidPrice(raw))
}

fn category_field(
    record: &Map<String, Value>,
    field: &'static str,
) -> Result<Category, DataValidationError> {
    string_field(record, field).and_then(Category::try_from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product::new(
            ProductName::new("Fedora").expect("valid product name"),
            "A red hat",
            Decimal::new(1250, 2),
            true,
            Category::Cloths,
        )
    }

    fn sample_record() -> Value {
        json!({
            "name": "Fedora",
            "description": "A red hat",
            "price": "12.50",
            "available": true,
            "category": "CLOTHS",
        })
    }

    #[test]
    fn display_wraps_name_and_id() {
        let mut product = sample_product();
        assert_eq!(product.to_string(), "<Product Fedora id=[None]>");
        product.id = Some(ProductId::new(7).expect("valid product id"));
        assert_eq!(product.to_string(), "<Product Fedora id=[7]>");
    }

    #[test]
    fn serialize_projects_every_attribute() {
        let mut product = sample_product();
        product.id = Some(ProductId::new(7).expect("valid product id"));
        let data = product.serialize();
        assert_eq!(data["id"], json!(7));
        assert_eq!(data["name"], json!("Fedora"));
        assert_eq!(data["description"], json!("A red hat"));
        assert_eq!(data["price"], json!("12.50"));
        assert_eq!(data["available"], json!(true));
        assert_eq!(data["category"], json!("CLOTHS"));
    }

    #[test]
    fn serialize_renders_missing_id_as_null() {
        let product = sample_product();
        assert_eq!(product.serialize()["id"], Value::Null);
    }

    #[test]
    fn deserialize_applies_a_record() {
        let mut product = Product::new(
            ProductName::new("Towels").expect("valid product name"),
            "Bath towels",
            Decimal::ZERO,
            false,
            Category::Housewares,
        );
        product
            .deserialize(&sample_record())
            .expect("should deserialize product");
        assert_eq!(product.name, "Fedora");
        assert_eq!(product.description, "A red hat");
        assert_eq!(product.price, Decimal::new(1250, 2));
        assert!(product.available);
        assert_eq!(product.category, Category::Cloths);
        assert_eq!(product.id, None);
    }

    #[test]
    fn deserialize_round_trips_serialized_products() {
        let source = sample_product();
        let mut target = Product::new(
            ProductName::new("Wrench").expect("valid product name"),
            "A box wrench",
            Decimal::ZERO,
            false,
            Category::Tools,
        );
        target
            .deserialize(&source.serialize())
            .expect("should deserialize product");
        let echoed = target.serialize();
        assert_eq!(target, source);
        assert_eq!(echoed, source.serialize());
    }

    #[test]
    fn deserialize_never_touches_the_id() {
        let mut data = sample_record();
        data.as_object_mut()
            .expect("record is a mapping")
            .insert("id".to_string(), json!(99));
        let mut product = sample_product();
        product.id = Some(ProductId::new(7).expect("valid product id"));
        product
            .deserialize(&data)
            .expect("should deserialize product");
        assert_eq!(product.id.expect("id should remain assigned"), 7);
    }

    #[test]
    fn deserialize_rejects_missing_fields() {
        for field in ["name", "description", "price", "available", "category"] {
            let mut data = sample_record();
            data.as_object_mut()
                .expect("record is a mapping")
                .remove(field);
            let err = sample_product().deserialize(&data).unwrap_err();
            assert_eq!(err, DataValidationError::MissingField(field));
        }
    }

    #[test]
    fn deserialize_rejects_non_mapping_payloads() {
        let mut product = sample_product();
        let err = product
            .deserialize(&json!(["not", "a", "mapping"]))
            .unwrap_err();
        assert_eq!(err, DataValidationError::InvalidPayload("an array"));
        let err = product.deserialize(&json!("fail!")).unwrap_err();
        assert_eq!(err, DataValidationError::InvalidPayload("a string"));
    }

    #[test]
    fn deserialize_rejects_non_boolean_availability() {
        let mut data = sample_record();
        data.as_object_mut()
            .expect("record is a mapping")
            .insert("available".to_string(), json!("true"));
        let err = sample_product().deserialize(&data).unwrap_err();
        assert_eq!(
            err,
            DataValidationError::InvalidType {
                field: "available",
                expected: "a boolean",
                found: "a string",
            }
        );
    }

    #[test]
    fn deserialize_rejects_unknown_categories() {
        let mut data = sample_record();
        data.as_object_mut()
            .expect("record is a mapping")
            .insert("category".to_string(), json!("TDD/BDD"));
        let err = sample_product().deserialize(&data).unwrap_err();
        assert_eq!(
            err,
            DataValidationError::UnknownCategory("TDD/BDD".to_string())
        );
    }

    #[test]
    fn deserialize_rejects_non_string_categories() {
        let mut data = sample_record();
        data.as_object_mut()
            .expect("record is a mapping")
            .insert("category".to_string(), json!(15));
        let err = sample_product().deserialize(&data).unwrap_err();
        assert_eq!(
            err,
            DataValidationError::InvalidType {
                field: "category",
                expected: "a string",
                found: "a number",
            }
        );
    }

    #[test]
    fn deserialize_matches_categories_case_insensitively() {
        let mut data = sample_record();
        data.as_object_mut()
            .expect("record is a mapping")
            .insert("category".to_string(), json!("cloths"));
        let mut product = sample_product();
        product
            .deserialize(&data)
            .expect("should deserialize product");
        assert_eq!(product.category, Category::Cloths);
    }

    #[test]
    fn deserialize_accepts_numeric_prices() {
        let mut data = sample_record();
        data.as_object_mut()
            .expect("record is a mapping")
            .insert("price".to_string(), json!(12.5));
        let mut product = sample_product();
        product
            .deserialize(&data)
            .expect("should deserialize product");
        assert_eq!(product.price, Decimal::new(125, 1));
    }

    #[test]
    fn deserialize_rejects_unparsable_prices() {
        let mut data = sample_record();
        data.as_object_mut()
            .expect("record is a mapping")
            .insert("price".to_string(), json!("free"));
        let err = sample_product().deserialize(&data).unwrap_err();
        assert_eq!(err, DataValidationError::InvalidPrice("free".to_string()));
    }

    #[test]
    fn deserialize_rejects_empty_names() {
        let mut data = sample_record();
        data.as_object_mut()
            .expect("record is a mapping")
            .insert("name".to_string(), json!("   "));
        let err = sample_product().deserialize(&data).unwrap_err();
        assert_eq!(
            err,
            DataValidationError::TypeConstraint(TypeConstraintError::EmptyString("product name"))
        );
    }

    #[test]
    fn failed_deserialize_leaves_the_product_unchanged() {
        let mut data = sample_record();
        data.as_object_mut()
            .expect("record is a mapping")
            .insert("category".to_string(), json!("TDD/BDD"));
        let mut product = sample_product();
        let before = product.clone();
        assert!(product.deserialize(&data).is_err());
        assert_eq!(product, before);
    }

    #[test]
    fn category_names_round_trip() {
        for category in [
            Category::Unknown,
            Category::Cloths,
            Category::Food,
            Category::Housewares,
            Category::Automotive,
            Category::Tools,
        ] {
            assert_eq!(Category::try_from(category.as_str()), Ok(category));
        }
        assert!(Category::try_from("GROCERIES").is_err());
    }

    #[test]
    fn category_defaults_to_unknown() {
        assert_eq!(Category::default(), Category::Unknown);
    }
}
