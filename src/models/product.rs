use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::domain::product::{Category, DataValidationError, Product as DomainProduct};
use crate::domain::types::ProductName;

/// Diesel model representing the `products` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: String,
    pub available: bool,
    pub category: String,
}

/// Insertable/patchable form of [`Product`].
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: String,
    pub available: bool,
    pub category: String,
}

/// Canonical text stored in the `price` column.
///
/// Trailing zeros are stripped so equal decimal values share a single text
/// form and column equality coincides with value equality.
pub(crate) fn price_text(price: Decimal) -> String {
    price.normalize().to_string()
}

impl TryFrom<Product> for DomainProduct {
    type Error = DataValidationError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        let price = product
            .price
            .parse::<Decimal>()
            .map_err(|_| DataValidationError::InvalidPrice(product.price.clone()))?;
        Ok(Self {
            id: Some(product.id.try_into()?),
            name: ProductName::new(product.name)?,
            description: product.description,
            price,
            available: product.available,
            category: Category::try_from(product.category)?,
        })
    }
}

impl From<&DomainProduct> for NewProduct {
    fn from(product: &DomainProduct) -> Self {
        Self {
            name: product.name.as_str().to_string(),
            description: product.description.clone(),
            price: price_text(product.price),
            available: product.available,
            category: product.category.as_str().to_string(),
        }
    }
}
