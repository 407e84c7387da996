use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::domain::product::{Category, DataValidationError, Product};
use crate::domain::types::ProductId;
use crate::models::product::{NewProduct as DbNewProduct, Product as DbProduct, price_text};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ProductReader, ProductWriter};

impl ProductReader for DieselRepository {
    fn all(&self) -> RepositoryResult<Vec<Product>> {
        use crate::schema::products;

        log::info!("Processing all products");

        let mut conn = self.conn()?;

        let items = products::table
            .order(products::id.asc())
            .load::<DbProduct>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Product>, _>>()?;

        Ok(items)
    }

    fn find(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        use crate::schema::products;

        log::info!("Processing lookup for id {id}");

        let mut conn = self.conn()?;

        let product = products::table
            .filter(products::id.eq(id.get()))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        let product = product.map(TryInto::try_into).transpose()?;
        Ok(product)
    }

    fn find_by_name(&self, name: &str) -> RepositoryResult<Vec<Product>> {
        use crate::schema::products;

        log::info!("Processing name query for {name}");

        let mut conn = self.conn()?;

        let items = products::table
            .filter(products::name.eq(name))
            .order(products::id.asc())
            .load::<DbProduct>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Product>, _>>()?;

        Ok(items)
    }

    fn find_by_availability(&self, available: bool) -> RepositoryResult<Vec<Product>> {
        use crate::schema::products;

        log::info!("Processing availability query for {available}");

        let mut conn = self.conn()?;

        let items = products::table
            .filter(products::available.eq(available))
            .order(products::id.asc())
            .load::<DbProduct>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Product>, _>>()?;

        Ok(items)
    }

    fn find_by_category(&self, category: Category) -> RepositoryResult<Vec<Product>> {
        use crate::schema::products;

        log::info!("Processing category query for {category}");

        let mut conn = self.conn()?;

        let items = products::table
            .filter(products::category.eq(category.as_str()))
            .order(products::id.asc())
            .load::<DbProduct>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Product>, _>>()?;

        Ok(items)
    }

    fn find_by_price(&self, price: Decimal) -> RepositoryResult<Vec<Product>> {
        use crate::schema::products;

        log::info!("Processing price query for {price}");

        let mut conn = self.conn()?;

        let items = products::table
            .filter(products::price.eq(price_text(price)))
            .order(products::id.asc())
            .load::<DbProduct>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Product>, _>>()?;

        Ok(items)
    }
}

impl ProductWriter for DieselRepository {
    fn create(&self, product: &mut Product) -> RepositoryResult<()> {
        use crate::schema::products;

        log::info!("Creating {}", product.name);

        let mut conn = self.conn()?;
        let db_product = DbNewProduct::from(&*product);

        let created = diesel::insert_into(products::table)
            .values(db_product)
            .get_result::<DbProduct>(&mut conn)?;

        product.id = Some(ProductId::new(created.id)?);
        Ok(())
    }

    fn update(&self, product: &Product) -> RepositoryResult<usize> {
        use crate::schema::products;

        log::info!("Saving {}", product.name);

        let id = product.id.ok_or(DataValidationError::MissingId)?;

        let mut conn = self.conn()?;
        let db_product = DbNewProduct::from(product);

        let affected = diesel::update(products::table.filter(products::id.eq(id.get())))
            .set(&db_product)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete(&self, id: ProductId) -> RepositoryResult<usize> {
        use crate::schema::products;

        log::info!("Deleting product {id}");

        let mut conn = self.conn()?;

        let affected = diesel::delete(products::table.filter(products::id.eq(id.get())))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
