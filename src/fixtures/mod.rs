//! Fixtures
//!
//! The catalog provider: loads product, coupon and order-history
//! definitions from YAML fixture files under `fixtures/` and assembles the
//! read-only [`Catalog`] the engine is constructed with.

use std::{fs, path::PathBuf};

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    cart::Cart,
    catalog::{Catalog, CatalogError},
    fixtures::{coupons::CouponsFixture, orders::OrdersFixture, products::ProductsFixture},
};

pub mod coupons;
pub mod orders;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Unsupported coupon discount type
    #[error("Unsupported coupon type: {0}")]
    UnsupportedCouponType(String),

    /// An order references a product id the catalog does not contain
    #[error("Order references unknown product: {0}")]
    UnknownProduct(String),

    /// No priced entries loaded yet; currency unknown
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// Error assembling the catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// A fixture set: catalog plus the previous-order history.
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalog assembled from the loaded fixtures
    catalog: Catalog<'static>,

    /// Product ids of the user's previous order, in order
    previous_order: Vec<String>,
}

impl Fixture {
    /// Create an empty fixture with the default base path.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create an empty fixture with a custom base path.
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: Catalog::new(),
            previous_order: Vec::new(),
        }
    }

    /// Load products from a YAML fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a
    /// product is invalid or duplicated.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        for (id, product_fixture) in fixture.products {
            let product = product_fixture.into_product(&id)?;

            self.catalog.add_product(product)?;
        }

        Ok(self)
    }

    /// Load coupons from a YAML fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a
    /// coupon is invalid or duplicated.
    pub fn load_coupons(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("coupons").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CouponsFixture = serde_norway::from_str(&contents)?;

        for (code, coupon_fixture) in fixture.coupons {
            let coupon = coupon_fixture.into_coupon(&code)?;

            self.catalog.add_coupon(coupon)?;
        }

        Ok(self)
    }

    /// Load the previous-order history from a YAML fixture file.
    ///
    /// Products must be loaded first so the referenced ids can be checked.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// order references a product id the catalog does not contain.
    pub fn load_orders(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("orders").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: OrdersFixture = serde_norway::from_str(&contents)?;

        for id in &fixture.previous_order {
            if self.catalog.key_for_id(id).is_none() {
                return Err(FixtureError::UnknownProduct(id.clone()));
            }
        }

        self.previous_order = fixture.previous_order;

        Ok(self)
    }

    /// Load a complete fixture set (products, coupons and orders with the
    /// same name).
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_products(name)?
            .load_coupons(name)?
            .load_orders(name)?;

        Ok(fixture)
    }

    /// The assembled catalog.
    pub fn catalog(&self) -> &Catalog<'static> {
        &self.catalog
    }

    /// Product ids of the previous order, in order.
    pub fn previous_order(&self) -> &[String] {
        &self.previous_order
    }

    /// The fixture currency.
    ///
    /// # Errors
    ///
    /// Returns an error if no priced entries have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.catalog.currency().ok_or(FixtureError::NoCurrency)
    }

    /// Create an empty cart over the loaded catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if no priced entries have been loaded yet.
    pub fn cart(&self) -> Result<Cart<'_>, FixtureError> {
        Ok(Cart::new(&self.catalog, self.currency()?))
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn fixture_loads_products_coupons_and_orders() -> TestResult {
        let fixture = Fixture::from_set("spendwise")?;

        assert_eq!(fixture.catalog().len(), 6);
        assert_eq!(fixture.catalog().coupons().len(), 3);
        assert_eq!(fixture.previous_order(), ["prod_2", "prod_3"]);
        assert_eq!(fixture.currency()?, USD);

        let bananas = fixture
            .catalog()
            .product_by_id("prod_1")
            .expect("product in catalog");

        assert_eq!(bananas.name, "Organic Bananas");
        assert_eq!(bananas.price.to_minor_units(), 125);

        Ok(())
    }

    #[test]
    fn fixture_cart_starts_empty_over_the_catalog() -> TestResult {
        let fixture = Fixture::from_set("spendwise")?;
        let cart = fixture.cart()?;

        assert!(cart.is_empty());
        assert_eq!(cart.currency(), USD);

        Ok(())
    }

    #[test]
    fn fixture_without_products_has_no_currency() {
        let fixture = Fixture::new();

        assert!(matches!(fixture.currency(), Err(FixtureError::NoCurrency)));
        assert!(matches!(fixture.cart(), Err(FixtureError::NoCurrency)));
    }

    #[test]
    fn orders_referencing_unknown_products_are_rejected() -> TestResult {
        let dir = tempfile::tempdir()?;

        fs::create_dir_all(dir.path().join("products"))?;
        fs::create_dir_all(dir.path().join("orders"))?;

        fs::write(
            dir.path().join("products").join("tiny.yml"),
            "products:\n  prod_1:\n    name: Apple\n    brand: SunHarvest\n    price: 1.00 USD\n    rating: 4\n    expiration_days: 7\n",
        )?;

        fs::write(
            dir.path().join("orders").join("tiny.yml"),
            "previous_order:\n  - prod_404\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        fixture.load_products("tiny")?;

        let result = fixture.load_orders("tiny");

        assert!(matches!(result, Err(FixtureError::UnknownProduct(_))));

        Ok(())
    }

    #[test]
    fn duplicate_products_across_files_are_rejected() -> TestResult {
        let dir = tempfile::tempdir()?;

        fs::create_dir_all(dir.path().join("products"))?;

        let contents = "products:\n  prod_1:\n    name: Apple\n    brand: SunHarvest\n    price: 1.00 USD\n    rating: 4\n    expiration_days: 7\n";

        fs::write(dir.path().join("products").join("first.yml"), contents)?;
        fs::write(dir.path().join("products").join("second.yml"), contents)?;

        let mut fixture = Fixture::with_base_path(dir.path());

        fixture.load_products("first")?;

        let result = fixture.load_products("second");

        assert!(matches!(
            result,
            Err(FixtureError::Catalog(CatalogError::DuplicateProduct(_)))
        ));

        Ok(())
    }

    #[test]
    fn currency_mismatch_across_files_is_rejected() -> TestResult {
        let dir = tempfile::tempdir()?;

        fs::create_dir_all(dir.path().join("products"))?;

        fs::write(
            dir.path().join("products").join("usd.yml"),
            "products:\n  prod_1:\n    name: Apple\n    brand: SunHarvest\n    price: 1.00 USD\n    rating: 4\n    expiration_days: 7\n",
        )?;

        fs::write(
            dir.path().join("products").join("gbp.yml"),
            "products:\n  prod_2:\n    name: Banana\n    brand: SunHarvest\n    price: 1.00 GBP\n    rating: 4\n    expiration_days: 7\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        fixture.load_products("usd")?;

        let result = fixture.load_products("gbp");

        assert!(matches!(
            result,
            Err(FixtureError::Catalog(CatalogError::CurrencyMismatch { .. }))
        ));

        Ok(())
    }

    #[test]
    fn missing_fixture_file_is_an_io_error() {
        let mut fixture = Fixture::new();

        let result = fixture.load_products("does-not-exist");

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }
}
