//! Inventory use-case service.
//!
//! # Responsibility
//! - Provide typed product entry points for UI and FFI callers.
//! - Route every read and write through `ProductProvider`.
//!
//! # Invariants
//! - The service never bypasses provider validation or notification.
//! - Single-product calls on a missing id return `NotFound`, not `Ok`.
//! - Quantity adjustments clamp at zero.

use crate::contract::{Locator, COLUMN_QUANTITY};
use crate::model::product::{NewProduct, Product, ProductId};
use crate::model::values::ContentValues;
use crate::provider::{ProductProvider, ProviderError};
use crate::service::dummy::random_dummy_product;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for inventory use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Target product does not exist.
    NotFound(ProductId),
    /// Provider-level failure.
    Provider(ProviderError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "product not found: {id}"),
            Self::Provider(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Provider(err) => Some(err),
        }
    }
}

impl From<ProviderError> for ServiceError {
    fn from(value: ProviderError) -> Self {
        Self::Provider(value)
    }
}

/// Use-case wrapper owning one provider.
pub struct InventoryService {
    provider: ProductProvider,
}

impl InventoryService {
    pub fn new(provider: ProductProvider) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &ProductProvider {
        &self.provider
    }

    /// Mutable access for listener registration.
    pub fn provider_mut(&mut self) -> &mut ProductProvider {
        &mut self.provider
    }

    /// Inserts `product` and returns the storage-assigned id.
    pub fn add_product(&self, product: &NewProduct) -> ServiceResult<ProductId> {
        let uri = self
            .provider
            .insert(&self.provider.collection_uri(), &product.to_content_values())?;
        match self.provider.matcher().classify(&uri) {
            Some(Locator::Item(id)) => Ok(id),
            _ => Err(ProviderError::InvalidData(format!(
                "insert returned non-item locator `{uri}`"
            ))
            .into()),
        }
    }

    /// Inserts one random placeholder product.
    pub fn insert_dummy_product(&self) -> ServiceResult<ProductId> {
        self.add_product(&random_dummy_product())
    }

    pub fn get_product(&self, id: ProductId) -> ServiceResult<Option<Product>> {
        let cursor = self
            .provider
            .query(&self.provider.item_uri(id), None, None, &[], None)?;
        Ok(cursor.products()?.into_iter().next())
    }

    /// Lists every product ordered by id.
    pub fn list_products(&self) -> ServiceResult<Vec<Product>> {
        let cursor = self
            .provider
            .query(&self.provider.collection_uri(), None, None, &[], None)?;
        Ok(cursor.products()?)
    }

    /// Applies a partial update to one product.
    ///
    /// An empty `values` is a no-op and does not check existence.
    pub fn update_product(&self, id: ProductId, values: &ContentValues) -> ServiceResult<()> {
        if values.is_empty() {
            return Ok(());
        }
        let changed = self
            .provider
            .update(&self.provider.item_uri(id), values, None, &[])?;
        if changed == 0 {
            return Err(ServiceError::NotFound(id));
        }
        Ok(())
    }

    /// Adds `delta` to the stored quantity, clamping at zero.
    ///
    /// Returns the quantity written.
    pub fn adjust_quantity(&self, id: ProductId, delta: i64) -> ServiceResult<i64> {
        let product = self.get_product(id)?.ok_or(ServiceError::NotFound(id))?;
        let quantity = product.quantity.saturating_add(delta).max(0);
        if quantity != product.quantity {
            self.update_product(id, &ContentValues::new().with(COLUMN_QUANTITY, quantity))?;
        }
        Ok(quantity)
    }

    pub fn delete_product(&self, id: ProductId) -> ServiceResult<()> {
        let removed = self
            .provider
            .delete(&self.provider.item_uri(id), None, &[])?;
        if removed == 0 {
            return Err(ServiceError::NotFound(id));
        }
        Ok(())
    }

    /// Deletes every product; returns how many rows were removed.
    pub fn delete_all_products(&self) -> ServiceResult<usize> {
        Ok(self
            .provider
            .delete(&self.provider.collection_uri(), None, &[])?)
    }
}
