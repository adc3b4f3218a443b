// src/infrastructure/catalog.rs
use async_trait::async_trait;

use crate::domain::errors::{CatalogError, CatalogResult};
use crate::domain::models::Product;
use crate::domain::repository::CatalogRepository;
use crate::infrastructure::http::HttpApi;

/// Catalog adapter against the shop backend's GET /products.
pub struct HttpCatalog {
    api: HttpApi,
}

impl HttpCatalog {
    pub fn new(base_url: &str) -> Self {
        Self {
            api: HttpApi::new(base_url),
        }
    }
}

#[async_trait]
impl CatalogRepository for HttpCatalog {
    async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        let response = self
            .api
            .get("/products")
            .await
            .map_err(|e| CatalogError::Service(e.to_string()))?;

        if !response.is_success() {
            let detail = response
                .error_detail()
                .unwrap_or_else(|| "Failed to fetch products".to_string());
            log::error!("Catalog returned {}: {}", response.status, detail);
            return Err(CatalogError::Service(detail));
        }

        response
            .json()
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }
}
