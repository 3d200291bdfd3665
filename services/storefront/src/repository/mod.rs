use std::boxed::Box;
use std::result::Result as DefaultResult;
use std::sync::Arc;
use std::vec::Vec;

use async_trait::async_trait;

use ecommerce_common::adapter::repository::DocId;

use crate::error::{AppError, AppErrorCode};
use crate::model::{OrderModel, PageWindow, ProductFilterModel, ProductModel};
use crate::AppDataStoreContext;

mod in_mem;
pub use in_mem::order::OrderInMemRepo;
pub use in_mem::product::ProductInMemRepo;

#[cfg(feature = "mongodb")]
mod doc_db;
#[cfg(feature = "mongodb")]
use doc_db::{OrderMongoDbRepo, ProductMongoDbRepo};

// the repository instance may be used across an await,
// the future created by app callers has to be able to pass to different threads
// , it is the reason to add `Send` and `Sync` as super-traits
#[async_trait]
pub trait AbsProductRepo: Sync + Send {
    async fn create(&self, item: ProductModel) -> DefaultResult<(), AppError>;

    async fn fetch(&self, id: DocId) -> DefaultResult<Option<ProductModel>, AppError>;

    /// single batch lookup, identifiers which cannot be found are skipped
    async fn fetch_many(&self, ids: Vec<DocId>) -> DefaultResult<Vec<ProductModel>, AppError>;

    /// matching products in ascending order of identifier
    async fn filter(
        &self,
        criteria: &ProductFilterModel,
        window: PageWindow,
    ) -> DefaultResult<Vec<ProductModel>, AppError>;

    async fn count(&self, criteria: &ProductFilterModel) -> DefaultResult<u64, AppError>;
}

#[async_trait]
pub trait AbsOrderRepo: Sync + Send {
    async fn create(&self, item: OrderModel) -> DefaultResult<(), AppError>;

    /// orders of the given user, newest first
    async fn fetch_by_owner(
        &self,
        owner: &str,
        window: PageWindow,
    ) -> DefaultResult<Vec<OrderModel>, AppError>;

    async fn count_by_owner(&self, owner: &str) -> DefaultResult<u64, AppError>;
}

pub async fn app_repo_product(
    ds: Arc<AppDataStoreContext>,
) -> DefaultResult<Box<dyn AbsProductRepo>, AppError> {
    #[cfg(feature = "mongodb")]
    if let Some(db) = ds.doc_db.as_ref() {
        let obj = ProductMongoDbRepo::new(db.clone());
        return Ok(Box::new(obj));
    }
    if let Some(m) = ds.in_mem.as_ref() {
        let obj = ProductInMemRepo::new(m.clone()).await?;
        Ok(Box::new(obj))
    } else {
        Err(AppError {
            code: AppErrorCode::MissingDataStore,
            detail: Some("unknown-type".to_string()),
        })
    }
}

pub async fn app_repo_order(
    ds: Arc<AppDataStoreContext>,
) -> DefaultResult<Box<dyn AbsOrderRepo>, AppError> {
    #[cfg(feature = "mongodb")]
    if let Some(db) = ds.doc_db.as_ref() {
        let obj = OrderMongoDbRepo::new(db.clone());
        return Ok(Box::new(obj));
    }
    if let Some(m) = ds.in_mem.as_ref() {
        let obj = OrderInMemRepo::new(m.clone()).await?;
        Ok(Box::new(obj))
    } else {
        Err(AppError {
            code: AppErrorCode::MissingDataStore,
            detail: Some("unknown-type".to_string()),
        })
    }
}
