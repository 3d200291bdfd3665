
use std::sync::Arc;

use storefront::error::AppErrorCode;
use storefront::model::{PageWindow, ProductFilterModel};
use storefront::repository::{app_repo_order, app_repo_product};
use storefront::AppDataStoreContext;

use crate::ut_datastore_context;

#[tokio::test]
async fn factory_inmem_ok() {
    let ds = ut_datastore_context(10);
    let result = app_repo_product(ds.clone()).await;
    assert!(result.is_ok());
    let repo = result.unwrap();
    let criteria = ProductFilterModel::default();
    let actual = repo.filter(&criteria, PageWindow::default()).await;
    assert!(actual.unwrap().is_empty());
    let result = app_repo_order(ds).await;
    assert!(result.is_ok());
    let num = result.unwrap().count_by_owner("someone").await;
    assert_eq!(num.unwrap(), 0);
}

#[tokio::test]
async fn factory_missing_datastore() {
    let ds = Arc::new(AppDataStoreContext {
        in_mem: None,
        #[cfg(feature = "mongodb")]
        doc_db: None,
    });
    let result = app_repo_product(ds.clone()).await;
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.code, AppErrorCode::MissingDataStore);
    }
    let result = app_repo_order(ds).await;
    assert!(result.is_err());
}
