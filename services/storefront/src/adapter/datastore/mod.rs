mod in_mem;
#[cfg(feature = "mongodb")]
mod mongo;

use std::boxed::Box;
use std::result::Result as DefaultResult;
use std::sync::Arc;

use ecommerce_common::config::AppDataStoreCfg;

pub use in_mem::{
    AbsDStoreFilterKeyOp, AbstInMemoryDStore, AppInMemFetchKeys, AppInMemFetchedData,
    AppInMemFetchedSingleRow, AppInMemFetchedSingleTable, AppInMemUpdateData, AppInMemoryDStore,
};
#[cfg(feature = "mongodb")]
pub(crate) use mongo::map_driver_error;
#[cfg(feature = "mongodb")]
pub use mongo::AppMongoDbStore;

use crate::error::{AppError, AppErrorCode};
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};
use crate::{AppConfig, AppDataStoreContext};

pub(crate) async fn build_context(
    logctx: Arc<AppLogContext>,
    cfg: &AppConfig,
) -> DefaultResult<AppDataStoreContext, AppError> {
    let mut in_mem = None;
    #[cfg(feature = "mongodb")]
    let mut doc_db = None;
    for c in cfg.api_server.data_store.iter() {
        match c {
            AppDataStoreCfg::InMemory(d) => {
                let item: Box<dyn AbstInMemoryDStore> = Box::new(AppInMemoryDStore::new(d));
                in_mem = Some(Arc::new(item));
            }
            #[cfg(feature = "mongodb")]
            AppDataStoreCfg::DbServer(d) => {
                let uri = cfg.db_uri.as_ref().ok_or(AppError {
                    code: AppErrorCode::MissingDbConnectionUri,
                    detail: Some(d.alias.clone()),
                })?;
                let item = AppMongoDbStore::try_build(d, uri.as_str()).await?;
                app_log_event!(logctx, AppLogLevel::INFO, "doc-db-ready: {}", d.alias);
                doc_db = Some(Arc::new(item));
            }
            #[cfg(not(feature = "mongodb"))]
            AppDataStoreCfg::DbServer(d) => {
                app_log_event!(
                    logctx,
                    AppLogLevel::WARNING,
                    "feature-disabled, skip doc-db: {}",
                    d.alias
                );
            }
        }
    } // end of loop
    #[cfg(feature = "mongodb")]
    let found = in_mem.is_some() || doc_db.is_some();
    #[cfg(not(feature = "mongodb"))]
    let found = in_mem.is_some();
    if found {
        Ok(AppDataStoreContext {
            in_mem,
            #[cfg(feature = "mongodb")]
            doc_db,
        })
    } else {
        Err(AppError {
            code: AppErrorCode::MissingDataStore,
            detail: Some("no-usable-datastore".to_string()),
        })
    }
} // end of fn build_context
