use std::result::Result as DefaultResult;
use std::sync::Arc;

pub mod api;
pub mod constant;
pub mod error;
pub mod model;
pub mod network;
pub mod repository;
pub mod usecase;

mod adapter;
pub use adapter::datastore;

pub use ecommerce_common::config::{
    ApiServerCfg, AppBasepathCfg, AppCfgHardLimit, AppCfgInitArgs, AppConfig, AppDataStoreCfg,
    AppDbServerCfg, AppInMemoryDbCfg, AppLoggingCfg, WebApiListenCfg, WebApiRouteCfg,
};
pub use ecommerce_common::logging;

use error::AppError;
use logging::AppLogContext;

type WebApiHdlrLabel = &'static str;

pub struct AppDataStoreContext {
    pub in_mem: Option<Arc<Box<dyn datastore::AbstInMemoryDStore>>>,
    #[cfg(feature = "mongodb")]
    pub doc_db: Option<Arc<datastore::AppMongoDbStore>>,
}

// global state shared by all threads
#[derive(Clone)]
pub struct AppSharedState {
    _cfg: Arc<AppConfig>,
    _log: Arc<AppLogContext>,
    dstore: Arc<AppDataStoreContext>,
}

impl AppSharedState {
    /// the log context may be shared with the threads of async runtime before
    /// this state is built
    pub async fn new(cfg: AppConfig, log: Arc<AppLogContext>) -> DefaultResult<Self, AppError> {
        let ds_ctx = datastore::build_context(log.clone(), &cfg).await?;
        Ok(Self {
            _cfg: Arc::new(cfg),
            _log: log,
            dstore: Arc::new(ds_ctx),
        })
    }

    pub fn config(&self) -> &Arc<AppConfig> {
        &self._cfg
    }

    pub fn log_context(&self) -> &Arc<AppLogContext> {
        &self._log
    }

    pub fn datastore(&self) -> Arc<AppDataStoreContext> {
        self.dstore.clone()
    }
} // end of impl AppSharedState
