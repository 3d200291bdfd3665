use std::result::Result as DefaultResult;
use std::time::Duration;

use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};

use ecommerce_common::config::AppDbServerCfg;

use crate::constant::app_meta;
use crate::error::{AppError, AppErrorCode};

pub struct AppMongoDbStore {
    pub alias: String,
    db: Database,
}

impl AppMongoDbStore {
    pub async fn try_build(cfg: &AppDbServerCfg, uri: &str) -> DefaultResult<Self, AppError> {
        let mut opts = ClientOptions::parse(uri).await.map_err(|e| AppError {
            code: AppErrorCode::InvalidInput,
            detail: Some(format!("db-uri, {e}")),
        })?;
        opts.app_name = Some(app_meta::LABAL.to_string());
        opts.max_pool_size = Some(cfg.max_conns);
        opts.max_idle_time = Some(Duration::from_secs(cfg.idle_timeout_secs as u64));
        opts.server_selection_timeout =
            Some(Duration::from_secs(cfg.acquire_timeout_secs as u64));
        // connections are established lazily, on the first operation
        let client = Client::with_options(opts).map_err(|e| AppError {
            code: AppErrorCode::RemoteDbServerFailure,
            detail: Some(e.to_string()),
        })?;
        let db = client.database(cfg.db_name.as_str());
        Ok(Self {
            alias: cfg.alias.clone(),
            db,
        })
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection::<T>(name)
    }
}

pub(crate) fn map_driver_error(e: mongodb::error::Error) -> AppError {
    AppError {
        code: AppErrorCode::RemoteDbServerFailure,
        detail: Some(e.to_string()),
    }
}
