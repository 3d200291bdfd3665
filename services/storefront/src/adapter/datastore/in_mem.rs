use std::collections::HashMap;
use std::result::Result as DefaultResult;

use async_trait::async_trait;
use tokio::sync::Mutex;

use ecommerce_common::config::AppInMemoryDbCfg;

use crate::error::{AppError, AppErrorCode};

// table label -> primary key -> columns of a row
pub type AppInMemFetchedSingleRow = Vec<String>;
pub type AppInMemFetchedSingleTable = HashMap<String, AppInMemFetchedSingleRow>;
pub type AppInMemFetchedData = HashMap<String, AppInMemFetchedSingleTable>;
pub type AppInMemUpdateData = AppInMemFetchedData;
// table label -> list of primary keys
pub type AppInMemFetchKeys = HashMap<String, Vec<String>>;

pub trait AbsDStoreFilterKeyOp: Send + Sync {
    fn filter(&self, k: &str, v: &[String]) -> DefaultResult<bool, AppError>;
}

#[async_trait]
pub trait AbstInMemoryDStore: Send + Sync {
    async fn create_table(&self, label: &str) -> DefaultResult<(), AppError>;
    /// return number of rows saved, existing rows with the same key are overwritten
    async fn save(&self, data: AppInMemUpdateData) -> DefaultResult<usize, AppError>;
    /// keys not found in a table are silently skipped
    async fn fetch(&self, keys: AppInMemFetchKeys) -> DefaultResult<AppInMemFetchedData, AppError>;
    async fn filter_keys(
        &self,
        tbl_label: String,
        op: &dyn AbsDStoreFilterKeyOp,
    ) -> DefaultResult<Vec<String>, AppError>;
}

pub struct AppInMemoryDStore {
    max_items_per_table: u32,
    table_map: Mutex<AppInMemFetchedData>,
}

impl AppInMemoryDStore {
    pub fn new(cfg: &AppInMemoryDbCfg) -> Self {
        Self {
            max_items_per_table: cfg.max_items,
            table_map: Mutex::new(HashMap::new()),
        }
    }

    fn table_not_exist(label: &str) -> AppError {
        AppError {
            code: AppErrorCode::DataTableNotExist,
            detail: Some(label.to_string()),
        }
    }

    fn check_capacity(
        &self,
        tables: &AppInMemFetchedData,
        data: &AppInMemUpdateData,
    ) -> DefaultResult<(), AppError> {
        for (label, rows) in data.iter() {
            let table = tables
                .get(label)
                .ok_or_else(|| Self::table_not_exist(label))?;
            let num_new = rows.keys().filter(|k| !table.contains_key(*k)).count();
            let total = table.len() + num_new;
            if total > self.max_items_per_table as usize {
                let detail = format!(
                    "table:{label}, limit:{}, expect:{total}",
                    self.max_items_per_table
                );
                return Err(AppError {
                    code: AppErrorCode::ExceedingMaxLimit,
                    detail: Some(detail),
                });
            }
        }
        Ok(())
    }
} // end of impl AppInMemoryDStore

#[async_trait]
impl AbstInMemoryDStore for AppInMemoryDStore {
    async fn create_table(&self, label: &str) -> DefaultResult<(), AppError> {
        let mut guard = self.table_map.lock().await;
        if !guard.contains_key(label) {
            guard.insert(label.to_string(), HashMap::new());
        }
        Ok(())
    }

    async fn save(&self, data: AppInMemUpdateData) -> DefaultResult<usize, AppError> {
        let mut guard = self.table_map.lock().await;
        // all tables are checked before any write, so the update is all-or-nothing
        self.check_capacity(&guard, &data)?;
        let mut num_saved = 0usize;
        for (label, rows) in data.into_iter() {
            if let Some(table) = guard.get_mut(&label) {
                num_saved += rows.len();
                table.extend(rows);
            }
        }
        Ok(num_saved)
    }

    async fn fetch(&self, keys: AppInMemFetchKeys) -> DefaultResult<AppInMemFetchedData, AppError> {
        let guard = self.table_map.lock().await;
        let mut out = HashMap::new();
        for (label, ids) in keys.into_iter() {
            let table = guard
                .get(&label)
                .ok_or_else(|| Self::table_not_exist(&label))?;
            let iter = ids
                .into_iter()
                .filter_map(|k| table.get(&k).map(|row| (k, row.clone())));
            let fetched: AppInMemFetchedSingleTable = HashMap::from_iter(iter);
            out.insert(label, fetched);
        }
        Ok(out)
    }

    async fn filter_keys(
        &self,
        tbl_label: String,
        op: &dyn AbsDStoreFilterKeyOp,
    ) -> DefaultResult<Vec<String>, AppError> {
        let guard = self.table_map.lock().await;
        let table = guard
            .get(&tbl_label)
            .ok_or_else(|| Self::table_not_exist(&tbl_label))?;
        let mut out = Vec::new();
        for (k, v) in table.iter() {
            if op.filter(k.as_str(), v.as_slice())? {
                out.push(k.clone());
            }
        }
        Ok(out)
    }
} // end of impl AbstInMemoryDStore
