pub(super) mod order;
pub(super) mod product;

use std::result::Result as DefaultResult;

use chrono::{DateTime, Utc};

use crate::error::{AppError, AppErrorCode};

fn parse_column<T, E>(row: &[String], idx: usize, label: &str) -> DefaultResult<T, AppError>
where
    T: std::str::FromStr<Err = E>,
    E: std::fmt::Display,
{
    let raw = row.get(idx).ok_or_else(|| AppError {
        code: AppErrorCode::DataCorruption,
        detail: Some(format!("missing-column: {label}")),
    })?;
    raw.parse::<T>().map_err(|e| AppError {
        code: AppErrorCode::DataCorruption,
        detail: Some(format!("column:{label}, value:{raw}, reason:{e}")),
    })
}

fn parse_time_column(row: &[String], idx: usize) -> DefaultResult<DateTime<Utc>, AppError> {
    let raw = row.get(idx).map(String::as_str).unwrap_or("");
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| AppError {
            code: AppErrorCode::DataCorruption,
            detail: Some(format!("column:created_at, value:{raw}, reason:{e}")),
        })
}

fn parse_json_column<T>(row: &[String], idx: usize, label: &str) -> DefaultResult<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    let raw = row.get(idx).map(String::as_str).unwrap_or("");
    serde_json::from_str::<T>(raw).map_err(|e| AppError {
        code: AppErrorCode::DataCorruption,
        detail: Some(format!("column:{label}, reason:{e}")),
    })
}

fn to_json_column<T: serde::Serialize>(value: &T) -> DefaultResult<String, AppError> {
    serde_json::to_string(value).map_err(|e| AppError {
        code: AppErrorCode::DataCorruption,
        detail: Some(e.to_string()),
    })
}
