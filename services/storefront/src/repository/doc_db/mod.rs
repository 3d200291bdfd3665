mod order;
mod product;

pub(super) use order::OrderMongoDbRepo;
pub(super) use product::ProductMongoDbRepo;

use chrono::{DateTime, Utc};
use mongodb::bson::DateTime as BsonDateTime;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::error::{AppError, AppErrorCode};

// conversion between domain types and the types natively stored in the
// document database

fn to_bson_time(t: &DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_millis(t.timestamp_millis())
}

fn from_bson_time(t: &BsonDateTime) -> Result<DateTime<Utc>, AppError> {
    DateTime::<Utc>::from_timestamp_millis(t.timestamp_millis()).ok_or(AppError {
        code: AppErrorCode::DataCorruption,
        detail: Some(format!("timestamp-out-of-range: {}", t.timestamp_millis())),
    })
}

fn to_db_amount(value: &Decimal) -> Result<f64, AppError> {
    value.to_f64().ok_or(AppError {
        code: AppErrorCode::DataCorruption,
        detail: Some(format!("amount-to-float: {value}")),
    })
}

fn from_db_amount(value: f64) -> Result<Decimal, AppError> {
    // amounts are stored as double
    Decimal::from_f64(value)
        .map(|d| d.normalize())
        .ok_or(AppError {
            code: AppErrorCode::DataCorruption,
            detail: Some(format!("float-to-amount: {value}")),
        })
}
