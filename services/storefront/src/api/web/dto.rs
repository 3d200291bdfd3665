use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ecommerce_common::api::dto::GenericRangeErrorDto;

use crate::constant::OrderStatus;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub enum FieldErrorReason {
    Empty,
    TooLong,
    NotPositive,
    Negative,
    InvalidIdentifier,
    NotExist,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ProductSizeDto {
    pub size: String,
    pub quantity: i64,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ProductCreateReqDto {
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub sizes: Vec<ProductSizeDto>,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct ProductSizeErrorDto {
    pub size: Option<FieldErrorReason>,
    pub quantity: Option<FieldErrorReason>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ProductCreateErrorDto {
    pub name: Option<FieldErrorReason>,
    pub description: Option<FieldErrorReason>,
    pub price: Option<FieldErrorReason>,
    // each element maps to the size at the same position in the request
    pub sizes: Option<Vec<Option<ProductSizeErrorDto>>>,
    pub quota_sizes: Option<GenericRangeErrorDto>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ResourceCreatedDto {
    pub id: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ProductSummaryDto {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct ProductDetailDto {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub description: Option<String>,
    pub sizes: Vec<ProductDetailSizeDto>,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct ProductDetailSizeDto {
    pub size: String,
    pub quantity: u32,
}

#[derive(Deserialize, Debug, Default)]
pub struct ProductListQueryDto {
    pub name: Option<String>,
    pub size: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Deserialize, Debug, Default)]
pub struct PageQueryDto {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct PageQueryErrorDto {
    pub limit: Option<GenericRangeErrorDto>,
    pub offset: Option<LowerBoundErrorDto>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct LowerBoundErrorDto {
    pub min_: u32,
    pub given: i64,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct PageEnvelopeDto {
    // offset of the next page, in string form
    pub next: Option<String>,
    // number of records actually returned in current page
    pub limit: usize,
    pub previous: Option<u64>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct PaginatedDto<T> {
    pub data: Vec<T>,
    pub page: PageEnvelopeDto,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OrderLineReqDto {
    #[serde(rename = "productId")]
    pub product_id: String,
    pub qty: i64,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct OrderCreateReqDto {
    pub user_id: String,
    pub items: Vec<OrderLineReqDto>,
    pub order_status: Option<OrderStatus>,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct OrderLineCreateErrorDto {
    #[serde(rename = "productId")]
    pub product_id: String,
    pub reason: FieldErrorReason,
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct OrderCreateRespErrorDto {
    // human-readable message, e.g. the first product which cannot be found
    pub detail: Option<String>,
    pub user_id: Option<FieldErrorReason>,
    pub items: Option<Vec<OrderLineCreateErrorDto>>,
    pub quota_items: Option<GenericRangeErrorDto>,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct OrderProductDetailDto {
    pub id: String,
    pub name: String,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct OrderLineDetailDto {
    #[serde(rename = "productDetails")]
    pub product_details: OrderProductDetailDto,
    pub qty: u32,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct OrderSummaryDto {
    pub id: String,
    pub items: Vec<OrderLineDetailDto>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}
