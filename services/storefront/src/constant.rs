use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppErrorCode};
use crate::WebApiHdlrLabel;

pub mod app_meta {
    pub const LABAL: &str = "storefront";
}

pub mod hard_limit {
    pub const MAX_ITEMS_STORED_PER_MODEL: u32 = 2200u32;
    pub const MAX_DB_CONNECTIONS: u32 = 10000u32;
    pub const MAX_SECONDS_DB_IDLE: u16 = 600u16;
    pub const MAX_ORDER_LINES_PER_REQUEST: usize = 200;
    pub const MAX_SIZES_PER_PRODUCT: usize = 100;
    pub const MAX_PRODUCT_NAME_LENGTH: usize = 120;
    pub const MAX_PRODUCT_DESCRIPTION_LENGTH: usize = 2048;
    pub const MAX_USER_ID_LENGTH: usize = 64;
    pub const MAX_PAGE_LIMIT: u32 = 100;
}

pub mod pagination {
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const DEFAULT_OFFSET: u64 = 0;
    pub const MIN_LIMIT: u32 = 1;
}

pub(crate) mod api {
    use super::WebApiHdlrLabel;

    #[allow(non_camel_case_types)]
    pub(crate) struct web {}

    impl web {
        pub(crate) const WELCOME: WebApiHdlrLabel = "welcome";
        pub(crate) const CREATE_PRODUCT: WebApiHdlrLabel = "create_product";
        pub(crate) const LIST_PRODUCTS: WebApiHdlrLabel = "list_products";
        pub(crate) const GET_PRODUCT: WebApiHdlrLabel = "get_product";
        pub(crate) const CREATE_ORDER: WebApiHdlrLabel = "create_order";
        pub(crate) const LIST_USER_ORDERS: WebApiHdlrLabel = "list_user_orders";
    }
}

pub(crate) const HTTP_CONTENT_TYPE_JSON: &str = "application/json";

// name applied to order lines whose product no longer exists
pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown Product";

pub mod collection {
    pub const PRODUCT: &str = "products";
    pub const ORDER: &str = "orders";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    #[default]
    Placed,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Placed => "PLACED",
            Self::Confirmed => "CONFIRMED",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

impl FromStr for OrderStatus {
    type Err = AppError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PLACED" => Ok(Self::Placed),
            "CONFIRMED" => Ok(Self::Confirmed),
            "SHIPPED" => Ok(Self::Shipped),
            "DELIVERED" => Ok(Self::Delivered),
            "CANCELLED" => Ok(Self::Cancelled),
            _others => Err(AppError {
                code: AppErrorCode::DataCorruption,
                detail: Some(format!("order-status, actual:{s}")),
            }),
        }
    }
}
