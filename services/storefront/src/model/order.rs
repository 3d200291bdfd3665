use std::collections::HashMap;
use std::fmt::Display;
use std::result::Result as DefaultResult;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use ecommerce_common::adapter::repository::DocId;
use ecommerce_common::api::dto::GenericRangeErrorDto;

use crate::api::web::dto::{
    FieldErrorReason, OrderCreateRespErrorDto, OrderLineCreateErrorDto, OrderLineReqDto,
};
use crate::constant::{hard_limit, OrderStatus};

// money is always rounded half-up (away from zero on midpoint) to cents
const AMOUNT_DECIMAL_PLACES: u32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineModel {
    pub product_id: DocId,
    pub qty: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderModel {
    pub id: DocId,
    pub owner: String,
    pub lines: Vec<OrderLineModel>,
    pub status: OrderStatus,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, PartialEq)]
pub enum OrderPricingError {
    ProductNotExist(DocId),
    AmountOverflow,
}

impl Display for OrderPricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProductNotExist(id) => write!(f, "Product {id} not found"),
            Self::AmountOverflow => write!(f, "Total amount out of range"),
        }
    }
}

impl TryFrom<OrderLineReqDto> for OrderLineModel {
    type Error = OrderLineCreateErrorDto;
    fn try_from(value: OrderLineReqDto) -> DefaultResult<Self, Self::Error> {
        let reason = if value.qty <= 0 {
            Some(FieldErrorReason::NotPositive)
        } else if value.qty > (u32::MAX as i64) {
            Some(FieldErrorReason::TooLong)
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(Self::Error {
                product_id: value.product_id,
                reason,
            });
        }
        match DocId::try_from(value.product_id.as_str()) {
            Ok(product_id) => Ok(Self {
                product_id,
                qty: value.qty as u32,
            }),
            Err(_e) => Err(Self::Error {
                product_id: value.product_id,
                reason: FieldErrorReason::InvalidIdentifier,
            }),
        }
    }
}

impl OrderLineModel {
    pub fn try_from_vec(
        value: Vec<OrderLineReqDto>,
    ) -> DefaultResult<Vec<Self>, Vec<OrderLineCreateErrorDto>> {
        let mut errors = Vec::new();
        let lines = value
            .into_iter()
            .filter_map(|d| match Self::try_from(d) {
                Ok(v) => Some(v),
                Err(e) => {
                    errors.push(e);
                    None
                }
            })
            .collect::<Vec<_>>();
        if errors.is_empty() {
            Ok(lines)
        } else {
            Err(errors)
        }
    }
}

impl OrderModel {
    /// validate the owner and all the lines in a request, the lines are
    /// returned in the same order as given
    pub fn validate_request(
        owner: &str,
        lines: Vec<OrderLineReqDto>,
    ) -> DefaultResult<Vec<OrderLineModel>, OrderCreateRespErrorDto> {
        let mut error = OrderCreateRespErrorDto {
            user_id: Self::check_owner(owner),
            ..Default::default()
        };
        let num_lines = lines.len();
        if num_lines == 0 || num_lines > hard_limit::MAX_ORDER_LINES_PER_REQUEST {
            error.quota_items = Some(GenericRangeErrorDto {
                max_: hard_limit::MAX_ORDER_LINES_PER_REQUEST as u32,
                min_: 1,
                given: num_lines as i64,
            });
        }
        let lines = if error.quota_items.is_none() {
            match OrderLineModel::try_from_vec(lines) {
                Ok(v) => v,
                Err(e) => {
                    error.items = Some(e);
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };
        if error.user_id.is_none() && error.items.is_none() && error.quota_items.is_none() {
            Ok(lines)
        } else {
            Err(error)
        }
    } // end of fn validate_request

    fn check_owner(value: &str) -> Option<FieldErrorReason> {
        if value.trim().is_empty() {
            Some(FieldErrorReason::Empty)
        } else if value.chars().count() > hard_limit::MAX_USER_ID_LENGTH {
            Some(FieldErrorReason::TooLong)
        } else {
            None
        }
    }

    /// Sum of unit price times quantity over all the lines, rounded half-up
    /// to 2 decimal places. This is the only place where the amount of an
    /// order is computed.
    ///
    /// It stops at the first line whose product is missing in `prices`.
    pub fn calculate_total(
        lines: &[OrderLineModel],
        prices: &HashMap<DocId, Decimal>,
    ) -> DefaultResult<Decimal, OrderPricingError> {
        let mut total = Decimal::ZERO;
        for line in lines {
            let unit = prices
                .get(&line.product_id)
                .ok_or(OrderPricingError::ProductNotExist(line.product_id))?;
            total = unit
                .checked_mul(Decimal::from(line.qty))
                .and_then(|subtotal| total.checked_add(subtotal))
                .ok_or(OrderPricingError::AmountOverflow)?;
        }
        Ok(total.round_dp_with_strategy(
            AMOUNT_DECIMAL_PLACES,
            RoundingStrategy::MidpointAwayFromZero,
        ))
    }

    pub fn new(
        owner: String,
        lines: Vec<OrderLineModel>,
        status: OrderStatus,
        total: Decimal,
    ) -> Self {
        Self {
            id: DocId::generate(),
            owner,
            lines,
            status,
            total,
            created_at: Utc::now(),
        }
    }
} // end of impl OrderModel
