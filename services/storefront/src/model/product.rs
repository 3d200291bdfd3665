use std::result::Result as DefaultResult;

use chrono::{DateTime, Utc};
use regex::Regex;
use rust_decimal::Decimal;

use ecommerce_common::adapter::repository::DocId;
use ecommerce_common::api::dto::GenericRangeErrorDto;
use ecommerce_common::util::keyword_matcher;

use crate::api::web::dto::{
    FieldErrorReason, ProductCreateErrorDto, ProductCreateReqDto, ProductDetailDto,
    ProductDetailSizeDto, ProductSizeDto, ProductSizeErrorDto, ProductSummaryDto,
};
use crate::constant::hard_limit;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct ProductSizeModel {
    pub label: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductModel {
    pub id: DocId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sizes: Vec<ProductSizeModel>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct ProductFilterModel {
    pub name: Option<String>,
    pub size: Option<String>,
}

impl TryFrom<ProductSizeDto> for ProductSizeModel {
    type Error = ProductSizeErrorDto;
    fn try_from(value: ProductSizeDto) -> DefaultResult<Self, Self::Error> {
        let size_rs = if value.size.trim().is_empty() {
            Some(FieldErrorReason::Empty)
        } else {
            None
        };
        let qty_rs = if value.quantity < 0 {
            Some(FieldErrorReason::Negative)
        } else if value.quantity > (u32::MAX as i64) {
            Some(FieldErrorReason::TooLong)
        } else {
            None
        };
        if size_rs.is_none() && qty_rs.is_none() {
            Ok(Self {
                label: value.size,
                quantity: value.quantity as u32,
            })
        } else {
            Err(Self::Error {
                size: size_rs,
                quantity: qty_rs,
            })
        }
    }
}

impl ProductSizeModel {
    pub fn try_from_vec(
        value: Vec<ProductSizeDto>,
    ) -> DefaultResult<Vec<Self>, Vec<Option<ProductSizeErrorDto>>> {
        let results = value
            .into_iter()
            .map(Self::try_from)
            .collect::<Vec<DefaultResult<Self, ProductSizeErrorDto>>>();
        if results.iter().any(DefaultResult::is_err) {
            let errors = results.into_iter().map(|r| r.err()).collect();
            Err(errors)
        } else {
            let out = results.into_iter().filter_map(DefaultResult::ok).collect();
            Ok(out)
        }
    }
}

impl From<ProductSizeModel> for ProductDetailSizeDto {
    fn from(value: ProductSizeModel) -> Self {
        Self {
            size: value.label,
            quantity: value.quantity,
        }
    }
}

impl TryFrom<ProductCreateReqDto> for ProductModel {
    type Error = ProductCreateErrorDto;
    fn try_from(value: ProductCreateReqDto) -> DefaultResult<Self, Self::Error> {
        let num_sizes = value.sizes.len();
        let quota_sizes = if num_sizes > hard_limit::MAX_SIZES_PER_PRODUCT {
            Some(GenericRangeErrorDto {
                max_: hard_limit::MAX_SIZES_PER_PRODUCT as u32,
                min_: 0,
                given: num_sizes as i64,
            })
        } else {
            None
        };
        let mut error = Self::Error {
            name: Self::check_name(value.name.as_str()),
            description: value
                .description
                .as_deref()
                .and_then(Self::check_description),
            price: Self::check_price(&value.price),
            sizes: None,
            quota_sizes,
        };
        let sizes = if error.quota_sizes.is_none() {
            match ProductSizeModel::try_from_vec(value.sizes) {
                Ok(v) => v,
                Err(e) => {
                    error.sizes = Some(e);
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };
        if error.name.is_none()
            && error.description.is_none()
            && error.price.is_none()
            && error.sizes.is_none()
            && error.quota_sizes.is_none()
        {
            Ok(Self {
                id: DocId::generate(),
                name: value.name,
                description: value.description,
                price: value.price,
                sizes,
                created_at: Utc::now(),
            })
        } else {
            Err(error)
        }
    } // end of fn try_from
} // end of impl TryFrom for ProductModel

impl ProductModel {
    fn check_name(value: &str) -> Option<FieldErrorReason> {
        if value.trim().is_empty() {
            Some(FieldErrorReason::Empty)
        } else if value.chars().count() > hard_limit::MAX_PRODUCT_NAME_LENGTH {
            Some(FieldErrorReason::TooLong)
        } else {
            None
        }
    }
    fn check_description(value: &str) -> Option<FieldErrorReason> {
        if value.chars().count() > hard_limit::MAX_PRODUCT_DESCRIPTION_LENGTH {
            Some(FieldErrorReason::TooLong)
        } else {
            None
        }
    }
    fn check_price(value: &Decimal) -> Option<FieldErrorReason> {
        if value.is_sign_negative() || value.is_zero() {
            Some(FieldErrorReason::NotPositive)
        } else {
            None
        }
    }
} // end of impl ProductModel

impl From<ProductModel> for ProductSummaryDto {
    fn from(value: ProductModel) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            price: value.price,
        }
    }
}

impl From<ProductModel> for ProductDetailDto {
    fn from(value: ProductModel) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            price: value.price,
            description: value.description,
            sizes: value.sizes.into_iter().map(ProductDetailSizeDto::from).collect(),
            created_at: value.created_at,
        }
    }
}

impl ProductFilterModel {
    /// empty strings in the query are treated as absent criteria
    pub fn new(name: Option<String>, size: Option<String>) -> Self {
        Self {
            name: name.filter(|s| !s.is_empty()),
            size: size.filter(|s| !s.is_empty()),
        }
    }

    /// case-insensitive matcher on product name, the keyword is never
    /// interpreted as regular expression
    pub fn name_matcher(&self) -> DefaultResult<Option<Regex>, AppError> {
        match self.name.as_deref() {
            Some(kw) => Ok(Some(keyword_matcher(kw)?)),
            None => Ok(None),
        }
    }

    pub fn is_match<'a>(
        &self,
        name_patt: Option<&Regex>,
        name: &str,
        mut size_labels: impl Iterator<Item = &'a str>,
    ) -> bool {
        let name_ok = name_patt.map_or(true, |p| p.is_match(name));
        let size_ok = match self.size.as_deref() {
            Some(expect) => size_labels.any(|l| l == expect),
            None => true,
        };
        name_ok && size_ok
    }
} // end of impl ProductFilterModel
