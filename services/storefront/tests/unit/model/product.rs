use std::str::FromStr;

use rust_decimal::Decimal;

use storefront::api::web::dto::{
    FieldErrorReason, ProductCreateReqDto, ProductDetailDto, ProductSizeDto, ProductSummaryDto,
};
use storefront::model::{ProductFilterModel, ProductModel};

fn ut_size(size: &str, quantity: i64) -> ProductSizeDto {
    ProductSizeDto {
        size: size.to_string(),
        quantity,
    }
}

fn ut_create_req(name: &str, price: &str, sizes: Vec<ProductSizeDto>) -> ProductCreateReqDto {
    ProductCreateReqDto {
        name: name.to_string(),
        description: Some("cotton, regular fit".to_string()),
        price: Decimal::from_str(price).unwrap(),
        sizes,
    }
}

#[test]
fn convert_from_req_ok() {
    let req = ut_create_req("Tee Shirt", "19.99", vec![ut_size("M", 5), ut_size("L", 0)]);
    let result = ProductModel::try_from(req);
    assert!(result.is_ok());
    let item = result.unwrap();
    assert_eq!(item.name.as_str(), "Tee Shirt");
    assert_eq!(item.price, Decimal::new(1999, 2));
    assert_eq!(item.sizes.len(), 2);
    assert_eq!(item.sizes[0].label.as_str(), "M");
    assert_eq!(item.sizes[1].quantity, 0);
    assert_eq!(item.id.to_string().len(), 24);

    let summary = ProductSummaryDto::from(item.clone());
    assert_eq!(summary.id, item.id.to_string());
    let detail = ProductDetailDto::from(item.clone());
    assert_eq!(detail.sizes.len(), 2);
    assert_eq!(detail.created_at, item.created_at);
    assert_eq!(detail.description.as_deref(), Some("cotton, regular fit"));
}

#[test]
fn convert_from_req_error_fields() {
    let req = ut_create_req("  ", "0", vec![ut_size("S", 1), ut_size("", -3)]);
    let result = ProductModel::try_from(req);
    assert!(result.is_err());
    let e = result.unwrap_err();
    assert_eq!(e.name, Some(FieldErrorReason::Empty));
    assert_eq!(e.price, Some(FieldErrorReason::NotPositive));
    assert!(e.description.is_none());
    assert!(e.quota_sizes.is_none());
    let sizes_err = e.sizes.unwrap();
    assert_eq!(sizes_err.len(), 2);
    assert!(sizes_err[0].is_none());
    let detail = sizes_err[1].as_ref().unwrap();
    assert_eq!(detail.size, Some(FieldErrorReason::Empty));
    assert_eq!(detail.quantity, Some(FieldErrorReason::Negative));

    let long_name = "x".repeat(121);
    let mut req = ut_create_req(long_name.as_str(), "-1.5", Vec::new());
    req.description = Some("y".repeat(2049));
    let e = ProductModel::try_from(req).unwrap_err();
    assert_eq!(e.name, Some(FieldErrorReason::TooLong));
    assert_eq!(e.description, Some(FieldErrorReason::TooLong));
    assert_eq!(e.price, Some(FieldErrorReason::NotPositive));
}

#[test]
fn convert_from_req_error_quota() {
    let sizes = (0..101).map(|n| ut_size(n.to_string().as_str(), 1)).collect();
    let req = ut_create_req("Socks", "2.5", sizes);
    let e = ProductModel::try_from(req).unwrap_err();
    let quota = e.quota_sizes.unwrap();
    assert_eq!(quota.given, 101);
    assert_eq!(quota.max_, 100);
    assert!(e.sizes.is_none());
}

#[test]
fn filter_match_name_and_size() {
    let criteria = ProductFilterModel::new(Some("shirt".to_string()), Some("M".to_string()));
    let patt = criteria.name_matcher().unwrap();
    assert!(patt.is_some());
    let patt = patt.as_ref();
    assert!(criteria.is_match(patt, "Tee SHIRT", ["S", "M"].into_iter()));
    assert!(!criteria.is_match(patt, "Tee SHIRT", ["S", "L"].into_iter()));
    assert!(!criteria.is_match(patt, "Hoodie", ["M"].into_iter()));
    // size label has to be exactly the same
    assert!(!criteria.is_match(patt, "shirt", ["m", "XM"].into_iter()));
}

#[test]
fn filter_keyword_literal() {
    let criteria = ProductFilterModel::new(Some("a.c(".to_string()), None);
    let patt = criteria.name_matcher().unwrap();
    let patt = patt.as_ref();
    assert!(criteria.is_match(patt, "xA.C(y", std::iter::empty()));
    assert!(!criteria.is_match(patt, "abc(", std::iter::empty()));
}

#[test]
fn filter_empty_criteria() {
    let criteria = ProductFilterModel::new(Some(String::new()), Some(String::new()));
    assert!(criteria.name.is_none());
    assert!(criteria.size.is_none());
    let patt = criteria.name_matcher().unwrap();
    assert!(patt.is_none());
    assert!(criteria.is_match(None, "anything", std::iter::empty()));
}
