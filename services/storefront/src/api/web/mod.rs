use std::collections::HashMap;

use axum::http::{
    header as HttpHeader, HeaderMap as HttpHeaderMap, HeaderValue as HttpHeaderValue,
    StatusCode as HttpStatusCode,
};
use axum::routing::{get, post, MethodRouter};
use serde::Serialize;

use crate::constant::{api::web as WebConst, HTTP_CONTENT_TYPE_JSON};
use crate::{AppSharedState, WebApiHdlrLabel};

pub mod dto;
mod misc;
mod order;
mod product;

pub type ApiRouteType = MethodRouter<AppSharedState>;
pub type ApiRouteTableType = HashMap<WebApiHdlrLabel, ApiRouteType>;

type WebApiResponse = (HttpStatusCode, HttpHeaderMap, String);

pub fn route_table() -> ApiRouteTableType {
    let mut out: ApiRouteTableType = HashMap::new();
    out.insert(WebConst::WELCOME, get(misc::welcome_handler));
    out.insert(WebConst::CREATE_PRODUCT, post(product::create_handler));
    out.insert(WebConst::LIST_PRODUCTS, get(product::list_handler));
    out.insert(WebConst::GET_PRODUCT, get(product::get_handler));
    out.insert(WebConst::CREATE_ORDER, post(order::create_handler));
    out.insert(WebConst::LIST_USER_ORDERS, get(order::list_by_user_handler));
    out
}

fn json_response(status: HttpStatusCode, body: String) -> WebApiResponse {
    let mut hdr_map = HttpHeaderMap::new();
    hdr_map.insert(
        HttpHeader::CONTENT_TYPE,
        HttpHeaderValue::from_static(HTTP_CONTENT_TYPE_JSON),
    );
    (status, hdr_map, body)
}

// serialize the response body, any failure turns into internal error
fn serialize_response<T: Serialize>(status: HttpStatusCode, value: &T) -> WebApiResponse {
    match serde_json::to_string(value) {
        Ok(s) => json_response(status, s),
        Err(_e) => json_response(
            HttpStatusCode::INTERNAL_SERVER_ERROR,
            r#"{"reason":"serialization-failure"}"#.to_string(),
        ),
    }
}

fn internal_error_response() -> WebApiResponse {
    json_response(
        HttpStatusCode::INTERNAL_SERVER_ERROR,
        r#"{"reason":"internal-error"}"#.to_string(),
    )
}
