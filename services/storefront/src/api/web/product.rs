use axum::debug_handler;
use axum::extract::{
    Json as ExtractJson, Path as ExtractPath, Query as ExtractQuery, State as ExtractState,
};
use axum::http::StatusCode as HttpStatusCode;
use axum::response::IntoResponse;

use ecommerce_common::api::dto::ReasonErrorDto;

use super::dto::{ProductCreateReqDto, ProductListQueryDto};
use super::{internal_error_response, serialize_response};
use crate::logging::{app_log_event, AppLogLevel};
use crate::repository::app_repo_product;
use crate::usecase::{
    CreateProductUsKsErr, CreateProductUseCase, GetProductUsKsErr, GetProductUseCase,
    ListProductsUsKsErr, ListProductsUseCase,
};
use crate::AppSharedState;

// always to specify state type explicitly to the debug macro
#[debug_handler(state=AppSharedState)]
pub(super) async fn create_handler(
    ExtractState(appstate): ExtractState<AppSharedState>,
    ExtractJson(req_body): ExtractJson<ProductCreateReqDto>,
) -> impl IntoResponse {
    let logctx = appstate.log_context().clone();
    let repo = match app_repo_product(appstate.datastore()).await {
        Ok(r) => r,
        Err(e) => {
            app_log_event!(logctx, AppLogLevel::ERROR, "repository init failure: {e}");
            return internal_error_response();
        }
    };
    let uc = CreateProductUseCase {
        repo,
        logctx: logctx.clone(),
    };
    match uc.execute(req_body).await {
        Ok(value) => serialize_response(HttpStatusCode::CREATED, &value),
        Err(CreateProductUsKsErr::ReqContent(value)) => {
            serialize_response(HttpStatusCode::BAD_REQUEST, &value)
        }
        Err(CreateProductUsKsErr::Server(_e)) => internal_error_response(),
    }
} // end of fn create_handler

#[debug_handler(state=AppSharedState)]
pub(super) async fn list_handler(
    ExtractState(appstate): ExtractState<AppSharedState>,
    ExtractQuery(query): ExtractQuery<ProductListQueryDto>,
) -> impl IntoResponse {
    let logctx = appstate.log_context().clone();
    let repo = match app_repo_product(appstate.datastore()).await {
        Ok(r) => r,
        Err(e) => {
            app_log_event!(logctx, AppLogLevel::ERROR, "repository init failure: {e}");
            return internal_error_response();
        }
    };
    let uc = ListProductsUseCase { repo };
    match uc.execute(query).await {
        Ok(value) => serialize_response(HttpStatusCode::OK, &value),
        Err(ListProductsUsKsErr::ReqContent(value)) => {
            serialize_response(HttpStatusCode::BAD_REQUEST, &value)
        }
        Err(ListProductsUsKsErr::Server(e)) => {
            app_log_event!(logctx, AppLogLevel::ERROR, "{e}");
            internal_error_response()
        }
    }
} // end of fn list_handler

#[debug_handler(state=AppSharedState)]
pub(super) async fn get_handler(
    ExtractPath(prod_id): ExtractPath<String>,
    ExtractState(appstate): ExtractState<AppSharedState>,
) -> impl IntoResponse {
    let logctx = appstate.log_context().clone();
    let repo = match app_repo_product(appstate.datastore()).await {
        Ok(r) => r,
        Err(e) => {
            app_log_event!(logctx, AppLogLevel::ERROR, "repository init failure: {e}");
            return internal_error_response();
        }
    };
    let uc = GetProductUseCase { repo };
    match uc.execute(prod_id).await {
        Ok(value) => serialize_response(HttpStatusCode::OK, &value),
        Err(GetProductUsKsErr::InvalidId(detail)) => {
            let value = ReasonErrorDto::new(detail.as_str());
            serialize_response(HttpStatusCode::BAD_REQUEST, &value)
        }
        Err(GetProductUsKsErr::NotFound) => {
            let value = ReasonErrorDto::new("Product not found");
            serialize_response(HttpStatusCode::NOT_FOUND, &value)
        }
        Err(GetProductUsKsErr::Server(e)) => {
            app_log_event!(logctx, AppLogLevel::ERROR, "{e}");
            internal_error_response()
        }
    }
} // end of fn get_handler
