use axum::debug_handler;
use axum::extract::{
    Json as ExtractJson, Path as ExtractPath, Query as ExtractQuery, State as ExtractState,
};
use axum::http::StatusCode as HttpStatusCode;
use axum::response::IntoResponse;

use super::dto::{OrderCreateReqDto, PageQueryDto};
use super::{internal_error_response, serialize_response};
use crate::logging::{app_log_event, AppLogLevel};
use crate::repository::{app_repo_order, app_repo_product};
use crate::usecase::{
    CreateOrderUsKsErr, CreateOrderUseCase, ListUserOrdersUsKsErr, ListUserOrdersUseCase,
};
use crate::AppSharedState;

#[debug_handler(state=AppSharedState)]
pub(super) async fn create_handler(
    ExtractState(appstate): ExtractState<AppSharedState>,
    ExtractJson(req_body): ExtractJson<OrderCreateReqDto>,
) -> impl IntoResponse {
    let logctx = appstate.log_context().clone();
    let ds = appstate.datastore();
    let results = (
        app_repo_order(ds.clone()).await,
        app_repo_product(ds).await,
    );
    let (repo_order, repo_product) = match results {
        (Ok(o), Ok(p)) => (o, p),
        (r0, r1) => {
            let errmsgs = [r0.err(), r1.err()]
                .into_iter()
                .flatten()
                .map(|e| e.to_string())
                .collect::<Vec<_>>();
            app_log_event!(
                logctx,
                AppLogLevel::ERROR,
                "repository init failure, user:{}, reason: {:?} ",
                req_body.user_id,
                errmsgs
            );
            return internal_error_response();
        }
    };
    let uc = CreateOrderUseCase {
        repo_order,
        repo_product,
        logctx: logctx.clone(),
    };
    match uc.execute(req_body).await {
        Ok(value) => serialize_response(HttpStatusCode::CREATED, &value),
        Err(CreateOrderUsKsErr::ReqContent(value)) => {
            serialize_response(HttpStatusCode::BAD_REQUEST, &value)
        }
        Err(CreateOrderUsKsErr::Server(e)) => {
            app_log_event!(logctx, AppLogLevel::ERROR, "{e}");
            internal_error_response()
        }
    }
} // end of fn create_handler

#[debug_handler(state=AppSharedState)]
pub(super) async fn list_by_user_handler(
    ExtractPath(user_id): ExtractPath<String>,
    ExtractState(appstate): ExtractState<AppSharedState>,
    ExtractQuery(query): ExtractQuery<PageQueryDto>,
) -> impl IntoResponse {
    let logctx = appstate.log_context().clone();
    let ds = appstate.datastore();
    let results = (
        app_repo_order(ds.clone()).await,
        app_repo_product(ds).await,
    );
    let (repo_order, repo_product) = match results {
        (Ok(o), Ok(p)) => (o, p),
        (r0, r1) => {
            let errmsgs = [r0.err(), r1.err()]
                .into_iter()
                .flatten()
                .map(|e| e.to_string())
                .collect::<Vec<_>>();
            app_log_event!(
                logctx,
                AppLogLevel::ERROR,
                "repository init failure, reason: {:?} ",
                errmsgs
            );
            return internal_error_response();
        }
    };
    let uc = ListUserOrdersUseCase {
        repo_order,
        repo_product,
    };
    match uc.execute(user_id, query).await {
        Ok(value) => serialize_response(HttpStatusCode::OK, &value),
        Err(ListUserOrdersUsKsErr::ReqContent(value)) => {
            serialize_response(HttpStatusCode::BAD_REQUEST, &value)
        }
        Err(ListUserOrdersUsKsErr::Server(e)) => {
            app_log_event!(logctx, AppLogLevel::ERROR, "{e}");
            internal_error_response()
        }
    }
} // end of fn list_by_user_handler
