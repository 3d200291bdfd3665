use std::collections::HashMap;
use std::env;
use std::sync::Arc;

use tokio::runtime::Builder as RuntimeBuilder;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use ecommerce_common::constant::env_vars::EXPECTED_LABELS;
use storefront::api::web::route_table;
use storefront::constant::hard_limit;
use storefront::logging::{app_log_event, AppLogContext, AppLogLevel};
use storefront::network::{app_web_service, middleware, net_listener};
use storefront::{AppCfgHardLimit, AppCfgInitArgs, AppConfig, AppSharedState};

async fn shutdown_signal(log_ctx: Arc<AppLogContext>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        app_log_event!(log_ctx, AppLogLevel::ERROR, "signal handler failure, {e}");
    }
    app_log_event!(log_ctx, AppLogLevel::WARNING, "shutdown signal received");
}

async fn start_server(shr_state: AppSharedState) {
    let log_ctx_p = shr_state.log_context().clone();
    let cfg = shr_state.config().clone();
    let listener = &cfg.api_server.listen;
    let (service, num_applied) = app_web_service(listener, route_table(), shr_state);
    if num_applied == 0 {
        app_log_event!(
            log_ctx_p,
            AppLogLevel::ERROR,
            "no route created, web API server failed to start"
        );
        return;
    }
    let result = net_listener(listener.host.clone(), listener.port).await;
    match result {
        Ok(b) => {
            let reqlm = middleware::req_body_limit(cfg.api_server.limit_req_body_in_bytes);
            let co = match listener.cors.as_ref() {
                Some(p) => middleware::cors(cfg.basepath.system.clone() + p.as_str())
                    .unwrap_or_else(|e| {
                        app_log_event!(
                            log_ctx_p,
                            AppLogLevel::ERROR,
                            "cors layer init error, detail: {:?}",
                            e
                        );
                        CorsLayer::new()
                    }),
                None => CorsLayer::new(),
            };
            let middlewares = ServiceBuilder::new().layer(reqlm).layer(co);
            let service = service.layer(middlewares);
            app_log_event!(
                log_ctx_p,
                AppLogLevel::INFO,
                "API server listening, {}:{}",
                listener.host,
                listener.port
            );
            let sr = axum::serve(b, service.into_make_service())
                .with_graceful_shutdown(shutdown_signal(log_ctx_p.clone()));
            if let Err(e) = sr.await {
                app_log_event!(log_ctx_p, AppLogLevel::ERROR, "API server error, {e}");
            }
            app_log_event!(log_ctx_p, AppLogLevel::WARNING, "API server terminating ");
        }
        Err(e) => {
            app_log_event!(
                log_ctx_p,
                AppLogLevel::ERROR,
                "API server failed to start, {} ",
                e
            );
        }
    }
} // end of fn start_server

fn start_async_runtime(cfg: AppConfig) {
    let log_ctx = Arc::new(AppLogContext::new(
        &cfg.basepath,
        &cfg.api_server.logging,
    ));
    let log_ctx2 = log_ctx.clone();
    let log_ctx3 = log_ctx.clone();
    let stack_nbytes: usize = (cfg.api_server.stack_sz_kb as usize) << 10;
    let result = RuntimeBuilder::new_multi_thread()
        .worker_threads(cfg.api_server.num_workers as usize)
        .on_thread_start(move || {
            let log_cpy = log_ctx2.clone();
            app_log_event!(log_cpy, AppLogLevel::INFO, "[API server] worker started");
        })
        .on_thread_stop(move || {
            let log_cpy = log_ctx3.clone();
            app_log_event!(log_cpy, AppLogLevel::INFO, "[API server] worker terminating");
        })
        .thread_stack_size(stack_nbytes)
        .thread_name("web-api-worker")
        // manage low-level I/O drivers used by network types
        .enable_io()
        .enable_time()
        .build();
    match result {
        Ok(rt) => {
            rt.block_on(async move {
                match AppSharedState::new(cfg, log_ctx.clone()).await {
                    Ok(shr_state) => start_server(shr_state).await,
                    Err(e) => {
                        app_log_event!(
                            log_ctx,
                            AppLogLevel::ERROR,
                            "shared state failed to init, {} ",
                            e
                        );
                    }
                }
            }); // runtime started
        }
        Err(e) => {
            app_log_event!(
                log_ctx,
                AppLogLevel::ERROR,
                "async runtime failed to build, {} ",
                e
            );
        }
    };
} // end of fn start_async_runtime

fn main() {
    let iter = env::vars().filter(|(k, _v)| EXPECTED_LABELS.contains(&k.as_str()));
    let args = AppCfgInitArgs {
        env_var_map: HashMap::from_iter(iter),
        limit: AppCfgHardLimit {
            nitems_per_inmem_table: hard_limit::MAX_ITEMS_STORED_PER_MODEL,
            num_db_conns: hard_limit::MAX_DB_CONNECTIONS,
            seconds_db_idle: hard_limit::MAX_SECONDS_DB_IDLE,
        },
    };
    match AppConfig::new(args) {
        Ok(cfg) => start_async_runtime(cfg),
        Err(e) => {
            println!("app failed to configure, error code: {} ", e);
        }
    };
} // end of main
