use std::fs::{remove_file, File};

use serde_json::{from_value as json_from_value, json};

use ecommerce_common::config::{AppBasepathCfg, AppLoggingCfg};
use ecommerce_common::logging::{app_log_event, AppLogContext, AppLogLevel};
use ecommerce_common::to_3rdparty_level;

fn ut_log_context(log_file_path: &str, logger_keys: [&str; 2]) -> (AppLogContext, String) {
    let sys_path = std::env::temp_dir().to_string_lossy().to_string();
    let basepath = AppBasepathCfg {
        system: sys_path.clone(),
        service: env!("CARGO_MANIFEST_DIR").to_string(),
    };
    let cfg = {
        let val = json!({
            "handlers" : [
                {"alias": "errlog-file-456", "min_level": "WARNING",
                 "path": log_file_path,  "destination": "localfs"},
                {"alias": "std-output-123",  "min_level": "ERROR",
                 "destination": "console"}
            ],
            "loggers" : [
                {"alias": logger_keys[0],
                 "handlers": ["errlog-file-456", "std-output-123"],
                 "level": "INFO"},
                {"alias": logger_keys[1],
                 "handlers": ["errlog-file-456"] }
            ]
        });
        json_from_value::<AppLoggingCfg>(val).unwrap()
    };
    let ctx = AppLogContext::new(&basepath, &cfg);
    (ctx, sys_path + "/" + log_file_path)
}

#[test]
fn init_log_context_ok() {
    let logger_keys = ["should-be-module-path", "another-module-hier"];
    let (actual, fullpath) = ut_log_context("ecommerce_common_ut_1.log", logger_keys);
    for key in logger_keys {
        let result = actual.get_assigner(key);
        assert!(result.is_some());
        let logger = result.unwrap();
        tracing::dispatcher::with_default(logger, || {
            const LVL: tracing::Level = to_3rdparty_level!(AppLogLevel::ERROR);
            tracing::event!(LVL, "invoked by unit test");
        });
    }
    drop(actual); // flush all the non-blocking writers
    let result = File::open(fullpath.as_str());
    assert!(result.is_ok());
    let _ = remove_file(fullpath);
}

#[test]
fn logger_lookup_parent_module() {
    let logger_keys = ["unittest", "unittest::logging::inner"];
    let (ctx, fullpath) = ut_log_context("ecommerce_common_ut_2.log", logger_keys);
    assert!(ctx.get_assigner("unittest::logging::inner").is_some());
    assert!(ctx.get_assigner("unittest::logging::inner::deeper").is_some());
    assert!(ctx.get_assigner("unittest::config").is_some());
    assert!(ctx.get_assigner("unit").is_none());
    assert!(ctx.get_assigner("other_crate::logging").is_none());
    // current module path `unittest::logging` is covered by the logger `unittest`
    app_log_event!(ctx, AppLogLevel::WARNING, "parent logger reached");
    drop(ctx);
    let _ = remove_file(fullpath);
}

#[test]
fn unregistered_module_fallback_stdout() {
    let logger_keys = ["unittest::config", "unittest::adapter"];
    let (ctx, fullpath) = ut_log_context("ecommerce_common_ut_3.log", logger_keys);
    assert!(ctx.get_assigner("unittest::logging").is_none());
    let (info_on, debug_on) = tracing::dispatcher::with_default(ctx.fallback(), || {
        (
            tracing::enabled!(tracing::Level::INFO),
            tracing::enabled!(tracing::Level::DEBUG),
        )
    });
    assert!(info_on);
    assert!(!debug_on);
    app_log_event!(ctx, AppLogLevel::INFO, "sent to standard output");
    drop(ctx);
    let _ = remove_file(fullpath);
}
