use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::io::stdout;
use std::path::Path;

use tracing::dispatcher::Dispatch;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::Layer as TraceLayer;
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;
use tracing_subscriber::{self, Layer as LayerIntf, Registry};

use crate::config::{AppBasepathCfg, AppLogHandlerCfg, AppLoggerCfg, AppLoggingCfg};
use crate::constant::logging::{Destination as DstOption, Level as AppLogLevelInner};
use crate::AppLogAlias;

pub type AppLogLevel = AppLogLevelInner;
type DefaultHandler = (NonBlocking, tracing::Level, WorkerGuard);
type AppLogger = Dispatch;

const MODULE_PATH_DELIMITER: &str = "::";

pub struct AppLogContext {
    _io_guards: Vec<WorkerGuard>,
    loggers: HashMap<AppLogAlias, AppLogger, RandomState>,
    fallback: AppLogger,
}

// this macro has to be exposed since top-level binary executable (e.g. web)
// will invoke this macro indirectly
#[macro_export]
macro_rules! to_3rdparty_level {
    ($lvlin:expr) => {
        match $lvlin {
            $crate::logging::AppLogLevel::FATAL | $crate::logging::AppLogLevel::ERROR => {
                tracing::Level::ERROR
            }
            $crate::logging::AppLogLevel::WARNING => tracing::Level::WARN,
            $crate::logging::AppLogLevel::INFO => tracing::Level::INFO,
            $crate::logging::AppLogLevel::DEBUG => tracing::Level::DEBUG,
            $crate::logging::AppLogLevel::TRACE => tracing::Level::TRACE,
        } // in `tracing` ecosystem, level comparison is like
          // TRACE > DEBUG > INFO > WARN > ERROR
    };
}

fn _gen_localfile_writer(basepath: &str, cfg: &AppLogHandlerCfg) -> (NonBlocking, WorkerGuard) {
    // the config parser has ensured that file handlers always come with path
    let rpath = cfg.path.as_deref().unwrap_or("app.log");
    let mut fullpath = basepath.to_string();
    if !basepath.ends_with('/') && !rpath.starts_with('/') {
        fullpath += "/";
    }
    fullpath += rpath;
    let p = Path::new(&fullpath);
    let dir = p.parent().unwrap_or_else(|| Path::new("."));
    let fname_prefix = p.file_name().unwrap_or(p.as_os_str());
    let wr_dst = RollingFileAppender::new(Rotation::NEVER, dir, fname_prefix);
    tracing_appender::non_blocking(wr_dst)
}

fn _gen_console_writer(_: &AppLogHandlerCfg) -> (NonBlocking, WorkerGuard) {
    tracing_appender::non_blocking(stdout())
} // Note tracing spawns new thread dedicating to each non-blocking writer

fn _init_handler(basepath: &AppBasepathCfg, cfg: &AppLogHandlerCfg) -> DefaultHandler {
    let lvl = to_3rdparty_level!(&cfg.min_level);
    let (io_wr, guard) = match &cfg.destination {
        DstOption::CONSOLE => _gen_console_writer(cfg),
        DstOption::LOCALFS => _gen_localfile_writer(&basepath.system, cfg),
    }; // callers MUST always keep the guard along with writer, for successfully flushing
       // log messages to I/O
    (io_wr, lvl, guard)
}

fn _init_logger(cfg: &AppLoggerCfg, hdlrs: &HashMap<AppLogAlias, DefaultHandler>) -> AppLogger {
    let iter = cfg.handlers.iter().filter_map(|alias| {
        hdlrs.get(alias).map(|(wr_ptr, default_lvl, _guard)| {
            let lvl = if let Some(l) = cfg.level.as_ref() {
                to_3rdparty_level!(l)
            } else {
                *default_lvl
            };
            TraceLayer::new()
                .with_writer(wr_ptr.clone())
                .with_file(false) // to prevent full path exposed
                .with_line_number(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_filter(LevelFilter::from_level(lvl))
        })
    });
    let layers = Vec::from_iter(iter);
    let subscriber = Registry::default().with(layers);
    Dispatch::new(subscriber)
} // end of _init_logger

// for modules which are not covered by any configured logger
fn _init_fallback_logger() -> (AppLogger, WorkerGuard) {
    let (wr, guard) = tracing_appender::non_blocking(stdout());
    let layer = TraceLayer::new()
        .with_writer(wr)
        .with_file(false)
        .with_line_number(true)
        .with_level(true)
        .with_filter(LevelFilter::INFO);
    let subscriber = Registry::default().with(layer);
    (Dispatch::new(subscriber), guard)
}

impl AppLogContext {
    pub fn new(basepath: &AppBasepathCfg, cfg: &AppLoggingCfg) -> Self {
        let iter = cfg
            .handlers
            .iter()
            .map(|item| (item.alias.clone(), _init_handler(basepath, item)));
        let hdlrs = HashMap::from_iter(iter);
        let iter2 = cfg
            .loggers
            .iter()
            .map(|item| (item.alias.clone(), _init_logger(item, &hdlrs)));
        let logger_map: HashMap<AppLogAlias, Dispatch, RandomState> = HashMap::from_iter(iter2);
        let (fallback, fb_guard) = _init_fallback_logger();
        let mut _io_guards = hdlrs.into_values().map(|(_, _, g)| g).collect::<Vec<_>>();
        _io_guards.push(fb_guard);
        Self {
            loggers: logger_map,
            _io_guards,
            fallback,
        } // keep guards of the IO writers during the lifetime
    }

    /// look for the logger registered with the given module path, if not found,
    /// try the parent modules one after another, e.g. `app::usecase::order`
    /// is covered by the logger `app::usecase` or `app`
    pub fn get_assigner(&self, key: &str) -> Option<&Dispatch> {
        let mut curr = key;
        loop {
            if let Some(d) = self.loggers.get(&curr.to_string()) {
                break Some(d);
            }
            match curr.rfind(MODULE_PATH_DELIMITER) {
                Some(pos) => {
                    curr = &curr[..pos];
                }
                None => {
                    break None;
                }
            }
        }
    }

    /// logger writing to standard output, applied when `get_assigner()` finds nothing
    pub fn fallback(&self) -> &Dispatch {
        &self.fallback
    }
} // end of impl AppLogContext

#[macro_export]
macro_rules! app_log_event {
    ( $ctx:ident, $lvl:expr, $($arg:tt)+ ) => {{
        const MOD_PATH:&str = module_path!();
        const LVL_INNER: tracing::Level = $crate::logging::to_3rdparty_level!($lvl);
        let assigner = $ctx.get_assigner(MOD_PATH).unwrap_or($ctx.fallback());
        tracing::dispatcher::with_default(assigner, || {
            tracing::event!(LVL_INNER, $($arg)+);
        });
    }};
}

pub use app_log_event;
pub use to_3rdparty_level;
