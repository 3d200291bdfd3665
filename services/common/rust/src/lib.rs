pub mod adapter;
pub mod api;
pub mod config;
pub mod constant;
pub mod error;
pub mod logging;

use std::sync::Arc;

pub type WebApiPath = String;
pub(crate) type AppLogAlias = Arc<String>;

pub mod util {
    use crate::error::AppErrorCode;
    use regex::{Regex, RegexBuilder};
    use std::result::Result;

    /// escape all meta-characters, the keyword is always matched literally
    pub fn escape_search_keyword(keyword: &str) -> String {
        regex::escape(keyword)
    }

    pub fn keyword_matcher(keyword: &str) -> Result<Regex, (AppErrorCode, String)> {
        let patt = escape_search_keyword(keyword);
        RegexBuilder::new(patt.as_str())
            .case_insensitive(true)
            .build()
            .map_err(|e| (AppErrorCode::InvalidInput, e.to_string()))
    }
}
