use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum AppErrorCode {
    MissingSysBasePath,
    MissingAppBasePath,
    MissingConfigPath,
    MissingDataStore,
    MissingDbConnectionUri,
    InvalidJsonFormat,
    InvalidVersion,
    InvalidRouteConfig,
    MissingAliasLogHdlerCfg,
    MissingAliasLoggerCfg,
    NoRouteApiServerCfg,
    NoLogHandlerCfg,
    NoLoggerCfg,
    NoHandlerInLoggerCfg,
    InvalidHandlerLoggerCfg,
    InvalidInput, // for frontend client error
    NoDatabaseCfg,
    RemoteDbServerFailure,
    ExceedingMaxLimit,
    DataTableNotExist,
    DataCorruption,
    IOerror(std::io::ErrorKind),
} // end of AppErrorCode

#[derive(Debug)]
pub struct AppCfgError {
    pub code: AppErrorCode,
    pub detail: Option<String>,
}

impl Display for AppCfgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dp = self.detail.as_deref().unwrap_or("none");
        write!(f, "code:{:?}, detail:{}", self.code, dp)
    }
}
