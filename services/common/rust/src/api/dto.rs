use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct GenericRangeErrorDto {
    pub max_: u32,
    pub min_: u32,
    pub given: i64,
}

/// generic error body, for the errors which do not point to specific
/// field of a request
#[derive(Deserialize, Serialize, Debug)]
pub struct ReasonErrorDto {
    pub reason: String,
}

impl ReasonErrorDto {
    pub fn new(reason: &str) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }
}
