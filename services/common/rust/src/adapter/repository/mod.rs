use std::fmt::Display;
use std::result::Result;

use bson::oid::ObjectId;

use crate::error::AppErrorCode;

pub const DOC_ID_BYTE_LENGTH: usize = 12;

/*
* Identifier of stored document, backed by the object ID of the document
* database. IDs generated in the same process are sorted by creation time,
* the hex string representation keeps the same order.
* */
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocId(pub ObjectId);

impl DocId {
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    pub fn bytes(&self) -> [u8; DOC_ID_BYTE_LENGTH] {
        self.0.bytes()
    }
}

impl<'a> TryFrom<&'a str> for DocId {
    type Error = (AppErrorCode, String);
    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        ObjectId::parse_str(value)
            .map(Self)
            .map_err(|e| (AppErrorCode::InvalidInput, format!("{e}: {value}")))
    }
}

impl Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.to_hex().as_str())
    }
}
