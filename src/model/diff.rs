use crate::model::{as_i64_lenient, values_of, Error, Result};
use serde_json::Value;

#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct Diff {
    pub id: i64,
    pub date_created: i64,
}

// New
impl Diff {
    pub fn new(id: i64, date_created: i64) -> Self {
        Self { id, date_created }
    }
}

// Parser
impl Diff {
    pub fn parse(details: &Value) -> Result<Self> {
        let Some(id) = as_i64_lenient(&details["id"]) else {
            return Err(Error::data_shape("Not found 'id' field on diff"));
        };
        let Some(date_created) = as_i64_lenient(&details["dateCreated"]) else {
            return Err(Error::data_shape(format!(
                "Not found 'dateCreated' field on diff {id}"
            )));
        };
        Ok(Self::new(id, date_created))
    }

    /// Parses a `differential.querydiffs` result, which is keyed by diff id.
    pub fn parse_list(result: &Value) -> Result<Vec<Self>> {
        values_of(result).into_iter().map(Self::parse).collect()
    }
}
