use crate::model::{Error, Result};
use serde_json::Value;

#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct Repository {
    pub phid: String,
    pub name: String,
}

// New
impl Repository {
    pub fn new(phid: impl ToString, name: impl ToString) -> Self {
        Self {
            phid: phid.to_string(),
            name: name.to_string(),
        }
    }
}

// Parser
impl Repository {
    pub fn parse(details: &Value) -> Result<Self> {
        let Some(phid) = details["phid"].as_str() else {
            return Err(Error::data_shape("Not found 'phid' field on repository"));
        };
        let Some(name) = details["name"].as_str() else {
            return Err(Error::data_shape(format!(
                "Not found 'name' field on repository {phid}"
            )));
        };
        Ok(Self::new(phid, name))
    }

    /// First repository of a `repository.query` result, `None` when nothing
    /// matched.
    pub fn parse_first(result: &Value) -> Result<Option<Self>> {
        match result.as_array().and_then(|repos| repos.first()) {
            Some(details) => Self::parse(details).map(Some),
            None => Ok(None),
        }
    }
}
