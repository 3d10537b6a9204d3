use crate::model::{as_i64_lenient, values_of, Error, Result};
use serde_json::Value;

#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct Revision {
    pub id: i64,
    pub phid: String,
    pub title: String,
    pub uri: String,
    pub date_created: i64,
    pub date_modified: i64,
    pub status_name: String,
    pub diff_count: usize,
    pub line_count: i64,
    pub repository_phid: Option<String>,
    pub reviewers: Vec<String>,
}

// Parser
impl Revision {
    pub fn parse(details: &Value) -> Result<Self> {
        let Some(id) = as_i64_lenient(&details["id"]) else {
            return Err(Error::data_shape("Not found 'id' field on revision"));
        };
        let field = |name: &str| Error::data_shape(format!("Not found '{name}' field on D{id}"));

        let Some(phid) = details["phid"].as_str() else {
            return Err(field("phid"));
        };
        let Some(title) = details["title"].as_str() else {
            return Err(field("title"));
        };
        let Some(uri) = details["uri"].as_str() else {
            return Err(field("uri"));
        };
        let Some(date_created) = as_i64_lenient(&details["dateCreated"]) else {
            return Err(field("dateCreated"));
        };
        let Some(date_modified) = as_i64_lenient(&details["dateModified"]) else {
            return Err(field("dateModified"));
        };
        let Some(status_name) = details["statusName"].as_str() else {
            return Err(field("statusName"));
        };
        let line_count = as_i64_lenient(&details["lineCount"]).unwrap_or_default();
        let diff_count = values_of(&details["diffs"]).len();
        let repository_phid = details["repositoryPHID"]
            .as_str()
            .filter(|phid| !phid.is_empty())
            .map(String::from);
        let reviewers = values_of(&details["reviewers"])
            .into_iter()
            .filter_map(|reviewer| reviewer.as_str().map(String::from))
            .collect();

        Ok(Self {
            id,
            phid: phid.to_string(),
            title: title.to_string(),
            uri: uri.to_string(),
            date_created,
            date_modified,
            status_name: status_name.to_string(),
            diff_count,
            line_count,
            repository_phid,
            reviewers,
        })
    }

    /// Parses a `differential.query` result, keeping the server's order.
    pub fn parse_list(result: &Value) -> Result<Vec<Self>> {
        let Some(revisions) = result.as_array() else {
            return Err(Error::data_shape("differential.query did not return a list"));
        };
        revisions.iter().map(Self::parse).collect()
    }
}
