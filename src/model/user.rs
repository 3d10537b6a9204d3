use crate::model::{Error, Result};
use serde_json::Value;

#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct User {
    pub phid: String,
    pub username: String,
    pub real_name: String,
}

// New
impl User {
    pub fn new(phid: impl ToString, username: impl ToString, real_name: impl ToString) -> Self {
        Self {
            phid: phid.to_string(),
            username: username.to_string(),
            real_name: real_name.to_string(),
        }
    }
}

// Parser
impl User {
    /// Parses one user object, as returned by `user.whoami` or as an element
    /// of `user.query`.
    pub fn parse(details: &Value) -> Result<Self> {
        let Some(phid) = details["phid"].as_str() else {
            return Err(Error::data_shape("Not found 'phid' field on user"));
        };
        let Some(username) = details["userName"].as_str() else {
            return Err(Error::data_shape(format!(
                "Not found 'userName' field on user {phid}"
            )));
        };
        let real_name = details["realName"].as_str().unwrap_or_default();
        Ok(Self::new(phid, username, real_name))
    }

    /// First user of a `user.query` result, `None` when nothing matched.
    pub fn parse_first(result: &Value) -> Result<Option<Self>> {
        match result.as_array().and_then(|users| users.first()) {
            Some(details) => Self::parse(details).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_whoami_result() {
        let user = User::parse(&json!({
            "phid": "PHID-USER-me",
            "userName": "alice",
            "realName": "Alice Liddell",
            "roles": ["verified"],
        }))
        .unwrap();
        assert_eq!(user, User::new("PHID-USER-me", "alice", "Alice Liddell"));
    }

    #[test]
    fn missing_username_is_a_data_error() {
        let err = User::parse(&json!({"phid": "PHID-USER-x"})).unwrap_err();
        assert!(err.is_skippable());
    }

    #[test]
    fn empty_query_result_is_none() {
        assert_eq!(User::parse_first(&json!([])).unwrap(), None);
        let first = User::parse_first(&json!([
            {"phid": "PHID-USER-a", "userName": "a"},
            {"phid": "PHID-USER-b", "userName": "b"},
        ]))
        .unwrap();
        assert_eq!(first.map(|u| u.username), Some("a".to_string()));
    }
}
