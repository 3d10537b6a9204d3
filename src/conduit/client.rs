use crate::config::Credentials;
use crate::error::{Error, Result};
use serde_json::Value;
use tokio::sync::Semaphore;

const USER_AGENT: &str = concat!("revision-report/", env!("CARGO_PKG_VERSION"));
const TOKEN_PARAM: &str = "api.token";

pub type Params = Vec<(String, String)>;

/// Form-encoded POST client for a Conduit endpoint.
///
/// Every request holds a permit from `permits`, so at most `max_in_flight`
/// calls are outstanding at once no matter how many lookups a revision fans
/// out to.
pub struct ConduitClient {
    http: reqwest::Client,
    credentials: Credentials,
    permits: Semaphore,
}

impl ConduitClient {
    pub fn new(credentials: Credentials, max_in_flight: usize) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(transport("<client>"))?;
        Ok(Self {
            http,
            credentials,
            permits: Semaphore::new(max_in_flight.max(1)),
        })
    }

    /// Calls `method` and returns the `result` member of the envelope.
    pub async fn call(&self, method: &str, mut params: Params) -> Result<Value> {
        let url = format!("{}{}", self.credentials.host, method);
        log::debug!("POST {url} with {} parameter(s)", params.len());
        params.push((TOKEN_PARAM.to_string(), self.credentials.token.clone()));

        // The semaphore is never closed, so a failed acquire cannot happen.
        let _permit = self.permits.acquire().await.ok();
        let mut envelope: Value = self
            .http
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(transport(method))?
            .error_for_status()
            .map_err(transport(method))?
            .json()
            .await
            .map_err(transport(method))?;

        if let Some(code) = envelope["error_code"].as_str() {
            return Err(Error::Api {
                method: method.to_string(),
                code: code.to_string(),
                info: envelope["error_info"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string(),
            });
        }
        Ok(envelope
            .get_mut("result")
            .map(Value::take)
            .unwrap_or(Value::Null))
    }
}

fn transport(method: &str) -> impl Fn(reqwest::Error) -> Error + '_ {
    move |source| Error::Transport {
        method: method.to_string(),
        source,
    }
}
