use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const ARCRC_FILE_NAME: &str = ".arcrc";

#[derive(Debug, Deserialize)]
struct Arcrc {
    #[serde(default)]
    hosts: IndexMap<String, HostEntry>,
}

#[derive(Debug, Deserialize)]
struct HostEntry {
    token: Option<String>,
}

/// The Conduit endpoint and the token used to call it.
#[derive(Clone, Eq, PartialEq)]
pub struct Credentials {
    pub host: String,
    pub token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("token", &"<redacted>")
            .finish()
    }
}

// New
impl Credentials {
    pub fn new(host: impl ToString, token: impl ToString) -> Self {
        let mut host = host.to_string();
        if !host.ends_with('/') {
            host.push('/');
        }
        Self {
            host,
            token: token.to_string(),
        }
    }

    pub fn default_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(ARCRC_FILE_NAME))
            .ok_or_else(|| Error::Config("cannot locate the home directory".to_string()))
    }

    /// Reads an `.arcrc` file. Without `host` the first configured host wins.
    pub fn from_config(path: &Path, host: Option<&str>) -> Result<Self> {
        let json_str = fs::read_to_string(path)
            .map_err(|err| Error::Config(format!("cannot read `{}`: {err}", path.display())))?;
        Self::parse(&json_str, host)
    }
}

// Hosts are compared without their trailing slash.
fn same_host(configured: &str, wanted: &str) -> bool {
    configured.trim_end_matches('/') == wanted.trim_end_matches('/')
}

// Parser
impl Credentials {
    fn parse(json_str: &str, host: Option<&str>) -> Result<Self> {
        let arcrc: Arcrc = serde_json::from_str(json_str)
            .map_err(|err| Error::Config(format!("malformed arcrc: {err}")))?;

        let entry = match host {
            Some(wanted) => arcrc
                .hosts
                .iter()
                .find(|(key, _)| same_host(key, wanted)),
            None => arcrc.hosts.first(),
        };
        let Some((host, entry)) = entry else {
            return Err(Error::Config(match host {
                Some(wanted) => format!("host `{wanted}` is not configured"),
                None => "no hosts configured".to_string(),
            }));
        };
        let Some(token) = entry.token.as_deref().filter(|token| !token.is_empty()) else {
            return Err(Error::Config(format!("no token for host `{host}`")));
        };
        Ok(Self::new(host, token))
    }
}
