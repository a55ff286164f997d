//! Network settings for fstation.
//!
//! [Network] is the raw `[network]` table. [InternalNetwork] is what the rest of fstation uses:
//! the timeout clamped and turned into a [Duration], blank strings treated as unset.

use crate::utils::{DEFAULT_TIMEOUT_SECS, clamp_timeout_secs};

use serde::Deserialize;

use std::time::Duration;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Network {
    timeout_secs: u64,
    user_agent: String,
    base_url: Option<String>,
}

impl Default for Network {
    fn default() -> Self {
        Network {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
            base_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalNetwork {
    timeout: Duration,
    user_agent: String,
    base_url: Option<String>,
}

impl From<Network> for InternalNetwork {
    fn from(n: Network) -> Self {
        let user_agent = if n.user_agent.trim().is_empty() {
            default_user_agent()
        } else {
            n.user_agent
        };
        let base_url = n
            .base_url
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty());

        Self {
            timeout: Duration::from_secs(clamp_timeout_secs(n.timeout_secs)),
            user_agent,
            base_url,
        }
    }
}

impl Default for InternalNetwork {
    fn default() -> Self {
        Self::from(Network::default())
    }
}

impl InternalNetwork {
    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[inline]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    #[inline]
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }
}

fn default_user_agent() -> String {
    format!("fstation/{}", env!("CARGO_PKG_VERSION"))
}
