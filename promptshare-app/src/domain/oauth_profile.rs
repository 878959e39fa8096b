use serde::{Deserialize, Serialize};

/// Profile handed over by the OAuth provider after a successful code exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthProfile {
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}
