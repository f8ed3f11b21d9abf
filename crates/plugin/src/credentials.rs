//! Credentials stored by the host between sessions.
//!
//! The plugin has no account: its "credentials" are the games the user
//! said they own and, optionally, the MultiMC executable they use.
//!
//! ```json
//! {"owned": ["mc", "mcd"], "multimcpath": "C:\\MultiMC\\MultiMC.exe"}
//! ```

use minegate_protocol::GameId;
use serde::{Deserialize, Serialize};

use crate::error::PluginError;

/// Query key carrying the MultiMC path in the wizard's end URI.
const PATH_PARAM: &str = "path";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub owned: Vec<GameId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multimcpath: Option<String>,
}

impl Credentials {
    /// Reads stored credentials.
    ///
    /// An `owned` list is required. Ids this version does not know are
    /// skipped.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, PluginError> {
        let owned = value
            .get("owned")
            .and_then(serde_json::Value::as_array)
            .ok_or_else(|| PluginError::InvalidCredentials("missing owned games".into()))?;

        let mut credentials = Credentials::default();
        for id in owned {
            let Some(id) = id.as_str() else {
                return Err(PluginError::InvalidCredentials(format!("not a game id: {id}")));
            };
            match id.parse::<GameId>() {
                Ok(game) => credentials.add_owned(game),
                Err(e) => tracing::warn!(error = %e, "ignoring stored game"),
            }
        }

        credentials.multimcpath = value
            .get("multimcpath")
            .and_then(serde_json::Value::as_str)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        Ok(credentials)
    }

    /// Reads the wizard's answers from its end URI.
    ///
    /// Every query key naming a game marks it as owned; `path` carries the
    /// MultiMC executable.
    pub fn from_end_uri(end_uri: &str) -> Result<Self, PluginError> {
        let url = reqwest::Url::parse(end_uri)
            .map_err(|e| PluginError::InvalidCredentials(format!("bad end uri: {e}")))?;

        let mut credentials = Credentials::default();
        for (key, value) in url.query_pairs() {
            if key == PATH_PARAM {
                if !value.trim().is_empty() {
                    credentials.multimcpath = Some(value.trim().to_string());
                }
            } else if let Ok(game) = key.parse::<GameId>() {
                credentials.add_owned(game);
            }
        }
        Ok(credentials)
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({ "owned": [] }))
    }

    fn add_owned(&mut self, game: GameId) {
        if !self.owned.contains(&game) {
            self.owned.push(game);
        }
    }
}
