//! Project store configuration

use serde::Deserialize;

/// Project store behaviour
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct StoreConfig {
    /// Reload the remote collection after a failed update or delete
    #[serde(default)]
    pub reconcile_on_failure: bool,
}
