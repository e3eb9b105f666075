//! Instrument configuration documents

use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Maps configuration ids to channel indices of the loaded instrument
pub type IdTable = HashMap<i64, usize>;

/// One entry of the `channels` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub index: usize,
    #[serde(rename = "type")]
    pub channel_type: String,
    pub name: String,
    pub color: String,
    pub id: i64,
}

/// Saved instrument configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeConfig {
    #[serde(default)]
    pub channels: BTreeMap<String, ChannelConfig>,
}

impl ScopeConfig {
    /// Parse a configuration from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
