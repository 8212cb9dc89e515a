use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Forex,
    Crypto,
    Commodity,
    Index,
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetType::Forex => write!(f, "forex"),
            AssetType::Crypto => write!(f, "crypto"),
            AssetType::Commodity => write!(f, "commodity"),
            AssetType::Index => write!(f, "index"),
        }
    }
}

/// Reference data for a tradable symbol. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: u64,
    pub symbol: String,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
}

impl Asset {
    pub fn new(id: u64, symbol: &str, name: &str, asset_type: AssetType) -> Self {
        Self {
            id,
            symbol: symbol.to_string(),
            name: name.to_string(),
            asset_type,
        }
    }
}
