use serde::{Deserialize, Serialize};

use crate::domain::SequenceId;

pub const CATALOG_ORIGIN_HEADER: &str = "x-catalog-origin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogOrigin {
    Live,
    Fallback,
}

impl CatalogOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Fallback => "fallback",
        }
    }
}

/// What the controller sent back for a successful command; never interpreted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceAck {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    pub data: String,
}

impl From<DeviceAck> for CommandResponse {
    fn from(value: DeviceAck) -> Self {
        Self {
            success: true,
            data: value.body,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMemberView {
    pub id: SequenceId,
    pub alias: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupView {
    pub name: String,
    pub display_name: String,
    pub members: Vec<GroupMemberView>,
}
