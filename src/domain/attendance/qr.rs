//! Member QR badge payload.
//!
//! Badges encode `{"id": <member id>, "name": <full name>, "type": "gym-attendance"}`.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::MemberId;
use crate::domain::membership::Member;

use super::AttendanceError;

pub const QR_PAYLOAD_KIND: &str = "gym-attendance";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrPayload {
    pub id: MemberId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl QrPayload {
    pub fn for_member(member: &Member) -> Self {
        Self {
            id: member.id,
            name: member.full_name(),
            kind: QR_PAYLOAD_KIND.to_string(),
        }
    }

    /// Decodes scanned text, rejecting codes that are not attendance badges.
    pub fn parse(raw: &str) -> Result<Self, AttendanceError> {
        let payload: QrPayload = serde_json::from_str(raw.trim())
            .map_err(|e| AttendanceError::InvalidQrPayload(e.to_string()))?;
        if payload.kind != QR_PAYLOAD_KIND {
            return Err(AttendanceError::InvalidQrPayload(format!(
                "unexpected badge type '{}'",
                payload.kind
            )));
        }
        Ok(payload)
    }

    pub fn to_json(&self) -> String {
        serde_json::json!({ "id": self.id, "name": self.name, "type": self.kind }).to_string()
    }
}
