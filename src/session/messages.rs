// src/session/messages.rs

use chrono::{DateTime, Utc};

use crate::persona::DoctorId;

/// Who a history entry belongs to. Drives the rendering class and whether
/// the entry is mapped into the completion prompt (system notices are not).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Patient,
    Doctor,
    System,
}

/// A single consultation turn. Immutable once created.
#[derive(Debug, Clone)]
pub struct Message {
    pub sender: String,
    pub body: String,
    pub timestamp: DateTime<Utc>,
    pub role: Role,
}

impl Message {
    pub fn patient(body: impl Into<String>) -> Self {
        Self {
            sender: "You".to_string(),
            body: body.into(),
            timestamp: Utc::now(),
            role: Role::Patient,
        }
    }

    pub fn doctor(doctor: DoctorId, body: impl Into<String>) -> Self {
        Self {
            sender: doctor.profile().name.to_string(),
            body: body.into(),
            timestamp: Utc::now(),
            role: Role::Doctor,
        }
    }

    pub fn system(body: impl Into<String>) -> Self {
        Self {
            sender: "Reception".to_string(),
            body: body.into(),
            timestamp: Utc::now(),
            role: Role::System,
        }
    }
}
