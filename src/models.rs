//! # Domain Models
//!
//! Generic base record shape shared by MongoDB documents. No concrete
//! business entities are built on it yet; domain collections embed
//! [`BaseDocument`] with `#[serde(flatten)]` when they arrive.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

/// Common fields for all stored documents: identifier plus
/// creation/update timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BaseDocument {
    /// BSON object id, assigned on first insert.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl BaseDocument {
    /// New document with both timestamps set to now and a fresh id.
    pub fn new() -> Self {
        let now = DateTime::now();
        Self {
            id: Some(ObjectId::new()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at`; call before persisting a modification.
    pub fn touch(&mut self) {
        self.updated_at = DateTime::now();
    }
}

impl Default for BaseDocument {
    fn default() -> Self {
        Self::new()
    }
}
