//! Represents a customer review shown on the about page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Free-text feedback. Not tied to any vehicle or booking.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug, PartialEq)]
pub struct Review {
    pub id: Uuid,
    pub name: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}
