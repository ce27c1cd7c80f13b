//! Database row types — these map directly to SQLite rows.
//! Distinct from the gearhub-types API models so corrupt stored data
//! surfaces as an error at the conversion boundary, not a panic.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use gearhub_types::models::{Category, Gear, Role, Suggestion, SuggestionStatus, User};
use uuid::Uuid;

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: String,
}

impl UserRow {
    pub fn into_user(self) -> Result<User> {
        Ok(User {
            id: parse_id(&self.id)?,
            role: Role::parse(&self.role)
                .with_context(|| format!("unknown role '{}' for user '{}'", self.role, self.id))?,
            created_at: parse_timestamp(&self.created_at)?,
            username: self.username,
        })
    }
}

pub struct GearRow {
    pub id: String,
    pub name: String,
    pub nickname: String,
    pub gear_id: String,
    pub image_url: String,
    pub description: String,
    pub category: String,
    pub created_at: String,
}

impl GearRow {
    pub fn into_gear(self) -> Result<Gear> {
        Ok(Gear {
            id: parse_id(&self.id)?,
            category: Category::parse(&self.category).with_context(|| {
                format!("unknown category '{}' on gear '{}'", self.category, self.id)
            })?,
            created_at: parse_timestamp(&self.created_at)?,
            name: self.name,
            nickname: self.nickname,
            gear_id: self.gear_id,
            image_url: self.image_url,
            description: self.description,
        })
    }
}

pub struct SuggestionRow {
    pub id: String,
    pub name: String,
    pub nickname: String,
    pub gear_id: String,
    pub image_url: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub approved_gear_id: Option<String>,
    pub created_at: String,
}

impl SuggestionRow {
    pub fn into_suggestion(self) -> Result<Suggestion> {
        Ok(Suggestion {
            id: parse_id(&self.id)?,
            category: Category::parse(&self.category).with_context(|| {
                format!(
                    "unknown category '{}' on suggestion '{}'",
                    self.category, self.id
                )
            })?,
            status: SuggestionStatus::parse(&self.status).with_context(|| {
                format!(
                    "unknown status '{}' on suggestion '{}'",
                    self.status, self.id
                )
            })?,
            approved_gear_id: self
                .approved_gear_id
                .as_deref()
                .map(parse_id)
                .transpose()?,
            created_at: parse_timestamp(&self.created_at)?,
            name: self.name,
            nickname: self.nickname,
            gear_id: self.gear_id,
            image_url: self.image_url,
            description: self.description,
        })
    }
}

/// Outcome of a decide (approve/reject) attempt on a suggestion.
pub enum DecideOutcome {
    Applied,
    NotFound,
    AlreadyDecided { status: String },
}

fn parse_id(id: &str) -> Result<Uuid> {
    id.parse().with_context(|| format!("corrupt record id '{id}'"))
}

/// Rows written by this code carry RFC 3339 timestamps; rows created by
/// the schema's `datetime('now')` default use SQLite's naive
/// "YYYY-MM-DD HH:MM:SS" form, parsed as UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    s.parse::<DateTime<Utc>>()
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .with_context(|| format!("corrupt timestamp '{s}'"))
}
