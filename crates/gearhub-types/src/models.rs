use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Staff role tiers, lowest to highest. The variant order matters:
/// `PartialOrd` is derived so `role >= Role::Manager` reads naturally,
/// but authorization decisions go through the policy table, not
/// ad-hoc comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Moderator,
    Manager,
    Owner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Moderator => "Moderator",
            Role::Manager => "Manager",
            Role::Owner => "Owner",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Moderator" => Some(Role::Moderator),
            "Manager" => Some(Role::Manager),
            "Owner" => Some(Role::Owner),
            _ => None,
        }
    }
}

/// Catalog category tags. Closed enum: payloads carrying anything else
/// fail deserialization instead of being stored as free-form strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Players,
    Moderator,
    Events,
    Forbidden,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Players => "Players",
            Category::Moderator => "Moderator",
            Category::Events => "Events",
            Category::Forbidden => "Forbidden",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Players" => Some(Category::Players),
            "Moderator" => Some(Category::Moderator),
            "Events" => Some(Category::Events),
            "Forbidden" => Some(Category::Forbidden),
            _ => None,
        }
    }
}

/// Suggestion lifecycle. `Approved` and `Rejected` are terminal; the
/// workflow layer refuses to re-decide a suggestion in either state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuggestionStatus {
    Pending,
    Approved,
    Rejected,
}

impl SuggestionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionStatus::Pending => "Pending",
            SuggestionStatus::Approved => "Approved",
            SuggestionStatus::Rejected => "Rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(SuggestionStatus::Pending),
            "Approved" => Some(SuggestionStatus::Approved),
            "Rejected" => Some(SuggestionStatus::Rejected),
            _ => None,
        }
    }
}

/// A user's public identity. The password hash lives only in the db
/// layer and is never serialized out of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// A catalog item. `gear_id` is the external reference id of the item,
/// distinct from our own record id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gear {
    pub id: Uuid,
    pub name: String,
    pub nickname: String,
    pub gear_id: String,
    pub image_url: String,
    pub description: String,
    pub category: Category,
    pub created_at: DateTime<Utc>,
}

/// A public submission awaiting staff review. On approval the derived
/// gear's id is recorded here, so a decided suggestion always names the
/// catalog entry it produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: Uuid,
    pub name: String,
    pub nickname: String,
    pub gear_id: String,
    pub image_url: String,
    pub description: String,
    pub category: Category,
    pub status: SuggestionStatus,
    pub approved_gear_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
