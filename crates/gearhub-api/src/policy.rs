//! Table-driven authorization. One pure function decides every
//! (role, action) pair; handlers call `require` and propagate the
//! Forbidden error. Listing gears and submitting suggestions take no
//! token at all and never reach this table.

use gearhub_types::models::Role;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateGear,
    UpdateGear,
    DeleteGear,
    CreateUser,
    ListUsers,
    ListSuggestions,
    ApproveSuggestion,
    RejectSuggestion,
}

pub fn allowed(role: Role, action: Action) -> bool {
    match action {
        Action::CreateGear
        | Action::UpdateGear
        | Action::DeleteGear
        | Action::CreateUser
        | Action::ApproveSuggestion
        | Action::RejectSuggestion => matches!(role, Role::Manager | Role::Owner),
        Action::ListSuggestions => {
            matches!(role, Role::Moderator | Role::Manager | Role::Owner)
        }
        Action::ListUsers => matches!(role, Role::Owner),
    }
}

pub fn require(role: Role, action: Action) -> Result<(), ApiError> {
    if allowed(role, action) {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}
