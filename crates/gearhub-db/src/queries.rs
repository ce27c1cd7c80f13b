use crate::Database;
use crate::models::{DecideOutcome, GearRow, SuggestionRow, UserRow};
use anyhow::Result;
use gearhub_types::models::SuggestionStatus;
use rusqlite::{Connection, OptionalExtension, params};

impl Database {
    // -- Users --

    pub fn create_user(&self, row: &UserRow) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, username, password_hash, role, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![row.id, row.username, row.password_hash, row.role, row.created_at],
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let row = conn
                .prepare(
                    "SELECT id, username, password_hash, role, created_at
                     FROM users WHERE username = ?1",
                )?
                .query_row([username], map_user)
                .optional()?;
            Ok(row)
        })
    }

    pub fn list_users(&self) -> Result<Vec<UserRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, username, password_hash, role, created_at FROM users",
            )?;
            let rows = stmt
                .query_map([], map_user)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Gears --

    pub fn insert_gear(&self, row: &GearRow) -> Result<()> {
        self.with_conn(|conn| {
            insert_gear(conn, row)?;
            Ok(())
        })
    }

    pub fn list_gears(&self) -> Result<Vec<GearRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, nickname, gear_id, image_url, description, category, created_at
                 FROM gears",
            )?;
            let rows = stmt
                .query_map([], map_gear)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Overwrites all mutable fields at once. Returns false when no gear
    /// has the given id.
    #[allow(clippy::too_many_arguments)]
    pub fn update_gear(
        &self,
        id: &str,
        name: &str,
        nickname: &str,
        gear_id: &str,
        image_url: &str,
        description: &str,
        category: &str,
    ) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE gears
                 SET name = ?2, nickname = ?3, gear_id = ?4,
                     image_url = ?5, description = ?6, category = ?7
                 WHERE id = ?1",
                params![id, name, nickname, gear_id, image_url, description, category],
            )?;
            Ok(changed > 0)
        })
    }

    pub fn delete_gear(&self, id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM gears WHERE id = ?1", [id])?;
            Ok(changed > 0)
        })
    }

    // -- Suggestions --

    pub fn insert_suggestion(&self, row: &SuggestionRow) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO suggestions
                     (id, name, nickname, gear_id, image_url, description,
                      category, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    row.id,
                    row.name,
                    row.nickname,
                    row.gear_id,
                    row.image_url,
                    row.description,
                    row.category,
                    row.status,
                    row.created_at,
                ],
            )?;
            Ok(())
        })
    }

    pub fn list_suggestions(&self) -> Result<Vec<SuggestionRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, nickname, gear_id, image_url, description,
                        category, status, approved_gear_id, created_at
                 FROM suggestions",
            )?;
            let rows = stmt
                .query_map([], map_suggestion)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn get_suggestion(&self, id: &str) -> Result<Option<SuggestionRow>> {
        self.with_conn(|conn| query_suggestion(conn, id))
    }

    /// Approve transition: copy the suggestion into a new gear record and
    /// mark the suggestion Approved, both inside one transaction. A crash
    /// can therefore never leave a gear without the Approved mark (or the
    /// reverse), and a retry after success hits the terminal-status guard
    /// instead of creating a second gear.
    pub fn approve_suggestion(
        &self,
        id: &str,
        new_gear_id: &str,
        now: &str,
    ) -> Result<DecideOutcome> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let Some(suggestion) = query_suggestion(&tx, id)? else {
                return Ok(DecideOutcome::NotFound);
            };
            if suggestion.status != SuggestionStatus::Pending.as_str() {
                return Ok(DecideOutcome::AlreadyDecided {
                    status: suggestion.status,
                });
            }

            insert_gear(
                &tx,
                &GearRow {
                    id: new_gear_id.to_string(),
                    name: suggestion.name,
                    nickname: suggestion.nickname,
                    gear_id: suggestion.gear_id,
                    image_url: suggestion.image_url,
                    description: suggestion.description,
                    category: suggestion.category,
                    created_at: now.to_string(),
                },
            )?;
            tx.execute(
                "UPDATE suggestions SET status = ?2, approved_gear_id = ?3 WHERE id = ?1",
                params![id, SuggestionStatus::Approved.as_str(), new_gear_id],
            )?;

            tx.commit()?;
            Ok(DecideOutcome::Applied)
        })
    }

    /// Reject transition: single guarded update, no gear is created.
    pub fn reject_suggestion(&self, id: &str) -> Result<DecideOutcome> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE suggestions SET status = ?2 WHERE id = ?1 AND status = ?3",
                params![
                    id,
                    SuggestionStatus::Rejected.as_str(),
                    SuggestionStatus::Pending.as_str(),
                ],
            )?;
            if changed > 0 {
                return Ok(DecideOutcome::Applied);
            }
            // Nothing changed: either the id is unknown or the suggestion
            // was already decided.
            match query_suggestion(conn, id)? {
                None => Ok(DecideOutcome::NotFound),
                Some(row) => Ok(DecideOutcome::AlreadyDecided { status: row.status }),
            }
        })
    }
}

fn insert_gear(conn: &Connection, row: &GearRow) -> Result<()> {
    conn.execute(
        "INSERT INTO gears
             (id, name, nickname, gear_id, image_url, description, category, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            row.id,
            row.name,
            row.nickname,
            row.gear_id,
            row.image_url,
            row.description,
            row.category,
            row.created_at,
        ],
    )?;
    Ok(())
}

fn query_suggestion(conn: &Connection, id: &str) -> Result<Option<SuggestionRow>> {
    let row = conn
        .prepare(
            "SELECT id, name, nickname, gear_id, image_url, description,
                    category, status, approved_gear_id, created_at
             FROM suggestions WHERE id = ?1",
        )?
        .query_row([id], map_suggestion)
        .optional()?;
    Ok(row)
}

fn map_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        role: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn map_gear(row: &rusqlite::Row<'_>) -> rusqlite::Result<GearRow> {
    Ok(GearRow {
        id: row.get(0)?,
        name: row.get(1)?,
        nickname: row.get(2)?,
        gear_id: row.get(3)?,
        image_url: row.get(4)?,
        description: row.get(5)?,
        category: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn map_suggestion(row: &rusqlite::Row<'_>) -> rusqlite::Result<SuggestionRow> {
    Ok(SuggestionRow {
        id: row.get(0)?,
        name: row.get(1)?,
        nickname: row.get(2)?,
        gear_id: row.get(3)?,
        image_url: row.get(4)?,
        description: row.get(5)?,
        category: row.get(6)?,
        status: row.get(7)?,
        approved_gear_id: row.get(8)?,
        created_at: row.get(9)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use gearhub_types::models::Category;
    use uuid::Uuid;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn user_row(username: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password_hash: "hash".to_string(),
            role: "Manager".to_string(),
            created_at: Utc::now().to_rfc3339(),
        }
    }

    fn suggestion_row() -> SuggestionRow {
        SuggestionRow {
            id: Uuid::new_v4().to_string(),
            name: "Gravity Coil".to_string(),
            nickname: "coil".to_string(),
            gear_id: "16688968".to_string(),
            image_url: "https://example.com/coil.png".to_string(),
            description: "Jump higher".to_string(),
            category: Category::Players.as_str().to_string(),
            status: SuggestionStatus::Pending.as_str().to_string(),
            approved_gear_id: None,
            created_at: Utc::now().to_rfc3339(),
        }
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let db = db();
        db.create_user(&user_row("alice")).unwrap();
        assert!(db.create_user(&user_row("alice")).is_err());
        // Case-sensitive match: a different casing is a different user.
        db.create_user(&user_row("Alice")).unwrap();
    }

    #[test]
    fn approve_copies_fields_and_is_terminal() {
        let db = db();
        let suggestion = suggestion_row();
        db.insert_suggestion(&suggestion).unwrap();

        let gear_id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        assert!(matches!(
            db.approve_suggestion(&suggestion.id, &gear_id, &now).unwrap(),
            DecideOutcome::Applied
        ));

        let gears = db.list_gears().unwrap();
        assert_eq!(gears.len(), 1);
        assert_eq!(gears[0].id, gear_id);
        assert_eq!(gears[0].name, suggestion.name);
        assert_eq!(gears[0].category, suggestion.category);

        let stored = db.get_suggestion(&suggestion.id).unwrap().unwrap();
        assert_eq!(stored.status, SuggestionStatus::Approved.as_str());
        assert_eq!(stored.approved_gear_id.as_deref(), Some(gear_id.as_str()));

        // A second approve must not create a second gear.
        assert!(matches!(
            db.approve_suggestion(&suggestion.id, &Uuid::new_v4().to_string(), &now)
                .unwrap(),
            DecideOutcome::AlreadyDecided { .. }
        ));
        assert_eq!(db.list_gears().unwrap().len(), 1);

        // Nor can it be rejected afterwards.
        assert!(matches!(
            db.reject_suggestion(&suggestion.id).unwrap(),
            DecideOutcome::AlreadyDecided { .. }
        ));
    }

    #[test]
    fn reject_creates_no_gear_and_is_terminal() {
        let db = db();
        let suggestion = suggestion_row();
        db.insert_suggestion(&suggestion).unwrap();

        assert!(matches!(
            db.reject_suggestion(&suggestion.id).unwrap(),
            DecideOutcome::Applied
        ));
        assert!(db.list_gears().unwrap().is_empty());

        let stored = db.get_suggestion(&suggestion.id).unwrap().unwrap();
        assert_eq!(stored.status, SuggestionStatus::Rejected.as_str());

        let now = Utc::now().to_rfc3339();
        assert!(matches!(
            db.approve_suggestion(&suggestion.id, &Uuid::new_v4().to_string(), &now)
                .unwrap(),
            DecideOutcome::AlreadyDecided { .. }
        ));
    }

    #[test]
    fn deciding_unknown_suggestion_is_not_found() {
        let db = db();
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        assert!(matches!(
            db.approve_suggestion(&id, &Uuid::new_v4().to_string(), &now).unwrap(),
            DecideOutcome::NotFound
        ));
        assert!(matches!(
            db.reject_suggestion(&id).unwrap(),
            DecideOutcome::NotFound
        ));
    }

    #[test]
    fn update_and_delete_report_missing_gears() {
        let db = db();
        let id = Uuid::new_v4().to_string();
        assert!(!db
            .update_gear(&id, "n", "nn", "g", "u", "d", "Players")
            .unwrap());
        assert!(!db.delete_gear(&id).unwrap());
    }
}
