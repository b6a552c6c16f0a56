//! Parent repository: admin-created parents, self-signup by admission
//! number, and parent/child listings.

use std::collections::HashMap;

use chrono::Utc;

use bp_core::entities::{Parent, User};
use bp_core::enums::Role;
use bp_core::requests::{NewParent, ParentSignup};
use bp_core::responses::{ChildSummary, LinkedStudent, ParentWithChildren};

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime};
use crate::repos::EMAIL_TAKEN;
use crate::repos::student::{SELECT_COLS as STUDENT_COLS, row_to_student, row_to_student_at};
use crate::service::SchoolService;
use crate::updates::{ParentUpdate, SetClauses};

const SELECT_COLS: &str = "id, user_id, name, email, phone, created_at";

fn row_to_parent(row: &libsql::Row) -> Result<Parent, DatabaseError> {
    Ok(Parent {
        id: row.get(0)?,
        user_id: row.get::<Option<i64>>(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        phone: get_opt_string(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

fn not_found() -> DatabaseError {
    DatabaseError::NotFound("Parent not found".into())
}

impl SchoolService {
    /// Admin-created parent: a `users` login (role parent) plus a linked
    /// `parents` row. Without a password the configured default is used.
    pub async fn add_parent(&self, parent: &NewParent) -> Result<(User, Parent), DatabaseError> {
        let password = parent
            .password
            .as_deref()
            .unwrap_or(self.settings().default_parent_password.as_str());
        let user = self
            .insert_user(Role::Parent, &parent.name, &parent.email, password, None)
            .await?;
        let created = self
            .insert_parent(
                Some(user.id),
                &parent.name,
                &parent.email,
                parent.phone.as_deref(),
                None,
            )
            .await?;
        Ok((user, created))
    }

    /// Parent self-signup. The admission number is the child's `reg_no`.
    pub async fn signup_parent(
        &self,
        signup: &ParentSignup,
    ) -> Result<(Parent, i64), DatabaseError> {
        let student = self
            .find_student_by_reg_no(&signup.admission_no)
            .await?
            .ok_or_else(|| DatabaseError::Validation("Invalid admission number".into()))?;
        if self.email_registered(&signup.email).await? {
            return Err(DatabaseError::Conflict(EMAIL_TAKEN.into()));
        }

        let password_hash = self.hash_password(&signup.password).await?;
        let parent = self
            .insert_parent(
                None,
                &signup.name,
                &signup.email,
                Some(&signup.phone),
                Some(&password_hash),
            )
            .await?;

        self.execute_write(
            "INSERT INTO parent_child (parent_id, student_id) VALUES (?1, ?2)",
            libsql::params![parent.id, student.id],
            "Parent is already linked to this student",
        )
        .await?;

        tracing::info!(parent_id = parent.id, student_id = student.id, "parent signed up");
        Ok((parent, student.id))
    }

    async fn insert_parent(
        &self,
        user_id: Option<i64>,
        name: &str,
        email: &str,
        phone: Option<&str>,
        password_hash: Option<&str>,
    ) -> Result<Parent, DatabaseError> {
        let now = Utc::now();
        let id = self
            .insert_returning_id(
                "INSERT INTO parents (user_id, name, email, phone, password_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id",
                libsql::params![user_id, name, email, phone, password_hash, now.to_rfc3339()],
                EMAIL_TAKEN,
            )
            .await?;
        Ok(Parent {
            id,
            user_id,
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.map(String::from),
            created_at: now,
        })
    }

    pub async fn get_parent(&self, id: i64) -> Result<Parent, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM parents WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(not_found)?;
        row_to_parent(&row)
    }

    pub async fn list_parents(&self) -> Result<Vec<Parent>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM parents ORDER BY id"), ())
            .await?;

        let mut parents = Vec::new();
        while let Some(row) = rows.next().await? {
            parents.push(row_to_parent(&row)?);
        }
        Ok(parents)
    }

    /// Parents with their children; each child carries subject names.
    /// Internal ids are not exposed.
    pub async fn list_parents_with_children(
        &self,
    ) -> Result<Vec<ParentWithChildren>, DatabaseError> {
        let subjects = self.subjects_by_student().await?;

        let mut children: HashMap<i64, Vec<ChildSummary>> = HashMap::new();
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT pc.parent_id, {} FROM parent_child pc
                     JOIN students s ON s.id = pc.student_id
                     ORDER BY pc.parent_id, s.id",
                    qualified(STUDENT_COLS, "s")
                ),
                (),
            )
            .await?;
        while let Some(row) = rows.next().await? {
            let parent_id = row.get::<i64>(0)?;
            let student = row_to_student_at(&row, 1)?;
            children.entry(parent_id).or_default().push(ChildSummary {
                subjects: subjects.get(&student.id).cloned().unwrap_or_default(),
                reg_no: student.reg_no,
                name: student.name,
                gender: student.gender,
                date_of_birth: student.date_of_birth,
                grade: student.grade,
            });
        }

        Ok(self
            .list_parents()
            .await?
            .into_iter()
            .map(|parent| ParentWithChildren {
                children: children.remove(&parent.id).unwrap_or_default(),
                name: parent.name,
                email: parent.email,
                phone: parent.phone,
            })
            .collect())
    }

    /// Students linked to one parent.
    pub async fn children_of_parent(
        &self,
        parent_id: i64,
    ) -> Result<Vec<LinkedStudent>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {} FROM parent_child pc
                     JOIN students s ON s.id = pc.student_id
                     WHERE pc.parent_id = ?1
                     ORDER BY s.id",
                    qualified(STUDENT_COLS, "s")
                ),
                [parent_id],
            )
            .await?;

        let mut students = Vec::new();
        while let Some(row) = rows.next().await? {
            students.push(LinkedStudent::from(row_to_student(&row)?));
        }
        if students.is_empty() {
            return Err(DatabaseError::NotFound(
                "No students linked to this parent.".into(),
            ));
        }
        Ok(students)
    }

    /// Partial update. Name and email changes are mirrored to the linked login.
    pub async fn update_parent(
        &self,
        id: i64,
        update: ParentUpdate,
    ) -> Result<Parent, DatabaseError> {
        let mut sets = SetClauses::default();
        let mut login_sets = SetClauses::default();
        if let Some(name) = update.name {
            sets.push("name", name.clone());
            login_sets.push("name", name);
        }
        let new_email = update.email;
        if let Some(email) = &new_email {
            sets.push("email", email.clone());
            login_sets.push("email", email.clone());
        }
        if let Some(phone) = update.phone {
            sets.push_nullable("phone", phone);
        }
        if sets.is_empty() {
            return self.get_parent(id).await;
        }

        let current = self.get_parent(id).await?;
        if let Some(email) = &new_email {
            if self
                .email_registered_except(email, current.user_id, Some(id))
                .await?
            {
                return Err(DatabaseError::Conflict(EMAIL_TAKEN.into()));
            }
        }
        if let Some(user_id) = current.user_id {
            if !login_sets.is_empty() {
                let (sql, params) = login_sets.into_update(
                    "users",
                    vec![("id", user_id.into()), ("role", Role::Parent.as_str().into())],
                );
                self.execute_write(&sql, libsql::params_from_iter(params), EMAIL_TAKEN)
                    .await?;
            }
        }

        let (sql, params) = sets.into_update("parents", vec![("id", id.into())]);
        self.execute_write(&sql, libsql::params_from_iter(params), EMAIL_TAKEN)
            .await?;
        tracing::info!(parent_id = id, "parent updated");
        self.get_parent(id).await
    }

    /// Delete a parent, its child links, and its login if it has one.
    pub async fn delete_parent(&self, id: i64) -> Result<(), DatabaseError> {
        let parent = self.get_parent(id).await?;
        self.db()
            .conn()
            .execute("DELETE FROM parents WHERE id = ?1", [id])
            .await?;
        if let Some(user_id) = parent.user_id {
            self.db()
                .conn()
                .execute(
                    "DELETE FROM users WHERE id = ?1 AND role = ?2",
                    libsql::params![user_id, Role::Parent.as_str()],
                )
                .await?;
        }
        tracing::info!(parent_id = id, "parent deleted");
        Ok(())
    }

    /// Parent row id linked to a `users` login, if any.
    pub(crate) async fn parent_id_for_user(
        &self,
        user_id: i64,
    ) -> Result<Option<i64>, DatabaseError> {
        self.query_id("SELECT id FROM parents WHERE user_id = ?1 ORDER BY id", [user_id])
            .await
    }
}

/// Prefix every column in a comma-separated list with `alias.`.
fn qualified(cols: &str, alias: &str) -> String {
    cols.split(", ")
        .map(|c| format!("{alias}.{c}"))
        .collect::<Vec<_>>()
        .join(", ")
}
