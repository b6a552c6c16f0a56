//! Admin and teacher accounts (`users` table) and teacher self-signup.

use std::collections::HashMap;

use chrono::Utc;

use bp_core::entities::User;
use bp_core::enums::Role;
use bp_core::requests::{NewAccount, TeacherSignup};
use bp_core::responses::TeacherWithSubjects;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum};
use crate::repos::EMAIL_TAKEN;
use crate::service::SchoolService;
use crate::updates::{SetClauses, UserUpdate};

const SELECT_COLS: &str = "id, name, email, role, department, created_at";

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        role: parse_enum(&row.get::<String>(3)?)?,
        department: get_opt_string(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

const fn role_label(role: Role) -> &'static str {
    match role {
        Role::Admin => "Admin",
        Role::Teacher => "Teacher",
        Role::Parent => "Parent account",
    }
}

impl SchoolService {
    /// Create an admin or teacher login.
    pub async fn create_account(
        &self,
        role: Role,
        account: &NewAccount,
    ) -> Result<User, DatabaseError> {
        self.insert_user(role, &account.name, &account.email, &account.password, None)
            .await
    }

    /// Teacher self-signup: creates the account and links the given subjects.
    ///
    /// Every subject id must exist; nothing is written otherwise.
    pub async fn signup_teacher(&self, signup: &TeacherSignup) -> Result<User, DatabaseError> {
        for subject_id in &signup.subjects {
            if !self.subject_exists(*subject_id).await? {
                return Err(DatabaseError::Validation(format!(
                    "Subject {subject_id} does not exist"
                )));
            }
        }

        let user = self
            .insert_user(
                Role::Teacher,
                &signup.name,
                &signup.email,
                &signup.password,
                signup.department.as_deref(),
            )
            .await?;

        for subject_id in &signup.subjects {
            self.execute_write(
                "INSERT OR IGNORE INTO teacher_subjects (teacher_id, subject_id) VALUES (?1, ?2)",
                libsql::params![user.id, *subject_id],
                "Subject already assigned to this teacher",
            )
            .await?;
        }

        tracing::info!(
            teacher_id = user.id,
            subjects = signup.subjects.len(),
            "teacher signed up"
        );
        Ok(user)
    }

    pub(crate) async fn insert_user(
        &self,
        role: Role,
        name: &str,
        email: &str,
        password: &str,
        department: Option<&str>,
    ) -> Result<User, DatabaseError> {
        if self.email_registered(email).await? {
            return Err(DatabaseError::Conflict(EMAIL_TAKEN.into()));
        }

        let password_hash = self.hash_password(password).await?;
        let now = Utc::now();
        let id = self
            .insert_returning_id(
                "INSERT INTO users (name, email, password_hash, role, department, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id",
                libsql::params![
                    name,
                    email,
                    password_hash,
                    role.as_str(),
                    department,
                    now.to_rfc3339()
                ],
                EMAIL_TAKEN,
            )
            .await?;

        tracing::info!(user_id = id, role = %role, "account created");
        Ok(User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            role,
            department: department.map(String::from),
            created_at: now,
        })
    }

    pub(crate) async fn email_registered(&self, email: &str) -> Result<bool, DatabaseError> {
        self.email_registered_except(email, None, None).await
    }

    /// Whether `email` is held by a login other than the given user and
    /// parent rows. Logins live in both `users` and `parents`.
    pub(crate) async fn email_registered_except(
        &self,
        email: &str,
        user_id: Option<i64>,
        parent_id: Option<i64>,
    ) -> Result<bool, DatabaseError> {
        Ok(self
            .query_id(
                "SELECT id FROM users WHERE email = ?1 AND id IS NOT ?2
                 UNION ALL
                 SELECT id FROM parents
                 WHERE email = ?1 AND id IS NOT ?3 AND (?2 IS NULL OR user_id IS NOT ?2)
                 LIMIT 1",
                libsql::params![email, user_id, parent_id],
            )
            .await?
            .is_some())
    }

    /// Fetch a user with the given role.
    pub async fn get_user(&self, id: i64, role: Role) -> Result<User, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM users WHERE id = ?1 AND role = ?2"),
                libsql::params![id, role.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| {
            DatabaseError::NotFound(format!("{} {id} not found", role_label(role)))
        })?;
        row_to_user(&row)
    }

    pub async fn list_users(&self, role: Role) -> Result<Vec<User>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM users WHERE role = ?1 ORDER BY id"),
                [role.as_str()],
            )
            .await?;

        let mut users = Vec::new();
        while let Some(row) = rows.next().await? {
            users.push(row_to_user(&row)?);
        }
        Ok(users)
    }

    /// Apply a partial update to a user with the given role.
    pub async fn update_user(
        &self,
        id: i64,
        role: Role,
        update: UserUpdate,
    ) -> Result<User, DatabaseError> {
        let mut sets = SetClauses::default();
        if let Some(name) = update.name {
            sets.push("name", name);
        }
        if let Some(email) = update.email {
            if self.email_registered_except(&email, Some(id), None).await? {
                return Err(DatabaseError::Conflict(EMAIL_TAKEN.into()));
            }
            sets.push("email", email);
        }
        if let Some(department) = update.department {
            sets.push_nullable("department", department);
        }
        if let Some(password) = update.password {
            sets.push("password_hash", self.hash_password(&password).await?);
        }

        if sets.is_empty() {
            return self.get_user(id, role).await;
        }

        let (sql, params) =
            sets.into_update("users", vec![("id", id.into()), ("role", role.as_str().into())]);
        let changed = self
            .execute_write(&sql, libsql::params_from_iter(params), EMAIL_TAKEN)
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NotFound(format!(
                "{} {id} not found",
                role_label(role)
            )));
        }

        tracing::info!(user_id = id, role = %role, "account updated");
        self.get_user(id, role).await
    }

    pub async fn delete_user(&self, id: i64, role: Role) -> Result<(), DatabaseError> {
        let deleted = self
            .db()
            .conn()
            .execute(
                "DELETE FROM users WHERE id = ?1 AND role = ?2",
                libsql::params![id, role.as_str()],
            )
            .await?;
        if deleted == 0 {
            return Err(DatabaseError::NotFound(format!(
                "{} {id} not found",
                role_label(role)
            )));
        }
        tracing::info!(user_id = id, role = %role, "account deleted");
        Ok(())
    }

    /// Teachers with department and the names of their assigned subjects.
    pub async fn list_teachers_with_subjects(
        &self,
    ) -> Result<Vec<TeacherWithSubjects>, DatabaseError> {
        let mut subjects_by_teacher: HashMap<i64, Vec<String>> = HashMap::new();
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT ts.teacher_id, s.name FROM teacher_subjects ts
                 JOIN subjects s ON s.id = ts.subject_id
                 ORDER BY s.id",
                (),
            )
            .await?;
        while let Some(row) = rows.next().await? {
            subjects_by_teacher
                .entry(row.get::<i64>(0)?)
                .or_default()
                .push(row.get::<String>(1)?);
        }

        Ok(self
            .list_users(Role::Teacher)
            .await?
            .into_iter()
            .map(|teacher| TeacherWithSubjects {
                subjects: subjects_by_teacher.remove(&teacher.id).unwrap_or_default(),
                id: teacher.id,
                name: teacher.name,
                email: teacher.email,
                department: teacher.department,
                created_at: teacher.created_at,
            })
            .collect())
    }

    /// Teacher id to display name.
    pub async fn teacher_names(&self) -> Result<HashMap<i64, String>, DatabaseError> {
        Ok(self
            .list_users(Role::Teacher)
            .await?
            .into_iter()
            .map(|t| (t.id, t.name))
            .collect())
    }
}
