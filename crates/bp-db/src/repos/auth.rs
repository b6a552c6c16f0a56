//! Login: one password check against `users`, then `parents`.

use bp_core::enums::Role;
use bp_core::responses::LoginResponse;

use crate::error::DatabaseError;
use crate::helpers::parse_enum;
use crate::service::SchoolService;

struct Credential {
    id: i64,
    name: String,
    email: String,
    role: Role,
    password_hash: String,
}

impl SchoolService {
    /// Check credentials. Returns `None` for an unknown email or a wrong
    /// password; the two cases are indistinguishable to the caller.
    ///
    /// `users` is consulted first. A parent login created by an admin
    /// reports the id of its linked `parents` row.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<LoginResponse>, DatabaseError> {
        let credential = match self.user_credential(email).await? {
            Some(found) => Some(found),
            None => self.parent_credential(email).await?,
        };
        let Some(credential) = credential else {
            tracing::warn!("login rejected: unknown email");
            return Ok(None);
        };

        if !self
            .verify_password(password, &credential.password_hash)
            .await?
        {
            tracing::warn!(role = %credential.role, "login rejected: wrong password");
            return Ok(None);
        }

        tracing::info!(id = credential.id, role = %credential.role, "login accepted");
        Ok(Some(LoginResponse {
            id: credential.id,
            name: credential.name,
            email: credential.email,
            role: credential.role,
        }))
    }

    async fn user_credential(&self, email: &str) -> Result<Option<Credential>, DatabaseError> {
        let found = {
            let mut rows = self
                .db()
                .conn()
                .query(
                    "SELECT id, name, email, role, password_hash FROM users WHERE email = ?1",
                    [email],
                )
                .await?;
            match rows.next().await? {
                Some(row) => Some(Credential {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                    role: parse_enum(&row.get::<String>(3)?)?,
                    password_hash: row.get(4)?,
                }),
                None => None,
            }
        };

        match found {
            Some(mut credential) if credential.role == Role::Parent => {
                if let Some(parent_id) = self.parent_id_for_user(credential.id).await? {
                    credential.id = parent_id;
                }
                Ok(Some(credential))
            }
            other => Ok(other),
        }
    }

    async fn parent_credential(&self, email: &str) -> Result<Option<Credential>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, name, email, password_hash FROM parents
                 WHERE email = ?1 AND password_hash IS NOT NULL
                 ORDER BY id",
                [email],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(Credential {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                role: Role::Parent,
                password_hash: row.get(3)?,
            })),
            None => Ok(None),
        }
    }
}
