//! Announcements: append-only, listed newest first.

use chrono::Utc;

use bp_core::entities::Announcement;
use bp_core::requests::NewAnnouncement;

use crate::error::DatabaseError;
use crate::helpers::parse_datetime;
use crate::service::SchoolService;

const DEFAULT_POSTER: &str = "Admin";

fn row_to_announcement(row: &libsql::Row) -> Result<Announcement, DatabaseError> {
    Ok(Announcement {
        id: row.get(0)?,
        message: row.get(1)?,
        posted_by: row.get(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

impl SchoolService {
    pub async fn post_announcement(
        &self,
        announcement: &NewAnnouncement,
    ) -> Result<Announcement, DatabaseError> {
        let posted_by = announcement
            .posted_by
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(DEFAULT_POSTER);
        let now = Utc::now();
        let id = self
            .insert_returning_id(
                "INSERT INTO announcements (message, posted_by, created_at)
                 VALUES (?1, ?2, ?3) RETURNING id",
                libsql::params![announcement.message.as_str(), posted_by, now.to_rfc3339()],
                "Announcement already exists",
            )
            .await?;
        tracing::info!(announcement_id = id, posted_by, "announcement posted");
        Ok(Announcement {
            id,
            message: announcement.message.clone(),
            posted_by: posted_by.to_string(),
            created_at: now,
        })
    }

    pub async fn list_announcements(&self) -> Result<Vec<Announcement>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, message, posted_by, created_at FROM announcements
                 ORDER BY created_at DESC, id DESC",
                (),
            )
            .await?;

        let mut announcements = Vec::new();
        while let Some(row) = rows.next().await? {
            announcements.push(row_to_announcement(&row)?);
        }
        Ok(announcements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_service;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn poster_defaults_to_admin() {
        let svc = test_service().await;
        let posted = svc
            .post_announcement(&NewAnnouncement {
                message: "Sports day on Friday".into(),
                posted_by: None,
            })
            .await
            .unwrap();
        assert_eq!(posted.posted_by, "Admin");
    }

    #[tokio::test]
    async fn listed_newest_first() {
        let svc = test_service().await;
        for message in ["first", "second", "third"] {
            svc.post_announcement(&NewAnnouncement {
                message: message.into(),
                posted_by: Some("Head Teacher".into()),
            })
            .await
            .unwrap();
        }
        let messages: Vec<String> = svc
            .list_announcements()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.message)
            .collect();
        assert_eq!(messages, vec!["third", "second", "first"]);
    }
}
