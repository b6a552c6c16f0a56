//! Partial-update payloads for entity mutations.
//!
//! Each struct has `Option` fields. Only `Some` fields generate SET clauses in
//! the dynamic UPDATE SQL. Nullable columns use `Option<Option<T>>` so that an
//! explicit JSON `null` clears the column while an absent key leaves it alone.

pub mod parent;
pub mod student;
pub mod subject;
pub mod user;

pub use parent::ParentUpdate;
pub use student::StudentUpdate;
pub use subject::SubjectUpdate;
pub use user::UserUpdate;

use serde::{Deserialize, Deserializer};

/// Deserialize a present key (including `null`) as `Some(_)`.
///
/// Pair with `#[serde(default)]` so an absent key stays `None`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Accumulates `col = ?N` clauses and their bound values.
#[derive(Default)]
pub(crate) struct SetClauses {
    sets: Vec<String>,
    params: Vec<libsql::Value>,
}

impl SetClauses {
    pub(crate) fn push(&mut self, column: &str, value: impl Into<libsql::Value>) {
        self.params.push(value.into());
        self.sets.push(format!("{column} = ?{}", self.params.len()));
    }

    pub(crate) fn push_nullable<T: Into<libsql::Value>>(&mut self, column: &str, value: Option<T>) {
        self.push(column, crate::helpers::opt_value(value));
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Build `UPDATE {table} SET ... WHERE col = ?N AND ...`, binding the
    /// filter values after the SET values.
    pub(crate) fn into_update(
        mut self,
        table: &str,
        filters: Vec<(&str, libsql::Value)>,
    ) -> (String, Vec<libsql::Value>) {
        let mut conditions = Vec::with_capacity(filters.len());
        for (column, value) in filters {
            self.params.push(value);
            conditions.push(format!("{column} = ?{}", self.params.len()));
        }
        let sql = format!(
            "UPDATE {table} SET {} WHERE {}",
            self.sets.join(", "),
            conditions.join(" AND ")
        );
        (sql, self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_null_and_value_are_distinct() {
        let absent: SubjectUpdate = serde_json::from_str("{}").unwrap();
        let cleared: SubjectUpdate = serde_json::from_str(r#"{"description": null}"#).unwrap();
        let set: SubjectUpdate = serde_json::from_str(r#"{"description": "Algebra"}"#).unwrap();
        assert_eq!(absent.description, None);
        assert_eq!(cleared.description, Some(None));
        assert_eq!(set.description, Some(Some("Algebra".to_string())));
    }

    #[test]
    fn set_clauses_number_placeholders() {
        let mut sets = SetClauses::default();
        sets.push("name", "Maths");
        sets.push_nullable::<String>("description", None);
        let (sql, params) = sets.into_update(
            "users",
            vec![("id", 7_i64.into()), ("role", "teacher".into())],
        );
        assert_eq!(
            sql,
            "UPDATE users SET name = ?1, description = ?2 WHERE id = ?3 AND role = ?4"
        );
        assert_eq!(params.len(), 4);
    }
}
