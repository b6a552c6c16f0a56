//! Shared test utilities for bp-db unit tests.

use bp_core::requests::{NewAccount, NewStudent, NewSubject};
use bp_core::entities::{Student, Subject, User};

use crate::SchoolDb;
use crate::service::{SchoolService, SchoolSettings};

/// Create an in-memory service with the cheapest bcrypt cost.
pub async fn test_service() -> SchoolService {
    let db = SchoolDb::open_local(":memory:").await.unwrap();
    SchoolService::from_db(
        db,
        SchoolSettings {
            bcrypt_cost: bp_auth::MIN_COST,
            ..SchoolSettings::default()
        },
    )
}

pub async fn add_student(svc: &SchoolService, name: &str, grade: &str) -> Student {
    svc.create_student(&NewStudent {
        name: name.to_string(),
        gender: None,
        date_of_birth: None,
        grade: grade.to_string(),
    })
    .await
    .unwrap()
}

pub async fn add_subject(svc: &SchoolService, name: &str) -> Subject {
    svc.create_subject(&NewSubject {
        name: name.to_string(),
        description: None,
    })
    .await
    .unwrap()
}

pub async fn add_teacher(svc: &SchoolService, name: &str, email: &str) -> User {
    svc.create_account(
        bp_core::enums::Role::Teacher,
        &NewAccount {
            name: name.to_string(),
            email: email.to_string(),
            password: "pw".to_string(),
        },
    )
    .await
    .unwrap()
}
