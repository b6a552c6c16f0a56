mod common;

use common::{TestApp, spawn_default};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

struct Seeded {
    maths: i64,
    science: i64,
    amy: i64,
    ben: i64,
    teacher: i64,
}

async fn seed(app: &TestApp) -> Seeded {
    let id = |body: &Value| body["data"]["id"].as_i64().unwrap();
    let (_, maths) = app.post("/add-subject", &json!({"name": "Maths"})).await;
    let (_, science) = app
        .post("/add-subject", &json!({"name": "Science", "description": "General"}))
        .await;
    let (_, amy) = app
        .post("/add-student", &json!({"name": "Amy", "grade": "Grade 3"}))
        .await;
    let (_, ben) = app
        .post("/add-student", &json!({"name": "Ben", "grade": "Grade 3"}))
        .await;
    let (_, teacher) = app
        .post(
            "/add-teacher",
            &json!({"name": "Mr. T", "email": "t@school.test", "password": "pw"}),
        )
        .await;
    Seeded {
        maths: id(&maths),
        science: id(&science),
        amy: id(&amy),
        ben: id(&ben),
        teacher: id(&teacher),
    }
}

async fn upload(app: &TestApp, s: &Seeded) {
    let (status, body) = app
        .post(
            "/add-results-bulk",
            &json!({
                "term": "2025-T1",
                "exam_type": "Midterm",
                "teacher_id": s.teacher,
                "subject_id": s.maths,
                "results": [
                    {"student_id": s.amy, "marks": 80},
                    {"student_id": s.ben, "marks": 70},
                    {"student_id": s.ben}
                ]
            }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(
        body["message"],
        format!("2 results added for subject {} (2025-T1).", s.maths)
    );

    let (status, _) = app
        .post(
            "/add-result",
            &json!({
                "student_id": s.amy,
                "subject_id": s.science,
                "teacher_id": s.teacher,
                "term": "2025-T1",
                "exam_type": "Midterm",
                "marks": 90
            }),
        )
        .await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn compile_release_and_performance() {
    let app = spawn_default().await;
    let s = seed(&app).await;
    upload(&app, &s).await;

    let (status, body) = app.post_empty("/admin/compile-results?term=2025-T1").await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Results compiled for 2 students for 2025-T1.");
    let compiled = body["data"].as_array().unwrap();
    let amy = compiled.iter().find(|c| c["student_id"] == s.amy).unwrap();
    assert_eq!(amy["total_marks"], 170.0);
    assert_eq!(amy["average"], 85.0);

    let (_, again) = app.post_empty("/admin/compile-results?term=2025-T1").await;
    assert_eq!(
        again["data"].as_array().unwrap().len(),
        compiled.len(),
        "recompiling must not duplicate rows"
    );

    let performance = format!("/students/{}/performance", s.amy);
    let (_, body) = app.get(&performance).await;
    assert_eq!(body["performance"], json!([]));
    assert_eq!(body["message"], "Results not yet released.");

    let (status, body) = app
        .post_empty("/admin/release-results?term=2025-T1&released=true&admin_id=1")
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Results for 2025-T1 have been released.");
    assert_eq!(body["data"]["released"], true);
    assert_eq!(body["data"]["updated_by"], 1);

    let (_, body) = app.get(&performance).await;
    let entries = body["performance"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(body.get("message").is_none());
    assert!(entries.iter().any(|e| e["subject"] == "Science" && e["marks"] == 90.0));

    let (_, body) = app
        .post_empty("/admin/release-results?term=2025-T1&released=false")
        .await;
    assert_eq!(body["message"], "Results for 2025-T1 have been withheld.");
    let (_, body) = app.get(&performance).await;
    assert_eq!(body["performance"], json!([]));
    assert_eq!(body["message"], "Results not yet released.");
}

#[tokio::test]
async fn performance_without_records() {
    let app = spawn_default().await;
    let (status, body) = app.get("/students/42/performance").await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "No performance records found yet.");
}

#[tokio::test]
async fn compile_unknown_term_is_not_found() {
    let app = spawn_default().await;
    let (status, body) = app.post_empty("/admin/compile-results?term=1999-T9").await;
    assert_eq!(status, 404);
    assert_eq!(body["detail"], "No marks found for this term.");

    let (status, _) = app.post_empty("/admin/compile-results").await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn coverage_summary_lists_every_grade() {
    let app = spawn_default().await;
    let s = seed(&app).await;
    upload(&app, &s).await;

    let (status, body) = app.get("/admin/results-summary?term=2025-T1").await;
    assert_eq!(status, 200);
    let summary = body["summary"].as_array().unwrap();
    assert_eq!(summary.len(), 9);
    assert_eq!(summary[0]["class"], "Grade 1");
    assert_eq!(summary[0]["status"], "in progress");
    assert_eq!(
        summary[2],
        json!({
            "class": "Grade 3",
            "total_subjects": 2,
            "uploaded": 2,
            "pending": 0,
            "status": "complete"
        })
    );
}

#[tokio::test]
async fn class_results_per_subject() {
    let app = spawn_default().await;
    let s = seed(&app).await;
    upload(&app, &s).await;

    let (status, body) = app.get("/admin/class-results/Grade%203").await;
    assert_eq!(status, 200);
    assert_eq!(body["class"], "Grade 3");
    let subjects = body["subjects"].as_array().unwrap();
    let maths = subjects.iter().find(|x| x["subject"] == "Maths").unwrap();
    assert_eq!(maths["uploaded"], 2);
    assert_eq!(maths["pending"], 0);
    assert_eq!(maths["average_marks"], 75.0);
    assert_eq!(maths["teacher"], "Mr. T");
    let science = subjects.iter().find(|x| x["subject"] == "Science").unwrap();
    assert_eq!(science["pending"], 1);

    let (_, body) = app.get("/admin/class-results/Grade%209").await;
    assert_eq!(body["subjects"], json!([]));
}

#[tokio::test]
async fn raw_results_view() {
    let app = spawn_default().await;
    let s = seed(&app).await;
    upload(&app, &s).await;

    let (_, body) = app.get("/admin/view-results?term=2025-T1").await;
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["student_reg"], "BP00001");
    assert_eq!(results[0]["teacher"], "Mr. T");

    let (_, body) = app.get("/admin/view-results").await;
    assert_eq!(body["results"].as_array().unwrap().len(), 3);

    let (_, body) = app.get("/admin/view-results?term=2030-T1").await;
    assert_eq!(body["results"], json!([]));
    assert_eq!(body["message"], "No results found.");
}

#[tokio::test]
async fn result_uploads_are_validated() {
    let app = spawn_default().await;
    let s = seed(&app).await;

    let (status, body) = app
        .post(
            "/add-result",
            &json!({"student_id": s.amy, "subject_id": s.maths, "term": "2025-T1"}),
        )
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["detail"], "Missing required fields");

    let (status, body) = app
        .post(
            "/add-results-bulk",
            &json!({
                "term": "2025-T1",
                "exam_type": "Final",
                "teacher_id": s.teacher,
                "subject_id": s.maths,
                "results": []
            }),
        )
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["detail"], "Results list must contain at least one entry.");

    let (status, _) = app
        .post(
            "/add-result",
            &json!({
                "student_id": 999,
                "subject_id": s.maths,
                "teacher_id": s.teacher,
                "term": "2025-T1",
                "exam_type": "Final",
                "marks": 50
            }),
        )
        .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn enrolment_shows_on_student_listing() {
    let app = spawn_default().await;
    let s = seed(&app).await;

    let (status, _) = app
        .post(
            "/enroll-student",
            &json!({"student_id": s.amy, "subject_id": s.science}),
        )
        .await;
    assert_eq!(status, 200);

    let (_, body) = app.get("/get-students").await;
    let students = body["students"].as_array().unwrap();
    let amy = students.iter().find(|x| x["id"] == s.amy).unwrap();
    assert_eq!(amy["subjects"], json!(["Science"]));

    let (status, _) = app
        .put(&format!("/update-student/{}", s.ben), &json!({"grade": "Grade 4"}))
        .await;
    assert_eq!(status, 200);
    let (status, _) = app.delete(&format!("/delete-student/{}", s.ben)).await;
    assert_eq!(status, 200);
    let (status, _) = app.delete(&format!("/delete-student/{}", s.ben)).await;
    assert_eq!(status, 404);
}
