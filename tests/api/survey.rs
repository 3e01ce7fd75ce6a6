use reqwest::StatusCode;

use serde_json::{json, Value};

use survey_intake::crypto::hex_digest;

use crate::helpers::TestApp;

fn valid_survey() -> Value {
    json!({
        "name": "Ann",
        "email": "ann@example.com",
        "age": 30,
        "consent": true,
        "rating": 5,
    })
}

#[tokio::test]
async fn submit_returns_created_for_valid_submission() {
    let app = TestApp::spawn();

    let res = app
        .submit_survey(&valid_survey())
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::CREATED, res.status());

    let body: Value = res.json().await.expect("Failed to decode body");
    assert_eq!("ok", body["status"]);

    assert_eq!(1, app.stored_records().len());
}

#[tokio::test]
async fn unparseable_body_returns_bad_request_with_distinct_code() {
    let app = TestApp::spawn();

    for body in ["not json at all", "{\"name\": ", ""] {
        let res = app
            .submit_survey_raw(body)
            .await
            .expect("Failed to execute request");

        assert_eq!(StatusCode::BAD_REQUEST, res.status());

        let body: Value = res.json().await.expect("Failed to decode body");
        assert_eq!("invalid_json", body["error"]);
    }

    assert!(app.stored_records().is_empty());
}

#[tokio::test]
async fn validation_failure_lists_every_violated_field() {
    let app = TestApp::spawn();

    let payload = json!({
        "name": "",
        "email": "not-an-email",
        "age": 12,
        "consent": false,
        "rating": 9,
    });

    let res = app
        .submit_survey(&payload)
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, res.status());

    let body: Value = res.json().await.expect("Failed to decode body");
    assert_eq!("validation_error", body["error"]);

    let fields: Vec<&str> = body["detail"]
        .as_array()
        .expect("Detail must be an array")
        .iter()
        .map(|violation| violation["field"].as_str().unwrap())
        .collect();

    assert_eq!(vec!["name", "email", "age", "consent", "rating"], fields);
    assert!(app.stored_records().is_empty());
}

#[tokio::test]
async fn consent_must_be_the_boolean_true() {
    let app = TestApp::spawn();

    for consent in [json!("true"), json!(1), json!(false)] {
        let mut payload = valid_survey();
        payload["consent"] = consent;

        let res = app
            .submit_survey(&payload)
            .await
            .expect("Failed to execute request");

        assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, res.status());
    }

    assert!(app.stored_records().is_empty());
}

#[tokio::test]
async fn raw_pii_is_replaced_by_digests_in_the_stored_record() {
    let app = TestApp::spawn();

    let res = app
        .submit_survey(&valid_survey())
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::CREATED, res.status());

    let lines = app.record_log.lines();
    assert_eq!(1, lines.len());
    assert!(!lines[0].contains("ann@example.com"));

    let record = &app.stored_records()[0];
    assert_eq!(hex_digest("ann@example.com"), record["email_hash"]);
    assert_eq!(hex_digest("30"), record["age_hash"]);

    let object = record.as_object().unwrap();
    assert!(!object.contains_key("email"));
    assert!(!object.contains_key("age"));
}

#[tokio::test]
async fn client_supplied_submission_id_wins() {
    let app = TestApp::spawn();

    let mut payload = valid_survey();
    payload["submission_id"] = json!("client-chosen-id");

    app.submit_survey(&payload)
        .await
        .expect("Failed to execute request");

    let record = &app.stored_records()[0];
    assert_eq!("client-chosen-id", record["submission_id"]);
}

#[tokio::test]
async fn empty_submission_id_falls_back_to_derivation() {
    let app = TestApp::spawn();

    let mut payload = valid_survey();
    payload["submission_id"] = json!("");

    app.submit_survey(&payload)
        .await
        .expect("Failed to execute request");

    let record = &app.stored_records()[0];
    let id = record["submission_id"].as_str().unwrap();

    assert_eq!(64, id.len());
    assert!(id.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
}

#[tokio::test]
async fn comments_are_stored_trimmed() {
    let app = TestApp::spawn();

    let mut payload = valid_survey();
    payload["comments"] = json!("  hello  ");

    app.submit_survey(&payload)
        .await
        .expect("Failed to execute request");

    let record = &app.stored_records()[0];
    assert_eq!("hello", record["comments"]);
}

#[tokio::test]
async fn user_agent_header_wins_over_payload_field() {
    let app = TestApp::spawn();

    let mut payload = valid_survey();
    payload["user_agent"] = json!("payload-agent/1.0");

    app.request(reqwest::Method::POST, "v1/survey")
        .header("User-Agent", "header-agent/1.0")
        .json(&payload)
        .send()
        .await
        .expect("Failed to execute request");

    let record = &app.stored_records()[0];
    assert_eq!("header-agent/1.0", record["user_agent"]);
}

#[tokio::test]
async fn payload_user_agent_is_the_fallback() {
    let app = TestApp::spawn();

    let mut payload = valid_survey();
    payload["user_agent"] = json!("payload-agent/1.0");

    app.submit_survey(&payload)
        .await
        .expect("Failed to execute request");

    let record = &app.stored_records()[0];
    assert_eq!("payload-agent/1.0", record["user_agent"]);
}

#[tokio::test]
async fn forwarded_address_wins_over_peer_address() {
    let app = TestApp::spawn();

    app.request(reqwest::Method::POST, "v1/survey")
        .header("X-Forwarded-For", "203.0.113.9, 10.0.0.1")
        .json(&valid_survey())
        .send()
        .await
        .expect("Failed to execute request");

    let record = &app.stored_records()[0];
    assert_eq!("203.0.113.9", record["ip"]);
}

#[tokio::test]
async fn peer_address_is_recorded_without_forwarding_header() {
    let app = TestApp::spawn();

    app.submit_survey(&valid_survey())
        .await
        .expect("Failed to execute request");

    let record = &app.stored_records()[0];
    assert_eq!("127.0.0.1", record["ip"]);
}

#[tokio::test]
async fn received_at_uses_a_numeric_utc_offset() {
    let app = TestApp::spawn();

    app.submit_survey(&valid_survey())
        .await
        .expect("Failed to execute request");

    let record = &app.stored_records()[0];
    assert!(record["received_at"].as_str().unwrap().ends_with("+00:00"));
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_submissions_store_one_line_each() {
    let app = TestApp::spawn();

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..20 {
        let mut payload = valid_survey();
        payload["name"] = json!(format!("Respondent {}", i));

        let request = app
            .request(reqwest::Method::POST, "v1/survey")
            .json(&payload);

        tasks.spawn(async move {
            request
                .send()
                .await
                .expect("Failed to execute request")
                .status()
        });
    }

    while let Some(status) = tasks.join_next().await {
        assert_eq!(StatusCode::CREATED, status.unwrap());
    }

    let records = app.stored_records();
    assert_eq!(20, records.len());
    for record in &records {
        assert!(record["name"].as_str().unwrap().starts_with("Respondent "));
    }
}
