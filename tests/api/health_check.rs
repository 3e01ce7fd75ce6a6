use crate::helpers::TestApp;

#[tokio::test]
async fn ping_is_present() {
    let app = TestApp::spawn();

    let res = app.ping().await.expect("Failed to execute request");

    assert!(res.status().is_success());

    let body: serde_json::Value = res.json().await.expect("Failed to decode body");
    assert_eq!("ok", body["status"]);
}

#[tokio::test]
async fn time_reports_both_clocks() {
    let app = TestApp::spawn();

    let res = app.server_time().await.expect("Failed to execute request");

    assert!(res.status().is_success());

    let body: serde_json::Value = res.json().await.expect("Failed to decode body");
    assert!(body["utc_iso"].is_string());
    assert!(body["local_iso"].is_string());
}
