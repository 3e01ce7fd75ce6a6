use std::net::TcpListener;
use std::sync::Arc;

use reqwest::{Client, Method, Response};

use serde_json::Value;

use survey_intake::app;
use survey_intake::repo::InMemoryRecordLog;

pub struct TestApp {
    addr: String,

    pub client: Client,
    pub record_log: Arc<InMemoryRecordLog>,
}

impl TestApp {
    pub fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to listen on random port");
        let port = listener.local_addr().unwrap().port();

        let addr = format!("http://127.0.0.1:{}", port);

        let record_log = Arc::new(InMemoryRecordLog::new());

        let server =
            app::run(listener, record_log.clone()).expect("Failed to spawn app instance");
        let _ = tokio::spawn(server);

        let client = Client::new();

        Self {
            addr,
            client,
            record_log,
        }
    }

    pub fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", &self.addr, url);
        self.client.request(method, url)
    }

    pub async fn ping(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "ping").send().await
    }

    pub async fn server_time(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "time").send().await
    }

    pub async fn submit_survey(&self, body: &Value) -> reqwest::Result<Response> {
        self.request(Method::POST, "v1/survey")
            .json(body)
            .send()
            .await
    }

    pub async fn submit_survey_raw(&self, body: &'static str) -> reqwest::Result<Response> {
        self.request(Method::POST, "v1/survey")
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
    }

    /// Decode every line the app appended to its log
    pub fn stored_records(&self) -> Vec<Value> {
        self.record_log
            .lines()
            .iter()
            .map(|line| serde_json::from_str(line).expect("Stored line is not valid JSON"))
            .collect()
    }
}
