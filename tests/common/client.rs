//! HTTP client wrapper for end-to-end tests

use reqwest::Response;

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("GET request failed")
    }

    pub async fn post(&self, path: &str) -> Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("POST request failed")
    }

    /// GET and decode the JSON body, asserting a success status
    pub async fn get_json(&self, path: &str) -> serde_json::Value {
        let response = self.get(path).await;
        assert!(
            response.status().is_success(),
            "GET {} returned {}",
            path,
            response.status()
        );
        response.json().await.expect("Invalid JSON body")
    }

    pub async fn get_summary(&self) -> serde_json::Value {
        self.get_json("/v1/insights/summary").await
    }

    pub async fn get_latest_campaigns(&self, limit: Option<i64>) -> serde_json::Value {
        match limit {
            Some(limit) => {
                self.get_json(&format!("/v1/insights/campaigns/latest?limit={}", limit))
                    .await
            }
            None => self.get_json("/v1/insights/campaigns/latest").await,
        }
    }

    pub async fn get_campaign(&self, id: &str) -> Response {
        self.get(&format!("/v1/insights/campaigns/{}", id)).await
    }

    pub async fn get_brands(&self) -> serde_json::Value {
        self.get_json("/v1/insights/brands").await
    }

    pub async fn get_sensors(&self) -> serde_json::Value {
        self.get_json("/v1/insights/sensors").await
    }

    pub async fn get_trends(&self, days: Option<i64>) -> serde_json::Value {
        match days {
            Some(days) => {
                self.get_json(&format!("/v1/insights/trends?days={}", days))
                    .await
            }
            None => self.get_json("/v1/insights/trends").await,
        }
    }

    pub async fn reload(&self) -> serde_json::Value {
        let response = self.post("/v1/insights/reload").await;
        assert!(response.status().is_success());
        response.json().await.expect("Invalid JSON body")
    }
}
