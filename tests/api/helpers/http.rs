use crate::helpers::TestApp;
use reqwest::{RequestBuilder, Response};
use serde_json::Value;

impl TestApp {
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.current_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn send_get(&self, endpoint: &str) -> Response {
        self.authorized(self.api_client.get(format!("{}/{}", self.address, endpoint)))
            .send()
            .await
            .expect("GET request failed")
    }

    pub async fn send_post(&self, endpoint: &str, payload: &Value) -> Response {
        self.authorized(self.api_client.post(format!("{}/{}", self.address, endpoint)))
            .json(payload)
            .send()
            .await
            .expect("POST request failed")
    }

    pub async fn send_post_raw(&self, endpoint: &str, body: &'static str) -> Response {
        self.authorized(self.api_client.post(format!("{}/{}", self.address, endpoint)))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("POST request failed")
    }

    pub async fn send_patch(&self, endpoint: &str, payload: &Value) -> Response {
        self.authorized(self.api_client.patch(format!("{}/{}", &self.address, endpoint)))
            .json(payload)
            .send()
            .await
            .expect("Failed to execute PATCH request.")
    }

    pub async fn send_delete(&self, endpoint: &str) -> Response {
        self.authorized(self.api_client.delete(format!("{}/{}", &self.address, endpoint)))
            .send()
            .await
            .expect("Failed to execute DELETE request.")
    }
}

/// Asserts the status and the `{code, message}` error body.
pub async fn assert_error(response: Response, status: u16) -> String {
    assert_eq!(response.status().as_u16(), status);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], status);
    body["message"].as_str().unwrap().to_string()
}
