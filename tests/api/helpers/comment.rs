use crate::helpers::TestApp;
use reqwest::Response;
use serde_json::Value;
use uuid::Uuid;

impl TestApp {
    pub async fn create_comment(&self, payload: &Value) -> Response {
        self.send_post("v1/comment/me/create", payload).await
    }

    pub async fn delete_comment(&self, id: &Uuid) -> Response {
        self.send_delete(&format!("v1/comment/me/delete/{id}"))
            .await
    }

    pub async fn get_comments(&self, post_id: &Uuid) -> Response {
        self.send_get(&format!("v1/comment/get/posts/{post_id}"))
            .await
    }

    pub async fn get_all_comments(&self) -> Response {
        self.send_get("v1/comment/get/all").await
    }

    /// Creates a comment as whoever is logged in and returns its id.
    pub async fn add_comment(&self, post_id: &Uuid, content: &str, parent: Option<&Uuid>) -> Uuid {
        let payload = serde_json::json!({
            "postId": post_id.to_string(),
            "content": content,
            "parentComment": parent.map(|p| p.to_string()),
        });

        let response = self.create_comment(&payload).await;
        assert_eq!(response.status().as_u16(), 201, "Failed to create comment");
        let body: Value = response.json().await.unwrap();
        Uuid::parse_str(body["id"].as_str().unwrap()).unwrap()
    }
}
