use crate::helpers::TestApp;
use reqwest::Response;
use serde_json::Value;
use uuid::Uuid;

impl TestApp {
    pub async fn create_post(&self, payload: &Value) -> Response {
        self.send_post("v1/admin/me/posts/create", payload).await
    }

    pub async fn update_post(&self, id: &Uuid, payload: &Value) -> Response {
        self.send_patch(&format!("v1/admin/me/posts/update/{id}"), payload)
            .await
    }

    pub async fn delete_post(&self, id: &Uuid) -> Response {
        self.send_delete(&format!("v1/admin/me/posts/delete/{id}"))
            .await
    }

    pub async fn admin_posts(&self, query: &str) -> Response {
        self.send_get(&format!("v1/admin/me/posts/get/all?{query}"))
            .await
    }

    pub async fn get_posts(&self, query: &str) -> Response {
        self.send_get(&format!("v1/post/get/all?{query}")).await
    }

    pub async fn like_post(&self, id: &Uuid) -> Response {
        self.send_patch(&format!("v1/post/me/like/{id}"), &Value::Null)
            .await
    }

    pub async fn view_post(&self, id: &Uuid) -> Response {
        self.send_post(&format!("v1/post/view/{id}"), &Value::Null)
            .await
    }

    /// Publishes a post as the admin and leaves the admin logged in.
    pub async fn create_sample_post(&self) -> Uuid {
        self.create_sample_post_custom("Post for comments", false)
            .await
    }

    pub async fn create_sample_post_custom(&self, title: &str, is_draft: bool) -> Uuid {
        self.login_as(&self.admin);
        let payload = serde_json::json!({
            "title": title,
            "content": format!("All about {title}"),
            "coverImageUrl": "https://example.com/sample.jpg",
            "tags": ["Rust", "backend"],
            "isDraft": is_draft,
        });

        let response = self.create_post(&payload).await;
        assert_eq!(
            response.status().as_u16(),
            201,
            "Failed to create sample post"
        );
        let body: Value = response.json().await.unwrap();
        Uuid::parse_str(body["id"].as_str().unwrap()).unwrap()
    }
}
