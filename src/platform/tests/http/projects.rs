#[cfg(test)]
mod tests {
    use common::config::Config;
    use reqwest::Client;
    use reqwest::StatusCode;
    use serde_json::json;
    use serde_json::Value;

    use crate::assert_response_status_eq;
    use crate::data_path;
    use crate::run_http_service;
    use crate::run_http_service_at;
    use crate::run_http_service_with;

    #[tokio::test]
    async fn test_projects() -> anyhow::Result<()> {
        let (base_url, _) = run_http_service().await?;
        let cl = Client::new();

        // list on a fresh data directory
        let resp = cl.get(format!("{base_url}/projects")).send().await?;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.json::<Value>().await?, json!([]));

        // create
        let resp = cl
            .post(format!("{base_url}/projects"))
            .json(&json!({"name": "Alpha"}))
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let alpha: Value = resp.json().await?;
        let id = alpha["id"].as_str().unwrap().to_string();
        assert!(!id.is_empty());
        assert_eq!(alpha["name"], json!("Alpha"));
        assert!(alpha.get("description").is_none());
        assert_eq!(alpha["createdAt"], alpha["updatedAt"]);

        // get
        let resp = cl.get(format!("{base_url}/projects/{id}")).send().await?;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.json::<Value>().await?, alpha);

        // partial update
        let resp = cl
            .patch(format!("{base_url}/projects/{id}"))
            .json(&json!({"description": "hi"}))
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::OK);
        let updated: Value = resp.json().await?;
        assert_eq!(updated["name"], json!("Alpha"));
        assert_eq!(updated["description"], json!("hi"));
        assert_eq!(updated["createdAt"], alpha["createdAt"]);
        assert_ne!(updated["updatedAt"], alpha["updatedAt"]);

        // list
        let resp = cl.get(format!("{base_url}/projects")).send().await?;
        assert_eq!(resp.json::<Value>().await?, json!([updated]));

        // delete
        let resp = cl.delete(format!("{base_url}/projects/{id}")).send().await?;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(resp.text().await?.is_empty());

        let resp = cl.get(format!("{base_url}/projects/{id}")).send().await?;
        assert_response_status_eq!(resp, StatusCode::NOT_FOUND);
        let resp = cl.delete(format!("{base_url}/projects/{id}")).send().await?;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let err: Value = resp.json().await?;
        assert_eq!(err["error"]["message"], json!("project not found"));

        Ok(())
    }

    #[tokio::test]
    async fn test_projects_validation() -> anyhow::Result<()> {
        let path = data_path();
        let (base_url, _) = run_http_service_at(&path).await?;
        let cl = Client::new();

        let resp = cl
            .post(format!("{base_url}/projects"))
            .json(&json!({}))
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err: Value = resp.json().await?;
        assert_eq!(err["error"]["fields"]["name"], json!("missing"));

        let resp = cl
            .post(format!("{base_url}/projects"))
            .json(&json!({"name": ""}))
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err: Value = resp.json().await?;
        assert_eq!(err["error"]["fields"]["name"], json!("Name is required"));

        let resp = cl
            .post(format!("{base_url}/projects"))
            .json(&json!({"name": 1}))
            .send()
            .await?;
        assert_response_status_eq!(resp, StatusCode::BAD_REQUEST);

        let resp = cl
            .post(format!("{base_url}/projects"))
            .body("not json")
            .send()
            .await?;
        assert_response_status_eq!(resp, StatusCode::BAD_REQUEST);

        let resp = cl
            .patch(format!("{base_url}/projects/nonexistent-id"))
            .json(&json!({"name": ""}))
            .send()
            .await?;
        assert_response_status_eq!(resp, StatusCode::BAD_REQUEST);

        let resp = cl
            .patch(format!("{base_url}/projects/nonexistent-id"))
            .json(&json!({"description": null}))
            .send()
            .await?;
        assert_response_status_eq!(resp, StatusCode::BAD_REQUEST);

        let resp = cl
            .patch(format!("{base_url}/projects/nonexistent-id"))
            .json(&json!({"name": "x"}))
            .send()
            .await?;
        assert_response_status_eq!(resp, StatusCode::NOT_FOUND);

        // nothing above reached the disk
        assert!(!path.exists());

        Ok(())
    }

    #[tokio::test]
    async fn test_storage_failure_is_internal_error() -> anyhow::Result<()> {
        // the data directory is a regular file, so every write fails
        let path = data_path();
        tokio::fs::write(&path, b"").await?;
        let (base_url, _) = run_http_service_at(&path).await?;
        let cl = Client::new();

        let resp = cl.get(format!("{base_url}/projects")).send().await?;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = cl
            .post(format!("{base_url}/projects"))
            .json(&json!({"name": "Alpha"}))
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let err: Value = resp.json().await?;
        assert_eq!(err["error"]["message"], json!("internal server error"));

        Ok(())
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() -> anyhow::Result<()> {
        let path = data_path();
        let mut cfg = Config::default();
        cfg.server.max_request_body_bytes = 1024;
        let (base_url, _) = run_http_service_with(&path, &cfg).await?;
        let cl = Client::new();

        let name = "x".repeat(4096);
        let resp = cl
            .post(format!("{base_url}/projects"))
            .json(&json!({ "name": name }))
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(!path.exists());

        let resp = cl
            .post(format!("{base_url}/projects"))
            .json(&json!({"name": "x".repeat(512)}))
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::CREATED);

        Ok(())
    }
}
