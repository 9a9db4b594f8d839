#[cfg(test)]
mod tests {
    use reqwest::Client;
    use reqwest::StatusCode;
    use serde_json::json;
    use serde_json::Value;

    use crate::assert_response_status_eq;
    use crate::run_http_service;

    async fn create_project(cl: &Client, base_url: &str, name: &str) -> anyhow::Result<String> {
        let resp = cl
            .post(format!("{base_url}/projects"))
            .json(&json!({ "name": name }))
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let v: Value = resp.json().await?;

        Ok(v["id"].as_str().unwrap().to_string())
    }

    async fn create_task(
        cl: &Client,
        base_url: &str,
        project_id: &str,
        title: &str,
    ) -> anyhow::Result<Value> {
        let resp = cl
            .post(format!("{base_url}/projects/{project_id}/tasks"))
            .json(&json!({ "title": title }))
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::CREATED);

        Ok(resp.json().await?)
    }

    #[tokio::test]
    async fn test_tasks() -> anyhow::Result<()> {
        let (base_url, _) = run_http_service().await?;
        let cl = Client::new();
        let project_id = create_project(&cl, &base_url, "P").await?;

        let resp = cl
            .get(format!("{base_url}/projects/{project_id}/tasks"))
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.json::<Value>().await?, json!([]));

        let task = create_task(&cl, &base_url, &project_id, "write docs").await?;
        let task_id = task["id"].as_str().unwrap().to_string();
        assert_eq!(task["projectId"], json!(project_id));
        assert_eq!(task["completed"], json!(false));
        assert_eq!(task["createdAt"], task["updatedAt"]);

        let resp = cl
            .patch(format!("{base_url}/tasks/{task_id}"))
            .json(&json!({"completed": true}))
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::OK);
        let updated: Value = resp.json().await?;
        assert_eq!(updated["completed"], json!(true));
        assert_eq!(updated["title"], json!("write docs"));
        assert_ne!(updated["updatedAt"], task["updatedAt"]);

        let resp = cl
            .get(format!("{base_url}/projects/{project_id}/tasks"))
            .send()
            .await?;
        assert_eq!(resp.json::<Value>().await?, json!([updated]));

        let resp = cl.delete(format!("{base_url}/tasks/{task_id}")).send().await?;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        let resp = cl.delete(format!("{base_url}/tasks/{task_id}")).send().await?;
        assert_response_status_eq!(resp, StatusCode::NOT_FOUND);

        let resp = cl
            .patch(format!("{base_url}/tasks/{task_id}"))
            .json(&json!({"completed": false}))
            .send()
            .await?;
        assert_response_status_eq!(resp, StatusCode::NOT_FOUND);

        Ok(())
    }

    #[tokio::test]
    async fn test_tasks_validation() -> anyhow::Result<()> {
        let (base_url, _) = run_http_service().await?;
        let cl = Client::new();
        let project_id = create_project(&cl, &base_url, "P").await?;

        let resp = cl
            .post(format!("{base_url}/projects/{project_id}/tasks"))
            .json(&json!({"title": ""}))
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err: Value = resp.json().await?;
        assert_eq!(err["error"]["fields"]["title"], json!("Title is required"));

        let resp = cl
            .post(format!("{base_url}/projects/{project_id}/tasks"))
            .json(&json!({"title": "t", "completed": "yes"}))
            .send()
            .await?;
        assert_response_status_eq!(resp, StatusCode::BAD_REQUEST);

        let task = create_task(&cl, &base_url, &project_id, "t").await?;
        let task_id = task["id"].as_str().unwrap();
        let resp = cl
            .patch(format!("{base_url}/tasks/{task_id}"))
            .json(&json!({"title": ""}))
            .send()
            .await?;
        assert_response_status_eq!(resp, StatusCode::BAD_REQUEST);

        // projectId in the body is ignored, tasks can't move between projects
        let resp = cl
            .patch(format!("{base_url}/tasks/{task_id}"))
            .json(&json!({"projectId": "other", "title": "t2"}))
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::OK);
        let updated: Value = resp.json().await?;
        assert_eq!(updated["projectId"], json!(project_id));
        assert_eq!(updated["title"], json!("t2"));

        Ok(())
    }

    #[tokio::test]
    async fn test_project_delete_cascades() -> anyhow::Result<()> {
        let (base_url, md) = run_http_service().await?;
        let cl = Client::new();
        let p = create_project(&cl, &base_url, "P").await?;
        let q = create_project(&cl, &base_url, "Q").await?;

        create_task(&cl, &base_url, &p, "t1").await?;
        create_task(&cl, &base_url, &p, "t2").await?;
        let kept = create_task(&cl, &base_url, &q, "t3").await?;

        let resp = cl.delete(format!("{base_url}/projects/{p}")).send().await?;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        assert!(md.tasks.list_by_project(&p).await?.is_empty());
        let resp = cl
            .get(format!("{base_url}/projects/{q}/tasks"))
            .send()
            .await?;
        assert_eq!(resp.json::<Value>().await?, json!([kept]));

        Ok(())
    }
}
