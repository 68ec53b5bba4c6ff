//! Walks through the todo API against a running server.
//!
//! The server is expected at `TODO_SERVER_URL` (default:
//! `http://localhost:8080`). Every response status and body is printed.

use reqwest::{Client, Method};
use serde_json::{Value, json};
use thiserror::Error;

const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

#[derive(Debug, Error)]
enum DemoError {
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

struct DemoClient {
    client: Client,
    base_url: String,
}

impl DemoClient {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
    ) -> Result<(), DemoError> {
        let url = format!("{}{endpoint}", self.base_url);
        let failed = |source| DemoError::Request {
            url: url.clone(),
            source,
        };

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(failed)?;
        let status = response.status();
        let text = response.text().await.map_err(failed)?;

        println!("Response status: {status}");
        if !text.is_empty() {
            println!("{text}");
        }
        println!();
        Ok(())
    }
}

async fn run(client: &DemoClient) -> Result<(), DemoError> {
    println!("*********Add new tasks*********");
    for number in 1..=10 {
        let body = json!({ "title": format!("task number {number}"), "completed": false });
        client.send(Method::POST, "/todo", Some(body)).await?;
    }

    println!("*********Get all tasks*********");
    client.send(Method::GET, "/todo", None).await?;

    println!("*********Get task by ID = 1*********");
    client.send(Method::GET, "/todo/1", None).await?;

    println!("*********Update task with ID = 1*********");
    let body = json!({ "id": 1, "title": "task number 1", "completed": true });
    client.send(Method::PATCH, "/todo", Some(body)).await?;

    for id in 1..=3 {
        println!("*********Delete task by ID = {id}*********");
        client
            .send(Method::DELETE, &format!("/todo/{id}"), None)
            .await?;
    }

    println!("*********Get all tasks*********");
    client.send(Method::GET, "/todo", None).await
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let base_url =
        std::env::var("TODO_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
    let client = DemoClient::new(base_url);

    if let Err(error) = run(&client).await {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
