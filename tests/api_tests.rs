// tests/api_tests.rs

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use ecolearn_backend::{
    ai::{ChatMessage, Conversations, GeneratorError, ImageLabeler, TextGenerator, Transcriber},
    config::Config,
    quiz::{leaderboard::LeaderboardStore, session::SessionStore},
    routes,
    state::AppState,
};
use sqlx::sqlite::SqlitePoolOptions;

/// The exact grammar the quiz prompt asks the generator for, two questions.
const SAMPLE_QUIZ: &str = "Q1. What is recycling?\n\
A. Reusing materials\n\
B. Burning waste\n\
C. Throwing waste\n\
D. Making new from oil\n\
Answer: A\n\
\n\
Q2. What is a carbon footprint?\n\
A. A type of shoe\n\
B. The total greenhouse gas emissions caused by a person or organization\n\
C. The amount of carbon in a person's body\n\
D. A dance move\n\
Answer: B\n";

struct ScriptedGenerator {
    reply: String,
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, GeneratorError> {
        Ok(self.reply.clone())
    }
}

struct FailingTranscriber;

#[async_trait]
impl Transcriber for FailingTranscriber {
    async fn transcribe(&self, _audio: Vec<u8>, _language: &str) -> Result<String, GeneratorError> {
        Err(GeneratorError::Malformed("no transcript".to_string()))
    }
}

struct FixedLabeler;

#[async_trait]
impl ImageLabeler for FixedLabeler {
    async fn label(&self, _image_base64: &str) -> Result<String, GeneratorError> {
        Ok("plastic bottle".to_string())
    }
}

/// Spawns the app on a random port with an in-memory database and scripted
/// AI collaborators. Returns the base URL.
async fn spawn_app(generator_reply: &str) -> String {
    // 1. In-memory SQLite; a single connection keeps one shared database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    // 2. Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    // 3. Media directory for uploads
    let media_dir: PathBuf =
        std::env::temp_dir().join(format!("ecolearn-test-{}", uuid::Uuid::new_v4().simple()));
    tokio::fs::create_dir_all(&media_dir)
        .await
        .expect("Failed to create media dir");

    // 4. Test configuration and state
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        groq_api_key: "test-key".to_string(),
        groq_base_url: "http://127.0.0.1:1/unused".to_string(),
        hf_space_url: "http://127.0.0.1:1/unused".to_string(),
        media_dir,
        rust_log: "error".to_string(),
        port: 0,
    };

    let state = AppState {
        pool: pool.clone(),
        config,
        generator: Arc::new(ScriptedGenerator {
            reply: generator_reply.to_string(),
        }),
        transcriber: Arc::new(FailingTranscriber),
        labeler: Arc::new(FixedLabeler),
        conversations: Arc::new(Conversations::new()),
        sessions: Arc::new(SessionStore::new()),
        leaderboard: LeaderboardStore::new(pool),
    };

    // 5. Create the router with the app state
    let app = routes::create_router(state);

    // 6. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 7. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn start_quiz(client: &reqwest::Client, address: &str, username: &str) -> serde_json::Value {
    client
        .post(format!("{}/quiz/start", address))
        .form(&[("username", username)])
        .send()
        .await
        .expect("Failed to start quiz")
        .json()
        .await
        .expect("Failed to parse start response")
}

async fn submit_quiz(
    client: &reqwest::Client,
    address: &str,
    username: &str,
    answers: &str,
) -> reqwest::Response {
    client
        .post(format!("{}/quiz/submit", address))
        .json(&serde_json::json!({ "username": username, "answers": answers }))
        .send()
        .await
        .expect("Failed to submit quiz")
}

#[tokio::test]
async fn health_check_works() {
    let address = spawn_app(SAMPLE_QUIZ).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["msg"].as_str().unwrap().contains("EcoLearn"));
}

#[tokio::test]
async fn quiz_flow_end_to_end() {
    let address = spawn_app(SAMPLE_QUIZ).await;
    let client = reqwest::Client::new();

    // Start: two questions come back, with the answers hidden.
    let start = start_quiz(&client, &address, "bob").await;
    let questions = start["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0]["question"], "What is recycling?");
    assert_eq!(questions[0]["options"].as_array().unwrap().len(), 4);
    assert!(questions[0].get("answer").is_none());

    // Submit both answers correctly.
    let response = submit_quiz(
        &client,
        &address,
        "bob",
        r#"[{"q": 0, "ans": "A"}, {"q": 1, "ans": "B"}]"#,
    )
    .await;
    assert_eq!(response.status().as_u16(), 200);
    let result: serde_json::Value = response.json().await.unwrap();
    assert_eq!(result["score"], 2);
    assert_eq!(result["total"], 2);

    // The score is on the leaderboard.
    let leaderboard: serde_json::Value = client
        .get(format!("{}/quiz/leaderboard", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let entries = leaderboard["leaderboard"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["username"], "bob");
    assert_eq!(entries[0]["score"], 2);

    // The session was consumed: a second submit finds nothing.
    let response = submit_quiz(&client, &address, "bob", r#"[{"q": 0, "ans": "A"}]"#).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn submit_without_session_is_not_found() {
    let address = spawn_app(SAMPLE_QUIZ).await;
    let client = reqwest::Client::new();

    let response = submit_quiz(&client, &address, "stranger", r#"[{"q": 0, "ans": "A"}]"#).await;
    assert_eq!(response.status().as_u16(), 404);

    // Leaderboard untouched.
    let leaderboard: serde_json::Value = client
        .get(format!("{}/quiz/leaderboard", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(leaderboard["leaderboard"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn resubmission_overwrites_score_even_when_lower() {
    let address = spawn_app(SAMPLE_QUIZ).await;
    let client = reqwest::Client::new();

    start_quiz(&client, &address, "alice").await;
    let response = submit_quiz(
        &client,
        &address,
        "alice",
        r#"[{"q": 0, "ans": "A"}, {"q": 1, "ans": "B"}]"#,
    )
    .await;
    assert_eq!(response.status().as_u16(), 200);

    // A fresh quiz with a worse result overwrites the stored 2.
    start_quiz(&client, &address, "alice").await;
    let response = submit_quiz(&client, &address, "alice", r#"[{"q": 0, "ans": "A"}]"#).await;
    assert_eq!(response.status().as_u16(), 200);

    let leaderboard: serde_json::Value = client
        .get(format!("{}/quiz/leaderboard", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let entries = leaderboard["leaderboard"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["score"], 1);
}

#[tokio::test]
async fn leaderboard_is_sorted_by_score_descending() {
    let address = spawn_app(SAMPLE_QUIZ).await;
    let client = reqwest::Client::new();

    for (username, answers) in [
        ("zero", r#"[]"#),
        ("top", r#"[{"q": 0, "ans": "A"}, {"q": 1, "ans": "B"}]"#),
        ("middle", r#"[{"q": 0, "ans": "A"}]"#),
    ] {
        start_quiz(&client, &address, username).await;
        let response = submit_quiz(&client, &address, username, answers).await;
        assert_eq!(response.status().as_u16(), 200);
    }

    let leaderboard: serde_json::Value = client
        .get(format!("{}/quiz/leaderboard", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let entries = leaderboard["leaderboard"].as_array().unwrap();
    let usernames: Vec<&str> = entries
        .iter()
        .map(|e| e["username"].as_str().unwrap())
        .collect();
    assert_eq!(usernames, vec!["top", "middle", "zero"]);
}

#[tokio::test]
async fn leaderboard_ties_break_on_most_recent_update_first() {
    let address = spawn_app(SAMPLE_QUIZ).await;
    let client = reqwest::Client::new();

    // Same score for both; "zed" submits last, so it was updated most
    // recently and ranks first despite sorting after "amy" alphabetically.
    for username in ["amy", "zed"] {
        start_quiz(&client, &address, username).await;
        let response = submit_quiz(&client, &address, username, r#"[{"q": 0, "ans": "A"}]"#).await;
        assert_eq!(response.status().as_u16(), 200);
    }

    let leaderboard: serde_json::Value = client
        .get(format!("{}/quiz/leaderboard", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let entries = leaderboard["leaderboard"].as_array().unwrap();
    let usernames: Vec<&str> = entries
        .iter()
        .map(|e| e["username"].as_str().unwrap())
        .collect();
    assert_eq!(usernames, vec!["zed", "amy"]);
}

#[tokio::test]
async fn malformed_answers_payload_keeps_the_session() {
    let address = spawn_app(SAMPLE_QUIZ).await;
    let client = reqwest::Client::new();

    start_quiz(&client, &address, "bob").await;

    let response = submit_quiz(&client, &address, "bob", "not json at all").await;
    assert_eq!(response.status().as_u16(), 400);

    // The session survived the bad payload.
    let response = submit_quiz(&client, &address, "bob", r#"[{"q": 0, "ans": "A"}]"#).await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn degraded_generator_output_yields_short_session() {
    let address = spawn_app("no questions in here").await;
    let client = reqwest::Client::new();

    let start = start_quiz(&client, &address, "bob").await;
    assert!(start["questions"].as_array().unwrap().is_empty());

    // Submitting against the empty session grades to 0 of 0.
    let response = submit_quiz(&client, &address, "bob", r#"[{"q": 0, "ans": "A"}]"#).await;
    assert_eq!(response.status().as_u16(), 200);
    let result: serde_json::Value = response.json().await.unwrap();
    assert_eq!(result["score"], 0);
    assert_eq!(result["total"], 0);
}

#[tokio::test]
async fn chat_returns_text_without_audio() {
    let address = spawn_app("Hello from the generator").await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/chat", address))
        .json(&serde_json::json!({ "message": "hi" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["text"], "Hello from the generator");
    assert!(body["audio_url"].is_null());
}

#[tokio::test]
async fn carbon_footprint_caps_tips_at_three() {
    let address = spawn_app("- Tip one\n- Tip two\n- Tip three\n- Tip four").await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/carbon-footprint", address))
        .json(&serde_json::json!({ "electricity": 120.0, "transport": 30.0, "diet": "mixed" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    let tips = body["tips"].as_array().unwrap();
    assert_eq!(tips.len(), 3);
    assert_eq!(tips[0], "Tip one");
}

#[tokio::test]
async fn stt_degrades_to_apology_on_upstream_failure() {
    let address = spawn_app(SAMPLE_QUIZ).await;
    let client = reqwest::Client::new();

    let form = reqwest::multipart::Form::new()
        .text("language", "en")
        .part(
            "audio",
            reqwest::multipart::Part::bytes(vec![0u8; 16]).file_name("clip.webm"),
        );

    let response = client
        .post(format!("{}/stt", address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["text"], "Sorry, I couldn't understand the audio.");
}

#[tokio::test]
async fn recycle_labels_and_suggests() {
    let address = spawn_app("Rinse the bottle and reuse it as a planter.").await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/recycle", address))
        .json(&serde_json::json!({ "image_base64": "aGVsbG8=" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["label"], "plastic bottle");
    assert_eq!(
        body["ai_suggestion"],
        "Rinse the bottle and reuse it as a planter."
    );
}

#[tokio::test]
async fn recycle_rejects_invalid_base64() {
    let address = spawn_app(SAMPLE_QUIZ).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/recycle", address))
        .json(&serde_json::json!({ "image_base64": "!!! not base64 !!!" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn share_upload_serves_the_stored_file() {
    let address = spawn_app(SAMPLE_QUIZ).await;
    let client = reqwest::Client::new();

    let form = reqwest::multipart::Form::new().part(
        "image",
        reqwest::multipart::Part::bytes(vec![137u8, 80, 78, 71]).file_name("pic.png"),
    );

    let response = client
        .post(format!("{}/share/upload", address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with("/media/share_"));
    assert!(url.ends_with(".png"));
    assert!(body["absolute_url"].as_str().unwrap().ends_with(url));

    // The uploaded file is reachable through the media mount.
    let served = client
        .get(format!("{}{}", address, url))
        .send()
        .await
        .expect("Failed to fetch media");
    assert_eq!(served.status().as_u16(), 200);
}
