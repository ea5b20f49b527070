use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::Utc;
use http_body_util::BodyExt;
use qzr_api::{
    config::Environment,
    generation::{GenerationError, QuizGenerator},
    notifications::{Notification, NotificationKind, Notifier, NotifyError, Trigger},
    router::router,
    state::ApiState,
};
use qzr_db::{KeyValueStore, MemoryStore, StoreError};
use qzr_progress::{Difficulty, Flashcard, Question, Quiz, QuizMode};
use serde::Deserialize;
use tower::ServiceExt;

/// Generator producing predictable quizzes: question `i` has correct option `i % 4`
#[derive(Default)]
pub struct FakeGenerator {
    pub fail_generation: AtomicBool,
    pub fail_analysis: AtomicBool,
}

impl FakeGenerator {
    /// Answers that get every question right
    pub fn perfect_answers(count: usize) -> Vec<usize> {
        (0..count).map(|i| i % 4).collect()
    }

    fn check(&self) -> Result<(), GenerationError> {
        if self.fail_generation.load(Ordering::SeqCst) {
            Err(GenerationError::Malformed("unparseable reply".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl QuizGenerator for FakeGenerator {
    async fn generate_quiz(
        &self,
        topic: &str,
        difficulty: Difficulty,
        question_count: u32,
    ) -> Result<Quiz, GenerationError> {
        self.check()?;
        Ok(Quiz {
            id: uuid::Uuid::new_v4().to_string(),
            title: format!("Quiz about {topic}"),
            topic: topic.to_string(),
            difficulty,
            mode: QuizMode::Quiz,
            questions: (0..question_count as usize)
                .map(|i| Question {
                    question: format!("{topic} question {i}?"),
                    options: ["A", "B", "C", "D"].map(String::from).to_vec(),
                    correct_answer: i % 4,
                    explanation: format!("Option {} is right", i % 4),
                    difficulty,
                })
                .collect(),
            created_at: Utc::now(),
            time_limit: None,
        })
    }

    async fn generate_flashcards(
        &self,
        topic: &str,
        difficulty: Difficulty,
        card_count: u32,
    ) -> Result<Vec<Flashcard>, GenerationError> {
        self.check()?;
        Ok((0..card_count)
            .map(|i| Flashcard {
                front: format!("{topic} term {i}"),
                back: format!("{topic} definition {i}"),
                difficulty,
            })
            .collect())
    }

    async fn analyze_result(
        &self,
        _quiz: &Quiz,
        _answers: &[usize],
        _time_spent_ms: u64,
    ) -> Result<String, GenerationError> {
        if self.fail_analysis.load(Ordering::SeqCst) {
            return Err(GenerationError::Empty);
        }
        Ok("Solid attempt.".to_string())
    }
}

/// Notifier that remembers what was scheduled
#[derive(Default)]
pub struct RecordingNotifier {
    scheduled: Mutex<Vec<(Notification, Trigger)>>,
}

impl RecordingNotifier {
    pub fn kinds(&self) -> Vec<NotificationKind> {
        self.scheduled
            .lock()
            .unwrap()
            .iter()
            .map(|(notification, _)| notification.kind)
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn schedule(
        &self,
        notification: Notification,
        trigger: Trigger,
    ) -> Result<(), NotifyError> {
        self.scheduled.lock().unwrap().push((notification, trigger));
        Ok(())
    }

    async fn cancel_all(&self) -> Result<(), NotifyError> {
        self.scheduled.lock().unwrap().clear();
        Ok(())
    }
}

/// Store that can't be reached
pub struct UnavailableStore;

#[async_trait]
impl KeyValueStore for UnavailableStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: String) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }
}

/// Memory store whose reads pause, so overlapping requests interleave
pub struct SlowReads {
    inner: Arc<MemoryStore>,
}

#[async_trait]
impl KeyValueStore for SlowReads {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(key).await
    }
}

/// The router wired to fakes, with handles to inspect them
pub struct TestApp {
    pub client: TestClient,
    pub store: Arc<MemoryStore>,
    pub generator: Arc<FakeGenerator>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::build(store.clone(), store)
    }

    /// Router over a memory store with slow reads
    pub fn with_slow_reads() -> Self {
        let store = Arc::new(MemoryStore::new());
        let slow = SlowReads {
            inner: store.clone(),
        };
        Self::build(Arc::new(slow), store)
    }

    fn build(backend: Arc<dyn KeyValueStore>, store: Arc<MemoryStore>) -> Self {
        let generator = Arc::new(FakeGenerator::default());
        let notifier = Arc::new(RecordingNotifier::default());

        let state = ApiState::with_services(
            backend,
            generator.clone(),
            notifier.clone(),
            Environment::Development,
        );

        Self {
            client: TestClient::new(router().with_state(state)),
            store,
            generator,
            notifier,
        }
    }

    /// Router over a store that fails every call
    pub fn with_unavailable_store() -> TestClient {
        let state = ApiState::with_services(
            Arc::new(UnavailableStore),
            Arc::new(FakeGenerator::default()),
            Arc::new(RecordingNotifier::default()),
            Environment::Development,
        );
        TestClient::new(router().with_state(state))
    }

    /// Generate and store a quiz through the API, returning it as JSON
    pub async fn create_quiz(&self, topic: &str, difficulty: &str, count: u32) -> serde_json::Value {
        let response = self
            .client
            .post_json(
                "/quizzes",
                &serde_json::json!({
                    "topic": topic,
                    "difficulty": difficulty,
                    "questionCount": count,
                }),
            )
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    pub async fn complete_quiz(
        &self,
        quiz_id: &str,
        answers: &[usize],
        time_spent_ms: u64,
    ) -> TestResponse {
        self.client
            .post_json(
                &format!("/quizzes/{quiz_id}/complete"),
                &serde_json::json!({ "answers": answers, "timeSpentMs": time_spent_ms }),
            )
            .await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Send a request and get the response
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse {
            status,
            body: body_bytes.to_vec(),
        }
    }

    /// Send a GET request
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a DELETE request
    pub async fn delete(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a POST request with JSON body
    pub async fn post_json<T: serde::Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        self.send_json("POST", uri, body).await
    }

    /// Send a PUT request with JSON body
    pub async fn put_json<T: serde::Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        self.send_json("PUT", uri, body).await
    }

    async fn send_json<T: serde::Serialize>(
        &self,
        method: &str,
        uri: &str,
        body: &T,
    ) -> TestResponse {
        let json_body = serde_json::to_string(body).expect("Failed to serialize body");

        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json_body))
            .expect("Failed to build request");

        self.request(request).await
    }
}

/// Test response wrapper
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Get response body as string
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not valid UTF-8")
    }

    /// Parse response body as JSON
    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Assert status code
    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
    }
}
