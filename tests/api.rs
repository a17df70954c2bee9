use brainarena::client::{ApiError, HttpQuizApi, QuizApi};
use brainarena::config::ServerConfig;
use brainarena::libarena::db;
use brainarena::libarena::play::{
    load_question, submit_answer, CheckOutcome, LoadOutcome, NextStep, QuizController, Selection,
};
use brainarena::libarena::seed::{seed_questions, SEED_QUESTIONS};
use brainarena::libarena::service::QuestionService;
use brainarena::libarena::session::GameSession;
use brainarena::server::serve;
use brainarena::state::AppState;
use reqwest::{Client, Method, StatusCode};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

async fn spawn_server() -> (String, Arc<AppState>) {
    let config = ServerConfig {
        db_path: PathBuf::from(":memory:"),
        port: 0,
        allowed_origins: vec!["https://quiz.example".into()],
        seed_if_empty: false,
    };
    let bank = QuestionService::new(db::open_in_memory().unwrap());
    let state = AppState::with_service(config, bank);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(serve(listener, state.clone(), std::future::pending()));

    (format!("http://{address}"), state)
}

fn planets() -> Value {
    json!({
        "text": "Which planet is closest to the Sun?",
        "options": ["Venus", "Mercury", "Mars", "Earth"],
        "correctAnswer": "Mercury",
        "difficulty": "easy"
    })
}

#[tokio::test]
async fn create_then_list_hides_answers() {
    let (base, _state) = spawn_server().await;
    let client = Client::new();

    let created = client
        .post(format!("{base}/questions"))
        .json(&planets())
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = created.json().await.unwrap();
    assert_eq!(created["correctAnswer"], "Mercury");
    assert_eq!(created["id"], 1);

    let listed: Value = client
        .get(format!("{base}/questions"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["text"], "Which planet is closest to the Sun?");
    assert!(listed[0].get("correctAnswer").is_none());
}

#[tokio::test]
async fn create_rejects_bad_payloads() {
    let (base, state) = spawn_server().await;
    let client = Client::new();

    let mut three_options = planets();
    three_options["options"] = json!(["Venus", "Mercury", "Mars"]);
    let mut no_answer = planets();
    no_answer.as_object_mut().unwrap().remove("correctAnswer");

    for payload in [three_options, no_answer] {
        let response = client
            .post(format!("{base}/questions"))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Invalid question data");
        assert_eq!(body["statusCode"], 400);
    }

    let garbage = client
        .post(format!("{base}/questions"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(garbage.status(), StatusCode::BAD_REQUEST);

    assert!(state.questions.find_all().unwrap().is_empty());
}

#[tokio::test]
async fn random_needs_questions() {
    let (base, state) = spawn_server().await;
    let client = Client::new();

    let empty = client
        .get(format!("{base}/questions/random"))
        .send()
        .await
        .unwrap();
    assert_eq!(empty.status(), StatusCode::NOT_FOUND);

    seed_questions(&state.questions);
    for _ in 0..10 {
        let question: Value = client
            .get(format!("{base}/questions/random"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let id = question["id"].as_i64().unwrap();
        assert!((1..=SEED_QUESTIONS.len() as i64).contains(&id));
        assert!(question.get("correctAnswer").is_none());
        assert_eq!(question["options"].as_array().unwrap().len(), 4);
    }
}

#[tokio::test]
async fn check_grades_exact_answers() {
    let (base, _state) = spawn_server().await;
    let client = Client::new();
    client
        .post(format!("{base}/questions"))
        .json(&planets())
        .send()
        .await
        .unwrap();

    let check = |answer: &'static str| {
        let client = client.clone();
        let base = base.clone();
        async move {
            client
                .post(format!("{base}/questions/check"))
                .json(&json!({ "questionId": 1, "selectedAnswer": answer }))
                .send()
                .await
                .unwrap()
        }
    };

    let right: Value = check("Mercury").await.json().await.unwrap();
    assert_eq!(right, json!({ "isCorrect": true }));
    let wrong: Value = check("Venus").await.json().await.unwrap();
    assert_eq!(wrong, json!({ "isCorrect": false }));

    let unknown = client
        .post(format!("{base}/questions/check"))
        .json(&json!({ "questionId": 99, "selectedAnswer": "Mercury" }))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    let body: Value = unknown.json().await.unwrap();
    assert_eq!(body["message"], "Question not found");
}

#[tokio::test]
async fn cors_lets_localhost_and_configured_origins_through() {
    let (base, _state) = spawn_server().await;
    let client = Client::new();

    for (origin, allowed) in [
        ("http://localhost:5173", true),
        ("https://quiz.example", true),
        ("https://elsewhere.example", false),
    ] {
        let response = client
            .request(Method::OPTIONS, format!("{base}/questions/check"))
            .header("origin", origin)
            .header("access-control-request-method", "POST")
            .send()
            .await
            .unwrap();
        let header = response
            .headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap().to_string());
        if allowed {
            assert_eq!(header.as_deref(), Some(origin));
        } else {
            assert_eq!(header, None);
        }
    }
}

#[tokio::test]
async fn http_client_plays_a_full_run() {
    let (base, state) = spawn_server().await;
    seed_questions(&state.questions);
    let answers = state.questions.all_questions().unwrap();
    let api = HttpQuizApi::new(&base);

    let mut controller = QuizController::new(GameSession::with_total(3));
    let tag = controller.start_new_game();
    assert_eq!(load_question(&mut controller, &api, tag).await, LoadOutcome::Shown);

    for round in 0..3 {
        let question = controller.question().unwrap().clone();
        let correct = &answers
            .iter()
            .find(|q| q.id == question.id)
            .unwrap()
            .correct_answer;
        let index = question.options.iter().position(|o| o == correct).unwrap();

        let Selection::Submit(submission) = controller.select_option(index) else {
            panic!("answer was not submitted");
        };
        assert_eq!(
            submit_answer(&mut controller, &api, &submission).await,
            CheckOutcome::Correct
        );

        match controller.after_feedback(&submission) {
            NextStep::LoadNext(tag) => {
                assert!(round < 2);
                assert_eq!(load_question(&mut controller, &api, tag).await, LoadOutcome::Shown);
            }
            NextStep::ShowVictory => assert_eq!(round, 2),
            other => panic!("unexpected step {other:?}"),
        }
    }
    assert!(controller.session().is_victory());
}

#[tokio::test]
async fn http_client_reports_errors() {
    let (base, _state) = spawn_server().await;
    let api = HttpQuizApi::new(&base);

    match api.random_question().await {
        Err(ApiError::Status { status, message }) => {
            assert_eq!(status, 404);
            assert!(message.contains("No questions available"));
        }
        other => panic!("expected a 404, got {other:?}"),
    }
    assert!(matches!(
        api.check_answer(7, "anything").await,
        Err(ApiError::Status { status: 404, .. })
    ));

    let offline = HttpQuizApi::new("http://127.0.0.1:1");
    assert!(matches!(
        offline.random_question().await,
        Err(ApiError::Transport(_))
    ));
}
