//! HTTP surface tests against an in-process router

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use spam_rs::api::ApiServer;
use spam_rs::model::{ArtifactPair, Label, LabeledMessage, ModelKind, NaiveBayes, Vectorizer, VectorizerKind};
use spam_rs::text::Normalizer;
use spam_rs::training::normalize_corpus;
use spam_rs::SpamService;
use tower::ServiceExt;

fn router() -> Router {
    let messages = vec![
        LabeledMessage::new(Label::Spam, "WINNER!! Claim your free prize now, txt WIN to 80086"),
        LabeledMessage::new(Label::Spam, "Free entry to win cash, call now to claim your reward"),
        LabeledMessage::new(Label::Spam, "You have been selected for a cash prize, call to receive it"),
        LabeledMessage::new(Label::Ham, "Ok lar... Joking wif u oni..."),
        LabeledMessage::new(Label::Ham, "See you at lunch later, ok?"),
        LabeledMessage::new(Label::Ham, "I'll be home soon, joking about dinner lar"),
    ];
    let corpus = normalize_corpus(&Normalizer::new(), &messages);

    let (vectorizer, features) = Vectorizer::fit_transform(VectorizerKind::TfIdf, &corpus.texts).unwrap();
    let classifier = NaiveBayes::fit(ModelKind::Multinomial, &features, &corpus.labels).unwrap();
    let service = SpamService::new(ArtifactPair::new(vectorizer, classifier).unwrap());

    ApiServer::new(service, "127.0.0.1:0".to_string()).router()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = router()
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "spam-rs");
    assert_eq!(body["classifier"], "multinomial");
    assert_eq!(body["vectorizer"], "tfidf");
    assert!(body["vocabulary_size"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_classify_spam() {
    let response = router()
        .oneshot(json_request(
            "/api/classify",
            json!({ "message": "WINNER!! You have been selected to receive a £900 prize reward!" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["label"], 1);
    assert_eq!(body["prediction"], "Spam");
    assert_eq!(body["is_spam"], true);
    assert_eq!(body["normalized"], "winner select receiv 900 prize reward");
}

#[tokio::test]
async fn test_classify_ham() {
    let response = router()
        .oneshot(json_request(
            "/api/classify",
            json!({ "message": "Ok lar... Joking wif u oni..." }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["label"], 0);
    assert_eq!(body["prediction"], "Ham (Not Spam)");
    assert_eq!(body["is_spam"], false);
}

#[tokio::test]
async fn test_classify_empty_message() {
    for body in [json!({ "message": "" }), json!({ "message": "  \n" }), json!({})] {
        let response = router()
            .oneshot(json_request("/api/classify", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_form_page() {
    let response = router()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("<textarea"));
    assert!(html.contains("Predict"));
    assert!(!html.contains("Prediction:"));
}

#[tokio::test]
async fn test_form_submit_spam() {
    let response = router()
        .oneshot(form_request("message=WINNER%21%21+Claim+your+free+prize+now"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Prediction: Spam"));
}

#[tokio::test]
async fn test_form_submit_ham() {
    let response = router()
        .oneshot(form_request("message=Ok+lar...+Joking+wif+u+oni..."))
        .await
        .unwrap();

    let html = body_string(response).await;
    assert!(html.contains("Prediction: Ham (Not Spam)"));
}

#[tokio::test]
async fn test_form_submit_empty_shows_warning() {
    let response = router().oneshot(form_request("message=")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Please enter a message before predicting."));
    assert!(!html.contains("Prediction:"));
}
