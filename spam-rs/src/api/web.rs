use askama_axum::Template;
use axum::{extract::State, response::IntoResponse, Form};
use serde::Deserialize;
use std::sync::Arc;

use crate::model::Label;
use crate::service::SpamService;

const EMPTY_MESSAGE_WARNING: &str = "Please enter a message before predicting.";

#[derive(Template)]
#[template(path = "classify.html")]
struct ClassifyTemplate {
    message: String,
    prediction: String,
    is_spam: bool,
    warning: String,
}

impl ClassifyTemplate {
    fn empty() -> Self {
        Self {
            message: String::new(),
            prediction: String::new(),
            is_spam: false,
            warning: String::new(),
        }
    }
}

#[derive(Deserialize)]
pub struct PredictForm {
    #[serde(default)]
    message: String,
}

// Form page (GET)
pub async fn form_page() -> impl IntoResponse {
    ClassifyTemplate::empty()
}

// Form submission (POST)
pub async fn predict(
    State(service): State<Arc<SpamService>>,
    Form(form): Form<PredictForm>,
) -> impl IntoResponse {
    match service.check(&form.message) {
        Ok(prediction) => ClassifyTemplate {
            prediction: prediction.label.to_string(),
            is_spam: prediction.label == Label::Spam,
            message: form.message,
            warning: String::new(),
        },
        Err(_) => ClassifyTemplate {
            message: form.message,
            warning: EMPTY_MESSAGE_WARNING.to_string(),
            ..ClassifyTemplate::empty()
        },
    }
}
