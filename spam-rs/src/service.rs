//! Inference service
//!
//! Holds the loaded artifact pair and runs normalize → transform → predict
//! for each request. The service is immutable after construction and is
//! shared across request handlers behind an `Arc`.

use serde::Serialize;
use tracing::{debug, info};

use crate::config::ArtifactConfig;
use crate::error::{Result, SpamError};
use crate::model::{ArtifactPair, Classifier, Label, ModelKind, VectorizerKind};
use crate::text::Normalizer;

/// Outcome of a validated classification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub label: Label,
    /// The message after normalization
    pub normalized: String,
}

/// Spam classification service
pub struct SpamService {
    normalizer: Normalizer,
    artifacts: ArtifactPair,
}

impl SpamService {
    /// Create a service around an already trained pair
    pub fn new(artifacts: ArtifactPair) -> Self {
        Self {
            normalizer: Normalizer::new(),
            artifacts,
        }
    }

    /// Load the artifact pair from the configured locations
    pub fn load(config: &ArtifactConfig) -> Result<Self> {
        let artifacts = ArtifactPair::load(&config.vectorizer_path, &config.model_path)?;

        info!(
            vocabulary = artifacts.vectorizer.dimension(),
            vectorizer = %artifacts.vectorizer.kind(),
            classifier = %artifacts.classifier.kind(),
            "Spam model loaded"
        );

        Ok(Self::new(artifacts))
    }

    /// Classify a raw message
    ///
    /// Any input is accepted, including the empty string. A message whose
    /// tokens are all unknown yields the zero vector and the class prior
    /// decides.
    pub fn classify(&self, message: &str) -> Label {
        self.run(message).0
    }

    /// Validate, then classify
    ///
    /// Empty or whitespace-only messages are rejected before the pipeline
    /// runs.
    pub fn check(&self, message: &str) -> Result<Prediction> {
        if message.trim().is_empty() {
            return Err(SpamError::EmptyMessage);
        }

        let (label, normalized) = self.run(message);
        Ok(Prediction { label, normalized })
    }

    fn run(&self, message: &str) -> (Label, String) {
        let normalized = self.normalizer.normalize(message);
        let vector = self.artifacts.vectorizer.transform(&normalized);
        let label = self.artifacts.classifier.predict(&vector);

        debug!(
            tokens = normalized.split_whitespace().count(),
            known = vector.non_zero().count(),
            label = label.as_u8(),
            "Message classified"
        );

        (label, normalized)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.artifacts.vectorizer.dimension()
    }

    pub fn vectorizer_kind(&self) -> VectorizerKind {
        self.artifacts.vectorizer.kind()
    }

    pub fn model_kind(&self) -> ModelKind {
        self.artifacts.classifier.kind()
    }

    pub fn artifacts(&self) -> &ArtifactPair {
        &self.artifacts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NaiveBayes, Vectorizer};
    use crate::text::normalize;

    fn service() -> SpamService {
        let messages = [
            (Label::Spam, "WINNER!! Claim your free prize now, txt WIN to 80086"),
            (Label::Spam, "Free entry to win cash, call now to claim your reward"),
            (Label::Spam, "You have been selected for a cash prize, call to receive it"),
            (Label::Ham, "Ok lar... Joking wif u oni..."),
            (Label::Ham, "See you at lunch later, ok?"),
            (Label::Ham, "I'll be home soon, joking about dinner lar"),
            (Label::Ham, "Sorry, I'll call you later when I get home"),
        ];

        let corpus: Vec<String> = messages.iter().map(|(_, text)| normalize(text)).collect();
        let labels: Vec<Label> = messages.iter().map(|(label, _)| *label).collect();

        let (vectorizer, features) = Vectorizer::fit_transform(VectorizerKind::TfIdf, &corpus).unwrap();
        let classifier = NaiveBayes::fit(ModelKind::Multinomial, &features, &labels).unwrap();
        SpamService::new(ArtifactPair::new(vectorizer, classifier).unwrap())
    }

    #[test]
    fn test_classify_spam_and_ham() {
        let service = service();
        assert_eq!(
            service.classify("WINNER!! You have been selected to receive a £900 prize reward!"),
            Label::Spam
        );
        assert_eq!(service.classify("Ok lar... Joking wif u oni..."), Label::Ham);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let service = service();
        let message = "Call now to claim your free cash prize";
        let first = service.classify(message);
        for _ in 0..10 {
            assert_eq!(service.classify(message), first);
        }
    }

    #[test]
    fn test_classify_unknown_tokens_uses_prior() {
        let service = service();
        // Ham is the majority class
        assert_eq!(service.classify("zzz qqq xyzzy"), Label::Ham);
        assert_eq!(service.classify(""), Label::Ham);
    }

    #[test]
    fn test_check_rejects_empty_message() {
        let service = service();
        assert!(matches!(service.check(""), Err(SpamError::EmptyMessage)));
        assert!(matches!(service.check("  \n\t "), Err(SpamError::EmptyMessage)));
    }

    #[test]
    fn test_check_returns_normalized_text() {
        let service = service();
        let prediction = service.check("Ok lar... Joking wif u oni...").unwrap();
        assert_eq!(prediction.label, Label::Ham);
        assert_eq!(prediction.normalized, "ok lar joke wif u oni");
    }

    #[test]
    fn test_load_missing_artifacts_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = ArtifactConfig {
            vectorizer_path: dir.path().join("vectorizer.json"),
            model_path: dir.path().join("model.json"),
        };
        assert!(SpamService::load(&config).is_err());
    }

    #[test]
    fn test_service_metadata() {
        let service = service();
        assert_eq!(service.model_kind(), ModelKind::Multinomial);
        assert_eq!(service.vectorizer_kind(), VectorizerKind::TfIdf);
        assert!(service.vocabulary_size() > 0);
    }
}
