//! Training pipeline
//!
//! Each stage takes the output of the previous one by reference and returns
//! a new value: cleaned messages → [`Corpus`] → split → fitted pair →
//! [`Evaluation`]. Nothing here touches the filesystem; saving the resulting
//! [`ArtifactPair`] is left to the caller.

use serde::Serialize;
use tracing::{debug, info};

use super::metrics::{evaluate, Evaluation};
use super::split::{train_test_split, DEFAULT_SEED, DEFAULT_TEST_RATIO};
use crate::error::{Result, SpamError};
use crate::model::{
    ArtifactPair, Classifier, Label, LabeledMessage, ModelKind, NaiveBayes, Vectorizer,
    VectorizerKind,
};
use crate::text::Normalizer;

/// Normalized texts with their labels, index-aligned
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    pub texts: Vec<String>,
    pub labels: Vec<Label>,
}

impl Corpus {
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Sub-corpus made of the given rows
    pub fn select(&self, indices: &[usize]) -> Corpus {
        Corpus {
            texts: indices.iter().map(|&i| self.texts[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }

    /// Normalized texts of one class
    pub fn texts_for(&self, label: Label) -> impl Iterator<Item = &str> + '_ {
        self.texts
            .iter()
            .zip(&self.labels)
            .filter(move |(_, l)| **l == label)
            .map(|(text, _)| text.as_str())
    }

    pub fn count(&self, label: Label) -> usize {
        self.labels.iter().filter(|l| **l == label).count()
    }
}

/// Training parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainOptions {
    pub vectorizer: VectorizerKind,
    pub model: ModelKind,
    pub test_ratio: f64,
    pub seed: u64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            vectorizer: VectorizerKind::TfIdf,
            model: ModelKind::Multinomial,
            test_ratio: DEFAULT_TEST_RATIO,
            seed: DEFAULT_SEED,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone)]
pub struct TrainReport {
    /// Pair fitted on the full corpus, ready to save
    pub artifacts: ArtifactPair,
    /// Scores on the held-out split
    pub evaluation: Evaluation,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// One row of a model comparison
#[derive(Debug, Clone, Serialize)]
pub struct ModelComparison {
    pub vectorizer: VectorizerKind,
    pub model: ModelKind,
    pub evaluation: Evaluation,
}

/// Normalize every message of a cleaned dataset
pub fn normalize_corpus(normalizer: &Normalizer, messages: &[LabeledMessage]) -> Corpus {
    let mut corpus = Corpus {
        texts: Vec::with_capacity(messages.len()),
        labels: Vec::with_capacity(messages.len()),
    };

    for message in messages {
        corpus.texts.push(normalizer.normalize(&message.text));
        corpus.labels.push(message.label);
    }

    debug!(rows = corpus.len(), "Corpus normalized");
    corpus
}

/// Fit a pair on `train` and score it on `test`
pub fn fit_and_evaluate(
    train: &Corpus,
    test: &Corpus,
    vectorizer_kind: VectorizerKind,
    model_kind: ModelKind,
) -> Result<(ArtifactPair, Evaluation)> {
    let artifacts = fit(train, vectorizer_kind, model_kind)?;

    let predicted: Vec<Label> = test
        .texts
        .iter()
        .map(|text| {
            artifacts
                .classifier
                .predict(&artifacts.vectorizer.transform(text))
        })
        .collect();

    Ok((artifacts, evaluate(&test.labels, &predicted)))
}

/// Fit a vectorizer and classifier on a whole corpus
pub fn fit(corpus: &Corpus, vectorizer_kind: VectorizerKind, model_kind: ModelKind) -> Result<ArtifactPair> {
    if corpus.is_empty() {
        return Err(SpamError::EmptyCorpus);
    }

    let (vectorizer, features) = Vectorizer::fit_transform(vectorizer_kind, &corpus.texts)?;
    let classifier = NaiveBayes::fit(model_kind, &features, &corpus.labels)?;
    ArtifactPair::new(vectorizer, classifier)
}

fn split(corpus: &Corpus, test_ratio: f64, seed: u64) -> Result<(Corpus, Corpus)> {
    let indices = train_test_split(corpus.len(), test_ratio, seed)?;
    Ok((corpus.select(&indices.train), corpus.select(&indices.test)))
}

/// Evaluate every event model under every weighting policy
///
/// Sorted by precision, then accuracy, best first.
pub fn compare_models(corpus: &Corpus, test_ratio: f64, seed: u64) -> Result<Vec<ModelComparison>> {
    let (train, test) = split(corpus, test_ratio, seed)?;

    let mut results = Vec::new();
    for vectorizer in VectorizerKind::ALL {
        for model in ModelKind::ALL {
            let (_, evaluation) = fit_and_evaluate(&train, &test, vectorizer, model)?;
            debug!(
                %vectorizer,
                %model,
                accuracy = evaluation.accuracy,
                precision = evaluation.precision,
                "Model evaluated"
            );
            results.push(ModelComparison {
                vectorizer,
                model,
                evaluation,
            });
        }
    }

    results.sort_by(|a, b| {
        b.evaluation
            .precision
            .total_cmp(&a.evaluation.precision)
            .then(b.evaluation.accuracy.total_cmp(&a.evaluation.accuracy))
    });

    Ok(results)
}

/// Evaluate the chosen pair on a held-out split, then refit it on everything
pub fn train(corpus: &Corpus, options: &TrainOptions) -> Result<TrainReport> {
    let (train_set, test_set) = split(corpus, options.test_ratio, options.seed)?;

    let (_, evaluation) = fit_and_evaluate(&train_set, &test_set, options.vectorizer, options.model)?;
    info!(
        vectorizer = %options.vectorizer,
        model = %options.model,
        accuracy = evaluation.accuracy,
        precision = evaluation.precision,
        "Held-out evaluation complete"
    );

    let artifacts = fit(corpus, options.vectorizer, options.model)?;
    info!(
        rows = corpus.len(),
        vocabulary = artifacts.vectorizer.dimension(),
        "Final model fitted on full corpus"
    );

    Ok(TrainReport {
        artifacts,
        evaluation,
        train_rows: train_set.len(),
        test_rows: test_set.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages() -> Vec<LabeledMessage> {
        let spam = [
            "WINNER!! Claim your free prize now",
            "Free entry to win cash, txt WIN to 80086",
            "Call now to claim your cash reward",
            "You won a free holiday, call to claim",
            "URGENT! Your mobile won a cash prize, txt CLAIM",
        ];
        let ham = [
            "Ok lar... Joking wif u oni...",
            "See you at lunch later",
            "I'll be home soon for dinner",
            "Are we meeting at the library tomorrow?",
            "Sorry, running late, see you soon",
            "Mum says dinner is ready",
            "Can you pick up some milk on the way home",
            "Lunch tomorrow sounds good",
        ];

        spam.iter()
            .map(|t| LabeledMessage::new(Label::Spam, *t))
            .chain(ham.iter().map(|t| LabeledMessage::new(Label::Ham, *t)))
            .collect()
    }

    fn corpus() -> Corpus {
        normalize_corpus(&Normalizer::new(), &messages())
    }

    #[test]
    fn test_normalize_corpus_aligned() {
        let corpus = corpus();
        assert_eq!(corpus.len(), 13);
        assert_eq!(corpus.labels.len(), corpus.texts.len());
        assert_eq!(corpus.count(Label::Spam), 5);
        assert_eq!(corpus.texts[0], "winner claim free prize");
    }

    #[test]
    fn test_select_and_texts_for() {
        let corpus = corpus();
        let sub = corpus.select(&[0, 5]);
        assert_eq!(sub.labels, vec![Label::Spam, Label::Ham]);
        assert_eq!(corpus.texts_for(Label::Spam).count(), 5);
    }

    #[test]
    fn test_train_default_options() {
        let corpus = corpus();
        let report = train(&corpus, &TrainOptions::default()).unwrap();

        assert_eq!(report.train_rows + report.test_rows, corpus.len());
        assert_eq!(report.test_rows, 3);
        assert_eq!(report.artifacts.classifier.kind(), ModelKind::Multinomial);
        assert_eq!(report.artifacts.vectorizer.kind(), VectorizerKind::TfIdf);
        assert_eq!(report.evaluation.total(), report.test_rows);

        // Final pair sees the full vocabulary
        let full = Vectorizer::fit(VectorizerKind::TfIdf, &corpus.texts).unwrap();
        assert_eq!(report.artifacts.vectorizer.vocabulary(), full.vocabulary());
    }

    #[test]
    fn test_train_is_deterministic() {
        let corpus = corpus();
        let a = train(&corpus, &TrainOptions::default()).unwrap();
        let b = train(&corpus, &TrainOptions::default()).unwrap();
        assert_eq!(a.artifacts, b.artifacts);
        assert_eq!(a.evaluation, b.evaluation);
    }

    #[test]
    fn test_fitted_pair_classifies_training_spam() {
        let corpus = corpus();
        let pair = fit(&corpus, VectorizerKind::TfIdf, ModelKind::Multinomial).unwrap();
        let vector = pair.vectorizer.transform(&corpus.texts[1]);
        assert_eq!(pair.classifier.predict(&vector), Label::Spam);
    }

    #[test]
    fn test_compare_models_covers_all_pairs_sorted() {
        let results = compare_models(&corpus(), 0.2, DEFAULT_SEED).unwrap();
        assert_eq!(results.len(), 6);

        for pair in results.windows(2) {
            let (a, b) = (&pair[0].evaluation, &pair[1].evaluation);
            assert!(
                a.precision > b.precision
                    || (a.precision == b.precision && a.accuracy >= b.accuracy)
            );
        }
    }

    #[test]
    fn test_fit_empty_corpus() {
        assert!(matches!(
            fit(&Corpus::default(), VectorizerKind::Count, ModelKind::Multinomial),
            Err(SpamError::EmptyCorpus)
        ));
    }
}
