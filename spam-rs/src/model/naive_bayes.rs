//! Naive Bayes classifiers
//!
//! Three event models over dense feature vectors:
//!
//! - **Multinomial**: per-class term likelihoods from relative frequencies,
//!   additive (Laplace) smoothing. This is the production model.
//! - **Bernoulli**: binary presence/absence of each term.
//! - **Gaussian**: per-class normal distribution for each dimension.
//!
//! Scores are joint log-likelihoods; the higher class wins and an exact tie
//! goes to [`Label::Ham`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::types::{FeatureVector, Label};
use crate::error::{Result, SpamError};

/// Default additive smoothing
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Default fraction of the largest feature variance added to all variances
pub const DEFAULT_VAR_SMOOTHING: f64 = 1e-9;

/// Event model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Gaussian,
    Multinomial,
    Bernoulli,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [ModelKind::Gaussian, ModelKind::Multinomial, ModelKind::Bernoulli];
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Gaussian => write!(f, "gaussian"),
            ModelKind::Multinomial => write!(f, "multinomial"),
            ModelKind::Bernoulli => write!(f, "bernoulli"),
        }
    }
}

impl FromStr for ModelKind {
    type Err = SpamError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "gaussian" | "gnb" => Ok(ModelKind::Gaussian),
            "multinomial" | "mnb" => Ok(ModelKind::Multinomial),
            "bernoulli" | "bnb" => Ok(ModelKind::Bernoulli),
            other => Err(SpamError::Config(format!("Unknown model '{}'", other))),
        }
    }
}

/// Inference interface shared by the event models
pub trait Classifier {
    fn kind(&self) -> ModelKind;

    /// Expected feature dimension
    fn n_features(&self) -> usize;

    /// Joint log-likelihood per class, indexed by [`Label::index`]
    fn joint_log_likelihood(&self, vector: &FeatureVector) -> [f64; 2];

    /// Most likely label; ties go to ham
    fn predict(&self, vector: &FeatureVector) -> Label {
        decide(self.joint_log_likelihood(vector))
    }

    /// Posterior probability of spam
    fn spam_probability(&self, vector: &FeatureVector) -> f64 {
        let [ham, spam] = self.joint_log_likelihood(vector);
        let max = ham.max(spam);
        let ham = (ham - max).exp();
        let spam = (spam - max).exp();
        spam / (ham + spam)
    }
}

/// Pick the label with the strictly higher score, ham otherwise
pub fn decide(scores: [f64; 2]) -> Label {
    if scores[Label::Spam.index()] > scores[Label::Ham.index()] {
        Label::Spam
    } else {
        Label::Ham
    }
}

/// Validated training input shared by all event models
struct TrainingSet<'a> {
    features: &'a [FeatureVector],
    labels: &'a [Label],
    n_features: usize,
    class_counts: [usize; 2],
}

impl<'a> TrainingSet<'a> {
    fn new(features: &'a [FeatureVector], labels: &'a [Label]) -> Result<Self> {
        if features.is_empty() {
            return Err(SpamError::Training("No training rows".to_string()));
        }
        if features.len() != labels.len() {
            return Err(SpamError::Training(format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }

        let n_features = features[0].len();
        if n_features == 0 {
            return Err(SpamError::Training("Feature vectors are empty".to_string()));
        }
        if let Some(row) = features.iter().position(|v| v.len() != n_features) {
            return Err(SpamError::Training(format!(
                "Row {} has {} features, expected {}",
                row,
                features[row].len(),
                n_features
            )));
        }

        let mut class_counts = [0usize; 2];
        for label in labels {
            class_counts[label.index()] += 1;
        }
        if class_counts.contains(&0) {
            return Err(SpamError::Training(
                "Training data must contain both spam and ham".to_string(),
            ));
        }

        Ok(Self {
            features,
            labels,
            n_features,
            class_counts,
        })
    }

    fn rows(&self) -> impl Iterator<Item = (&FeatureVector, Label)> + '_ {
        self.features.iter().zip(self.labels.iter().copied())
    }

    fn class_log_prior(&self) -> [f64; 2] {
        let total = self.labels.len() as f64;
        self.class_counts.map(|count| (count as f64 / total).ln())
    }
}

fn check_dimension(expected: usize, vector: &FeatureVector) {
    debug_assert_eq!(vector.len(), expected, "feature dimension mismatch");
}

/// Multinomial event model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultinomialNb {
    alpha: f64,
    class_log_prior: [f64; 2],
    /// ln P(feature | class)
    feature_log_prob: [Vec<f64>; 2],
}

impl MultinomialNb {
    pub fn fit(features: &[FeatureVector], labels: &[Label], alpha: f64) -> Result<Self> {
        if alpha <= 0.0 {
            return Err(SpamError::Training(format!("alpha must be positive, got {}", alpha)));
        }

        let set = TrainingSet::new(features, labels)?;
        let mut feature_count = [vec![0.0; set.n_features], vec![0.0; set.n_features]];

        for (vector, label) in set.rows() {
            let counts = &mut feature_count[label.index()];
            for (idx, value) in vector.non_zero() {
                if value < 0.0 {
                    return Err(SpamError::Training(
                        "Multinomial model requires non-negative features".to_string(),
                    ));
                }
                counts[idx] += value;
            }
        }

        let smoothing = alpha * set.n_features as f64;
        let feature_log_prob = feature_count.map(|counts| {
            let total: f64 = counts.iter().sum::<f64>() + smoothing;
            counts
                .iter()
                .map(|count| ((count + alpha) / total).ln())
                .collect::<Vec<f64>>()
        });

        Ok(Self {
            alpha,
            class_log_prior: set.class_log_prior(),
            feature_log_prob,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn class_log_prior(&self) -> [f64; 2] {
        self.class_log_prior
    }

    pub fn feature_log_prob(&self, label: Label) -> &[f64] {
        &self.feature_log_prob[label.index()]
    }
}

impl Classifier for MultinomialNb {
    fn kind(&self) -> ModelKind {
        ModelKind::Multinomial
    }

    fn n_features(&self) -> usize {
        self.feature_log_prob[0].len()
    }

    fn joint_log_likelihood(&self, vector: &FeatureVector) -> [f64; 2] {
        check_dimension(self.n_features(), vector);

        let mut scores = self.class_log_prior;
        for (idx, value) in vector.non_zero() {
            for label in Label::ALL {
                scores[label.index()] += value * self.feature_log_prob[label.index()][idx];
            }
        }
        scores
    }
}

/// Bernoulli event model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BernoulliNb {
    alpha: f64,
    class_log_prior: [f64; 2],
    /// ln P(feature present | class)
    feature_log_prob: [Vec<f64>; 2],
    /// ln P(feature absent | class)
    feature_log_neg_prob: [Vec<f64>; 2],
}

impl BernoulliNb {
    pub fn fit(features: &[FeatureVector], labels: &[Label], alpha: f64) -> Result<Self> {
        if alpha <= 0.0 {
            return Err(SpamError::Training(format!("alpha must be positive, got {}", alpha)));
        }

        let set = TrainingSet::new(features, labels)?;
        let mut present = [vec![0.0; set.n_features], vec![0.0; set.n_features]];

        for (vector, label) in set.rows() {
            let counts = &mut present[label.index()];
            for (idx, value) in vector.non_zero() {
                if value > 0.0 {
                    counts[idx] += 1.0;
                }
            }
        }

        let mut feature_log_prob = [Vec::new(), Vec::new()];
        let mut feature_log_neg_prob = [Vec::new(), Vec::new()];
        for label in Label::ALL {
            let class_total = set.class_counts[label.index()] as f64 + 2.0 * alpha;
            let probs: Vec<f64> = present[label.index()]
                .iter()
                .map(|count| (count + alpha) / class_total)
                .collect();
            feature_log_prob[label.index()] = probs.iter().map(|p| p.ln()).collect();
            feature_log_neg_prob[label.index()] = probs.iter().map(|p| (1.0 - p).ln()).collect();
        }

        Ok(Self {
            alpha,
            class_log_prior: set.class_log_prior(),
            feature_log_prob,
            feature_log_neg_prob,
        })
    }
}

impl Classifier for BernoulliNb {
    fn kind(&self) -> ModelKind {
        ModelKind::Bernoulli
    }

    fn n_features(&self) -> usize {
        self.feature_log_prob[0].len()
    }

    fn joint_log_likelihood(&self, vector: &FeatureVector) -> [f64; 2] {
        check_dimension(self.n_features(), vector);

        let mut scores = [0.0; 2];
        for label in Label::ALL {
            let c = label.index();
            let absent: f64 = self.feature_log_neg_prob[c].iter().sum();
            let present: f64 = vector
                .non_zero()
                .filter(|(_, value)| *value > 0.0)
                .map(|(idx, _)| self.feature_log_prob[c][idx] - self.feature_log_neg_prob[c][idx])
                .sum();
            scores[c] = self.class_log_prior[c] + absent + present;
        }
        scores
    }
}

/// Gaussian event model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaussianNb {
    var_smoothing: f64,
    class_log_prior: [f64; 2],
    /// Per-class feature means
    theta: [Vec<f64>; 2],
    /// Per-class feature variances, smoothed
    var: [Vec<f64>; 2],
}

impl GaussianNb {
    pub fn fit(features: &[FeatureVector], labels: &[Label], var_smoothing: f64) -> Result<Self> {
        let set = TrainingSet::new(features, labels)?;
        let d = set.n_features;

        let mut sum = [vec![0.0; d], vec![0.0; d]];
        for (vector, label) in set.rows() {
            for (idx, value) in vector.non_zero() {
                sum[label.index()][idx] += value;
            }
        }
        let theta = [0usize, 1].map(|c| {
            let n = set.class_counts[c] as f64;
            sum[c].iter().map(|s| s / n).collect::<Vec<f64>>()
        });

        let mut squared = [vec![0.0; d], vec![0.0; d]];
        for (vector, label) in set.rows() {
            let c = label.index();
            for (idx, value) in vector.as_slice().iter().enumerate() {
                let diff = value - theta[c][idx];
                squared[c][idx] += diff * diff;
            }
        }

        let epsilon = {
            let largest = Self::largest_variance(features, d);
            let epsilon = var_smoothing * largest;
            if epsilon > 0.0 {
                epsilon
            } else {
                DEFAULT_VAR_SMOOTHING
            }
        };

        let var = [0usize, 1].map(|c| {
            let n = set.class_counts[c] as f64;
            squared[c].iter().map(|s| s / n + epsilon).collect::<Vec<f64>>()
        });

        Ok(Self {
            var_smoothing,
            class_log_prior: set.class_log_prior(),
            theta,
            var,
        })
    }

    /// Largest per-feature variance across all rows
    fn largest_variance(features: &[FeatureVector], d: usize) -> f64 {
        let n = features.len() as f64;
        let mut mean = vec![0.0; d];
        for vector in features {
            for (idx, value) in vector.non_zero() {
                mean[idx] += value / n;
            }
        }

        let mut var = vec![0.0; d];
        for vector in features {
            for (idx, value) in vector.as_slice().iter().enumerate() {
                let diff = value - mean[idx];
                var[idx] += diff * diff / n;
            }
        }

        var.into_iter().fold(0.0, f64::max)
    }
}

impl Classifier for GaussianNb {
    fn kind(&self) -> ModelKind {
        ModelKind::Gaussian
    }

    fn n_features(&self) -> usize {
        self.theta[0].len()
    }

    fn joint_log_likelihood(&self, vector: &FeatureVector) -> [f64; 2] {
        check_dimension(self.n_features(), vector);

        let mut scores = [0.0; 2];
        for label in Label::ALL {
            let c = label.index();
            let mut log_likelihood = 0.0;
            for ((value, mean), var) in vector.as_slice().iter().zip(&self.theta[c]).zip(&self.var[c]) {
                let diff = value - mean;
                log_likelihood -= 0.5 * (2.0 * std::f64::consts::PI * var).ln();
                log_likelihood -= 0.5 * diff * diff / var;
            }
            scores[c] = self.class_log_prior[c] + log_likelihood;
        }
        scores
    }
}

/// Any trained event model, as stored in the model artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NaiveBayes {
    Gaussian(GaussianNb),
    Multinomial(MultinomialNb),
    Bernoulli(BernoulliNb),
}

impl NaiveBayes {
    /// Fit the requested event model with default smoothing
    pub fn fit(kind: ModelKind, features: &[FeatureVector], labels: &[Label]) -> Result<Self> {
        Ok(match kind {
            ModelKind::Gaussian => {
                NaiveBayes::Gaussian(GaussianNb::fit(features, labels, DEFAULT_VAR_SMOOTHING)?)
            }
            ModelKind::Multinomial => {
                NaiveBayes::Multinomial(MultinomialNb::fit(features, labels, DEFAULT_ALPHA)?)
            }
            ModelKind::Bernoulli => {
                NaiveBayes::Bernoulli(BernoulliNb::fit(features, labels, DEFAULT_ALPHA)?)
            }
        })
    }

    fn inner(&self) -> &dyn Classifier {
        match self {
            NaiveBayes::Gaussian(model) => model,
            NaiveBayes::Multinomial(model) => model,
            NaiveBayes::Bernoulli(model) => model,
        }
    }

    /// Check parameter shapes after deserialization
    pub fn validate(&self) -> Result<()> {
        let d = self.n_features();
        let consistent = match self {
            NaiveBayes::Gaussian(m) => m.theta.iter().chain(&m.var).all(|p| p.len() == d),
            NaiveBayes::Multinomial(m) => m.feature_log_prob.iter().all(|p| p.len() == d),
            NaiveBayes::Bernoulli(m) => m
                .feature_log_prob
                .iter()
                .chain(&m.feature_log_neg_prob)
                .all(|p| p.len() == d),
        };

        if d == 0 || !consistent {
            return Err(SpamError::Artifact(format!(
                "{} model parameters have inconsistent dimensions",
                self.kind()
            )));
        }
        Ok(())
    }
}

impl Classifier for NaiveBayes {
    fn kind(&self) -> ModelKind {
        self.inner().kind()
    }

    fn n_features(&self) -> usize {
        self.inner().n_features()
    }

    fn joint_log_likelihood(&self, vector: &FeatureVector) -> [f64; 2] {
        self.inner().joint_log_likelihood(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Dimensions: [free, prize, meet, lunch]
    fn training_data() -> (Vec<FeatureVector>, Vec<Label>) {
        let features = vec![
            FeatureVector(vec![2.0, 1.0, 0.0, 0.0]),
            FeatureVector(vec![1.0, 2.0, 0.0, 0.0]),
            FeatureVector(vec![0.0, 0.0, 1.0, 1.0]),
            FeatureVector(vec![0.0, 0.0, 2.0, 1.0]),
            FeatureVector(vec![0.0, 1.0, 1.0, 2.0]),
        ];
        let labels = vec![Label::Spam, Label::Spam, Label::Ham, Label::Ham, Label::Ham];
        (features, labels)
    }

    #[test]
    fn test_multinomial_parameters() {
        let (features, labels) = training_data();
        let model = MultinomialNb::fit(&features, &labels, 1.0).unwrap();

        let [ham_prior, spam_prior] = model.class_log_prior();
        assert!((ham_prior - (3.0f64 / 5.0).ln()).abs() < 1e-12);
        assert!((spam_prior - (2.0f64 / 5.0).ln()).abs() < 1e-12);

        // spam counts: free 3, prize 3, meet 0, lunch 0 (total 6, d = 4)
        let spam = model.feature_log_prob(Label::Spam);
        assert!((spam[0] - (4.0f64 / 10.0).ln()).abs() < 1e-12);
        assert!((spam[2] - (1.0f64 / 10.0).ln()).abs() < 1e-12);

        let total: f64 = spam.iter().map(|p| p.exp()).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_multinomial_predict() {
        let (features, labels) = training_data();
        let model = MultinomialNb::fit(&features, &labels, 1.0).unwrap();

        assert_eq!(model.predict(&FeatureVector(vec![1.0, 1.0, 0.0, 0.0])), Label::Spam);
        assert_eq!(model.predict(&FeatureVector(vec![0.0, 0.0, 1.0, 1.0])), Label::Ham);
        assert!(model.spam_probability(&FeatureVector(vec![3.0, 0.0, 0.0, 0.0])) > 0.5);
    }

    #[test]
    fn test_empty_vector_falls_back_to_prior() {
        let (features, labels) = training_data();
        let model = MultinomialNb::fit(&features, &labels, 1.0).unwrap();
        // Ham is the majority class
        assert_eq!(model.predict(&FeatureVector::zeros(4)), Label::Ham);
    }

    #[test]
    fn test_tie_prefers_ham() {
        assert_eq!(decide([-1.5, -1.5]), Label::Ham);
        assert_eq!(decide([-2.0, -1.0]), Label::Spam);
        assert_eq!(decide([f64::NAN, -1.0]), Label::Ham);

        // Balanced classes and no evidence: equal scores
        let features = vec![
            FeatureVector(vec![1.0, 0.0]),
            FeatureVector(vec![0.0, 1.0]),
        ];
        let labels = vec![Label::Ham, Label::Spam];
        let model = MultinomialNb::fit(&features, &labels, 1.0).unwrap();
        let vector = FeatureVector::zeros(2);
        let [ham, spam] = model.joint_log_likelihood(&vector);
        assert_eq!(ham, spam);
        assert_eq!(model.predict(&vector), Label::Ham);
    }

    #[test]
    fn test_bernoulli_predict() {
        let (features, labels) = training_data();
        let model = BernoulliNb::fit(&features, &labels, 1.0).unwrap();

        assert_eq!(model.predict(&FeatureVector(vec![1.0, 1.0, 0.0, 0.0])), Label::Spam);
        assert_eq!(model.predict(&FeatureVector(vec![0.0, 0.0, 1.0, 1.0])), Label::Ham);
    }

    #[test]
    fn test_gaussian_predict() {
        let (features, labels) = training_data();
        let model = GaussianNb::fit(&features, &labels, DEFAULT_VAR_SMOOTHING).unwrap();

        assert_eq!(model.predict(&FeatureVector(vec![1.5, 1.5, 0.0, 0.0])), Label::Spam);
        assert_eq!(model.predict(&FeatureVector(vec![0.0, 0.3, 1.3, 1.3])), Label::Ham);
    }

    #[test]
    fn test_fit_rejects_bad_input() {
        let (features, labels) = training_data();

        assert!(MultinomialNb::fit(&features, &labels[..3], 1.0).is_err());
        assert!(MultinomialNb::fit(&[], &[], 1.0).is_err());
        assert!(MultinomialNb::fit(&features, &labels, 0.0).is_err());

        let one_class = vec![Label::Ham; features.len()];
        assert!(matches!(
            MultinomialNb::fit(&features, &one_class, 1.0),
            Err(SpamError::Training(_))
        ));

        let ragged = vec![FeatureVector(vec![1.0, 0.0]), FeatureVector(vec![1.0])];
        assert!(GaussianNb::fit(&ragged, &[Label::Ham, Label::Spam], 1e-9).is_err());

        let negative = vec![FeatureVector(vec![-1.0, 0.0]), FeatureVector(vec![1.0, 0.0])];
        assert!(MultinomialNb::fit(&negative, &[Label::Ham, Label::Spam], 1.0).is_err());
    }

    #[test]
    fn test_naive_bayes_enum_dispatch_and_serde() {
        let (features, labels) = training_data();
        for kind in ModelKind::ALL {
            let model = NaiveBayes::fit(kind, &features, &labels).unwrap();
            assert_eq!(model.kind(), kind);
            assert_eq!(model.n_features(), 4);
            assert!(model.validate().is_ok());

            let json = serde_json::to_string(&model).unwrap();
            let restored: NaiveBayes = serde_json::from_str(&json).unwrap();
            assert_eq!(restored, model);
        }
    }

    #[test]
    fn test_model_kind_from_str() {
        assert_eq!("mnb".parse::<ModelKind>().unwrap(), ModelKind::Multinomial);
        assert_eq!("Gaussian".parse::<ModelKind>().unwrap(), ModelKind::Gaussian);
        assert!("svm".parse::<ModelKind>().is_err());
    }
}
