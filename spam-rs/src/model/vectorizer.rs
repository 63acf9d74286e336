//! Bag-of-words and TF-IDF vectorization
//!
//! The vocabulary is learned once from a corpus of normalized texts and
//! frozen afterwards. Terms are indexed in lexicographic order so the
//! dimension layout is reproducible for a given corpus.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use super::types::FeatureVector;
use crate::error::{Result, SpamError};

/// Weighting policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorizerKind {
    /// Raw occurrence counts
    Count,
    /// Counts scaled by smoothed inverse document frequency, L2-normalized
    TfIdf,
}

impl VectorizerKind {
    pub const ALL: [VectorizerKind; 2] = [VectorizerKind::Count, VectorizerKind::TfIdf];
}

impl fmt::Display for VectorizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorizerKind::Count => write!(f, "count"),
            VectorizerKind::TfIdf => write!(f, "tfidf"),
        }
    }
}

impl FromStr for VectorizerKind {
    type Err = SpamError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "count" | "bow" => Ok(VectorizerKind::Count),
            "tfidf" | "tf-idf" => Ok(VectorizerKind::TfIdf),
            other => Err(SpamError::Config(format!("Unknown vectorizer '{}'", other))),
        }
    }
}

/// Frozen term → index mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Index of a term, `None` when out of vocabulary
    pub fn get(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl From<Vec<String>> for Vocabulary {
    fn from(terms: Vec<String>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();
        Self { terms, index }
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.terms
    }
}

/// Text vectorizer state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vectorizer {
    kind: VectorizerKind,
    vocabulary: Vocabulary,
    /// Inverse document frequency per dimension (TF-IDF only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    idf: Option<Vec<f64>>,
}

impl Vectorizer {
    /// Learn the vocabulary (and idf weights) from normalized texts
    pub fn fit<S: AsRef<str>>(kind: VectorizerKind, corpus: &[S]) -> Result<Self> {
        let terms: BTreeSet<&str> = corpus
            .iter()
            .flat_map(|doc| doc.as_ref().split_whitespace())
            .collect();

        if terms.is_empty() {
            return Err(SpamError::EmptyCorpus);
        }

        let vocabulary =
            Vocabulary::from(terms.into_iter().map(str::to_string).collect::<Vec<_>>());

        let idf = match kind {
            VectorizerKind::Count => None,
            VectorizerKind::TfIdf => Some(Self::compute_idf(&vocabulary, corpus)),
        };

        Ok(Self {
            kind,
            vocabulary,
            idf,
        })
    }

    /// Smoothed idf: ln((1 + n) / (1 + df)) + 1
    fn compute_idf<S: AsRef<str>>(vocabulary: &Vocabulary, corpus: &[S]) -> Vec<f64> {
        let mut doc_freq = vec![0usize; vocabulary.len()];

        for doc in corpus {
            let unique: HashSet<&str> = doc.as_ref().split_whitespace().collect();
            for term in unique {
                if let Some(idx) = vocabulary.get(term) {
                    doc_freq[idx] += 1;
                }
            }
        }

        let n_docs = corpus.len() as f64;
        doc_freq
            .into_iter()
            .map(|df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect()
    }

    /// Map normalized text onto the frozen vocabulary
    pub fn transform(&self, normalized: &str) -> FeatureVector {
        let mut vector = FeatureVector::zeros(self.dimension());

        for term in normalized.split_whitespace() {
            if let Some(idx) = self.vocabulary.get(term) {
                vector.0[idx] += 1.0;
            }
        }

        if let Some(idf) = &self.idf {
            for (value, weight) in vector.0.iter_mut().zip(idf) {
                *value *= weight;
            }

            let norm = vector.0.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                for value in vector.0.iter_mut() {
                    *value /= norm;
                }
            }
        }

        vector
    }

    /// Transform every document of a corpus
    pub fn transform_all<S: AsRef<str>>(&self, corpus: &[S]) -> Vec<FeatureVector> {
        corpus.iter().map(|doc| self.transform(doc.as_ref())).collect()
    }

    /// Fit, then transform the same corpus
    pub fn fit_transform<S: AsRef<str>>(
        kind: VectorizerKind,
        corpus: &[S],
    ) -> Result<(Self, Vec<FeatureVector>)> {
        let vectorizer = Self::fit(kind, corpus)?;
        let features = vectorizer.transform_all(corpus);
        Ok((vectorizer, features))
    }

    pub fn kind(&self) -> VectorizerKind {
        self.kind
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn idf(&self) -> Option<&[f64]> {
        self.idf.as_deref()
    }

    /// Output dimension, fixed at fit time
    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    /// SHA-256 over the ordered vocabulary, identifying the feature layout
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for term in self.vocabulary.terms() {
            hasher.update(term.as_bytes());
            hasher.update([0u8]);
        }
        format!("{:x}", hasher.finalize())
    }

    /// Check internal consistency after deserialization
    pub fn validate(&self) -> Result<()> {
        if self.vocabulary.is_empty() {
            return Err(SpamError::Artifact("Vectorizer has an empty vocabulary".to_string()));
        }
        if self.vocabulary.index.len() != self.vocabulary.len() {
            return Err(SpamError::Artifact(
                "Vectorizer vocabulary contains duplicate terms".to_string(),
            ));
        }

        match (self.kind, &self.idf) {
            (VectorizerKind::Count, None) => Ok(()),
            (VectorizerKind::TfIdf, Some(idf)) if idf.len() == self.dimension() => Ok(()),
            (VectorizerKind::TfIdf, Some(idf)) => Err(SpamError::Artifact(format!(
                "idf has {} weights for {} terms",
                idf.len(),
                self.dimension()
            ))),
            (VectorizerKind::TfIdf, None) => {
                Err(SpamError::Artifact("TF-IDF vectorizer without idf weights".to_string()))
            }
            (VectorizerKind::Count, Some(_)) => {
                Err(SpamError::Artifact("Count vectorizer carries idf weights".to_string()))
            }
        }
    }
}
