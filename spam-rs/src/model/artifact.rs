//! Trained artifact pair persistence
//!
//! The vectorizer and the classifier are written to two separate JSON files.
//! The model file records the fingerprint and dimension of the vectorizer it
//! was trained against, so a classifier is never served with a different
//! vocabulary. Floats are written and parsed with exact round-tripping.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

use super::naive_bayes::{Classifier, NaiveBayes};
use super::vectorizer::Vectorizer;
use crate::error::{Result, SpamError};

const VECTORIZER_FORMAT: &str = "spam-rs/vectorizer/v1";
const MODEL_FORMAT: &str = "spam-rs/model/v1";

#[derive(Serialize, Deserialize)]
struct VectorizerFile {
    format: String,
    vectorizer: Vectorizer,
}

#[derive(Serialize, Deserialize)]
struct ModelFile {
    format: String,
    vectorizer_fingerprint: String,
    n_features: usize,
    classifier: NaiveBayes,
}

/// Vectorizer state and classifier state, produced and deployed together
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactPair {
    pub vectorizer: Vectorizer,
    pub classifier: NaiveBayes,
}

impl ArtifactPair {
    /// Pair a vectorizer with a classifier trained on its output
    pub fn new(vectorizer: Vectorizer, classifier: NaiveBayes) -> Result<Self> {
        if vectorizer.dimension() != classifier.n_features() {
            return Err(SpamError::Artifact(format!(
                "Classifier expects {} features but the vectorizer produces {}",
                classifier.n_features(),
                vectorizer.dimension()
            )));
        }
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Write both artifacts, creating parent directories as needed
    pub fn save<P: AsRef<Path>, Q: AsRef<Path>>(&self, vectorizer_path: P, model_path: Q) -> Result<()> {
        let vectorizer_path = vectorizer_path.as_ref();
        let model_path = model_path.as_ref();

        write_json(
            vectorizer_path,
            &VectorizerFile {
                format: VECTORIZER_FORMAT.to_string(),
                vectorizer: self.vectorizer.clone(),
            },
        )?;

        write_json(
            model_path,
            &ModelFile {
                format: MODEL_FORMAT.to_string(),
                vectorizer_fingerprint: self.vectorizer.fingerprint(),
                n_features: self.classifier.n_features(),
                classifier: self.classifier.clone(),
            },
        )?;

        info!(
            vectorizer = %vectorizer_path.display(),
            model = %model_path.display(),
            vocabulary = self.vectorizer.dimension(),
            "Artifacts saved"
        );
        Ok(())
    }

    /// Load and cross-check both artifacts
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(vectorizer_path: P, model_path: Q) -> Result<Self> {
        let vectorizer_path = vectorizer_path.as_ref();
        let model_path = model_path.as_ref();

        let vectorizer_file: VectorizerFile = read_json(vectorizer_path)?;
        if vectorizer_file.format != VECTORIZER_FORMAT {
            return Err(SpamError::Artifact(format!(
                "{}: unsupported vectorizer format '{}'",
                vectorizer_path.display(),
                vectorizer_file.format
            )));
        }
        let vectorizer = vectorizer_file.vectorizer;
        vectorizer.validate()?;

        let model_file: ModelFile = read_json(model_path)?;
        if model_file.format != MODEL_FORMAT {
            return Err(SpamError::Artifact(format!(
                "{}: unsupported model format '{}'",
                model_path.display(),
                model_file.format
            )));
        }
        model_file.classifier.validate()?;

        if model_file.vectorizer_fingerprint != vectorizer.fingerprint()
            || model_file.n_features != vectorizer.dimension()
        {
            return Err(SpamError::Artifact(format!(
                "{} was not trained with the vocabulary in {}; regenerate both together",
                model_path.display(),
                vectorizer_path.display()
            )));
        }

        debug!(
            kind = %vectorizer.kind(),
            model = %model_file.classifier.kind(),
            "Artifact pair verified"
        );

        Self::new(vectorizer, model_file.classifier)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| {
        SpamError::Artifact(format!("Cannot open {}: {}", path.display(), e))
    })?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| SpamError::Artifact(format!("Cannot parse {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::naive_bayes::ModelKind;
    use crate::model::types::Label;
    use crate::model::vectorizer::VectorizerKind;
    use tempfile::tempdir;

    fn trained_pair(corpus: &[&str]) -> ArtifactPair {
        let labels: Vec<Label> = (0..corpus.len())
            .map(|i| if i % 2 == 0 { Label::Spam } else { Label::Ham })
            .collect();
        let (vectorizer, features) = Vectorizer::fit_transform(VectorizerKind::TfIdf, corpus).unwrap();
        let classifier = NaiveBayes::fit(ModelKind::Multinomial, &features, &labels).unwrap();
        ArtifactPair::new(vectorizer, classifier).unwrap()
    }

    #[test]
    fn test_save_and_load_is_exact() {
        let dir = tempdir().unwrap();
        let vectorizer_path = dir.path().join("nested/vectorizer.json");
        let model_path = dir.path().join("nested/model.json");

        let pair = trained_pair(&["free prize txt", "see you lunch", "win cash call", "ok lar"]);
        pair.save(&vectorizer_path, &model_path).unwrap();

        let loaded = ArtifactPair::load(&vectorizer_path, &model_path).unwrap();
        assert_eq!(loaded, pair);
        assert_eq!(
            loaded.vectorizer.vocabulary().terms(),
            pair.vectorizer.vocabulary().terms()
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = ArtifactPair::load(dir.path().join("nope.json"), dir.path().join("model.json"));
        assert!(matches!(result, Err(SpamError::Artifact(_))));
    }

    #[test]
    fn test_load_rejects_mismatched_pair() {
        let dir = tempdir().unwrap();
        let first = trained_pair(&["free prize txt", "see you lunch"]);
        let second = trained_pair(&["win cash call", "ok lar wif"]);

        first
            .save(dir.path().join("v1.json"), dir.path().join("m1.json"))
            .unwrap();
        second
            .save(dir.path().join("v2.json"), dir.path().join("m2.json"))
            .unwrap();

        let result = ArtifactPair::load(dir.path().join("v1.json"), dir.path().join("m2.json"));
        assert!(matches!(result, Err(SpamError::Artifact(_))));
    }

    #[test]
    fn test_load_rejects_corrupt_file() {
        let dir = tempdir().unwrap();
        let pair = trained_pair(&["free prize txt", "see you lunch"]);
        let vectorizer_path = dir.path().join("vectorizer.json");
        let model_path = dir.path().join("model.json");
        pair.save(&vectorizer_path, &model_path).unwrap();

        std::fs::write(&model_path, b"{\"format\": \"spam-rs/model/v1\"").unwrap();
        assert!(ArtifactPair::load(&vectorizer_path, &model_path).is_err());
    }

    #[test]
    fn test_new_rejects_dimension_mismatch() {
        let small = trained_pair(&["free prize", "lunch"]);
        let large = trained_pair(&["free prize txt", "see you lunch"]);
        assert!(ArtifactPair::new(small.vectorizer, large.classifier).is_err());
    }
}
