//! Classification metrics, spam as the positive class

use serde::Serialize;
use std::fmt;

use crate::model::Label;

/// Held-out evaluation of one classifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub accuracy: f64,
    /// Share of spam predictions that are spam; 0 when nothing was flagged
    pub precision: f64,
    /// Share of spam that was flagged; 0 when there is no spam
    pub recall: f64,
    /// `[[tn, fp], [fn, tp]]`
    pub confusion: [[usize; 2]; 2],
}

impl Evaluation {
    pub fn true_negatives(&self) -> usize {
        self.confusion[0][0]
    }

    pub fn false_positives(&self) -> usize {
        self.confusion[0][1]
    }

    pub fn false_negatives(&self) -> usize {
        self.confusion[1][0]
    }

    pub fn true_positives(&self) -> usize {
        self.confusion[1][1]
    }

    pub fn total(&self) -> usize {
        self.confusion.iter().flatten().sum()
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "accuracy:  {:.4}", self.accuracy)?;
        writeln!(f, "precision: {:.4}", self.precision)?;
        writeln!(f, "recall:    {:.4}", self.recall)?;
        writeln!(f, "confusion matrix (rows: actual ham/spam, cols: predicted ham/spam)")?;
        writeln!(f, "  {:>6} {:>6}", self.confusion[0][0], self.confusion[0][1])?;
        write!(f, "  {:>6} {:>6}", self.confusion[1][0], self.confusion[1][1])
    }
}

/// Compare predictions against the truth
///
/// Both slices must have the same length.
pub fn evaluate(truth: &[Label], predicted: &[Label]) -> Evaluation {
    debug_assert_eq!(truth.len(), predicted.len());

    let mut confusion = [[0usize; 2]; 2];
    for (actual, guess) in truth.iter().zip(predicted) {
        confusion[actual.index()][guess.index()] += 1;
    }

    let ratio = |num: usize, den: usize| if den == 0 { 0.0 } else { num as f64 / den as f64 };

    let tp = confusion[1][1];
    let correct = confusion[0][0] + tp;
    let total: usize = confusion.iter().flatten().sum();

    Evaluation {
        accuracy: ratio(correct, total),
        precision: ratio(tp, tp + confusion[0][1]),
        recall: ratio(tp, tp + confusion[1][0]),
        confusion,
    }
}
