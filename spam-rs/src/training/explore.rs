//! Dataset exploration: text statistics, class balance, frequent words

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use super::pipeline::Corpus;
use crate::model::{Label, LabeledMessage};
use crate::text::{split_sentences, tokenize_words};

/// Number of frequent words reported by default
pub const DEFAULT_TOP_WORDS: usize = 40;

/// Size measures of a raw message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextStats {
    pub characters: usize,
    pub words: usize,
    pub sentences: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        Self {
            characters: text.chars().count(),
            words: tokenize_words(text).len(),
            sentences: split_sentences(text).len(),
        }
    }
}

/// Descriptive statistics of a sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; NaN below two values
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "count {:>6}  mean {:>8.2}  std {:>8.2}  min {:>6.0}  25% {:>6.0}  50% {:>6.0}  75% {:>6.0}  max {:>6.0}",
            self.count, self.mean, self.std, self.min, self.p25, self.p50, self.p75, self.max
        )
    }
}

/// Summarize a sample; every statistic but `count` is NaN when it is empty
pub fn describe(values: &[f64]) -> Summary {
    let count = values.len();
    if count == 0 {
        return Summary {
            count,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            p25: f64::NAN,
            p50: f64::NAN,
            p75: f64::NAN,
            max: f64::NAN,
        };
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = count as f64;
    let mean = sorted.iter().sum::<f64>() / n;
    let std = if count < 2 {
        f64::NAN
    } else {
        (sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
    };

    Summary {
        count,
        mean,
        std,
        min: sorted[0],
        p25: percentile(&sorted, 0.25),
        p50: percentile(&sorted, 0.50),
        p75: percentile(&sorted, 0.75),
        max: sorted[count - 1],
    }
}

/// Linear interpolation between closest ranks of a sorted, non-empty sample
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Per-measure summaries over a set of messages
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextSummary {
    pub characters: Summary,
    pub words: Summary,
    pub sentences: Summary,
}

/// Summarize text statistics, optionally for a single class
pub fn text_summary(messages: &[LabeledMessage], label: Option<Label>) -> TextSummary {
    let stats: Vec<TextStats> = messages
        .iter()
        .filter(|m| label.map_or(true, |l| m.label == l))
        .map(|m| TextStats::of(&m.text))
        .collect();

    let column = |f: fn(&TextStats) -> usize| -> Vec<f64> {
        stats.iter().map(|s| f(s) as f64).collect()
    };

    TextSummary {
        characters: describe(&column(|s: &TextStats| s.characters)),
        words: describe(&column(|s: &TextStats| s.words)),
        sentences: describe(&column(|s: &TextStats| s.sentences)),
    }
}

/// Message count and share per class
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassBalance {
    pub ham: usize,
    pub spam: usize,
}

impl ClassBalance {
    pub fn total(&self) -> usize {
        self.ham + self.spam
    }

    /// Percentage of spam, 0 for an empty dataset
    pub fn spam_percent(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            100.0 * self.spam as f64 / self.total() as f64
        }
    }

    pub fn ham_percent(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            100.0 - self.spam_percent()
        }
    }
}

pub fn class_balance(messages: &[LabeledMessage]) -> ClassBalance {
    let spam = messages.iter().filter(|m| m.label.is_spam()).count();
    ClassBalance {
        ham: messages.len() - spam,
        spam,
    }
}

/// Most frequent normalized tokens of one class
///
/// Ordered by count, highest first; equal counts keep first-seen order.
pub fn most_common_words(corpus: &Corpus, label: Label, n: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for text in corpus.texts_for(label) {
        for word in text.split_whitespace() {
            let count = counts.entry(word).or_insert(0);
            if *count == 0 {
                order.push(word);
            }
            *count += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|word| (word.to_string(), counts[word]))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}
