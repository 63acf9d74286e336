//! Offline training tool for spam-rs
//!
//! Produces the vectorizer/model artifact pair the server loads, and offers
//! a few commands for looking at the dataset and the models.
//!
//! # Usage
//!
//! ```bash
//! # Fit the production pair and write the artifacts
//! spam-train train data/spam.csv
//!
//! # Compare every model under both weighting policies
//! spam-train evaluate data/spam.csv
//!
//! # Class balance, text statistics and frequent words
//! spam-train explore data/spam.csv --top 20
//!
//! # Classify a message with the saved artifacts
//! spam-train classify "WINNER!! Claim your prize now"
//! ```

use clap::{Parser, Subcommand};
use spam_rs::model::{Label, LabeledMessage, ModelKind, VectorizerKind};
use spam_rs::text::Normalizer;
use spam_rs::training::{self, explore, split, Corpus, TrainOptions};
use spam_rs::{logging, Config, SpamService};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "spam-train")]
#[command(about = "Train and inspect the SMS spam classifier", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (TOML); artifact locations default to its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train on a labeled CSV and write the artifact pair
    Train {
        /// Dataset with columns v1 (ham/spam) and v2 (message)
        data: PathBuf,
        /// Weighting policy (count, tfidf)
        #[arg(long, default_value = "tfidf")]
        vectorizer: VectorizerKind,
        /// Event model (multinomial, bernoulli, gaussian)
        #[arg(long, default_value = "multinomial")]
        model: ModelKind,
        /// Share of rows held out for evaluation
        #[arg(long, default_value_t = split::DEFAULT_TEST_RATIO)]
        test_ratio: f64,
        /// Shuffle seed for the held-out split
        #[arg(long, default_value_t = split::DEFAULT_SEED)]
        seed: u64,
        /// Override the configured vectorizer output path
        #[arg(long)]
        vectorizer_out: Option<PathBuf>,
        /// Override the configured model output path
        #[arg(long)]
        model_out: Option<PathBuf>,
    },
    /// Compare all models under both weighting policies
    Evaluate {
        data: PathBuf,
        #[arg(long, default_value_t = split::DEFAULT_TEST_RATIO)]
        test_ratio: f64,
        #[arg(long, default_value_t = split::DEFAULT_SEED)]
        seed: u64,
    },
    /// Print class balance, text statistics and frequent words
    Explore {
        data: PathBuf,
        /// Number of frequent words per class
        #[arg(long, default_value_t = explore::DEFAULT_TOP_WORDS)]
        top: usize,
    },
    /// Classify one message with the saved artifacts
    Classify {
        message: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    logging::init(&config.logging)?;

    match cli.command {
        Commands::Train {
            data,
            vectorizer,
            model,
            test_ratio,
            seed,
            vectorizer_out,
            model_out,
        } => {
            let corpus = load_corpus(&data)?.1;
            let options = TrainOptions {
                vectorizer,
                model,
                test_ratio,
                seed,
            };

            let report = training::train(&corpus, &options)?;

            let vectorizer_path = vectorizer_out.unwrap_or(config.artifacts.vectorizer_path);
            let model_path = model_out.unwrap_or(config.artifacts.model_path);
            report.artifacts.save(&vectorizer_path, &model_path)?;

            println!(
                "Trained {} over {} on {} rows ({} held out)",
                model, vectorizer, report.train_rows, report.test_rows
            );
            println!("{}", report.evaluation);
            println!("Vocabulary size: {}", report.artifacts.vectorizer.dimension());
            println!("✓ Vectorizer written to {}", vectorizer_path.display());
            println!("✓ Model written to {}", model_path.display());
        }
        Commands::Evaluate {
            data,
            test_ratio,
            seed,
        } => {
            let corpus = load_corpus(&data)?.1;
            let results = training::compare_models(&corpus, test_ratio, seed)?;

            println!(
                "{:<12} {:<12} {:>9} {:>9} {:>9}",
                "vectorizer", "model", "precision", "accuracy", "recall"
            );
            for row in &results {
                println!(
                    "{:<12} {:<12} {:>9.4} {:>9.4} {:>9.4}",
                    row.vectorizer.to_string(),
                    row.model.to_string(),
                    row.evaluation.precision,
                    row.evaluation.accuracy,
                    row.evaluation.recall
                );
            }
        }
        Commands::Explore { data, top } => {
            let (messages, corpus) = load_corpus(&data)?;
            print_exploration(&messages, &corpus, top);
        }
        Commands::Classify { message } => {
            let service = SpamService::load(&config.artifacts)?;
            let prediction = service.check(&message)?;
            println!("Prediction: {}", prediction.label);
        }
    }

    Ok(())
}

fn load_corpus(path: &Path) -> anyhow::Result<(Vec<LabeledMessage>, Corpus)> {
    let records = training::load_csv(path)?;
    let messages = training::clean(records)?;
    let corpus = training::normalize_corpus(&Normalizer::new(), &messages);
    info!(rows = corpus.len(), "Corpus ready");
    Ok((messages, corpus))
}

fn print_exploration(messages: &[LabeledMessage], corpus: &Corpus, top: usize) {
    let balance = explore::class_balance(messages);
    println!("Messages: {}", balance.total());
    println!("  ham:  {:>6} ({:.2}%)", balance.ham, balance.ham_percent());
    println!("  spam: {:>6} ({:.2}%)", balance.spam, balance.spam_percent());

    let sections = [
        ("all", None),
        ("ham", Some(Label::Ham)),
        ("spam", Some(Label::Spam)),
    ];
    for (name, label) in sections {
        let summary = explore::text_summary(messages, label);
        println!();
        println!("Text statistics ({})", name);
        println!("  characters  {}", summary.characters);
        println!("  words       {}", summary.words);
        println!("  sentences   {}", summary.sentences);
    }

    for (name, label) in [("spam", Label::Spam), ("ham", Label::Ham)] {
        println!();
        println!("Most common words ({})", name);
        for (word, count) in explore::most_common_words(corpus, label, top) {
            println!("  {:<16} {}", word, count);
        }
    }
}
