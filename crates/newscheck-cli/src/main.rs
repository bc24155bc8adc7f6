//! newscheck: check an English-language news article against a pre-trained
//! fake/real classification model.

mod display;
mod prompt;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use newscheck_ai::NewsClassifier;
use newscheck_core::strip_dateline;

/// Classify a news article as fake or real using a pre-trained model.
#[derive(Parser)]
#[command(name = "newscheck", version, about)]
struct Cli {
    /// Directory containing model.onnx, tokenizer.json and an optional
    /// labels.json.
    #[arg(long, env = "NEWSCHECK_MODEL_DIR")]
    model_dir: PathBuf,

    /// Article text to classify. Reads interactively when omitted.
    text: Option<String>,

    /// Read the article from a file instead of the command line.
    #[arg(long, conflicts_with = "text")]
    file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("newscheck v{}", env!("CARGO_PKG_VERSION"));
    let cli = Cli::parse();

    // The artifact is loaded exactly once, before any input is accepted.
    // A failure here is blocking: there is nothing useful to do without a
    // model, and retrying would not help without operator intervention.
    let mut classifier = NewsClassifier::load(&cli.model_dir)
        .with_context(|| format!("loading model from {}", cli.model_dir.display()))?;
    eprintln!("Model ready.");

    match (cli.text, cli.file) {
        (Some(text), _) => classify_once(&mut classifier, &text),
        (None, Some(path)) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            classify_once(&mut classifier, &text)
        }
        (None, None) => prompt::run_loop(&mut classifier),
    }
}

fn classify_once(classifier: &mut NewsClassifier, text: &str) -> anyhow::Result<()> {
    if text.trim().is_empty() {
        anyhow::bail!("no text to classify; please provide an article");
    }
    let cleaned = strip_dateline(text);
    let prediction = classifier.classify(&cleaned).context("running inference")?;
    display::print_verdict_card(&prediction);
    Ok(())
}
