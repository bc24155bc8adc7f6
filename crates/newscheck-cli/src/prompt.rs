//! Interactive prompt loop: paste an article, blank line to classify.

use std::io::{self, BufRead};

use newscheck_ai::NewsClassifier;
use newscheck_core::strip_dateline;

use crate::display;

/// Serve documents from stdin until EOF.
///
/// Empty or whitespace-only submissions are rejected with a prompt and
/// never reach the gateway. A per-request inference failure is reported
/// and the loop keeps serving.
pub fn run_loop(classifier: &mut NewsClassifier) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        eprintln!();
        eprintln!("Paste an article, finish with a blank line (Ctrl-D to exit):");
        let Some(document) = read_document(&mut lines)? else {
            break;
        };

        if document.trim().is_empty() {
            eprintln!("Please enter some text to check.");
            continue;
        }

        let cleaned = strip_dateline(&document);
        eprintln!("Analyzing...");
        match classifier.classify(&cleaned) {
            Ok(prediction) => display::print_verdict_card(&prediction),
            Err(err) => eprintln!("inference failed: {err}"),
        }
    }

    Ok(())
}

/// Read one document: lines up to a blank line. Returns `None` on EOF
/// before any line was read.
fn read_document(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> anyhow::Result<Option<String>> {
    let mut document = String::new();
    let mut saw_line = false;

    for line in lines {
        let line = line?;
        saw_line = true;
        if line.trim().is_empty() {
            break;
        }
        document.push_str(&line);
        document.push('\n');
    }

    if !saw_line {
        return Ok(None);
    }
    Ok(Some(document))
}
