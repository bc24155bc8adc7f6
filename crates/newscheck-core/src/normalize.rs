//! Dateline normalisation for submitted news text.
//!
//! Wire-service articles open with a "CITY (Source) - " dateline. The
//! classification artifact was trained on text with that prefix already
//! removed, so leaving it in place would shift the feature distribution.
//! The pattern is a heuristic inherited from the training-time
//! preprocessing: it may over-strip (any early parenthesis-dash sequence
//! matches) or under-strip (non-standard formats pass through). Both are
//! intentional — the downstream model saw exactly this behaviour.

use std::sync::LazyLock;

use regex::Regex;

/// Matches "WASHINGTON (Reuters) - " and similar at the start of a document.
static DATELINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*?\s*\(.*?\)\s*-\s*").unwrap());

/// Strip a leading wire-service dateline, then trim surrounding whitespace.
///
/// Input with no dateline passes through unchanged apart from trimming.
/// A document that consists entirely of a dateline-shaped prefix
/// normalises to the empty string; that is accepted, not an error.
pub fn strip_dateline(text: &str) -> String {
    DATELINE.replace(text, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_standard_dateline() {
        assert_eq!(
            strip_dateline("WASHINGTON (Reuters) - The president signed a bill today."),
            "The president signed a bill today."
        );
    }

    #[test]
    fn no_dateline_passes_through_trimmed() {
        assert_eq!(
            strip_dateline("Scientists discover new exoplanet."),
            "Scientists discover new exoplanet."
        );
        assert_eq!(
            strip_dateline("  Scientists discover new exoplanet.  "),
            "Scientists discover new exoplanet."
        );
    }

    #[test]
    fn empty_string_yields_empty_string() {
        assert_eq!(strip_dateline(""), "");
    }

    #[test]
    fn whitespace_only_yields_empty_string() {
        assert_eq!(strip_dateline("   "), "");
    }

    #[test]
    fn entire_string_may_match() {
        // Malformed input consisting only of a dateline shape normalises
        // to empty; accepted behaviour.
        assert_eq!(strip_dateline("LONDON (AP) - "), "");
    }

    #[test]
    fn non_greedy_stops_at_first_close_dash() {
        assert_eq!(
            strip_dateline("NEW YORK (AFP) - Markets (finally) - some said - rallied."),
            "Markets (finally) - some said - rallied."
        );
    }

    #[test]
    fn parenthesis_without_dash_is_untouched() {
        let text = "The committee (formed in 2019) approved the measure.";
        assert_eq!(strip_dateline(text), text);
    }

    #[test]
    fn over_strips_early_parenthesis_dash() {
        // Inherited heuristic: any early "(...)" followed by a dash is
        // treated as a dateline, even mid-sentence.
        assert_eq!(
            strip_dateline("The senator (a Democrat) - her third term - spoke."),
            "her third term - spoke."
        );
    }

    #[test]
    fn multibyte_source_names() {
        assert_eq!(
            strip_dateline("SÃO PAULO (Agência Brasil) - Officials confirmed the plan."),
            "Officials confirmed the plan."
        );
    }

    #[test]
    fn stable_on_already_cleaned_text() {
        // Not a contract, but the usual case: cleaned text without a
        // parenthesis-dash prefix is left alone by a second pass.
        let once = strip_dateline("MOSCOW (Reuters) - Talks resumed on Monday.");
        assert_eq!(strip_dateline(&once), once);
    }
}
