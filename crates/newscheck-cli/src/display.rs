//! Vertical result card for one classified article.

use newscheck_core::Prediction;

/// Print the verdict banner, confidence, probability breakdown and caption.
pub fn print_verdict_card(prediction: &Prediction) {
    println!();
    println!("=== {} ===", prediction.verdict.banner());
    println!(
        "  {:<14} {}",
        "confidence",
        format_confidence(prediction.confidence())
    );
    println!(
        "  {:<14} fake {:.4} / real {:.4}",
        "probability", prediction.p_fake, prediction.p_real
    );
    println!();
    println!("{}", prediction.verdict.caption());
}

/// Render a probability as a two-decimal percentage.
fn format_confidence(p: f32) -> String {
    format!("{:.2}%", p * 100.0)
}
