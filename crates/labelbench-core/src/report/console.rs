use crate::engine::EvalReport;

/// Format an accuracy in [0, 1] as a percentage with two decimals.
#[must_use]
pub fn format_percent(accuracy: f64) -> String {
    format!("{:.2}%", accuracy * 100.0)
}

/// The three-line block printed after each evaluated classifier.
#[must_use]
pub fn format_report(report: &EvalReport) -> String {
    let mut out = format!(
        "→ {}\n   • Accuracy: {}\n   • Time elapsed: {:.1}s\n",
        report.name,
        format_percent(report.accuracy),
        report.elapsed_secs()
    );
    if report.failed > 0 {
        out.push_str(&format!(
            "   • Failed calls: {} of {} (counted as incorrect)\n",
            report.failed, report.total
        ));
    }
    out
}

pub fn print_report(report: &EvalReport) {
    println!("{}", format_report(report));
}

/// Side-by-side summary of every evaluated variant.
#[must_use]
pub fn format_summary(reports: &[EvalReport], optimization_secs: Option<f64>) -> String {
    let rule = "=".repeat(50);
    let mut out = format!("{}\nSUMMARY:\n", rule);
    for report in reports {
        out.push_str(&format!(
            "• {} accuracy: {}\n",
            report.name,
            format_percent(report.accuracy)
        ));
    }
    if let Some(secs) = optimization_secs {
        out.push_str(&format!("• Optimization time: {:.1}s\n", secs));
    }
    out
}
