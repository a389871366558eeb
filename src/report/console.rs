//! Run summary for the terminal, coloured when the output is one.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

use crate::models::{RunSummary, TestResult, TestStatus, test_id};
use crate::theme;

/// Print one line per result followed by the totals.
///
/// Colour escapes are only written when `color` is set, so piped output stays plain.
pub fn print_summary(
    out: &mut impl Write,
    results: &[TestResult],
    summary: &RunSummary,
    color: bool,
) -> io::Result<()> {
    for (position, result) in (1..).zip(results) {
        let status = result.status;
        paint(out, color, status.color())?;
        queue!(out, Print(format!(" {} ", status.icon())))?;
        paint(out, color, theme::BLUE)?;
        queue!(out, Print(format!("{} ", test_id(position))))?;
        paint(out, color, theme::TEXT)?;
        queue!(out, Print(&result.description))?;
        paint(out, color, status.color())?;
        queue!(out, Print(format!("  {}\n", status.label())))?;

        if status != TestStatus::Passed
            && let Some(first) = result.actual_result.lines().next()
        {
            paint(out, color, theme::OVERLAY0)?;
            queue!(out, Print(format!("     {}\n", first)))?;
        }
    }

    paint(out, color, theme::MAUVE)?;
    queue!(
        out,
        Print(format!(
            "{}  ({:.1}s)\n",
            summary.headline(),
            summary.duration_ms as f64 / 1000.0
        ))
    )?;
    if color {
        queue!(out, ResetColor)?;
    }
    out.flush()
}

fn paint(out: &mut impl Write, enabled: bool, color: Color) -> io::Result<()> {
    if enabled {
        queue!(out, SetForegroundColor(color))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_with(results: &[TestResult], color: bool) -> String {
        let mut buf = Vec::new();
        let summary = RunSummary::from_results(results);
        print_summary(&mut buf, results, &summary, color).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn render(results: &[TestResult]) -> String {
        render_with(results, true)
    }

    #[test]
    fn lists_each_test_and_totals() {
        let results = vec![
            TestResult {
                description: "Valid login".into(),
                status: TestStatus::Passed,
                passed: true,
                actual_result: "Login successful\n".into(),
                ..TestResult::default()
            },
            TestResult {
                description: "Invalid password".into(),
                status: TestStatus::Failed,
                actual_result: "assertion failed: `body`\nmore\n".into(),
                ..TestResult::default()
            },
        ];

        let text = render(&results);
        assert!(text.contains("TC001 "));
        assert!(text.contains("Valid login"));
        assert!(text.contains("TC002 "));
        assert!(text.contains("assertion failed: `body`"));
        assert!(!text.contains("more"));
        assert!(!text.contains("Login successful"));
        assert!(text.contains("Total: 2, Passed: 1, Failed: 1"));
    }

    #[test]
    fn empty_run_prints_zero_totals() {
        assert!(render(&[]).contains("Total: 0, Passed: 0, Failed: 0"));
    }

    #[test]
    fn plain_output_has_no_escape_codes() {
        let results = vec![TestResult {
            description: "XSS Protection".into(),
            status: TestStatus::Error,
            actual_result: "Unexpected error: boom\n".into(),
            ..TestResult::default()
        }];

        let plain = render_with(&results, false);
        assert!(!plain.contains('\x1b'), "{plain:?}");
        assert!(plain.contains("TC001 XSS Protection  Error"));
        assert!(plain.contains("     Unexpected error: boom"));

        assert!(render_with(&results, true).contains('\x1b'));
    }
}
