//! Terminal output formatting with colors and box drawing.

use colored::Colorize;

use crate::basis::BasisKind;
use crate::prediction::ModelComparison;
use crate::result::FitResult;

/// |t| above which a coefficient is highlighted as significant.
const T_SIGNIFICANT: f64 = 2.0;

/// Format a FitResult for human-readable terminal output.
///
/// Prints the fit statistics followed by one line per coefficient with its
/// standard error and t value. The intercept is labelled `const`.
pub fn format_fit(result: &FitResult) -> String {
    let mut output = String::new();
    let sep = "\u{2500}".repeat(62);

    output.push_str(&format!("leakage-model: {}\n", result.family));
    output.push_str(&sep);
    output.push('\n');
    output.push('\n');

    let q = &result.quality;
    output.push_str(&format!(
        "  Observations: {}    Parameters: {}    Df residuals: {}\n",
        q.n_observations, q.n_parameters, q.df_resid
    ));
    output.push_str(&format!("  R\u{b2}:           {}\n", format_optional(q.r_squared)));
    output.push_str(&format!(
        "  Adj. R\u{b2}:      {}\n",
        format_optional(q.adj_r_squared)
    ));
    output.push_str(&format!("  RSS:          {:.6e}\n", q.residual_sum_of_squares));
    output.push('\n');

    output.push_str(&format!(
        "  {:<8} {:>14} {:>14} {:>10}\n",
        "term", "coef", "std err", "t"
    ));
    let t_values = result.t_values();
    for (i, ((coef, se), t)) in result
        .coefficients
        .iter()
        .zip(&q.std_errors)
        .zip(&t_values)
        .enumerate()
    {
        let label = term_label(result, i);
        let t_str = format!("{:>10.3}", t);
        let t_str = if t.abs() >= T_SIGNIFICANT {
            t_str.green().to_string()
        } else {
            t_str.dimmed().to_string()
        };
        output.push_str(&format!(
            "  {:<8} {:>14.6} {:>14.6} {}\n",
            label, coef, se, t_str
        ));
    }

    output.push('\n');
    output.push_str(&sep);
    output.push('\n');
    output
}

/// Format a model comparison as a single line.
pub fn format_comparison(comparison: &ModelComparison) -> String {
    let r = comparison.correlation;
    let r_str = format!("{:.6}", r);
    let r_str = if r.abs() >= 0.9 {
        r_str.green().bold().to_string()
    } else if r.abs() >= 0.5 {
        r_str.yellow().to_string()
    } else {
        r_str.red().to_string()
    };
    format!(
        "Correlation ({} vs {}): {}\n",
        comparison.first_label, comparison.second_label, r_str
    )
}

/// Column label: bit index, `hw`, parity mask, or `const`.
fn term_label(result: &FitResult, column: usize) -> String {
    if result.has_intercept && column + 1 == result.coefficients.len() {
        return "const".to_string();
    }
    match result.family {
        BasisKind::SingleBit { .. } => format!("x{}", column),
        BasisKind::HammingWeight => "hw".to_string(),
        BasisKind::FullParity => format!("m{:#04x}", column + 1),
    }
}

fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => "undefined".yellow().to_string(),
    }
}
