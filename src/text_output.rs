//! Plain-text report rendering.
//!
//! Formatting only; every number comes straight out of the [`Report`].
//! Scalars are shown to four decimals, percentages to two, matching how the
//! validation protocols quote them.

use std::fmt;

use crate::report::Report;

/// Renders the report for terminals and log files.
pub fn render(report: &Report) -> String {
    Text(report).to_string()
}

struct Text<'a>(&'a Report);

impl fmt::Display for Text<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        let eq = &r.equivalence;
        let ag = &r.agreement;

        writeln!(f, "ZMB / INF3 buffer protocol comparison")?;
        writeln!(f, "mode: {}", r.mode)?;
        writeln!(
            f,
            "records: {} ZMB, {} INF3; matched pairs: {}",
            r.n_zmb_records, r.n_inf3_records, r.n_pairs
        )?;
        writeln!(f)?;

        let level = r.confidence * 100.0;
        writeln!(f, "Equivalence ({level:.0}% CI on the geometric mean ratio)")?;
        writeln!(f, "  ratio ZMB/INF3     {:.4}", eq.ratio)?;
        writeln!(f, "  confidence interval [{:.4}, {:.4}]", eq.ci_lower, eq.ci_upper)?;
        writeln!(
            f,
            "  acceptance band     [{:.2}, {:.2}]",
            r.ratio_band.lower, r.ratio_band.upper
        )?;
        let verdict = if eq.is_equivalent {
            "EQUIVALENT"
        } else {
            "NOT EQUIVALENT"
        };
        writeln!(f, "  verdict             {verdict}")?;
        writeln!(f)?;

        writeln!(f, "Agreement")?;
        writeln!(f, "  Lin's CCC           {:.4}", ag.ccc)?;
        writeln!(f, "  Pearson r           {:.4}", ag.pearson_r)?;
        writeln!(
            f,
            "  fit INF3 on ZMB     slope {:.4}, intercept {:.4}",
            ag.slope, ag.intercept
        )?;
        writeln!(f, "  bias                {:+.2} %", ag.bias_pct)?;
        writeln!(
            f,
            "  95% limits          [{:+.2} %, {:+.2} %]",
            ag.loa_lower_pct, ag.loa_upper_pct
        )?;
        writeln!(
            f,
            "  indifference band   [{:+.0} %, {:+.0} %]",
            r.difference_band.lower_pct, r.difference_band.upper_pct
        )?;
        writeln!(f)?;

        writeln!(f, "Matched pairs")?;
        writeln!(
            f,
            "  {:<12} {:<16} {:>3} {:>12} {:>12} {:>8}",
            "batch", "group", "rep", "ZMB", "INF3", "diff %"
        )?;
        for (pair, diff) in r.pairs.iter().zip(&r.series.diff_pct) {
            writeln!(
                f,
                "  {:<12} {:<16} {:>3} {:>12.2} {:>12.2} {:>+8.2}",
                pair.batch_id,
                pair.sample_group,
                pair.replicate,
                pair.zmb_value,
                pair.inf3_value,
                diff
            )?;
        }
        Ok(())
    }
}
