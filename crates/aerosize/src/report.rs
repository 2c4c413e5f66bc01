//! Console formatting for sizing and cost results.

use std::fmt;

use crate::cost::CostEstimate;
use crate::sizing::SizingOutcome;

/// `value` with exactly `decimals` fractional digits.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Whole dollars with comma thousands separators, e.g. `$2,484,127,597`.
/// Negative amounts render as `$-1,234`.
pub fn format_usd(value: f64) -> String {
    let rounded = format!("{value:.0}");
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        // inf / NaN
        return format!("${rounded}");
    }
    format!("${sign}{}", group_thousands(digits))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Full sizing + cost report in the fixed console layout.
pub struct SizingReport<'a> {
    pub sizing: &'a SizingOutcome,
    pub costs: &'a CostEstimate,
}

impl<'a> SizingReport<'a> {
    pub fn new(sizing: &'a SizingOutcome, costs: &'a CostEstimate) -> Self {
        Self { sizing, costs }
    }
}

impl fmt::Display for SizingReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = &self.sizing.weights;
        let c = self.costs;
        if let Some(iteration) = self.sizing.converged_at {
            writeln!(f, "Converged at iteration {iteration}")?;
        }
        writeln!(f)?;
        writeln!(f, "Final Takeoff Gross Weight: {:.2} lbs", w.gross)?;
        writeln!(f, "Empty Weight Fraction: {:.4}", w.empty_fraction)?;
        writeln!(f, "Empty Weight: {:.2} lbs", w.empty)?;
        writeln!(f, "Landing Weight: {:.2} lbs", w.landing)?;
        writeln!(f, "Total Fuel Weight: {:.2} lbs", w.fuel_total)?;
        writeln!(f, "Used Fuel Weight: {:.2} lbs", w.fuel_used)?;
        writeln!(f, "Reserve Fuel Weight: {:.2} lbs", w.fuel_reserve)?;

        writeln!(f)?;
        writeln!(f, "--- Cost Estimates ---")?;
        writeln!(f, "Engineering Cost: {}", format_usd(c.engineering))?;
        writeln!(
            f,
            "Development Support Cost: {}",
            format_usd(c.development_support)
        )?;
        writeln!(f, "Flight Test Cost: {}", format_usd(c.flight_test))?;
        writeln!(f, "RDT&E Total: {}", format_usd(c.rdte))?;
        writeln!(f)?;
        writeln!(f, "Tooling Cost: {}", format_usd(c.tooling))?;
        writeln!(f, "Manufacturing Cost: {}", format_usd(c.manufacturing))?;
        writeln!(f)?;
        writeln!(f, "Total Program Cost: {}", format_usd(c.total))?;
        writeln!(f, "Unit Production Cost: {}", format_usd(c.unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::{estimate_costs, CostInputs};
    use crate::sizing::{size_aircraft, SizingCfg, SizingInputs};

    #[test]
    fn usd_groups_thousands() {
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(999.0), "$999");
        assert_eq!(format_usd(1_000.0), "$1,000");
        assert_eq!(format_usd(300_558.613_951_636_1), "$300,559");
        assert_eq!(format_usd(2_484_127_596.945_822), "$2,484,127,597");
        assert_eq!(format_usd(-1_234.4), "$-1,234");
        assert_eq!(format_usd(f64::INFINITY), "$inf");
    }

    #[test]
    fn fixed_precision() {
        assert_eq!(format_fixed(0.51, 4), "0.5100");
        assert_eq!(format_fixed(85_004.510_756_441_61, 2), "85004.51");
        assert_eq!(format_fixed(2.0, 0), "2");
    }

    #[test]
    fn reference_fighter_report_text() {
        let sizing = size_aircraft(&SizingInputs::fighter(), &SizingCfg::default()).unwrap();
        let costs = estimate_costs(&CostInputs::fifth_gen_fighter(sizing.weights.empty)).unwrap();
        let text = SizingReport::new(&sizing, &costs).to_string();
        let expected = "
Final Takeoff Gross Weight: 85004.51 lbs
Empty Weight Fraction: 0.5100
Empty Weight: 43352.30 lbs
Landing Weight: 55689.10 lbs
Total Fuel Weight: 31074.34 lbs
Used Fuel Weight: 29315.41 lbs
Reserve Fuel Weight: 1758.92 lbs

--- Cost Estimates ---
Engineering Cost: $122,244,463
Development Support Cost: $1,742,982,720
Flight Test Cost: $468,621,106
RDT&E Total: $2,333,848,290

Tooling Cost: $27,240,190
Manufacturing Cost: $123,039,117

Total Program Cost: $2,484,127,597
Unit Production Cost: $300,559
";
        assert_eq!(text, expected);
    }

    #[test]
    fn converged_run_leads_with_iteration_line() {
        let cfg = SizingCfg {
            relaxation: 0.5,
            ..SizingCfg::default()
        };
        let sizing = size_aircraft(&SizingInputs::fighter(), &cfg).unwrap();
        let costs = estimate_costs(&CostInputs::fifth_gen_fighter(sizing.weights.empty)).unwrap();
        let text = SizingReport::new(&sizing, &costs).to_string();
        assert!(text.starts_with("Converged at iteration 5\n\nFinal Takeoff Gross Weight: "));
    }
}
