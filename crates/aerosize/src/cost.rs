//! Parametric cost-estimating relationships (CERs).
//!
//! Each CER is a power law in empty airframe weight `W` (lb), maximum velocity
//! `V_H` (kt) and a quantity, scaled by adjustment factors, a recurring index
//! and a cost price index. Coefficients and exponents are fixed literals.
//!
//! | CER | coefficient | W | V_H | quantity |
//! |-----|-------------|---|-----|----------|
//! | engineering | 0.083 | 0.791 | 1.521 | Q^0.183 |
//! | tooling | 2.1036 | 0.764 | 0.899 | Q^0.178 · Q_M^0.066 |
//! | manufacturing | 20.2588 | 0.74 | 0.543 | Q^0.524 |
//! | development support | 0.06458 | 0.873 | 1.89 | Q_proto^0.346 |
//! | flight test | 0.009646 | 1.16 | 1.3718 | Q_proto^1.281 |

use std::fmt;

/// Program adjustment factors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdjustmentFactors {
    /// Certification.
    pub cert: f64,
    /// Commonality.
    pub cf: f64,
    /// Complexity.
    pub comp: f64,
    /// Pressurized vessel.
    pub press: f64,
    /// Tapered wing.
    pub taper: f64,
    /// High-yield equipment.
    pub hye: f64,
}

impl AdjustmentFactors {
    /// Typical fifth-generation fighter program.
    pub fn fifth_gen_fighter() -> Self {
        Self {
            cert: 1.3,
            cf: 0.95,
            comp: 1.25,
            press: 1.15,
            taper: 0.95,
            hye: 1.2,
        }
    }
}

impl Default for AdjustmentFactors {
    fn default() -> Self {
        Self::fifth_gen_fighter()
    }
}

/// Recurring cost indices (labor rate multipliers).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecurringIndices {
    pub eng: f64,
    pub tool: f64,
    pub mfg: f64,
}

impl Default for RecurringIndices {
    fn default() -> Self {
        Self {
            eng: 1.0,
            tool: 1.0,
            mfg: 1.0,
        }
    }
}

/// Everything the CERs read.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CostInputs {
    /// Empty airframe weight (lb).
    pub w_airframe: f64,
    /// Maximum velocity (kt).
    pub v_h: f64,
    /// Total production quantity.
    pub q: f64,
    /// Production rate (per year).
    pub q_m: f64,
    /// Prototype quantity.
    pub q_proto: f64,
    pub factors: AdjustmentFactors,
    pub recurring: RecurringIndices,
    /// Cost price index; 1.0 is the baseline year.
    pub cpi: f64,
}

impl CostInputs {
    /// 1190 kt, 500 aircraft at 100/yr, 5 prototypes, baseline CPI.
    pub fn fifth_gen_fighter(w_airframe: f64) -> Self {
        Self {
            w_airframe,
            v_h: 1190.0,
            q: 500.0,
            q_m: 100.0,
            q_proto: 5.0,
            factors: AdjustmentFactors::fifth_gen_fighter(),
            recurring: RecurringIndices::default(),
            cpi: 1.0,
        }
    }

    pub fn validate(&self) -> Result<(), CostError> {
        let positive = [
            ("w_airframe", self.w_airframe),
            ("v_h", self.v_h),
            ("q", self.q),
            ("q_m", self.q_m),
            ("q_proto", self.q_proto),
            ("cert", self.factors.cert),
            ("cf", self.factors.cf),
            ("comp", self.factors.comp),
            ("press", self.factors.press),
            ("taper", self.factors.taper),
            ("hye", self.factors.hye),
            ("r_eng", self.recurring.eng),
            ("r_tool", self.recurring.tool),
            ("r_mfg", self.recurring.mfg),
            ("cpi", self.cpi),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(CostError::NonPositive { name, value });
            }
        }
        Ok(())
    }
}

/// Engineering hours cost `C_ENG`.
pub fn engineering_cost(i: &CostInputs) -> f64 {
    let f = &i.factors;
    0.083
        * i.w_airframe.powf(0.791)
        * i.v_h.powf(1.521)
        * i.q.powf(0.183)
        * f.cert
        * f.cf
        * f.comp
        * f.press
        * f.hye
        * i.recurring.eng
        * i.cpi
}

/// Tooling cost `C_TOOL`.
pub fn tooling_cost(i: &CostInputs) -> f64 {
    let f = &i.factors;
    2.1036
        * i.w_airframe.powf(0.764)
        * i.v_h.powf(0.899)
        * i.q.powf(0.178)
        * i.q_m.powf(0.066)
        * f.taper
        * f.cf
        * f.comp
        * f.press
        * f.hye
        * i.recurring.tool
        * i.cpi
}

/// Manufacturing labor cost `C_MFG`.
pub fn manufacturing_cost(i: &CostInputs) -> f64 {
    let f = &i.factors;
    20.2588
        * i.w_airframe.powf(0.74)
        * i.v_h.powf(0.543)
        * i.q.powf(0.524)
        * f.cert
        * f.cf
        * f.comp
        * f.hye
        * i.recurring.mfg
        * i.cpi
}

/// Development support cost `C_DEV`; scales with prototypes, not production.
pub fn development_support_cost(i: &CostInputs) -> f64 {
    let f = &i.factors;
    0.06458
        * i.w_airframe.powf(0.873)
        * i.v_h.powf(1.89)
        * i.q_proto.powf(0.346)
        * f.cert
        * f.cf
        * f.comp
        * f.press
        * f.hye
        * i.cpi
}

/// Flight test operations cost `C_FT`.
pub fn flight_test_operations_cost(i: &CostInputs) -> f64 {
    let f = &i.factors;
    0.009646
        * i.w_airframe.powf(1.16)
        * i.v_h.powf(1.3718)
        * i.q_proto.powf(1.281)
        * f.cert
        * f.hye
        * i.cpi
}

/// All five CERs plus program aggregates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CostEstimate {
    pub engineering: f64,
    pub development_support: f64,
    pub flight_test: f64,
    pub tooling: f64,
    pub manufacturing: f64,
    /// `C_ENG + C_DEV + C_FT`.
    pub rdte: f64,
    /// `C_RDTE + C_TOOL + C_MFG`.
    pub total: f64,
    /// `(C_TOOL + C_MFG) / Q`.
    pub unit: f64,
}

pub fn estimate_costs(inputs: &CostInputs) -> Result<CostEstimate, CostError> {
    inputs.validate()?;
    let engineering = engineering_cost(inputs);
    let tooling = tooling_cost(inputs);
    let manufacturing = manufacturing_cost(inputs);
    let development_support = development_support_cost(inputs);
    let flight_test = flight_test_operations_cost(inputs);
    let rdte = engineering + development_support + flight_test;
    Ok(CostEstimate {
        engineering,
        development_support,
        flight_test,
        tooling,
        manufacturing,
        rdte,
        total: rdte + tooling + manufacturing,
        unit: (tooling + manufacturing) / inputs.q,
    })
}

/// Errors surfaced by CER evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum CostError {
    /// A power-law base or multiplier is zero, negative or non-finite.
    NonPositive { name: &'static str, value: f64 },
}

impl fmt::Display for CostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostError::NonPositive { name, value } => {
                write!(f, "cost input `{name}` must be finite and > 0, got {value}")
            }
        }
    }
}

impl std::error::Error for CostError {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Empty weight of the reference fighter after sizing.
    const REF_EMPTY: f64 = 43_352.300_485_785_22;

    fn rel_close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs()
    }

    #[test]
    fn reference_fighter_costs() {
        let est = estimate_costs(&CostInputs::fifth_gen_fighter(REF_EMPTY)).unwrap();
        assert!(rel_close(est.engineering, 122_244_463.168_411_3));
        assert!(rel_close(est.development_support, 1_742_982_720.384_022));
        assert!(rel_close(est.flight_test, 468_621_106.417_570_4));
        assert!(rel_close(est.rdte, 2_333_848_289.970_003_6));
        assert!(rel_close(est.tooling, 27_240_189.998_870_198));
        assert!(rel_close(est.manufacturing, 123_039_116.976_947_86));
        assert!(rel_close(est.total, 2_484_127_596.945_822));
        assert!(rel_close(est.unit, 300_558.613_951_636_1));
    }

    #[test]
    fn aggregates_follow_components() {
        let inputs = CostInputs::fifth_gen_fighter(30_000.0);
        let est = estimate_costs(&inputs).unwrap();
        assert_eq!(
            est.rdte,
            est.engineering + est.development_support + est.flight_test
        );
        assert_eq!(est.total, est.rdte + est.tooling + est.manufacturing);
        assert_eq!(est.unit, (est.tooling + est.manufacturing) / inputs.q);
    }

    #[test]
    fn cpi_scales_every_cer_linearly() {
        let base = CostInputs::fifth_gen_fighter(REF_EMPTY);
        let inflated = CostInputs { cpi: 1.5, ..base };
        let a = estimate_costs(&base).unwrap();
        let b = estimate_costs(&inflated).unwrap();
        for (x, y) in [
            (a.engineering, b.engineering),
            (a.development_support, b.development_support),
            (a.flight_test, b.flight_test),
            (a.tooling, b.tooling),
            (a.manufacturing, b.manufacturing),
        ] {
            assert!((y / x - 1.5).abs() < 1e-12);
        }
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let inputs = CostInputs {
            q: 0.0,
            ..CostInputs::fifth_gen_fighter(REF_EMPTY)
        };
        let err = estimate_costs(&inputs).unwrap_err();
        assert_eq!(
            err,
            CostError::NonPositive {
                name: "q",
                value: 0.0
            }
        );
        assert!(err.to_string().contains("`q`"));
    }

    #[test]
    fn negative_airframe_weight_is_rejected() {
        let inputs = CostInputs::fifth_gen_fighter(-1.0);
        assert!(matches!(
            estimate_costs(&inputs),
            Err(CostError::NonPositive {
                name: "w_airframe",
                ..
            })
        ));
    }

    proptest! {
        #[test]
        fn cers_are_pure(w in 5_000.0f64..100_000.0, v in 200.0f64..1_500.0, q in 1.0f64..2_000.0) {
            let inputs = CostInputs { v_h: v, q, ..CostInputs::fifth_gen_fighter(w) };
            prop_assert_eq!(estimate_costs(&inputs).unwrap(), estimate_costs(&inputs).unwrap());
        }

        #[test]
        fn production_quantity_raises_quantity_driven_cers(
            w in 5_000.0f64..100_000.0,
            q in 1.0f64..2_000.0,
            dq in 1.0f64..500.0,
        ) {
            let lo = CostInputs { q, ..CostInputs::fifth_gen_fighter(w) };
            let hi = CostInputs { q: q + dq, ..lo };
            prop_assert!(engineering_cost(&hi) > engineering_cost(&lo));
            prop_assert!(tooling_cost(&hi) > tooling_cost(&lo));
            prop_assert!(manufacturing_cost(&hi) > manufacturing_cost(&lo));
            // Prototype-driven CERs ignore production quantity.
            prop_assert_eq!(development_support_cost(&hi), development_support_cost(&lo));
            prop_assert_eq!(flight_test_operations_cost(&hi), flight_test_operations_cost(&lo));
        }

        #[test]
        fn prototype_quantity_raises_development_and_flight_test(
            w in 5_000.0f64..100_000.0,
            qp in 1.0f64..20.0,
            dqp in 1.0f64..10.0,
        ) {
            let lo = CostInputs { q_proto: qp, ..CostInputs::fifth_gen_fighter(w) };
            let hi = CostInputs { q_proto: qp + dqp, ..lo };
            prop_assert!(development_support_cost(&hi) > development_support_cost(&lo));
            prop_assert!(flight_test_operations_cost(&hi) > flight_test_operations_cost(&lo));
            prop_assert_eq!(engineering_cost(&hi), engineering_cost(&lo));
        }
    }
}
