//! Machine-readable outputs of `aerosize size`: the JSON report and the
//! iteration history table.

use aerosize::cost::{CostEstimate, CostInputs};
use aerosize::sizing::{Iterate, SizingCfg, SizingInputs, SizingOutcome};
use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;
use std::fs::{self, File};
use std::path::Path;

use crate::provenance::ensure_parent;

/// Effective parameters of a sizing run (defaults with CLI overrides applied).
#[derive(Serialize, Clone, Debug)]
pub struct RunParams {
    pub initial_guess: f64,
    pub max_iters: usize,
    pub tol: f64,
    pub relaxation: f64,
    pub empty_fraction_cap: f64,
    pub crew_weight: f64,
    pub payload_weight: f64,
    pub regression_a: f64,
    pub regression_c: f64,
    pub kvs: f64,
    pub reserve_factor: f64,
    pub v_h: f64,
    pub q: f64,
    pub q_m: f64,
    pub q_proto: f64,
    pub cpi: f64,
}

impl RunParams {
    pub fn new(inputs: &SizingInputs, cfg: &SizingCfg, costs: &CostInputs) -> Self {
        Self {
            initial_guess: cfg.initial_guess,
            max_iters: cfg.max_iters,
            tol: cfg.tol,
            relaxation: cfg.relaxation,
            empty_fraction_cap: cfg.empty_fraction_cap,
            crew_weight: inputs.crew_weight,
            payload_weight: inputs.payload_weight,
            regression_a: inputs.regression.a,
            regression_c: inputs.regression.c,
            kvs: inputs.regression.kvs,
            reserve_factor: inputs.reserve_factor,
            v_h: costs.v_h,
            q: costs.q,
            q_m: costs.q_m,
            q_proto: costs.q_proto,
            cpi: costs.cpi,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct WeightsDoc {
    pub gross: f64,
    pub empty_fraction: f64,
    pub raw_empty_fraction: f64,
    pub mission_fraction: f64,
    pub empty: f64,
    pub landing: f64,
    pub fuel_total: f64,
    pub fuel_used: f64,
    pub fuel_reserve: f64,
}

#[derive(Serialize, Clone, Debug)]
pub struct CostsDoc {
    pub engineering: f64,
    pub development_support: f64,
    pub flight_test: f64,
    pub rdte: f64,
    pub tooling: f64,
    pub manufacturing: f64,
    pub total: f64,
    pub unit: f64,
}

impl From<&CostEstimate> for CostsDoc {
    fn from(c: &CostEstimate) -> Self {
        Self {
            engineering: c.engineering,
            development_support: c.development_support,
            flight_test: c.flight_test,
            rdte: c.rdte,
            tooling: c.tooling,
            manufacturing: c.manufacturing,
            total: c.total,
            unit: c.unit,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct ReportDoc {
    pub params: RunParams,
    pub converged: bool,
    pub converged_at: Option<usize>,
    pub iterations: usize,
    pub weights: WeightsDoc,
    pub costs: CostsDoc,
}

impl ReportDoc {
    pub fn new(params: RunParams, sizing: &SizingOutcome, costs: &CostEstimate) -> Self {
        let w = &sizing.weights;
        Self {
            params,
            converged: sizing.converged(),
            converged_at: sizing.converged_at,
            iterations: sizing.iterations(),
            weights: WeightsDoc {
                gross: w.gross,
                empty_fraction: w.empty_fraction,
                raw_empty_fraction: sizing.raw_empty_fraction,
                mission_fraction: sizing.mission_fraction,
                empty: w.empty,
                landing: w.landing,
                fuel_total: w.fuel_total,
                fuel_used: w.fuel_used,
                fuel_reserve: w.fuel_reserve,
            },
            costs: costs.into(),
        }
    }
}

pub fn write_report(path: &Path, doc: &ReportDoc) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, serde_json::to_vec_pretty(doc)?)
        .with_context(|| format!("writing {}", path.display()))
}

/// One row per loop pass.
pub fn history_frame(history: &[Iterate]) -> PolarsResult<DataFrame> {
    let iteration: Vec<u64> = history.iter().map(|it| it.iteration as u64).collect();
    let gross: Vec<f64> = history.iter().map(|it| it.gross_weight).collect();
    let empty_fraction: Vec<f64> = history.iter().map(|it| it.empty_fraction).collect();
    let denominator: Vec<f64> = history.iter().map(|it| it.denominator).collect();
    let next: Vec<f64> = history.iter().map(|it| it.next_gross_weight).collect();
    let step: Vec<f64> = history.iter().map(Iterate::step).collect();
    df!(
        "iteration" => iteration,
        "gross_weight" => gross,
        "empty_fraction" => empty_fraction,
        "denominator" => denominator,
        "next_gross_weight" => next,
        "step" => step,
    )
}

/// Write the history as Parquet for `.parquet` paths, CSV otherwise.
pub fn write_history(path: &Path, history: &[Iterate]) -> Result<()> {
    let mut df = history_frame(history)?;
    ensure_parent(path)?;
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("parquet") => {
            ParquetWriter::new(file).finish(&mut df)?;
        }
        _ => {
            CsvWriter::new(file).include_header(true).finish(&mut df)?;
        }
    }
    tracing::info!(path = %path.display(), rows = df.height(), "history_written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerosize::cost::estimate_costs;
    use aerosize::sizing::size_aircraft;
    use tempfile::tempdir;

    fn fighter_run() -> (SizingInputs, SizingCfg, SizingOutcome) {
        let inputs = SizingInputs::fighter();
        let cfg = SizingCfg::default();
        let sizing = size_aircraft(&inputs, &cfg).unwrap();
        (inputs, cfg, sizing)
    }

    #[test]
    fn history_csv_round_trips_row_count() {
        let (_, _, sizing) = fighter_run();
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("history.csv");
        write_history(&path, &sizing.history).unwrap();

        let df = LazyCsvReader::new(&path).finish().unwrap().collect().unwrap();
        assert_eq!(df.height(), 30);
        assert_eq!(df.width(), 6);
        let gross = df.column("gross_weight").unwrap().f64().unwrap();
        assert_eq!(gross.get(0), Some(75_000.0));
    }

    #[test]
    fn history_parquet_is_written_for_parquet_extension() {
        let (_, _, sizing) = fighter_run();
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.parquet");
        write_history(&path, &sizing.history).unwrap();
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"PAR1");
    }

    #[test]
    fn report_doc_serializes_weights_and_costs() {
        let (inputs, cfg, sizing) = fighter_run();
        let cost_inputs = CostInputs::fifth_gen_fighter(sizing.weights.empty);
        let costs = estimate_costs(&cost_inputs).unwrap();
        let doc = ReportDoc::new(RunParams::new(&inputs, &cfg, &cost_inputs), &sizing, &costs);
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_report(&path, &doc).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(parsed["converged"], false);
        assert_eq!(parsed["converged_at"], serde_json::Value::Null);
        assert_eq!(parsed["iterations"], 30);
        assert_eq!(parsed["weights"]["empty_fraction"], 0.51);
        assert_eq!(parsed["params"]["max_iters"], 30);
        assert_eq!(parsed["params"]["q"], 500.0);
        let total = parsed["costs"]["total"].as_f64().unwrap();
        assert!((total - 2_484_127_596.945_822).abs() < 1.0);
    }
}
