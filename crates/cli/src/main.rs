use aerosize::cost::{estimate_costs, CostInputs};
use aerosize::numeric::{dot, integrate, QuadCfg};
use aerosize::regression::{EmptyWeightRegression, SweepKind};
use aerosize::report::SizingReport;
use aerosize::sizing::{size_aircraft, SizingCfg, SizingInputs};
use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod artifacts;
mod provenance;

use artifacts::{ReportDoc, RunParams};
use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "aerosize")]
#[command(about = "Takeoff gross weight sizing and program cost estimation")]
struct Cmd {
    /// Log per-iteration debug events
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Size the reference fighter and print weights and cost estimates
    Size(SizeArgs),
    /// Check the numeric stack with a dot product and a quadrature
    Smoke {
        #[arg(long)]
        name: Option<String>,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Sweep {
    Fixed,
    Variable,
}

impl From<Sweep> for SweepKind {
    fn from(s: Sweep) -> Self {
        match s {
            Sweep::Fixed => SweepKind::Fixed,
            Sweep::Variable => SweepKind::Variable,
        }
    }
}

/// Overrides layered on top of the reference case; unset flags keep defaults.
#[derive(Args, Debug)]
struct SizeArgs {
    /// Starting gross weight guess (lb)
    #[arg(long)]
    initial_guess: Option<f64>,
    /// Iteration cap
    #[arg(long)]
    max_iters: Option<usize>,
    /// Convergence threshold on |Wo_new - Wo| (lb)
    #[arg(long)]
    tol: Option<f64>,
    /// Update relaxation in (0, 1]
    #[arg(long)]
    relax: Option<f64>,
    /// Wing sweep (selects Kvs)
    #[arg(long, value_enum, default_value_t = Sweep::Variable)]
    sweep: Sweep,
    /// Total production quantity
    #[arg(long)]
    quantity: Option<f64>,
    /// Cost price index
    #[arg(long)]
    cpi: Option<f64>,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
    /// Also write the JSON report (plus provenance sidecar) here
    #[arg(long)]
    out: Option<PathBuf>,
    /// Write the iteration history as CSV, or Parquet for `.parquet`
    #[arg(long)]
    history: Option<PathBuf>,
}

impl SizeArgs {
    fn sizing_inputs(&self) -> SizingInputs {
        SizingInputs {
            regression: EmptyWeightRegression::jet_fighter(self.sweep.into()),
            ..SizingInputs::default()
        }
    }

    fn sizing_cfg(&self) -> SizingCfg {
        let d = SizingCfg::default();
        SizingCfg {
            initial_guess: self.initial_guess.unwrap_or(d.initial_guess),
            max_iters: self.max_iters.unwrap_or(d.max_iters),
            tol: self.tol.unwrap_or(d.tol),
            relaxation: self.relax.unwrap_or(d.relaxation),
            ..d
        }
    }

    fn cost_inputs(&self, w_airframe: f64) -> CostInputs {
        let d = CostInputs::fifth_gen_fighter(w_airframe);
        CostInputs {
            q: self.quantity.unwrap_or(d.q),
            cpi: self.cpi.unwrap_or(d.cpi),
            ..d
        }
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Size(args) => size(args),
        Action::Smoke { name } => smoke(name),
        Action::Report => report(),
    }
}

fn size(args: SizeArgs) -> Result<()> {
    let inputs = args.sizing_inputs();
    let cfg = args.sizing_cfg();
    tracing::info!(
        initial_guess = cfg.initial_guess,
        max_iters = cfg.max_iters,
        tol = cfg.tol,
        relaxation = cfg.relaxation,
        sweep = ?args.sweep,
        "size"
    );

    let sizing = size_aircraft(&inputs, &cfg)?;
    for it in &sizing.history {
        tracing::debug!(
            iteration = it.iteration,
            gross_weight = it.gross_weight,
            empty_fraction = it.empty_fraction,
            next_gross_weight = it.next_gross_weight,
            "iterate"
        );
    }
    match sizing.converged_at {
        Some(iteration) => {
            tracing::info!(iteration, gross_weight = sizing.weights.gross, "converged")
        }
        None => tracing::warn!(
            max_iters = cfg.max_iters,
            gross_weight = sizing.weights.gross,
            "iteration cap reached without convergence; keeping last estimate"
        ),
    }
    if sizing.clamped() {
        tracing::info!(
            raw = sizing.raw_empty_fraction,
            cap = cfg.empty_fraction_cap,
            "empty_fraction_clamped"
        );
    }

    let cost_inputs = args.cost_inputs(sizing.weights.empty);
    let costs = estimate_costs(&cost_inputs)?;
    let params = RunParams::new(&inputs, &cfg, &cost_inputs);
    let doc = ReportDoc::new(params.clone(), &sizing, &costs);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print!("{}", SizingReport::new(&sizing, &costs));
    }

    let payload = Payload::new("size", serde_json::to_value(&params)?);
    if let Some(out) = &args.out {
        artifacts::write_report(out, &doc)?;
        let prov = write_sidecar(out, &payload)?;
        tracing::info!(out = %out.display(), provenance = %prov.display(), "report_written");
    }
    if let Some(path) = &args.history {
        artifacts::write_history(path, &sizing.history)?;
        let prov = write_sidecar(path, &payload)?;
        tracing::info!(provenance = %prov.display(), "history_provenance_written");
    }
    Ok(())
}

fn smoke(name: Option<String>) -> Result<()> {
    println!("Hello, aerosize {}!", aerosize::VERSION);
    let os = std::env::consts::OS;
    match name {
        Some(name) => println!("My name is {name} and I am using {os}."),
        None => println!("Running on {os}."),
    }

    let d = dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0])?;
    println!("nalgebra dot product test: {d}");

    let q = integrate(f64::sin, 0.0, std::f64::consts::PI, QuadCfg::default())?;
    println!(
        "quadrature test (integral of sin(x) from 0 to pi): {}",
        q.value
    );
    tracing::info!(
        dot = d,
        integral = q.value,
        abs_err = q.abs_err,
        evals = q.evals,
        "smoke"
    );
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "aerosize_version": aerosize::VERSION,
        "params": {
            "sizing": RunParams::new(
                &SizingInputs::default(),
                &SizingCfg::default(),
                &CostInputs::fifth_gen_fighter(0.0),
            ),
        },
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
