// src/bin/entropy_curves.rs
//
// Entropy curves S(B, T) for the cooling-path diagram, plus the solved
// demagnetization cycle.
//
// Run:
//   cargo run --release --bin entropy_curves -- [n=1000] [tmax=3.0] [ti=2.0] [bb=3.0] [par] [out=out]
//
// Output:
//   out/entropy_curves/
//     ├── config.json
//     ├── entropy_curves.csv     (T, S(B_0, T), S(B_1, T), ...)
//     └── cooling_path.csv       (stage, B, T, S)

use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use solid_state_sim::config::{RunConfig, RunInfo, SamplingConfig};
use solid_state_sim::cooling::{CoolingCycle, CoolingStage};
use solid_state_sim::entropy::EntropyTable;
use solid_state_sim::grid::linspace;
use solid_state_sim::params::SpinParams;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // --- defaults match the interactive diagram ---
    let mut n_samples: usize = 1000;
    let mut t_max = 3.0_f64;
    let mut cycle = CoolingCycle::default();
    let mut parallel = false;
    let mut out_root = String::from("out");

    for arg in std::env::args().skip(1) {
        if arg == "par" {
            parallel = true;
        } else if let Some(v) = arg.strip_prefix("n=") {
            n_samples = v.parse().with_context(|| format!("bad n '{v}'"))?;
        } else if let Some(v) = arg.strip_prefix("tmax=") {
            t_max = v.parse().with_context(|| format!("bad tmax '{v}'"))?;
        } else if let Some(v) = arg.strip_prefix("ti=") {
            cycle.t_initial = v.parse().with_context(|| format!("bad ti '{v}'"))?;
        } else if let Some(v) = arg.strip_prefix("bb=") {
            cycle.b_applied = v.parse().with_context(|| format!("bad bb '{v}'"))?;
        } else if let Some(v) = arg.strip_prefix("out=") {
            out_root = v.to_string();
        } else {
            warn!("ignoring unknown argument '{arg}'");
        }
    }

    cycle.validate().context("cooling parameters")?;
    let params = SpinParams::default();
    let fields = EntropyTable::DEFAULT_FIELDS.to_vec();
    let temps = linspace(0.0, t_max, n_samples);

    let out_dir = PathBuf::from(&out_root).join("entropy_curves");
    create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    // -------------------------------------------------
    // Write config.json
    // -------------------------------------------------
    let run_config = RunConfig {
        spins: Some(params),
        monatomic: None,
        diatomic: None,
        sampling: SamplingConfig {
            fields: fields.clone(),
            x_min: 0.0,
            x_max: t_max,
            n_samples,
            parallel,
        },
        run: RunInfo::from_env("entropy_curves"),
    };
    run_config.write_to_dir(&out_dir)?;

    // -------------------------------------------------
    // Curves
    // -------------------------------------------------
    let table = EntropyTable::sample(&params, &fields, &temps, parallel);

    let file = File::create(out_dir.join("entropy_curves.csv"))?;
    let mut w = BufWriter::new(file);
    let header: Vec<String> = fields.iter().map(|b| format!("S_B{b:.2}")).collect();
    writeln!(w, "T,{}", header.join(","))?;
    for (j, t) in table.temps.iter().enumerate() {
        write!(w, "{t:.16e}")?;
        for row in &table.rows {
            write!(w, ",{:.16e}", row[j])?;
        }
        writeln!(w)?;
    }
    w.flush()?;

    // -------------------------------------------------
    // Cooling path
    // -------------------------------------------------
    let path = cycle.solve(&params).context("solving cooling path")?;

    let file = File::create(out_dir.join("cooling_path.csv"))?;
    let mut w = BufWriter::new(file);
    writeln!(w, "stage,B,T,S")?;
    for stage in CoolingStage::ALL {
        let (b, _) = cycle.field_and_temperature(&path, stage);
        let (t, s) = path.point(stage);
        writeln!(w, "{},{:.16e},{:.16e},{:.16e}", stage.letter(), b, t, s)?;
    }
    w.flush()?;

    info!(
        dir = %out_dir.display(),
        t_initial = path.t_initial,
        t_final = path.t_final,
        "wrote entropy curves and cooling path"
    );
    Ok(())
}
