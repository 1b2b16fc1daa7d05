// src/bin/phonon_dispersion.rs
//
// Dispersion tables for the monatomic and diatomic chains.
//
// Run:
//   cargo run --release --bin phonon_dispersion -- [n=1000] [m2=VAL] [out=out]
//
// Output:
//   out/phonon_dispersion/
//     ├── config.json
//     ├── monatomic.csv   (k, k a / pi, w)            over four zones
//     └── diatomic.csv    (k, k a / pi, w_ac, w_op)   over the first zone

use std::f64::consts::PI;
use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use solid_state_sim::config::{RunConfig, RunInfo, SamplingConfig};
use solid_state_sim::phonon::{DiatomicChain, LIGHT_MASS_RANGE, MonatomicChain};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut n_samples: usize = 1000;
    let mut m2: Option<f64> = None;
    let mut out_root = String::from("out");

    for arg in std::env::args().skip(1) {
        if let Some(v) = arg.strip_prefix("n=") {
            n_samples = v.parse().with_context(|| format!("bad n '{v}'"))?;
        } else if let Some(v) = arg.strip_prefix("m2=") {
            m2 = Some(v.parse().with_context(|| format!("bad m2 '{v}'"))?);
        } else if let Some(v) = arg.strip_prefix("out=") {
            out_root = v.to_string();
        } else {
            warn!("ignoring unknown argument '{arg}'");
        }
    }

    let mono = MonatomicChain::default();
    let mut di = DiatomicChain::default();
    if let Some(m) = m2 {
        if m < LIGHT_MASS_RANGE.0 || m > LIGHT_MASS_RANGE.1 {
            warn!(m2 = m, "light mass outside the usual slider range {:?}", LIGHT_MASS_RANGE);
        }
        di.set_light_mass(m)?;
    }

    let out_dir = PathBuf::from(&out_root).join("phonon_dispersion");
    create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let run_config = RunConfig {
        spins: None,
        monatomic: Some(mono),
        diatomic: Some(di),
        sampling: SamplingConfig {
            fields: Vec::new(),
            x_min: -4.0 * PI / mono.spacing,
            x_max: 4.0 * PI / mono.spacing,
            n_samples,
            parallel: false,
        },
        run: RunInfo::from_env("phonon_dispersion"),
    };
    run_config.write_to_dir(&out_dir)?;

    // Monatomic: four Brillouin zones
    let k_lim = 4.0 * PI / mono.spacing;
    let file = File::create(out_dir.join("monatomic.csv"))?;
    let mut w = BufWriter::new(file);
    writeln!(w, "k,k_reduced,omega")?;
    for (k, omega) in mono.dispersion_table(-k_lim, k_lim, n_samples) {
        writeln!(w, "{:.16e},{:.16e},{:.16e}", k, k * mono.spacing / PI, omega)?;
    }
    w.flush()?;

    // Diatomic: first zone
    let k_lim = PI / di.spacing;
    let file = File::create(out_dir.join("diatomic.csv"))?;
    let mut w = BufWriter::new(file);
    writeln!(w, "k,k_reduced,omega_acoustic,omega_optical")?;
    for (k, ac, op) in di.dispersion_table(-k_lim, k_lim, n_samples) {
        writeln!(w, "{:.16e},{:.16e},{:.16e},{:.16e}", k, k * di.spacing / PI, ac, op)?;
    }
    w.flush()?;

    info!(dir = %out_dir.display(), m2 = di.m2, "wrote dispersion tables");
    Ok(())
}
