// src/main.rs
//
// Command-line walkthrough of the three demos.
//
// Examples:
//
//   cargo run -- cooling
//       -> solves the default cycle (T_i = 2, B_b = 3) and prints every stage
//          with its sampled 8x8 spin lattice.
//
//   cargo run -- cooling --t-initial 1.5 --b-applied 4 --stage c --seed 7
//
//   cargo run -- coupling --l 2 --s 1/2
//       -> uncoupled basis, m_J projections and the J ladder.
//
//   cargo run -- phonon --k 0.785 --m2 2.0 --omega 1.3
//       -> monatomic and diatomic frequencies, nearest branch, displacements.
//
// Any subcommand accepts `--config FILE.json` (see `DemoConfig`); flags
// override values read from the file. Log level follows RUST_LOG (default info).
//
// Tables for plotting are produced by the dedicated binaries under `src/bin/*`.

use std::f64::consts::PI;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use solid_state_sim::config::DemoConfig;
use solid_state_sim::cooling::{CoolingSession, CoolingStage};
use solid_state_sim::coupling::{CouplingScheme, CouplingStage, HalfInt};
use solid_state_sim::entropy::entropy_breakdown;
use solid_state_sim::phonon::Branch;
use solid_state_sim::spins::{arrow_grid, net_moment};

#[derive(Parser)]
#[command(name = "solid-state-sim", about = "Solid-state physics demonstrations")]
struct Cli {
    /// JSON file with demo parameters (missing sections use defaults).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Adiabatic demagnetization cooling cycle.
    Cooling {
        /// Starting temperature T_i.
        #[arg(long)]
        t_initial: Option<f64>,
        /// Field applied in the isothermal stage.
        #[arg(long)]
        b_applied: Option<f64>,
        /// Show a single stage (a, b or c) instead of the whole cycle.
        #[arg(long)]
        stage: Option<char>,
        /// Seed for spin sampling (random if omitted).
        #[arg(long)]
        seed: Option<u64>,
    },
    /// LS angular-momentum coupling scheme.
    Coupling {
        #[arg(long)]
        l: u32,
        /// Spin, e.g. 1/2, 1, 3/2.
        #[arg(long)]
        s: HalfInt,
        /// Diagram step 0..=3.
        #[arg(long, default_value_t = 3)]
        step: u8,
    },
    /// Phonon dispersion of monatomic and diatomic chains.
    Phonon {
        /// Wavevector (radians per unit spacing).
        #[arg(long, default_value_t = PI / 4.0)]
        k: f64,
        /// Light mass of the diatomic chain.
        #[arg(long)]
        m2: Option<f64>,
        /// Frequency "clicked" on the diatomic plot; picks the nearest branch.
        #[arg(long)]
        omega: Option<f64>,
        /// Time at which displacements are evaluated.
        #[arg(long, default_value_t = 0.0)]
        time: f64,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => DemoConfig::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => DemoConfig::default(),
    };

    match cli.command {
        Command::Cooling {
            t_initial,
            b_applied,
            stage,
            seed,
        } => run_cooling(&cfg, t_initial, b_applied, stage, seed),
        Command::Coupling { l, s, step } => run_coupling(l, s, step),
        Command::Phonon { k, m2, omega, time } => run_phonon(&cfg, k, m2, omega, time),
    }
}

fn run_cooling(
    cfg: &DemoConfig,
    t_initial: Option<f64>,
    b_applied: Option<f64>,
    stage: Option<char>,
    seed: Option<u64>,
) -> Result<()> {
    let params = cfg.spins;
    let mut session = CoolingSession::new(cfg.cooling);
    if let Some(t) = t_initial {
        session.set_initial_temperature(t);
    }
    if let Some(b) = b_applied {
        session.set_applied_field(b);
    }
    session.cycle.validate().context("cooling parameters")?;

    let stages: Vec<CoolingStage> = match stage {
        Some(c) => vec![CoolingStage::from_letter(c).with_context(|| format!("unknown stage '{c}', expected a, b or c"))?],
        None => CoolingStage::ALL.to_vec(),
    };

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    info!(
        t_initial = session.cycle.t_initial,
        b_applied = session.cycle.b_applied,
        field_off = session.cycle.field_off,
        "solving cooling cycle"
    );

    let cols = (params.n_spins as f64).sqrt().round().max(1.0) as usize;

    for st in stages {
        session.stage = st;
        let snap = session
            .snapshot(&params, &mut rng)
            .context("cooling path solve failed (choose T_i above the bracket floor)")?;
        let e = entropy_breakdown(&params, snap.field, snap.temperature);

        println!("--- stage {}: {} ---", st.letter(), st.description());
        println!("B = {:.4}  T = {:.6}", snap.field, snap.temperature);
        println!(
            "S = {:.6}  (spin {:.6}, lattice {:.6})",
            snap.marker.1, e.spin, e.lattice
        );
        println!("net moment = {:+.1} / {}", net_moment(&snap.moments), params.n_spins);
        println!("{}", arrow_grid(&snap.moments, cols));
    }

    let path = session.cycle.solve(&params)?;
    println!("--------------------------");
    println!(
        "T_i = {:.6} -> T_f = {:.6}   (S_i = {:.6}, S_b = {:.6})",
        path.t_initial, path.t_final, path.s_initial, path.s_magnetized
    );
    Ok(())
}

fn run_coupling(l: u32, s: HalfInt, step: u8) -> Result<()> {
    let scheme = CouplingScheme::new(l, s)?;
    let stage = CouplingStage::from_step(step);

    println!("Coupling scheme (L={}, S={})", scheme.l, scheme.s);

    if stage.shows(CouplingStage::UncoupledBasis) {
        println!("uncoupled basis |m_L, m_S> ({} states):", scheme.dimension());
        for ms in scheme.m_s_values() {
            let row: Vec<String> = scheme
                .m_l_values()
                .iter()
                .map(|ml| format!("{ml},{ms}"))
                .collect();
            println!("  {}", row.join("  "));
        }
    }

    if stage.shows(CouplingStage::Projections) {
        println!("m_J = m_L + m_S projections:");
        for (mj, n) in scheme.projection_counts() {
            println!("  m_J={mj:>5}: {n}");
        }
    }

    if stage.shows(CouplingStage::CoupledBasis) {
        println!("coupled basis |J, m_J> ({} states):", scheme.coupled_dimension());
        for j in scheme.j_values() {
            let mjs: Vec<String> = scheme.m_j_values(j).iter().map(|m| m.to_string()).collect();
            println!("  J={j:>4}: {}", mjs.join(" "));
        }
    }

    if stage.can_advance() {
        info!(step = stage.step(), "more layers available with --step {}", stage.next().step());
    }
    Ok(())
}

fn run_phonon(cfg: &DemoConfig, k: f64, m2: Option<f64>, omega: Option<f64>, time: f64) -> Result<()> {
    let mono = cfg.monatomic;
    let mut di = cfg.diatomic;
    if let Some(m) = m2 {
        di.set_light_mass(m)?;
    }

    println!("--- monatomic chain (M={}, K={}, a={}) ---", mono.mass, mono.spring, mono.spacing);
    if !mono.in_zone(k, 4.0) {
        tracing::warn!(k, "k outside the four plotted Brillouin zones");
    }
    println!("w(k={k:.4}) = {:.6}   (max {:.6})", mono.omega(k), mono.omega_max());
    print_displacements(&mono.displacements(k, time, 0.3));

    println!("--- diatomic chain (M1={}, M2={}, K={}) ---", di.m1, di.m2, di.spring);
    if !di.in_zone(k) {
        tracing::warn!(k, "k outside the first Brillouin zone");
    }
    let (ac, op) = di.branches(k);
    println!("acoustic = {ac:.6}  optical = {op:.6}");

    let branch = omega.map_or(Branch::Acoustic, |w| di.select_branch(k, w));
    println!("branch: {}", branch.as_str());
    print_displacements(&di.displacements(k, time, branch, 0.3));
    Ok(())
}

fn print_displacements(u: &[f64]) {
    let cells: Vec<String> = u.iter().map(|x| format!("{x:+.3}")).collect();
    println!("u_n(t) = [{}]", cells.join(", "));
}
