//! # chem_cli
//!
//! Command-line front end for `chem_core`. One subcommand per calculator,
//! an `eval` command that runs JSON requests, and progress file helpers.
//!
//! Logging goes through `env_logger`; `-v` turns on debug output and
//! `RUST_LOG` overrides both.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use chem_core::calculations::dimensional::predict_resulting_unit;
use chem_core::calculations::equilibrium::{calculate_shift, Stress, StressKind};
use chem_core::calculations::gas_law::{solve_gas_law, GasKnowns, GasVariable};
use chem_core::calculations::redox::{balance_half_reactions, calculate_multipliers, check_identification};
use chem_core::calculations::stoichiometry::calculate_correct_answer;
use chem_core::calculations::thermodynamics::{calculate_delta_g, get_spontaneity, spontaneity_regime};
use chem_core::calculations::titration::{
    calculate_ph, equivalence_ph, equivalence_volume_ml, get_ph_color, suitable_indicators, titration_curve,
    TitrationKind, TitrationSetup,
};
use chem_core::calculations::buffer::{calculate_buffer_recipe, BufferRecipeInput};
use chem_core::data::{buffers, conversion_factors, equilibria, reactions, redox};
use chem_core::numeric::count_significant_figures;
use chem_core::problems::{generate_problem, Difficulty, ProblemKind};
use chem_core::units::GasValue;
use chem_core::{evaluate_with, load_progress, save_progress, CalculationRequest, ChemError, ProgressSnapshot, Settings};

#[derive(Parser, Debug)]
#[command(name = "chem_cli", version, about = "Chemistry games calculation engine")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (JSON); defaults apply when absent
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve PV = nRT; give three of the four values as "<value> <unit>"
    Gas {
        #[arg(long, short = 'p')]
        pressure: Option<String>,
        #[arg(long)]
        volume: Option<String>,
        #[arg(long, short = 'n')]
        moles: Option<String>,
        #[arg(long, short = 't')]
        temperature: Option<String>,
        /// Variable to solve for
        #[arg(long, value_enum)]
        solve: GasArg,
    },
    /// Limiting reactant for a reaction in the reaction table
    Stoich {
        #[arg(long)]
        reaction: String,
        #[arg(long)]
        r1: u32,
        #[arg(long)]
        r2: u32,
    },
    /// Buffer recipe for a buffer system in the buffer table
    Buffer {
        #[arg(long)]
        system: String,
        #[arg(long)]
        ph: f64,
        #[arg(long, default_value_t = 1.0)]
        volume_l: f64,
        #[arg(long, default_value_t = 0.1)]
        concentration: f64,
    },
    /// Titration pH at a volume, or the whole curve
    Titration {
        #[arg(long, value_enum)]
        kind: TitrationArg,
        /// pKa (weak acid) or pKb (weak base)
        #[arg(long)]
        pk: Option<f64>,
        #[arg(long, default_value_t = 25.0)]
        analyte_ml: f64,
        #[arg(long, default_value_t = 0.1)]
        analyte_m: f64,
        #[arg(long, default_value_t = 0.1)]
        titrant_m: f64,
        /// Titrant volume added (mL)
        #[arg(long, conflicts_with = "curve_step")]
        added_ml: Option<f64>,
        /// Print the curve with this step (mL)
        #[arg(long)]
        curve_step: Option<f64>,
    },
    /// Le Chatelier shift for an equilibrium in the equilibrium table
    Shift {
        #[arg(long)]
        equilibrium: String,
        /// Stress kind, e.g. add-reactant, increase-temp
        #[arg(long)]
        stress: String,
        #[arg(long)]
        target: Option<String>,
    },
    /// Count significant figures
    Sigfigs { value: String },
    /// Predict the unit after converting `from` into `to`
    Units {
        current: String,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// Redox multipliers, by electron counts or by table reaction
    Redox {
        #[arg(long, requires = "red", conflicts_with = "reaction")]
        ox: Option<u32>,
        #[arg(long)]
        red: Option<u32>,
        #[arg(long)]
        reaction: Option<String>,
        /// Check a student's answer: oxidized species
        #[arg(long, requires = "reduced")]
        oxidized: Option<String>,
        #[arg(long)]
        reduced: Option<String>,
    },
    /// ΔG = ΔH − TΔS and spontaneity
    Thermo {
        /// kJ/mol
        #[arg(long, allow_hyphen_values = true)]
        dh: f64,
        /// J/(mol·K)
        #[arg(long, allow_hyphen_values = true)]
        ds: f64,
        /// K
        #[arg(long = "temp", default_value_t = 298.15)]
        t: f64,
    },
    /// Generate a practice problem
    Problem {
        #[arg(long, value_enum)]
        kind: ProblemArg,
        #[arg(long, value_enum, default_value = "beginner")]
        difficulty: DifficultyArg,
        #[arg(long)]
        seed: Option<u64>,
        /// Check this answer against the generated problem
        #[arg(long, allow_hyphen_values = true, requires = "seed")]
        answer: Option<f64>,
    },
    /// Evaluate a JSON request (or array of requests) from a file
    Eval { file: PathBuf },
    /// Progress file helpers
    Progress {
        #[command(subcommand)]
        action: ProgressAction,
    },
    /// Check whether an email is on the teacher allow-list
    Teacher { email: String },
}

#[derive(Subcommand, Debug)]
enum ProgressAction {
    /// Create an empty progress file
    Init { file: PathBuf, player: String },
    /// Show mastery and achievements per game
    Show { file: PathBuf },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum GasArg {
    P,
    V,
    N,
    T,
}

impl From<GasArg> for GasVariable {
    fn from(arg: GasArg) -> Self {
        match arg {
            GasArg::P => GasVariable::P,
            GasArg::V => GasVariable::V,
            GasArg::N => GasVariable::N,
            GasArg::T => GasVariable::T,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TitrationArg {
    Strong,
    WeakAcid,
    WeakBase,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ProblemArg {
    Molarity,
    Dilution,
    MassToMoles,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DifficultyArg {
    Beginner,
    Intermediate,
    Advanced,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    if let Err(err) = run(cli) {
        if let Some(chem_err) = err.downcast_ref::<ChemError>() {
            match serde_json::to_string_pretty(chem_err) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("{}", chem_err),
            }
        }
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => {
            Settings::load(path).with_context(|| format!("Failed to load settings from {}", path.display()))
        }
        None => Ok(Settings::default()),
    }
}

/// Parse "<value> <unit>", e.g. "101.325 kPa"
fn parse_gas_value(text: &str) -> Result<GasValue> {
    let mut parts = text.split_whitespace();
    let value: f64 = match parts.next() {
        Some(v) => v.parse().with_context(|| format!("Invalid number in '{}'", text))?,
        None => bail!("Empty value"),
    };
    let unit = parts.next().context("Missing unit, expected '<value> <unit>'")?;
    Ok(GasValue::new(value, unit))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(cli.settings.as_deref())?;
    debug!("Settings: {:?}", settings);

    match cli.command {
        Command::Gas {
            pressure,
            volume,
            moles,
            temperature,
            solve,
        } => {
            let parse = |v: &Option<String>| v.as_deref().map(parse_gas_value).transpose();
            let (p, v, n, t) = (parse(&pressure)?, parse(&volume)?, parse(&moles)?, parse(&temperature)?);
            let known = GasKnowns::from_values(p.as_ref(), v.as_ref(), n.as_ref(), t.as_ref())?;
            let variable = GasVariable::from(solve);
            let result = solve_gas_law(&known, variable)?;
            println!("{} = {:.4} {}", variable.symbol(), result, variable.unit());
        }

        Command::Stoich { reaction, r1, r2 } => {
            let reaction = reactions::reaction_by_id(&reaction)?;
            println!("{}", reaction.equation());
            print_json(&calculate_correct_answer(reaction, r1, r2))?;
        }

        Command::Buffer {
            system,
            ph,
            volume_l,
            concentration,
        } => {
            let system = buffers::buffer_system(&system)?;
            let (low, high) = system.effective_range();
            if ph < low || ph > high {
                log::warn!("pH {} is outside the useful range {:.2}–{:.2} of {}", ph, low, high, system.id);
            }
            let recipe = calculate_buffer_recipe(&BufferRecipeInput {
                pka: system.pka,
                target_ph: ph,
                volume_l,
                total_concentration: concentration,
                acid_molar_mass: system.acid_molar_mass,
                base_molar_mass: system.base_molar_mass,
            })?;
            println!("{} / {} (pKa {})", system.acid_name, system.base_name, system.pka);
            println!("  ratio [A-]/[HA] = {:.3}", recipe.ratio);
            println!("  {:.3} g {}", recipe.acid_mass_g, system.acid_formula);
            println!("  {:.3} g {}", recipe.base_mass_g, system.base_formula);
        }

        Command::Titration {
            kind,
            pk,
            analyte_ml,
            analyte_m,
            titrant_m,
            added_ml,
            curve_step,
        } => {
            let kind = match (kind, pk) {
                (TitrationArg::Strong, _) => TitrationKind::StrongAcidStrongBase,
                (TitrationArg::WeakAcid, Some(pka)) => TitrationKind::WeakAcidStrongBase { pka },
                (TitrationArg::WeakBase, Some(pkb)) => TitrationKind::StrongAcidWeakBase { pkb },
                (_, None) => bail!("--pk is required for weak titrations"),
            };
            let setup = TitrationSetup {
                kind,
                analyte_volume_ml: analyte_ml,
                analyte_molarity: analyte_m,
                titrant_molarity: titrant_m,
            };
            let eq_ph = equivalence_ph(&setup)?;
            println!(
                "Equivalence at {:.2} mL, pH {:.2}",
                equivalence_volume_ml(&setup),
                eq_ph
            );
            let indicators: Vec<&str> = suitable_indicators(eq_ph).into_iter().map(|i| i.name.as_str()).collect();
            println!("Suitable indicators: {}", indicators.join(", "));

            if let Some(step) = curve_step {
                let max = equivalence_volume_ml(&setup) * 2.0;
                for point in titration_curve(&setup, max, step)? {
                    println!("{:>8.2} mL  pH {:>5.2}  {}", point.volume_ml, point.ph, get_ph_color(point.ph));
                }
            } else if let Some(added) = added_ml {
                let ph = calculate_ph(&setup, added)?;
                println!("pH after {:.2} mL: {:.2} {}", added, ph, get_ph_color(ph));
            }
        }

        Command::Shift {
            equilibrium,
            stress,
            target,
        } => {
            let equilibrium = equilibria::equilibrium_by_id(&equilibrium)?;
            let kind: StressKind = serde_json::from_value(serde_json::Value::String(stress.clone()))
                .map_err(|_| ChemError::invalid_input("stress", &stress, "Unknown stress kind"))?;
            let result = calculate_shift(equilibrium, &Stress { kind, target });
            println!("{}", equilibrium.equation());
            print_json(&result)?;
        }

        Command::Sigfigs { value } => {
            println!("{}", count_significant_figures(&value));
        }

        Command::Units { current, from, to } => {
            let factor = conversion_factors::find_factor(&from, &to)?;
            println!("× ({} / {})", factor.num, factor.den);
            println!("{}", predict_resulting_unit(&current, &factor));
        }

        Command::Redox {
            ox,
            red,
            reaction,
            oxidized,
            reduced,
        } => match (ox, red, reaction) {
            (Some(ox), Some(red), _) => {
                let (m_ox, m_red) = calculate_multipliers(ox, red);
                println!("oxidation × {}, reduction × {}", m_ox, m_red);
            }
            (_, _, Some(id)) => {
                let reaction = redox::redox_reaction(&id)?;
                let balanced = balance_half_reactions(&reaction.oxidation, &reaction.reduction)?;
                println!("{}", reaction.equation);
                print_json(&balanced)?;
                if let (Some(oxidized), Some(reduced)) = (oxidized, reduced) {
                    print_json(&check_identification(&oxidized, &reduced, &reaction.identification))?;
                }
            }
            _ => bail!("Give either --ox and --red, or --reaction"),
        },

        Command::Thermo { dh, ds, t } => {
            let delta_g = calculate_delta_g(dh, ds, t);
            println!("ΔG = {:.2} kJ/mol ({:?})", delta_g, get_spontaneity(delta_g));
            println!("Regime: {:?}", spontaneity_regime(dh, ds));
        }

        Command::Problem {
            kind,
            difficulty,
            seed,
            answer,
        } => {
            let kind = match kind {
                ProblemArg::Molarity => ProblemKind::Molarity,
                ProblemArg::Dilution => ProblemKind::Dilution,
                ProblemArg::MassToMoles => ProblemKind::MassToMoles,
            };
            let difficulty = match difficulty {
                DifficultyArg::Beginner => Difficulty::Beginner,
                DifficultyArg::Intermediate => Difficulty::Intermediate,
                DifficultyArg::Advanced => Difficulty::Advanced,
            };
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let problem = generate_problem(kind, difficulty, &mut rng);
            match answer {
                Some(answer) => {
                    let correct = problem.check(answer, settings.answer_tolerance_percent);
                    println!(
                        "{} (expected {} {}, tolerance {}%)",
                        if correct { "correct" } else { "incorrect" },
                        problem.answer,
                        problem.unit,
                        settings.answer_tolerance_percent
                    );
                }
                None => print_json(&problem)?,
            }
        }

        Command::Eval { file } => {
            let text =
                fs::read_to_string(&file).with_context(|| format!("Failed to read {}", file.display()))?;
            let value: serde_json::Value =
                serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", file.display()))?;
            let requests: Vec<CalculationRequest> = if value.is_array() {
                serde_json::from_value(value)?
            } else {
                vec![serde_json::from_value(value)?]
            };
            info!("Evaluating {} request(s)", requests.len());
            let outputs = requests
                .iter()
                .map(|request| evaluate_with(request, &settings))
                .collect::<Result<Vec<_>, ChemError>>()?;
            print_json(&outputs)?;
        }

        Command::Progress { action } => match action {
            ProgressAction::Init { file, player } => {
                if file.exists() {
                    bail!("{} already exists", file.display());
                }
                save_progress(&ProgressSnapshot::new(player), &file)?;
                println!("Created {}", file.display());
            }
            ProgressAction::Show { file } => {
                let snapshot = load_progress(&file)?;
                println!("Player: {} (modified {})", snapshot.meta.player, snapshot.meta.modified);
                for (game_id, progress) in &snapshot.games {
                    let mastery = progress.mastery(&settings.mastery);
                    let badges: Vec<String> = progress.achievements().into_iter().map(|a| a.name).collect();
                    println!(
                        "  {:<16} L1 {} L2 {} L3 {}  {}",
                        game_id,
                        mark(mastery.level1),
                        mark(mastery.level2),
                        mark(mastery.level3),
                        badges.join(", ")
                    );
                }
            }
        },

        Command::Teacher { email } => {
            let allowed = settings.teacher_allow_list.is_teacher(&email);
            println!("{}", if allowed { "teacher" } else { "student" });
        }
    }

    Ok(())
}

fn mark(mastered: bool) -> &'static str {
    if mastered {
        "✓"
    } else {
        "·"
    }
}
