//! # Problem Generators
//!
//! Numeric practice problems for the solution chemistry games: molarity,
//! dilution (C₁V₁ = C₂V₂) and mass-to-moles. Each problem carries its givens,
//! the canonical answer, and three hints from gentle to explicit.
//!
//! Generators take the RNG as a parameter so callers decide on seeding.
//!
//! ```rust
//! use chem_core::problems::{generate_problem, Difficulty, ProblemKind};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let problem = generate_problem(ProblemKind::Dilution, Difficulty::Beginner, &mut rng);
//! assert_eq!(problem.hints.len(), 3);
//! assert!(problem.check(problem.answer, 2.0));
//! ```

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::numeric::{check_answer, round_to};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    Molarity,
    Dilution,
    MassToMoles,
}

/// One given value shown to the student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Given {
    pub name: String,
    pub value: f64,
    pub unit: String,
}

fn given(name: &str, value: f64, unit: &str) -> Given {
    Given {
        name: name.to_string(),
        value,
        unit: unit.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub id: Uuid,
    pub kind: ProblemKind,
    pub given: Vec<Given>,
    pub answer: f64,
    pub unit: String,
    pub difficulty: Difficulty,
    pub hints: [String; 3],
}

impl Problem {
    /// Check a numeric answer within `tolerance_percent`
    pub fn check(&self, user_answer: f64, tolerance_percent: f64) -> bool {
        check_answer(user_answer, self.answer, tolerance_percent)
    }

    pub fn given_value(&self, name: &str) -> Option<f64> {
        self.given.iter().find(|g| g.name == name).map(|g| g.value)
    }
}

/// Compounds used in the generated problems: (name, formula, g/mol)
const COMPOUNDS: [(&str, &str, f64); 6] = [
    ("sodium chloride", "NaCl", 58.44),
    ("glucose", "C6H12O6", 180.16),
    ("potassium nitrate", "KNO3", 101.10),
    ("calcium chloride", "CaCl2", 110.98),
    ("sodium hydroxide", "NaOH", 40.00),
    ("copper(II) sulfate", "CuSO4", 159.61),
];

fn pick<T: Copy>(rng: &mut impl Rng, values: &[T]) -> T {
    values[rng.gen_range(0..values.len())]
}

/// Generate a problem of `kind` at `difficulty`.
pub fn generate_problem(kind: ProblemKind, difficulty: Difficulty, rng: &mut impl Rng) -> Problem {
    let problem = match kind {
        ProblemKind::Molarity => molarity_problem(difficulty, rng),
        ProblemKind::Dilution => dilution_problem(difficulty, rng),
        ProblemKind::MassToMoles => mass_to_moles_problem(difficulty, rng),
    };
    debug!("Generated {:?} problem at {:?}: answer {}", kind, difficulty, problem.answer);
    problem
}

/// Version 4 id drawn from the injected RNG, so seeded runs repeat
pub(crate) fn problem_id(rng: &mut impl Rng) -> Uuid {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}

fn molarity_problem(difficulty: Difficulty, rng: &mut impl Rng) -> Problem {
    let (name, formula, molar_mass) = pick(rng, &COMPOUNDS);
    let (moles, volume_ml): (f64, f64) = match difficulty {
        Difficulty::Beginner => (pick(rng, &[0.1, 0.2, 0.5, 1.0]), pick(rng, &[500.0, 1000.0])),
        Difficulty::Intermediate => (pick(rng, &[0.05, 0.15, 0.25, 0.4]), pick(rng, &[250.0, 500.0, 750.0])),
        Difficulty::Advanced => (round_to(rng.gen_range(0.01..0.5), 3), round_to(rng.gen_range(50.0..900.0), 0)),
    };
    let mass = round_to(moles * molar_mass, 2);
    let answer = round_to((mass / molar_mass) / (volume_ml / 1000.0), 4);

    Problem {
        id: problem_id(rng),
        kind: ProblemKind::Molarity,
        given: vec![
            given("mass", mass, "g"),
            given("molar_mass", molar_mass, "g/mol"),
            given("volume", volume_ml, "mL"),
        ],
        answer,
        unit: "M".to_string(),
        difficulty,
        hints: [
            format!("Molarity is moles of {} per litre of solution.", name),
            format!("First find moles: n = m / M, using {} g/mol for {}.", molar_mass, formula),
            format!(
                "n = {} g / {} g/mol, then divide by {} L.",
                mass,
                molar_mass,
                volume_ml / 1000.0
            ),
        ],
    }
}

fn dilution_problem(difficulty: Difficulty, rng: &mut impl Rng) -> Problem {
    let (c1, v1, v2): (f64, f64, f64) = match difficulty {
        Difficulty::Beginner => {
            let c1 = pick(rng, &[1.0, 2.0, 5.0]);
            let v1 = pick(rng, &[10.0, 50.0, 100.0]);
            (c1, v1, v1 * pick(rng, &[2.0, 5.0, 10.0]))
        }
        Difficulty::Intermediate => {
            let c1 = pick(rng, &[0.5, 1.5, 2.5, 6.0]);
            let v1 = pick(rng, &[25.0, 40.0, 75.0]);
            (c1, v1, v1 + pick(rng, &[100.0, 150.0, 225.0]))
        }
        Difficulty::Advanced => {
            let c1 = round_to(rng.gen_range(0.5..12.0), 2);
            let v1 = round_to(rng.gen_range(5.0..100.0), 1);
            (c1, v1, round_to(v1 + rng.gen_range(50.0..900.0), 1))
        }
    };
    let answer = round_to(c1 * v1 / v2, 4);

    Problem {
        id: problem_id(rng),
        kind: ProblemKind::Dilution,
        given: vec![
            given("c1", c1, "M"),
            given("v1", v1, "mL"),
            given("v2", v2, "mL"),
        ],
        answer,
        unit: "M".to_string(),
        difficulty,
        hints: [
            "The moles of solute do not change when you add water.".to_string(),
            "Use C₁V₁ = C₂V₂ and solve for C₂.".to_string(),
            format!("C₂ = {} M × {} mL / {} mL.", c1, v1, v2),
        ],
    }
}

fn mass_to_moles_problem(difficulty: Difficulty, rng: &mut impl Rng) -> Problem {
    let (name, formula, molar_mass) = pick(rng, &COMPOUNDS);
    let mass = match difficulty {
        Difficulty::Beginner => round_to(pick(rng, &[0.5, 1.0, 2.0]) * molar_mass, 2),
        Difficulty::Intermediate => pick(rng, &[10.0, 25.0, 50.0, 100.0]),
        Difficulty::Advanced => round_to(rng.gen_range(1.0..250.0), 2),
    };
    let answer = round_to(mass / molar_mass, 4);

    Problem {
        id: problem_id(rng),
        kind: ProblemKind::MassToMoles,
        given: vec![given("mass", mass, "g"), given("molar_mass", molar_mass, "g/mol")],
        answer,
        unit: "mol".to_string(),
        difficulty,
        hints: [
            format!("How many grams does one mole of {} weigh?", name),
            format!("The molar mass of {} is {} g/mol.", formula, molar_mass),
            format!("n = {} g / {} g/mol.", mass, molar_mass),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const KINDS: [ProblemKind; 3] = [ProblemKind::Molarity, ProblemKind::Dilution, ProblemKind::MassToMoles];
    const DIFFICULTIES: [Difficulty; 3] = [Difficulty::Beginner, Difficulty::Intermediate, Difficulty::Advanced];

    #[test]
    fn test_answers_consistent_with_givens() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            for kind in KINDS {
                for difficulty in DIFFICULTIES {
                    let p = generate_problem(kind, difficulty, &mut rng);
                    let expected = match kind {
                        ProblemKind::Molarity => {
                            p.given_value("mass").unwrap() / p.given_value("molar_mass").unwrap()
                                / (p.given_value("volume").unwrap() / 1000.0)
                        }
                        ProblemKind::Dilution => {
                            p.given_value("c1").unwrap() * p.given_value("v1").unwrap() / p.given_value("v2").unwrap()
                        }
                        ProblemKind::MassToMoles => p.given_value("mass").unwrap() / p.given_value("molar_mass").unwrap(),
                    };
                    assert!(p.check(expected, 1.0), "{:?} {:?}: {} vs {}", kind, difficulty, expected, p.answer);
                    assert!(p.answer > 0.0);
                    assert_eq!(p.kind, kind);
                    assert_eq!(p.difficulty, difficulty);
                }
            }
        }
    }

    #[test]
    fn test_hints_non_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = generate_problem(ProblemKind::Molarity, Difficulty::Intermediate, &mut rng);
        assert!(p.hints.iter().all(|h| !h.is_empty()));
        assert_eq!(p.unit, "M");
    }

    #[test]
    fn test_dilution_lowers_concentration() {
        let mut rng = StdRng::seed_from_u64(9);
        for difficulty in DIFFICULTIES {
            let p = generate_problem(ProblemKind::Dilution, difficulty, &mut rng);
            assert!(p.answer < p.given_value("c1").unwrap());
        }
    }

    #[test]
    fn test_ids_unique() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = generate_problem(ProblemKind::MassToMoles, Difficulty::Beginner, &mut rng);
        let b = generate_problem(ProblemKind::MassToMoles, Difficulty::Beginner, &mut rng);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_seeded_generation_repeats() {
        let first = generate_problem(ProblemKind::Molarity, Difficulty::Advanced, &mut StdRng::seed_from_u64(7));
        let second = generate_problem(ProblemKind::Molarity, Difficulty::Advanced, &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
        assert_eq!(first.id.get_version_num(), 4);
    }

    #[test]
    fn test_check_uses_tolerance() {
        let mut rng = StdRng::seed_from_u64(5);
        let p = generate_problem(ProblemKind::MassToMoles, Difficulty::Intermediate, &mut rng);
        assert!(p.check(p.answer * 1.01, 2.0));
        assert!(!p.check(p.answer * 1.05 + 0.02, 2.0));
    }

    #[test]
    fn test_difficulty_json() {
        assert_eq!(serde_json::to_string(&Difficulty::Intermediate).unwrap(), "\"intermediate\"");
        assert_eq!(serde_json::to_string(&ProblemKind::MassToMoles).unwrap(), "\"mass_to_moles\"");
    }
}
