//! pet-health: command-line driver for the pet health record store
//!
//! # Subcommands
//! - `pet add|show|list`                    : manage pet records
//! - `weight add <pet-id> <date> <kg>`      : record a weight sample
//! - `vaccine add <pet-id> <name> [...]`    : record a vaccine
//! - `assess <pet-id> [--json|--csv]`       : run the risk engine
//! - `report [--date]`                      : CSV report for every pet

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use pet_health_core::models::{DietQuality, ExerciseLevel, VetVisitFrequency};
use pet_health_core::{
    AppConfig, Database, HealthAssessment, HealthEngine, HealthReport, LifestyleInput, Pet,
    ReportExporter, Species, VaccineRecord, WeightProjection, WeightSample,
};

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "pet-health",
    version,
    about = "Pet health records, risk scores and weight projections"
)]
struct Cli {
    /// TOML config file (overrides PET_HEALTH_CONFIG env var)
    #[arg(long, env = "PET_HEALTH_CONFIG")]
    config: Option<String>,

    /// Database path (overrides the configured store path)
    #[arg(long)]
    db: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage pets
    Pet {
        #[command(subcommand)]
        action: PetAction,
    },

    /// Manage weight history
    Weight {
        #[command(subcommand)]
        action: WeightAction,
    },

    /// Manage vaccination records
    Vaccine {
        #[command(subcommand)]
        action: VaccineAction,
    },

    /// Run the risk and projection engine for one pet
    Assess {
        /// Pet local ID
        pet_id: String,

        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long, value_enum)]
        exercise: Option<ExerciseArg>,

        #[arg(long, value_enum)]
        diet: Option<DietArg>,

        #[arg(long, value_enum)]
        vet_visits: Option<VetVisitsArg>,

        /// Print the full report as JSON
        #[arg(long, conflicts_with = "csv")]
        json: bool,

        /// Print one CSV row per risk
        #[arg(long)]
        csv: bool,
    },

    /// CSV report for every stored pet
    Report {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Debug, Subcommand)]
enum PetAction {
    /// Register a pet
    Add {
        name: String,

        /// Species label (dog, cat, perro, gato, ...)
        #[arg(long, default_value = "dog")]
        species: String,

        #[arg(long)]
        breed: Option<String>,

        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        born: Option<NaiveDate>,

        #[arg(long)]
        weight: Option<f64>,

        #[arg(long)]
        sterilized: bool,
    },

    /// Show one pet with its history
    Show { pet_id: String },

    /// List pets, optionally filtered by name prefix
    List {
        #[arg(long)]
        search: Option<String>,

        #[arg(short = 'n', long, default_value_t = 50)]
        limit: usize,
    },
}

#[derive(Debug, Subcommand)]
enum WeightAction {
    /// Record a weight sample
    Add {
        pet_id: String,
        date: NaiveDate,
        weight_kg: f64,
    },
}

#[derive(Debug, Subcommand)]
enum VaccineAction {
    /// Record a vaccine
    Add {
        pet_id: String,
        name: String,

        #[arg(long)]
        applied: Option<NaiveDate>,

        #[arg(long)]
        due: Option<NaiveDate>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExerciseArg {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DietArg {
    Poor,
    Average,
    Good,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum VetVisitsArg {
    Never,
    Sometimes,
    Regular,
}

impl From<ExerciseArg> for ExerciseLevel {
    fn from(arg: ExerciseArg) -> Self {
        match arg {
            ExerciseArg::Low => ExerciseLevel::Low,
            ExerciseArg::Medium => ExerciseLevel::Medium,
            ExerciseArg::High => ExerciseLevel::High,
        }
    }
}

impl From<DietArg> for DietQuality {
    fn from(arg: DietArg) -> Self {
        match arg {
            DietArg::Poor => DietQuality::Poor,
            DietArg::Average => DietQuality::Average,
            DietArg::Good => DietQuality::Good,
        }
    }
}

impl From<VetVisitsArg> for VetVisitFrequency {
    fn from(arg: VetVisitsArg) -> Self {
        match arg {
            VetVisitsArg::Never => VetVisitFrequency::Never,
            VetVisitsArg::Sometimes => VetVisitFrequency::Sometimes,
            VetVisitsArg::Regular => VetVisitFrequency::Regular,
        }
    }
}

/// Lifestyle is only applied when at least one answer was given.
fn lifestyle_from_args(
    exercise: Option<ExerciseArg>,
    diet: Option<DietArg>,
    vet_visits: Option<VetVisitsArg>,
) -> Option<LifestyleInput> {
    if exercise.is_none() && diet.is_none() && vet_visits.is_none() {
        return None;
    }
    Some(LifestyleInput {
        exercise: exercise.map(Into::into).unwrap_or_default(),
        diet: diet.map(Into::into).unwrap_or_default(),
        vet_visits: vet_visits.map(Into::into).unwrap_or_default(),
    })
}

// ============================================================================
// Command Handlers
// ============================================================================

fn today_or(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| chrono::Local::now().date_naive())
}

fn do_pet(db: &Database, action: PetAction) -> anyhow::Result<()> {
    match action {
        PetAction::Add {
            name,
            species,
            breed,
            born,
            weight,
            sterilized,
        } => {
            if name.trim().is_empty() {
                bail!("pet name is required");
            }
            let mut pet = Pet::new(name, Species::from_label(&species));
            pet.breed = breed;
            pet.birth_date = born;
            pet.weight_kg = weight;
            pet.is_sterilized = sterilized;
            db.insert_pet(&pet).context("failed to store pet")?;
            println!("{}", pet.local_id);
        }
        PetAction::Show { pet_id } => {
            let profile = db
                .load_profile(&pet_id)
                .with_context(|| format!("cannot load pet {}", pet_id))?;
            let pet = &profile.pet;
            println!("{} ({})", pet.name, pet.species);
            println!("ID:         {}", pet.local_id);
            println!("Breed:      {}", pet.breed.as_deref().unwrap_or("-"));
            println!(
                "Born:       {}",
                pet.birth_date.map(|d| d.to_string()).unwrap_or_else(|| "-".into())
            );
            println!(
                "Weight:     {}",
                pet.weight_kg
                    .map(|w| format!("{:.2} kg", w))
                    .unwrap_or_else(|| "-".into())
            );
            println!("Sterilized: {}", if pet.is_sterilized { "yes" } else { "no" });

            if !profile.weight_history.is_empty() {
                println!("\nWeight history:");
                for sample in &profile.weight_history {
                    println!("  {}  {:.2} kg", sample.date, sample.weight_kg);
                }
            }
            if !profile.vaccines.is_empty() {
                println!("\nVaccines:");
                let today = today_or(None);
                for v in &profile.vaccines {
                    println!("  {:<20} {:?}", v.name, v.status(today));
                }
            }
        }
        PetAction::List { search, limit } => {
            let pets = match search {
                Some(query) => db.search_pets(&query, limit)?,
                None => db.list_pets()?.into_iter().take(limit).collect(),
            };
            for pet in pets {
                println!("{}  {:<16} {}", pet.local_id, pet.name, pet.species.as_str());
            }
        }
    }
    Ok(())
}

fn print_assessment(assessment: &HealthAssessment) {
    println!(
        "{} ({}, {} years), assessed {}",
        assessment.pet_name, assessment.species, assessment.age_years, assessment.assessed_on
    );
    println!();

    for risk in &assessment.risks {
        println!(
            "{:<24} {:>3}%  {:<6}  {}",
            risk.name,
            risk.probability,
            risk.severity.as_str(),
            risk.formula
        );
        for rec in &risk.recommendations {
            println!("    - {}", rec);
        }
    }

    println!();
    match &assessment.weight_projection {
        WeightProjection::Available(trend) => {
            println!(
                "Weight trend: {} ({:+.3} kg/day, ±{:.2} kg)",
                trend.trend.as_str(),
                trend.slope,
                trend.std_dev
            );
            for p in &trend.projections {
                println!(
                    "  +{:>3} days: {:.2} kg [{:.2} – {:.2}]",
                    p.days_ahead, p.weight_kg, p.lower_kg, p.upper_kg
                );
            }
            if let Some(alert) = &trend.alert {
                println!("  {}: {}", alert.level.as_str().to_uppercase(), alert.message);
            }
        }
        WeightProjection::Unavailable { reason } => {
            println!("Weight trend: unavailable ({})", reason);
        }
    }

    let states: Vec<&str> = assessment
        .trajectory
        .iter()
        .map(|p| p.state.as_str())
        .collect();
    println!("Trajectory:   {}", states.join(" → "));
}

// ============================================================================
// Main
// ============================================================================

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let db_path = cli.db.unwrap_or_else(|| config.store.path.clone());
    debug!(db = %db_path, "opening store");

    let db = Database::open(&db_path).with_context(|| format!("cannot open {}", db_path))?;
    let engine = HealthEngine::new(config.engine);

    match cli.command {
        Commands::Pet { action } => do_pet(&db, action)?,
        Commands::Weight {
            action: WeightAction::Add {
                pet_id,
                date,
                weight_kg,
            },
        } => {
            db.add_weight_sample(&pet_id, &WeightSample::new(date, weight_kg))
                .context("failed to record weight")?;
        }
        Commands::Vaccine {
            action: VaccineAction::Add {
                pet_id,
                name,
                applied,
                due,
            },
        } => {
            let record = VaccineRecord {
                name,
                applied_date: applied,
                next_due_date: due,
            };
            db.add_vaccine_record(&pet_id, &record)
                .context("failed to record vaccine")?;
        }
        Commands::Assess {
            pet_id,
            date,
            exercise,
            diet,
            vet_visits,
            json,
            csv,
        } => {
            let lifestyle = lifestyle_from_args(exercise, diet, vet_visits);
            let exporter = ReportExporter::new(&db, &engine);
            let report: HealthReport = exporter
                .export_pet(&pet_id, lifestyle.as_ref(), today_or(date))
                .with_context(|| format!("cannot assess pet {}", pet_id))?;

            if json {
                println!("{}", report.to_json()?);
            } else if csv {
                print!("{}", report.to_csv());
            } else {
                print_assessment(&report.assessment);
            }
        }
        Commands::Report { date } => {
            let batch = ReportExporter::new(&db, &engine).export_all(today_or(date))?;
            print!("{}", batch.to_csv());
        }
    }

    Ok(())
}

/// `RUST_LOG` directives when set and valid, `warn` otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("pet-health: {:#}", e);
        std::process::exit(1);
    }
}

// ============================================================================
// Tests
// ============================================================================
