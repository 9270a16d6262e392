use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use intake_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "intake")]
#[command(about = "Calorie and fitness tracking from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the profile and its derived health metrics
    Profile,

    /// Adjust calorie and macro gram targets
    Target {
        /// Calorie target (kcal/day)
        #[arg(long)]
        calories: Option<u32>,

        /// Protein target in grams
        #[arg(long)]
        protein: Option<i64>,

        /// Carbs target in grams
        #[arg(long)]
        carbs: Option<i64>,

        /// Fat target in grams
        #[arg(long)]
        fat: Option<i64>,
    },

    /// Show one day's log
    Day {
        /// ISO date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Log a food item into a meal section
    Meal {
        /// Section: Breakfast, Lunch, Snacks, or Dinner
        #[arg(long)]
        section: String,

        #[arg(long)]
        title: String,

        #[arg(long)]
        calories: u32,

        #[arg(long, default_value_t = 0.0)]
        protein: f64,

        #[arg(long, default_value_t = 0.0)]
        carbs: f64,

        #[arg(long, default_value_t = 0.0)]
        fat: f64,

        #[arg(long)]
        date: Option<String>,
    },

    /// Add water to today's total
    Water {
        /// Amount in milliliters
        #[arg(long)]
        amount: u32,

        #[arg(long)]
        date: Option<String>,
    },

    /// Log an exercise by catalog name
    Exercise {
        #[arg(long)]
        name: String,

        #[arg(long)]
        minutes: u32,

        #[arg(long)]
        date: Option<String>,
    },

    /// List the exercise catalog
    Exercises,

    /// Weekly macro percentage rollup
    Week {
        /// Any date inside the week; defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Record a weight measurement and show the week's trend
    Weight {
        /// Weight in kilograms; omit to only show the trend
        #[arg(long)]
        kg: Option<f64>,

        #[arg(long)]
        date: Option<String>,
    },

    /// Export daily summaries to CSV
    Export {
        /// Output CSV path
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    intake_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let log = LogStore::new(FileStore::new(data_dir));

    match cli.command {
        Commands::Profile => cmd_profile(&log),
        Commands::Target {
            calories,
            protein,
            carbs,
            fat,
        } => cmd_target(&log, &config, calories, protein, carbs, fat),
        Commands::Day { date } => cmd_day(&log, date),
        Commands::Meal {
            section,
            title,
            calories,
            protein,
            carbs,
            fat,
            date,
        } => cmd_meal(&log, section, title, calories, protein, carbs, fat, date),
        Commands::Water { amount, date } => cmd_water(&log, &config, amount, date),
        Commands::Exercise {
            name,
            minutes,
            date,
        } => cmd_exercise(&log, name, minutes, date),
        Commands::Exercises => cmd_exercises(),
        Commands::Week { date } => cmd_week(&log, &config, date),
        Commands::Weight { kg, date } => cmd_weight(&log, &config, kg, date),
        Commands::Export { out } => cmd_export(&log, out),
    }
}

/// Validate a YYYY-MM-DD argument, or default to today's local date.
fn resolve_date(date: Option<String>) -> Result<NaiveDate> {
    match date {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|_| Error::Parse(format!("invalid date (expected YYYY-MM-DD): {raw:?}"))),
        None => Ok(Local::now().date_naive()),
    }
}

fn resolve_date_key(date: Option<String>) -> Result<String> {
    Ok(resolve_date(date)?.format("%Y-%m-%d").to_string())
}

fn time_of_day() -> String {
    Local::now().format("%I:%M %p").to_string()
}

fn cmd_profile(log: &LogStore<FileStore>) -> Result<()> {
    let Some(profile) = log.load_profile() else {
        println!("No profile found. Complete onboarding in the app or set targets with `intake target`.");
        return Ok(());
    };

    if let Some(gender) = profile.gender {
        println!("Gender:          {}", gender.label());
    }
    if let Some(birthdate) = &profile.birthdate {
        println!("Birthdate:       {birthdate}");
    }
    if let Some(height) = &profile.height_raw {
        println!("Height:          {height}");
    }
    if let Some(weight) = &profile.weight_raw {
        println!("Weight:          {weight}");
    }
    if let Some(goal) = profile.goal {
        println!("Goal:            {}", goal.label());
    }
    if let Some(target) = profile.calorie_target {
        println!("Calorie target:  {target} cal/day");
    }
    if let Some(macros) = profile.macro_targets {
        println!(
            "Macro targets:   {}g protein / {}g carbs / {}g fat",
            macros.protein, macros.carbs, macros.fat
        );
    }

    match profile_metrics(&profile, Local::now().date_naive()) {
        Ok(derived) => {
            println!();
            println!("Age:             {} years", derived.age_years);
            println!("BMR:             {} cal/day", derived.bmr);
            for (level, budget) in metrics::activity_budgets(derived.bmr) {
                println!("  {:<16} {budget} cal/day", level.label());
            }
            println!(
                "BMI:             {} ({})",
                derived.bmi,
                derived.bmi_category.label()
            );
        }
        Err(e) => {
            tracing::debug!("Metrics unavailable: {e}");
            println!();
            println!("Derived metrics unavailable (profile incomplete).");
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_target(
    log: &LogStore<FileStore>,
    config: &Config,
    calories: Option<u32>,
    protein: Option<i64>,
    carbs: Option<i64>,
    fat: Option<i64>,
) -> Result<()> {
    let mut profile = log.load_profile().unwrap_or_default();

    if let Some(calories) = calories {
        profile.calorie_target = Some(calories);
    }

    let cap = config.goals.macro_gram_cap;
    let mut macros = profile
        .macro_targets
        .unwrap_or_else(targets::default_macro_split);
    if let Some(protein) = protein {
        macros.protein = targets::clamp_macro_grams(protein, cap);
    }
    if let Some(carbs) = carbs {
        macros.carbs = targets::clamp_macro_grams(carbs, cap);
    }
    if let Some(fat) = fat {
        macros.fat = targets::clamp_macro_grams(fat, cap);
    }
    profile.macro_targets = Some(macros);

    log.save_profile(&profile)?;

    println!(
        "Targets saved: {} cal/day, {}g protein / {}g carbs / {}g fat",
        profile
            .calorie_target
            .map_or_else(|| "unset".into(), |c| c.to_string()),
        macros.protein,
        macros.carbs,
        macros.fat
    );
    Ok(())
}

fn cmd_day(log: &LogStore<FileStore>, date: Option<String>) -> Result<()> {
    let date = resolve_date_key(date)?;
    let day = log.load_day(&date);

    println!("{date}");
    println!(
        "Calories: {} eaten / {} burned",
        day.calories.eaten, day.calories.burned
    );
    println!(
        "Macros:   {:.0}g protein / {:.0}g carbs / {:.0}g fat",
        day.macros.protein, day.macros.carbs, day.macros.fat
    );
    println!("Water:    {}ml", day.water);

    for section in &day.meals {
        println!("{} ({} cal)", section.title, section.total_calories);
        for item in &section.items {
            println!("  {} - {} cal ({})", item.title, item.calories, item.time);
        }
    }

    if !day.exercises.is_empty() {
        println!("Exercises");
        for entry in &day.exercises {
            println!(
                "  {} - {} min, {} cal ({})",
                entry.name, entry.duration_minutes, entry.calories, entry.time
            );
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_meal(
    log: &LogStore<FileStore>,
    section: String,
    title: String,
    calories: u32,
    protein: f64,
    carbs: f64,
    fat: f64,
    date: Option<String>,
) -> Result<()> {
    let date = resolve_date_key(date)?;
    let day = log.load_day(&date);

    let item = MealItem::new(
        title,
        calories,
        MacroGrams {
            protein,
            carbs,
            fat,
        },
        time_of_day(),
    );

    let updated = daylog::apply_meal_item(&day, &section, item);
    if updated == day {
        println!(
            "Unknown meal section {section:?}. Sections: {}",
            DailyData::MEAL_SECTIONS.join(", ")
        );
        return Ok(());
    }

    log.save_day(&date, &updated)?;
    println!(
        "Logged. {date}: {} cal eaten, {} in {section}",
        updated.calories.eaten,
        updated
            .meals
            .iter()
            .find(|s| s.title == section)
            .map_or(0, |s| s.total_calories)
    );
    Ok(())
}

fn cmd_water(
    log: &LogStore<FileStore>,
    config: &Config,
    amount: u32,
    date: Option<String>,
) -> Result<()> {
    let date = resolve_date_key(date)?;
    let day = log.load_day(&date);

    let new_total = day.water.saturating_add(amount);
    let updated = daylog::apply_water_update(&day, new_total, config.goals.daily_water_ml);
    log.save_day(&date, &updated)?;

    println!(
        "Water on {date}: {}ml / {}ml",
        updated.water, config.goals.daily_water_ml
    );
    Ok(())
}

fn cmd_exercise(
    log: &LogStore<FileStore>,
    name: String,
    minutes: u32,
    date: Option<String>,
) -> Result<()> {
    let date = resolve_date_key(date)?;

    let calories = exercise_calories(&name, minutes);
    if calories == 0 && catalog::calories_per_30_min(&name).is_none() {
        println!("{name:?} is not in the catalog (see `intake exercises`); logging 0 calories.");
    }

    let day = log.load_day(&date);
    let updated = daylog::apply_exercise(
        &day,
        ExerciseEntry::new(name, minutes, calories, time_of_day()),
    );
    log.save_day(&date, &updated)?;

    println!(
        "Logged. {date}: {} cal burned total",
        updated.calories.burned
    );
    Ok(())
}

fn cmd_exercises() -> Result<()> {
    for name in catalog::exercise_names() {
        let per_30 = catalog::calories_per_30_min(name).unwrap_or(0);
        println!("{per_30:>4} cal/30min  {name}");
    }
    Ok(())
}

fn cmd_week(log: &LogStore<FileStore>, config: &Config, date: Option<String>) -> Result<()> {
    let reference = resolve_date(date)?;

    let days = log.load_all_days();
    let window = week_window(reference, config.week.starts_on);
    let series = rollup::weekly_macro_series(&window, |date| {
        days.get(&date.format("%Y-%m-%d").to_string()).cloned()
    });

    println!("Nutrition (%) for week of {}", window[0]);
    for point in series {
        let p = point.percentages;
        println!(
            "{}  protein {:>3}%  carbs {:>3}%  fat {:>3}%",
            point.date, p.protein, p.carbs, p.fat
        );
    }
    Ok(())
}

fn cmd_weight(
    log: &LogStore<FileStore>,
    config: &Config,
    kg: Option<f64>,
    date: Option<String>,
) -> Result<()> {
    let reference = resolve_date(date)?;
    let date = reference.format("%Y-%m-%d").to_string();

    if let Some(kg) = kg {
        log.record_weight(WeightEntry {
            date: date.clone(),
            weight: kg,
        })?;
        println!("Recorded {kg} kg on {date}");
    }

    let series = rollup::weekly_weight_series(&log.load_weights(), reference, config.week.starts_on);
    if series.is_empty() {
        println!("No weight entries this week.");
    } else {
        for entry in series {
            println!("{}  {:.1} kg", entry.date, entry.weight);
        }
    }
    Ok(())
}

fn cmd_export(log: &LogStore<FileStore>, out: PathBuf) -> Result<()> {
    let count = export::export_daily_summaries(&log.load_all_days(), &out)?;
    println!("Exported {count} days to {}", out.display());
    Ok(())
}
