use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mealpalette::config::Config;
use mealpalette::source::FileSource;
use mealpalette::store::JsonFileStore;
use mealpalette::{App, AppError};
use mealpalette_mealplan::MealTypeFilter;
use mealpalette_shared::{MealSlot, ProduceColor, NUM_DAYS};
use std::time::Duration;

/// mealpalette - weekly meal planning around produce colors
#[derive(Parser)]
#[command(name = "mealpalette")]
#[command(about = "Plan a week of meals, track produce-color variety and build the grocery list", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the week grid with per-day and weekly color coverage
    Plan,
    /// List catalog meals matching the given filters, most relevant first
    Meals {
        /// Only meals of this type (breakfast, lunch or dinner)
        #[arg(long)]
        meal_type: Option<String>,
        /// Only meals containing one of these proteins
        #[arg(long)]
        protein: Vec<String>,
        /// Only meals of one of these cuisines
        #[arg(long)]
        cuisine: Vec<String>,
        /// Only meals covering one of these produce colors
        #[arg(long)]
        color: Vec<String>,
        /// Only meals containing ALL of these ingredients
        #[arg(long)]
        ingredient: Vec<String>,
        /// Only meals using ingredients that expire soon
        #[arg(long)]
        expiring: bool,
    },
    /// Show what to buy: planned demand minus what is on hand
    Grocery,
    /// Show on-hand inventory grouped by storage location
    Stock,
    /// Show on-hand items that expire soon
    Expiring,
    /// Assign a meal to a slot; reports the next empty slot to fill
    Assign {
        /// Day index, 0 through 6
        #[arg(value_parser = clap::value_parser!(u8).range(0..7))]
        day: u8,
        /// breakfast, lunch or dinner
        slot: String,
        /// Catalog meal name (exact)
        meal: String,
    },
    /// Remove the meal from a slot
    Remove {
        #[arg(value_parser = clap::value_parser!(u8).range(0..7))]
        day: u8,
        slot: String,
    },
    /// Clear all three slots of a day
    ClearDay {
        #[arg(value_parser = clap::value_parser!(u8).range(0..7))]
        day: u8,
    },
    /// Clear the whole week
    ClearWeek {
        /// Confirm the destructive clear
        #[arg(long)]
        yes: bool,
    },
    /// Drop the cached catalog and fetch fresh sheet data
    Refresh,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.clone()).map_err(AppError::from)?;
    config.validate().map_err(AppError::ValidationError)?;

    // Initialize observability (tracing + logging)
    mealpalette::observability::init_observability(
        "mealpalette",
        &config.observability.log_level,
    )?;

    let store = JsonFileStore::new(&config.storage.state_dir);
    let mut app = App::new(Box::new(store));

    match cli.command {
        Commands::Refresh => {
            app.invalidate_cache();
            load_fresh(&mut app, &config)?;
            println!(
                "Loaded {} meals, {} inventory items.",
                app.catalog().meals().len(),
                app.catalog().inventory().len()
            );
            return Ok(());
        }
        _ => load_with_cache(&mut app, &config)?,
    }

    match cli.command {
        Commands::Plan => plan_command(&app),
        Commands::Meals {
            meal_type,
            protein,
            cuisine,
            color,
            ingredient,
            expiring,
        } => meals_command(
            &mut app, meal_type, protein, cuisine, color, ingredient, expiring,
        )?,
        Commands::Grocery => grocery_command(&app),
        Commands::Stock => stock_command(&app),
        Commands::Expiring => expiring_command(&app),
        Commands::Assign { day, slot, meal } => assign_command(&mut app, day, &slot, &meal)?,
        Commands::Remove { day, slot } => {
            app.remove_meal(day as usize, parse_slot(&slot)?);
            println!("Removed meal from day {day} {slot}.");
        }
        Commands::ClearDay { day } => {
            app.clear_day(day as usize);
            println!("Cleared day {day}.");
        }
        Commands::ClearWeek { yes } => {
            if !yes {
                anyhow::bail!("clearing the whole week is destructive; re-run with --yes");
            }
            app.clear_week();
            println!("Cleared the week.");
        }
        Commands::Refresh => unreachable!("handled above"),
    }

    Ok(())
}

fn load_with_cache(app: &mut App, config: &Config) -> Result<()> {
    let ttl = Duration::from_secs(config.storage.cache_ttl_secs);
    if app.restore_cached_catalog(ttl) {
        return Ok(());
    }
    load_fresh(app, config)
}

fn load_fresh(app: &mut App, config: &Config) -> Result<()> {
    let fallback = FileSource::new(&config.data.fallback_meals, &config.data.fallback_inventory);
    let result = if config.data.demo_mode {
        app.reload(&fallback, None)
    } else {
        let primary = FileSource::new(&config.data.meals, &config.data.inventory);
        app.reload(&primary, Some(&fallback))
    };
    result
        .map_err(AppError::from)
        .context("re-run `mealpalette refresh` once the sheet exports are reachable")?;
    Ok(())
}

fn parse_slot(value: &str) -> Result<MealSlot> {
    value
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid slot {value:?}: expected breakfast, lunch or dinner"))
}

fn parse_color(value: &str) -> Result<ProduceColor> {
    value.parse().map_err(|_| {
        anyhow::anyhow!(
            "invalid color {value:?}: expected one of red, orange_yellow, green, leafy_green, blue_purple, white_brown"
        )
    })
}

fn plan_command(app: &App) {
    for day in 0..NUM_DAYS {
        println!("Day {day}:");
        for slot in MealSlot::ALL {
            match app.plan().slot(day, slot) {
                Some(meal) => println!("  {slot:>9}: {}", meal.name),
                None => println!("  {slot:>9}: -"),
            }
        }
        let counts = app.day_colors(day);
        let covered: Vec<String> = counts
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(color, count)| format!("{} x{}", color.label(), count))
            .collect();
        if covered.is_empty() {
            println!("  colors: none");
        } else {
            println!("  colors: {}", covered.join(", "));
        }
    }

    println!("Week totals:");
    for (color, count) in app.week_colors().iter() {
        println!("  {:>13}: {count}", color.label());
    }
}

fn meals_command(
    app: &mut App,
    meal_type: Option<String>,
    proteins: Vec<String>,
    cuisines: Vec<String>,
    colors: Vec<String>,
    ingredients: Vec<String>,
    expiring: bool,
) -> Result<()> {
    if let Some(meal_type) = meal_type {
        app.set_meal_type(MealTypeFilter::Slot(parse_slot(&meal_type)?));
    }
    for protein in &proteins {
        app.toggle_protein(protein);
    }
    for cuisine in &cuisines {
        app.toggle_cuisine(cuisine);
    }
    for color in &colors {
        app.toggle_color(parse_color(color)?);
    }
    for ingredient in &ingredients {
        app.toggle_ingredient(ingredient);
    }
    if expiring {
        app.toggle_expiring_only();
    }

    let view = app.meals_view();
    if view.is_empty() {
        println!("No meals match the active filters.");
        return Ok(());
    }
    for meal in view {
        let colors = app.catalog().colors_of(&meal.name);
        let tags: Vec<&str> = colors.iter().map(|color| color.label()).collect();
        let cuisine = if meal.cuisine.is_empty() {
            String::new()
        } else {
            format!(" [{}]", meal.cuisine)
        };
        if tags.is_empty() {
            println!("{}{cuisine}", meal.name);
        } else {
            println!("{}{cuisine} ({})", meal.name, tags.join(", "));
        }
    }
    Ok(())
}

fn grocery_command(app: &App) {
    let list = app.grocery_list();
    if list.is_empty() {
        println!("Nothing to buy.");
        return;
    }
    for (ingredient, servings) in list {
        println!("{ingredient}: {servings}");
    }
}

fn stock_command(app: &App) {
    for (location, items) in app.stock_by_location() {
        println!("{location}:");
        if items.is_empty() {
            println!("  (empty)");
            continue;
        }
        for item in items {
            let mut notes = Vec::new();
            if item.expires_soon {
                notes.push("expires soon".to_string());
            }
            if item.needed > 0 {
                notes.push(format!("{} planned", item.needed));
            }
            if item.fully_used {
                notes.push("fully used".to_string());
            }
            if notes.is_empty() {
                println!("  {} x{}", item.name, item.quantity);
            } else {
                println!("  {} x{} ({})", item.name, item.quantity, notes.join(", "));
            }
        }
    }
}

fn expiring_command(app: &App) {
    let items = app.expiring_items();
    if items.is_empty() {
        println!("Nothing expiring soon.");
        return;
    }
    for item in items {
        if item.fully_used {
            println!("{} x{} - fully used by the plan", item.name, item.quantity);
        } else {
            println!(
                "{} x{} - {} of {} planned",
                item.name, item.quantity, item.needed, item.quantity
            );
        }
    }
}

fn assign_command(app: &mut App, day: u8, slot: &str, meal: &str) -> Result<()> {
    let slot = parse_slot(slot)?;
    app.select_slot(day as usize, slot);
    if !app.assign_meal(meal) {
        anyhow::bail!("no meal named {meal:?} in the catalog");
    }
    println!("Assigned {meal:?} to day {day} {slot}.");
    match app.selection() {
        Some(next) => println!("Next empty slot: day {} {}.", next.day, next.slot),
        None => println!("The week is full."),
    }
    Ok(())
}
