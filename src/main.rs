mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use dialoguer::{Input, Select};
use serde::Serialize;
use smart_irrigation::app::{App, AppState};
use smart_irrigation::config::Config;
use smart_irrigation::error::{IrrigationError, Result};
use smart_irrigation::logic::{DatasetLoader, IrrigationService};
use smart_irrigation::models::{CropSoilRecord, IrrigationRecommendation};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Init = cli.command {
        Config::setup_interactive()?;
        return Ok(());
    }

    let config = Config::load(cli.config.clone())?;
    let dataset_path = config.dataset_path(cli.dataset.as_ref());

    let loader = DatasetLoader::spawn(dataset_path);
    let mut app = App::new(config);
    app.on_loaded(loader.wait().await);

    if let AppState::Error(message) = &app.state {
        return Err(IrrigationError::DataUnavailable(message.clone()));
    }
    let service = app
        .service()
        .cloned()
        .ok_or_else(|| IrrigationError::DataUnavailable("dataset not loaded".into()))?;

    match cli.command {
        Commands::Crops { category } => {
            let crops = match category {
                Some(c) => service.list_crops_in_category(&c),
                None => service.list_crop_names(),
            };
            print_list(&crops, cli.json)
        }
        Commands::Soils => print_list(&service.list_soil_types(), cli.json),
        Commands::Categories => print_list(&service.list_categories(), cli.json),
        Commands::Lookup { crop, soil } => {
            let record = lookup(&service, &crop, &soil)?;
            if cli.json {
                print_json(&record)
            } else {
                print_record(&record);
                Ok(())
            }
        }
        Commands::Recommend {
            crop,
            soil,
            moisture,
        } => {
            let record = lookup(&service, &crop, &soil)?;
            let moisture = moisture.unwrap_or(app.soil_moisture);
            let recommendation = service.recommend(&record, moisture);
            tracing::debug!(
                "Recommendation for {} at {}% moisture: {:?}",
                record,
                moisture,
                recommendation
            );
            if cli.json {
                print_json(&RecommendationReport {
                    record: &record,
                    soil_moisture_percent: moisture,
                    recommendation: &recommendation,
                })
            } else {
                print_record(&record);
                print_recommendation(moisture, &recommendation);
                Ok(())
            }
        }
        Commands::Summary => {
            let summary = service.dataset().summary();
            if cli.json {
                print_json(&summary)
            } else {
                if let Some(source) = &summary.source {
                    println!("Source:  {}", source);
                }
                println!("Loaded:  {}", summary.loaded_at.format("%Y-%m-%d %H:%M:%S UTC"));
                println!("{}", summary);
                Ok(())
            }
        }
        Commands::Interactive => run_interactive(&mut app),
        Commands::Init => Ok(()),
    }
}

#[derive(Serialize)]
struct RecommendationReport<'a> {
    record: &'a CropSoilRecord,
    soil_moisture_percent: f32,
    recommendation: &'a IrrigationRecommendation,
}

fn lookup(service: &IrrigationService, crop: &str, soil: &str) -> Result<CropSoilRecord> {
    service
        .lookup(crop, soil)
        .ok_or_else(|| IrrigationError::NotFound(format!("no data for {} in {}", crop, soil)))
}

fn print_list(items: &[String], json: bool) -> Result<()> {
    if json {
        return print_json(&items);
    }
    for item in items {
        println!("{}", item);
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_record(record: &CropSoilRecord) {
    println!("{}", record);
    println!(
        "  Base water:      {:.1} mm/season",
        record.base_water_mm_per_season
    );
    println!(
        "  Adjusted water:  {:.1} mm/season",
        record.adjusted_water_mm_per_season
    );
    println!(
        "  Frequency:       x{:.2}",
        record.irrigation_frequency_multiplier
    );
    if !record.source.is_empty() {
        println!("  Source:          {}", record.source);
    }
}

fn print_recommendation(moisture: f32, recommendation: &IrrigationRecommendation) {
    println!();
    println!("Soil moisture: {:.0}%", moisture);
    println!("{}", recommendation);
}

fn prompt_error(e: dialoguer::Error) -> IrrigationError {
    IrrigationError::Config(format!("Input error: {}", e))
}

fn run_interactive(app: &mut App) -> Result<()> {
    app.select_defaults();

    let categories = match app.ready() {
        Some(ready) => ready.categories.clone(),
        None => return Ok(()),
    };

    let mut category_items = vec!["All categories".to_string()];
    category_items.extend(categories.iter().cloned());
    let picked = Select::new()
        .with_prompt("Category")
        .items(&category_items)
        .default(0)
        .interact()
        .map_err(prompt_error)?;
    app.on_category_selected(if picked == 0 {
        ""
    } else {
        categories[picked - 1].as_str()
    });

    let (crops, soil_types) = match app.ready() {
        Some(ready) => (ready.crops.clone(), ready.soil_types.clone()),
        None => return Ok(()),
    };

    let crop_default = crops
        .iter()
        .position(|c| *c == app.selected_crop)
        .unwrap_or(0);
    let crop = Select::new()
        .with_prompt("Crop/Plant")
        .items(&crops)
        .default(crop_default)
        .interact()
        .map_err(prompt_error)?;
    app.on_crop_selected(&crops[crop]);

    let soil_default = soil_types
        .iter()
        .position(|s| *s == app.selected_soil_type)
        .unwrap_or(0);
    let soil = Select::new()
        .with_prompt("Soil type")
        .items(&soil_types)
        .default(soil_default)
        .interact()
        .map_err(prompt_error)?;
    app.on_soil_type_selected(&soil_types[soil]);

    if let Some(record) = app.ready().and_then(|r| r.current_crop.clone()) {
        print_record(&record);
    } else {
        println!(
            "No data for {} in {}",
            app.selected_crop, app.selected_soil_type
        );
        return Ok(());
    }

    loop {
        let input: String = Input::new()
            .with_prompt("Soil moisture % (blank to quit)")
            .allow_empty(true)
            .validate_with(|v: &String| {
                if v.trim().is_empty() {
                    return Ok(());
                }
                match v.trim().parse::<f32>() {
                    Ok(m) if (0.0..=100.0).contains(&m) => Ok(()),
                    _ => Err("enter a number between 0 and 100"),
                }
            })
            .interact_text()
            .map_err(prompt_error)?;

        let Ok(moisture) = input.trim().parse::<f32>() else {
            break;
        };

        app.on_soil_moisture_changed(moisture);
        if let Some(recommendation) = app.recommendation() {
            print_recommendation(moisture, recommendation);
        }
    }

    Ok(())
}
