// ==========================================
// Bakery Cost Calculator - command line interface
// ==========================================
// clap definitions plus dispatch onto AppState.
// Every command yields a JSON value for stdout.
// ==========================================

use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};

use crate::api::ApiResult;
use crate::app::AppState;
use crate::config::{LogFormat, ENV_DB_PATH, ENV_LOG_FORMAT};
use crate::domain::material::MaterialDraft;
use crate::domain::recipe::{RecipeDraft, RecipeLine};
use crate::domain::types::{MaterialCategory, MaterialUnit};

#[derive(Parser, Debug)]
#[command(name = "bakery-cost")]
#[command(about = "Bakery cost calculator: materials, recipes and suggested prices")]
#[command(version)]
pub struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = ENV_DB_PATH)]
    pub db: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_enum, env = ENV_LOG_FORMAT)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database and seed default settings
    Init,

    /// Material catalog
    #[command(subcommand)]
    Materials(MaterialCommand),

    /// Recipes
    #[command(subcommand)]
    Recipes(RecipeCommand),

    /// Labor, overhead and margin settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Cost calculation
    #[command(subcommand)]
    Cost(CostCommand),
}

// ==========================================
// materials
// ==========================================
#[derive(Subcommand, Debug)]
pub enum MaterialCommand {
    List,
    Show {
        id: String,
    },
    Add(MaterialArgs),
    Update {
        id: String,
        #[command(flatten)]
        fields: MaterialArgs,
    },
    Delete {
        id: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct MaterialArgs {
    #[arg(long)]
    pub name: String,

    /// flour | dairy | sugar | fat | other
    #[arg(long, value_parser = parse_category)]
    pub category: MaterialCategory,

    /// gram | milliliter | piece (g, ml, pc accepted)
    #[arg(long, value_parser = parse_unit)]
    pub unit: MaterialUnit,

    /// Price of one package
    #[arg(long)]
    pub price: f64,

    /// Package content, in `unit`
    #[arg(long)]
    pub package_size: f64,
}

impl From<MaterialArgs> for MaterialDraft {
    fn from(args: MaterialArgs) -> Self {
        MaterialDraft {
            name: args.name,
            category: args.category,
            unit: args.unit,
            unit_price: args.price,
            package_size: args.package_size,
        }
    }
}

// ==========================================
// recipes
// ==========================================
#[derive(Subcommand, Debug)]
pub enum RecipeCommand {
    List,
    Show {
        id: String,
    },
    Add(RecipeArgs),
    Update {
        id: String,
        #[command(flatten)]
        fields: RecipeArgs,
    },
    Delete {
        id: String,
    },
    /// Duplicate a recipe under a new id
    Copy {
        id: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RecipeArgs {
    #[arg(long)]
    pub name: String,

    /// Finished units per batch
    #[arg(long = "yield")]
    pub yield_count: i64,

    #[arg(long, default_value_t = 0)]
    pub labor_minutes: i64,

    #[arg(long)]
    pub notes: Option<String>,

    /// Material line as MATERIAL_ID=QUANTITY, repeatable
    #[arg(long = "line", value_parser = parse_line)]
    pub lines: Vec<RecipeLine>,
}

impl From<RecipeArgs> for RecipeDraft {
    fn from(args: RecipeArgs) -> Self {
        RecipeDraft {
            product_name: args.name,
            yield_count: args.yield_count,
            labor_time_minutes: args.labor_minutes,
            notes: args.notes,
            materials: args.lines,
        }
    }
}

// ==========================================
// settings / cost
// ==========================================
#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    Show,
    /// Change one or more settings; the rest keep their value
    Set {
        #[arg(long)]
        labor_cost_per_hour: Option<f64>,
        #[arg(long)]
        overhead_cost_per_unit: Option<f64>,
        #[arg(long)]
        target_profit_margin: Option<f64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CostCommand {
    /// Breakdown of one recipe, or of every recipe when no id is given
    Calculate { id: Option<String> },
    /// Per-recipe breakdowns plus summary
    Report,
}

// ==========================================
// Value parsers
// ==========================================
fn parse_category(raw: &str) -> Result<MaterialCategory, String> {
    MaterialCategory::from_db_str(raw).ok_or_else(|| {
        let names: Vec<&str> = MaterialCategory::ALL.iter().map(|c| c.to_db_str()).collect();
        format!("unknown category '{}', expected one of {}", raw, names.join(", "))
    })
}

fn parse_unit(raw: &str) -> Result<MaterialUnit, String> {
    MaterialUnit::from_db_str(raw)
        .ok_or_else(|| format!("unknown unit '{}', expected gram, milliliter or piece", raw))
}

fn parse_line(raw: &str) -> Result<RecipeLine, String> {
    let (id, qty) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected MATERIAL_ID=QUANTITY, got '{}'", raw))?;
    let quantity: f64 = qty
        .trim()
        .parse()
        .map_err(|e| format!("invalid quantity '{}': {}", qty, e))?;
    Ok(RecipeLine::new(id.trim(), quantity))
}

// ==========================================
// Dispatch
// ==========================================

/// Run one command against `state`, returning the JSON to print.
///
/// `Init` is handled by the caller once the state exists.
pub fn execute(state: &AppState, command: Command) -> ApiResult<Value> {
    match command {
        Command::Init => Ok(json!({
            "dbPath": state.db_path,
            "schemaVersion": crate::db::CURRENT_SCHEMA_VERSION,
        })),
        Command::Materials(cmd) => execute_material(state, cmd),
        Command::Recipes(cmd) => execute_recipe(state, cmd),
        Command::Settings(cmd) => execute_settings(state, cmd),
        Command::Cost(cmd) => execute_cost(state, cmd),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> ApiResult<Value> {
    serde_json::to_value(value).map_err(|e| anyhow::Error::from(e).into())
}

fn execute_material(state: &AppState, cmd: MaterialCommand) -> ApiResult<Value> {
    let api = &state.material_api;
    match cmd {
        MaterialCommand::List => to_json(&api.list_materials()?),
        MaterialCommand::Show { id } => to_json(&api.get_material(&id)?),
        MaterialCommand::Add(args) => to_json(&api.create_material(args.into())?),
        MaterialCommand::Update { id, fields } => to_json(&api.update_material(&id, fields.into())?),
        MaterialCommand::Delete { id } => {
            api.delete_material(&id)?;
            Ok(json!({ "deleted": id }))
        }
    }
}

fn execute_recipe(state: &AppState, cmd: RecipeCommand) -> ApiResult<Value> {
    let api = &state.recipe_api;
    match cmd {
        RecipeCommand::List => to_json(&api.list_recipes()?),
        RecipeCommand::Show { id } => to_json(&api.get_recipe(&id)?),
        RecipeCommand::Add(args) => to_json(&api.create_recipe(args.into())?),
        RecipeCommand::Update { id, fields } => to_json(&api.update_recipe(&id, fields.into())?),
        RecipeCommand::Delete { id } => {
            api.delete_recipe(&id)?;
            Ok(json!({ "deleted": id }))
        }
        RecipeCommand::Copy { id } => to_json(&api.copy_recipe(&id)?),
    }
}

fn execute_settings(state: &AppState, cmd: SettingsCommand) -> ApiResult<Value> {
    let api = &state.cost_api;
    match cmd {
        SettingsCommand::Show => to_json(&api.get_settings()?),
        SettingsCommand::Set {
            labor_cost_per_hour,
            overhead_cost_per_unit,
            target_profit_margin,
        } => {
            let mut settings = api.get_settings()?;
            if let Some(v) = labor_cost_per_hour {
                settings.labor_cost_per_hour = v;
            }
            if let Some(v) = overhead_cost_per_unit {
                settings.overhead_cost_per_unit = v;
            }
            if let Some(v) = target_profit_margin {
                settings.target_profit_margin = v;
            }
            to_json(&api.update_settings(settings)?)
        }
    }
}

fn execute_cost(state: &AppState, cmd: CostCommand) -> ApiResult<Value> {
    let api = &state.cost_api;
    match cmd {
        CostCommand::Calculate { id: Some(id) } => to_json(&api.calculate(&id)?),
        CostCommand::Calculate { id: None } => to_json(&api.calculate_all()?),
        CostCommand::Report => to_json(&api.report()?),
    }
}
