// recipe-store - command line access to the recipe catalog
//
// Parses CLI args, opens the store once, dispatches, closes the store.

use recipe_store_lib::{
    core::RecipeForm,
    tracing_setup::{init_tracing, TracingConfig},
    Database, RecipeCatalog, RecipeError, Result, StoreConfig,
};
use std::env;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let debug = take_flag(&mut args, "--debug");

    if let Err(e) = init_tracing(&TracingConfig { debug }) {
        eprintln!("{}", e.user_message());
    }

    if args.is_empty() {
        print_usage();
        return ExitCode::SUCCESS;
    }

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &[String]) -> Result<()> {
    let command = args[0].as_str();
    let rest = &args[1..];

    match command {
        "version" | "-v" | "--version" => {
            println!("recipe-store v{}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        "help" | "-h" | "--help" => {
            print_usage();
            return Ok(());
        }
        _ => {}
    }

    // No service without a store
    let db = Arc::new(Database::connect(&StoreConfig::from_env()?).await?);
    let catalog = RecipeCatalog::new(Arc::clone(&db));

    let result = match command {
        "show" => handle_show(&catalog, rest).await,
        "list" => handle_list(&catalog).await,
        "categories" => handle_categories(&catalog).await,
        "difficulties" => handle_difficulties(&catalog).await,
        "add" => handle_add(&catalog, rest).await,
        "update" => handle_update(&catalog, rest).await,
        "remove" => handle_remove(&catalog, rest).await,
        "status" => handle_status(&db).await,
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            Ok(())
        }
    };

    db.close().await;
    result
}

async fn handle_show(catalog: &RecipeCatalog, args: &[String]) -> Result<()> {
    let mut args = args.to_vec();
    let as_json = take_flag(&mut args, "--json");
    let id = parse_id(args.first())?;

    let details = catalog
        .recipe_details(id)
        .await?
        .ok_or(RecipeError::RecipeNotFound(id))?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&details)?);
        return Ok(());
    }

    let recipe = &details.recipe;
    let name_or_unknown = |name: Option<&str>| name.unwrap_or("unknown").to_string();

    println!("\n{} (#{})", recipe.title, recipe.id);
    println!("{}", "=".repeat(60));
    println!("{}", recipe.description);
    println!();
    println!("  Author:      {}", name_or_unknown(details.author.as_ref().map(|a| a.name.as_str())));
    println!("  Category:    {}", name_or_unknown(details.category.as_ref().map(|c| c.name.as_str())));
    println!("  Difficulty:  {}", name_or_unknown(details.difficulty.as_ref().map(|d| d.name.as_str())));
    println!("  Rating:      {:.1}", recipe.rating);
    println!("  Prep time:   {} min", recipe.preparation_time);
    println!("  Serves:      {}", recipe.serving);
    println!("  Published:   {}", recipe.published_date);
    println!("  Views:       {}", recipe.access_count);
    if !recipe.image_url.is_empty() {
        println!("  Image:       {}", recipe.image_url);
    }

    println!("\nIngredients:");
    for ingredient in &recipe.ingredients {
        println!("  - {}", ingredient);
    }

    println!("\nSteps:");
    for (i, step) in recipe.steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    println!("{}", "=".repeat(60));

    Ok(())
}

async fn handle_list(catalog: &RecipeCatalog) -> Result<()> {
    let previews = catalog.previews().await?;

    if previews.is_empty() {
        println!("No recipes yet.");
        return Ok(());
    }

    println!("\nRecipes:");
    println!("{}", "=".repeat(60));
    for preview in previews {
        println!("{:4}. {} - {}", preview.id, preview.title, preview.description);
    }
    println!("{}", "=".repeat(60));

    Ok(())
}

async fn handle_categories(catalog: &RecipeCatalog) -> Result<()> {
    for category in catalog.categories().await? {
        println!("{:4}  {}", category.id, category.name);
    }
    Ok(())
}

async fn handle_difficulties(catalog: &RecipeCatalog) -> Result<()> {
    for difficulty in catalog.difficulties().await? {
        println!("{:4}  {}", difficulty.id, difficulty.name);
    }
    Ok(())
}

async fn handle_add(catalog: &RecipeCatalog, args: &[String]) -> Result<()> {
    let form = parse_form(args)?;
    let id = catalog.create_from_form(form).await?;
    println!("Created recipe #{}", id);
    Ok(())
}

async fn handle_update(catalog: &RecipeCatalog, args: &[String]) -> Result<()> {
    let id = parse_id(args.first())?;
    let form = parse_form(&args[1..])?;
    catalog.update_from_form(id, form).await?;
    println!("Updated recipe #{}", id);
    Ok(())
}

async fn handle_remove(catalog: &RecipeCatalog, args: &[String]) -> Result<()> {
    let id = parse_id(args.first())?;
    catalog.remove(id).await?;
    println!("Removed recipe #{}", id);
    Ok(())
}

async fn handle_status(db: &Database) -> Result<()> {
    let stats = db.stats().await?;

    println!("\nrecipe-store Status");
    println!("{}", "=".repeat(60));
    println!("  Database:     {}", db.database_url());
    println!("  Timeout:      {} ms", db.query_timeout().as_millis());
    println!("\nRows:");
    println!("  Recipes:      {}", stats.total_recipes);
    println!("  Authors:      {}", stats.total_authors);
    println!("  Categories:   {}", stats.total_categories);
    println!("  Difficulties: {}", stats.total_difficulties);
    println!("\nPool:");
    println!("  Connections:  {} ({} idle)", stats.pool_size, stats.idle_connections);
    println!("{}", "=".repeat(60));

    Ok(())
}

/// Collect `--field value` pairs into a form, same names as the web form
fn parse_form(args: &[String]) -> Result<RecipeForm> {
    let mut form = RecipeForm::default();

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args
            .get(i + 1)
            .cloned()
            .ok_or_else(|| RecipeError::Config(format!("{} needs a value", flag)))?;

        let slot = match flag {
            "--title" => &mut form.title,
            "--description" => &mut form.description,
            "--author" => &mut form.author,
            "--category" => &mut form.category,
            "--difficulty" => &mut form.difficulty,
            "--preparation-time" => &mut form.preparation_time,
            "--serving" => &mut form.serving,
            "--ingredients" => &mut form.ingredients,
            "--steps" => &mut form.steps,
            "--img-url" => &mut form.image_url,
            other => return Err(RecipeError::Config(format!("unknown option: {}", other))),
        };
        *slot = value;
        i += 2;
    }

    Ok(form)
}

fn parse_id(raw: Option<&String>) -> Result<i64> {
    let raw = raw.ok_or_else(|| RecipeError::validation("id", "a recipe id is required"))?;
    raw.trim()
        .parse()
        .map_err(|_| RecipeError::validation("id", format!("'{}' is not a whole number", raw)))
}

/// Remove `flag` from `args`, reporting whether it was there
fn take_flag(args: &mut Vec<String>, flag: &str) -> bool {
    let before = args.len();
    args.retain(|arg| arg != flag);
    args.len() != before
}

fn print_usage() {
    println!(
        r#"recipe-store v{} - recipes, authors, categories and difficulty levels

USAGE:
    recipe-store [--debug] <COMMAND> [OPTIONS]

COMMANDS:
    show <id> [--json]     Show a recipe with its author, category and difficulty
    list                   Show up to 10 recipe previews
    categories             List all categories
    difficulties           List all difficulty levels
    add <fields>           Add a recipe
    update <id> <fields>   Change title, description, prep time, serving, image
    remove <id>            Delete a recipe
    status                 Show database and pool stats
    version                Show version
    help                   Show this help

FIELDS:
    --title <text>  --description <text>  --author <id>
    --category <id>  --difficulty <id>  --preparation-time <minutes>
    --serving <text>  --ingredients <a|b|c>  --steps <a|b|c>  --img-url <url>

ENVIRONMENT:
    RECIPE_DATABASE_URL        sqlx URL (default: sqlite:~/.recipe-store/recipes.db)
    RECIPE_DB_MAX_CONNECTIONS  pool size (default: 5)
    RECIPE_QUERY_TIMEOUT_MS    per-call deadline (default: 5000)
    RECIPE_LOG                 log filter (default: info)

EXAMPLES:
    recipe-store add --title Tea --category 4 --difficulty 1 --preparation-time 5
    recipe-store show 1
    recipe-store list
"#,
        env!("CARGO_PKG_VERSION")
    );
}
