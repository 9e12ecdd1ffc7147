use log::error;
use reciplease::{
    search_recipes, toggle_favorite, FavoritesConfig, FavoritesStore, IngredientList, Recipe,
    RecipeDetails, RecipeSummary, RecipleaseConfig, SearchClient,
};
use std::env;
use std::error::Error;
use std::process::ExitCode;

const USAGE: &str = "Usage:
  reciplease search <ingredient>[,<ingredient>...]
  reciplease show <uri>
  reciplease favorites list
  reciplease favorites (add|remove|check|toggle|show) <uri>";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let (command, rest) = args.split_first().ok_or(USAGE)?;

    match (command.as_str(), rest) {
        ("search", ingredients) => {
            let ingredients = IngredientList::parse(&ingredients.join(","));
            if !ingredients.can_search() {
                return Err(USAGE.into());
            }

            let recipes = search_recipes(&ingredients).await?;
            if recipes.is_empty() {
                println!("No recipe matches {}", ingredients.as_slice().join(", "));
            }
            for recipe in &recipes {
                print_recipe(recipe);
            }
            Ok(())
        }
        ("show", [uri]) => {
            let details = api_client()?.fetch_by_uri(uri).await?;
            print_details(&details);
            Ok(())
        }
        ("favorites", rest) => favorites(rest).await,
        _ => Err(USAGE.into()),
    }
}

async fn favorites(args: &[String]) -> Result<(), Box<dyn Error>> {
    let store = FavoritesStore::from_config(&FavoritesConfig::load()?)?;

    match args {
        [command] if command == "list" => {
            let favorites = store.try_list_favorites()?;
            if favorites.is_empty() {
                println!("No favorites yet");
            }
            for recipe in &favorites {
                print_recipe(recipe);
            }
        }
        [command, uri] => match command.as_str() {
            "add" => {
                let details = api_client()?.fetch_by_uri(uri).await?;
                let record = store.add_favorite(&details)?;
                println!("Added {} to favorites", record.label);
            }
            "remove" => {
                let removed = store.remove_favorite(uri)?;
                println!("Removed {} favorite(s)", removed);
            }
            "check" => println!("{}", store.try_is_favorite(uri)?),
            "toggle" => {
                let now_favorite = toggle_favorite(&api_client()?, &store, uri).await?;
                println!("{}", if now_favorite { "added" } else { "removed" });
            }
            "show" => match store.get_favorite(uri)? {
                Some(record) => print_details(&record.details()),
                None => println!("{} is not a favorite", uri),
            },
            _ => return Err(USAGE.into()),
        },
        _ => return Err(USAGE.into()),
    }
    Ok(())
}

fn api_client() -> Result<SearchClient, Box<dyn Error>> {
    let config = RecipleaseConfig::load()?;
    Ok(SearchClient::new(&config.api)?)
}

fn print_recipe(recipe: &Recipe) {
    println!(
        "{} ({} kcal, {})\n  {}\n  {}",
        recipe.label,
        recipe.calories_label(),
        recipe.total_time_label(),
        recipe.ingredients_summary(),
        recipe.uri
    );
}

fn print_details(details: &RecipeDetails) {
    println!("# {}", details.label);
    println!("{} kcal, {}", details.calories_label(), details.total_time_label());
    if let Some(image) = &details.image {
        println!("image: {}", image);
    }
    println!();
    for line in &details.ingredient_lines {
        println!("- {}", line);
    }
    println!();
    if details.has_directions() {
        println!("Directions: {}", details.url);
    } else {
        println!("No directions available");
    }
}
