use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recipe as returned by the search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub label: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ingredient_lines: Vec<String>,
    /// Minutes
    #[serde(default)]
    pub total_time: Option<f64>,
    /// Stable identifier issued by the API, e.g. `http://www.edamam.com/ontologies/edamam.owl#recipe_<id>`
    pub uri: String,
    #[serde(default)]
    pub calories: Option<f64>,
}

/// A single recipe as returned by the detail endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetails {
    pub label: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ingredient_lines: Vec<String>,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub total_time: Option<f64>,
    pub uri: String,
    /// Source page with the directions. Empty when none is available.
    #[serde(default)]
    pub url: String,
}

impl From<RecipeDetails> for Recipe {
    fn from(details: RecipeDetails) -> Self {
        Recipe {
            label: details.label,
            image: details.image,
            ingredient_lines: details.ingredient_lines,
            total_time: details.total_time,
            uri: details.uri,
            calories: details.calories,
        }
    }
}

/// A favorite recipe persisted in the local store
///
/// Existence in the store is what makes a recipe a favorite, so
/// `is_favorite` is always `true` for records created by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRecord {
    pub id: Uuid,
    pub label: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub total_time: f64,
    pub uri: String,
    #[serde(default)]
    pub url: String,
    pub is_favorite: bool,
}

impl FavoriteRecord {
    /// Build a fresh record from fetched recipe details
    pub fn from_details(details: &RecipeDetails) -> Self {
        FavoriteRecord {
            id: Uuid::new_v4(),
            label: details.label.clone(),
            image: details.image.clone(),
            ingredients: details.ingredient_lines.clone(),
            calories: details.calories.unwrap_or_default(),
            total_time: details.total_time.unwrap_or_default(),
            uri: details.uri.clone(),
            url: details.url.clone(),
            is_favorite: true,
        }
    }

    /// Project onto the search-result shape
    pub fn to_recipe(&self) -> Recipe {
        Recipe {
            label: self.label.clone(),
            image: self.image.clone(),
            ingredient_lines: self.ingredients.clone(),
            total_time: Some(self.total_time),
            uri: self.uri.clone(),
            calories: Some(self.calories),
        }
    }

    /// Rebuild the detail shape, for showing a favorite without the network
    pub fn details(&self) -> RecipeDetails {
        RecipeDetails {
            label: self.label.clone(),
            image: self.image.clone(),
            ingredient_lines: self.ingredients.clone(),
            calories: Some(self.calories),
            total_time: Some(self.total_time),
            uri: self.uri.clone(),
            url: self.url.clone(),
        }
    }
}

/// Read access shared by every recipe shape, with the labels a recipe card shows
pub trait RecipeSummary {
    fn label(&self) -> &str;
    fn image(&self) -> Option<&str>;
    fn ingredient_lines(&self) -> &[String];
    fn total_time(&self) -> Option<f64>;
    fn calories(&self) -> Option<f64>;
    fn uri(&self) -> &str;
    /// Source page with the directions, when the shape carries one
    fn url(&self) -> Option<&str>;

    /// Whole kilocalories, 0 when unknown
    fn calories_label(&self) -> String {
        format!("{}", self.calories().unwrap_or_default().trunc() as i64)
    }

    /// Preparation time in minutes, e.g. `45m`
    fn total_time_label(&self) -> String {
        format!("{}m", self.total_time().unwrap_or_default().trunc() as i64)
    }

    fn ingredients_summary(&self) -> String {
        self.ingredient_lines().join(", ")
    }

    /// False when there is no source page to send the user to
    fn has_directions(&self) -> bool {
        self.url().is_some_and(|url| !url.trim().is_empty())
    }
}

impl RecipeSummary for Recipe {
    fn label(&self) -> &str {
        &self.label
    }
    fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
    fn ingredient_lines(&self) -> &[String] {
        &self.ingredient_lines
    }
    fn total_time(&self) -> Option<f64> {
        self.total_time
    }
    fn calories(&self) -> Option<f64> {
        self.calories
    }
    fn uri(&self) -> &str {
        &self.uri
    }
    fn url(&self) -> Option<&str> {
        None
    }
}

impl RecipeSummary for RecipeDetails {
    fn label(&self) -> &str {
        &self.label
    }
    fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
    fn ingredient_lines(&self) -> &[String] {
        &self.ingredient_lines
    }
    fn total_time(&self) -> Option<f64> {
        self.total_time
    }
    fn calories(&self) -> Option<f64> {
        self.calories
    }
    fn uri(&self) -> &str {
        &self.uri
    }
    fn url(&self) -> Option<&str> {
        Some(&self.url)
    }
}

impl RecipeSummary for FavoriteRecord {
    fn label(&self) -> &str {
        &self.label
    }
    fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
    fn ingredient_lines(&self) -> &[String] {
        &self.ingredients
    }
    fn total_time(&self) -> Option<f64> {
        Some(self.total_time)
    }
    fn calories(&self) -> Option<f64> {
        Some(self.calories)
    }
    fn uri(&self) -> &str {
        &self.uri
    }
    fn url(&self) -> Option<&str> {
        Some(&self.url)
    }
}
