use crate::config::ApiConfig;
use crate::error::{FetchError, RecipleaseError};
use crate::model::{Recipe, RecipeDetails};
use crate::search::response::{RecipeDetailsResponse, SearchResponse};
use crate::search::RecipeSource;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

/// Header identifying the calling application to the recipe API
pub const ACCOUNT_USER_HEADER: &str = "edamam-account-user";

const RECIPES_PATH: &str = "api/recipes/v2";
const RECIPE_MARKER: &str = "#recipe_";

/// Extract the recipe id from a recipe uri
///
/// Takes whatever follows the last `#recipe_`. Input without the marker is
/// already an id and comes back unchanged.
///
/// # Example
/// ```
/// use reciplease::search::recipe_id;
///
/// let uri = "http://www.edamam.com/ontologies/edamam.owl#recipe_abc123";
/// assert_eq!(recipe_id(uri), "abc123");
/// assert_eq!(recipe_id("abc123"), "abc123");
/// ```
pub fn recipe_id(uri: &str) -> &str {
    match uri.rfind(RECIPE_MARKER) {
        Some(pos) => &uri[pos + RECIPE_MARKER.len()..],
        None => uri,
    }
}

/// Client for the recipe search API
///
/// Cloning is cheap and clones share one connection pool.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: Client,
    endpoint: Url,
    app_id: String,
    app_key: String,
}

impl SearchClient {
    /// Create a client from API configuration
    ///
    /// # Errors
    /// Returns `RecipleaseError` if:
    /// - `app_id` is empty
    /// - `base_url` is not an http(s) URL
    /// - `account_user` is not a valid header value
    pub fn new(config: &ApiConfig) -> Result<Self, RecipleaseError> {
        if config.app_id.trim().is_empty() {
            return Err(RecipleaseError::InvalidConfig(
                "api.app_id must not be empty".to_string(),
            ));
        }

        let endpoint = recipes_endpoint(&config.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(ACCOUNT_USER_HEADER),
            HeaderValue::from_str(&config.account_user)?,
        );

        let client = Client::builder()
            .timeout(config.timeout_duration())
            .user_agent(concat!("reciplease/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(SearchClient {
            client,
            endpoint,
            app_id: config.app_id.clone(),
            app_key: config.app_key.clone(),
        })
    }

    /// URL of a search for recipes containing all `ingredients`
    pub fn search_url<S: AsRef<str>>(&self, ingredients: &[S]) -> Url {
        let query = ingredients
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(",");

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("type", "public")
            .append_pair("q", &query);
        self.append_credentials(&mut url);
        url
    }

    /// URL of the detail endpoint for the recipe behind `uri`
    pub fn details_url(&self, uri: &str) -> Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(recipe_id(uri));
        }
        url.query_pairs_mut().append_pair("type", "public");
        self.append_credentials(&mut url);
        url
    }

    /// Search recipes by ingredients
    ///
    /// The list is sent as is, an empty one included. Recipes come back in the
    /// order the API ranked them.
    pub async fn search_by_ingredients<S: AsRef<str> + Sync>(
        &self,
        ingredients: &[S],
    ) -> Result<Vec<Recipe>, FetchError> {
        let response: SearchResponse = self.get_json(self.search_url(ingredients)).await?;
        let recipes = response.into_recipes();
        debug!("Search returned {} recipes", recipes.len());
        Ok(recipes)
    }

    /// Fetch one recipe by uri or bare recipe id
    pub async fn fetch_by_uri(&self, uri: &str) -> Result<RecipeDetails, FetchError> {
        let response: RecipeDetailsResponse = self.get_json(self.details_url(uri)).await?;
        Ok(response.recipe)
    }

    fn append_credentials(&self, url: &mut Url) {
        url.query_pairs_mut()
            .append_pair("app_id", &self.app_id)
            .append_pair("app_key", &self.app_key);
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        // Only the path: the query carries the credentials.
        debug!("GET {}", url.path());

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Recipe API responded with status {}", status);
            return Err(FetchError::HttpStatus {
                code: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl RecipeSource for SearchClient {
    async fn search_by_ingredients(
        &self,
        ingredients: &[String],
    ) -> Result<Vec<Recipe>, FetchError> {
        SearchClient::search_by_ingredients(self, ingredients).await
    }

    async fn fetch_by_uri(&self, uri: &str) -> Result<RecipeDetails, FetchError> {
        SearchClient::fetch_by_uri(self, uri).await
    }
}

fn recipes_endpoint(base_url: &str) -> Result<Url, RecipleaseError> {
    let raw = format!("{}/{}", base_url.trim_end_matches('/'), RECIPES_PATH);
    let url = Url::parse(&raw).map_err(|e| {
        RecipleaseError::InvalidConfig(format!("invalid api.base_url '{}': {}", base_url, e))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(RecipleaseError::InvalidConfig(format!(
            "api.base_url must use http or https, got '{}'",
            scheme
        ))),
    }
}
