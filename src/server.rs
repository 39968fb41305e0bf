use std::sync::Arc;
use std::future::Future;
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::*,
    schemars,
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use serde_json::json;

use crate::client::{MealDbClient, MealId};
use crate::filter::{aggregate, Aggregation, FacetSelection};
use crate::render::{RecipeCard, RecipeView, NO_DETAILS_MESSAGE, NO_RANDOM_MESSAGE, NO_RESULTS_MESSAGE};
use crate::session::SearchSession;

/// Name-only queries shorter than this (but not empty) do not trigger a search.
pub const MIN_NAME_QUERY_CHARS: usize = 2;

// Parameter structs for tools
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct FilterRecipesParams {
    /// Region / cuisine, e.g. "Italian" (exact spelling from list_regions)
    #[serde(default)]
    pub region: Option<String>,
    /// Category, e.g. "Seafood" (exact spelling from list_categories)
    #[serde(default)]
    pub category: Option<String>,
    /// Main ingredient, e.g. "chicken_breast"
    #[serde(default)]
    pub ingredient: Option<String>,
    /// Substring of the recipe name
    #[serde(default)]
    pub name: Option<String>,
}

impl From<FilterRecipesParams> for FacetSelection {
    fn from(params: FilterRecipesParams) -> Self {
        FacetSelection::new(params.region, params.category, params.ingredient, params.name)
    }
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetRecipeDetailsParams {
    pub id: String,
}

/// Result of one `filter_recipes` call, before it is turned into tool output.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    /// The name query is too short to search; committed results are left alone.
    NameTooShort,
    /// A newer run started while this one was in flight; its results were dropped.
    Superseded,
    Finished(Aggregation),
}

#[derive(Clone)]
pub struct MealDbMcpServer {
    client: Arc<MealDbClient>,
    session: Arc<SearchSession>,
    tool_router: ToolRouter<MealDbMcpServer>,
}

fn json_result(value: serde_json::Value) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(&value)
        .map_err(|e| McpError::internal_error(format!("Failed to encode tool result: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Tool payload for one `filter_recipes` call.
pub fn filter_outcome_json(outcome: &FilterOutcome) -> serde_json::Value {
    match outcome {
        FilterOutcome::NameTooShort => json!({
            "recipes": [],
            "message": format!("Enter at least {} characters to search by name", MIN_NAME_QUERY_CHARS)
        }),
        FilterOutcome::Superseded => json!({
            "recipes": [],
            "superseded": true,
            "message": "A newer search replaced this one"
        }),
        FilterOutcome::Finished(Aggregation::NoFilters) => json!({
            "recipes": []
        }),
        FilterOutcome::Finished(Aggregation::NoResults) => json!({
            "recipes": [],
            "message": NO_RESULTS_MESSAGE
        }),
        FilterOutcome::Finished(Aggregation::Found(meals)) => {
            let cards: Vec<RecipeCard> = meals.iter().map(RecipeCard::from).collect();
            json!({
                "recipes": cards,
                "total_count": cards.len()
            })
        }
    }
}

#[tool_router]
impl MealDbMcpServer {
    pub fn new(base_url: String) -> Self {
        Self::with_client(Arc::new(MealDbClient::new(base_url)))
    }

    /// Builds a server with its own session around a shared client.
    pub fn with_client(client: Arc<MealDbClient>) -> Self {
        Self {
            client,
            session: Arc::new(SearchSession::new()),
            tool_router: Self::tool_router(),
        }
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Checks that the catalog answers at all, by loading the category list.
    pub async fn test_api_access(&self) -> Result<usize, anyhow::Error> {
        let categories = self.client.list_categories().await;
        if categories.is_empty() {
            anyhow::bail!("Catalog at {} returned no categories", self.client.base_url());
        }
        tracing::info!("API access test successful - found {} categories", categories.len());
        Ok(categories.len())
    }

    /// Runs one aggregation under a fresh generation and commits it if still current.
    ///
    /// A name query shorter than [`MIN_NAME_QUERY_CHARS`] is only ignored when it
    /// is the sole facet; combined with other facets it is searched as given.
    pub async fn run_filter(&self, selection: FacetSelection) -> FilterOutcome {
        if let Some(name) = selection.name.as_deref() {
            if !selection.has_server_facets() && name.chars().count() < MIN_NAME_QUERY_CHARS {
                tracing::debug!("Ignoring name query '{}': too short", name);
                return FilterOutcome::NameTooShort;
            }
        }

        let generation = self.session.begin();
        let aggregation = aggregate(&self.client, &selection).await;

        if self.session.commit(generation, aggregation.meals().to_vec()) {
            FilterOutcome::Finished(aggregation)
        } else {
            FilterOutcome::Superseded
        }
    }

    /// Detail for one recipe, reusing a committed record when it already carries instructions.
    pub async fn recipe_detail(&self, id: &MealId) -> Option<RecipeView> {
        match self.session.find(id) {
            Some(meal) if meal.has_instructions() => Some(RecipeView::from(&meal)),
            _ => self.client.lookup(id).await.map(|meal| RecipeView::from(&meal)),
        }
    }

    // Facet listing tools
    #[tool(description = "List the regions (cuisines) recipes can be filtered by")]
    async fn list_regions(&self) -> Result<CallToolResult, McpError> {
        let regions = self.client.list_areas().await;
        json_result(json!({ "regions": regions, "total_count": regions.len() }))
    }

    #[tool(description = "List the categories recipes can be filtered by")]
    async fn list_categories(&self) -> Result<CallToolResult, McpError> {
        let categories = self.client.list_categories().await;
        json_result(json!({ "categories": categories, "total_count": categories.len() }))
    }

    #[tool(description = "List the ingredients recipes can be filtered by")]
    async fn list_ingredients(&self) -> Result<CallToolResult, McpError> {
        let ingredients = self.client.list_ingredients().await;
        json_result(json!({ "ingredients": ingredients, "total_count": ingredients.len() }))
    }

    // Recipe tools
    #[tool(description = "Find recipes matching every given filter: region, category, ingredient and/or name substring")]
    async fn filter_recipes(
        &self,
        Parameters(params): Parameters<FilterRecipesParams>,
    ) -> Result<CallToolResult, McpError> {
        json_result(filter_outcome_json(&self.run_filter(params.into()).await))
    }

    #[tool(description = "Get a recipe's ingredients and step-by-step instructions")]
    async fn get_recipe_details(
        &self,
        Parameters(params): Parameters<GetRecipeDetailsParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.recipe_detail(&MealId::new(params.id)).await {
            Some(view) => json_result(json!({ "recipe": view })),
            None => json_result(json!({ "recipe": null, "message": NO_DETAILS_MESSAGE })),
        }
    }

    #[tool(description = "Pick a random recipe and show its details")]
    async fn random_recipe(&self) -> Result<CallToolResult, McpError> {
        self.session.clear();

        match self.client.random().await {
            Some(meal) => json_result(json!({ "recipe": RecipeView::from(&meal) })),
            None => json_result(json!({ "recipe": null, "message": NO_RANDOM_MESSAGE })),
        }
    }

    #[tool(description = "Clear all filters and the current results")]
    async fn clear_filters(&self) -> Result<CallToolResult, McpError> {
        self.session.clear();
        json_result(json!({ "recipes": [], "cleared": true }))
    }
}

#[tool_handler]
impl ServerHandler for MealDbMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some("This server looks up recipes in the TheMealDB catalog. Use list_regions, list_categories and list_ingredients to discover filter values, filter_recipes to find recipes matching any combination of region, category, ingredient and name, get_recipe_details for ingredients and instructions, and random_recipe for inspiration.".to_string()),
        }
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<InitializeResult, McpError> {
        Ok(self.get_info())
    }
}
