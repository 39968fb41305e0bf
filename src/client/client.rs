use anyhow::Result;
use reqwest::Client;
use serde::de::DeserializeOwned;
use crate::client::types::*;

pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// A facet the catalog can filter on server-side via `filter.php`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterFacet {
    Area,
    Category,
    Ingredient,
}

impl FilterFacet {
    fn query_key(self) -> &'static str {
        match self {
            FilterFacet::Area => "a",
            FilterFacet::Category => "c",
            FilterFacet::Ingredient => "i",
        }
    }
}

/// Read-only client for the TheMealDB catalog.
///
/// Every public operation swallows transport, status and decoding failures:
/// they are logged and reported as "no results". Nothing is retried.
pub struct MealDbClient {
    base_url: String,
    client: Client,
}

impl MealDbClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // List operations
    pub async fn list_areas(&self) -> Vec<String> {
        self.list::<AreaEntry>("a", "areas")
            .await
            .into_iter()
            .map(|entry| entry.name)
            .collect()
    }

    pub async fn list_categories(&self) -> Vec<String> {
        self.list::<CategoryEntry>("c", "categories")
            .await
            .into_iter()
            .map(|entry| entry.name)
            .collect()
    }

    pub async fn list_ingredients(&self) -> Vec<String> {
        self.list::<IngredientEntry>("i", "ingredients")
            .await
            .into_iter()
            .map(|entry| entry.name)
            .collect()
    }

    async fn list<T: DeserializeOwned>(&self, key: &str, what: &str) -> Vec<T> {
        let url = format!("{}/list.php?{}=list", self.base_url, key);
        self.fetch_meals(&url).await.unwrap_or_else(|e| {
            tracing::warn!("Error loading {}: {}", what, e);
            Vec::new()
        })
    }

    // Filter operations
    pub async fn filter_by(&self, facet: FilterFacet, value: &str) -> Vec<MealSummary> {
        let url = format!(
            "{}/filter.php?{}={}",
            self.base_url,
            facet.query_key(),
            urlencoding::encode(value)
        );

        self.fetch_meals(&url).await.unwrap_or_else(|e| {
            tracing::warn!("Failed to filter by {:?} '{}': {}", facet, value, e);
            Vec::new()
        })
    }

    /// Ids of every recipe matching one facet value, in the order the catalog returned them.
    pub async fn filter_ids(&self, facet: FilterFacet, value: &str) -> Vec<MealId> {
        self.filter_by(facet, value)
            .await
            .into_iter()
            .map(|meal| meal.id)
            .collect()
    }

    // Recipe operations
    pub async fn search_by_name(&self, name: &str) -> Vec<MealDetail> {
        let url = format!("{}/search.php?s={}", self.base_url, urlencoding::encode(name));

        self.fetch_meals(&url).await.unwrap_or_else(|e| {
            tracing::warn!("Failed to search meals by name '{}': {}", name, e);
            Vec::new()
        })
    }

    pub async fn lookup(&self, id: &MealId) -> Option<MealDetail> {
        let url = format!(
            "{}/lookup.php?i={}",
            self.base_url,
            urlencoding::encode(id.as_str())
        );

        match self.fetch_meals::<MealDetail>(&url).await {
            Ok(meals) => meals.into_iter().next(),
            Err(e) => {
                tracing::warn!("Error fetching meal details for {}: {}", id, e);
                None
            }
        }
    }

    pub async fn random(&self) -> Option<MealDetail> {
        let url = format!("{}/random.php", self.base_url);

        match self.fetch_meals::<MealDetail>(&url).await {
            Ok(meals) => meals.into_iter().next(),
            Err(e) => {
                tracing::warn!("Error fetching random recipe: {}", e);
                None
            }
        }
    }

    async fn fetch_meals<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>> {
        tracing::debug!("Making catalog request: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to connect to catalog: {}", e))?;

        let status = response.status();
        tracing::debug!("Catalog response status: {}", status);

        if !status.is_success() {
            anyhow::bail!("Catalog request failed with status {}", status);
        }

        // Rows are decoded one by one so a single malformed record only drops itself.
        let body: MealsResponse<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Invalid response format from catalog: {}", e))?;

        Ok(body
            .into_meals()
            .into_iter()
            .filter_map(|row| match serde_json::from_value::<T>(row) {
                Ok(meal) => Some(meal),
                Err(e) => {
                    tracing::warn!("Skipping malformed catalog record from {}: {}", url, e);
                    None
                }
            })
            .collect())
    }
}
