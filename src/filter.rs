//! Facet aggregation.
//!
//! Turns a [`FacetSelection`] into the list of recipes to show. The catalog
//! can only filter on one facet per request, so combined facets are resolved
//! here: id sets are intersected locally, or, when a name is given, the name
//! search results are re-checked against the other facets.

use futures::future::join_all;
use std::collections::HashSet;

use crate::client::{FilterFacet, MealDbClient, MealDetail, MealId};

/// The facets a user has chosen. Blank values count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetSelection {
    pub region: Option<String>,
    pub category: Option<String>,
    pub ingredient: Option<String>,
    pub name: Option<String>,
}

fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl FacetSelection {
    pub fn new(
        region: Option<String>,
        category: Option<String>,
        ingredient: Option<String>,
        name: Option<String>,
    ) -> Self {
        Self {
            region: normalize(region),
            category: normalize(category),
            ingredient: normalize(ingredient),
            name: normalize(name.map(|n| n.trim().to_string())),
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = normalize(Some(region.into()));
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = normalize(Some(category.into()));
        self
    }

    pub fn with_ingredient(mut self, ingredient: impl Into<String>) -> Self {
        self.ingredient = normalize(Some(ingredient.into()));
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = normalize(Some(name.into().trim().to_string()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && !self.has_server_facets()
    }

    /// Whether any facet other than the name is set.
    pub fn has_server_facets(&self) -> bool {
        self.region.is_some() || self.category.is_some() || self.ingredient.is_some()
    }

    /// The facets `filter.php` can answer, in region, category, ingredient order.
    pub fn server_facets(&self) -> Vec<(FilterFacet, &str)> {
        [
            (FilterFacet::Area, self.region.as_deref()),
            (FilterFacet::Category, self.category.as_deref()),
            (FilterFacet::Ingredient, self.ingredient.as_deref()),
        ]
        .into_iter()
        .filter_map(|(facet, value)| value.map(|v| (facet, v)))
        .collect()
    }
}

/// Outcome of one aggregation run.
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregation {
    /// Nothing selected; nothing to show.
    NoFilters,
    /// Facets were selected but nothing matched (or every request failed).
    NoResults,
    Found(Vec<MealDetail>),
}

impl Aggregation {
    pub fn meals(&self) -> &[MealDetail] {
        match self {
            Aggregation::Found(meals) => meals,
            _ => &[],
        }
    }

    pub fn into_meals(self) -> Vec<MealDetail> {
        match self {
            Aggregation::Found(meals) => meals,
            _ => Vec::new(),
        }
    }
}

/// Intersects per-facet id sets.
///
/// The result keeps the arrival order of the first set and contains each id
/// once. Membership does not depend on the order of the sets; no sets, or any
/// empty set, yields an empty result.
pub fn intersect(sets: Vec<Vec<MealId>>) -> Vec<MealId> {
    let mut sets = sets.into_iter();
    let Some(first) = sets.next() else {
        return Vec::new();
    };
    let others: Vec<HashSet<MealId>> = sets.map(|set| set.into_iter().collect()).collect();

    let mut seen = HashSet::new();
    first
        .into_iter()
        .filter(|id| others.iter().all(|set| set.contains(id)))
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Client-side facet check applied to name search results.
///
/// Region and category compare exactly, ingredient compares ignoring case.
pub fn matches_facets(meal: &MealDetail, selection: &FacetSelection) -> bool {
    if let Some(region) = selection.region.as_deref() {
        if meal.summary.area.as_deref() != Some(region) {
            return false;
        }
    }
    if let Some(category) = selection.category.as_deref() {
        if meal.summary.category.as_deref() != Some(category) {
            return false;
        }
    }
    if let Some(ingredient) = selection.ingredient.as_deref() {
        if !meal.uses_ingredient(ingredient) {
            return false;
        }
    }
    true
}

/// Resolves a selection into the recipes to show.
pub async fn aggregate(client: &MealDbClient, selection: &FacetSelection) -> Aggregation {
    if selection.is_empty() {
        return Aggregation::NoFilters;
    }

    let meals = match selection.name.as_deref() {
        Some(name) => {
            let candidates = client.search_by_name(name).await;
            tracing::debug!("Name search '{}' returned {} candidates", name, candidates.len());

            if selection.has_server_facets() {
                candidates
                    .into_iter()
                    .filter(|meal| matches_facets(meal, selection))
                    .collect()
            } else {
                candidates
            }
        }
        None => {
            let facets = selection.server_facets();
            let id_sets = join_all(
                facets
                    .iter()
                    .map(|(facet, value)| client.filter_ids(*facet, value)),
            )
            .await;

            let ids = intersect(id_sets);
            tracing::debug!("{} facets intersect to {} recipes", facets.len(), ids.len());

            join_all(ids.iter().map(|id| client.lookup(id)))
                .await
                .into_iter()
                .flatten()
                .collect()
        }
    };

    if meals.is_empty() {
        Aggregation::NoResults
    } else {
        Aggregation::Found(meals)
    }
}
