//! View models handed back to MCP clients.
//!
//! [`RecipeCard`] is one entry of a result list; [`RecipeView`] is the full
//! detail of one recipe with its ingredient lines and instruction steps.

use serde::Serialize;

use crate::client::{MealDetail, MealSummary};

pub const NO_RESULTS_MESSAGE: &str = "No meals found for this filter.";
pub const NO_RANDOM_MESSAGE: &str = "No random recipe found.";
pub const NO_DETAILS_MESSAGE: &str = "No details found for this meal.";

/// `"name - measure"` for every filled slot, or just `"name"` when the measure is blank.
pub fn ingredient_lines(meal: &MealDetail) -> Vec<String> {
    meal.filled_slots()
        .filter_map(|slot| {
            let ingredient = slot.ingredient.as_deref()?;
            Some(match slot.measure.as_deref() {
                Some(measure) if !measure.trim().is_empty() => {
                    format!("{} - {}", ingredient, measure)
                }
                _ => ingredient.to_string(),
            })
        })
        .collect()
}

/// Segments free-text instructions into steps.
///
/// Splits on line breaks and on `". "`, trims, drops empty fragments and makes
/// every step end with a period. Abbreviations such as "approx. 5" are split too.
pub fn instruction_steps(instructions: &str) -> Vec<String> {
    instructions
        .split('\n')
        .flat_map(|line| line.split(". "))
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(|step| {
            if step.ends_with('.') {
                step.to_string()
            } else {
                format!("{}.", step)
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeCard {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl From<&MealSummary> for RecipeCard {
    fn from(summary: &MealSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            name: summary.name.clone(),
            area: summary.area.clone(),
            thumbnail: summary.thumbnail.clone(),
        }
    }
}

impl From<&MealDetail> for RecipeCard {
    fn from(meal: &MealDetail) -> Self {
        Self::from(&meal.summary)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeView {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl From<&MealDetail> for RecipeView {
    fn from(meal: &MealDetail) -> Self {
        Self {
            id: meal.summary.id.to_string(),
            title: meal.summary.name.clone(),
            area: meal.summary.area.clone(),
            category: meal.summary.category.clone(),
            image: meal.summary.thumbnail.clone(),
            ingredients: ingredient_lines(meal),
            instructions: meal
                .instructions
                .as_deref()
                .map(instruction_steps)
                .unwrap_or_default(),
            tags: meal
                .tags
                .as_deref()
                .map(|tags| {
                    tags.split(',')
                        .map(str::trim)
                        .filter(|tag| !tag.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            youtube: meal.youtube.clone(),
            source: meal.source.clone(),
        }
    }
}
