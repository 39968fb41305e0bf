//! Type definitions for the TheMealDB API.
//!
//! Every endpoint answers with the same envelope, `{"meals": [...]}`, where the
//! array is replaced by `null` when nothing matched. The element shape depends
//! on the endpoint:
//!
//! - [`AreaEntry`], [`CategoryEntry`], [`IngredientEntry`] - `list.php` rows
//! - [`MealSummary`] - `filter.php` rows (id, name, thumbnail)
//! - [`MealDetail`] - `lookup.php`, `search.php` and `random.php` rows
//!
//! ## API Compatibility
//!
//! Detail rows carry their ingredients as forty flat, numbered fields
//! (`strIngredient1..20`, `strMeasure1..20`). [`MealDetail`] has a custom
//! deserializer that folds them into a fixed array of [`IngredientSlot`]s.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of ingredient/measure pairs a catalog record can hold.
pub const INGREDIENT_SLOTS: usize = 20;

/// Response envelope shared by every catalog endpoint.
#[derive(Debug, Deserialize)]
pub struct MealsResponse<T> {
    /// `None` when the service answers `{"meals": null}` or omits the key
    #[serde(default)]
    pub meals: Option<Vec<T>>,
}

impl<T> MealsResponse<T> {
    pub fn into_meals(self) -> Vec<T> {
        self.meals.unwrap_or_default()
    }
}

/// Opaque recipe identifier (`idMeal`).
///
/// The catalog sends it as a numeric string; a bare JSON number is accepted too
/// and kept in its decimal form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MealId(pub String);

impl<'de> Deserialize<'de> for MealId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct MealIdVisitor;

        impl<'de> Visitor<'de> for MealIdVisitor {
            type Value = MealId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a meal id as a string or integer")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(MealId::new(value))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
                Ok(MealId(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Ok(MealId(value.to_string()))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Ok(MealId(value.to_string()))
            }
        }

        deserializer.deserialize_any(MealIdVisitor)
    }
}

impl MealId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Row of `list.php?a=list`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AreaEntry {
    #[serde(rename = "strArea")]
    pub name: String,
}

/// Row of `list.php?c=list`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryEntry {
    #[serde(rename = "strCategory")]
    pub name: String,
}

/// Row of `list.php?i=list`.
#[derive(Debug, Serialize, Deserialize)]
pub struct IngredientEntry {
    #[serde(rename = "idIngredient", default)]
    pub id: Option<String>,
    #[serde(rename = "strIngredient")]
    pub name: String,
    #[serde(rename = "strDescription", default)]
    pub description: Option<String>,
    #[serde(rename = "strType", default)]
    pub kind: Option<String>,
}

/// Minimal recipe record.
///
/// Filter endpoints only return id, name and thumbnail; area and category are
/// filled in when the summary is taken from a full [`MealDetail`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealSummary {
    #[serde(rename = "idMeal")]
    pub id: MealId,
    #[serde(rename = "strMeal", default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
}

/// One (ingredient, measure) pair. Blank strings from the wire are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngredientSlot {
    pub ingredient: Option<String>,
    pub measure: Option<String>,
}

/// A complete recipe record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealDetail {
    #[serde(flatten)]
    pub summary: MealSummary,
    /// Free-text instructions; absent on partial records
    pub instructions: Option<String>,
    /// Comma-separated tag list as sent by the catalog
    pub tags: Option<String>,
    pub youtube: Option<String>,
    pub source: Option<String>,
    /// Slot `i` holds `strIngredient{i+1}` / `strMeasure{i+1}`
    pub ingredients: [IngredientSlot; INGREDIENT_SLOTS],
}

impl MealDetail {
    pub fn id(&self) -> &MealId {
        &self.summary.id
    }

    /// Whether the record carries instructions, i.e. whether a lookup would add anything.
    pub fn has_instructions(&self) -> bool {
        self.instructions
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }

    /// Non-empty slots in slot order.
    pub fn filled_slots(&self) -> impl Iterator<Item = &IngredientSlot> {
        self.ingredients.iter().filter(|slot| slot.ingredient.is_some())
    }

    /// True when any slot names `ingredient`, ignoring case.
    pub fn uses_ingredient(&self, ingredient: &str) -> bool {
        let wanted = ingredient.to_lowercase();
        self.filled_slots()
            .filter_map(|slot| slot.ingredient.as_deref())
            .any(|name| name.to_lowercase() == wanted)
    }
}

impl From<MealSummary> for MealDetail {
    fn from(summary: MealSummary) -> Self {
        Self {
            summary,
            instructions: None,
            tags: None,
            youtube: None,
            source: None,
            ingredients: Default::default(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Maps `strIngredient12` (with prefix `strIngredient`) to slot 11. Returns
/// `None` for anything that is not a numbered slot within range.
fn slot_index(key: &str, prefix: &str) -> Option<usize> {
    let number: usize = key.strip_prefix(prefix)?.parse().ok()?;
    (1..=INGREDIENT_SLOTS).contains(&number).then(|| number - 1)
}

/// Custom deserializer for MealDetail.
///
/// The catalog sends ingredients as numbered sibling fields rather than an
/// array, and uses `null`, `""` and `" "` interchangeably for an unused slot.
/// Only `idMeal` is required.
impl<'de> Deserialize<'de> for MealDetail {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};

        struct MealDetailVisitor;

        impl<'de> Visitor<'de> for MealDetailVisitor {
            type Value = MealDetail;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a meal object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut id: Option<MealId> = None;
                let mut name: Option<String> = None;
                let mut thumbnail = None;
                let mut area = None;
                let mut category = None;
                let mut instructions = None;
                let mut tags = None;
                let mut youtube = None;
                let mut source = None;
                let mut ingredients: [IngredientSlot; INGREDIENT_SLOTS] = Default::default();

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "idMeal" => id = Some(map.next_value()?),
                        "strMeal" => name = map.next_value()?,
                        "strMealThumb" => thumbnail = map.next_value()?,
                        "strArea" => area = map.next_value()?,
                        "strCategory" => category = map.next_value()?,
                        "strInstructions" => instructions = map.next_value()?,
                        "strTags" => tags = map.next_value()?,
                        "strYoutube" => youtube = map.next_value()?,
                        "strSource" => source = map.next_value()?,
                        other => {
                            if let Some(i) = slot_index(other, "strIngredient") {
                                ingredients[i].ingredient = non_blank(map.next_value()?);
                            } else if let Some(i) = slot_index(other, "strMeasure") {
                                ingredients[i].measure = non_blank(map.next_value()?);
                            } else {
                                let _ = map.next_value::<serde_json::Value>()?;
                            }
                        }
                    }
                }

                let id = id.ok_or_else(|| de::Error::missing_field("idMeal"))?;
                // A nameless record is still addressable by id.
                let name = name.unwrap_or_default();

                Ok(MealDetail {
                    summary: MealSummary {
                        id,
                        name,
                        thumbnail: non_blank(thumbnail),
                        area: non_blank(area),
                        category: non_blank(category),
                    },
                    instructions,
                    tags: non_blank(tags),
                    youtube: non_blank(youtube),
                    source: non_blank(source),
                    ingredients,
                })
            }
        }

        deserializer.deserialize_map(MealDetailVisitor)
    }
}
