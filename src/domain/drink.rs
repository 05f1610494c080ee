//! Cocktail records as served by the public cocktail database.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Highest numbered ingredient/measure slot in a drink record
const INGREDIENT_SLOTS: usize = 15;

/// Complete description and recipe of a single drink.
///
/// The upstream record spreads ingredients over `strIngredient1..15` and
/// `strMeasure1..15`; those numbered fields are kept as-is and exposed
/// through [`FullDrink::ingredients`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FullDrink {
    #[serde(rename = "idDrink", default)]
    pub id: String,
    #[serde(rename = "strDrink", default)]
    pub name: String,
    #[serde(rename = "strVideo", default)]
    pub video: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strIBA", default)]
    pub iba: Option<String>,
    #[serde(rename = "strAlcoholic", default)]
    pub alcoholic: Option<String>,
    #[serde(rename = "strGlass", default)]
    pub glass: Option<String>,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    #[serde(rename = "strDrinkThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "dateModified", default)]
    pub date_modified: Option<String>,
    #[serde(flatten)]
    slots: BTreeMap<String, serde_json::Value>,
}

/// One line of a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    pub name: String,
    pub measure: Option<String>,
}

impl FullDrink {
    /// Minimal record with only an id and a name.
    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Non-empty ingredients in recipe order, paired with their measure.
    pub fn ingredients(&self) -> Vec<Ingredient> {
        (1..=INGREDIENT_SLOTS)
            .filter_map(|slot| {
                let name = self.slot(&format!("strIngredient{}", slot))?;
                Some(Ingredient {
                    name,
                    measure: self.slot(&format!("strMeasure{}", slot)),
                })
            })
            .collect()
    }

    fn slot(&self, key: &str) -> Option<String> {
        self.slots
            .get(key)
            .and_then(|value| value.as_str())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }
}

/// Response envelope for endpoints returning complete drinks
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FullDrinkList {
    #[serde(default, deserialize_with = "lenient_list")]
    pub drinks: Vec<FullDrink>,
}

/// Minimal representation of a drink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drink {
    #[serde(rename = "strDrink")]
    pub name: String,
    #[serde(rename = "strDrinkThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "idDrink")]
    pub id: String,
}

impl From<&FullDrink> for Drink {
    fn from(drink: &FullDrink) -> Self {
        Self {
            name: drink.name.clone(),
            thumbnail: drink.thumbnail.clone(),
            id: drink.id.clone(),
        }
    }
}

/// Response envelope for endpoints returning minimal drinks
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DrinkList {
    #[serde(default, deserialize_with = "lenient_list")]
    pub drinks: Vec<Drink>,
}

/// The API answers "no results" with `null` or a string instead of `[]`.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => {
            serde_json::from_value(serde_json::Value::Array(items)).map_err(serde::de::Error::custom)
        }
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARGARITA: &str = r#"{
        "drinks": [{
            "idDrink": "11007",
            "strDrink": "Margarita",
            "strVideo": null,
            "strCategory": "Ordinary Drink",
            "strIBA": "Contemporary Classics",
            "strAlcoholic": "Alcoholic",
            "strGlass": "Cocktail glass",
            "strInstructions": "Rub the rim of the glass with the lime slice.",
            "strDrinkThumb": "https://www.thecocktaildb.com/images/media/drink/5noda61589575158.jpg",
            "strIngredient1": "Tequila",
            "strIngredient2": "Triple sec",
            "strIngredient3": "Lime juice",
            "strIngredient4": "Salt",
            "strIngredient5": null,
            "strIngredient6": "",
            "strMeasure1": "1 1/2 oz ",
            "strMeasure2": "1/2 oz ",
            "strMeasure3": "1 oz ",
            "strMeasure4": null,
            "strMeasure5": null,
            "dateModified": "2015-08-18 14:42:59"
        }]
    }"#;

    #[test]
    fn decodes_full_drink() {
        let list: FullDrinkList = serde_json::from_str(MARGARITA).unwrap();
        assert_eq!(list.drinks.len(), 1);

        let drink = &list.drinks[0];
        assert_eq!(drink.id, "11007");
        assert_eq!(drink.name, "Margarita");
        assert_eq!(drink.video, None);
        assert_eq!(drink.glass.as_deref(), Some("Cocktail glass"));
    }

    #[test]
    fn ingredients_skip_empty_slots_and_trim_measures() {
        let list: FullDrinkList = serde_json::from_str(MARGARITA).unwrap();
        let ingredients = list.drinks[0].ingredients();

        assert_eq!(ingredients.len(), 4);
        assert_eq!(ingredients[0].name, "Tequila");
        assert_eq!(ingredients[0].measure.as_deref(), Some("1 1/2 oz"));
        assert_eq!(ingredients[3].name, "Salt");
        assert_eq!(ingredients[3].measure, None);
    }

    #[test]
    fn null_drink_list_is_empty() {
        let list: FullDrinkList = serde_json::from_str(r#"{"drinks": null}"#).unwrap();
        assert!(list.drinks.is_empty());

        let list: DrinkList = serde_json::from_str(r#"{"drinks": "no data found"}"#).unwrap();
        assert!(list.drinks.is_empty());
    }

    #[test]
    fn decodes_minimal_drinks() {
        let list: DrinkList = serde_json::from_str(
            r#"{"drinks":[{"strDrink":"Mojito","strDrinkThumb":"x.jpg","idDrink":"11000"}]}"#,
        )
        .unwrap();
        assert_eq!(list.drinks[0].name, "Mojito");
        assert_eq!(list.drinks[0].id, "11000");
    }
}
