//! Recipe records and their wire layout.
//!
//! The same JSON layout is used on the HTTP surface, inside the cached list
//! payload and in import files: `id, name, tags, ingredients, instruction,
//! publishedAt`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::error::DomainError;

/// Store-assigned recipe identifier. Never reused once issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// Issue a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RecipeId {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| DomainError::invalid_id(raw))
    }
}

/// Canonical recipe record as held by the primary store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
    #[serde(rename = "instruction")]
    pub instructions: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub published_at: OffsetDateTime,
}

impl Recipe {
    /// Exact, case-sensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate == tag)
    }

    /// Replace every client-editable field; `id` and `published_at` stay put.
    pub fn apply(&mut self, fields: RecipeFields) {
        let RecipeFields {
            name,
            tags,
            ingredients,
            instructions,
        } = fields;
        self.name = name;
        self.tags = tags;
        self.ingredients = ingredients;
        self.instructions = instructions;
    }
}

/// The client-editable part of a recipe, as accepted by create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeFields {
    pub name: String,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
    #[serde(rename = "instruction")]
    pub instructions: Vec<String>,
}

/// Insert request handed to a store; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub fields: RecipeFields,
    pub published_at: OffsetDateTime,
}

impl NewRecipe {
    /// A recipe published now.
    pub fn now(fields: RecipeFields) -> Self {
        Self {
            fields,
            published_at: publication_timestamp(),
        }
    }

    pub fn into_recipe(self, id: RecipeId) -> Recipe {
        let RecipeFields {
            name,
            tags,
            ingredients,
            instructions,
        } = self.fields;
        Recipe {
            id,
            name,
            tags,
            ingredients,
            instructions,
            published_at: self.published_at,
        }
    }
}

/// One entry of an import file. Incoming ids are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedRecipe {
    #[serde(flatten)]
    pub fields: RecipeFields,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
}

impl ImportedRecipe {
    pub fn into_new_recipe(self) -> NewRecipe {
        match self.published_at {
            Some(published_at) => NewRecipe {
                fields: self.fields,
                published_at,
            },
            None => NewRecipe::now(self.fields),
        }
    }
}

/// Current wall-clock time at the precision every store binding can hold.
pub fn publication_timestamp() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now.replace_microsecond(now.microsecond()).unwrap_or(now)
}

/// Serialize a recipe list into the cached payload.
pub fn encode_list(recipes: &[Recipe]) -> Result<String, serde_json::Error> {
    serde_json::to_string(recipes)
}

/// Parse a cached payload back into a recipe list.
pub fn decode_list(payload: &str) -> Result<Vec<Recipe>, serde_json::Error> {
    serde_json::from_str(payload)
}

/// Parse the contents of an import file: a JSON array in wire layout.
pub fn decode_import(payload: &str) -> Result<Vec<ImportedRecipe>, DomainError> {
    serde_json::from_str(payload).map_err(|err| {
        DomainError::validation(format!("import payload is not a recipe array: {err}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn sample(name: &str, tags: &[&str]) -> Recipe {
        Recipe {
            id: RecipeId::generate(),
            name: name.to_string(),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            ingredients: vec!["water".to_string(), "leaves".to_string()],
            instructions: vec!["boil".to_string(), "steep".to_string()],
            published_at: datetime!(2024-03-01 08:30:15.123456 UTC),
        }
    }

    #[test]
    fn wire_layout_uses_singular_instruction_and_camel_case_timestamp() {
        let recipe = sample("Tea", &["drink"]);
        let value = serde_json::to_value(&recipe).expect("serialize recipe");
        let object = value.as_object().expect("recipe is a json object");

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "id",
                "ingredients",
                "instruction",
                "name",
                "publishedAt",
                "tags"
            ]
        );
        assert_eq!(object["instruction"], serde_json::json!(["boil", "steep"]));
        assert_eq!(object["publishedAt"], "2024-03-01T08:30:15.123456Z");
    }

    #[test]
    fn cached_list_round_trips() {
        let empty = encode_list(&[]).expect("encode empty list");
        assert_eq!(empty, "[]");
        assert!(decode_list(&empty).expect("decode empty list").is_empty());

        let recipes = vec![
            sample("Tea", &["drink"]),
            sample("Cake", &["dessert", "baking"]),
            Recipe {
                instructions: Vec::new(),
                ..sample("Toast", &[])
            },
        ];
        let payload = encode_list(&recipes).expect("encode list");
        let decoded = decode_list(&payload).expect("decode list");
        assert_eq!(decoded, recipes);
    }

    #[test]
    fn recipe_id_rejects_malformed_input() {
        let id = RecipeId::generate();
        assert_eq!(id.to_string().parse::<RecipeId>().expect("valid id"), id);

        let err = "not-an-id".parse::<RecipeId>().expect_err("invalid id");
        assert!(matches!(err, DomainError::InvalidId { raw } if raw == "not-an-id"));
    }

    #[test]
    fn tag_membership_is_exact_and_case_sensitive() {
        let recipe = sample("Tea", &["drink", "hot"]);
        assert!(recipe.has_tag("drink"));
        assert!(!recipe.has_tag("Drink"));
        assert!(!recipe.has_tag("dri"));
    }

    #[test]
    fn apply_keeps_identity_and_publication_time() {
        let mut recipe = sample("Tea", &["drink"]);
        let id = recipe.id;
        let published_at = recipe.published_at;

        recipe.apply(RecipeFields {
            name: "Green tea".to_string(),
            tags: vec!["drink".to_string(), "green".to_string()],
            ingredients: vec!["sencha".to_string()],
            instructions: vec!["steep at 70C".to_string()],
        });

        assert_eq!(recipe.id, id);
        assert_eq!(recipe.published_at, published_at);
        assert_eq!(recipe.name, "Green tea");
        assert_eq!(recipe.instructions, vec!["steep at 70C".to_string()]);
    }

    #[test]
    fn import_ignores_ids_and_defaults_publication_time() {
        let payload = r#"[
            {"id": "legacy-1", "name": "Tea", "tags": ["drink"], "ingredients": ["water"],
             "instruction": ["boil"], "publishedAt": "2019-05-04T10:00:00Z"},
            {"name": "Cake", "tags": ["dessert"]}
        ]"#;

        let imported = decode_import(payload).expect("decode import");
        assert_eq!(imported.len(), 2);

        let before = publication_timestamp();
        let tea = imported[0].clone().into_new_recipe();
        let cake = imported[1].clone().into_new_recipe();

        assert_eq!(tea.published_at, datetime!(2019-05-04 10:00:00 UTC));
        assert_eq!(tea.fields.instructions, vec!["boil".to_string()]);
        assert!(cake.published_at >= before);
        assert!(cake.fields.ingredients.is_empty());
    }

    #[test]
    fn import_rejects_non_array_payload() {
        let err = decode_import(r#"{"name": "Tea"}"#).expect_err("object is not an array");
        assert!(matches!(err, DomainError::Validation { .. }));
    }
}
