//! Recipe aggregate and its validated input.
//!
//! [`RecipeDraft`] is the only way to produce recipe content: both create and
//! full-replace updates go through [`RecipeDraft::new`], so a stored
//! [`Recipe`] always satisfies the same rules.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use utoipa::ToSchema;
use uuid::Uuid;

/// Payload field names as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeField {
    /// `name`
    Name,
    /// `ingredients`
    Ingredients,
    /// `instructions`
    Instructions,
    /// `preparationTime`
    PreparationTime,
    /// `cookTime`
    CookTime,
    /// `servings`
    Servings,
}

impl RecipeField {
    /// Every field, in validation order.
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Ingredients,
        Self::Instructions,
        Self::PreparationTime,
        Self::CookTime,
        Self::Servings,
    ];

    /// camelCase name used in JSON payloads and error details.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Ingredients => "ingredients",
            Self::Instructions => "instructions",
            Self::PreparationTime => "preparationTime",
            Self::CookTime => "cookTime",
            Self::Servings => "servings",
        }
    }
}

impl fmt::Display for RecipeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First constraint a recipe payload violated.
///
/// Messages always start with the offending field name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeValidationError {
    /// A required field was absent or `null`.
    #[error("{field} is required")]
    Missing {
        /// Field that was absent.
        field: RecipeField,
    },
    /// A text field held a non-string value.
    #[error("{field} must be a string")]
    NotAString {
        /// Field with the wrong type.
        field: RecipeField,
    },
    /// A text field was blank once trimmed.
    #[error("{field} must not be empty")]
    Empty {
        /// Blank field.
        field: RecipeField,
    },
    /// `ingredients` was not an array.
    #[error("ingredients must be an array of strings")]
    IngredientsNotAList,
    /// `ingredients` was an empty array.
    #[error("ingredients must contain at least one item")]
    NoIngredients,
    /// An ingredient entry was not a string.
    #[error("ingredients[{index}] must be a string")]
    IngredientNotAString {
        /// Zero-based position of the entry.
        index: usize,
    },
    /// An ingredient entry was blank once trimmed.
    #[error("ingredients[{index}] must not be empty")]
    EmptyIngredient {
        /// Zero-based position of the entry.
        index: usize,
    },
    /// A numeric field was not a finite number.
    #[error("{field} must be a number")]
    NotANumber {
        /// Field with the wrong type.
        field: RecipeField,
    },
    /// The payload carried a key outside the recipe schema.
    #[error("\"{key}\" is not allowed")]
    UnknownField {
        /// Unexpected key.
        key: String,
    },
}

impl RecipeValidationError {
    /// Wire name of the field the error refers to.
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field }
            | Self::NotAString { field }
            | Self::Empty { field }
            | Self::NotANumber { field } => field.as_str(),
            Self::IngredientsNotAList
            | Self::NoIngredients
            | Self::IngredientNotAString { .. }
            | Self::EmptyIngredient { .. } => RecipeField::Ingredients.as_str(),
            Self::UnknownField { key } => key.as_str(),
        }
    }

    /// Stable snake_case code for error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "missing_field",
            Self::NotAString { .. } | Self::IngredientNotAString { .. } => "not_a_string",
            Self::Empty { .. } | Self::EmptyIngredient { .. } => "empty_value",
            Self::IngredientsNotAList => "not_a_list",
            Self::NoIngredients => "empty_list",
            Self::NotANumber { .. } => "not_a_number",
            Self::UnknownField { .. } => "unknown_field",
        }
    }
}

/// Store-assigned recipe identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// Parse an identifier from its string form; `None` when malformed.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }

    /// Wrap a UUID read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for RecipeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

/// Validated recipe content, as submitted by a client.
///
/// ## Invariants
/// - `name` and every ingredient are trimmed and non-empty.
/// - `ingredients` holds at least one entry.
/// - `instructions` is non-empty once trimmed.
/// - numeric fields are finite.
///
/// # Examples
/// ```
/// use recipe_service::domain::RecipeDraft;
///
/// let draft = RecipeDraft::new(
///     "  Pancakes ",
///     vec![" flour".into(), "milk ".into()],
///     "Mix and fry.",
///     10.0,
///     15.0,
///     4.0,
/// )
/// .unwrap();
/// assert_eq!(draft.name(), "Pancakes");
/// assert_eq!(draft.ingredients(), ["flour", "milk"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    name: String,
    ingredients: Vec<String>,
    instructions: String,
    preparation_time: f64,
    cook_time: f64,
    servings: f64,
}

impl RecipeDraft {
    /// Validate and normalise recipe content.
    pub fn new(
        name: &str,
        ingredients: Vec<String>,
        instructions: &str,
        preparation_time: f64,
        cook_time: f64,
        servings: f64,
    ) -> Result<Self, RecipeValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RecipeValidationError::Empty {
                field: RecipeField::Name,
            });
        }

        if ingredients.is_empty() {
            return Err(RecipeValidationError::NoIngredients);
        }
        let ingredients = ingredients
            .iter()
            .enumerate()
            .map(|(index, item)| match item.trim() {
                "" => Err(RecipeValidationError::EmptyIngredient { index }),
                trimmed => Ok(trimmed.to_owned()),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if instructions.trim().is_empty() {
            return Err(RecipeValidationError::Empty {
                field: RecipeField::Instructions,
            });
        }

        for (field, value) in [
            (RecipeField::PreparationTime, preparation_time),
            (RecipeField::CookTime, cook_time),
            (RecipeField::Servings, servings),
        ] {
            if !value.is_finite() {
                return Err(RecipeValidationError::NotANumber { field });
            }
        }

        Ok(Self {
            name: name.to_owned(),
            ingredients,
            instructions: instructions.to_owned(),
            preparation_time,
            cook_time,
            servings,
        })
    }

    /// Recipe name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ordered ingredient list.
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// Preparation steps.
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Preparation time.
    pub fn preparation_time(&self) -> f64 {
        self.preparation_time
    }

    /// Cooking time.
    pub fn cook_time(&self) -> f64 {
        self.cook_time
    }

    /// Number of servings.
    pub fn servings(&self) -> f64 {
        self.servings
    }
}

/// Stored recipe.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: RecipeId,
    #[schema(example = "Pancakes")]
    name: String,
    #[schema(example = json!(["flour", "milk", "eggs"]))]
    ingredients: Vec<String>,
    #[schema(example = "Whisk everything and fry.")]
    instructions: String,
    #[schema(example = 10)]
    preparation_time: f64,
    #[schema(example = 15)]
    cook_time: f64,
    #[schema(example = 4)]
    servings: f64,
    created_at: DateTime<Utc>,
}

impl Recipe {
    /// Assemble a recipe from an identifier, validated content and creation
    /// timestamp.
    pub fn new(id: RecipeId, draft: RecipeDraft, created_at: DateTime<Utc>) -> Self {
        let RecipeDraft {
            name,
            ingredients,
            instructions,
            preparation_time,
            cook_time,
            servings,
        } = draft;
        Self {
            id,
            name,
            ingredients,
            instructions,
            preparation_time,
            cook_time,
            servings,
            created_at,
        }
    }

    /// Replace every content field, keeping identity and creation time.
    pub fn replaced_with(&self, draft: RecipeDraft) -> Self {
        Self::new(self.id, draft, self.created_at)
    }

    /// Identifier.
    pub fn id(&self) -> RecipeId {
        self.id
    }

    /// Recipe name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ordered ingredient list.
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// Preparation steps.
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Preparation time.
    pub fn preparation_time(&self) -> f64 {
        self.preparation_time
    }

    /// Cooking time.
    pub fn cook_time(&self) -> f64 {
        self.cook_time
    }

    /// Number of servings.
    pub fn servings(&self) -> f64 {
        self.servings
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
