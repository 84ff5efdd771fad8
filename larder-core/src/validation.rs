//! Form input validation.
//!
//! Only strict comma-separated ingredient lists reach the pipeline. Anything
//! rejected here never touches retrieval or generation.

use thiserror::Error;

/// Largest recipe count the form offers.
pub const MAX_RECIPES_PER_REQUEST: u32 = 10;

/// Recipe count preselected in the form.
pub const DEFAULT_NUM_RECIPES: u32 = 3;

/// Conjunctions that indicate a free-text list instead of comma separation.
const DISALLOWED_CONJUNCTIONS: [&str; 3] = [" and ", " or ", "&"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter some ingredients to proceed!")]
    Empty,

    #[error("Only comma-separated ingredient values are accepted.")]
    Conjunction,

    #[error("Number of recipes must be between 1 and {max}, got {got}")]
    RecipeCount { got: u32, max: u32 },
}

/// Validate the ingredient text, returning the trimmed input.
pub fn validate_ingredients(raw: &str) -> Result<&str, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }

    let lowered = trimmed.to_lowercase();
    if DISALLOWED_CONJUNCTIONS
        .iter()
        .any(|conj| lowered.contains(conj))
    {
        return Err(ValidationError::Conjunction);
    }

    Ok(trimmed)
}

pub fn validate_num_recipes(num_recipes: u32) -> Result<u32, ValidationError> {
    if (1..=MAX_RECIPES_PER_REQUEST).contains(&num_recipes) {
        Ok(num_recipes)
    } else {
        Err(ValidationError::RecipeCount {
            got: num_recipes,
            max: MAX_RECIPES_PER_REQUEST,
        })
    }
}

/// Validate a full submission.
pub fn validate_request(raw: &str, num_recipes: u32) -> Result<(&str, u32), ValidationError> {
    let ingredients = validate_ingredients(raw)?;
    let num_recipes = validate_num_recipes(num_recipes)?;
    Ok((ingredients, num_recipes))
}

impl ValidationError {
    /// Warnings are "you forgot something"; errors are "this input is wrong".
    pub fn is_warning(&self) -> bool {
        matches!(self, ValidationError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_comma_separated_list() {
        assert_eq!(
            validate_ingredients("  chicken, rice, garlic ").unwrap(),
            "chicken, rice, garlic"
        );
    }

    #[test]
    fn test_rejects_empty_and_whitespace() {
        for input in ["", "   ", "\t\n"] {
            assert_eq!(validate_ingredients(input), Err(ValidationError::Empty));
        }
    }

    #[test]
    fn test_rejects_conjunctions() {
        for input in [
            "chicken and rice",
            "chicken AND rice",
            "chicken or tofu",
            "salt&pepper",
            "salt & pepper",
            "rice, beans Or lentils",
        ] {
            assert_eq!(
                validate_ingredients(input),
                Err(ValidationError::Conjunction),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_conjunction_substrings_inside_words_are_fine() {
        // "and" inside "candy", "or" inside "pork"
        assert!(validate_ingredients("candy, pork, orange, andouille").is_ok());
    }

    #[test]
    fn test_recipe_count_bounds() {
        assert!(validate_num_recipes(0).is_err());
        assert_eq!(validate_num_recipes(1), Ok(1));
        assert_eq!(validate_num_recipes(10), Ok(10));
        assert_eq!(
            validate_num_recipes(11),
            Err(ValidationError::RecipeCount { got: 11, max: 10 })
        );
    }

    #[test]
    fn test_validate_request_checks_ingredients_first() {
        assert_eq!(validate_request(" ", 0), Err(ValidationError::Empty));
        assert_eq!(validate_request("eggs, milk", 2), Ok(("eggs, milk", 2)));
    }

    #[test]
    fn test_messages_match_form_notices() {
        assert_eq!(
            ValidationError::Empty.to_string(),
            "Please enter some ingredients to proceed!"
        );
        assert!(ValidationError::Empty.is_warning());
        assert!(!ValidationError::Conjunction.is_warning());
    }
}
