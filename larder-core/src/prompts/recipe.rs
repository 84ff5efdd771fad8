//! Recipe generation prompt.
//!
//! The safety rules below are instructions to the model, nothing more: the
//! generated text is returned verbatim and compliance is best-effort.

use url::form_urlencoded;

use crate::index::RetrievedRecipe;

/// Base URL for the per-recipe video search link.
pub const YOUTUBE_SEARCH_URL: &str = "https://www.youtube.com/results?search_query=";

const SAFETY_POLICY: &str = "\
You are a responsible AI chef.
You must only generate recipes for edible, legal, and safe ingredients.
If a provided ingredient is inappropriate or unknown, respond: 'Ingredient not recognized as safe for consumption.'
Do not attempt to make recipes with human parts, unsafe items, or unverified terms.
Mention the **name of place/country** where the recipe is popular, compulsorily and the **source of your knowledge** for each recipe.";

/// Render the generation prompt.
pub fn render_recipe_prompt(
    ingredients: &str,
    num_recipes: u32,
    inspirations: &[RetrievedRecipe],
) -> String {
    let mut prompt = format!(
        r#"{policy}

The user has provided the following ingredients: {ingredients}

Based on these ingredients, and referring to similar recipes listed below, suggest **{num_recipes} new, creative recipe ideas** the user could try.
Also mention the exact or approximate **quantity** of the ingredients.
Do not say the user provided a recipe. If an ingredient is not a known food item, respond by saying 'Unknown ingredient: <term>' and skip it in the recipe.
Only generate recipes for common, edible food ingredients. If any ingredient appears unethical, illegal, or non-consumable (like human organs), refuse to generate a recipe and respond with an appropriate message.
Only refer to the ingredients provided.

Remember, you are a chef, not a doctor or scientist. Focus on culinary creativity and safety. Also, do not generate same recipes multiple times.

After each recipe, include a YouTube video search link in this exact format:
YouTube Video Link: {youtube}RECIPE_TITLE+recipe

Where RECIPE_TITLE is the exact name of that recipe.

Similar recipe inspirations:
"#,
        policy = SAFETY_POLICY,
        ingredients = ingredients,
        num_recipes = num_recipes,
        youtube = YOUTUBE_SEARCH_URL,
    );

    for recipe in inspirations {
        prompt.push_str(&format!("\n- {}: {}\n", recipe.title, recipe.instructions));
    }

    prompt.push_str("\nNow, suggest your recipes in a clear, numbered list format with steps.");
    prompt
}

/// Video search link for a recipe title, query-encoded the way the prompt asks.
pub fn youtube_search_link(title: &str) -> String {
    let query: String = form_urlencoded::byte_serialize(title.trim().as_bytes()).collect();
    format!("{}{}+recipe", YOUTUBE_SEARCH_URL, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inspiration(title: &str, instructions: &str) -> RetrievedRecipe {
        RetrievedRecipe {
            title: title.to_string(),
            instructions: instructions.to_string(),
            score: 0.5,
        }
    }

    #[test]
    fn test_render_prompt() {
        let prompt = render_recipe_prompt(
            "chicken, rice, garlic",
            2,
            &[
                inspiration("Garlic Chicken", "Roast it."),
                inspiration("Fried Rice", "Fry it."),
            ],
        );

        assert!(prompt.starts_with("You are a responsible AI chef."));
        assert!(prompt.contains("The user has provided the following ingredients: chicken, rice, garlic"));
        assert!(prompt.contains("suggest **2 new, creative recipe ideas**"));
        assert!(prompt.contains("\n- Garlic Chicken: Roast it.\n"));
        assert!(prompt.contains("\n- Fried Rice: Fry it.\n"));
        assert!(prompt.contains(
            "YouTube Video Link: https://www.youtube.com/results?search_query=RECIPE_TITLE+recipe"
        ));
        assert!(prompt.ends_with("numbered list format with steps."));
    }

    #[test]
    fn test_inspirations_keep_retrieval_order() {
        let prompt = render_recipe_prompt(
            "eggs",
            1,
            &[inspiration("B First", "b"), inspiration("A Second", "a")],
        );
        let first = prompt.find("- B First").unwrap();
        let second = prompt.find("- A Second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_render_prompt_without_inspirations() {
        let prompt = render_recipe_prompt("eggs", 1, &[]);
        assert!(prompt.contains("Similar recipe inspirations:\n\nNow, suggest"));
    }

    #[test]
    fn test_safety_rules_present() {
        let prompt = render_recipe_prompt("eggs", 3, &[]);
        assert!(prompt.contains("Ingredient not recognized as safe for consumption."));
        assert!(prompt.contains("Unknown ingredient: <term>"));
        assert!(prompt.contains("human parts"));
        assert!(prompt.contains("source of your knowledge"));
    }

    #[test]
    fn test_youtube_search_link() {
        assert_eq!(
            youtube_search_link("Chicken Tikka Masala"),
            "https://www.youtube.com/results?search_query=Chicken+Tikka+Masala+recipe"
        );
        assert_eq!(
            youtube_search_link("Mac & Cheese"),
            "https://www.youtube.com/results?search_query=Mac+%26+Cheese+recipe"
        );
    }
}
