//! HTML rendering for the recipe form.

use larder_core::validation::{DEFAULT_NUM_RECIPES, MAX_RECIPES_PER_REQUEST};

/// Severity of a message shown above the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    fn css_class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Info => "notice info",
            NoticeKind::Warning => "notice warning",
            NoticeKind::Error => "notice error",
        }
    }
}

/// Everything the page shows. Round-trips through hidden form fields, so each
/// browser tab carries its own session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    pub ingredients: String,
    pub num_recipes: u32,
    pub recipe: String,
    pub generated: bool,
    pub notice: Option<Notice>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            ingredients: String::new(),
            num_recipes: DEFAULT_NUM_RECIPES,
            recipe: String::new(),
            generated: false,
            notice: None,
        }
    }
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; background: #1e1e1e; color: #f1f1f1; }
input[type=text], select { border-radius: 10px; padding: 14px; border: 1px solid #ccc; background: #2c2c2c; color: #f1f1f1; }
input[type=text] { width: 100%; box-sizing: border-box; }
.button-group { display: flex; gap: 10px; margin-top: 12px; flex-wrap: wrap; }
button { border-radius: 10px; background: #FF6F61; color: white; padding: 12px 20px; border: none; font-size: 16px; cursor: pointer; }
button:hover { background: #ff4c3b; }
.recipe-box { background: #fff1e6; padding: 20px; border-radius: 12px; border: 1px solid #f8d4c6; color: #333; font-size: 16px; line-height: 1.6; margin-top: 20px; white-space: pre-wrap; }
.notice { padding: 12px 16px; border-radius: 8px; margin-top: 12px; }
.notice.info { background: #1c3a5e; }
.notice.warning { background: #5e4b1c; }
.notice.error { background: #5e1c1c; }
textarea { width: 100%; box-sizing: border-box; height: 300px; }
"#;

pub fn render_page(state: &PageState) -> String {
    let options: String = (1..=MAX_RECIPES_PER_REQUEST)
        .map(|n| {
            let selected = if n == state.num_recipes { " selected" } else { "" };
            format!(r#"<option value="{n}"{selected}>{n}</option>"#)
        })
        .collect();

    let notice = state
        .notice
        .as_ref()
        .map(|n| {
            format!(
                r#"<div class="{}" role="alert">{}</div>"#,
                n.css_class(),
                html_escape(&n.message)
            )
        })
        .unwrap_or_default();

    let result = if state.recipe.is_empty() {
        String::new()
    } else {
        let recipe = html_escape(&state.recipe);
        format!(
            r#"<h3>Here's your recipe:</h3>
<div class="recipe-box">{recipe}</div>
<details><summary>Copyable Recipe Text</summary>
<textarea readonly aria-label="Copy this recipe">{recipe}</textarea>
</details>"#
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>AI Recipe Finder</title>
<style>{style}</style>
</head>
<body>
<h1>AI-Powered Recipe Finder</h1>
<p>Enter the ingredients you have, and I'll suggest a recipe for you!</p>
<form method="post" action="/generate">
<label for="ingredients">Ingredients (comma-separated):</label>
<input type="text" id="ingredients" name="ingredients" placeholder="e.g. chicken, rice, garlic" value="{ingredients}">
<label for="num_recipes">How many recipes would you like?</label>
<select id="num_recipes" name="num_recipes">{options}</select>
<input type="hidden" name="recipe" value="{recipe}">
<input type="hidden" name="generated" value="{generated}">
<div class="button-group">
<button type="submit" formaction="/generate">Generate Recipe</button>
<button type="submit" formaction="/clear">Clear</button>
</div>
</form>
{notice}
{result}
<hr>
<p>Powered by Groq and axum</p>
</body>
</html>
"#,
        style = STYLE,
        ingredients = html_escape(&state.ingredients),
        options = options,
        recipe = html_escape(&state.recipe),
        generated = state.generated,
        notice = notice,
        result = result,
    )
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
