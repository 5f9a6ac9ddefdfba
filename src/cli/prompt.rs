//! Interactive prompts

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Select};

/// Ask the user to pick one of `items`. Esc or `q` cancels with `None`.
pub fn select(prompt: &str, items: &[String]) -> Result<Option<String>> {
    let theme = ColorfulTheme::default();
    let selection = Select::with_theme(&theme)
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_opt()?;

    Ok(selection.map(|i| items[i].clone()))
}
