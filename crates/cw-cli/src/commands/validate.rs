use colored::Colorize;

use cw_generator::validate_settings;

use super::Context;

pub async fn run(ctx: &Context) -> Result<(), String> {
    let settings = ctx.load_settings()?;
    let lookup = ctx.open_lookup()?;
    let errors = validate_settings(&lookup, &settings).await;

    if errors.is_empty() {
        println!(
            "  {} {} and {} hold every required table",
            "✓".green(),
            settings.character_creation_options,
            settings.character_traits
        );
        return Ok(());
    }

    for error in &errors {
        eprintln!("  {} {error}", "✗".red());
    }
    Err(format!(
        "{} configuration problem{}",
        errors.len(),
        if errors.len() == 1 { "" } else { "s" }
    ))
}
