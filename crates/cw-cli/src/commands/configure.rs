use colored::Colorize;

use cw_generator::{ModuleSettings, validate_settings};

use super::Context;

/// Validate the chosen packs and save them. Nothing is written when a pack
/// is missing or incomplete.
pub async fn run(
    ctx: &Context,
    options: &str,
    traits: &str,
    dev_mode: Option<bool>,
) -> Result<(), String> {
    let lookup = ctx.open_lookup()?;
    let current = ctx.load_settings()?;
    let settings =
        ModuleSettings::new(options, traits).with_dev_mode(dev_mode.unwrap_or(current.dev_mode));

    let errors = validate_settings(&lookup, &settings).await;
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("  {} {error}", "✗".red());
        }
        return Err("settings not saved".into());
    }

    settings
        .save(&ctx.settings)
        .map_err(|e| format!("{}: {e}", ctx.settings.display()))?;
    println!(
        "  {} Saved settings to {}",
        "✓".green(),
        ctx.settings.display()
    );
    Ok(())
}
