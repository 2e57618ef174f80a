use colored::Colorize;

use cw_core::ItemRecord;

use super::{Context, print_sheet, to_json};

pub fn run(ctx: &Context, name: &str, json: bool) -> Result<(), String> {
    let directory = ctx.load_store()?;
    let actor = directory
        .find_by_name(name)
        .ok_or_else(|| format!("actor not found: \"{name}\""))?;

    if json {
        println!("{}", to_json(actor)?);
        return Ok(());
    }

    let items: Vec<&ItemRecord> = actor.item_records().collect();
    print_sheet(&actor.name, &actor.system, &items);

    let tokens = directory.tokens_of(actor.id);
    if !tokens.is_empty() {
        println!();
        println!("  {} {}", "tokens:".dimmed(), tokens.len());
    }
    Ok(())
}
