use std::sync::Arc;

use colored::Colorize;

use cw_core::{InMemoryActorRepository, ItemRecord};
use cw_generator::character_to_actor_data;

use super::{Context, print_sheet, to_json};

pub async fn run(ctx: &Context, dry_run: bool, json: bool) -> Result<(), String> {
    let actors = Arc::new(InMemoryActorRepository::from_directory(ctx.load_store()?));
    let (generator, config) = ctx.generator(actors.clone())?;

    if dry_run {
        let record = generator
            .preview(&config)
            .await
            .map_err(|e| e.to_string())?;
        if json {
            println!("{}", to_json(&record)?);
        } else {
            let data = character_to_actor_data(record);
            let items: Vec<&ItemRecord> = data.items.iter().collect();
            print_sheet(&data.name, &data.system, &items);
        }
        return Ok(());
    }

    let actor = generator
        .create_character(&config)
        .await
        .map_err(|e| e.to_string())?;
    ctx.save_store(&actors.snapshot().await)?;

    if json {
        println!("{}", to_json(&actor)?);
    } else {
        let items: Vec<&ItemRecord> = actor.item_records().collect();
        print_sheet(&actor.name, &actor.system, &items);
        println!();
        println!(
            "  {} {} to {}",
            "Saved".green(),
            actor.name,
            ctx.store.display()
        );
    }
    Ok(())
}
