use std::sync::Arc;

use colored::Colorize;

use cw_core::{InMemoryActorRepository, ItemRecord};

use super::{Context, print_sheet};

pub async fn run(ctx: &Context, name: &str) -> Result<(), String> {
    let directory = ctx.load_store()?;
    let (id, old_name) = directory
        .find_by_name(name)
        .map(|actor| (actor.id, actor.name.clone()))
        .ok_or_else(|| format!("actor not found: \"{name}\""))?;

    let actors = Arc::new(InMemoryActorRepository::from_directory(directory));
    let (generator, config) = ctx.generator(actors.clone())?;
    let actor = generator
        .regenerate_actor(id, &config)
        .await
        .map_err(|e| e.to_string())?;
    ctx.save_store(&actors.snapshot().await)?;

    let items: Vec<&ItemRecord> = actor.item_records().collect();
    print_sheet(&actor.name, &actor.system, &items);
    println!();
    println!(
        "  {} {} as {}",
        "Regenerated".green(),
        old_name,
        actor.name.bold()
    );
    Ok(())
}
