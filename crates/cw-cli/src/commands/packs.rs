use comfy_table::{ContentArrangement, Table};

use cw_core::TableLookupPort;

use super::Context;

pub async fn run(ctx: &Context) -> Result<(), String> {
    let lookup = ctx.open_lookup()?;
    let packs = lookup.list_packs().await;

    if packs.is_empty() {
        println!("  No packs found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Label", "ID", "Tables", "Items"]);

    for summary in &packs {
        let (tables, items) = lookup
            .compendium()
            .pack(&summary.id)
            .map(|pack| (pack.tables.len(), pack.items.len()))
            .unwrap_or_default();
        table.add_row(vec![
            summary.label.clone(),
            summary.id.clone(),
            tables.to_string(),
            items.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} packs", packs.len());
    Ok(())
}
