//! `catalog` command

use super::CatalogArgs;
use anyhow::Result;
use switchyard_llm::ModelCatalog;

pub fn run(args: &CatalogArgs) -> Result<()> {
    let catalog = ModelCatalog::default();

    if let Some(category) = args.category {
        println!("Preference list for {category} / {}:", args.priority);
        for (i, id) in catalog.preferences(category, args.priority).iter().enumerate() {
            match catalog.get(id) {
                Some(model) => println!("  {}. {:<36} ~${:.6}", i + 1, id, model.estimated_cost()),
                None => println!("  {}. {id}", i + 1),
            }
        }
        return Ok(());
    }

    println!(
        "{:<36} {:>7} {:>7} {:>9} {:>9} {:>10}",
        "MODEL", "QUALITY", "LATENCY", "IN $/1M", "OUT $/1M", "EST. CALL"
    );
    for model in catalog.models() {
        println!(
            "{:<36} {:>7} {:>7} {:>9.3} {:>9.3} {:>10.6}",
            model.id,
            model.quality,
            model.latency,
            model.input_cost_per_million,
            model.output_cost_per_million,
            model.estimated_cost()
        );
    }
    Ok(())
}
