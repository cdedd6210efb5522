//! `classify` and `route` commands

use super::{PromptArgs, RouteArgs};
use crate::app::{build_router, AppConfig};
use anyhow::Result;
use switchyard_llm::{classify_with_rule, ProviderCredentials, RoutingDecision};

pub fn classify(args: &PromptArgs) -> Result<()> {
    let classification = classify_with_rule(&args.text());
    println!("{} (rule: {})", classification.category, classification.rule);
    Ok(())
}

pub fn run(config: &AppConfig, args: &RouteArgs) -> Result<()> {
    let router = build_router(config, ProviderCredentials::from_env());
    let overrides = config.custom_overrides()?;

    let text = args.prompt.text();
    let classification = classify_with_rule(&text);
    let priority = args.priority.unwrap_or(config.routing.default_priority);
    let decision = router.route(
        classification.category,
        priority,
        &args.exclude,
        Some(&overrides),
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&decision)?);
    } else {
        print_decision(&decision);
    }
    Ok(())
}

pub(crate) fn print_decision(decision: &RoutingDecision) {
    println!("Category:       {}", decision.category);
    println!("Priority:       {}", decision.priority);
    println!("Estimated cost: ${:.6}", decision.estimated_cost);
    if decision.is_empty() {
        println!("Candidates:     none");
    } else {
        println!("Candidates:");
        for (i, model) in decision.selected_models.iter().enumerate() {
            println!(
                "  {}. {:<36} quality {:>2}  latency {:>2}  ~${:.6}",
                i + 1,
                model.id,
                model.quality,
                model.latency,
                model.estimated_cost()
            );
        }
    }
    println!("Reasoning:      {}", decision.reasoning);
}
