//! Questions command - print the built-in questionnaire

use anyhow::Result;
use console::style;
use maturity_check::catalog::{questions_in, SizeBracket};
use maturity_check::models::{CategoryKey, MAX_IMPORTANCE, MAX_MATURITY, MIN_IMPORTANCE};

pub fn run() -> Result<()> {
    println!("\n{}\n", style("Project Management Maturity Check").bold());
    println!(
        "Rate each practice for {} (0 = not practiced .. {} = optimized)",
        style("maturity").cyan(),
        MAX_MATURITY
    );
    println!(
        "and {} ({} = low .. {} = high). Skip questions that do not apply.\n",
        style("importance").cyan(),
        MIN_IMPORTANCE,
        MAX_IMPORTANCE
    );

    for key in CategoryKey::ALL {
        println!(
            "{} {}  {}",
            style(key).bold(),
            style(key.name()).bold(),
            style(key.description()).dim()
        );
        for q in questions_in(key) {
            println!("  {:<4} {}", style(q.id).cyan(), q.text);
            println!("       {}", style(q.description).dim());
        }
        println!();
    }

    println!("{}", style("Company size brackets").bold());
    for bracket in SizeBracket::ALL {
        println!("  {:<4} {}", style(bracket.id()).cyan(), bracket.label());
    }
    println!();

    Ok(())
}
