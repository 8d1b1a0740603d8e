//! List rules command implementation.

use hospogate_core::{fix::fix_title, naming::NamingRule};
use hospogate_host::{NamingConventions, Rule, NAMING_DESCRIPTOR};

/// Runs the list-rules command.
pub fn run() {
    let rule = NamingConventions::new();

    println!("Available rules:\n");
    println!("{:<20} {:<20} Description", "Code", "Name");
    println!("{}", "-".repeat(80));
    println!(
        "{:<20} {:<20} {}",
        rule.code(),
        rule.name(),
        NAMING_DESCRIPTOR.title
    );

    println!(
        "\nCategory: {}, default severity: {}",
        NAMING_DESCRIPTOR.category,
        rule.default_severity()
    );
    println!("\nChecks:");
    for naming_rule in NamingRule::ALL {
        println!(
            "  {:<12} {}  (fix: {})",
            naming_rule.kind().as_str(),
            naming_rule.message(),
            fix_title(naming_rule.kind())
        );
    }

    println!("\nDisable or override in hospogate.toml, e.g.:");
    println!("  [rules.naming-conventions]");
    println!("  severity = \"error\"");
}
