//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# hospogate configuration

# Lowest severity that makes `hospogate check` exit non-zero
# fail_on = "warning"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/bin/**",
    "**/obj/**",
]

# Respect .gitignore files
respect_gitignore = true

# Analyze files marked <auto-generated> or named *.g.cs / *.Designer.cs
analyze_generated_code = false

[rules.naming-conventions]
enabled = true
# severity = "error"  # Override default severity (warning)
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("hospogate.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created hospogate.toml");
    println!("\nNext steps:");
    println!("  1. Edit hospogate.toml to configure the analyzer");
    println!("  2. Run: hospogate check");
    println!("  3. Run: hospogate fix --dry-run");

    Ok(())
}
