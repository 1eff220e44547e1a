//! List rules command implementation.

use scss_lint_rules::{all_rules, Preset, RULES};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<26} {:<8} Description", "Code", "Name", "Fixable");
    println!("{}", "-".repeat(96));

    for rule in all_rules() {
        println!(
            "{:<8} {:<26} {:<8} {}",
            rule.code(),
            rule.name(),
            if rule.fixable() { "yes" } else { "no" },
            rule.description()
        );
    }

    println!("\nPresets:");
    for preset in Preset::ALL {
        println!("  {:<12} - {}", preset.name(), preset_summary(preset));
    }

    println!("\nUse --rules to run specific rules, e.g.:");
    println!("  scss-lint check --rules zero-unit,color-literal");
    println!("  scss-lint check --rules SL003,SL009 --fix");
}

fn preset_summary(preset: Preset) -> String {
    let codes: Vec<&str> = RULES
        .iter()
        .filter(|info| preset.includes(info.name))
        .map(|info| info.code)
        .collect();
    let label = match preset {
        Preset::Recommended => " (default)",
        Preset::Strict => " at error severity",
        Preset::Minimal => " (for gradual adoption)",
    };
    if codes.len() == RULES.len() {
        format!("all rules{label}")
    } else {
        format!("{}{label}", codes.join(", "))
    }
}
