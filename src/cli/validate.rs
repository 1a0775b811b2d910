//! Manifest validation command.

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::cli::Cli;
use crate::config::{PluginSpec, SiteConfig, find_manifest};
use crate::log;
use crate::utils::{plural_count, plural_s};

/// Check the manifest and report every problem at once.
pub fn run(cli: &Cli, warn_only: bool) -> Result<()> {
    let Some(path) = find_manifest(&cli.config) else {
        log!(
            "error";
            "manifest '{}' not found. Run 'gantry init' to create one.",
            cli.config.display()
        );
        std::process::exit(1);
    };

    let config = SiteConfig::from_path(&path)?;

    match config.validate() {
        Ok(()) => {}
        Err(err) if warn_only => {
            eprintln!("{err}");
            log!("validate"; "completed with warnings");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    }

    print_chain(&config);
    log!(
        "validate";
        "manifest ok: {} ({})",
        plural_count(config.plugins.len(), "plugin"),
        path.display()
    );
    Ok(())
}

/// Print one summary line per chain entry.
fn print_chain(config: &SiteConfig) {
    for spec in &config.plugins {
        let detail = describe(spec);
        if detail.is_empty() {
            println!("{} {}", "✓".green(), spec.name());
        } else {
            println!("{} {} {}", "✓".green(), spec.name(), detail.dimmed());
        }
    }
}

/// Describe an entry's payload: option count and sub-chain length.
fn describe(spec: &PluginSpec) -> String {
    let Some(options) = spec.options() else {
        return String::new();
    };

    let own = options.keys().filter(|key| key.as_str() != "plugins").count();
    let sub = spec.sub_plugins().map_or(0, |chain| chain.len());

    let mut parts = Vec::new();
    if own > 0 {
        parts.push(plural_count(own, "option"));
    }
    if sub > 0 {
        parts.push(format!("{} sub-plugin{}", sub, plural_s(sub)));
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!("({})", parts.join(", "))
    }
}
