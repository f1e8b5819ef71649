//! Player plugin dependency resolver CLI.
//!
//! Usage:
//!   plugin-deps check --rules release/rules.toml
//!   plugin-deps chain
//!   plugin-deps resolve --plugins media_control,bottom_gear,level_selector --json

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use plugin_deps::plugin::{PluginName, PluginSelection, Resolver, SkipReason};
use plugin_deps::{Config, RuleSet};

/// Resolve player plugin dependencies.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML rule table (overrides PLUGIN_RULES_FILE; built-in table otherwise).
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the rule table and report cycles.
    Check,

    /// Print the dependency chain.
    Chain,

    /// Resolve a plugin list into a registration plan.
    Resolve {
        /// Comma-separated plugins, as in the `plugins` URL parameter.
        #[arg(long)]
        plugins: Option<String>,

        /// Comma-separated plugins to leave out (overrides PLUGIN_EXCLUDE).
        #[arg(long)]
        exclude: Option<String>,

        /// Print the plan as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();
    let config = Config::from_env().context("failed to load configuration")?;
    let config = match &args.command {
        Command::Resolve {
            plugins, exclude, ..
        } => config.with_overrides(args.rules.clone(), plugins.clone(), exclude.as_deref())?,
        _ => config.with_overrides(args.rules.clone(), None, None)?,
    };

    let rules = config.load_rules()?;
    let resolver = Resolver::new(&rules).context("invalid dependency rules")?;

    match args.command {
        Command::Check => cmd_check(&rules, &resolver),
        Command::Chain => cmd_chain(&resolver),
        Command::Resolve { json, .. } => {
            cmd_resolve(&resolver, &config.selection(), &config.exclude, json)
        }
    }
}

fn cmd_check(rules: &RuleSet, resolver: &Resolver) -> Result<()> {
    info!(
        rules = rules.len(),
        chained = resolver.chain().len(),
        "Rule table is valid"
    );
    println!("OK: {} rules, no circular dependencies.", rules.len());
    Ok(())
}

fn cmd_chain(resolver: &Resolver) -> Result<()> {
    if resolver.chain().is_empty() {
        println!("No dependency rules.");
        return Ok(());
    }

    println!("{:<20} DEPENDS ON", "PLUGIN");
    println!("{}", "-".repeat(60));
    for (plugin, deps) in resolver.chain().entries() {
        println!("{:<20} {}", plugin.as_str(), join(deps));
    }
    Ok(())
}

fn cmd_resolve(
    resolver: &Resolver,
    selection: &PluginSelection,
    exclude: &[PluginName],
    json: bool,
) -> Result<()> {
    let plan = resolver.plan(selection.as_slice(), exclude);

    if json {
        let out = serde_json::json!({
            "plugins": selection.as_slice(),
            "disabled": resolver.disabled_plugins(selection.as_slice()),
            "plan": plan,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("requested: {}", join(selection.as_slice()));
    println!("register:  {}", join(&plan.register));
    for (plugin, reason) in &plan.skipped {
        let why = match reason {
            SkipReason::Excluded => "excluded",
            SkipReason::Disabled => "missing dependency",
        };
        println!("  skipped: {plugin} ({why})");
    }
    Ok(())
}

fn join(plugins: &[PluginName]) -> String {
    plugins
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
