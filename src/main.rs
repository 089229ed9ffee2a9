use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use gntools::config::{self, GntoolsConfig};
use gntools::geonis::{
    consts, DefinitionTable, EleDefinitions, NameKey, RelationRecord, RelationTable,
};
use gntools::workspace::{ClickHouseSource, MemoryWorkspace};
use serde_json::json;

/// gntools - GEONIS object-name resolution for geodatabase workspaces
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// YAML workspace snapshot (ClickHouse settings from the environment are
    /// used when omitted)
    #[arg(long)]
    workspace: Option<PathBuf>,

    /// Solution code for `definitions` (e.g. ele)
    #[arg(long)]
    solution: Option<String>,

    /// GEONIS language (custom, de, en, fr, it)
    #[arg(long)]
    language: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the overrides stored in the definition table of the solution
    Definitions,
    /// List the resolved table names of the electric solution
    Tables,
    /// List the resolved field names of the electric solution
    Fields,
    /// List the relations of one type
    Relations {
        /// aggregate, composite, datalink, entity, label, plan, relate or shapegroup
        #[arg(long = "type")]
        relation_type: String,

        /// Key relations by target table
        #[arg(long)]
        reverse: bool,
    },
    /// Resolve one semantic table or field name (e.g. cable, route_ref)
    Resolve { name: String },
    /// Save the workspace as a YAML snapshot
    Snapshot { output: PathBuf },
}

impl From<&Cli> for config::CliConfig {
    fn from(cli: &Cli) -> Self {
        config::CliConfig {
            config: cli.config.clone(),
            solution: cli.solution.clone(),
            language: cli.language.clone(),
            workspace: cli.workspace.clone(),
        }
    }
}

async fn open_workspace(config: &GntoolsConfig) -> anyhow::Result<MemoryWorkspace> {
    if let Some(path) = &config.workspace {
        log::info!("Reading workspace snapshot {}", path.display());
        return MemoryWorkspace::from_yaml_file(path)
            .with_context(|| format!("cannot read workspace snapshot {}", path.display()));
    }

    let Some(settings) = &config.clickhouse else {
        bail!("no workspace: pass --workspace or set GNTOOLS_WORKSPACE or CLICKHOUSE_* variables");
    };
    log::info!("Fetching workspace from {} ({})", settings.url, settings.database);

    let mut solutions = vec![config.solution.as_str()];
    if !config.solution.eq_ignore_ascii_case(consts::MEDIA_ELECTRIC) {
        solutions.push(consts::MEDIA_ELECTRIC);
    }
    ClickHouseSource::from_settings(settings)
        .fetch_workspace(&solutions)
        .await
        .with_context(|| format!("cannot fetch workspace from {}", settings.database))
}

fn format_pairs<I, K, V>(pairs: I, as_json: bool) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut pairs: Vec<_> = pairs.into_iter().collect();
    pairs.sort_unstable_by(|a, b| a.0.as_ref().cmp(b.0.as_ref()));
    if as_json {
        let map: serde_json::Map<_, _> = pairs
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_string(), json!(v.as_ref())))
            .collect();
        serde_json::Value::Object(map).to_string()
    } else {
        pairs
            .iter()
            .map(|(k, v)| format!("{:<32} {}", k.as_ref(), v.as_ref()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn print_pairs<I, K, V>(pairs: I, as_json: bool)
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    println!("{}", format_pairs(pairs, as_json));
}

fn print_relations(relations: &RelationTable, as_json: bool) -> anyhow::Result<()> {
    let mut entries: Vec<(&str, &RelationRecord)> = relations.iter().collect();
    entries.sort_unstable_by_key(|(key, _)| *key);

    if as_json {
        let map = entries
            .into_iter()
            .map(|(k, v)| serde_json::to_value(v).map(|v| (k.to_string(), v)))
            .collect::<Result<serde_json::Map<_, _>, _>>()?;
        println!("{}", serde_json::Value::Object(map));
        return Ok(());
    }

    let text = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    for (key, rec) in entries {
        println!(
            "{} -> {} ({} -> {}) via {} ({} -> {})",
            key,
            text(&rec.target_table),
            text(&rec.source_field),
            text(&rec.target_field),
            text(&rec.relate_table),
            text(&rec.relate_source),
            text(&rec.relate_target),
        );
    }
    Ok(())
}

async fn run(cli: Cli, config: GntoolsConfig) -> anyhow::Result<()> {
    let workspace = open_workspace(&config).await?;

    match cli.command {
        Command::Definitions => {
            let definitions = DefinitionTable::load(&workspace, &config.solution)?;
            print_pairs(definitions.iter(), cli.json);
        }
        Command::Tables => {
            let ele = EleDefinitions::with_language(&workspace, config.language_source())?;
            print_pairs(ele.tables().iter().map(|(k, v)| (k.name(), v)), cli.json);
        }
        Command::Fields => {
            let ele = EleDefinitions::with_language(&workspace, config.language_source())?;
            print_pairs(ele.fields().iter(), cli.json);
        }
        Command::Relations {
            relation_type,
            reverse,
        } => {
            let relations = RelationTable::load_named(&workspace, &relation_type, reverse)?;
            print_relations(&relations, cli.json)?;
            if !relations.warnings().is_empty() {
                eprintln!("{} duplicate relations ignored", relations.warnings().len());
            }
        }
        Command::Resolve { name } => {
            let ele = EleDefinitions::with_language(&workspace, config.language_source())?;
            let resolved = ele
                .tables()
                .resolve(&name)
                .or_else(|| ele.fields().resolve(&name));
            match resolved {
                Some(value) => print_pairs([(name.as_str(), value)], cli.json),
                None => bail!("'{}' is neither a table nor a field name", name),
            }
        }
        Command::Snapshot { output } => {
            workspace
                .save_yaml_file(&output)
                .with_context(|| format!("cannot write {}", output.display()))?;
            log::info!(
                "Saved {} tables to {}",
                workspace.table_names().len(),
                output.display()
            );
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    // .env is optional
    let _ = dotenvy::dotenv();

    // Defaults to WARN, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match GntoolsConfig::from_cli((&cli).into()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli, config).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
