use anyhow::Context;
use clap::{Parser, Subcommand};
use scout_common::protocol::FlowExecutionResult;
use scout_common::scenario::{PageObjectSpec, ScenarioDocument};
use scout_engine::backend::Backend;
use scout_engine::config::{ConfigLoader, ScoutConfig};
use scout_engine::flow::FlowExecutor;
use scout_engine::mcp::{PlaywrightBackend, StdioTransport};
use scout_engine::selector::SelectorFiller;
use scout_engine::skeleton::{apply_selectors, page_object_spec};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scout", version, about = "Resolve page-object selectors from E2E scenario documents")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse and validate a scenario document
    Parse {
        scenario: PathBuf,
        /// Print the parsed document as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve PLACEHOLDER selectors in page-object skeletons against the live app
    Fill {
        scenario: PathBuf,
        /// Directory holding `<PageName>.ts` skeletons (defaults to pagesDirectory from config)
        #[arg(long)]
        pages: Option<PathBuf>,
        /// Config file (defaults to ./scout.yaml, ./.e2e-agent.config.json, ~/.scout/config.yaml)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write resolved selectors back into the skeleton files
        #[arg(long)]
        write: bool,
        /// Print the execution result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Parse { scenario, json } => parse(&scenario, json),
        Command::Fill {
            scenario,
            pages,
            config,
            write,
            json,
        } => fill(&scenario, pages, config, write, json).await,
    }
}

fn load_scenario(path: &Path) -> anyhow::Result<Option<ScenarioDocument>> {
    let document = scout_parser::parse_file(path)?;
    let report = scout_parser::validate(&document);
    if !report.valid {
        for error in &report.errors {
            eprintln!("{}: {}", path.display(), error);
        }
        return Ok(None);
    }
    Ok(Some(document))
}

fn parse(path: &Path, json: bool) -> anyhow::Result<ExitCode> {
    let document = scout_parser::parse_file(path)?;
    let report = scout_parser::validate(&document);

    if json {
        let output = serde_json::json!({ "document": document, "validation": report });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Pages ({}):", document.pages.len());
        for page in &document.pages {
            println!("  {} {}", page.name, page.path);
        }
        println!("Flows ({}):", document.flows.len());
        for flow in &document.flows {
            println!("  {} ({} steps)", flow.name, flow.steps.len());
            for step in &flow.steps {
                println!("    {}. [{:?}] {}", step.order, step.action, step.raw);
            }
        }
        for error in &report.errors {
            eprintln!("{}: {}", path.display(), error);
        }
    }

    Ok(if report.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn fill(
    scenario: &Path,
    pages_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
    write: bool,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let config: ScoutConfig = match config_path {
        Some(path) => ConfigLoader::load_from(&path).await?,
        None => ConfigLoader::load_default().await?,
    };
    let Some(document) = load_scenario(scenario)? else {
        return Ok(ExitCode::FAILURE);
    };
    let pages_dir = pages_dir.unwrap_or_else(|| PathBuf::from(&config.pages_directory));

    let mut skeletons: Vec<(PathBuf, String)> = Vec::new();
    let mut specs: Vec<PageObjectSpec> = Vec::new();
    for page in &document.pages {
        let file = pages_dir.join(format!("{}.ts", page.name));
        let code = if file.exists() {
            tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?
        } else {
            warn!(page = %page.name, file = %file.display(), "No skeleton found");
            String::new()
        };
        debug!(page = %page.name, flows = document.flows_for_page(&page.name).count(), "Page referenced by flows");
        specs.push(page_object_spec(page, &code));
        skeletons.push((file, code));
    }

    let mut backend = PlaywrightBackend::new(
        StdioTransport::from_config(&config.mcp),
        config.base_url.clone(),
        config.mcp.tools.clone(),
    );
    backend.launch().await.context("Failed to start the MCP server")?;

    let result = FlowExecutor::new(SelectorFiller::new(&mut backend))
        .execute(&specs)
        .await;

    if let Err(e) = backend.close().await {
        warn!(error = %e, "Failed to close backend");
    }

    if write {
        write_skeletons(&skeletons, &result).await?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result);
    }

    Ok(if result.has_failures {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    })
}

async fn write_skeletons(
    skeletons: &[(PathBuf, String)],
    result: &FlowExecutionResult,
) -> anyhow::Result<()> {
    for ((file, code), page) in skeletons.iter().zip(&result.pages) {
        if code.is_empty() || page.selectors.is_empty() {
            continue;
        }
        let rewrite = apply_selectors(code, &page.selectors);
        if rewrite.replaced.is_empty() {
            continue;
        }
        tokio::fs::write(file, &rewrite.code)
            .await
            .with_context(|| format!("Failed to write {}", file.display()))?;
        info!(
            file = %file.display(),
            replaced = rewrite.replaced.len(),
            unresolved = ?rewrite.unresolved,
            "Updated skeleton"
        );
    }
    Ok(())
}

fn print_report(result: &FlowExecutionResult) {
    for page in &result.pages {
        let status = if page.success { "ok" } else { "FAILED" };
        println!("{} {} [{}]", page.page_name, page.path, status);
        if let Some(error) = &page.error {
            println!("  error: {}", error);
        }
        for m in &page.selectors {
            match &m.selector {
                Some(selector) => println!(
                    "  {} -> {} ({:.1}, {})",
                    m.element_name, selector, m.confidence, m.reason
                ),
                None => println!("  {} -> unresolved ({})", m.element_name, m.reason),
            }
        }
        if !page.missing_elements.is_empty() {
            println!("  missing: {}", page.missing_elements.join(", "));
        }
    }
}
