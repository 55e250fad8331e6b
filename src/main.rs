//! A3S Search MCP CLI - web search and scrape with provider fallback.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use a3s_search_mcp::{
    Dispatcher, Fallback, OperationKind, Registry, ScrapeRequest, SearchError, SearchRequest,
    Settings, Tool, SCRAPE_PRIORITY, SEARCH_PRIORITY, TIMEOUT_ENV, TIMEOUT_ENV_ALIAS,
};

/// A3S Search MCP - web search and scrape across Serper, Tavily, Brave and Jina
#[derive(Parser)]
#[command(name = "a3s-search-mcp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the web
    Search(SearchArgs),

    /// Scrape a webpage
    Scrape(ScrapeArgs),

    /// Invoke a tool by name with JSON arguments
    Call(CallArgs),

    /// List configured providers and available tools
    Providers,
}

#[derive(Parser)]
struct SearchArgs {
    /// Search query
    query: String,

    /// Search vertical (search, images, videos, places, maps, reviews, news,
    /// shopping, lens, scholar, patents, autocomplete)
    #[arg(short, long, default_value = "search")]
    kind: OperationKind,

    /// Country code (e.g., us)
    #[arg(long)]
    gl: Option<String>,

    /// Language code (e.g., en)
    #[arg(long)]
    hl: Option<String>,

    /// Location (e.g., "Berlin, Germany")
    #[arg(long)]
    location: Option<String>,

    /// Number of results to request
    #[arg(short, long)]
    num: Option<u32>,

    /// Page number
    #[arg(short, long)]
    page: Option<u32>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Parser)]
struct ScrapeArgs {
    /// Page URL
    url: String,

    /// Request markdown output where supported
    #[arg(short, long)]
    markdown: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Parser)]
struct CallArgs {
    /// Tool name (e.g., google_search_news, webpage_scrape)
    tool: Tool,

    /// Tool arguments as a JSON object
    #[arg(default_value = "{}")]
    arguments: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// Compact single-line output
    Compact,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging; stdout is reserved for results
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    dotenvy::dotenv().ok();
    let settings = Settings::from_env();
    let fallback = Fallback::new(Arc::new(Registry::from_settings(&settings)));

    match cli.command {
        Commands::Search(args) => run_search(&fallback, args).await,
        Commands::Scrape(args) => run_scrape(&fallback, args).await,
        Commands::Call(args) => run_call(fallback, args).await,
        Commands::Providers => list_providers(&fallback, &settings),
    }
}

fn list_providers(fallback: &Fallback, settings: &Settings) -> Result<()> {
    let registry = fallback.registry();

    println!("Search providers (fallback order):\n");
    for kind in SEARCH_PRIORITY {
        let status = if settings.api_key(kind).is_some() { "configured" } else { "not set" };
        println!("    {:<8} {:<16} {}", kind.as_str(), kind.env_var(), status);
    }
    println!();
    println!("Scrape providers (fallback order):\n");
    for kind in SCRAPE_PRIORITY {
        let status = if settings.api_key(kind).is_some() { "configured" } else { "not set" };
        println!("    {:<8} {:<16} {}", kind.as_str(), kind.env_var(), status);
    }
    println!();
    println!(
        "Active: search [{}], scrape [{}]; timeout {}s ({}, or {})",
        registry.search_names().join(", "),
        registry.scrape_names().join(", "),
        settings.timeout().as_secs(),
        TIMEOUT_ENV,
        TIMEOUT_ENV_ALIAS
    );
    println!();
    println!("Tools:");
    for tool in Tool::all() {
        println!("    {:<28} {}", tool.name(), tool.description());
    }
    Ok(())
}

async fn run_search(fallback: &Fallback, args: SearchArgs) -> Result<()> {
    let mut request = SearchRequest::new(&args.query).with_kind(args.kind);
    request.gl = args.gl;
    request.hl = args.hl;
    request.location = args.location;
    request.num = args.num;
    request.page = args.page;

    let response = fallback.search(&request).await.map_err(explain)?;

    match args.format {
        OutputFormat::Text => {
            // Native results without an engine tag come from Google via Serper.
            let engine = response.engine().unwrap_or("google");
            println!(
                "\n{} results for \"{}\" ({} results, engine {}):\n",
                args.kind,
                args.query,
                response.organic.len(),
                engine
            );

            // Some native verticals omit or skip positions; fall back to list order.
            let renumber = !response.has_contiguous_positions();
            for (i, result) in response.organic.iter().enumerate() {
                let position = if renumber { i as u32 + 1 } else { result.position };
                println!("{}. {}", position, result.title);
                println!("   URL: {}", result.link);
                if !result.snippet.is_empty() {
                    let snippet = if result.snippet.chars().count() > 150 {
                        format!("{}...", result.snippet.chars().take(150).collect::<String>())
                    } else {
                        result.snippet.clone()
                    };
                    println!("   {}", snippet);
                }
                println!();
            }

            if response.organic.is_empty() && !response.extra.is_empty() {
                println!("{}", serde_json::to_string_pretty(&response.extra)?);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Compact => {
            for result in &response.organic {
                println!("{}\t{}", result.title, result.link);
            }
        }
    }

    Ok(())
}

async fn run_scrape(fallback: &Fallback, args: ScrapeArgs) -> Result<()> {
    let mut request = ScrapeRequest::new(&args.url);
    if args.markdown {
        request = request.with_markdown(true);
    }

    let response = fallback.scrape(&request).await.map_err(explain)?;

    match args.format {
        OutputFormat::Text => {
            if !response.title.is_empty() {
                println!("# {}\n", response.title);
            }
            println!("{}", response.text);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Compact => {
            println!("{}\t{}\t{}", response.url, response.title, response.text.len());
        }
    }

    Ok(())
}

async fn run_call(fallback: Fallback, args: CallArgs) -> Result<()> {
    let arguments: serde_json::Value =
        serde_json::from_str(&args.arguments).context("Tool arguments must be a JSON object")?;

    let dispatcher = Dispatcher::new(fallback);
    let output = dispatcher.call(args.tool, arguments).await.map_err(explain)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Adds a credentials hint when the last provider rejected the request.
fn explain(err: SearchError) -> anyhow::Error {
    match err.status() {
        Some(401) | Some(403) => {
            anyhow::Error::new(err).context("Provider rejected the request; check the *_API_KEY variables")
        }
        _ => err.into(),
    }
}
