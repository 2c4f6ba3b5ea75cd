//! yevedia-search CLI
//!
//! Command-line front end for the search augmentation pipeline: run the
//! provider chain, inspect what the classifier and rewriter do with a message,
//! or print the prompt context a chat turn would get.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use yevedia_search::{
    augment_message,
    classifier::matched_trigger,
    config::{SearchConfig, SERPER_API_KEY_ENV, TAVILY_API_KEY_ENV, TIMEOUT_ENV},
    extract_search_query, format_search_results_for_prompt, ProviderConfig, SearchError,
    SearchResponse, WebSearch,
};

#[derive(Parser)]
#[command(name = "yevedia-search")]
#[command(about = "Web search augmentation for local chat")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the web through the provider fallback chain
    Search {
        /// Search query
        query: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Tell whether a message would trigger a web search
    Classify {
        /// Chat message
        message: String,
    },
    /// Show the search query extracted from a message
    Rewrite {
        /// Chat message
        message: String,
    },
    /// Run the full chat augmentation pipeline and print the outcome as JSON
    Augment {
        /// Chat message
        message: String,

        /// Skip the web search even if the message asks for one
        #[arg(long)]
        no_auto_search: bool,
    },
    /// List the provider chain and its configuration
    Providers,
}

#[derive(ValueEnum, Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
    Prompt,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search { query, format } => handle_search(query, format).await?,
        Commands::Classify { message } => handle_classify(&message),
        Commands::Rewrite { message } => println!("{}", extract_search_query(&message)),
        Commands::Augment {
            message,
            no_auto_search,
        } => handle_augment(&message, !no_auto_search).await?,
        Commands::Providers => handle_list_providers()?,
    }

    Ok(())
}

fn load_config() -> anyhow::Result<SearchConfig> {
    SearchConfig::from_env().context("Invalid search configuration")
}

async fn handle_search(
    query: String,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if query.trim().is_empty() {
        return Err(SearchError::InvalidInput("A search query is required".to_string()).into());
    }

    let config = load_config()?;
    let search = WebSearch::from_config(&config)?;
    let response = search.search(query.trim()).await?;

    display_response(&response, &format)?;
    Ok(())
}

fn handle_classify(message: &str) {
    match matched_trigger(message) {
        Some(trigger) => println!("{} (trigger: \"{}\")", "search".green().bold(), trigger),
        None => println!("{}", "no search".yellow()),
    }
}

async fn handle_augment(
    message: &str,
    auto_search: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let search = WebSearch::from_config(&config)?;
    let outcome = augment_message(&search, message, auto_search).await;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

fn handle_list_providers() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let search = WebSearch::from_config(&config)?;

    println!("{}", "Search Providers (in fallback order):".bold().blue());
    println!();

    let rows: [(&str, &ProviderConfig, &str); 3] = [
        ("Tavily", &config.tavily, TAVILY_API_KEY_ENV),
        ("Serper", &config.serper, SERPER_API_KEY_ENV),
        ("DuckDuckGo", &config.duckduckgo, "no API key required"),
    ];

    for (name, provider, requirement) in rows {
        let in_chain = search
            .provider_names()
            .iter()
            .any(|n| n.eq_ignore_ascii_case(name));
        let status = if in_chain { "on ".green() } else { "off".red() };
        let key = if provider.api_key.is_some() { "key set" } else { "no key" };

        println!(
            "[{}] {} - {} ({}, {})",
            status,
            name.bold(),
            provider.base_url,
            key,
            requirement.italic()
        );
    }

    println!();
    println!("{} {}ms", "Per-provider timeout:".bold(), config.timeout.as_millis());
    println!();
    println!("{}", "Environment:".bold());
    println!("export {SERPER_API_KEY_ENV}=your_key");
    println!("export {TAVILY_API_KEY_ENV}=tvly-your_key   # Tavily stays disabled by default");
    println!("export {TIMEOUT_ENV}=15000");

    Ok(())
}

fn display_response(
    response: &SearchResponse,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(response)?);
        }
        OutputFormat::Prompt => {
            print!("{}", format_search_results_for_prompt(response));
        }
        OutputFormat::Table => {
            println!("{} {}", "Search Results from".bold(), response.source.bold().blue());
            println!("{}", "─".repeat(80).dimmed());

            for (i, result) in response.results.iter().enumerate() {
                println!("{}. {}", (i + 1).to_string().bold(), result.title.bold());
                if !result.url.is_empty() {
                    println!("   {}", result.url.blue().underline());
                }
                println!("   {}", truncate_chars(&result.snippet, 200).italic());
                println!();
            }

            println!("{} {}", "Total results:".bold(), response.results.len().to_string().bold());
        }
    }
    Ok(())
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}
