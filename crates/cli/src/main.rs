mod exit_code;
mod fetch;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use exit_code::ExitCode;
use fetch::{fetch_schema, FetchOutcome};
use output::SchemaWriter;
use shopify_introspect::IntrospectionError;
use shopify_schema_config::ShopifyConfig;

const ENVIRONMENT_HELP: &str = "\
Environment:
  STORE           Store subdomain (the `acme` in acme.myshopify.com)
  API_VERSION     Admin API version, e.g. 2024-01
  ACCESS_TOKEN    Admin API access token
  RUST_LOG        Log filter for diagnostics on stderr (default: off)
  NO_COLOR        Disable colored output

Writes ./schema.graphql and ./<API_VERSION>.json.";

#[derive(Parser)]
#[command(name = "fetch-schema")]
#[command(
    about = "Fetch a Shopify Admin API GraphQL schema as SDL and introspection JSON",
    long_about = None
)]
#[command(version, after_help = ENVIRONMENT_HELP)]
struct Cli {}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let _cli = Cli::parse();

    init_tracing();
    configure_colors();

    let code = match run().await {
        Ok(()) => ExitCode::Success,
        Err(err) => {
            report(&err);
            ExitCode::from_error(&err)
        }
    };
    tracing::debug!(code = code.code(), "Exiting");
    code.into()
}

async fn run() -> Result<()> {
    let start_time = std::time::Instant::now();

    let config = ShopifyConfig::from_env()?;
    let endpoint = config.endpoint_url();
    let writer = SchemaWriter::new(".");

    let spinner = progress::spinner(&format!("Fetching schema from {endpoint}..."));
    let result = fetch_schema(&config, &endpoint, &writer).await;
    spinner.finish_and_clear();

    let FetchOutcome {
        schema_path,
        json_path,
        type_count,
    } = result?;

    println!(
        "{} Schema written to {} ({type_count} types)",
        "✓".green(),
        schema_path.display().to_string().cyan()
    );
    println!(
        "{} Introspection result written to {}",
        "✓".green(),
        json_path.display().to_string().cyan()
    );
    println!("  {} {:.2}s", "⏱".dimmed(), start_time.elapsed().as_secs_f64());

    Ok(())
}

/// Prints a failure to stderr. GraphQL errors are dumped as the server sent
/// them.
fn report(err: &anyhow::Error) {
    if let Some(IntrospectionError::GraphQL(errors)) = err.downcast_ref::<IntrospectionError>() {
        eprintln!(
            "{} GraphQL endpoint returned {} error(s):",
            "✗".red(),
            errors.len()
        );
        match serde_json::to_string_pretty(errors.raw()) {
            Ok(raw) => eprintln!("{raw}"),
            Err(_) => eprintln!("{errors}"),
        }
        return;
    }
    eprintln!("{} {err:#}", "error:".red().bold());
}

/// Initialize tracing on stderr, filtered by `RUST_LOG`.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Configure colored output from environment variables.
///
/// Priority order (highest to lowest):
/// 1. `NO_COLOR` (if set to any value, disable colors)
/// 2. `CLICOLOR_FORCE` (if set to non-zero, force colors)
/// 3. `CLICOLOR` (if set to "0", disable colors)
/// 4. Default: colors enabled if stdout is a TTY (handled by `colored` crate)
///
/// See: <https://no-color.org/> and <https://bixense.com/clicolors/>
fn configure_colors() {
    use colored::control;

    if std::env::var_os("NO_COLOR").is_some() {
        control::set_override(false);
    } else if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        if !val.is_empty() && val != "0" {
            control::set_override(true);
        }
    } else if let Ok(val) = std::env::var("CLICOLOR") {
        if val == "0" {
            control::set_override(false);
        }
    }
}
