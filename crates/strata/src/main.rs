// SPDX-FileCopyrightText: 2026 Strata Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Strata - adaptive inference orchestration.
//!
//! This is the binary entry point: loads and validates configuration,
//! initializes tracing, and runs one-shot orchestrated generation requests.

use std::str::FromStr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use strata_backends::ProviderRouter;
use strata_config::{ProfileRegistry, StrataConfig, UseCase};
use strata_core::{AnalyticsSink, TracingSink};
use strata_engine::{InferenceService, Orchestrator, ServiceRequest};

/// Strata - adaptive inference orchestration.
#[derive(Parser, Debug)]
#[command(name = "strata", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one orchestrated generation request and print the result as JSON.
    Ask {
        /// The prompt to process.
        prompt: String,
        /// Use case override (speed, quality, reasoning, balanced).
        #[arg(long)]
        use_case: Option<String>,
        /// Product context for prompt shaping (e.g. seo, email, content).
        #[arg(long)]
        context: Option<String>,
        /// System prompt passed through to the backend.
        #[arg(long)]
        system: Option<String>,
    },
    /// Print the resolved configuration as TOML.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match strata_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            strata_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.orchestrator.log_level);

    let exit_code = match cli.command {
        Commands::Ask {
            prompt,
            use_case,
            context,
            system,
        } => run_ask(&config, prompt, use_case, context, system).await,
        Commands::Config => run_config(&config),
    };
    std::process::exit(exit_code);
}

async fn run_ask(
    config: &StrataConfig,
    prompt: String,
    use_case: Option<String>,
    context: Option<String>,
    system: Option<String>,
) -> i32 {
    let use_case = match use_case.as_deref().map(UseCase::from_str).transpose() {
        Ok(parsed) => parsed,
        Err(_) => {
            eprintln!("strata: unknown use case (expected speed, quality, reasoning, balanced)");
            return 2;
        }
    };

    let service = match build_service(config) {
        Ok(service) => service,
        Err(message) => {
            eprintln!("strata: {message}");
            return 1;
        }
    };

    let mut request = ServiceRequest::new(prompt);
    request.use_case = use_case;
    request.product_context = context;
    request.system_prompt = system;

    let result = service.generate(request).await;
    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("strata: failed to render result: {e}");
            return 1;
        }
    }
    if result.success { 0 } else { 1 }
}

fn run_config(config: &StrataConfig) -> i32 {
    match toml::to_string_pretty(config) {
        Ok(rendered) => {
            println!("{rendered}");
            0
        }
        Err(e) => {
            eprintln!("strata: failed to render config: {e}");
            1
        }
    }
}

fn build_service(config: &StrataConfig) -> Result<InferenceService, String> {
    let registry =
        ProfileRegistry::from_config(config).map_err(|e| e.to_string())?;
    let router = ProviderRouter::from_config(config).map_err(|e| e.to_string())?;
    let sink: Arc<dyn AnalyticsSink> = Arc::new(TracingSink);
    let orchestrator = Orchestrator::new(
        Arc::new(router),
        Arc::new(registry),
        &config.scoring,
        Some(sink),
    )
    .map_err(|e| e.to_string())?;
    Ok(InferenceService::new(orchestrator))
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("strata={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
