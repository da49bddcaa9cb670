//! Ledger Kernel CLI Application
//!
//! A command-line interface for running the token ledger and operator
//! registry.

use clap::{Parser, Subcommand};
use ledger_kernel::api::{create_router, ApiState};
use ledger_kernel::cli::{cmd_demo, cmd_run};
use ledger_kernel::config::KernelConfig;
use ledger_kernel::kernel::SharedKernel;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kernel")]
#[command(author = "Darshan")]
#[command(version = "0.1.0")]
#[command(about = "A token ledger and operator registry kernel", long_about = None)]
struct Cli {
    /// JSON configuration file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in walkthrough and print every receipt
    Demo,

    /// Execute a JSON script of calls against a fresh kernel
    Run {
        /// Script file: a list of { "caller": ..., "call": { "op": ... } }
        #[arg(short, long)]
        script: PathBuf,
    },

    /// Start the REST API server
    Serve {
        /// Port to listen on (overrides the configuration)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = KernelConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Demo => cmd_demo(&config)?,
        Commands::Run { script } => cmd_run(&config, &script)?,
        Commands::Serve { port } => run_server(&config, port.unwrap_or(config.api_port))?,
    }

    Ok(())
}

fn run_server(config: &KernelConfig, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async {
        let state = ApiState {
            kernel: SharedKernel::from_config(config),
        };
        let app = create_router(state);

        let addr = format!("0.0.0.0:{}", port);
        println!("🚀 REST API server starting on http://localhost:{}", port);
        println!(
            "   Token: {} ({}), registry owner {}",
            config.token.name, config.token.symbol, config.owner
        );
        println!();
        println!("📖 Available endpoints:");
        println!("   GET  /health                             - Health check");
        println!("   GET  /ws                                 - Event stream");
        println!("   GET  /api/token                          - Token info");
        println!("   GET  /api/balances/{{addr}}                - Balance");
        println!("   GET  /api/allowances/{{owner}}/{{spender}}  - Allowance");
        println!("   GET  /api/operators                      - Operators");
        println!("   GET  /api/operators/{{index}}              - Operator at index");
        println!("   GET  /api/operators/check/{{addr}}         - Operator check");
        println!("   GET  /api/events                         - Event log");
        println!("   POST /api/calls                          - Execute a call");
        println!();

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                tokio::signal::ctrl_c().await.ok();
                println!("\n📴 Shutting down API server...");
            })
            .await?;

        Ok::<(), Box<dyn std::error::Error>>(())
    })?;

    Ok(())
}
