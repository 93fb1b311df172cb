// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * VulnScan Pro - Command Line Client
 * Account registration, login and scan submission against the
 * VulnScan Pro backend.
 *
 * (c) 2026 Bountyy Oy
 */

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, Level};

use tokio_util::sync::CancellationToken;
use url::Url;

use vulnscan_client::config::{ClientConfig, ScanProtocol};
use vulnscan_client::controller::AppController;
use vulnscan_client::errors::ClientError;
use vulnscan_client::report::{render_text, ReportView};
use vulnscan_client::session::FileSessionStore;
use vulnscan_client::view::ViewState;

/// VulnScan Pro - command line client
#[derive(Parser)]
#[command(name = "vulnscan")]
#[command(author = "Bountyy Oy <info@bountyy.fi>")]
#[command(version)]
#[command(about = "Client for the VulnScan Pro web security scanning service", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Quiet mode - only show errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// API base URL (overrides config file and VULNSCAN_API_BASE)
    #[arg(long, global = true)]
    api_base: Option<Url>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a VulnScan Pro account
    Register {
        /// Account email address
        email: String,

        /// Full name shown on reports
        #[arg(long)]
        full_name: String,

        /// Account password
        #[arg(long, env = "VULNSCAN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log in and store the session for this API origin
    Login {
        /// Account email address
        email: String,

        /// Account password
        #[arg(long, env = "VULNSCAN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session (no server call is made)
    Logout,

    /// Show the current session state
    Whoami {
        /// Also probe the backend health endpoint
        #[arg(long)]
        check: bool,
    },

    /// Scan a target website
    Scan {
        /// Target URL to scan
        target: String,

        /// Use the direct (blocking) scan endpoint instead of
        /// create-then-poll
        #[arg(long)]
        direct: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,

        /// Maximum number of result polls before giving up
        #[arg(long)]
        max_polls: Option<u32>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Export a scan report to a file
    Export {
        /// Scan id to export
        scan_id: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(num_cpus::get())
        .thread_name("vulnscan-client")
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> Result<()> {
    let mut config = ClientConfig::load(cli.config.as_deref())?;

    if let Some(api_base) = cli.api_base {
        config.api_base = api_base;
        config.validate()?;
    }

    match cli.command {
        Commands::Register {
            email,
            full_name,
            password,
        } => {
            let controller = build_controller(&config)?;
            controller.register(&email, &password, &full_name).await?;
            println!("Registration successful! You can now log in with: vulnscan login {}", email.trim());
        }

        Commands::Login { email, password } => {
            let controller = build_controller(&config)?;
            let summary = controller.login(&email, &password).await?;
            println!("{}", summary.view_state);
            if let Some(credits) = summary.scan_credits {
                println!("Scan credits remaining: {}", credits);
            }
        }

        Commands::Logout => {
            let controller = build_controller(&config)?;
            let state = controller.logout()?;
            debug_assert_eq!(state, ViewState::LoggedOut);
            println!("Logged out.");
        }

        Commands::Whoami { check } => {
            let controller = build_controller(&config)?;
            println!("{}", controller.view_state()?);
            println!("API origin: {}", config.api_base);

            if check {
                let healthy = controller.client().health().await.unwrap_or(false);
                println!("Backend health: {}", if healthy { "ok" } else { "unreachable" });
            }
        }

        Commands::Scan {
            target,
            direct,
            output,
            max_polls,
            timeout,
        } => {
            if direct {
                config.protocol = ScanProtocol::Direct;
            }
            if let Some(max_polls) = max_polls {
                config.poll.max_attempts = max_polls;
            }
            if let Some(timeout) = timeout {
                config.timeout_secs = timeout;
            }
            config.validate()?;

            let controller = build_controller(&config)?;

            // Ctrl-C cancels the in-flight scan; a response arriving
            // after cancellation is dropped, not rendered.
            let cancel = CancellationToken::new();
            let signal_cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    debug!("Ctrl-C received, cancelling scan");
                    signal_cancel.cancel();
                }
            });

            let result = match controller.start_scan(&target, &cancel).await {
                Ok(result) => result,
                Err(err) if err.is_auth_rejection() => {
                    eprintln!("Error: {}", err);
                    eprintln!("Your session may have expired. Log in again with: vulnscan login <email>");
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            };

            let view = ReportView::from_result(&result);
            match output {
                OutputFormat::Text => print!("{}", render_text(&view)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
            }

            // Non-zero exit when the scan itself failed server-side, so
            // shell pipelines can tell "scanned, clean" from "never ran".
            if view.status == vulnscan_client::types::ScanStatus::Failed {
                std::process::exit(2);
            }
        }

        Commands::Export { scan_id } => {
            // Placeholder, matching the backend roadmap. Not an error.
            println!("Report export for scan {} is not yet available in this client.", scan_id);
            println!("Use: vulnscan scan <target> --output json  to capture raw results.");
        }
    }

    Ok(())
}

fn build_controller(config: &ClientConfig) -> Result<AppController<FileSessionStore>, ClientError> {
    let store = FileSessionStore::for_origin(&config.api_base)?;
    AppController::from_config(config, store)
}
