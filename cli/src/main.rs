//! radix-mcp binary: serves Radix UI component, documentation and color-scale tools.
//!
//! Subcommands: `serve` (default, MCP over stdio), `tools` (print tool specs),
//! `call` (run one tool and print its result).

mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cli::{build_registry, merge_overrides, McpServer, Overrides};

#[derive(Parser, Debug)]
#[command(name = "radix-mcp")]
#[command(about = "Radix UI components, docs and color scales as tools over stdio")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    cmd: Option<Command>,

    /// Library whose tools are exposed: themes, primitives, colors or all
    #[arg(short, long, env = config::ENV_LIBRARY, value_name = "LIBRARY")]
    library: Option<String>,

    /// GitHub token for the contents API (raises the rate limit)
    #[arg(short = 'g', long, env = config::ENV_GITHUB_TOKEN, value_name = "TOKEN", hide_env_values = true)]
    github_api_key: Option<String>,

    /// Also append logs to this file
    #[arg(long, env = config::ENV_LOG_FILE, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve tools over stdio (default)
    Serve,
    /// Print the exposed tool specs as JSON
    Tools,
    /// Call one tool and print its text result
    Call {
        /// Tool name, e.g. themes_get_component
        name: String,
        /// Tool arguments as a JSON object
        #[arg(long, value_name = "JSON", default_value = "{}")]
        args: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = config::load_and_apply(config::APP_NAME, None) {
        eprintln!("radix-mcp: config not applied: {e}");
    }
    let args = Args::parse();
    let mut settings = merge_overrides(
        config::Settings::from_env()?,
        Overrides {
            library: args.library,
            github_token: args.github_api_key,
        },
    );
    if args.log_file.is_some() {
        settings.log_file = args.log_file;
    }
    let _guard = logging::init(&settings.log_level, settings.log_file.as_deref())?;

    let registry = build_registry(&settings)?;
    match args.cmd.unwrap_or(Command::Serve) {
        Command::Serve => {
            tracing::info!(
                tools = registry.len(),
                authenticated = settings.github_token.is_some(),
                "radix-mcp serving on stdio"
            );
            McpServer::new(registry)
                .run(tokio::io::stdin(), tokio::io::stdout())
                .await?;
        }
        Command::Tools => {
            println!("{}", serde_json::to_string_pretty(&registry.list())?);
        }
        Command::Call { name, args } => {
            let value: serde_json::Value = serde_json::from_str(&args)?;
            let out = registry.call(&name, value).await?;
            println!("{}", out.text);
        }
    }
    Ok(())
}
