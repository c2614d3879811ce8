//! solkit - compile and audit Solidity sources from the command line
//!
//! ## Commands
//!
//! - `compile`: run the compiler and print a `CompileResult`
//! - `audit`: run the analyzer and print an `AuditResult`
//! - `check`: compile, then audit if compilation succeeded, and print a `WorkflowResult`
//!
//! Results are printed to stdout as JSON; logs go to stderr. The exit code is
//! 0 when the result reports success and 1 otherwise.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, Level};

use solkit_core::{InvocationRequest, Toolkit, ToolkitConfig};

#[derive(Parser)]
#[command(name = "solkit")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compile and audit Solidity sources via solc and slither", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// TOML configuration file
    #[arg(short, long, global = true, env = "SOLKIT_CONFIG")]
    config: Option<PathBuf>,

    /// Compiler binary (overrides config and SOLKIT_SOLC)
    #[arg(long, global = true)]
    solc: Option<String>,

    /// Analyzer binary (overrides config and SOLKIT_SLITHER)
    #[arg(long, global = true)]
    slither: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a source file
    Compile(SourceArgs),

    /// Run security analysis on a source file
    Audit(SourceArgs),

    /// Compile, then audit when compilation succeeds
    Check(SourceArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// Source file to read, or `-` for stdin
    file: PathBuf,

    /// Name to stage the source under (default: the input file's name)
    #[arg(short, long)]
    filename: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    solkit_core::init_tracing(cli.json, level);

    let mut config = ToolkitConfig::load(cli.config.as_deref())
        .context("Failed to load solkit configuration")?;
    if let Some(solc) = cli.solc {
        config.compiler.binary = solc;
    }
    if let Some(slither) = cli.slither {
        config.analyzer.binary = slither;
    }
    debug!(compiler = %config.compiler.binary, analyzer = %config.analyzer.binary, "configuration loaded");

    let toolkit = Toolkit::new(config);

    let success = match cli.command {
        Commands::Compile(args) => {
            let request = read_request(&args, toolkit.config())?;
            let result = toolkit.compile(&request).await.context("Compilation aborted")?;
            print_json(&result)?;
            result.success
        }
        Commands::Audit(args) => {
            let request = read_request(&args, toolkit.config())?;
            let result = toolkit.audit(&request).await.context("Audit aborted")?;
            print_json(&result)?;
            result.success
        }
        Commands::Check(args) => {
            let request = read_request(&args, toolkit.config())?;
            let result = toolkit
                .compile_and_audit(&request)
                .await
                .context("Workflow aborted")?;
            print_json(&result)?;
            result.overall_success
        }
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Read the source and pick the staged filename.
fn read_request(args: &SourceArgs, config: &ToolkitConfig) -> Result<InvocationRequest> {
    let source_text = if args.file == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read source from stdin")?;
        buf
    } else {
        std::fs::read_to_string(&args.file)
            .with_context(|| format!("Failed to read {:?}", args.file))?
    };

    if source_text.trim().is_empty() {
        anyhow::bail!("Source is empty");
    }

    let filename = resolve_filename(args, &config.default_filename);
    Ok(InvocationRequest::new(source_text).with_filename(filename))
}

fn resolve_filename(args: &SourceArgs, default_filename: &str) -> String {
    if let Some(name) = &args.filename {
        return name.clone();
    }
    if args.file == Path::new("-") {
        return default_filename.to_string();
    }
    args.file
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| default_filename.to_string())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{rendered}");
    Ok(())
}
