//! diffmerge command-line tool.
//!
//! Provides subcommands for diffing two files, detecting conflicts between a
//! local and a remote version (optionally against a base), resolving
//! conflict markers, listing conflict blocks, and generating / validating
//! configuration files.

mod style;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use diffmerge_core::config::EngineConfig;
use diffmerge_core::{
    format_hunk_header, parse_conflicts, resolve_all_conflicts, DiffEngine, DiffResult,
    MergeEngine, Resolution,
};

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = "diffmerge.toml";

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// diffmerge command-line tool.
#[derive(Parser, Debug)]
#[command(
    name = "diffmerge",
    version,
    about = "Line diffs, conflict detection and conflict-marker resolution"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show a unified diff between two files.
    Diff {
        old: PathBuf,
        new: PathBuf,

        /// Print the diff as JSON instead of unified text.
        #[arg(long)]
        json: bool,
    },

    /// Detect conflicts between a local and a remote version of a file.
    Merge {
        local: PathBuf,
        remote: PathBuf,

        /// Common ancestor for a three-way merge.
        #[arg(long)]
        base: Option<PathBuf>,

        /// Write merged content here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the full conflict result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Resolve every conflict block in a file.
    Resolve {
        file: PathBuf,

        /// Side to keep.
        #[arg(long, default_value = "local", value_parser = ["local", "remote", "both"])]
        accept: String,

        /// Write resolved content here instead of overwriting the input.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the conflict blocks in a file.
    Conflicts { file: PathBuf },

    /// Generate a default configuration file.
    Init {
        /// Output path for the generated config file.
        #[arg(short, long, default_value = "./diffmerge.toml")]
        output: PathBuf,
    },

    /// Validate a configuration file.
    Validate,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref());
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| config.as_ref().ok().map(|c| c.logging.level.clone()))
        .unwrap_or_else(|| "warn".to_string());

    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match run(cli, config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli, config: Result<EngineConfig>) -> Result<ExitCode> {
    match cli.command {
        Commands::Init { output } => cmd_init(&output).map(|()| ExitCode::SUCCESS),
        Commands::Validate => {
            let path = cli
                .config
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            cmd_validate(&path).map(|()| ExitCode::SUCCESS)
        }
        command => {
            let config = config?;
            match command {
                Commands::Diff { old, new, json } => cmd_diff(&config, &old, &new, json),
                Commands::Merge {
                    local,
                    remote,
                    base,
                    output,
                    json,
                } => cmd_merge(
                    &config,
                    &local,
                    &remote,
                    base.as_deref(),
                    output.as_deref(),
                    json,
                ),
                Commands::Resolve {
                    file,
                    accept,
                    output,
                } => cmd_resolve(&file, Resolution::from(accept.as_str()), output.as_deref())
                    .map(|()| ExitCode::SUCCESS),
                Commands::Conflicts { file } => cmd_conflicts(&file),
                Commands::Init { .. } | Commands::Validate => unreachable!(),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Config helpers
// ---------------------------------------------------------------------------

/// Load the explicit config, else `./diffmerge.toml` if present, else defaults.
fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load_and_validate(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_FILE);
            if fallback.exists() {
                EngineConfig::load_and_validate(fallback)
                    .context("failed to load ./diffmerge.toml")
            } else {
                Ok(EngineConfig::default())
            }
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

// ---------------------------------------------------------------------------
// Subcommand implementations
// ---------------------------------------------------------------------------

fn cmd_diff(config: &EngineConfig, old: &Path, new: &Path, json: bool) -> Result<ExitCode> {
    let old_content = read_file(old)?;
    let new_content = read_file(new)?;

    let engine = DiffEngine::new(config.diff.clone());
    let result = engine.calculate_diff(&old_content, &new_content);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("failed to serialize diff")?
        );
    } else if !result.is_empty() {
        print_diff(&result, &old.display().to_string(), &new.display().to_string());
    }

    Ok(if result.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn print_diff(result: &DiffResult, old_path: &str, new_path: &str) {
    println!("{}", style::file_header(&format!("--- {}", old_path)));
    println!("{}", style::file_header(&format!("+++ {}", new_path)));
    for hunk in &result.hunks {
        println!("{}", style::hunk_header(&format_hunk_header(hunk)));
        for line in &hunk.lines {
            println!("{}", style::diff_line(line));
        }
    }
}

fn cmd_merge(
    config: &EngineConfig,
    local: &Path,
    remote: &Path,
    base: Option<&Path>,
    output: Option<&Path>,
    json: bool,
) -> Result<ExitCode> {
    let local_content = read_file(local)?;
    let remote_content = read_file(remote)?;
    let base_content = base.map(read_file).transpose()?;

    let engine = MergeEngine::from_config(config);
    let result = engine.detect_conflicts(&local_content, &remote_content, base_content.as_deref());
    debug!(conflicts = result.conflicts.len(), "merge finished");

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("failed to serialize merge result")?
        );
    }

    match output {
        Some(path) => {
            write_file(path, &result.merged_content)?;
            if result.has_conflicts {
                eprintln!(
                    "{}",
                    style::warn(&format!(
                        "{} conflict(s) written to {}",
                        result.conflicts.len(),
                        path.display()
                    ))
                );
            } else {
                eprintln!(
                    "{}",
                    style::success(&format!("Merged cleanly into {}", path.display()))
                );
            }
        }
        None if !json => print!("{}", result.merged_content),
        None => {}
    }

    Ok(if result.has_conflicts {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

fn cmd_resolve(file: &Path, resolution: Resolution, output: Option<&Path>) -> Result<()> {
    let content = read_file(file)?;
    let blocks = parse_conflicts(&content).len();
    let resolved = resolve_all_conflicts(&content, resolution);

    let target = output.unwrap_or(file);
    write_file(target, &resolved)?;

    eprintln!(
        "{}",
        style::success(&format!(
            "Resolved {} conflict(s) in {} (accepted {})",
            blocks,
            target.display(),
            resolution
        ))
    );
    Ok(())
}

fn cmd_conflicts(file: &Path) -> Result<ExitCode> {
    let content = read_file(file)?;
    let blocks = parse_conflicts(&content);

    if blocks.is_empty() {
        println!("{}", style::success("No conflicts"));
        return Ok(ExitCode::SUCCESS);
    }

    println!();
    println!(
        "{}",
        style::header(&format!("Conflicts in {} ({})", file.display(), blocks.len()))
    );
    println!();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Lines", "Local", "Remote"]);

    for (idx, block) in blocks.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(format!("{}-{}", block.start + 1, block.end + 1)),
            Cell::new(block.local.len()),
            Cell::new(block.remote.len()),
        ]);
    }

    println!("{}", table);
    println!();

    Ok(ExitCode::from(1))
}

fn cmd_init(output: &Path) -> Result<()> {
    if output.exists() {
        anyhow::bail!(
            "file already exists: {}. Use a different path or remove the existing file.",
            output.display()
        );
    }

    let body = EngineConfig::default()
        .to_toml_string()
        .context("failed to render default configuration")?;
    let contents = format!("# diffmerge configuration\n\n{}", body);
    write_file(output, &contents)?;

    println!("Default configuration written to {}", output.display());
    println!();
    println!("Next steps:");
    println!("  1. Adjust context lines, conflict caps and marker labels");
    println!(
        "  2. Validate with: diffmerge validate --config {}",
        output.display()
    );

    Ok(())
}

fn cmd_validate(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {}", config_path.display());
    println!();

    let config =
        EngineConfig::load_from_file(config_path).context("failed to parse configuration")?;
    println!("  [OK] TOML structure is valid");

    match config.validate() {
        Ok(()) => println!("  [OK] All values are valid"),
        Err(e) => {
            println!("  [FAIL] Validation error: {}", e);
            anyhow::bail!("configuration validation failed");
        }
    }

    println!();
    println!("Configuration summary:");
    println!("  Context lines     : {}", config.diff.context_lines);
    println!("  Max LCS cells     : {}", config.diff.max_lcs_cells);
    println!("  Max conflict lines: {}", config.merge.max_conflict_lines);
    println!("  Local label       : {}", config.merge.local_label);
    println!("  Remote label      : {}", config.merge.remote_label);
    println!("  Log level         : {}", config.logging.level);
    println!();
    println!("Configuration is valid.");

    Ok(())
}
