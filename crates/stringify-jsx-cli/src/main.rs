use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use stringify_jsx_compiler::OptionsOverrides;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stringify-jsx")]
#[command(about = "Compile JSX elements into template literals")]
#[command(version)]
struct Cli {
    /// Log more (-v for debug, -vv for trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a source file, writing the result to stdout or --out
    Build {
        /// Input source file
        path: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,

        #[command(flatten)]
        options: OptionArgs,
    },

    /// Check a source file for errors without generating output
    Check {
        /// Input source file
        path: String,

        #[command(flatten)]
        options: OptionArgs,
    },
}

#[derive(Args, Default)]
struct OptionArgs {
    /// JSON file with compiler options (`preserveWhitespace`, `customAttributeReplacements`)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep whitespace-only text between elements
    #[arg(long)]
    preserve_whitespace: bool,

    /// Replace an attribute name, e.g. `--attr tabIndex=tabindex` (repeatable)
    #[arg(long = "attr", value_name = "FROM=TO", value_parser = parse_replacement)]
    replacements: Vec<(String, String)>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Build { path, out, options } => cmd_build(&path, out.as_deref(), options),
        Command::Check { path, options } => cmd_check(&path, options),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn parse_replacement(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((from, to)) if !from.is_empty() && !to.is_empty() => {
            Ok((from.to_string(), to.to_string()))
        }
        _ => Err(format!("expected FROM=TO, got '{value}'")),
    }
}

/// Build option overrides: config file first, then command-line flags on top.
fn build_overrides(args: OptionArgs) -> Result<OptionsOverrides, String> {
    let mut overrides = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("Error reading {}: {e}", path.display()))?;
            serde_json::from_str::<OptionsOverrides>(&text)
                .map_err(|e| format!("Invalid config {}: {e}", path.display()))?
        }
        None => OptionsOverrides::default(),
    };

    if args.preserve_whitespace {
        overrides.preserve_whitespace = Some(true);
    }
    if !args.replacements.is_empty() {
        overrides
            .custom_attribute_replacements
            .get_or_insert_with(Default::default)
            .extend(args.replacements);
    }

    tracing::debug!(?overrides, "option overrides");
    Ok(overrides)
}

fn compile(path: &str, args: OptionArgs) -> Result<String, String> {
    let overrides = build_overrides(args)?;
    let source =
        std::fs::read_to_string(path).map_err(|e| format!("Error reading {path}: {e}"))?;
    stringify_jsx_compiler::transform_source(&source, overrides)
        .map_err(|e| format!("{path}: {e}"))
}

fn compile_or_exit(path: &str, args: OptionArgs) -> String {
    compile(path, args).unwrap_or_else(|message| {
        eprintln!("{message}");
        std::process::exit(1);
    })
}

fn cmd_build(path: &str, out: Option<&Path>, args: OptionArgs) {
    let output = compile_or_exit(path, args);

    match out {
        Some(out_path) => {
            if let Err(e) = std::fs::write(out_path, &output) {
                eprintln!("Error writing {}: {e}", out_path.display());
                std::process::exit(1);
            }
            eprintln!("Built: {}", out_path.display());
        }
        None => print!("{output}"),
    }
}

fn cmd_check(path: &str, args: OptionArgs) {
    compile_or_exit(path, args);
    eprintln!("OK: {path}");
}
