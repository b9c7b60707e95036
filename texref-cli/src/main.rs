//! texref CLI - count how often each LaTeX label is referenced.
//!
//! The report lists labels from most to least referenced. Unused labels are
//! flagged; every used label is followed by the locations that reference it.

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use std::path::{Path, PathBuf};

use texref_core::{
    expand_inputs, init_structured_logging, input_tree, load_config, load_config_file, log_event,
    log_info, print_json, print_plain, render_input_tree, terminal_width, ColorChoice, Document,
    OutputFormat, Texref, TexrefConfig, STDIN_NAME,
};

const ABOUT: &str = "Count the number of times each reference is used in a LaTeX document.";

const AFTER_HELP: &str = "\
The output is a list of references, one per line, with the number of times
each reference is used in the document.  The references are sorted by the
number of times they are used, with the most used references first.";

#[derive(Parser, Debug)]
#[command(name = "texref", version, about = ABOUT, after_help = AFTER_HELP)]
pub struct Cli {
    /// The LaTeX file to process. If the filename is '-', the file is read from standard input
    filename: String,

    /// Check that the references are valid (reserved, currently has no effect)
    #[arg(long)]
    check: bool,

    /// Increase verbosity (repeatable: -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Increase verbosity by two levels
    #[arg(long = "very-verbose", action = ArgAction::Count)]
    very_verbose: u8,

    /// Increase verbosity by three levels
    #[arg(long = "very-very-verbose", action = ArgAction::Count)]
    very_very_verbose: u8,

    /// Decrease verbosity
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    quiet: u8,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// When to use colors
    #[arg(long, value_name = "WHEN", value_enum)]
    color: Option<ColorArg>,

    /// Display width used to truncate context lines
    #[arg(long, value_name = "COLUMNS")]
    width: Option<usize>,

    /// Read configuration from this file instead of texref.toml next to the document
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the tree of \input files instead of the reference report
    #[arg(long)]
    inputs: bool,

    /// Write the document with all \input files expanded to FILE ('-' for stdout)
    #[arg(long, value_name = "FILE")]
    flatten: Option<String>,
}

/// `--color` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ColorArg {
    /// Colorize when stdout is a terminal
    Auto,
    Always,
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => ColorChoice::Auto,
            ColorArg::Always => ColorChoice::Always,
            ColorArg::Never => ColorChoice::Never,
        }
    }
}

impl Cli {
    /// Net verbosity: verbose levels minus quiet levels.
    fn verbosity(&self) -> i32 {
        i32::from(self.verbose) + 2 * i32::from(self.very_verbose)
            + 3 * i32::from(self.very_very_verbose)
            - i32::from(self.quiet)
    }
}

/// Effective output settings after merging config file and flags.
#[derive(Debug, PartialEq, Eq)]
struct OutputSettings {
    format: OutputFormat,
    color: ColorChoice,
    width: usize,
}

fn resolve_settings(cli: &Cli, cfg: &TexrefConfig) -> Result<OutputSettings> {
    let format = if cli.json {
        OutputFormat::Json
    } else {
        cfg.format().unwrap_or_default()
    };

    let color = cli
        .color
        .map(ColorChoice::from)
        .or_else(|| cfg.color())
        .unwrap_or_default();

    let width = cli
        .width
        .or_else(|| cfg.width())
        .unwrap_or_else(terminal_width);
    if width == 0 {
        return Err(anyhow!("Width must be at least 1"));
    }

    Ok(OutputSettings { format, color, width })
}

/// Loads the explicit config, or texref.toml next to the document.
fn load_settings_config(cli: &Cli, document: &Document) -> Result<TexrefConfig> {
    match &cli.config {
        Some(path) => load_config_file(path),
        None => Ok(load_config(&document.base_dir())?.unwrap_or_default()),
    }
}

/// Security: Validates output file paths.
///
/// Rejects paths with null bytes and paths containing `..` segments.
fn validate_output_path(path: &str) -> Result<PathBuf> {
    if path.contains('\0') {
        return Err(anyhow!("Output path contains null bytes"));
    }

    let p = PathBuf::from(path);
    for component in p.components() {
        if matches!(component, std::path::Component::ParentDir) {
            return Err(anyhow!(
                "Path traversal (..) not allowed in output paths: {}",
                path
            ));
        }
    }

    Ok(p)
}

/// Handles `--flatten` and `--inputs`. Returns true when one of them ran.
fn run_inputs(cli: &Cli) -> Result<bool> {
    if !cli.inputs && cli.flatten.is_none() {
        return Ok(false);
    }
    if cli.filename == STDIN_NAME {
        return Err(anyhow!("--inputs and --flatten need a file, not standard input"));
    }
    let root = Path::new(&cli.filename);

    if let Some(target) = &cli.flatten {
        let visited = if target == STDIN_NAME {
            let stdout = std::io::stdout();
            expand_inputs(root, &mut stdout.lock())?
        } else {
            let out_path = validate_output_path(target)?;
            let mut file = std::fs::File::create(&out_path)
                .with_context(|| format!("Failed to create {}", out_path.display()))?;
            let visited = expand_inputs(root, &mut file)?;
            eprintln!("Flattened {} file(s) into {}", visited.len(), out_path.display());
            visited
        };
        log_info(&format!("flattened {} file(s) from {}", visited.len(), root.display()));
        return Ok(true);
    }

    let tree = input_tree(root)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    } else {
        print!("{}", render_input_tree(&tree));
    }

    Ok(true)
}

fn run(cli: &Cli) -> Result<()> {
    if run_inputs(cli)? {
        return Ok(());
    }

    let texref = Texref::open(&cli.filename)?.check(cli.check);
    let cfg = load_settings_config(cli, texref.document())?;
    let settings = resolve_settings(cli, &cfg)?;
    tracing::debug!(?settings, "output settings");

    let result = texref.analyze();
    log_event(
        "analysis",
        &format!(
            "{} labels, {} unused, {} dangling references",
            result.stats.total_labels, result.stats.unused_labels, result.stats.dangling_references
        ),
    );
    match settings.format {
        OutputFormat::Json => print_json(&result.graph),
        OutputFormat::Plain => {
            let style = settings.color.style();
            print_plain(&result.graph, style.as_ref(), settings.width)?;
        }
    }

    Ok(())
}

fn main() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] texref internal error: {}", info);
        eprintln!("[PANIC] The process will exit with code 2.");
        std::process::exit(2);
    }));

    let cli = Cli::parse();

    init_structured_logging(cli.verbosity());

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
