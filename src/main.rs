//! Charmeleon compiler - CLI

use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;

use charmeleon::frontend::sast::{self, ReportFormat};
use charmeleon::frontend::{CompileError, Pipeline};
use charmeleon::middle::CodegenWarning;
use charmeleon::util::config::{self, CompilerConfig};
use charmeleon::util::diagnostic::{Diagnostic, EmitterConfig, TextEmitter};
use charmeleon::util::logger;
use charmeleon::util::span::SourceFile;
use charmeleon::{NAME, VERSION};

/// Compile Charmeleon programs to Python
#[derive(Parser, Debug)]
#[command(name = "charmeleon")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./charmeleon.toml when present)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a source file to Python
    Build {
        /// Source file to compile
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file (defaults to FILE with a .py extension)
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },

    /// Check a source file for errors without generating code
    Check {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the IR of a source file
    Ir {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the IR after dead code elimination
        #[arg(long)]
        optimized: bool,
    },

    /// Run the security scan on a source file
    Scan {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Generate Python from a textual IR listing
    Structure {
        #[arg(value_name = "IR_FILE")]
        file: PathBuf,

        /// Skip dead code elimination
        #[arg(long)]
        no_dce: bool,
    },

    /// Print version information
    Version,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => ReportFormat::Text,
            Format::Json => ReportFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init_cli(args.verbose);

    match execute(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let label = if use_colors() {
                "error".red().bold().to_string()
            } else {
                "error".to_string()
            };
            eprintln!("{}: {:#}", label, e);
            ExitCode::FAILURE
        },
    }
}

fn execute(args: Args) -> Result<()> {
    if let Commands::Version = args.command {
        println!("{} {}", NAME, VERSION);
        return Ok(());
    }

    let config = config::load_or_default(args.config.as_deref()).context("Failed to load configuration")?;
    tracing::debug!("configuration: {:?}", config);

    match args.command {
        Commands::Build { file, output } => build(&file, output, config),
        Commands::Check { file } => check(&file, config),
        Commands::Ir { file, optimized } => {
            let (_, output) = compile(&file, config)?;
            let ir = if optimized {
                &output.optimized_ir
            } else {
                &output.ir
            };
            print!("{}", ir);
            Ok(())
        },
        Commands::Scan { file, format } => {
            let source = read(&file)?;
            let frontend = Pipeline::new(config)
                .run_frontend(&source.content)
                .map_err(|e| report_error(&source, &e))?;
            let findings = sast::scan(&frontend.ast);
            print!("{}", sast::render_report(&findings, format.into(), use_colors()));
            Ok(())
        },
        Commands::Structure { file, no_dce } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read file: {}", file.display()))?;
            let output = Pipeline::new(config)
                .run_ir(&text, !no_dce)
                .with_context(|| format!("Failed to structure: {}", file.display()))?;
            report_warnings(&output.warnings);
            print!("{}", output.python);
            Ok(())
        },
        Commands::Version => Ok(()),
    }
}

fn build(
    file: &Path,
    output: Option<PathBuf>,
    config: CompilerConfig,
) -> Result<()> {
    let (_, compiled) = compile(file, config)?;

    if !compiled.vulnerabilities.is_empty() {
        eprintln!("{}", heading("Security scan"));
        eprint!(
            "{}",
            sast::render_report(&compiled.vulnerabilities, ReportFormat::Text, use_colors())
        );
    }

    let out_path = output.unwrap_or_else(|| file.with_extension("py"));
    fs::write(&out_path, &compiled.python)
        .with_context(|| format!("Failed to write output: {}", out_path.display()))?;
    eprintln!("{}", compiled.dce_stats.format());
    eprintln!("Python code written to {}", out_path.display());
    Ok(())
}

fn check(
    file: &Path,
    config: CompilerConfig,
) -> Result<()> {
    let source = read(file)?;
    Pipeline::new(config)
        .run_frontend(&source.content)
        .map_err(|e| report_error(&source, &e))?;
    println!("{}: no errors found", file.display());
    Ok(())
}

/// Run the whole pipeline on a file, rendering errors with a source snippet
fn compile(
    file: &Path,
    config: CompilerConfig,
) -> Result<(SourceFile, charmeleon::CompileOutput)> {
    let source = read(file)?;
    let output = Pipeline::new(config)
        .run(&source.content)
        .map_err(|e| report_error(&source, &e))?;
    report_warnings(&output.warnings);
    Ok((source, output))
}

fn read(file: &Path) -> Result<SourceFile> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    Ok(SourceFile::new(file.display().to_string(), content))
}

/// Print a compile error and turn it into a short summary error
fn report_error(
    source: &SourceFile,
    error: &CompileError,
) -> anyhow::Error {
    let mut diagnostic = Diagnostic::error(error.to_string());
    if let Some(span) = error.span() {
        diagnostic = diagnostic.at(span);
    }
    eprint!("{}", emitter().render(&diagnostic, Some(source)));
    anyhow!("could not compile `{}`", source.name)
}

fn report_warnings(warnings: &[CodegenWarning]) {
    let emitter = emitter();
    for warning in warnings {
        eprint!("{}", emitter.render(&Diagnostic::warning(warning.to_string()), None));
    }
}

fn emitter() -> TextEmitter {
    TextEmitter::with_config(EmitterConfig {
        use_colors: use_colors(),
        ..EmitterConfig::default()
    })
}

fn heading(text: &str) -> String {
    if use_colors() {
        text.bold().underline().to_string()
    } else {
        text.to_string()
    }
}

fn use_colors() -> bool {
    std::io::stderr().is_terminal()
}
