use blockpage::{Block, BlockType, CompileError, RenderTarget, compile, create_block, variations};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a JSON block document into an HTML email
    Compile {
        /// Path to a JSON array of blocks
        document: PathBuf,
        /// Path to a JSON render target
        #[arg(long)]
        target: Option<PathBuf>,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        font_family: Option<String>,
        #[arg(long)]
        background: Option<String>,
        /// Write the HTML here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print a new block with its default attributes
    New {
        block_type: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        variation: Option<String>,
    },
    /// List the supported block types
    Types {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error("cannot encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct TypeInfo {
    name: &'static str,
    variations: &'static [&'static str],
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compile {
            document,
            target,
            width,
            font_family,
            background,
            output,
        } => {
            let overrides = Overrides {
                width,
                font_family,
                background,
            };
            compile_command(&document, target.as_deref(), overrides, output.as_deref())
        }
        Commands::New {
            block_type,
            title,
            variation,
        } => new_command(&block_type, title.as_deref(), variation.as_deref()),
        Commands::Types { json } => types_command(json),
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

struct Overrides {
    width: Option<u32>,
    font_family: Option<String>,
    background: Option<String>,
}

fn compile_command(
    document: &Path,
    target_path: Option<&Path>,
    overrides: Overrides,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let blocks: Vec<Block> = read_json(document)?;
    let mut target: RenderTarget = match target_path {
        Some(path) => read_json(path)?,
        None => RenderTarget::default(),
    };
    if let Some(width) = overrides.width {
        target.width = width;
    }
    if let Some(font_family) = overrides.font_family {
        target.font_family = font_family;
    }
    if let Some(background) = overrides.background {
        target.background_color = background;
    }

    let skipped = blocks.iter().filter(|b| b.block_type().is_none()).count();
    if skipped > 0 {
        tracing::warn!(skipped, "document contains blocks of unknown type");
    }
    tracing::info!(blocks = blocks.len(), width = target.width, "compiling document");
    let html = compile(&blocks, &target)?;

    match output {
        Some(path) => fs::write(path, html).map_err(|source| CliError::Write {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            print!("{html}");
            Ok(())
        }
    }
}

fn new_command(
    block_type: &str,
    title: Option<&str>,
    variation: Option<&str>,
) -> Result<(), CliError> {
    if block_type.parse::<BlockType>().is_err() {
        tracing::warn!(block_type, "unknown block type, using generic defaults");
    }
    let block = create_block(block_type, title, variation);
    println!("{}", serde_json::to_string_pretty(&block)?);
    Ok(())
}

fn types_command(json: bool) -> Result<(), CliError> {
    let types: Vec<TypeInfo> = BlockType::ALL
        .iter()
        .map(|ty| TypeInfo {
            name: ty.as_str(),
            variations: variations(*ty),
        })
        .collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&types)?);
        return Ok(());
    }
    for info in types {
        if info.variations.is_empty() {
            println!("{}", info.name);
        } else {
            println!("{} ({})", info.name, info.variations.join(", "));
        }
    }
    Ok(())
}
