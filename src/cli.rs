use crate::generator::{build_document_with_meta, GeneratorConfig};
use crate::meta::DocumentMeta;
use crate::serializer::{serialize_json, serialize_yaml, write_to_file};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

/// Swagger generator - Build a Swagger 2.0 document from annotated source comments
#[derive(Parser, Debug)]
#[command(name = "swagger-gen")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Root of the source tree to scan
    #[arg(short = 's', long = "source", value_name = "DIR", default_value = ".")]
    pub source_dir: PathBuf,

    /// Directory to write swagger.json / swagger.yaml into (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output format (json or yaml)
    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Write a swagger-meta.json with placeholder values into the source directory and exit
    #[arg(long = "init")]
    pub init: bool,

    /// Source file extension to scan (repeatable)
    #[arg(long = "ext", value_name = "EXT", default_values_t = vec!["go".to_string()])]
    pub extensions: Vec<String>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// File name the document is written under in the output directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            OutputFormat::Json => "swagger.json",
            OutputFormat::Yaml => "swagger.yaml",
        }
    }
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.source_dir.exists() {
        anyhow::bail!(
            "Source directory does not exist: {}",
            args.source_dir.display()
        );
    }

    if !args.source_dir.is_dir() {
        anyhow::bail!(
            "Source path is not a directory: {}",
            args.source_dir.display()
        );
    }

    let extensions: Vec<String> = args
        .extensions
        .iter()
        .map(|ext| ext.trim_start_matches('.').to_string())
        .filter(|ext| !ext.is_empty())
        .collect();
    if extensions.is_empty() {
        anyhow::bail!("At least one non-empty --ext is required");
    }

    info!("Source directory: {}", args.source_dir.display());
    info!("Output format: {:?}", args.output_format);
    if let Some(ref output) = args.output_dir {
        info!("Output directory: {}", output.display());
    } else {
        info!("Output: stdout");
    }

    Ok(CliArgs { extensions, ..args })
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    if args.init {
        let path = DocumentMeta::write_scaffold(&args.source_dir)?;
        info!("Swagger meta file generated at path {}", path.display());
        return Ok(());
    }

    let config = GeneratorConfig {
        extensions: args.extensions.clone(),
        ..GeneratorConfig::default()
    };
    let meta = DocumentMeta::load(&args.source_dir)?;

    let document = build_document_with_meta(&args.source_dir, &config, meta)?;
    info!(
        "Swagger document built: {} paths, {} definitions",
        document.paths.len(),
        document.definitions.len()
    );

    info!("Serializing to {:?} format...", args.output_format);
    let content = match args.output_format {
        OutputFormat::Json => serialize_json(&document)?,
        OutputFormat::Yaml => serialize_yaml(&document)?,
    };

    if let Some(output_dir) = &args.output_dir {
        let output_path = output_dir.join(args.output_format.file_name());
        info!("Writing swagger definition to {}", output_path.display());
        write_to_file(&content, &output_path)?;
    } else {
        println!("{}", content);
    }

    Ok(())
}
