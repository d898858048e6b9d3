//! `docxmd` - convert exported DOCX documents to Markdown

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use docxmd_backend::plugin::register_converters_with;
use docxmd_backend::ConverterOptions;
use docxmd_core::{ConverterRegistry, StreamInfo};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the home and current directories
const CONFIG_FILE_NAME: &str = ".docxmd.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
enum OutputFormat {
    /// Markdown output (default)
    Markdown,
    /// The conversion result as JSON
    Json,
}

impl OutputFormat {
    /// Parse a format name from a config file
    fn from_config(name: &str) -> Result<Self> {
        <Self as ValueEnum>::from_str(name, true)
            .map_err(|_| anyhow::anyhow!("Unknown output format in config: {name} (expected markdown or json)"))
    }
}

/// Configuration file structure for .docxmd.toml
///
/// Configuration files can be placed in:
/// - User home directory: ~/.docxmd.toml (user defaults)
/// - Project directory: ./.docxmd.toml (project defaults)
/// - Custom location via --config flag (replaces both)
///
/// Precedence order (highest to lowest):
/// 1. Command-line arguments (--charset, --format, etc.)
/// 2. Project config (./.docxmd.toml)
/// 3. User config (~/.docxmd.toml)
/// 4. Built-in defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
struct Config {
    /// Default settings for convert command
    #[serde(skip_serializing_if = "Option::is_none")]
    convert: Option<ConvertConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
struct ConvertConfig {
    /// Charset used when the input does not declare one
    #[serde(skip_serializing_if = "Option::is_none")]
    charset: Option<String>,

    /// Directory relative image paths are resolved against
    #[serde(skip_serializing_if = "Option::is_none")]
    resource_root: Option<PathBuf>,

    /// Default output format (markdown or json)
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
}

impl Config {
    /// Load configuration from file
    ///
    /// A relative `resource_root` is taken relative to the file's directory.
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self = toml::from_str(&content).map_err(|e| {
            eprintln!(
                "{} Failed to parse config file: {}",
                "Error:".red().bold(),
                path.display()
            );
            eprintln!("{} Configuration file syntax:", "Help:".cyan().bold());
            eprintln!("  [convert]");
            eprintln!("  charset = \"utf-8\"");
            eprintln!("  format = \"markdown\"  # markdown or json");
            anyhow::anyhow!("Failed to parse config file: {e}")
        })?;

        if let Some(base) = path.parent() {
            config.anchor_paths(base);
        }
        Ok(config)
    }

    /// Join a relative `resource_root` onto `base`
    fn anchor_paths(&mut self, base: &Path) {
        if let Some(root) = self
            .convert
            .as_mut()
            .and_then(|convert| convert.resource_root.as_mut())
        {
            if root.is_relative() {
                *root = base.join(&*root);
            }
        }
    }

    /// Load an optional config file, warning instead of failing on errors
    fn load_optional(path: &Path, kind: &str) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match Self::load_from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!(
                    "{} Failed to load {kind} config from {}: {e}",
                    "Warning:".yellow().bold(),
                    path.display()
                );
                None
            }
        }
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
    }

    /// Find and load configuration files
    /// Returns (`user_config`, `project_config`)
    fn discover_configs() -> (Option<Self>, Option<Self>) {
        let user_config = Self::user_config_path()
            .and_then(|path| Self::load_optional(&path, "user"));
        let project_config = Self::load_optional(Path::new(CONFIG_FILE_NAME), "project");
        (user_config, project_config)
    }

    /// Merge configs key by key; project values override user values
    fn merge(user_config: Option<Self>, project_config: Option<Self>) -> Self {
        let mut merged = user_config.unwrap_or_default();

        if let Some(convert) = project_config.and_then(|project| project.convert) {
            let mut merged_convert = merged.convert.unwrap_or_default();
            if let Some(charset) = convert.charset {
                merged_convert.charset = Some(charset);
            }
            if let Some(resource_root) = convert.resource_root {
                merged_convert.resource_root = Some(resource_root);
            }
            if let Some(format) = convert.format {
                merged_convert.format = Some(format);
            }
            merged.convert = Some(merged_convert);
        }

        merged
    }

    /// Effective configuration: the explicit file if given, else the merged discovered ones
    fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => {
                let (user_config, project_config) = Self::discover_configs();
                Ok(Self::merge(user_config, project_config))
            }
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "docxmd",
    about = "Convert DOCX documents to Markdown",
    long_about = "Convert DOCX documents (exported to HTML with a .fld/ resource folder) to Markdown.\n\
                  \n\
                  Simple tables become pipe tables, tables with merged cells stay HTML,\n\
                  and images from the resource folder are embedded as data URIs.",
    version
)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Load configuration from this file instead of ~/.docxmd.toml and ./.docxmd.toml
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a document to Markdown or JSON
    #[command(long_about = "Convert documents to Markdown or JSON.\n\
                      \n\
                      Defaults can be set via .docxmd.toml configuration file.")]
    Convert {
        /// Input file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Charset of the input when it does not declare one
        #[arg(long, value_name = "LABEL")]
        charset: Option<String>,

        /// Directory relative image paths are resolved against (default: the input's directory)
        #[arg(long, value_name = "DIR")]
        resource_root: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Declared MIME type of the input
        #[arg(long, value_name = "TYPE")]
        mime: Option<String>,
    },

    /// Manage configuration settings
    #[command(long_about = "Manage docxmd configuration files and settings.\n\
                      \n\
                      Configuration files are loaded in this order (later overrides earlier):\n\
                        1. User config: ~/.docxmd.toml\n\
                        2. Project config: ./.docxmd.toml\n\
                        3. Command-line arguments")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Create a new .docxmd.toml configuration file with sensible defaults
    Init {
        /// Create in user home directory (~/.docxmd.toml) instead of current directory
        #[arg(long)]
        global: bool,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Display the current effective configuration
    Show {
        /// Output as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Commands::Convert {
            input,
            output,
            charset,
            resource_root,
            format,
            mime,
        } => {
            let config = Config::load(args.config.as_deref())?;
            let defaults = config.convert.unwrap_or_default();
            let format = match (format, defaults.format.as_deref()) {
                (Some(format), _) => format,
                (None, Some(name)) => OutputFormat::from_config(name)?,
                (None, None) => OutputFormat::Markdown,
            };
            let request = ConvertRequest {
                input,
                output,
                charset: charset.or(defaults.charset),
                resource_root: resource_root.or(defaults.resource_root),
                format,
                mime,
            };
            convert_command(&request)
        }
        Commands::Config { action } => match action {
            ConfigAction::Init { global, force } => config_init(global, force),
            ConfigAction::Show { json } => config_show(args.config.as_deref(), json),
        },
    }
}

/// Fully resolved settings for one conversion
#[derive(Debug)]
struct ConvertRequest {
    input: PathBuf,
    output: Option<PathBuf>,
    charset: Option<String>,
    resource_root: Option<PathBuf>,
    format: OutputFormat,
    mime: Option<String>,
}

impl ConvertRequest {
    fn converter_options(&self) -> ConverterOptions {
        let mut options = ConverterOptions::default();
        if let Some(charset) = &self.charset {
            options = options.with_default_charset(charset.clone());
        }
        let resource_root = self.resource_root.clone().or_else(|| {
            self.input
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .map(Path::to_path_buf)
        });
        options.with_resource_root(resource_root)
    }

    fn stream_info(&self) -> StreamInfo {
        let info = StreamInfo::from_path(&self.input);
        match &self.mime {
            Some(mime) => info.with_mimetype(mime.clone()),
            None => info,
        }
    }
}

fn convert_command(request: &ConvertRequest) -> Result<()> {
    let options = request.converter_options();
    log::info!(
        "Converting {} (charset {}, resources {:?})",
        request.input.display(),
        options.default_charset,
        options.resource_root()
    );

    let mut registry = ConverterRegistry::new();
    register_converters_with(&mut registry, options);

    let mut file = fs::File::open(&request.input)
        .with_context(|| format!("Failed to open input file: {}", request.input.display()))?;
    let result = registry
        .convert(&mut file, &request.stream_info())
        .with_context(|| format!("Failed to convert {}", request.input.display()))?;

    let rendered = match request.format {
        OutputFormat::Markdown => result.markdown,
        OutputFormat::Json => result.to_json()?,
    };

    match &request.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{rendered}").context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# docxmd Configuration File

# Default settings for the convert command
[convert]
# Charset used when the input does not declare one
# charset = "utf-8"

# Directory relative image paths are resolved against
# (defaults to the directory of the input file; a relative value is
# taken relative to the directory holding this file)
# resource_root = "exports"

# Output format: markdown or json
# format = "markdown"
"#;

/// Create a new configuration file with sensible defaults
fn config_init(global: bool, force: bool) -> Result<()> {
    let config_path = if global {
        Config::user_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?
    } else {
        PathBuf::from(CONFIG_FILE_NAME)
    };

    if config_path.exists() && !force {
        eprintln!("{} Use --force to overwrite", "Hint:".cyan().bold());
        anyhow::bail!("Configuration file already exists: {}", config_path.display());
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    println!(
        "{} Created configuration file: {}",
        "Success:".green().bold(),
        config_path.display()
    );
    Ok(())
}

/// Display the current effective configuration
fn config_show(explicit: Option<&Path>, json_output: bool) -> Result<()> {
    let config = Config::load(explicit)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        println!("{}", toml::to_string_pretty(&config)?);
    }
    Ok(())
}
