//! Command-line front end for AvatarKit.
//!
//! Provides commands for:
//! - Applying size, margin, background and radius options to avatar markup
//! - Dumping the token stream or parsed tree of a document
//! - Decoding a `data:` URI back to markup
//!
//! ## Usage
//!
//! ```bash
//! # Round the corners and add a background
//! avatar-render render avatar.svg --radius 50 --background "#f0f0f0"
//!
//! # Same, from a config file, as a data URI
//! avatar-render render avatar.svg --config render.json --output-format base64
//!
//! # Inspect how a document tokenizes
//! avatar-render tokens avatar.svg
//! ```

use avatarkit_common::{init_logging, AvatarKitError, Result, ResultExt};
use avatarkit_svg::{
    decode_data_uri, render_with, to_base64_data_uri, to_utf8_data_uri, tokenize, AvatarOptions,
    Document, SerializeOptions, SvgError,
};
use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

mod config;

use config::{OutputFormat, RenderConfig};

#[derive(Parser)]
#[command(name = "avatar-render")]
#[command(about = "Post-process generated SVG avatars")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply avatar options and print the result
    Render {
        /// Input SVG file, or "-" for stdin
        input: PathBuf,
        /// JSON render config
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Root width attribute
        #[arg(long)]
        width: Option<f64>,
        /// Root height attribute
        #[arg(long)]
        height: Option<f64>,
        /// Margin in percent (0-100)
        #[arg(long, allow_negative_numbers = true)]
        margin: Option<f64>,
        /// Background paint
        #[arg(long)]
        background: Option<String>,
        /// Corner radius in percent (0-100)
        #[arg(long, allow_negative_numbers = true)]
        radius: Option<f64>,
        /// Output encoding
        #[arg(long, value_enum)]
        output_format: Option<OutputFormat>,
        /// Write `<tag></tag>` instead of `<tag/>`
        #[arg(long)]
        no_self_close: bool,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the token stream, one token per line
    Tokens {
        /// Input SVG file, or "-" for stdin
        input: PathBuf,
    },

    /// Print the parsed document as JSON
    Tree {
        /// Input SVG file, or "-" for stdin
        input: PathBuf,
    },

    /// Print the markup inside a data URI
    Decode {
        /// A `data:image/svg+xml;...` URI
        uri: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("error: {}", err);
        std::process::exit(err.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.command {
        Commands::Render {
            config: Some(path), ..
        } => RenderConfig::load(path)?,
        _ => RenderConfig::default(),
    };
    init_logging(config.log.to_log_config(cli.verbose)?);

    match cli.command {
        Commands::Render {
            input,
            config: _,
            width,
            height,
            margin,
            background,
            radius,
            output_format,
            no_self_close,
            output,
        } => {
            let flags = AvatarOptions {
                width,
                height,
                margin,
                background,
                radius,
            };
            let options = flags.or(config.options.clone());
            let format = output_format.unwrap_or(config.output);
            let serialize = SerializeOptions {
                self_close: config.self_close && !no_self_close,
                ..Default::default()
            };

            let markup = read_input(&input)?;
            let rendered = render_markup(&markup, &options, &serialize, format)?;
            write_output(output.as_deref(), &rendered)?;
        }

        Commands::Tokens { input } => {
            let markup = read_input(&input)?;
            write_output(None, &format_tokens(&markup))?;
        }

        Commands::Tree { input } => {
            let markup = read_input(&input)?;
            let document = Document::parse(&markup).map_err(svg_error)?;
            let json = serde_json::to_string_pretty(&document).context("serializing tree")?;
            write_output(None, &format!("{}\n", json))?;
        }

        Commands::Decode { uri } => {
            let markup = decode_data_uri(&uri).map_err(svg_error)?;
            write_output(None, &format!("{}\n", markup))?;
        }
    }

    Ok(())
}

/// Parse, mutate, serialize and encode one document.
fn render_markup(
    markup: &str,
    options: &AvatarOptions,
    serialize: &SerializeOptions,
    format: OutputFormat,
) -> Result<String> {
    debug!(?options, ?format, self_close = serialize.self_close, "Rendering");
    let rendered = render_with(markup, options, serialize).map_err(svg_error)?;
    info!(bytes = rendered.len(), "Rendered avatar");

    Ok(match format {
        OutputFormat::Markup => rendered,
        OutputFormat::Base64 => to_base64_data_uri(&rendered),
        OutputFormat::Utf8 => to_utf8_data_uri(&rendered),
    })
}

/// One `kind<TAB>value` line per token.
fn format_tokens(markup: &str) -> String {
    tokenize(markup)
        .iter()
        .map(|token| format!("{}\t{}\n", token.kind.as_str(), token.value))
        .collect()
}

fn svg_error(err: SvgError) -> AvatarKitError {
    match err {
        SvgError::InvalidOptions(_) => AvatarKitError::config_with_source("invalid options", err),
        _ => AvatarKitError::parse_with_source(err.to_string(), err),
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    if !path.exists() {
        return Err(AvatarKitError::NotFound(path.display().to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)?;
            info!(path = %path.display(), "Wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
