//! clipdown CLI - convert an HTML file (or stdin) to Markdown on stdout

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use clipdown::{CodeBlockStyle, Converter, Options};
use tracing::{debug, Level};

#[derive(Parser, Debug)]
#[command(name = "clipdown")]
#[command(author, version, about = "Convert HTML to Markdown", long_about = None)]
struct Cli {
    /// Input HTML file; `-` or nothing reads stdin
    input: Option<PathBuf>,

    /// Code block style: indented, fenced or tilde
    #[arg(long, value_name = "STYLE", default_value_t = CodeBlockStyle::Indented)]
    fence: CodeBlockStyle,

    /// Append leftover element attributes as `{{tag:...}}` annotations
    #[arg(long)]
    attributes: bool,

    /// Keep footnote markup as HTML
    #[arg(long)]
    no_footnotes: bool,

    /// Render ins/del/mark and comments as CriticMarkup
    #[arg(long)]
    critic: bool,

    /// Keep definition lists as HTML
    #[arg(long)]
    no_definition_lists: bool,

    /// Deepest element nesting accepted
    #[arg(long, value_name = "N", default_value_t = Options::default().max_depth)]
    max_depth: usize,

    /// More log output on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            emit_attributes: self.attributes,
            footnotes: !self.no_footnotes,
            fenced_code: self.fence,
            critic_markup: self.critic,
            definition_lists: !self.no_definition_lists,
            max_depth: self.max_depth,
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut html = String::new();
            io::stdin()
                .read_to_string(&mut html)
                .context("failed to read stdin")?;
            Ok(html)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let html = read_input(cli.input.as_deref())?;
    debug!(bytes = html.len(), "read input");

    let converter = Converter::with_options(cli.options());
    let markdown = converter
        .convert_html(&html)
        .context("conversion failed")?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{markdown}").context("failed to write output")?;
    Ok(())
}
