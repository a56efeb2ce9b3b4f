use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use diffkeep::{
    config::Config, logging, split_lines, DiffFormatter, DiffService, RenderOptions, Renderer,
};
use std::{
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "diffkeep", version, about = "Store text pairs and show their line diffs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Address to listen on, overriding the configuration
        #[arg(short, long)]
        listen: Option<SocketAddr>,
    },

    /// Compare two local files line by line
    Diff {
        old: PathBuf,
        new: PathBuf,

        /// Print every line as a unified diff document instead of only the changed lines
        #[arg(long)]
        full: bool,

        /// Colorize the output
        #[cfg(feature = "color")]
        #[arg(long)]
        color: bool,

        /// Configuration file supplying the render options
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, listen } => {
            let mut config = Config::load(config.as_deref()).context("Failed to load config")?;
            if let Some(listen) = listen {
                config.listen = listen;
            }
            logging::init(config.log);

            let store = config.open_store().context("Failed to open store")?;
            let service = DiffService::new(store).with_options(config.render);

            info!(listen = %config.listen, "starting diffkeep");
            diffkeep::server::serve(service, config.listen)
                .await
                .context("Server error")?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Diff {
            old,
            new,
            full,
            #[cfg(feature = "color")]
            color,
            config,
        } => {
            let options = match config {
                Some(path) => Config::load(Some(path.as_path()))
                    .context("Failed to load config")?
                    .render,
                None => RenderOptions::default(),
            };

            let formatter = DiffFormatter::new();
            #[cfg(feature = "color")]
            let formatter = if color {
                formatter.with_color()
            } else {
                formatter
            };

            let changed = diff_files(&old, &new, options, formatter, full)?;
            Ok(if changed {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            })
        }
    }
}

/// Print the diff of two files, returning whether any line changed
fn diff_files(
    old: &Path,
    new: &Path,
    options: RenderOptions,
    formatter: DiffFormatter,
    full: bool,
) -> Result<bool> {
    let old_text = fs::read_to_string(old)
        .with_context(|| format!("Failed to read {}", old.display()))?;
    let new_text = fs::read_to_string(new)
        .with_context(|| format!("Failed to read {}", new.display()))?;

    let old_lines = split_lines(&old_text);
    let new_lines = split_lines(&new_text);
    let renderer = Renderer::new(options);

    if full {
        let rendering = renderer.render(&old_lines, &new_lines)?;
        print!("{}", formatter.fmt_document(&rendering));
        Ok(rendering.changed_lines() > 0)
    } else {
        match renderer.render_changes(&old_lines, &new_lines)? {
            Some(summary) => {
                print!("{}", formatter.fmt_rendering(&summary));
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
