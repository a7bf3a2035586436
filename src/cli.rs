use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::{AppConfig, load_config};
use crate::desktop::env::{EnvironmentSet, parse_current_desktop};
use crate::desktop::load_link;
use crate::error::LoadError;
use crate::link::{Link, LinkData, LinkInfo};

#[derive(Parser)]
#[command(name = "desklink")]
#[command(about = "Validate desktop entries and show what a launcher would see")]
pub struct Cli {
    /// Config file to use instead of ~/.config/desklink/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the link built from a desktop file
    Inspect {
        /// Path to the .desktop file
        file: PathBuf,
        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
        /// Desktop to evaluate OnlyShowIn/NotShowIn against (e.g. "GNOME")
        #[arg(long)]
        desktop: Option<String>,
    },
    /// Check that desktop files describe valid links
    Check {
        /// Paths to .desktop files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

/// Run a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Inspect {
            file,
            json,
            desktop,
        } => inspect(&config, &file, json, desktop.as_deref()),
        Commands::Check { files } => check(&config, &files),
    }
}

#[derive(Serialize)]
struct InspectReport<'a> {
    path: &'a Path,
    shown: bool,
    #[serde(flatten)]
    link: &'a LinkInfo,
}

fn inspect(config: &AppConfig, file: &Path, json: bool, desktop: Option<&str>) -> Result<()> {
    let locales = config.effective_locales();
    let current = match desktop {
        Some(value) => parse_current_desktop(value),
        None => config.current_desktop(),
    };
    debug!(?current, ?locales, "Inspecting {:?}", file);

    let link = load(config, file, &locales)
        .with_context(|| format!("Failed to load {}", file.display()))?;

    let shown = link.should_show(current);

    if json {
        let report = InspectReport {
            path: file,
            shown,
            link: link.info(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", summary(link.info(), shown));
    }

    Ok(())
}

fn check(config: &AppConfig, files: &[PathBuf]) -> Result<()> {
    let locales = config.effective_locales();
    let mut failed = 0;

    for file in files {
        match load(config, file, &locales) {
            Ok(link) => println!("{}: ok ({})", file.display(), link.link_type()),
            Err(e) => {
                warn!(%e, "Invalid desktop file {:?}", file);
                println!("{}: {}", file.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} desktop files are invalid", failed, files.len());
    }
    Ok(())
}

/// Load a link, probing `TryExec` only when the config asks for it.
fn load(config: &AppConfig, file: &Path, locales: &[String]) -> Result<Link, LoadError> {
    if config.try_exec {
        load_link(file, &config.probe(), locales)
    } else {
        load_link(file, &|_: &str| true, locales)
    }
}

fn summary(info: &LinkInfo, shown: bool) -> String {
    let mut out = String::new();
    let mut line = |key: &str, value: &str| out.push_str(&format!("{:<16}{}\n", key, value));

    line("Type", info.data.link_type().literal());
    line("Name", &info.name);
    if let Some(generic) = &info.generic_name {
        line("GenericName", generic);
    }
    if let Some(comment) = &info.comment {
        line("Comment", comment);
    }
    if let Some(icon) = &info.icon {
        line("Icon", icon);
    }

    match &info.data {
        LinkData::Application(app) => {
            line("Exec", &app.exec);
            if let Some(dir) = &app.working_dir {
                line("Path", dir);
            }
            line("Terminal", &app.terminal.to_string());
            line("StartupNotify", &format!("{:?}", app.startup));
        }
        LinkData::Url(url) => line("URL", &url.address),
        LinkData::Directory => {}
    }

    if !info.env_required.is_empty() {
        line("OnlyShowIn", &environment_list(info.env_required));
    }
    if !info.env_restricted.is_empty() {
        line("NotShowIn", &environment_list(info.env_restricted));
    }
    line("Visible", &info.visible.to_string());
    line("Deleted", &info.deleted.to_string());
    line("Shown", &shown.to_string());

    out
}

fn environment_list(set: EnvironmentSet) -> String {
    set.environments()
        .iter()
        .map(|env| env.name())
        .collect::<Vec<_>>()
        .join(";")
}
