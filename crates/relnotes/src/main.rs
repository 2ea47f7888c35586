//! `relnotes` - CLI for the release notes renderer
//!
//! Reads a batch of parsed release notes, classifies them and writes the
//! resulting Markdown changelog.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::Context;
use clap::Parser;
use tracing::info;

use relnotes::cli::{ClassifyCommand, Cli, Command, ConfigCommand, RenderCommand};
use relnotes::{build_document, init_logging, render_markdown, Config, Error, NotesInput};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Render(render_cmd) => handle_render(config, render_cmd),
        Command::Classify(classify_cmd) => handle_classify(&classify_cmd),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn handle_render(mut config: Config, cmd: RenderCommand) -> anyhow::Result<()> {
    cmd.release.apply_to(&mut config.release);
    if let Some(path) = cmd.output {
        config.output.path = Some(path);
    }
    config.validate()?;

    let input = NotesInput::from_path(&cmd.notes)?;
    let doc = build_document(&input.notes, &input.history);
    let release = &config.release;

    let mut w: Box<dyn Write> = match &config.output.path {
        Some(path) => {
            let file = File::create(path).map_err(|source| Error::OutputCreate {
                path: path.clone(),
                source,
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    render_markdown(
        &mut w,
        &doc,
        &release.bucket,
        &release.artifact_dir,
        &release.previous_tag,
        &release.new_tag,
    )?;
    w.flush().map_err(Error::from)?;

    if let Some(path) = &config.output.path {
        info!("Wrote release notes to {}", path.display());
    }
    Ok(())
}

fn handle_classify(cmd: &ClassifyCommand) -> anyhow::Result<()> {
    let input = NotesInput::from_path(&cmd.notes)?;
    let doc = build_document(&input.notes, &input.history);

    let json = if cmd.pretty {
        serde_json::to_string_pretty(&doc)?
    } else {
        serde_json::to_string(&doc)?
    };
    println!("{json}");
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Release]");
                println!("  Bucket:             {}", config.release.bucket);
                println!("  Artifact dir:       {}", config.release.artifact_dir);
                println!("  Previous tag:       {}", config.release.previous_tag);
                println!("  New tag:            {}", config.release.new_tag);
                println!();
                println!("[Output]");
                match &config.output.path {
                    Some(path) => println!("  Path:               {}", path.display()),
                    None => println!("  Path:               <stdout>"),
                }
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)).and_then(|c| c.validate()) {
                Ok(()) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
