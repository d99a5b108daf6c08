#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Block World in the terminal.

mod config;
mod demo;
mod feedback;
mod logging;
mod messages;
mod render;
mod script;

use std::{
    cell::RefCell,
    io::{self, BufRead, Write},
    path::PathBuf,
    rc::Rc,
};

use anyhow::{Context, Result};
use block_world_core::Command;
use block_world_system_controls::ControlsView;
use block_world_system_grid_view::{GridConfig, GridView};
use block_world_system_inventory::InventoryView;
use block_world_world::WorldModel;
use clap::Parser;

use crate::{config::Config, messages::MessageLog};

/// Explore and reshape a block world from the terminal.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML file with `[world]` and `[view]` settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of tile columns in the generated world.
    #[arg(long)]
    columns: Option<u32>,
    /// Number of tile rows in the generated world.
    #[arg(long)]
    rows: Option<u32>,
    /// Seed for the generated world.
    #[arg(long)]
    seed: Option<u64>,
    /// Comma-separated commands, e.g. `north,dig,place:wood,block:south`.
    /// Commands are read from standard input when omitted.
    #[arg(long)]
    script: Option<String>,
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<Config> {
        let base = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        let config = base.with_overrides(self.columns, self.rows, self.seed);
        config.validate()?;
        Ok(config)
    }
}

/// Views attached to the model and rendered after every step.
struct Session {
    model: WorldModel,
    grid: Rc<RefCell<GridView>>,
    inventory: Rc<RefCell<InventoryView>>,
    controls: Rc<RefCell<ControlsView>>,
    messages: Rc<RefCell<MessageLog>>,
}

impl Session {
    fn start(config: &Config) -> Result<Self> {
        let map = demo::generate(&config.world)?;
        let name = map.builder().name().to_owned();

        let mut model = WorldModel::new();
        let grid = GridView::new(GridConfig::new(config.view.columns, config.view.rows))
            .attach(&mut model);
        let inventory = InventoryView::new().attach(&mut model);
        let controls = ControlsView::new().attach(&mut model);
        let messages = MessageLog::default().attach(&mut model);

        model.load_map(map);
        model.report_info(format!(
            "{name} enters a {}x{} world",
            config.world.columns, config.world.rows
        ));
        log::info!("{} tiles reachable from the start", model.tiles().len());

        Ok(Self {
            model,
            grid,
            inventory,
            controls,
            messages,
        })
    }

    fn run(&mut self, command: Command) {
        log::debug!("applying {command:?}");
        if let Err(error) = self.model.apply(command) {
            let message = feedback::failure_message(&self.model, command, &error);
            log::debug!("{command:?} rejected: {error}");
            self.model.report_error(message);
        }
    }

    fn print(&self, out: &mut impl Write) -> Result<()> {
        writeln!(out, "{}", render::render_grid(&self.grid.borrow()))?;
        writeln!(out, "{}", render::render_inventory(&self.inventory.borrow()))?;
        writeln!(out, "{}", render::render_controls(&self.controls.borrow()))?;
        for message in self.messages.borrow_mut().take() {
            writeln!(out, "{message}")?;
        }
        writeln!(out)?;
        Ok(())
    }
}

/// Entry point for the Block World command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = cli.resolve_config()?;
    let scripted = cli
        .script
        .as_deref()
        .map(script::parse_script)
        .transpose()
        .context("invalid --script")?;

    let mut session = Session::start(&config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    session.print(&mut out)?;

    if let Some(commands) = scripted {
        for command in commands {
            session.run(command);
            session.print(&mut out)?;
        }
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read command from standard input")?;
        if line.trim().is_empty() {
            continue;
        }
        match script::parse_script(&line) {
            Ok(commands) => {
                for command in commands {
                    session.run(command);
                    session.print(&mut out)?;
                }
            }
            Err(error) => {
                session.model.report_error(error.to_string());
                session.print(&mut out)?;
            }
        }
    }
    Ok(())
}
