//! Command-line player for sapling plans.
//!
//! ```text
//! sapling [--options FILE] [--seed 10,5,15] [--export FILE] \
//!         insert:8 delete:10 ...
//! ```

use std::path::{Path, PathBuf};

use sapling::animation::VisualizationState;
use sapling::engine::{parse_value, TreeCommand, Visualizer};
use sapling::error::SaplingError;
use sapling::layout::LayeredLayout;
use sapling::options::Options;
use sapling::plan::{BstAdapter, Plan, Snapshot, StructureAdapter, Value};
use serde::Serialize;
use web_time::Instant;

#[derive(Debug, Default)]
struct Args {
    options: Option<PathBuf>,
    seed: Vec<Value>,
    export: Option<PathBuf>,
    commands: Vec<TreeCommand>,
}

const USAGE: &str = "Usage: sapling [--options FILE] [--seed V,V,...] \
                     [--export FILE] insert:N|delete:N|find:N ...";

fn parse_args(mut raw: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut args = Args::default();
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--options" => {
                let path = raw.next().ok_or("--options needs a file")?;
                args.options = Some(PathBuf::from(path));
            }
            "--export" => {
                let path = raw.next().ok_or("--export needs a file")?;
                args.export = Some(PathBuf::from(path));
            }
            "--seed" => {
                let list = raw.next().ok_or("--seed needs a value list")?;
                for item in list.split(',').filter(|s| !s.trim().is_empty()) {
                    let value =
                        parse_value(item).map_err(|e| e.to_string())?;
                    args.seed.push(value);
                }
            }
            "-h" | "--help" => return Err(USAGE.to_owned()),
            _ => {
                let command =
                    arg.parse::<TreeCommand>().map_err(|e| e.to_string())?;
                args.commands.push(command);
            }
        }
    }
    Ok(args)
}

fn describe(state: &VisualizationState) -> String {
    let nodes: Vec<String> = state
        .nodes()
        .iter()
        .filter(|n| !n.is_transparent())
        .map(|n| {
            format!("{}@({:.0},{:.0})", n.value, n.position.x, n.position.y)
        })
        .collect();
    let cursor = state.cursor();
    if cursor.visible {
        format!(
            "[{}] cursor ({:.0},{:.0})",
            nodes.join(" "),
            cursor.position.x,
            cursor.position.y
        )
    } else {
        format!("[{}]", nodes.join(" "))
    }
}

/// Play each command in real time, sleeping until the next transition.
fn play(
    viz: &mut Visualizer<BstAdapter, LayeredLayout>,
    commands: &[TreeCommand],
) -> Result<(), SaplingError> {
    log::info!("initial {}", describe(viz.state()));
    for &command in commands {
        viz.execute(command, Instant::now())?;
        log::info!("{command} {}", describe(viz.state()));
        let mut seen = viz.sequencer().version();
        while let Some(deadline) = viz.next_deadline() {
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
            let _ = viz.update(deadline.max(Instant::now()));
            if viz.sequencer().version() != seen {
                seen = viz.sequencer().version();
                log::info!("  {}", describe(viz.state()));
            }
        }
    }
    log::info!("in order: {:?}", viz.adapter().tree().values());
    Ok(())
}

#[derive(Serialize)]
struct Operation {
    command: String,
    plan: Plan,
}

#[derive(Serialize)]
struct Export {
    initial: Snapshot,
    operations: Vec<Operation>,
}

/// Compile every command and write the plans as JSON without playing them.
fn export(
    args: &Args,
    options: &Options,
    path: &Path,
) -> Result<(), SaplingError> {
    let mut adapter = BstAdapter::with_values(&args.seed)
        .with_deletion_color(options.colors.deletion);
    let initial = adapter.initial_state();
    let operations = args
        .commands
        .iter()
        .map(|&command| Operation {
            command: command.to_string(),
            plan: match command {
                TreeCommand::Insert(v) => adapter.insert(v),
                TreeCommand::Delete(v) => adapter.delete(v),
                TreeCommand::Find(v) => adapter.find(v),
            },
        })
        .collect();
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, &Export { initial, operations })
        .map_err(std::io::Error::from)?;
    log::info!("wrote {} plans to {}", args.commands.len(), path.display());
    Ok(())
}

fn run(args: &Args) -> Result<(), SaplingError> {
    let options = match &args.options {
        Some(path) => {
            log::info!("loading options from {}", path.display());
            Options::load(path)?
        }
        None => Options::default(),
    };
    if let Some(path) = &args.export {
        return export(args, &options, path);
    }
    let mut viz = Visualizer::bst(&args.seed, options);
    play(&mut viz, &args.commands)
}

fn main() {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
