use std::{
    env, io,
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use anyhow::bail;
use clap::Parser;
use log::{LevelFilter, error, info};
use pretty_env_logger::env_logger::WriteStyle;
use samba_core::{BuildGraph, Executor, Settings, Shell};

#[derive(Parser)]
#[command(name = "samba", version)]
#[command(about = "Runs targets described in a build.samba file")]
struct Args {
    /// Targets to build, in order. Defaults to the file's default target
    targets: Vec<String>,

    /// Build file to read instead of build.samba
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Settings file to read instead of samba.yaml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log every executed command
    #[arg(short, long)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print commands instead of running them
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Disable colored log output
    #[arg(long)]
    no_color: bool,

    /// List the targets of the build file and exit
    #[arg(short, long)]
    list: bool,

    /// Pick the target to build from a prompt
    #[arg(short, long, conflicts_with = "targets")]
    interactive: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let settings = match read_settings(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            init_logger(&args, &Settings::default());
            error!("{err:#}");
            return ExitCode::FAILURE;
        }
    };
    init_logger(&args, &settings);

    match run(args, settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// An explicit settings path must exist; the default one is optional.
fn read_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    match path {
        Some(path) => samba_core::load_settings(path),
        None if Path::new(samba_core::SETTINGS_FILE).is_file() => {
            samba_core::load_settings(samba_core::SETTINGS_FILE)
        }
        None => Ok(Settings::default()),
    }
}

fn init_logger(args: &Args, settings: &Settings) {
    let level = if args.quiet {
        LevelFilter::Error
    } else if args.verbose || settings.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(level);
    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    if args.no_color || !settings.color {
        builder.write_style(WriteStyle::Never);
    }
    builder.init();
}

fn run(args: Args, settings: Settings) -> anyhow::Result<()> {
    let path = args
        .file
        .clone()
        .or_else(|| settings.build_file.clone())
        .unwrap_or_else(|| PathBuf::from(samba_core::BUILD_FILE));
    let graph = samba_core::load(&path)?;

    if args.list {
        list_targets(&graph);
        return Ok(());
    }

    let targets = if args.interactive {
        vec![select_target(&graph)?]
    } else {
        args.targets
    };

    let spawner = Shell;
    let mut stdout = io::stdout().lock();
    let mut executor = Executor::new(graph, &spawner, &mut stdout)
        .with_config(settings.compile)
        .dry_run(args.dry_run);

    let start = Instant::now();
    let result = executor.run(&targets);
    let elapsed = start.elapsed().as_secs_f64();

    match result {
        Ok(()) if args.dry_run => info!("Build would have completed in {elapsed:.2} seconds."),
        Ok(()) => info!("Build completed in {elapsed:.2} seconds."),
        Err(err) => {
            error!("{:#}", anyhow::Error::from(err));
            bail!("Build failed after {elapsed:.2} seconds.");
        }
    }

    Ok(())
}

fn list_targets(graph: &BuildGraph) {
    for name in graph.get_all_target_names() {
        if name == graph.default_target {
            println!("{name} (default)");
        } else {
            println!("{name}");
        }
    }
}

fn select_target(graph: &BuildGraph) -> anyhow::Result<String> {
    let names = graph.get_all_target_names();
    if names.is_empty() {
        bail!("No targets to select from");
    }

    Ok(inquire::Select::new("Select a target to execute", names).prompt()?)
}
