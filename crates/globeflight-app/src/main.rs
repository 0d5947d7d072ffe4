//! globeflight: headless GLOBEFLIGHT host.
//!
//! Reads commands from stdin (one per line, JSON or text form) and writes one
//! JSON record per rendered frame to stdout. Logs go to stderr.
//!
//! Usage:
//!   globeflight [--config engine.json] [--width 1280] [--height 720] [--locale ko]
//!   globeflight --tour 8 --seed 42

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use globeflight_app::host_loop::{spawn_host_loop, HostLoop};
use globeflight_app::ipc::parse_command;
use globeflight_app::state::LoopCommand;
use globeflight_app::tour::plan_tour;
use globeflight_core::commands::HostCommand;
use globeflight_core::enums::Locale;
use globeflight_core::types::Viewport;
use globeflight_engine::EngineConfig;

/// Extra wait after the last input line for a running cycle to finish.
const LINGER_GRACE: Duration = Duration::from_millis(250);

struct Options {
    config: Option<PathBuf>,
    width: Option<f64>,
    height: Option<f64>,
    locale: Locale,
    tour: Option<usize>,
    seed: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| matches!(a.as_str(), "help" | "--help" | "-h")) {
        print_usage();
        return;
    }

    let options = match parse_options(&args) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("{msg}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = run(options) {
        error!("{e}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "globeflight: headless map-to-globe flight host\n\
         \n\
         Options:\n\
         \n\
           --config <path>    Engine config JSON (optional, defaults built in)\n\
           --width <px>       Viewport width\n\
           --height <px>      Viewport height\n\
           --locale <en|ko>   Label language in frame records (default: en)\n\
           --tour <N>         Fly an N-stop random tour instead of reading stdin\n\
           --seed <S>         Tour seed (default: 42)\n\
         \n\
         Input commands (stdin, one per line):\n\
         \n\
           select JP | feature 392 | return | sync KR | resize 1920 1080 | quit\n\
           {{\"type\":\"SelectLocation\",\"location\":\"JP\"}}\n"
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Result<Option<T>, String> {
    match flag_value(args, flag) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| format!("Invalid value for {flag}: {raw}")),
        None => Ok(None),
    }
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let locale = match flag_value(args, "--locale") {
        None | Some("en") => Locale::English,
        Some("ko") => Locale::Korean,
        Some(other) => return Err(format!("Unknown locale: {other}")),
    };
    Ok(Options {
        config: flag_value(args, "--config").map(PathBuf::from),
        width: parse_flag(args, "--width")?,
        height: parse_flag(args, "--height")?,
        locale,
        tour: parse_flag(args, "--tour")?,
        seed: parse_flag(args, "--seed")?.unwrap_or(42),
    })
}

fn run(options: Options) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &options.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if options.width.is_some() || options.height.is_some() {
        config.viewport = Viewport::new(
            options.width.unwrap_or(config.viewport.width),
            options.height.unwrap_or(config.viewport.height),
        );
    }
    let cycle = Duration::from_secs_f64(config.morph_duration_secs + config.flight_duration_secs);
    let start = config.default_location;

    let host = spawn_host_loop(config, io::stdout(), options.locale)?;

    match options.tour {
        Some(len) => fly_tour(&host, plan_tour(options.seed, len, start)),
        None => read_commands(&host, cycle + LINGER_GRACE)?,
    }

    host.shutdown();
    Ok(())
}

fn fly_tour(host: &HostLoop, stops: Vec<globeflight_core::LocationId>) {
    info!(stops = stops.len(), "starting tour");
    for stop in stops {
        let command = HostCommand::SelectLocation { location: stop };
        if host.commands.send(LoopCommand::Host(command)).is_err() {
            warn!("host loop gone, ending tour");
            return;
        }
        if host.arrivals.recv().is_err() {
            return;
        }
    }
}

fn read_commands(host: &HostLoop, linger: Duration) -> io::Result<()> {
    for line in io::stdin().lock().lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(Some(LoopCommand::Shutdown)) => return Ok(()),
            Ok(Some(command)) => {
                if host.commands.send(command).is_err() {
                    warn!("host loop gone, ignoring further input");
                    return Ok(());
                }
            }
            Ok(None) => {}
            Err(e) => warn!(%line, "{e}"),
        }
        // Arrivals are logged by the engine; nothing else to do with them here.
        while host.arrivals.try_recv().is_ok() {}
    }

    // Input ended: let any running cycle finish before shutting down.
    while host.arrivals.recv_timeout(linger).is_ok() {}
    Ok(())
}
