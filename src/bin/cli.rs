//! devlink CLI Client
//!
//! Command-line interface for talking to a running simulator.

use std::process;
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};
use devlink::protocol::SKIP_PLAIN;
use devlink::{Code, Config, DeviceLink, Instrument, Result, TelemetrySource, Toggleable};
use tracing_subscriber::{fmt, EnvFilter};

/// devlink CLI
#[derive(Parser, Debug)]
#[command(name = "devlink-cli")]
#[command(about = "Query and command an IL-2 simulator over DeviceLink")]
#[command(version)]
struct Args {
    /// Config file with marker, P= and I= lines
    #[arg(short, long, conflicts_with_all = ["host", "port"])]
    config: Option<String>,

    /// Simulator host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Simulator UDP port
    #[arg(short, long, default_value = "21100")]
    port: u16,

    /// Answer timeout in milliseconds
    #[arg(short, long, default_value = "250")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the DeviceLink version
    Version,

    /// Print the aircraft type and engine count
    Aircraft,

    /// Read all flight instruments once
    Instruments,

    /// Read the telemetry of one engine (0-3)
    Engine {
        index: usize,
    },

    /// Query a raw code
    Query {
        /// The code to query, e.g. 30 or 64\0
        code: String,

        /// Secondary delimiters between the code and its value
        #[arg(short, long, default_value_t = SKIP_PLAIN)]
        skip: usize,
    },

    /// Send a raw toggle code
    Toggle {
        code: String,
    },

    /// Send a raw set code with a float value
    Set {
        code: String,

        value: f32,
    },

    /// Poll instruments until interrupted
    Watch {
        /// Poll interval in milliseconds
        #[arg(short, long, default_value = "500")]
        interval_ms: u64,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,devlink=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{}", e);
            process::exit(2);
        }
    };

    let link = DeviceLink::new(config);
    if let Err(e) = link.initialize() {
        tracing::error!("Failed to connect: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(&link, args.command) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::builder().host(&args.host).port(args.port).build(),
    };
    Ok(Config {
        receive_timeout_ms: args.timeout_ms,
        ..config
    })
}

fn run(link: &DeviceLink, command: Commands) -> Result<()> {
    match command {
        Commands::Version => {
            println!("{}", link.version()?);
        }
        Commands::Aircraft => {
            println!("aircraft: {}", link.aircraft_id()?);
            println!("engines:  {}", link.engine_count()?);
        }
        Commands::Instruments => {
            link.observe_instruments()?;
            print_instruments(link);
        }
        Commands::Engine { index } => {
            link.observe_engine(index)?;
            let e = link.engine(index)?;
            println!("rpm            {:>10.1}", e.rpm);
            println!("manifold       {:>10.2}", e.manifold);
            println!("oil in         {:>10.1}", e.temp_oil_in);
            println!("oil out        {:>10.1}", e.temp_oil_out);
            println!("water          {:>10.1}", e.temp_water);
            println!("cylinders      {:>10.1}", e.temp_cylinders);
        }
        Commands::Query { code, skip } => {
            println!("{}", link.session().read_value(&Code::from(code), skip)?);
        }
        Commands::Toggle { code } => {
            link.toggle(&Code::from(code))?;
        }
        Commands::Set { code, value } => {
            link.set_value(&Code::from(code), value)?;
        }
        Commands::Watch { interval_ms } => loop {
            match link.observe_instruments() {
                Ok(_) => print_instruments(link),
                Err(e) if e.is_transient() => tracing::warn!("{}", e),
                Err(e) => return Err(e),
            }
            println!();
            thread::sleep(Duration::from_millis(interval_ms));
        },
    }
    Ok(())
}

fn print_instruments(link: &DeviceLink) {
    for &field in Instrument::ALL {
        println!("{:<16}{:>10.2}", field.name(), link.get(field));
    }
}
