//! rms CLI
//!
//! Command-line front end for the record store. Records are printed as JSON
//! lines on stdout; logs go to stderr.

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use rms::record::{
    AirlineDraft, AirlinePatch, ClientDraft, ClientPatch, FlightDraft, FlightPatch,
};
use rms::{Config, RecordStore, Result};

/// rms record store
#[derive(Parser, Debug)]
#[command(name = "rms")]
#[command(about = "Manage clients, airlines and flights")]
#[command(version)]
struct Cli {
    /// Data directory (defaults to the per-user data directory)
    #[arg(short, long)]
    data_dir: Option<String>,

    /// Template directory copied in for missing tables on first run
    #[arg(long)]
    seed_dir: Option<String>,

    /// Accept a leading '+' in phone numbers
    #[arg(long)]
    allow_plus_phone: bool,

    /// Flight minutes must be a multiple of this
    #[arg(long, default_value = "1")]
    minute_step: u32,

    /// Refuse to run when any stored line had to be skipped
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Client records
    #[command(subcommand)]
    Client(ClientCommand),

    /// Airline records
    #[command(subcommand)]
    Airline(AirlineCommand),

    /// Flight records
    #[command(subcommand)]
    Flight(FlightCommand),

    /// List valid countries
    Countries,

    /// List known cities
    Cities {
        /// Only cities of this country
        #[arg(long)]
        country: Option<String>,
    },

    /// Rewrite every table file
    Save,
}

#[derive(Subcommand, Debug)]
enum ClientCommand {
    Add(ClientFields),
    Update {
        id: u64,
        #[command(flatten)]
        fields: ClientFields,
    },
    Delete {
        id: u64,
    },
    Get {
        id: u64,
    },
    Search {
        query: String,
    },
    List,
}

#[derive(Args, Debug)]
struct ClientFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    address1: Option<String>,
    #[arg(long)]
    address2: Option<String>,
    #[arg(long)]
    address3: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    zip: Option<String>,
    #[arg(long)]
    country: Option<String>,
    #[arg(long)]
    phone: Option<String>,
}

impl From<ClientFields> for ClientPatch {
    fn from(f: ClientFields) -> Self {
        ClientPatch {
            name: f.name,
            address1: f.address1,
            address2: f.address2,
            address3: f.address3,
            city: f.city,
            state: f.state,
            zip: f.zip,
            country: f.country,
            phone: f.phone,
        }
    }
}

impl From<ClientFields> for ClientDraft {
    fn from(f: ClientFields) -> Self {
        ClientDraft {
            name: f.name.unwrap_or_default(),
            address1: f.address1.unwrap_or_default(),
            address2: f.address2.unwrap_or_default(),
            address3: f.address3.unwrap_or_default(),
            city: f.city.unwrap_or_default(),
            state: f.state.unwrap_or_default(),
            zip: f.zip.unwrap_or_default(),
            country: f.country.unwrap_or_default(),
            phone: f.phone.unwrap_or_default(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum AirlineCommand {
    Add {
        #[arg(long)]
        company_name: String,
    },
    Update {
        id: u64,
        #[arg(long)]
        company_name: Option<String>,
    },
    Delete {
        id: u64,
    },
    Get {
        id: u64,
    },
    Search {
        query: String,
    },
    List,
}

#[derive(Subcommand, Debug)]
enum FlightCommand {
    Add {
        #[arg(long)]
        client_id: u64,
        #[arg(long)]
        airline_id: u64,
        /// YYYY-MM-DD HH:MM
        #[arg(long)]
        date: String,
        #[arg(long)]
        start_city: String,
        #[arg(long)]
        end_city: String,
    },
    Update {
        id: u64,
        #[arg(long)]
        client_id: Option<u64>,
        #[arg(long)]
        airline_id: Option<u64>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        start_city: Option<String>,
        #[arg(long)]
        end_city: Option<String>,
    },
    Delete {
        id: u64,
    },
    Get {
        id: u64,
    },
    /// Flights of clients matching a name, phone or id
    Search {
        query: String,
    },
    /// Flights by client and/or airline id
    ByFk {
        #[arg(long)]
        client_id: Option<u64>,
        #[arg(long)]
        airline_id: Option<u64>,
    },
    List,
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rms=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut builder = Config::builder()
        .allow_plus_phone(cli.allow_plus_phone)
        .minute_step(cli.minute_step);
    if let Some(dir) = &cli.data_dir {
        builder = builder.data_dir(dir);
    }
    if let Some(dir) = &cli.seed_dir {
        builder = builder.seed_dir(dir);
    }
    let config = builder.build();

    tracing::debug!("rms v{}", rms::VERSION);
    tracing::debug!("Data directory: {}", config.data_dir.display());

    let mut store = match RecordStore::open(config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if cli.strict {
        if let Err(e) = store.load_report().ensure_clean() {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    }

    match run(&mut store, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(store: &mut RecordStore, command: Commands) -> Result<()> {
    match command {
        Commands::Client(cmd) => match cmd {
            ClientCommand::Add(fields) => print(&store.create_client(fields.into())?),
            ClientCommand::Update { id, fields } => print(&store.update_client(id, fields.into())?),
            ClientCommand::Delete { id } => {
                let cascaded = store.delete_client(id)?;
                tracing::info!("Deleted client {} and {} flights", id, cascaded);
                Ok(())
            }
            ClientCommand::Get { id } => print_found(store.get_client(id)),
            ClientCommand::Search { query } => print_all(store.search_clients(&query)),
            ClientCommand::List => print_all(store.clients()),
        },

        Commands::Airline(cmd) => match cmd {
            AirlineCommand::Add { company_name } => {
                print(&store.create_airline(AirlineDraft::new(company_name))?)
            }
            AirlineCommand::Update { id, company_name } => {
                print(&store.update_airline(id, AirlinePatch { company_name })?)
            }
            AirlineCommand::Delete { id } => {
                let cascaded = store.delete_airline(id)?;
                tracing::info!("Deleted airline {} and {} flights", id, cascaded);
                Ok(())
            }
            AirlineCommand::Get { id } => print_found(store.get_airline(id)),
            AirlineCommand::Search { query } => print_all(store.search_airlines(&query)),
            AirlineCommand::List => print_all(store.airlines()),
        },

        Commands::Flight(cmd) => match cmd {
            FlightCommand::Add {
                client_id,
                airline_id,
                date,
                start_city,
                end_city,
            } => print(&store.create_flight(FlightDraft {
                client_id,
                airline_id,
                date,
                start_city,
                end_city,
            })?),
            FlightCommand::Update {
                id,
                client_id,
                airline_id,
                date,
                start_city,
                end_city,
            } => print(&store.update_flight(
                id,
                FlightPatch {
                    client_id,
                    airline_id,
                    date,
                    start_city,
                    end_city,
                },
            )?),
            FlightCommand::Delete { id } => store.delete_flight(id),
            FlightCommand::Get { id } => print_found(store.get_flight(id)),
            FlightCommand::Search { query } => print_all(store.search_flights(&query)),
            FlightCommand::ByFk {
                client_id,
                airline_id,
            } => print_all(store.search_flights_by_fk(client_id, airline_id)),
            FlightCommand::List => print_all(store.flights()),
        },

        Commands::Countries => {
            store.list_countries().iter().for_each(|c| println!("{c}"));
            Ok(())
        }

        Commands::Cities { country } => {
            let cities = match country {
                Some(country) => store.list_cities_by_country(&country),
                None => store.list_cities(),
            };
            cities.iter().for_each(|c| println!("{c}"));
            Ok(())
        }

        Commands::Save => print(&store.save_all()?),
    }
}

fn print<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

fn print_found<T: Serialize>(value: Option<&T>) -> Result<()> {
    match value {
        Some(v) => print(v),
        None => {
            tracing::warn!("not found");
            Ok(())
        }
    }
}

fn print_all<T: Serialize>(values: impl IntoIterator<Item = T>) -> Result<()> {
    for value in values {
        print(&value)?;
    }
    Ok(())
}
