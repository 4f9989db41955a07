use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use reservauto_cli::domain::{City, Language, SearchCriteria, StatusFilter};
use reservauto_cli::output::{self, OutputFormat};
use reservauto_cli::reservauto::ReservautoClient;
use reservauto_cli::session::{AuthConfig, Authenticator};
use reservauto_cli::stations::StationDirectory;

/// CLI date format, e.g. "01/01/24 10:00".
const DATE_FORMAT: &str = "%d/%m/%y %H:%M";

#[derive(Parser)]
#[command(
    name = "reservauto",
    about = "Query the Communauto reservation site from the command line"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search for available cars over a date range
    Search(SearchArgs),
    /// List the account's reservations
    ListReservations(ListArgs),
}

#[derive(Args)]
struct CommonArgs {
    /// Membership number or email address
    #[arg(long, env = "CA_USER")]
    username: String,

    /// Account password
    #[arg(long, env = "CA_PASSWORD", hide_env_values = true)]
    password: String,

    /// Preferred language
    #[arg(long, value_enum, default_value_t = LangArg::En)]
    lang: LangArg,

    /// Output type
    #[arg(long, value_enum, default_value_t = OutputArg::Table)]
    output: OutputArg,
}

#[derive(Args)]
struct SearchArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Start of the reservation window (dd/mm/yy HH:MM)
    #[arg(long, value_parser = parse_date)]
    start_date: NaiveDateTime,

    /// End of the reservation window (dd/mm/yy HH:MM)
    #[arg(long, value_parser = parse_date)]
    end_date: NaiveDateTime,

    /// City to search in
    #[arg(long, value_enum, default_value_t = CityArg::Montreal)]
    city: CityArg,

    /// Path to the station directory JSON file
    #[arg(long, default_value = "stations.json")]
    stations: PathBuf,
}

#[derive(Args)]
struct ListArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Reservation status to list
    #[arg(long, value_enum, default_value_t = StatusArg::Upcoming)]
    status: StatusArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LangArg {
    En,
    Fr,
}

impl From<LangArg> for Language {
    fn from(arg: LangArg) -> Self {
        match arg {
            LangArg::En => Language::English,
            LangArg::Fr => Language::French,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputArg {
    Table,
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Table => OutputFormat::Table,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CityArg {
    Montreal,
    Sherbrooke,
    Quebec,
    Gatineau,
    Kingston,
    Ottawa,
    SwOntario,
}

impl From<CityArg> for City {
    fn from(arg: CityArg) -> Self {
        match arg {
            CityArg::Montreal => City::Montreal,
            CityArg::Sherbrooke => City::Sherbrooke,
            CityArg::Quebec => City::Quebec,
            CityArg::Gatineau => City::Gatineau,
            CityArg::Kingston => City::Kingston,
            CityArg::Ottawa => City::Ottawa,
            CityArg::SwOntario => City::SwOntario,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusArg {
    Ongoing,
    Upcoming,
    Past,
    Cancelled,
    All,
}

impl From<StatusArg> for StatusFilter {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Ongoing => StatusFilter::Ongoing,
            StatusArg::Upcoming => StatusFilter::Upcoming,
            StatusArg::Past => StatusFilter::Past,
            StatusArg::Cancelled => StatusFilter::Cancelled,
            StatusArg::All => StatusFilter::All,
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| format!("expected dd/mm/yy HH:MM: {e}"))
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Search(args) => {
            let directory = StationDirectory::load(&args.stations)?;
            info!(stations = directory.len(), "loaded station directory");

            let session = Authenticator::new(AuthConfig::new())
                .authenticate(&args.common.username, &args.common.password)
                .await?;

            let criteria = SearchCriteria {
                start: args.start_date,
                end: args.end_date,
                city: args.city.into(),
                language: args.common.lang.into(),
            };
            let client = ReservautoClient::new();
            let link = client.availability_url(&criteria);
            let cars = client.search(&session, &criteria, &directory).await?;
            info!(count = cars.len(), "search complete");

            println!(
                "{}",
                output::render_search(
                    &cars,
                    &criteria.date_range(),
                    &link,
                    args.common.output.into()
                )?
            );
        }
        Command::ListReservations(args) => {
            let session = Authenticator::new(AuthConfig::new())
                .authenticate(&args.common.username, &args.common.password)
                .await?;

            let client = ReservautoClient::new();
            let reservations = client
                .list_reservations(&session, args.status.into(), args.common.lang.into())
                .await?;
            info!(count = reservations.len(), "reservation list complete");

            println!(
                "{}",
                output::render_reservations(&reservations, args.common.output.into())?
            );
        }
    }
    Ok(())
}
