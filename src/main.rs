//! Global Clock - Terminal world-clock dashboard
//!
//! Shows live local time for a selected set of world cities, persists the
//! selection between sessions, and supports sharing it as a URL.

use anyhow::Result;
use clap::{Parser, ValueEnum};

use globalclock::constants::{APP_BINARY_NAME, APP_NAME};
use globalclock::insight::InsightClient;
use globalclock::locale;
use globalclock::selection::Selection;
use globalclock::store::HubStore;
use globalclock::tui::{self, AppState, ThemeMode};
use globalclock::{catalog, clock};

/// Global Clock - Terminal world-clock dashboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Shared dashboard link (or bare `cities=a,b,c` query string) to open
    #[arg(value_name = "LINK")]
    share_link: Option<String>,

    /// Comma-separated city ids to open, e.g. `seoul,london`
    #[arg(long, value_name = "IDS", conflicts_with = "share_link")]
    cities: Option<String>,

    /// Theme preference
    #[arg(long, value_enum, default_value_t = ThemeArg::Auto)]
    theme: ThemeArg,

    /// Print the city catalog and exit
    #[arg(long)]
    list_cities: bool,
}

/// Theme preference from the command line.
#[derive(ValueEnum, Debug, Clone, Copy)]
enum ThemeArg {
    Auto,
    Light,
    Dark,
}

impl From<ThemeArg> for ThemeMode {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Auto => Self::Auto,
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_cities {
        print_catalog();
        return Ok(());
    }

    // Shared link beats persisted state; --cities is sugar for a bare query
    let shared_input = cli
        .share_link
        .or_else(|| cli.cities.map(|ids| format!("cities={ids}")));

    let detected = locale::detected_timezone();
    let selection = Selection::initialize(shared_input.as_deref(), HubStore::open(), detected);

    let mut app_state = AppState::new(selection, cli.theme.into(), InsightClient::from_env());

    let mut terminal = tui::setup_terminal()?;
    let result = tui::run_tui(&mut app_state, &mut terminal);
    tui::restore_terminal(terminal)?;

    // Surface the error after the terminal is back to normal
    result?;

    Ok(())
}

/// Prints the selectable cities with their current local time.
fn print_catalog() {
    println!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));
    println!("Available cities (add with: {APP_BINARY_NAME} --cities <IDS>):");
    println!();
    for city in catalog::all_cities() {
        let time = city
            .tz()
            .map(|tz| clock::city_time_now(tz).clock)
            .unwrap_or_else(|_| "--:--:--".to_string());
        println!(
            "  {:<12} {:<24} {:<20} {}",
            city.id,
            city.to_string(),
            city.timezone,
            time
        );
    }
}
