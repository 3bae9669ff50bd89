//! `exohab` - predict exoplanet habitability and manage saved planets.

use std::path::PathBuf;
use std::process;

use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use exohab_core::config::fetch_remote_catalog;
use exohab_core::preferences::{
    DefaultView, PreferencesUpdate, RecentSearch, RecentSearches, Theme, Units, UserPreferences,
};
use exohab_core::prelude::*;

mod output;

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "exohab", version, about = "Exoplanet habitability predictor")]
struct Cli {
    /// Directory holding saved planets, preferences and search history
    #[arg(long, global = true, default_value = "./.exohab")]
    data_dir: PathBuf,
    /// Seed the local predictor for repeatable scores
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Use the remote prediction service instead of the local heuristic
    #[arg(long, global = true)]
    remote: bool,
    /// Base URL of the remote service (overrides EXOHAB_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a planet from its physical parameters
    Predict(PredictArgs),
    /// Search the reference catalog
    Search(SearchArgs),
    /// Save a planet's parameters without a prediction, or a catalog planet
    Save(SaveArgs),
    /// List saved planets
    List(ListArgs),
    /// Delete a saved planet by id
    Delete { id: i64 },
    /// Write all saved planets to saved_exoplanets.json
    Export {
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Restore saved planets from an exported file
    Import { file: PathBuf },
    /// Summary counts over saved planets
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Show or change display preferences
    Prefs(PrefsArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    Earth,
    Mars,
}

#[derive(Args)]
struct ParamArgs {
    /// Start from a reference body instead of the form defaults
    #[arg(long, value_enum)]
    preset: Option<Preset>,
    /// Planet radius in Earth radii
    #[arg(long)]
    radius: Option<f64>,
    /// Orbital period in days
    #[arg(long)]
    period: Option<f64>,
    /// Host star mass in solar masses
    #[arg(long)]
    stellar_mass: Option<f64>,
    /// Equilibrium temperature in Kelvin
    #[arg(long)]
    temperature: Option<f64>,
    /// Orbital eccentricity
    #[arg(long)]
    eccentricity: Option<f64>,
    /// Host star radius in solar radii
    #[arg(long)]
    stellar_radius: Option<f64>,
}

impl ParamArgs {
    fn resolve(&self) -> PlanetParameters {
        let base = match self.preset {
            Some(Preset::Earth) => PlanetParameters::earth(),
            Some(Preset::Mars) => PlanetParameters::mars(),
            None => PlanetParameters::default(),
        };
        PlanetParameters {
            planet_radius: self.radius.unwrap_or(base.planet_radius),
            orbital_period: self.period.unwrap_or(base.orbital_period),
            stellar_mass: self.stellar_mass.unwrap_or(base.stellar_mass),
            equilibrium_temperature: self.temperature.unwrap_or(base.equilibrium_temperature),
            eccentricity: self.eccentricity.unwrap_or(base.eccentricity),
            stellar_radius: self.stellar_radius.unwrap_or(base.stellar_radius),
        }
    }
}

#[derive(Args)]
struct PredictArgs {
    #[command(flatten)]
    params: ParamArgs,
    /// Save the prediction to the collection
    #[arg(long)]
    save: bool,
    /// Name for the saved planet
    #[arg(long, requires = "save")]
    name: Option<String>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SearchSort {
    Name,
    Score,
    Year,
}

#[derive(Args)]
struct SearchArgs {
    /// Text to look for in planet names
    text: Option<String>,
    /// Substring of the habitability label, e.g. "high"
    #[arg(long)]
    habitability: Option<String>,
    /// Substring of the data source
    #[arg(long)]
    source: Option<String>,
    #[arg(long, value_enum)]
    sort: Option<SearchSort>,
    /// Print recent searches instead of searching
    #[arg(long, conflicts_with = "text")]
    history: bool,
    /// Forget recent searches
    #[arg(long, conflicts_with_all = ["text", "history"])]
    clear_history: bool,
    #[arg(long)]
    json: bool,
}

impl SearchArgs {
    fn query(&self) -> CatalogQuery {
        let mut query = CatalogQuery::default();
        if let Some(text) = &self.text {
            query = query.text(text.as_str());
        }
        if let Some(band) = &self.habitability {
            query = query.habitability(band.as_str());
        }
        if let Some(source) = &self.source {
            query = query.source(source.as_str());
        }
        if let Some(sort) = self.sort {
            query = query.sorted_by(match sort {
                SearchSort::Name => CatalogSort::Name,
                SearchSort::Score => CatalogSort::HabitabilityScore,
                SearchSort::Year => CatalogSort::DiscoveryYear,
            });
        }
        query
    }
}

#[derive(Args)]
struct SaveArgs {
    #[command(flatten)]
    params: ParamArgs,
    /// Save the reference catalog planet with this id instead
    #[arg(long)]
    catalog: Option<u32>,
    #[arg(long)]
    name: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ListSort {
    Saved,
    Name,
    Score,
}

#[derive(Args)]
struct ListArgs {
    /// Substring of name or classification
    #[arg(long)]
    query: Option<String>,
    #[arg(long, value_enum, default_value = "saved")]
    sort: ListSort,
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Dark,
    Light,
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitsArg {
    Metric,
    Imperial,
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewArg {
    Grid,
    List,
}

#[derive(Args)]
struct PrefsArgs {
    #[arg(long, value_enum)]
    theme: Option<ThemeArg>,
    #[arg(long, value_enum)]
    units: Option<UnitsArg>,
    #[arg(long, value_enum)]
    view: Option<ViewArg>,
    #[arg(long)]
    auto_save: Option<bool>,
}

impl PrefsArgs {
    fn update(&self) -> PreferencesUpdate {
        PreferencesUpdate {
            theme: self.theme.map(|t| match t {
                ThemeArg::Dark => Theme::Dark,
                ThemeArg::Light => Theme::Light,
            }),
            units: self.units.map(|u| match u {
                UnitsArg::Metric => Units::Metric,
                UnitsArg::Imperial => Units::Imperial,
            }),
            default_view: self.view.map(|v| match v {
                ViewArg::Grid => DefaultView::Grid,
                ViewArg::List => DefaultView::List,
            }),
            auto_save: self.auto_save,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult {
    let config = provider_config(&cli);
    match cli.command {
        Commands::Predict(args) => predict(&cli.data_dir, &config, args),
        Commands::Search(args) => search(&cli.data_dir, &config, args),
        Commands::Save(args) => save(&cli.data_dir, args),
        Commands::List(args) => list(&cli.data_dir, args),
        Commands::Delete { id } => {
            open_store(&cli.data_dir)?.delete(id)?;
            println!("Deleted {}", id);
            Ok(())
        }
        Commands::Export { out } => {
            let path = open_store(&cli.data_dir)?.export_to_dir(&out)?;
            println!("Exported to {}", path.display());
            Ok(())
        }
        Commands::Import { file } => {
            let bytes = std::fs::read(&file)?;
            let added = open_store(&cli.data_dir)?.import_json(&bytes)?;
            println!("Imported {} planet(s)", added);
            Ok(())
        }
        Commands::Stats { json } => {
            let stats = open_store(&cli.data_dir)?.stats()?;
            if json {
                output::print_json(&stats)?;
            } else {
                output::print_kv("Saved planets:", &stats.total.to_string());
                output::print_kv(
                    "Potentially habitable:",
                    &stats.potentially_habitable.to_string(),
                );
                output::print_kv("Custom predictions:", &stats.custom_predictions.to_string());
            }
            Ok(())
        }
        Commands::Prefs(args) => prefs(&cli.data_dir, args),
    }
}

/// Environment first, then command-line overrides.
fn provider_config(cli: &Cli) -> ProviderConfig {
    let mut config = ProviderConfig::from_env();
    if cli.remote {
        config.mode = ProviderMode::Remote;
    }
    if let Some(url) = &cli.api_url {
        config.base_url = url.clone();
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config
}

fn open_store(data_dir: &std::path::Path) -> Result<PlanetCatalogStore<JsonFileStore>, StoreError> {
    PlanetCatalogStore::new(JsonFileStore::open(data_dir)?)
}

fn predict(data_dir: &std::path::Path, config: &ProviderConfig, args: PredictArgs) -> CliResult {
    let params = args.params.resolve();
    let mut provider = build_provider(config)?;
    let prediction = provider.predict(&params)?;
    log::debug!("{} provider scored {:.1}", provider.name(), prediction.habitability_score);

    if args.json {
        output::print_json(&prediction)?;
    } else {
        output::print_prediction(&prediction);
    }

    if args.save {
        let mut record = NewPlanetRecord::custom(params, prediction);
        if let Some(name) = args.name {
            record = record.named(name);
        }
        let saved = open_store(data_dir)?.save(record)?;
        println!("Saved as '{}' (id {})", saved.name, saved.id);
    }
    Ok(())
}

fn search(data_dir: &std::path::Path, config: &ProviderConfig, args: SearchArgs) -> CliResult {
    let mut store = open_store(data_dir)?;
    let mut recent = RecentSearches::load(store.backend())?;

    if args.clear_history {
        recent.clear();
        recent.save(store.backend_mut())?;
        println!("Search history cleared.");
        return Ok(());
    }
    if args.history {
        if args.json {
            output::print_json(&recent)?;
        } else {
            for s in recent.entries() {
                println!(
                    "  {:<20} {:>3} result(s)  {}",
                    s.query,
                    s.results,
                    s.timestamp.format("%Y-%m-%d %H:%M")
                );
            }
        }
        return Ok(());
    }

    let query = args.query();

    let page = match config.mode {
        ProviderMode::Remote => fetch_remote_catalog(config, &query)?,
        ProviderMode::Local => store.search_page(&query),
    };

    if let Some(text) = args.text.filter(|t| !t.trim().is_empty()) {
        recent.record(RecentSearch {
            query: text,
            filters: query,
            timestamp: Utc::now(),
            results: page.total_count,
        });
        recent.save(store.backend_mut())?;
    }

    if args.json {
        output::print_json(&page)?;
    } else {
        output::print_catalog(&page.planets);
        println!("{} planet(s)", page.total_count);
    }
    Ok(())
}

fn save(data_dir: &std::path::Path, args: SaveArgs) -> CliResult {
    let mut store = open_store(data_dir)?;
    let mut record = match args.catalog {
        Some(id) => {
            let entry = store
                .catalog()
                .iter()
                .find(|e| e.id == id)
                .ok_or_else(|| format!("no catalog planet with id {}", id))?;
            NewPlanetRecord::from_catalog(entry)
        }
        None => NewPlanetRecord::from_params(args.params.resolve()),
    };
    if let Some(name) = args.name {
        record = record.named(name);
    }
    let saved = store.save(record)?;
    println!("Saved as '{}' (id {})", saved.name, saved.id);
    Ok(())
}

fn list(data_dir: &std::path::Path, args: ListArgs) -> CliResult {
    let view = SavedView {
        query: args.query,
        sort: match args.sort {
            ListSort::Saved => SavedSort::SavedAt,
            ListSort::Name => SavedSort::Name,
            ListSort::Score => SavedSort::HabitabilityScore,
        },
    };
    let records = open_store(data_dir)?.view(&view)?;
    if args.json {
        output::print_json(&records)?;
    } else {
        output::print_saved(&records);
    }
    Ok(())
}

fn prefs(data_dir: &std::path::Path, args: PrefsArgs) -> CliResult {
    let mut backend = JsonFileStore::open(data_dir)?;
    let update = args.update();
    let prefs = if update == PreferencesUpdate::default() {
        UserPreferences::load(&backend)?
    } else {
        UserPreferences::update(&mut backend, update)?
    };
    output::print_json(&prefs)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn search_args(argv: &[&str]) -> SearchArgs {
        let mut full = vec!["exohab", "search"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Commands::Search(args) => args,
            _ => panic!("expected search subcommand"),
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_habitability_flag_is_substring_match() {
        let cmd = Cli::command();
        let search = cmd.find_subcommand("search").unwrap();
        let help = search
            .get_arguments()
            .find(|a| a.get_id() == "habitability")
            .and_then(|a| a.get_help())
            .map(|h| h.to_string())
            .unwrap_or_default();
        assert!(help.starts_with("Substring"), "{}", help);

        let store = PlanetCatalogStore::new(MemoryStore::new()).unwrap();
        let hits = store.search(&search_args(&["--habitability", "HIGH"]).query());
        let names: Vec<&str> = hits.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Kepler-186f"]);
    }

    #[test]
    fn test_save_catalog_flag_parses() {
        let cli = Cli::try_parse_from(["exohab", "save", "--catalog", "2"]).unwrap();
        match cli.command {
            Commands::Save(args) => assert_eq!(args.catalog, Some(2)),
            _ => panic!("expected save subcommand"),
        }
    }
}
