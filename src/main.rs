use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use draw_oracle::api::state::AppState;
use draw_oracle::api::{build_router, cors_layer, MAX_ENTRIES};
use draw_oracle::calculate::demo::{demo_history, MAX_DRAWS};
use draw_oracle::calculate::odds::coverage;
use draw_oracle::calculate::simulate::simulate_draw;
use draw_oracle::calculate::{analyze, request_rng};
use draw_oracle::config::AppConfig;
use draw_oracle::models::{GameRules, GameType, PredictionRequest, PredictionResult};
use draw_oracle::parse_number_list;
use draw_oracle::strategy::{FallbackChain, LocalStrategy, PredictionInput, StrategyError};

#[derive(Parser)]
#[command(name = "draw-oracle")]
#[command(about = "Lottery number generator with an offline frequency engine")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./draw-oracle.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Game selection shared by most commands.
#[derive(Args, Debug, Clone)]
struct GameArgs {
    /// Game id (e.g. "uk-lotto", "us-powerball", "custom")
    #[arg(long, default_value = "custom")]
    game: String,

    /// Custom game: numbers per entry
    #[arg(long)]
    main_count: Option<u32>,

    /// Custom game: highest main number
    #[arg(long)]
    main_range: Option<u32>,

    /// Custom game: bonus numbers per draw
    #[arg(long)]
    bonus_count: Option<u32>,

    /// Custom game: separate bonus barrel size
    #[arg(long)]
    bonus_range: Option<u32>,
}

#[derive(Args, Debug, Clone)]
struct HistoryArgs {
    /// Draw history as inline text
    #[arg(long, conflicts_with = "history_file")]
    history: Option<String>,

    /// File containing draw history
    #[arg(long)]
    history_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List built-in games
    Games,

    /// Show hot and cold numbers for a draw history
    Analyze {
        #[command(flatten)]
        game: GameArgs,

        #[command(flatten)]
        history: HistoryArgs,
    },

    /// Generate entries with the offline engine
    Predict {
        #[command(flatten)]
        game: GameArgs,

        #[command(flatten)]
        history: HistoryArgs,

        /// Number of entries
        #[arg(long, default_value = "1")]
        entries: u32,

        /// Numbers to keep in every entry (e.g. "7, 21")
        #[arg(long, default_value = "")]
        lucky: String,

        /// Numbers to leave out (e.g. "13 4")
        #[arg(long, default_value = "")]
        unwanted: String,

        /// System entry size
        #[arg(long)]
        system: Option<u32>,

        /// Fixed RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show prize-division odds
    Odds {
        #[command(flatten)]
        game: GameArgs,

        /// System entry size
        #[arg(long)]
        system: Option<u32>,

        /// Number of entries
        #[arg(long, default_value = "1")]
        entries: u32,
    },

    /// Run a simulated draw
    Simulate {
        #[command(flatten)]
        game: GameArgs,

        /// Entry to score against the draw (e.g. "3 9 14 22 30 41")
        #[arg(long)]
        entry: Option<String>,

        /// Bonus pick to score
        #[arg(long)]
        bonus: Option<u32>,

        /// Fixed RNG seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print sample draw history
    DemoHistory {
        #[command(flatten)]
        game: GameArgs,

        /// Number of weekly draws
        #[arg(long, default_value = "5")]
        draws: u32,

        /// Fixed RNG seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Start the API server
    Serve {
        /// Bind address (defaults to the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port number (defaults to the config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_found = cli.config.exists();
    let config = if config_found {
        AppConfig::from_file(&cli.config)
            .with_context(|| format!("loading {}", cli.config.display()))?
    } else {
        AppConfig::default()
    };

    // Initialize tracing
    let level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::debug!("Starting draw-oracle v{}", env!("CARGO_PKG_VERSION"));
    if config_found {
        tracing::debug!("Loaded config from {}", cli.config.display());
    } else {
        tracing::debug!("No config at {}, using defaults", cli.config.display());
    }

    match cli.command {
        Commands::Games => {
            println!(
                "{:<18} {:<24} {:<8} {:<34} System",
                "ID", "Name", "Region", "Rules"
            );
            for game in GameType::ALL {
                let rules = match game {
                    GameType::Custom => config.custom_game.unwrap_or_else(|| game.rules()),
                    _ => game.rules(),
                };
                let systems = rules.system_options();
                let system = match (systems.first(), systems.last()) {
                    (Some(lo), Some(hi)) => format!("{}-{}", lo, hi),
                    _ => "-".to_string(),
                };
                println!(
                    "{:<18} {:<24} {:<8} {:<34} {}",
                    game.slug(),
                    game.display_name(),
                    game.region(),
                    rules.summary(),
                    system
                );
            }
        }
        Commands::Analyze { game, history } => {
            let (_, rules) = resolve_game(&game, &config)?;
            let text = read_history(&history)?;
            let profile = analyze(&text, rules.main_range());

            println!("\n=== Frequency Analysis ===");
            println!("Numbers seen:     {}", profile.total_hits());
            println!("Hot:              {}", join(&profile.hot));
            println!("Cold:             {}", join(&profile.cold));
            println!("\nCounts:");
            for (number, count) in &profile.counts {
                if *count > 0 {
                    println!("  {:>3}: {}", number, count);
                }
            }
        }
        Commands::Predict {
            game,
            history,
            entries,
            lucky,
            unwanted,
            system,
            seed,
            json,
        } => {
            let (game_type, rules) = resolve_game(&game, &config)?;
            if entries == 0 || entries > MAX_ENTRIES {
                bail!("--entries must be between 1 and {}", MAX_ENTRIES);
            }
            if let Some(size) = system {
                check_system_size(size, &rules)?;
            }

            let mut request = PredictionRequest::new(entries)
                .with_lucky(parse_number_list(&lucky))
                .with_unwanted(parse_number_list(&unwanted));
            request.system_number = system;

            let input = PredictionInput {
                rules,
                history: read_history(&history)?,
                request,
            };

            let local = LocalStrategy::new(config.selector.tuning(), seed.or(config.selector.seed));
            let chain = FallbackChain::new().with(Arc::new(local));

            let attempted = match chain.run(&input).await {
                Ok(a) => a,
                Err(StrategyError::Selection(e)) => {
                    tracing::warn!("{}", e);
                    bail!("{}", e.user_message());
                }
                Err(e) => return Err(e.into()),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&attempted.result)?);
            } else {
                print_prediction(game_type, &attempted.result, attempted.strategy);
            }
        }
        Commands::Odds {
            game,
            system,
            entries,
        } => {
            let (game_type, rules) = resolve_game(&game, &config)?;
            let size = system.unwrap_or(rules.main_count());
            check_system_size(size, &rules)?;
            let stats = coverage(&rules, size, entries.clamp(1, MAX_ENTRIES));

            println!("\n=== {} Odds ===", game_type);
            println!("Entry size:       {}", stats.entry_size);
            println!("Entries:          {}", stats.entry_count);
            if let Some(lines) = stats.lines_per_entry {
                println!("Lines per entry:  {}", lines);
            }
            for tier in &stats.tiers {
                println!(
                    "  {:<12} {:<26} {}",
                    tier.division, tier.requirement, tier.probability
                );
            }
        }
        Commands::Simulate {
            game,
            entry,
            bonus,
            seed,
        } => {
            let (game_type, rules) = resolve_game(&game, &config)?;
            let mut rng = request_rng(seed.or(config.selector.seed));
            let draw = simulate_draw(&rules, &mut rng);

            println!("\n=== {} Simulated Draw ===", game_type);
            println!("Main:             {}", join(&draw.main));
            if !draw.supplementary.is_empty() {
                println!("Supplementary:    {}", join(&draw.supplementary));
            }
            if !draw.bonus.is_empty() {
                println!("Bonus:            {}", join(&draw.bonus));
            }

            if let Some(entry) = entry {
                let picks = parse_number_list(&entry);
                let score = draw.score(&picks, bonus);
                println!("\nYour entry:       {}", join(&picks));
                println!("Main matches:     {}", score.main_matches);
                if !draw.supplementary.is_empty() {
                    println!("Supp matches:     {}", score.supplementary_matches);
                }
                if bonus.is_some() {
                    println!(
                        "Bonus matched:    {}",
                        if score.bonus_matched { "yes" } else { "no" }
                    );
                }
            }
        }
        Commands::DemoHistory { game, draws, seed } => {
            let (_, rules) = resolve_game(&game, &config)?;
            let mut rng = request_rng(seed.or(config.selector.seed));
            let today = chrono::Local::now().date_naive();
            println!("{}", demo_history(&rules, draws.min(MAX_DRAWS), today, &mut rng));
        }
        Commands::Serve { host, port } => {
            let custom_game = config
                .custom_game
                .unwrap_or_else(|| GameType::Custom.rules());
            let state =
                AppState::local(config.selector.tuning(), custom_game, config.selector.seed);

            let cors = cors_layer(&config.server.cors_origin)
                .with_context(|| format!("invalid cors_origin {:?}", config.server.cors_origin))?;
            let app = build_router(state).layer(cors);

            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

/// Resolve `--game` plus custom overrides into validated rules.
fn resolve_game(args: &GameArgs, config: &AppConfig) -> Result<(GameType, GameRules)> {
    let game = GameType::from_slug(&args.game).with_context(|| {
        let known: Vec<&str> = GameType::ALL.iter().map(|g| g.slug()).collect();
        format!("unknown game {:?} (known: {})", args.game, known.join(", "))
    })?;

    let has_overrides = args.main_count.is_some()
        || args.main_range.is_some()
        || args.bonus_count.is_some()
        || args.bonus_range.is_some();

    if game != GameType::Custom {
        if has_overrides {
            bail!("rule overrides are only allowed with --game custom");
        }
        return Ok((game, game.rules()));
    }

    let base = config.custom_game.unwrap_or_else(|| game.rules());
    let rules = GameRules::new(
        args.main_count.unwrap_or(base.main_count()),
        args.main_range.unwrap_or(base.main_range()),
        args.bonus_count.unwrap_or(base.bonus_count()),
        args.bonus_range.or(base.bonus_range()),
    )?;
    Ok((game, rules))
}

fn check_system_size(size: u32, rules: &GameRules) -> Result<()> {
    if size < rules.main_count() || size > rules.main_range() {
        bail!(
            "--system must be between {} and {}",
            rules.main_count(),
            rules.main_range()
        );
    }
    Ok(())
}

fn read_history(args: &HistoryArgs) -> Result<String> {
    if let Some(text) = &args.history {
        return Ok(text.clone());
    }
    match &args.history_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading history from {}", path.display())),
        None => Ok(String::new()),
    }
}

fn join(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_prediction(game: GameType, result: &PredictionResult, strategy: &str) {
    println!("\n=== {} ({}) ===", game, result.system_label);
    println!("Strategy:         {}", strategy);
    for (i, entry) in result.entries.iter().enumerate() {
        let bonus = result
            .bonus_numbers
            .as_ref()
            .and_then(|b| b.get(i))
            .map(|b| format!("  + {}", b))
            .unwrap_or_default();
        println!("Entry {:<3}        {}{}", i + 1, join(entry), bonus);
    }
    println!(
        "Confidence:       {} (cosmetic, not a probability)",
        result.confidence_score
    );
    let tags: Vec<String> = result.method_tags.iter().map(|t| t.to_string()).collect();
    println!("Methods:          {}", tags.join(", "));
    println!("\n{}", result.narrative);
}
