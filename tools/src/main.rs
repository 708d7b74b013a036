//! garden-runner: headless driver for the floragen garden engine.
//!
//! Usage:
//!   garden-runner --db garden.db --profile alice
//!   garden-runner --db garden.db --profile alice --ipc-mode

use anyhow::Result;
use floragen_core::{
    config::GameConfig,
    economy::SellOrder,
    engine::{GardenEngine, PlantView},
    error::GameError,
    gacha::Distribution,
    rarity::Rarity,
    state::Player,
    store::GardenStore,
    types::{Amount, Timestamp},
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    BuyPack { price: Amount },
    Plant { seed_id: String, slot: usize },
    Harvest { plant_id: String },
    Sell { rarity: Rarity, quantity: Amount },
    Preview { price: Amount },
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    now:        Timestamp,
    player:     Player,
    seeds:      Vec<floragen_core::state::Seed>,
    garden:     Vec<PlantView>,
    free_slots: Vec<usize>,
}

#[derive(serde::Serialize)]
struct UiPreview {
    price:        Amount,
    distribution: Distribution,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let db = parse_str(&args, "--db", ":memory:");
    let config_path = parse_str(&args, "--config", "./data/config.json");
    let profile = parse_str(&args, "--profile", "default");

    if !ipc_mode {
        println!("floragen garden-runner");
        println!("  db:       {db}");
        println!("  config:   {config_path}");
        println!("  profile:  {profile}");
        println!();
    }

    let config = GameConfig::load(config_path)?;
    let store = GardenStore::open(db)?;
    store.migrate()?;

    let mut engine = GardenEngine::build(profile.to_string(), config, store)?;

    if ipc_mode {
        run_ipc_loop(&mut engine)?;
    } else {
        print_summary(&engine)?;
    }

    Ok(())
}

fn run_ipc_loop(engine: &mut GardenEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?;
                stdout.flush()?;
                continue;
            }
        };

        if matches!(cmd, IpcCommand::Quit) {
            break;
        }

        let reply = match handle_command(engine, cmd) {
            Ok(value) => value,
            Err(e) => error_reply(&e),
        };
        writeln!(stdout, "{reply}")?;
        stdout.flush()?;
    }
    Ok(())
}

/// Run one command. Any failure is answered as an error line, never fatal.
fn handle_command(engine: &mut GardenEngine, cmd: IpcCommand) -> Result<serde_json::Value, GameError> {
    let value = match cmd {
        IpcCommand::GetState => serde_json::to_value(build_ui_state(engine)?)?,
        IpcCommand::BuyPack { price } => serde_json::to_value(engine.buy_pack(price)?)?,
        IpcCommand::Plant { seed_id, slot } => serde_json::to_value(engine.plant_seed(&seed_id, slot)?)?,
        IpcCommand::Harvest { plant_id } => serde_json::to_value(engine.harvest(&plant_id)?)?,
        IpcCommand::Sell { rarity, quantity } => {
            serde_json::to_value(engine.sell_petals(SellOrder { rarity, quantity })?)?
        }
        IpcCommand::Preview { price } => serde_json::to_value(UiPreview {
            price,
            distribution: engine.pack_preview(price),
        })?,
        IpcCommand::Quit => serde_json::Value::Null,
    };
    Ok(value)
}

fn error_reply(e: &GameError) -> serde_json::Value {
    serde_json::json!({
        "error": e.to_string(),
        "kind":  format!("{:?}", e.kind()),
    })
}

fn build_ui_state(engine: &GardenEngine) -> Result<UiState, GameError> {
    let now = engine.now();
    let state = engine.state()?;
    Ok(UiState {
        now,
        free_slots: state.garden.free_slots(engine.config().garden.max_slots),
        garden: engine.garden_state_at(now)?,
        player: state.player,
        seeds: state.inventory.seeds,
    })
}

fn print_summary(engine: &GardenEngine) -> Result<()> {
    let stats = engine.stats()?;
    let player = &stats.player;
    let since = chrono::DateTime::from_timestamp(player.created_at, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| player.created_at.to_string());

    println!("=== PROFILE SUMMARY ===");
    println!("  profile:        {}", engine.profile_id);
    println!("  playing since:  {since}");
    println!("  gold:           {}", player.gold);
    println!("  petals:         {}", player.total_petals());
    println!("  best rarity:    {}", player.stats.best_rarity);
    println!("  packs bought:   {}", player.stats.total_packs_bought);
    println!("  seeds held:     {}", stats.seeds_count);
    println!("  harvested:      {}", stats.total_harvested_plants);

    println!();
    println!("=== GARDEN ===");
    let garden = engine.garden_state()?;
    if garden.is_empty() {
        println!("  (No plants growing)");
    }
    for view in &garden {
        println!(
            "  slot {} | {} [{}] | {:.1}% | {}",
            view.plant.slot,
            view.visual.name,
            view.plant.rarity,
            view.growth.percent,
            view.growth.remaining_label
        );
    }
    Ok(())
}

fn parse_str<'a>(args: &'a [String], flag: &str, default: &'a str) -> &'a str {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
        .unwrap_or(default)
}
