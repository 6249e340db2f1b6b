//! Headless симуляция encounter
//!
//! Запускает scripted encounter без рендера: игрок в центре, враги по кругу.
//! Usage: brawler_simulation [seed] [enemy_count]
//! Уровень логов: BRAWLER_LOG=debug|info|warn|error (по умолчанию info)

use brawler_simulation::scripted::ScriptedEncounter;
use brawler_simulation::logger::{init_logger, log_error, set_log_level, LogLevel};
use brawler_simulation::{CombatConfig, Combatant, EnergyMeter, DEFAULT_SEED};

const DT: f32 = 1.0 / 60.0;
const MAX_TICKS: u64 = 60 * 180;

fn main() {
    init_logger();
    let level = std::env::var("BRAWLER_LOG")
        .ok()
        .and_then(|name| LogLevel::parse(&name))
        .unwrap_or(LogLevel::Info);
    set_log_level(level);

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(DEFAULT_SEED);
    let enemy_count = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(3);
    println!("Starting brawler headless simulation (seed: {}, enemies: {})", seed, enemy_count);

    let mut encounter = match ScriptedEncounter::new(seed, enemy_count, CombatConfig::default()) {
        Ok(encounter) => encounter,
        Err(error) => {
            log_error(&format!("❌ Failed to set up encounter: {}", error));
            std::process::exit(1);
        }
    };

    while encounter.stats.ticks < MAX_TICKS && !encounter.is_finished() {
        encounter.step(DT);

        if encounter.stats.ticks % 600 == 0 {
            let world = encounter.app.world();
            let energy = world.get::<EnergyMeter>(encounter.player).map_or(0.0, EnergyMeter::value);
            let alive = encounter
                .enemies
                .iter()
                .filter(|&&enemy| world.get::<Combatant>(enemy).is_some_and(|combatant| !combatant.is_dead))
                .count();
            println!(
                "Tick {}: energy {:.1}, enemies alive {}/{}",
                encounter.stats.ticks,
                energy,
                alive,
                encounter.enemies.len()
            );
        }
    }

    println!("Simulation complete! {:?}", encounter.stats);
}
