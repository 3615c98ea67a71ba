//! Bomb Catch entry point
//!
//! The browser build is driven from JS through `platform::WebGame`. Natively
//! this runs one headless round with an autopilot doing the clicking, records
//! the result in a JSON leaderboard and prints the table.
//!
//! Usage: `bomb-catch [--config tuning.json] [--scores scores.json] [--seed N]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::collections::HashSet;
    use std::fs;
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result, anyhow};
    use clap::Parser;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use bomb_catch::audio::SilentAudio;
    use bomb_catch::persistence::FileStore;
    use bomb_catch::services::LogUi;
    use bomb_catch::sim::{BombId, RoundPhase};
    use bomb_catch::{Game, GameConfig, platform};

    /// Display frame length the autopilot runs at
    const FRAME_DT: f32 = 1.0 / 60.0;

    #[derive(Parser, Debug)]
    #[command(name = "bomb-catch")]
    #[command(about = "Play one headless Bomb Catch round with an autopilot")]
    pub struct Cli {
        /// JSON file overriding any of the gameplay tuning values
        #[arg(long)]
        config: Option<PathBuf>,
        /// Leaderboard file
        #[arg(long, default_value = "bomb_catch_scores.json")]
        scores: PathBuf,
        /// Round seed (defaults to the wall clock)
        #[arg(long)]
        seed: Option<u64>,
        /// Give up on a round after this many frames (ten minutes at 60 fps)
        #[arg(long, default_value_t = 36_000)]
        max_frames: u32,
    }

    /// Idle-mode player: looks at each bomb once it is halfway down and
    /// decides whether it "reacts" in time. Faster bombs are missed more.
    struct Autopilot {
        rng: Pcg32,
        judged: HashSet<BombId>,
    }

    impl Autopilot {
        fn new(seed: u64) -> Self {
            Self {
                rng: Pcg32::seed_from_u64(seed ^ 0xA5A5_A5A5),
                judged: HashSet::new(),
            }
        }

        fn pick_targets(&mut self, game: &Game) -> Vec<BombId> {
            let round = game.round();
            let config = round.config();
            let reaction_line = config.floor_y * 0.5;
            let skill = 1.0 - round.difficulty().fall_speed / (2.0 * config.max_fall_speed);

            let mut targets = Vec::new();
            for bomb in round.bombs() {
                if !bomb.is_falling() || bomb.pos.y < reaction_line {
                    continue;
                }
                if self.judged.insert(bomb.id) && self.rng.random::<f32>() < skill {
                    targets.push(bomb.id);
                }
            }
            targets
        }
    }

    fn load_config(path: Option<&Path>) -> Result<GameConfig> {
        let Some(path) = path else {
            return Ok(GameConfig::default());
        };
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed reading config {}", path.display()))?;
        GameConfig::from_json(&json)
            .with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn run(cli: Cli) -> Result<()> {
        if cli.max_frames == 0 {
            return Err(anyhow!("max_frames must be > 0"));
        }

        let config = load_config(cli.config.as_deref())?;
        let seed = cli.seed.unwrap_or_else(platform::clock_seed);
        let store = FileStore::new(&cli.scores, config.max_high_scores);
        let limit = config.max_high_scores;
        let mut game = Game::new(
            config,
            seed,
            Box::new(SilentAudio),
            Box::new(LogUi),
            Box::new(store),
        )
        .context("failed building game")?;
        log::info!("Game initialized with seed: {}", seed);

        // Nothing to load headless
        game.mark_prepared();
        game.start();

        let mut pilot = Autopilot::new(seed);
        let mut frames = 0;
        while game.phase() == RoundPhase::Playing && frames < cli.max_frames {
            for id in pilot.pick_targets(&game) {
                game.pointer_down(id);
            }
            game.frame(FRAME_DT);
            frames += 1;
        }
        if game.phase() == RoundPhase::Playing {
            log::warn!("Round still running after {} frames, stopping", frames);
            game.stop();
        }

        println!(
            "\nFinal score: {} ({:.1}s played, seed {})",
            game.round().score(),
            frames as f32 * FRAME_DT,
            seed
        );
        println!("High scores ({}):", cli.scores.display());
        for (rank, score) in game.top_scores(limit).iter().enumerate() {
            println!("  {}. {}", rank + 1, score);
        }
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::ffi::OsStr;

        use bomb_catch::ConfigError;
        use tempfile::TempDir;

        #[test]
        fn test_cli_defaults() {
            let cli = Cli::parse_from(["bomb-catch"]);
            assert!(cli.config.is_none());
            assert_eq!(cli.scores, PathBuf::from("bomb_catch_scores.json"));
            assert!(cli.seed.is_none());
            assert_eq!(cli.max_frames, 36_000);
        }

        #[test]
        fn test_cli_overrides() {
            let cli = Cli::parse_from([
                "bomb-catch",
                "--config",
                "fast.json",
                "--scores",
                "out/scores.json",
                "--seed",
                "42",
            ]);
            assert_eq!(cli.config, Some(PathBuf::from("fast.json")));
            assert_eq!(cli.scores, PathBuf::from("out/scores.json"));
            assert_eq!(cli.seed, Some(42));
        }

        #[test]
        fn test_bad_config_keeps_typed_source() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("tuning.json");
            fs::write(&path, r#"{ "initial_lives": 0 }"#).unwrap();

            let err = load_config(Some(&path)).unwrap_err();
            assert!(err.to_string().starts_with("invalid config"));
            assert!(matches!(
                err.downcast_ref::<ConfigError>(),
                Some(ConfigError::InvalidValue { .. })
            ));
        }

        #[test]
        fn test_missing_config_is_an_error() {
            let dir = TempDir::new().unwrap();
            let err = load_config(Some(&dir.path().join("nope.json"))).unwrap_err();
            assert!(err.to_string().starts_with("failed reading config"));
        }

        #[test]
        fn test_seeded_run_records_score() {
            let dir = TempDir::new().unwrap();
            let scores = dir.path().join("scores.json");
            let cli = Cli::parse_from([
                OsStr::new("bomb-catch"),
                OsStr::new("--seed"),
                OsStr::new("7"),
                OsStr::new("--scores"),
                scores.as_os_str(),
            ]);
            run(cli).unwrap();
            let store = FileStore::new(&scores, 5);
            assert!(store.load().is_ok());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Bomb Catch (native) starting...");
    native::run(native::Cli::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::WebGame, this is just to satisfy the compiler
}
