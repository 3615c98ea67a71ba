use std::cell::RefCell;
use std::rc::Rc;

use bomb_catch::audio::{SoundEffect, SoundPlayer, effective_volume};
use bomb_catch::consts::SIM_DT;
use bomb_catch::persistence::MemoryStore;
use bomb_catch::services::{QueuedUi, ScoreStore, UiEvent};
use bomb_catch::sim::{BombId, RoundPhase};
use bomb_catch::{Game, GameConfig, Settings, StoreError};

#[derive(Clone, Default)]
struct RecordingSound(Rc<RefCell<Vec<SoundEffect>>>);

impl RecordingSound {
    fn count(&self, effect: SoundEffect) -> usize {
        self.0.borrow().iter().filter(|e| **e == effect).count()
    }
}

impl SoundPlayer for RecordingSound {
    fn play(&mut self, effect: SoundEffect) {
        self.0.borrow_mut().push(effect);
    }
}

/// Store that counts writes and can be told to fail
#[derive(Clone, Default)]
struct SharedStore {
    inner: Rc<RefCell<MemoryStore>>,
    writes: Rc<RefCell<Vec<u32>>>,
    broken: bool,
}

impl ScoreStore for SharedStore {
    fn record_score(&mut self, score: u32) -> Result<Option<usize>, StoreError> {
        self.writes.borrow_mut().push(score);
        if self.broken {
            return Err(StoreError::Unavailable("test"));
        }
        self.inner.borrow_mut().record_score(score)
    }

    fn read_top_scores(&self, limit: usize) -> Result<Vec<u32>, StoreError> {
        if self.broken {
            return Err(StoreError::Unavailable("test"));
        }
        self.inner.borrow().read_top_scores(limit)
    }
}

struct Harness {
    game: Game,
    ui: QueuedUi,
    sound: RecordingSound,
    store: SharedStore,
}

fn harness(config: GameConfig, store: SharedStore) -> Harness {
    let ui = QueuedUi::new();
    let sound = RecordingSound::default();
    let game = Game::new(
        config,
        2024,
        Box::new(sound.clone()),
        Box::new(ui.clone()),
        Box::new(store.clone()),
    )
    .unwrap();
    Harness {
        game,
        ui,
        sound,
        store,
    }
}

/// Lots of fast bombs and a single life
fn quick_config() -> GameConfig {
    GameConfig {
        initial_lives: 1,
        initial_spawn_rate: 5.0,
        max_spawn_rate: 5.0,
        initial_fall_speed: 400.0,
        max_fall_speed: 400.0,
        ..Default::default()
    }
}

fn run_until_spawn(h: &mut Harness) -> BombId {
    for _ in 0..600 {
        h.game.frame(1.0 / 60.0);
        if let Some(bomb) = h.game.round().bombs().iter().find(|b| b.is_falling()) {
            return bomb.id;
        }
    }
    panic!("no bomb spawned");
}

fn run_until_over(h: &mut Harness) {
    for _ in 0..60 * 60 {
        if h.game.phase() == RoundPhase::GameOver {
            return;
        }
        h.game.frame(1.0 / 60.0);
    }
    panic!("round never ended");
}

#[test]
fn start_requires_preparation() {
    let mut h = harness(GameConfig::default(), SharedStore::default());
    assert!(!h.game.start());
    assert_eq!(h.game.phase(), RoundPhase::Ready);

    h.game.mark_prepared();
    assert!(h.game.start());
    assert_eq!(h.game.phase(), RoundPhase::Playing);

    let events = h.ui.take();
    assert!(events.contains(&UiEvent::Phase { phase: "playing" }));
    assert!(events.contains(&UiEvent::Score { score: 0 }));
    assert!(events.contains(&UiEvent::Lives { lives: 9 }));
}

#[test]
fn catch_reaches_ui_and_sound() {
    let mut h = harness(GameConfig::default(), SharedStore::default());
    h.game.mark_prepared();
    h.game.start();

    let id = run_until_spawn(&mut h);
    assert!(
        h.ui.take()
            .iter()
            .any(|e| matches!(e, UiEvent::Spawned { id: spawned, .. } if *spawned == id))
    );

    assert!(h.game.pointer_down(id));
    assert!(!h.game.pointer_down(id));
    assert_eq!(h.game.round().score(), 1);
    assert_eq!(h.sound.count(SoundEffect::Catch), 1);

    let events = h.ui.take();
    assert!(events.contains(&UiEvent::Caught { id }));
    assert!(events.contains(&UiEvent::Score { score: 1 }));

    // Catch animation plays out and the view is told to drop the sprite
    for _ in 0..60 {
        h.game.frame(1.0 / 60.0);
    }
    assert!(h.game.round().bomb(id).is_none());
    assert!(h.ui.take().contains(&UiEvent::Removed { id }));
}

#[test]
fn round_over_records_score_once() {
    let mut h = harness(quick_config(), SharedStore::default());
    h.game.mark_prepared();
    h.game.start();

    let id = run_until_spawn(&mut h);
    h.game.pointer_down(id);
    run_until_over(&mut h);

    // Keep the clock running well past the end
    for _ in 0..600 {
        h.game.frame(1.0 / 60.0);
    }

    assert_eq!(*h.store.writes.borrow(), vec![1]);
    assert_eq!(h.sound.count(SoundEffect::GameOver), 1);
    assert_eq!(h.sound.count(SoundEffect::HighScore), 1);
    let over: Vec<_> = h
        .ui
        .take()
        .into_iter()
        .filter(|e| matches!(e, UiEvent::RoundOver { .. }))
        .collect();
    assert_eq!(over, vec![UiEvent::RoundOver { final_score: 1 }]);
    assert_eq!(h.game.top_scores(5), vec![1]);
    assert!(h.game.round().bombs().is_empty());
}

#[test]
fn restart_after_game_over_is_fresh() {
    let mut h = harness(quick_config(), SharedStore::default());
    h.game.mark_prepared();
    h.game.start();
    let id = run_until_spawn(&mut h);
    h.game.pointer_down(id);
    run_until_over(&mut h);

    assert!(h.game.start());
    let round = h.game.round();
    assert_eq!(round.score(), 0);
    assert_eq!(round.lives(), 1);
    assert_eq!(round.catches(), 0);
    assert_eq!(round.difficulty().fall_speed, 400.0);
    assert!(round.bombs().is_empty());

    run_until_over(&mut h);
    assert_eq!(*h.store.writes.borrow(), vec![1, 0]);
}

#[test]
fn broken_store_does_not_stop_play() {
    let store = SharedStore {
        broken: true,
        ..Default::default()
    };
    let mut h = harness(quick_config(), store);
    h.game.mark_prepared();
    h.game.start();
    run_until_over(&mut h);

    assert_eq!(h.store.writes.borrow().len(), 1);
    assert!(h.game.top_scores(5).is_empty());
    assert!(h.game.start());
    assert_eq!(h.game.phase(), RoundPhase::Playing);
}

#[test]
fn leaderboard_keeps_best_five_across_rounds() {
    let store = SharedStore::default();
    for s in [10, 30, 20] {
        store.inner.borrow_mut().record_score(s).unwrap();
    }
    let h = harness(GameConfig::default(), store.clone());
    assert_eq!(h.game.top_scores(5), vec![30, 20, 10]);

    for s in [50, 40, 5] {
        store.inner.borrow_mut().record_score(s).unwrap();
    }
    assert_eq!(h.game.top_scores(5), vec![50, 40, 30, 20, 10]);
}

#[test]
fn frame_rate_does_not_change_simulation() {
    let mut fast = harness(GameConfig::default(), SharedStore::default());
    let mut slow = harness(GameConfig::default(), SharedStore::default());
    for h in [&mut fast, &mut slow] {
        h.game.mark_prepared();
        h.game.start();
    }

    // 9 seconds at 120 Hz vs 60 Hz display frames
    for _ in 0..1080 {
        fast.game.frame(SIM_DT);
    }
    for _ in 0..540 {
        slow.game.frame(SIM_DT * 2.0);
    }

    assert_eq!(fast.game.round().score(), slow.game.round().score());
    assert_eq!(fast.game.round().lives(), slow.game.round().lives());
    let a = fast.game.round().bombs();
    let b = slow.game.round().bombs();
    assert!(!a.is_empty());
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b) {
        assert_eq!(x.id, y.id);
        assert_eq!(x.pos, y.pos);
    }
}

#[test]
fn slow_display_keeps_real_time() {
    let mut reference = harness(GameConfig::default(), SharedStore::default());
    let mut slow = harness(GameConfig::default(), SharedStore::default());
    for h in [&mut reference, &mut slow] {
        h.game.mark_prepared();
        h.game.start();
    }

    // 3 seconds at 120 Hz vs 14 fps; the first bomb spawns at 2 s
    for _ in 0..360 {
        reference.game.frame(SIM_DT);
    }
    for _ in 0..42 {
        slow.game.frame(1.0 / 14.0);
    }

    let a = reference.game.round().bombs();
    let b = slow.game.round().bombs();
    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 1);
    // Within one simulation step of travel
    let step = reference.game.round().difficulty().fall_speed * SIM_DT;
    assert!((a[0].pos.y - b[0].pos.y).abs() <= step + 1e-3);
}

#[test]
fn pause_freezes_round() {
    let mut h = harness(GameConfig::default(), SharedStore::default());
    h.game.mark_prepared();
    h.game.start();
    let id = run_until_spawn(&mut h);
    let before = h.game.round().bomb(id).unwrap().pos;

    h.game.pause();
    for _ in 0..120 {
        h.game.frame(1.0 / 60.0);
    }
    assert!(!h.game.pointer_down(id));
    assert_eq!(h.game.round().bomb(id).unwrap().pos, before);
    assert!(h.ui.take().contains(&UiEvent::Phase { phase: "paused" }));

    h.game.resume();
    h.game.frame(1.0 / 60.0);
    assert!(h.game.round().bomb(id).unwrap().pos.y > before.y);
}

#[test]
fn stop_discards_round_without_recording() {
    let mut h = harness(GameConfig::default(), SharedStore::default());
    h.game.mark_prepared();
    h.game.start();
    let id = run_until_spawn(&mut h);
    h.game.stop();

    assert_eq!(h.game.phase(), RoundPhase::Ready);
    assert!(h.game.round().bombs().is_empty());
    assert!(h.store.writes.borrow().is_empty());
    assert!(h.ui.take().contains(&UiEvent::Removed { id }));

    // Late callback for the discarded bomb
    h.game.finish_animation(id);
    assert!(h.ui.take().is_empty());
}

#[test]
fn settings_reach_sound_player() {
    #[derive(Clone, Default)]
    struct VolumeProbe(Rc<RefCell<Vec<f32>>>);

    impl SoundPlayer for VolumeProbe {
        fn play(&mut self, _effect: SoundEffect) {}

        fn apply_settings(&mut self, settings: &Settings) {
            self.0.borrow_mut().push(effective_volume(settings));
        }
    }

    let probe = VolumeProbe::default();
    let mut game = Game::new(
        GameConfig::default(),
        7,
        Box::new(probe.clone()),
        Box::new(QueuedUi::new()),
        Box::new(MemoryStore::new(5)),
    )
    .unwrap();

    let mut settings = Settings::default();
    settings.muted = true;
    game.apply_settings(&settings);
    settings.muted = false;
    settings.set_master_volume(0.5);
    game.apply_settings(&settings);

    assert_eq!(*probe.0.borrow(), vec![0.0, 0.5]);
}
