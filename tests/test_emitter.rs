use rand::rngs::StdRng;
use rand::SeedableRng;
use star_shooter::config::{EmitterSettings, EnemyTemplate};
use star_shooter::emitter::EnemyEmitter;
use star_shooter::math::{world_bounds, Rect};
use star_shooter::pools::EnemyPool;
use star_shooter::sprite::Resizable;
use star_shooter::sprites::EnemyKind;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn world() -> Rect {
    world_bounds(1.0, 1.0)
}

fn fixed_interval(interval: f32) -> EmitterSettings {
    EmitterSettings {
        interval_min: interval,
        interval_max: interval,
        ..EmitterSettings::default()
    }
}

fn make_emitter(settings: EmitterSettings) -> EnemyEmitter {
    let mut emitter = EnemyEmitter::new(settings);
    emitter.resize(&world());
    emitter
}

fn only(kind: EnemyKind) -> Vec<EnemyTemplate> {
    EmitterSettings::default()
        .templates
        .into_iter()
        .filter(|t| t.kind == kind)
        .collect()
}

// ── Timing ────────────────────────────────────────────────────────────────────

#[test]
fn spawns_once_interval_elapses_and_carries_remainder() {
    let mut emitter = make_emitter(fixed_interval(1.0));
    let mut enemies = EnemyPool::new();
    let mut rng = seeded_rng();

    assert!(emitter.generate(0.4, 0, &mut enemies, &mut rng).is_none());
    assert!(emitter.generate(0.4, 0, &mut enemies, &mut rng).is_none());
    assert!(emitter.generate(0.4, 0, &mut enemies, &mut rng).is_some());

    assert_eq!(enemies.active_len(), 1);
    assert!((emitter.timer() - 0.2).abs() < 1e-5, "timer = {}", emitter.timer());
}

#[test]
fn spawns_at_most_one_enemy_per_call() {
    let mut emitter = make_emitter(fixed_interval(1.0));
    let mut enemies = EnemyPool::new();
    let mut rng = seeded_rng();

    assert!(emitter.generate(3.5, 0, &mut enemies, &mut rng).is_some());
    assert_eq!(enemies.active_len(), 1);
    assert!((emitter.timer() - 2.5).abs() < 1e-5);

    // The backlog drains one spawn per call.
    assert!(emitter.generate(0.0, 0, &mut enemies, &mut rng).is_some());
    assert!(emitter.generate(0.0, 0, &mut enemies, &mut rng).is_some());
    assert!(emitter.generate(0.0, 0, &mut enemies, &mut rng).is_none());
    assert_eq!(enemies.active_len(), 3);
}

#[test]
fn first_spawn_waits_for_longest_interval() {
    let settings = EmitterSettings {
        interval_min: 1.0,
        interval_max: 2.0,
        ..EmitterSettings::default()
    };
    let mut emitter = make_emitter(settings);
    let mut enemies = EnemyPool::new();
    let mut rng = seeded_rng();

    assert_eq!(emitter.interval(), 2.0);
    assert!(emitter.generate(1.9, 0, &mut enemies, &mut rng).is_none());
    assert!(emitter.generate(0.2, 0, &mut enemies, &mut rng).is_some());
}

#[test]
fn next_interval_is_drawn_from_range() {
    let settings = EmitterSettings {
        interval_min: 2.0,
        interval_max: 3.0,
        ..EmitterSettings::default()
    };
    let mut emitter = make_emitter(settings);
    let mut enemies = EnemyPool::new();
    let mut rng = seeded_rng();

    for _ in 0..20 {
        emitter.generate(3.0, 0, &mut enemies, &mut rng);
        let interval = emitter.interval();
        assert!((2.0..=3.0).contains(&interval), "interval = {interval}");
    }
}

// ── Level ─────────────────────────────────────────────────────────────────────

#[test]
fn level_follows_frags() {
    let mut emitter = make_emitter(EmitterSettings::default());
    let mut enemies = EnemyPool::new();
    let mut rng = seeded_rng();

    for (frags, level) in [(0, 1), (9, 1), (10, 2), (25, 3)] {
        emitter.generate(0.0, frags, &mut enemies, &mut rng);
        assert_eq!(emitter.level(), level, "frags = {frags}");
    }
}

#[test]
fn zero_frags_per_level_stays_on_first_level() {
    let settings = EmitterSettings {
        frags_per_level: 0,
        ..EmitterSettings::default()
    };
    let mut emitter = make_emitter(settings);
    let mut enemies = EnemyPool::new();
    let mut rng = seeded_rng();

    emitter.generate(0.1, 0, &mut enemies, &mut rng);
    assert_eq!(emitter.level(), 1);
    emitter.generate(0.1, 50, &mut enemies, &mut rng);
    assert_eq!(emitter.level(), 1);
}

#[test]
fn bullet_damage_scales_with_level() {
    let settings = EmitterSettings {
        templates: only(EnemyKind::Medium),
        ..fixed_interval(1.0)
    };
    let mut emitter = make_emitter(settings);
    let mut enemies = EnemyPool::new();
    let mut rng = seeded_rng();

    let h = emitter.generate(1.0, 20, &mut enemies, &mut rng).unwrap();
    let enemy = enemies.get(h).unwrap();
    assert_eq!(emitter.level(), 3);
    assert_eq!(enemy.bullet_damage(), 5 * 3);
    // Ramming damage does not scale.
    assert_eq!(enemy.contact_damage(), 5);
}

// ── Placement ─────────────────────────────────────────────────────────────────

#[test]
fn spawned_enemies_are_fully_inside_horizontally_and_above_top() {
    let mut emitter = make_emitter(fixed_interval(1.0));
    let mut enemies = EnemyPool::new();
    let mut rng = seeded_rng();
    let w = world();

    for _ in 0..50 {
        emitter.generate(1.0, 0, &mut enemies, &mut rng);
    }
    assert_eq!(enemies.active_len(), 50);
    for (_, enemy) in enemies.active_objects() {
        let r = enemy.rect();
        assert!(r.left() >= w.left() - 1e-5, "left = {}", r.left());
        assert!(r.right() <= w.right() + 1e-5, "right = {}", r.right());
        assert!((r.bottom() - w.top()).abs() < 1e-5);
        assert!(!enemy.is_entered());
    }
}

#[test]
fn zero_weight_templates_are_never_picked() {
    let mut templates = EmitterSettings::default().templates;
    for t in &mut templates {
        if t.kind != EnemyKind::Big {
            t.weight = 0.0;
        }
    }
    let settings = EmitterSettings {
        templates,
        ..fixed_interval(1.0)
    };
    let mut emitter = make_emitter(settings);
    let mut enemies = EnemyPool::new();
    let mut rng = seeded_rng();

    for _ in 0..20 {
        emitter.generate(1.0, 0, &mut enemies, &mut rng);
    }
    assert!(enemies
        .active_objects()
        .all(|(_, e)| e.kind() == EnemyKind::Big));
}

#[test]
fn spawned_enemy_takes_template_stats() {
    let settings = EmitterSettings {
        templates: only(EnemyKind::Small),
        ..fixed_interval(1.0)
    };
    let mut emitter = make_emitter(settings);
    let mut enemies = EnemyPool::new();
    let mut rng = seeded_rng();

    let h = emitter.generate(1.0, 0, &mut enemies, &mut rng).unwrap();
    let enemy = enemies.get(h).unwrap();
    assert_eq!(enemy.kind(), EnemyKind::Small);
    assert_eq!(enemy.hp(), 1);
    assert!((enemy.rect().height() - 0.1).abs() < 1e-6);
    assert!((enemy.rect().width() - 0.08).abs() < 1e-6);
}

// ── Reset ─────────────────────────────────────────────────────────────────────

#[test]
fn reset_restarts_schedule_and_level() {
    let settings = EmitterSettings {
        interval_min: 1.0,
        interval_max: 2.0,
        ..EmitterSettings::default()
    };
    let mut emitter = make_emitter(settings);
    let mut enemies = EnemyPool::new();
    let mut rng = seeded_rng();

    emitter.generate(2.5, 30, &mut enemies, &mut rng);
    emitter.reset();

    assert_eq!(emitter.timer(), 0.0);
    assert_eq!(emitter.interval(), 2.0);
    assert_eq!(emitter.level(), 1);
}
