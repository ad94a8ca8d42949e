use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use star_shooter::config::{EmitterSettings, EnemyTemplate};
use star_shooter::engine::{Audio, Region, Silence, Sound};
use star_shooter::pool::Handle;
use star_shooter::sprite::Destroyable;
use star_shooter::sprites::{EnemyKind, Gun, Owner};
use star_shooter::{GameConfig, GameScreen, ScreenState};

fn make_screen() -> GameScreen {
    GameScreen::new(GameConfig::default(), Box::new(Silence)).unwrap()
}

fn template(kind: EnemyKind) -> EnemyTemplate {
    EmitterSettings::default()
        .templates
        .into_iter()
        .find(|t| t.kind == kind)
        .unwrap()
}

/// Put an enemy of `kind` straight at `pos`, skipping its entry glide.
fn place_enemy(screen: &mut GameScreen, kind: EnemyKind, pos: Vec2) -> Handle {
    let t = template(kind);
    let world = *screen.world_bounds();
    let (handle, enemy) = screen.enemies_mut().obtain();
    enemy.set(&t, t.damage, pos.x, &world);
    enemy.set_pos(pos);
    handle
}

fn place_bullet(screen: &mut GameScreen, owner: Owner, pos: Vec2, damage: i32) -> Handle {
    let region = match owner {
        Owner::MainShip => Region::BulletMainShip,
        Owner::Enemy(_) => Region::BulletEnemy,
    };
    let gun = Gun {
        region,
        v: Vec2::ZERO,
        height: 0.01,
        damage,
        sound: Sound::Bullet,
    };
    let world = *screen.world_bounds();
    screen.bullets_mut().fire(owner, &gun, pos, &world)
}

/// A point inside the lower half of the main ship's hull.
fn ship_lower_half(screen: &GameScreen) -> Vec2 {
    let rect = screen.main_ship().rect();
    Vec2::new(rect.pos.x, rect.pos.y - rect.half_height / 2.0)
}

// ── Ship vs enemy ─────────────────────────────────────────────────────────────

#[test]
fn contact_destroys_enemy_and_deals_double_damage() {
    let mut screen = make_screen();
    let ship_pos = screen.main_ship().pos();
    let e = place_enemy(&mut screen, EnemyKind::Medium, ship_pos);

    screen.check_collisions();

    assert!(screen.enemies().get(e).unwrap().is_destroyed());
    assert_eq!(screen.main_ship().hp(), 100 - 2 * 5);
    // Ramming is not a frag.
    assert_eq!(screen.frags(), 0);
}

#[test]
fn contact_uses_centre_distance() {
    let mut screen = make_screen();
    let ship_pos = screen.main_ship().pos();
    let reach = template(EnemyKind::Small).half_width() + screen.main_ship().half_width();

    let near = place_enemy(&mut screen, EnemyKind::Small, ship_pos + Vec2::new(reach * 0.9, 0.0));
    let far = place_enemy(&mut screen, EnemyKind::Small, ship_pos - Vec2::new(reach * 1.1, 0.0));
    screen.check_collisions();

    assert!(screen.enemies().get(near).unwrap().is_destroyed());
    assert!(!screen.enemies().get(far).unwrap().is_destroyed());
    assert_eq!(screen.main_ship().hp(), 98);
}

#[test]
fn destroyed_enemy_cannot_ram() {
    let mut screen = make_screen();
    let ship_pos = screen.main_ship().pos();
    let e = place_enemy(&mut screen, EnemyKind::Big, ship_pos);
    screen.enemies_mut().get_mut(e).unwrap().destroy();

    screen.check_collisions();
    assert_eq!(screen.main_ship().hp(), 100);
}

// ── Main-ship bullets ─────────────────────────────────────────────────────────

#[test]
fn player_bullet_hits_upper_half_of_enemy() {
    let mut screen = make_screen();
    let e = place_enemy(&mut screen, EnemyKind::Medium, Vec2::new(0.2, 0.2));
    let b = place_bullet(&mut screen, Owner::MainShip, Vec2::new(0.2, 0.25), 1);

    screen.check_collisions();

    let enemy = screen.enemies().get(e).unwrap();
    assert_eq!(enemy.hp(), 4);
    assert!(!enemy.is_destroyed());
    assert!(screen.bullets().get(b).unwrap().is_destroyed());
}

#[test]
fn player_bullet_misses_lower_half_of_enemy() {
    let mut screen = make_screen();
    let e = place_enemy(&mut screen, EnemyKind::Medium, Vec2::new(0.2, 0.2));
    let b = place_bullet(&mut screen, Owner::MainShip, Vec2::new(0.2, 0.15), 1);

    screen.check_collisions();

    assert_eq!(screen.enemies().get(e).unwrap().hp(), 5);
    assert!(!screen.bullets().get(b).unwrap().is_destroyed());
}

#[test]
fn player_bullet_misses_enemy_to_the_side() {
    let mut screen = make_screen();
    let e = place_enemy(&mut screen, EnemyKind::Medium, Vec2::new(0.2, 0.2));
    place_bullet(&mut screen, Owner::MainShip, Vec2::new(0.3, 0.25), 1);

    screen.check_collisions();
    assert_eq!(screen.enemies().get(e).unwrap().hp(), 5);
}

#[test]
fn killing_blow_counts_a_frag() {
    let mut screen = make_screen();
    let e = place_enemy(&mut screen, EnemyKind::Small, Vec2::new(-0.2, 0.3));
    place_bullet(&mut screen, Owner::MainShip, Vec2::new(-0.2, 0.32), 1);

    screen.check_collisions();

    assert!(screen.enemies().get(e).unwrap().is_destroyed());
    assert_eq!(screen.frags(), 1);
}

#[test]
fn one_player_bullet_damages_every_overlapping_enemy() {
    let mut screen = make_screen();
    let a = place_enemy(&mut screen, EnemyKind::Medium, Vec2::new(0.2, 0.2));
    let b = place_enemy(&mut screen, EnemyKind::Medium, Vec2::new(0.21, 0.2));
    let bullet = place_bullet(&mut screen, Owner::MainShip, Vec2::new(0.205, 0.25), 2);

    screen.check_collisions();

    assert_eq!(screen.enemies().get(a).unwrap().hp(), 3);
    assert_eq!(screen.enemies().get(b).unwrap().hp(), 3);
    assert!(screen.bullets().get(bullet).unwrap().is_destroyed());
}

#[test]
fn destroyed_player_bullet_is_inert() {
    let mut screen = make_screen();
    let e = place_enemy(&mut screen, EnemyKind::Medium, Vec2::new(0.2, 0.2));
    let b = place_bullet(&mut screen, Owner::MainShip, Vec2::new(0.2, 0.25), 1);
    screen.bullets_mut().get_mut(b).unwrap().destroy();

    screen.check_collisions();
    assert_eq!(screen.enemies().get(e).unwrap().hp(), 5);
}

#[test]
fn player_bullet_never_hurts_main_ship() {
    let mut screen = make_screen();
    let pos = ship_lower_half(&screen);
    let b = place_bullet(&mut screen, Owner::MainShip, pos, 50);

    screen.check_collisions();

    assert_eq!(screen.main_ship().hp(), 100);
    assert!(!screen.bullets().get(b).unwrap().is_destroyed());
}

// ── Enemy bullets ─────────────────────────────────────────────────────────────

#[test]
fn enemy_bullet_hits_lower_half_of_main_ship() {
    let mut screen = make_screen();
    let shooter = place_enemy(&mut screen, EnemyKind::Small, Vec2::new(0.3, 0.3));
    let pos = ship_lower_half(&screen);
    let b = place_bullet(&mut screen, Owner::Enemy(shooter), pos, 7);

    screen.check_collisions();

    assert_eq!(screen.main_ship().hp(), 93);
    assert!(screen.bullets().get(b).unwrap().is_destroyed());
}

#[test]
fn enemy_bullet_misses_upper_half_of_main_ship() {
    let mut screen = make_screen();
    let shooter = place_enemy(&mut screen, EnemyKind::Small, Vec2::new(0.3, 0.3));
    let rect = *screen.main_ship().rect();
    let pos = Vec2::new(rect.pos.x, rect.pos.y + rect.half_height / 2.0);
    let b = place_bullet(&mut screen, Owner::Enemy(shooter), pos, 7);

    screen.check_collisions();

    assert_eq!(screen.main_ship().hp(), 100);
    assert!(!screen.bullets().get(b).unwrap().is_destroyed());
}

#[test]
fn enemy_bullet_never_hurts_enemies() {
    let mut screen = make_screen();
    let e = place_enemy(&mut screen, EnemyKind::Medium, Vec2::new(0.2, 0.2));
    let b = place_bullet(&mut screen, Owner::Enemy(e), Vec2::new(0.2, 0.25), 3);

    screen.check_collisions();

    assert_eq!(screen.enemies().get(e).unwrap().hp(), 5);
    assert!(!screen.bullets().get(b).unwrap().is_destroyed());
}

// ── Destruction side effects ──────────────────────────────────────────────────

#[derive(Default)]
struct AudioLog {
    played: Vec<Sound>,
}

struct RecordingAudio(Rc<RefCell<AudioLog>>);

impl Audio for RecordingAudio {
    fn play(&mut self, sound: Sound) {
        self.0.borrow_mut().played.push(sound);
    }
}

#[test]
fn destroyed_enemy_explodes_exactly_once() {
    let log = Rc::new(RefCell::new(AudioLog::default()));
    let mut screen =
        GameScreen::new(GameConfig::default(), Box::new(RecordingAudio(log.clone()))).unwrap();
    let e = place_enemy(&mut screen, EnemyKind::Medium, Vec2::new(0.2, 0.2));

    assert!(screen.enemies_mut().get_mut(e).unwrap().destroy());
    assert!(!screen.enemies_mut().get_mut(e).unwrap().destroy());

    screen.free_all_destroyed();
    screen.free_all_destroyed();

    assert_eq!(screen.enemies().active_len(), 0);
    assert_eq!(screen.explosions().active_len(), 1);
    let (_, explosion) = screen.explosions().active_objects().next().unwrap();
    assert_eq!(explosion.pos(), Vec2::new(0.2, 0.2));
    assert!((explosion.height() - 0.15).abs() < 1e-6);

    let booms = log
        .borrow()
        .played
        .iter()
        .filter(|s| **s == Sound::Explosion)
        .count();
    assert_eq!(booms, 1);
}

#[test]
fn lethal_hit_ends_the_game() {
    let mut screen = make_screen();
    let shooter = place_enemy(&mut screen, EnemyKind::Small, Vec2::new(0.3, 0.3));
    let pos = ship_lower_half(&screen);
    place_bullet(&mut screen, Owner::Enemy(shooter), pos, 1000);

    screen.check_collisions();

    assert!(screen.main_ship().is_destroyed());
    assert_eq!(screen.main_ship().hp(), 0);
    assert_eq!(screen.state(), ScreenState::GameOver);
    assert_eq!(screen.explosions().active_len(), 1);
}

#[test]
fn no_collisions_after_game_over() {
    let mut screen = make_screen();
    let shooter = place_enemy(&mut screen, EnemyKind::Small, Vec2::new(0.3, 0.3));
    let pos = ship_lower_half(&screen);
    place_bullet(&mut screen, Owner::Enemy(shooter), pos, 1000);
    screen.check_collisions();

    place_bullet(&mut screen, Owner::Enemy(shooter), pos, 1000);
    let late = place_bullet(&mut screen, Owner::MainShip, Vec2::new(0.3, 0.32), 1);
    screen.check_collisions();

    // Still a single explosion, and the enemy is untouched.
    assert_eq!(screen.explosions().active_len(), 1);
    assert_eq!(screen.enemies().get(shooter).unwrap().hp(), 1);
    assert!(!screen.bullets().get(late).unwrap().is_destroyed());
}

#[test]
fn rammers_after_the_killing_blow_survive() {
    let mut screen = make_screen();
    let ship_pos = screen.main_ship().pos();
    // Five big rams at 2 * 10 each use up all 100 hp.
    let rammers: Vec<Handle> = (0..6)
        .map(|_| place_enemy(&mut screen, EnemyKind::Big, ship_pos))
        .collect();

    screen.check_collisions();

    assert_eq!(screen.main_ship().hp(), 0);
    assert_eq!(screen.state(), ScreenState::GameOver);
    for &e in &rammers[..5] {
        assert!(screen.enemies().get(e).unwrap().is_destroyed());
    }
    assert!(!screen.enemies().get(rammers[5]).unwrap().is_destroyed());
    assert_eq!(screen.explosions().active_len(), 1);
}

#[test]
fn enemy_bullets_after_the_killing_blow_survive() {
    let mut screen = make_screen();
    let shooter = place_enemy(&mut screen, EnemyKind::Small, Vec2::new(0.3, 0.3));
    let pos = ship_lower_half(&screen);
    let lethal = place_bullet(&mut screen, Owner::Enemy(shooter), pos, 1000);
    let second = place_bullet(&mut screen, Owner::Enemy(shooter), pos, 5);

    screen.check_collisions();

    assert!(screen.main_ship().is_destroyed());
    assert!(screen.bullets().get(lethal).unwrap().is_destroyed());
    assert!(!screen.bullets().get(second).unwrap().is_destroyed());
    assert_eq!(screen.explosions().active_len(), 1);
}

#[test]
fn contact_and_bullet_in_same_frame_both_apply() {
    let mut screen = make_screen();
    let ship_pos = screen.main_ship().pos();
    let rammer = place_enemy(&mut screen, EnemyKind::Small, ship_pos);
    let pos = ship_lower_half(&screen);
    place_bullet(&mut screen, Owner::Enemy(rammer), pos, 3);

    screen.check_collisions();
    assert_eq!(screen.main_ship().hp(), 100 - 2 - 3);
}
