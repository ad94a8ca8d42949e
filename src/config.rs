//! Tunables.  `Default` gives the stock difficulty curve.

use crate::engine::Region;
use crate::error::ConfigError;
use crate::sprites::EnemyKind;

// ── Difficulty tables ────────────────────────────────────────────────────────

/// Everything the emitter needs to build one kind of enemy.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyTemplate {
    pub kind: EnemyKind,
    /// Relative spawn probability.
    pub weight: f32,
    pub height: f32,
    pub hp: i32,
    /// Contact damage, and bullet damage at level 1.
    pub damage: i32,
    /// Cruise speed, downwards.
    pub speed: f32,
    pub bullet_speed: f32,
    pub bullet_height: f32,
    pub reload_interval: f32,
}

impl EnemyTemplate {
    pub fn half_width(&self) -> f32 {
        self.height * self.kind.region().aspect() / 2.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EmitterSettings {
    pub interval_min: f32,
    pub interval_max: f32,
    pub frags_per_level: u32,
    pub templates: Vec<EnemyTemplate>,
}

impl Default for EmitterSettings {
    fn default() -> Self {
        Self {
            interval_min: 4.0,
            interval_max: 4.0,
            frags_per_level: 10,
            templates: vec![
                EnemyTemplate {
                    kind: EnemyKind::Small,
                    weight: 0.5,
                    height: 0.1,
                    hp: 1,
                    damage: 1,
                    speed: 0.2,
                    bullet_speed: 0.3,
                    bullet_height: 0.01,
                    reload_interval: 3.0,
                },
                EnemyTemplate {
                    kind: EnemyKind::Medium,
                    weight: 0.3,
                    height: 0.15,
                    hp: 5,
                    damage: 5,
                    speed: 0.03,
                    bullet_speed: 0.25,
                    bullet_height: 0.02,
                    reload_interval: 4.0,
                },
                EnemyTemplate {
                    kind: EnemyKind::Big,
                    weight: 0.2,
                    height: 0.2,
                    hp: 10,
                    damage: 10,
                    speed: 0.005,
                    bullet_speed: 0.3,
                    bullet_height: 0.04,
                    reload_interval: 1.0,
                },
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MainShipSettings {
    pub height: f32,
    /// Gap between the world bottom and the ship.
    pub bottom_margin: f32,
    pub speed: f32,
    pub hp: i32,
    pub reload_interval: f32,
    pub bullet_speed: f32,
    pub bullet_height: f32,
    pub bullet_damage: i32,
}

impl Default for MainShipSettings {
    fn default() -> Self {
        Self {
            height: 0.15,
            bottom_margin: 0.05,
            speed: 0.5,
            hp: 100,
            reload_interval: 0.25,
            bullet_speed: 0.5,
            bullet_height: 0.01,
            bullet_damage: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub seed: u64,
    pub star_count: usize,
    pub main_ship: MainShipSettings,
    pub emitter: EmitterSettings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            star_count: 64,
            main_ship: MainShipSettings::default(),
            emitter: EmitterSettings::default(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let e = &self.emitter;
        if e.interval_min.is_nan() || e.interval_min <= 0.0 {
            return Err(ConfigError::NonPositiveInterval { value: e.interval_min });
        }
        if e.interval_max < e.interval_min {
            return Err(ConfigError::InvertedInterval {
                min: e.interval_min,
                max: e.interval_max,
            });
        }
        if e.frags_per_level == 0 {
            return Err(ConfigError::ZeroFragsPerLevel);
        }
        if e.templates.is_empty() {
            return Err(ConfigError::NoEnemyTemplates);
        }
        if e.templates.iter().any(|t| t.weight.is_nan() || t.weight < 0.0)
            || e.templates.iter().map(|t| t.weight).sum::<f32>() <= 0.0
        {
            return Err(ConfigError::BadSpawnWeights);
        }
        for t in &e.templates {
            check_size(t.kind.region(), t.height)?;
            check_size(Region::BulletEnemy, t.bullet_height)?;
            check_hp(t.kind.region(), t.hp)?;
        }

        let s = &self.main_ship;
        check_size(Region::MainShip, s.height)?;
        check_size(Region::BulletMainShip, s.bullet_height)?;
        check_hp(Region::MainShip, s.hp)?;
        Ok(())
    }
}

fn check_size(region: Region, height: f32) -> Result<(), ConfigError> {
    if height > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveHeight { region, height })
    }
}

fn check_hp(region: Region, hp: i32) -> Result<(), ConfigError> {
    if hp > 0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveHp { region, hp })
    }
}
