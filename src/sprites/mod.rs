//! Per-kind entity behaviour: movement, animation, firing and hit tests.

pub mod background;
pub mod bullet;
pub mod enemy_ship;
pub mod explosion;
pub mod main_ship;
pub mod ship;
pub mod star;

pub use background::Background;
pub use bullet::{Bullet, Gun, Owner};
pub use enemy_ship::{EnemyKind, EnemyShip};
pub use explosion::Explosion;
pub use main_ship::MainShip;
pub use ship::Ship;
pub use star::Star;
