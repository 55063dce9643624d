//! Garden world: plants, their parts, and the population they live in.
//!
//! Plants grow roots that compete for space through the collider registry and
//! flowers that scatter offspring. The [`Garden`] owns the population and
//! commits births and deaths between ticks.

pub mod collision;
pub mod part;
pub mod roots;
pub mod flower;
pub mod plant;
pub mod render;
pub mod garden;
pub mod shared;

pub use collision::{Circle, ColliderRegistry, ColliderShape};
pub use flower::{BloomStage, Flower};
pub use garden::{Garden, GardenStats};
pub use part::{DeathCause, Part};
pub use plant::Plant;
pub use render::{Canvas, Drawable, RenderScheduler, Rgb};
pub use roots::Roots;
pub use shared::SharedGarden;
