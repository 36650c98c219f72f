//! Entity records stored in the world arena, one tagged variant per kind.

use crate::sprite::SpriteSet;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use wildwood_path::Point;

new_key_type! {
    /// Stable handle for entities backed by a generational slot map.
    pub struct EntityId;
}

/// Sprite key for harvesting dudes.
pub const DUDE_KEY: &str = "dude";
/// Sprite key for dudes carrying a full load.
pub const DUDE_CARRY_KEY: &str = "dude_carry";
pub const FAIRY_KEY: &str = "fairy";
pub const HOUSE_KEY: &str = "house";
pub const MUSHROOM_KEY: &str = "mushroom";
pub const SAPLING_KEY: &str = "sapling";
pub const STUMP_KEY: &str = "stump";
pub const TREE_KEY: &str = "tree";
pub const WATER_KEY: &str = "water";
/// Sprite key for settled water left behind by a water trail.
pub const WATER_TILE_KEY: &str = "water_tile";
pub const BAD_DUDE_KEY: &str = "bad_dude";
pub const CAR_KEY: &str = "car";
pub const EXPLOSION_KEY: &str = "explosion";
pub const WATER_TRAIL_KEY: &str = "water_trail";

/// Background id for untouched grass.
pub const GRASS_KEY: &str = "grass";
/// Background id for grass overtaken by mushroom cover.
pub const GRASS_MUSHROOMS_KEY: &str = "grass_mushrooms";
/// Background id painted where a house was demolished.
pub const EXPLODED_KEY: &str = "exploded";
/// Background id painted around a demolished house.
pub const ROAD_KEY: &str = "road";

/// Seconds between sapling growth ticks.
pub const SAPLING_BEHAVIOR_PERIOD: f64 = 2.0;
/// Seconds between sapling animation refreshes; small so the frame tracks
/// health changes closely.
pub const SAPLING_ANIMATION_PERIOD: f64 = 0.01;
/// Health at which a sapling matures into a tree.
pub const SAPLING_HEALTH_LIMIT: i32 = 5;

/// Bounds for the randomized animation period of a matured tree.
pub const TREE_ANIMATION_PERIOD_MIN: f64 = 0.1;
pub const TREE_ANIMATION_PERIOD_MAX: f64 = 1.0;
/// Bounds for the randomized behavior period of a matured tree.
pub const TREE_BEHAVIOR_PERIOD_MIN: f64 = 0.01;
pub const TREE_BEHAVIOR_PERIOD_MAX: f64 = 0.10;
/// Inclusive lower and exclusive upper bound for a matured tree's health.
pub const TREE_HEALTH_MIN: i32 = 1;
pub const TREE_HEALTH_MAX: i32 = 3;

/// Seconds between explosion animation and burn-down ticks.
pub const EXPLOSION_PERIOD: f64 = 0.1;
/// Frame index at which an explosion burns out.
pub const EXPLOSION_LAST_FRAME: usize = 9;
/// Seconds between water trail animation and settling ticks.
pub const WATER_TRAIL_PERIOD: f64 = 0.1;
/// Frame index at which a water trail settles into water.
pub const WATER_TRAIL_LAST_FRAME: usize = 5;

/// Discriminant-only view of entity kinds, used for target queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Species {
    Dude,
    Fairy,
    House,
    Mushroom,
    Sapling,
    Stump,
    Tree,
    Water,
    BadDude,
    Car,
    Explosion,
    WaterTrail,
}

/// Dude state carried inside a car between pickup and drop-off.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Passenger {
    pub id: String,
    pub animation_period: f64,
    pub behavior_period: f64,
    pub resource_count: u32,
    pub resource_limit: u32,
    /// Cell the passenger will step out onto.
    pub position: Point,
}

/// Per-kind behavioral state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum EntityKind {
    /// Harvests trees and saplings, then delivers the load to a house.
    Dude {
        animation_period: f64,
        behavior_period: f64,
        resource_count: u32,
        resource_limit: u32,
    },
    /// Seeks stumps and plants saplings where they stood.
    Fairy {
        animation_period: f64,
        behavior_period: f64,
    },
    /// Delivery target for harvested wood.
    House,
    /// Spreads mushroom cover across neighboring grass.
    Mushroom { behavior_period: f64 },
    /// Young tree; matures with growth ticks, withers when chopped.
    Sapling { health: i32 },
    /// Remains of a felled tree.
    Stump,
    /// Mature tree; collapses into a stump once its health is exhausted.
    Tree {
        animation_period: f64,
        behavior_period: f64,
        health: i32,
    },
    /// Impassable terrain tile.
    Water,
    /// Hunts dudes, or houses while carrying a payload.
    BadDude {
        animation_period: f64,
        behavior_period: f64,
        has_payload: bool,
        dudes_killed: u32,
    },
    /// Shuttles a picked-up dude to the nearest mushroom patch.
    Car {
        animation_period: f64,
        behavior_period: f64,
        passenger: Option<Passenger>,
        house_cooldown: u32,
    },
    /// Short-lived blast left where a house was demolished.
    Explosion,
    /// Transient wake that settles into permanent water.
    WaterTrail,
}

impl EntityKind {
    #[must_use]
    pub const fn species(&self) -> Species {
        match self {
            Self::Dude { .. } => Species::Dude,
            Self::Fairy { .. } => Species::Fairy,
            Self::House => Species::House,
            Self::Mushroom { .. } => Species::Mushroom,
            Self::Sapling { .. } => Species::Sapling,
            Self::Stump => Species::Stump,
            Self::Tree { .. } => Species::Tree,
            Self::Water => Species::Water,
            Self::BadDude { .. } => Species::BadDude,
            Self::Car { .. } => Species::Car,
            Self::Explosion => Species::Explosion,
            Self::WaterTrail => Species::WaterTrail,
        }
    }

    /// Delay between animation frames, `None` for kinds that never animate.
    #[must_use]
    pub const fn animation_period(&self) -> Option<f64> {
        match self {
            Self::Dude {
                animation_period, ..
            }
            | Self::Fairy {
                animation_period, ..
            }
            | Self::Tree {
                animation_period, ..
            }
            | Self::BadDude {
                animation_period, ..
            }
            | Self::Car {
                animation_period, ..
            } => Some(*animation_period),
            Self::Sapling { .. } => Some(SAPLING_ANIMATION_PERIOD),
            Self::Explosion => Some(EXPLOSION_PERIOD),
            Self::WaterTrail => Some(WATER_TRAIL_PERIOD),
            Self::Mushroom { .. } | Self::House | Self::Stump | Self::Water => None,
        }
    }

    /// Delay between behavior ticks, `None` for inert kinds.
    #[must_use]
    pub const fn behavior_period(&self) -> Option<f64> {
        match self {
            Self::Dude {
                behavior_period, ..
            }
            | Self::Fairy {
                behavior_period, ..
            }
            | Self::Mushroom { behavior_period }
            | Self::Tree {
                behavior_period, ..
            }
            | Self::BadDude {
                behavior_period, ..
            }
            | Self::Car {
                behavior_period, ..
            } => Some(*behavior_period),
            Self::Sapling { .. } => Some(SAPLING_BEHAVIOR_PERIOD),
            Self::Explosion => Some(EXPLOSION_PERIOD),
            Self::WaterTrail => Some(WATER_TRAIL_PERIOD),
            Self::House | Self::Stump | Self::Water => None,
        }
    }
}

/// A single simulated occupant of one grid cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entity {
    /// Log identifier; entities with an empty id stay out of the activity log.
    pub id: String,
    pub position: Point,
    pub sprite: SpriteSet,
    /// Current animation frame, advanced without wrapping.
    pub image_index: usize,
    pub kind: EntityKind,
}

impl Entity {
    #[must_use]
    pub fn new(id: impl Into<String>, position: Point, sprite: SpriteSet, kind: EntityKind) -> Self {
        Self {
            id: id.into(),
            position,
            sprite,
            image_index: 0,
            kind,
        }
    }

    #[must_use]
    pub fn dude(
        id: impl Into<String>,
        position: Point,
        sprite: SpriteSet,
        animation_period: f64,
        behavior_period: f64,
        resource_count: u32,
        resource_limit: u32,
    ) -> Self {
        Self::new(
            id,
            position,
            sprite,
            EntityKind::Dude {
                animation_period,
                behavior_period,
                resource_count,
                resource_limit,
            },
        )
    }

    #[must_use]
    pub fn fairy(
        id: impl Into<String>,
        position: Point,
        sprite: SpriteSet,
        animation_period: f64,
        behavior_period: f64,
    ) -> Self {
        Self::new(
            id,
            position,
            sprite,
            EntityKind::Fairy {
                animation_period,
                behavior_period,
            },
        )
    }

    #[must_use]
    pub fn house(id: impl Into<String>, position: Point, sprite: SpriteSet) -> Self {
        Self::new(id, position, sprite, EntityKind::House)
    }

    #[must_use]
    pub fn mushroom(
        id: impl Into<String>,
        position: Point,
        sprite: SpriteSet,
        behavior_period: f64,
    ) -> Self {
        Self::new(id, position, sprite, EntityKind::Mushroom { behavior_period })
    }

    /// A freshly planted sapling with zero health.
    #[must_use]
    pub fn sapling(id: impl Into<String>, position: Point, sprite: SpriteSet) -> Self {
        Self::new(id, position, sprite, EntityKind::Sapling { health: 0 })
    }

    #[must_use]
    pub fn stump(id: impl Into<String>, position: Point, sprite: SpriteSet) -> Self {
        Self::new(id, position, sprite, EntityKind::Stump)
    }

    #[must_use]
    pub fn tree(
        id: impl Into<String>,
        position: Point,
        sprite: SpriteSet,
        animation_period: f64,
        behavior_period: f64,
        health: i32,
    ) -> Self {
        Self::new(
            id,
            position,
            sprite,
            EntityKind::Tree {
                animation_period,
                behavior_period,
                health,
            },
        )
    }

    #[must_use]
    pub fn water(id: impl Into<String>, position: Point, sprite: SpriteSet) -> Self {
        Self::new(id, position, sprite, EntityKind::Water)
    }

    #[must_use]
    pub fn bad_dude(
        id: impl Into<String>,
        position: Point,
        sprite: SpriteSet,
        animation_period: f64,
        behavior_period: f64,
        has_payload: bool,
    ) -> Self {
        Self::new(
            id,
            position,
            sprite,
            EntityKind::BadDude {
                animation_period,
                behavior_period,
                has_payload,
                dudes_killed: 0,
            },
        )
    }

    #[must_use]
    pub fn car(
        id: impl Into<String>,
        position: Point,
        sprite: SpriteSet,
        animation_period: f64,
        behavior_period: f64,
    ) -> Self {
        Self::new(
            id,
            position,
            sprite,
            EntityKind::Car {
                animation_period,
                behavior_period,
                passenger: None,
                house_cooldown: 0,
            },
        )
    }

    #[must_use]
    pub fn explosion(id: impl Into<String>, position: Point, sprite: SpriteSet) -> Self {
        Self::new(id, position, sprite, EntityKind::Explosion)
    }

    #[must_use]
    pub fn water_trail(id: impl Into<String>, position: Point, sprite: SpriteSet) -> Self {
        Self::new(id, position, sprite, EntityKind::WaterTrail)
    }

    #[must_use]
    pub fn species(&self) -> Species {
        self.kind.species()
    }

    #[must_use]
    pub fn animation_period(&self) -> Option<f64> {
        self.kind.animation_period()
    }

    #[must_use]
    pub fn behavior_period(&self) -> Option<f64> {
        self.kind.behavior_period()
    }

    /// Advance to the next animation frame.
    ///
    /// Most kinds step their frame counter without wrapping; saplings derive
    /// the frame from current health instead, and static kinds never receive
    /// animation events.
    pub fn advance_frame(&mut self) {
        match &self.kind {
            EntityKind::Dude { .. }
            | EntityKind::Fairy { .. }
            | EntityKind::Tree { .. }
            | EntityKind::BadDude { .. }
            | EntityKind::Car { .. }
            | EntityKind::Explosion
            | EntityKind::WaterTrail => self.image_index += 1,
            EntityKind::Sapling { health } => {
                let frames = self.sprite.frames();
                self.image_index = if *health <= 0 {
                    0
                } else if *health < SAPLING_HEALTH_LIMIT {
                    frames * (*health as usize) / (SAPLING_HEALTH_LIMIT as usize)
                } else {
                    frames - 1
                };
            }
            EntityKind::Mushroom { .. } => {}
            EntityKind::House | EntityKind::Stump | EntityKind::Water => {
                debug_assert!(false, "animation event delivered to a static entity");
            }
        }
    }

    /// One activity log line, or `None` for anonymous entities.
    #[must_use]
    pub fn log_line(&self) -> Option<String> {
        if self.id.is_empty() {
            return None;
        }
        Some(format!(
            "{} {} {} {}",
            self.id, self.position.x, self.position.y, self.image_index
        ))
    }
}
