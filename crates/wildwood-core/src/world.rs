//! Authoritative grid state: the entity arena plus occupancy and background layers.

use crate::entity::{Entity, EntityId, Species};
use crate::scheduler::EventScheduler;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use thiserror::Error;
use wildwood_path::Point;

/// Errors raised by world construction and mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    /// Dimensions must both be positive.
    #[error("world dimensions must be positive, got {rows} rows x {cols} cols")]
    InvalidDimensions { rows: i32, cols: i32 },
    /// The position lies outside the grid.
    #[error("position {0} is outside the world bounds")]
    OutOfBounds(Point),
    /// Another entity already stands on the cell.
    #[error("position {0} is already occupied")]
    Occupied(Point),
}

/// Terrain layer drawn beneath entities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Background {
    pub id: String,
    pub image_index: usize,
}

impl Background {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            image_index: 0,
        }
    }
}

/// Rectangular grid owning every entity and its cell bookkeeping.
///
/// The occupancy layer is authoritative: at most one entity stands on a cell,
/// and an entity's stored position always names the cell that points back at
/// it. Mutations that retire entities take the scheduler so pending events die
/// with their owner.
#[derive(Debug, Serialize, Deserialize)]
pub struct World {
    rows: i32,
    cols: i32,
    background: Vec<Option<Background>>,
    occupancy: Vec<Option<EntityId>>,
    entities: SlotMap<EntityId, Entity>,
}

impl World {
    /// Create an empty world; both dimensions must be positive.
    pub fn new(rows: i32, cols: i32) -> Result<Self, WorldError> {
        if rows <= 0 || cols <= 0 {
            return Err(WorldError::InvalidDimensions { rows, cols });
        }
        let cells = (rows as usize) * (cols as usize);
        Ok(Self {
            rows,
            cols,
            background: vec![None; cells],
            occupancy: vec![None; cells],
            entities: SlotMap::with_key(),
        })
    }

    #[must_use]
    pub const fn rows(&self) -> i32 {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> i32 {
        self.cols
    }

    #[must_use]
    pub const fn in_bounds(&self, position: Point) -> bool {
        position.x >= 0 && position.x < self.cols && position.y >= 0 && position.y < self.rows
    }

    /// Entity standing on `position`. Out-of-bounds cells read as free.
    #[must_use]
    pub fn occupant(&self, position: Point) -> Option<EntityId> {
        if !self.in_bounds(position) {
            return None;
        }
        self.occupancy[self.cell_index(position)]
    }

    #[must_use]
    pub fn is_occupied(&self, position: Point) -> bool {
        self.occupant(position).is_some()
    }

    /// Insert `entity` at its recorded position.
    pub fn add_entity(&mut self, entity: Entity) -> Result<EntityId, WorldError> {
        let position = entity.position;
        if !self.in_bounds(position) {
            return Err(WorldError::OutOfBounds(position));
        }
        if self.is_occupied(position) {
            return Err(WorldError::Occupied(position));
        }
        let id = self.entities.insert(entity);
        let index = self.cell_index(position);
        self.occupancy[index] = Some(id);
        self.debug_check_coherence();
        Ok(id)
    }

    /// Remove `entity` and cancel its scheduled events. Dead handles are
    /// ignored.
    pub fn remove_entity(&mut self, scheduler: &mut EventScheduler, entity: EntityId) {
        scheduler.unschedule_all(entity);
        let Some(record) = self.entities.remove(entity) else {
            return;
        };
        let index = self.cell_index(record.position);
        debug_assert_eq!(
            self.occupancy[index],
            Some(entity),
            "occupancy grid desynced from entity position"
        );
        if self.occupancy[index] == Some(entity) {
            self.occupancy[index] = None;
        }
        self.debug_check_coherence();
    }

    /// Walk `entity` onto `destination`, evicting whoever stands there.
    /// Out-of-bounds destinations and the entity's own cell are ignored.
    pub fn move_entity(
        &mut self,
        scheduler: &mut EventScheduler,
        entity: EntityId,
        destination: Point,
    ) {
        let Some(old_position) = self.entities.get(entity).map(|record| record.position) else {
            return;
        };
        if !self.in_bounds(destination) || destination == old_position {
            return;
        }
        let old_index = self.cell_index(old_position);
        debug_assert_eq!(
            self.occupancy[old_index],
            Some(entity),
            "occupancy grid desynced from entity position"
        );
        self.occupancy[old_index] = None;
        if let Some(evicted) = self.occupant(destination) {
            self.remove_entity(scheduler, evicted);
        }
        let new_index = self.cell_index(destination);
        self.occupancy[new_index] = Some(entity);
        if let Some(record) = self.entities.get_mut(entity) {
            record.position = destination;
        }
        self.debug_check_coherence();
    }

    /// Nearest entity of any listed species by Manhattan distance. Species are
    /// scanned in the order given; the first minimum seen wins ties.
    #[must_use]
    pub fn find_nearest(&self, origin: Point, species: &[Species]) -> Option<EntityId> {
        let mut best: Option<(EntityId, i32)> = None;
        for &wanted in species {
            for (id, entity) in &self.entities {
                if entity.species() != wanted {
                    continue;
                }
                let distance = entity.position.manhattan_distance(origin);
                if best.map_or(true, |(_, closest)| distance < closest) {
                    best = Some((id, distance));
                }
            }
        }
        best.map(|(id, _)| id)
    }

    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys()
    }

    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    #[must_use]
    pub fn background(&self, position: Point) -> Option<&Background> {
        if !self.in_bounds(position) {
            return None;
        }
        self.background[self.cell_index(position)].as_ref()
    }

    /// Replace the terrain under `position`. Out-of-bounds writes are dropped.
    pub fn set_background(&mut self, position: Point, background: Background) {
        if !self.in_bounds(position) {
            debug_assert!(false, "background write outside the world bounds");
            return;
        }
        let index = self.cell_index(position);
        self.background[index] = Some(background);
    }

    /// Activity log: one line per named entity, in arena order.
    #[must_use]
    pub fn log(&self) -> Vec<String> {
        self.entities.values().filter_map(Entity::log_line).collect()
    }

    fn cell_index(&self, position: Point) -> usize {
        (position.y as usize) * (self.cols as usize) + (position.x as usize)
    }

    fn debug_check_coherence(&self) {
        if cfg!(debug_assertions) {
            for (id, entity) in &self.entities {
                debug_assert_eq!(
                    self.occupant(entity.position),
                    Some(id),
                    "entity position desynced from occupancy grid"
                );
            }
            let occupied = self.occupancy.iter().flatten().count();
            debug_assert_eq!(occupied, self.entities.len(), "stale occupancy entries");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Entity, DUDE_KEY, HOUSE_KEY, SAPLING_KEY, STUMP_KEY, TREE_KEY, WATER_KEY};
    use crate::scheduler::Action;
    use crate::sprite::SpriteLibrary;

    fn sprites() -> SpriteLibrary {
        let mut library = SpriteLibrary::new();
        for key in [DUDE_KEY, HOUSE_KEY, SAPLING_KEY, STUMP_KEY, TREE_KEY, WATER_KEY] {
            library.insert(key, 1);
        }
        library
    }

    fn stump_at(id: &str, x: i32, y: i32) -> Entity {
        Entity::stump(id, Point::new(x, y), sprites().get(STUMP_KEY))
    }

    #[test]
    fn dimensions_must_be_positive() {
        assert_eq!(
            World::new(0, 5).unwrap_err(),
            WorldError::InvalidDimensions { rows: 0, cols: 5 }
        );
        assert_eq!(
            World::new(3, -1).unwrap_err(),
            WorldError::InvalidDimensions { rows: 3, cols: -1 }
        );
        assert!(World::new(1, 1).is_ok());
    }

    #[test]
    fn add_rejects_out_of_bounds_positions() {
        let mut world = World::new(2, 2).expect("world");
        let err = world.add_entity(stump_at("s", 2, 0)).unwrap_err();
        assert_eq!(err, WorldError::OutOfBounds(Point::new(2, 0)));
        let err = world.add_entity(stump_at("s", 0, -1)).unwrap_err();
        assert_eq!(err, WorldError::OutOfBounds(Point::new(0, -1)));
    }

    #[test]
    fn add_rejects_occupied_cells() {
        let mut world = World::new(2, 2).expect("world");
        world.add_entity(stump_at("a", 1, 1)).expect("first add");
        let err = world.add_entity(stump_at("b", 1, 1)).unwrap_err();
        assert_eq!(err, WorldError::Occupied(Point::new(1, 1)));
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn occupancy_follows_adds_and_removes() {
        let mut world = World::new(3, 3).expect("world");
        let mut scheduler = EventScheduler::new();
        let id = world.add_entity(stump_at("s", 1, 2)).expect("add");
        assert_eq!(world.occupant(Point::new(1, 2)), Some(id));
        assert!(world.contains(id));

        world.remove_entity(&mut scheduler, id);
        assert_eq!(world.occupant(Point::new(1, 2)), None);
        assert!(!world.contains(id));
        // A second removal of the dead handle is a no-op.
        world.remove_entity(&mut scheduler, id);
        assert!(world.is_empty());
    }

    #[test]
    fn out_of_bounds_cells_read_as_free() {
        let world = World::new(2, 2).expect("world");
        assert_eq!(world.occupant(Point::new(-1, 0)), None);
        assert!(!world.is_occupied(Point::new(5, 5)));
        assert_eq!(world.background(Point::new(9, 9)), None);
    }

    #[test]
    fn remove_cancels_pending_events() {
        let mut world = World::new(2, 2).expect("world");
        let mut scheduler = EventScheduler::new();
        let id = world.add_entity(stump_at("s", 0, 0)).expect("add");
        scheduler.schedule(id, Action::Behavior, 1.0);
        scheduler.schedule(id, Action::Animation { repeat_count: 0 }, 0.5);
        assert_eq!(scheduler.pending_for(id), 2);

        world.remove_entity(&mut scheduler, id);
        assert_eq!(scheduler.pending_for(id), 0);
        assert!(scheduler.pop_due(10.0).is_none());
    }

    #[test]
    fn move_relocates_and_evicts_the_occupant() {
        let mut world = World::new(1, 3).expect("world");
        let mut scheduler = EventScheduler::new();
        let walker = world.add_entity(stump_at("walker", 0, 0)).expect("add");
        let victim = world.add_entity(stump_at("victim", 1, 0)).expect("add");
        scheduler.schedule(victim, Action::Behavior, 1.0);

        world.move_entity(&mut scheduler, walker, Point::new(1, 0));
        assert_eq!(world.occupant(Point::new(1, 0)), Some(walker));
        assert_eq!(world.occupant(Point::new(0, 0)), None);
        assert!(!world.contains(victim));
        assert_eq!(scheduler.pending_for(victim), 0);
        let Some(record) = world.entity(walker) else {
            panic!("walker should survive the move");
        };
        assert_eq!(record.position, Point::new(1, 0));
    }

    #[test]
    fn move_ignores_out_of_bounds_and_self_moves() {
        let mut world = World::new(1, 2).expect("world");
        let mut scheduler = EventScheduler::new();
        let id = world.add_entity(stump_at("s", 0, 0)).expect("add");

        world.move_entity(&mut scheduler, id, Point::new(5, 0));
        world.move_entity(&mut scheduler, id, Point::new(0, 0));
        assert_eq!(world.occupant(Point::new(0, 0)), Some(id));
    }

    #[test]
    fn find_nearest_prefers_strictly_closer_then_arena_order() {
        let mut world = World::new(1, 6).expect("world");
        let near = world.add_entity(stump_at("near", 1, 0)).expect("add");
        let _far = world.add_entity(stump_at("far", 4, 0)).expect("add");
        let _tied = world.add_entity(stump_at("tied", 3, 0)).expect("add");

        // "near" is closest; later entries at the same distance never displace
        // an earlier minimum.
        assert_eq!(
            world.find_nearest(Point::new(2, 0), &[Species::Stump]),
            Some(near)
        );
    }

    #[test]
    fn find_nearest_scans_species_in_priority_order() {
        let sprites = sprites();
        let mut world = World::new(1, 5).expect("world");
        let tree = world
            .add_entity(Entity::tree(
                "t",
                Point::new(1, 0),
                sprites.get(TREE_KEY),
                0.5,
                0.5,
                1,
            ))
            .expect("add");
        let sapling = world
            .add_entity(Entity::sapling("s", Point::new(3, 0), sprites.get(SAPLING_KEY)))
            .expect("add");

        // Equal distances across species resolve toward the species listed
        // first.
        assert_eq!(
            world.find_nearest(Point::new(2, 0), &[Species::Tree, Species::Sapling]),
            Some(tree)
        );
        assert_eq!(
            world.find_nearest(Point::new(2, 0), &[Species::Sapling, Species::Tree]),
            Some(sapling)
        );
        assert_eq!(world.find_nearest(Point::new(2, 0), &[Species::House]), None);
    }

    #[test]
    fn log_lists_named_entities_only() {
        let sprites = sprites();
        let mut world = World::new(1, 4).expect("world");
        world
            .add_entity(Entity::house("home", Point::new(0, 0), sprites.get(HOUSE_KEY)))
            .expect("add");
        world
            .add_entity(Entity::house("", Point::new(1, 0), sprites.get(HOUSE_KEY)))
            .expect("add");
        world
            .add_entity(Entity::water("pond", Point::new(2, 0), sprites.get(WATER_KEY)))
            .expect("add");

        assert_eq!(world.log(), vec!["home 0 0 0", "pond 2 0 0"]);
    }

    #[test]
    fn background_cells_start_empty_and_accept_writes() {
        let mut world = World::new(2, 2).expect("world");
        assert_eq!(world.background(Point::new(0, 0)), None);
        world.set_background(Point::new(0, 0), Background::new("grass"));
        let Some(cell) = world.background(Point::new(0, 0)) else {
            panic!("background should be set");
        };
        assert_eq!(cell.id, "grass");
        assert_eq!(cell.image_index, 0);
    }
}
