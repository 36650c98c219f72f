//! The simulation loop and every per-kind behavior rule.

use crate::entity::{
    Entity, EntityId, EntityKind, Passenger, Species, DUDE_CARRY_KEY, DUDE_KEY, EXPLODED_KEY,
    EXPLOSION_KEY, EXPLOSION_LAST_FRAME, GRASS_KEY, GRASS_MUSHROOMS_KEY, MUSHROOM_KEY, ROAD_KEY,
    SAPLING_HEALTH_LIMIT, SAPLING_KEY, STUMP_KEY, TREE_ANIMATION_PERIOD_MAX,
    TREE_ANIMATION_PERIOD_MIN, TREE_BEHAVIOR_PERIOD_MAX, TREE_BEHAVIOR_PERIOD_MIN, TREE_HEALTH_MAX,
    TREE_HEALTH_MIN, TREE_KEY, WATER_KEY, WATER_TILE_KEY, WATER_TRAIL_LAST_FRAME,
};
use crate::scheduler::{Action, EventScheduler};
use crate::sprite::SpriteLibrary;
use crate::world::{Background, World, WorldError};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use wildwood_path::{PathingStrategy, Point};

/// Cells an entity may route through while walking to a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Passability {
    /// Free cells only.
    Open,
    /// Free cells, or cells held by a stump the mover crushes.
    ThroughStumps,
    /// Free cells, or cells held by a fairy the mover runs down.
    ThroughFairies,
}

fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::seed_from_u64(rand::random::<u64>()),
    }
}

/// Owns the grid, the clock, and the behavior rules that tie them together.
///
/// Events fire in timestamp order; each behavior tick finds a target, takes
/// one step or acts on an adjacent target, and reschedules itself unless the
/// entity transformed into something new.
pub struct Simulation {
    world: World,
    scheduler: EventScheduler,
    sprites: SpriteLibrary,
    pathing: Box<dyn PathingStrategy>,
    rng: SmallRng,
}

impl Simulation {
    /// Wrap an already-populated world. Call [`Simulation::schedule_all_actions`]
    /// to start its entities ticking, then [`Simulation::advance`].
    #[must_use]
    pub fn new(
        world: World,
        sprites: SpriteLibrary,
        pathing: Box<dyn PathingStrategy>,
        seed: Option<u64>,
    ) -> Self {
        Self {
            world,
            scheduler: EventScheduler::new(),
            sprites,
            pathing,
            rng: seeded_rng(seed),
        }
    }

    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[must_use]
    pub fn scheduler(&self) -> &EventScheduler {
        &self.scheduler
    }

    #[must_use]
    pub fn current_time(&self) -> f64 {
        self.scheduler.current_time()
    }

    /// Activity log for the current world state.
    #[must_use]
    pub fn log(&self) -> Vec<String> {
        self.world.log()
    }

    /// Insert `entity` and start its recurring actions.
    pub fn add_entity(&mut self, entity: Entity) -> Result<EntityId, WorldError> {
        let id = self.world.add_entity(entity)?;
        self.schedule_actions(id);
        Ok(id)
    }

    /// Queue the recurring animation loop and behavior tick for `entity`.
    /// Kinds without a period for either simply skip it.
    pub fn schedule_actions(&mut self, entity: EntityId) {
        let Some(record) = self.world.entity(entity) else {
            return;
        };
        let animation = record.animation_period();
        let behavior = record.behavior_period();
        if let Some(period) = animation {
            self.scheduler
                .schedule(entity, Action::Animation { repeat_count: 0 }, period);
        }
        if let Some(period) = behavior {
            self.scheduler.schedule(entity, Action::Behavior, period);
        }
    }

    /// Start recurring actions for every entity already in the world.
    pub fn schedule_all_actions(&mut self) {
        let ids: Vec<EntityId> = self.world.entity_ids().collect();
        for id in ids {
            self.schedule_actions(id);
        }
    }

    /// Run the simulation forward by `duration` seconds, executing every event
    /// due inside the window, boundary included.
    pub fn advance(&mut self, duration: f64) {
        debug_assert!(duration >= 0.0, "advance duration must not be negative");
        let boundary = self.scheduler.current_time() + duration.max(0.0);
        while let Some(event) = self.scheduler.pop_due(boundary) {
            match event.action {
                Action::Animation { repeat_count } => {
                    self.execute_animation(event.entity, repeat_count);
                }
                Action::Behavior => self.execute_behavior(event.entity),
            }
        }
        self.scheduler.finish_interval(boundary);
    }

    /// Run `entity`'s transformation rule immediately, reporting whether it
    /// changed into something else.
    pub fn transform_entity(&mut self, entity: EntityId) -> bool {
        match self.species_of(entity) {
            Some(Species::Dude) => self.transform_dude(entity),
            Some(Species::Sapling) => self.transform_sapling(entity),
            Some(Species::Tree) => self.transform_tree(entity),
            Some(Species::House) => self.transform_house(entity),
            Some(Species::Car) => self.transform_car(entity),
            Some(Species::WaterTrail) => self.transform_water_trail(entity),
            Some(Species::BadDude) => {
                self.detonate_adjacent_houses(entity);
                true
            }
            _ => false,
        }
    }

    fn execute_animation(&mut self, entity: EntityId, repeat_count: u32) {
        let Some(record) = self.world.entity_mut(entity) else {
            return;
        };
        record.advance_frame();
        let period = record.animation_period();
        if repeat_count != 1 {
            if let Some(period) = period {
                self.scheduler.schedule(
                    entity,
                    Action::Animation {
                        repeat_count: repeat_count.saturating_sub(1),
                    },
                    period,
                );
            }
        }
    }

    fn execute_behavior(&mut self, entity: EntityId) {
        let Some(species) = self.species_of(entity) else {
            return;
        };
        match species {
            Species::Dude => self.dude_behavior(entity),
            Species::Fairy => self.fairy_behavior(entity),
            Species::Mushroom => self.mushroom_behavior(entity),
            Species::Sapling => self.sapling_behavior(entity),
            Species::Tree => self.tree_behavior(entity),
            Species::BadDude => self.bad_dude_behavior(entity),
            Species::Car => self.car_behavior(entity),
            Species::Explosion => self.explosion_behavior(entity),
            Species::WaterTrail => self.water_trail_behavior(entity),
            Species::House | Species::Stump | Species::Water => {
                debug_assert!(false, "behavior event delivered to a static entity");
            }
        }
    }

    fn reschedule_behavior(&mut self, entity: EntityId) {
        if let Some(period) = self.world.entity(entity).and_then(Entity::behavior_period) {
            self.scheduler.schedule(entity, Action::Behavior, period);
        }
    }

    fn species_of(&self, entity: EntityId) -> Option<Species> {
        self.world.entity(entity).map(Entity::species)
    }

    fn entity_position(&self, entity: EntityId) -> Option<Point> {
        self.world.entity(entity).map(|record| record.position)
    }

    fn background_id(&self, position: Point) -> Option<&str> {
        self.world.background(position).map(|cell| cell.id.as_str())
    }

    fn can_pass(&self, position: Point, rule: Passability) -> bool {
        if !self.world.in_bounds(position) {
            return false;
        }
        match self.world.occupant(position) {
            None => true,
            Some(occupant) => match rule {
                Passability::Open => false,
                Passability::ThroughStumps => self.species_of(occupant) == Some(Species::Stump),
                Passability::ThroughFairies => self.species_of(occupant) == Some(Species::Fairy),
            },
        }
    }

    /// First step of a planned route toward `destination`, or `start` when no
    /// route exists.
    fn next_position(&self, start: Point, destination: Point, rule: Passability) -> Point {
        let can_pass = |p: Point| self.can_pass(p, rule);
        let within_reach = |goal: Point, p: Point| goal.adjacent_to(p);
        let neighbors = |p: Point| p.cardinal_neighbors().to_vec();
        let path = self
            .pathing
            .compute_path(start, destination, &can_pass, &within_reach, &neighbors);
        path.first().copied().unwrap_or(start)
    }

    fn step_toward(&mut self, entity: EntityId, destination: Point, rule: Passability) {
        let Some(position) = self.entity_position(entity) else {
            return;
        };
        let next = self.next_position(position, destination, rule);
        if next != position {
            self.world.move_entity(&mut self.scheduler, entity, next);
        }
    }

    /// Swap `entity` for `replacement` at the same cell, starting the
    /// newcomer's actions.
    fn replace_entity(&mut self, entity: EntityId, replacement: Entity) -> Option<EntityId> {
        self.world.remove_entity(&mut self.scheduler, entity);
        self.spawn(replacement)
    }

    /// Insert an engine-spawned entity whose cell the caller already vetted.
    fn spawn(&mut self, entity: Entity) -> Option<EntityId> {
        match self.world.add_entity(entity) {
            Ok(id) => {
                self.schedule_actions(id);
                Some(id)
            }
            Err(error) => {
                debug_assert!(false, "engine spawn rejected: {error}");
                None
            }
        }
    }

    fn dude_behavior(&mut self, entity: EntityId) {
        let target = self.dude_target(entity);
        let arrived = match target {
            Some(target) => self.dude_move_to(entity, target),
            None => false,
        };
        if !(arrived && self.transform_dude(entity)) {
            self.reschedule_behavior(entity);
        }
    }

    /// Empty-handed dudes look for plants to harvest; full ones for a house.
    fn dude_target(&self, entity: EntityId) -> Option<EntityId> {
        let record = self.world.entity(entity)?;
        let EntityKind::Dude {
            resource_count,
            resource_limit,
            ..
        } = record.kind
        else {
            return None;
        };
        let wanted: &[Species] = if resource_count == resource_limit {
            &[Species::House]
        } else {
            &[Species::Tree, Species::Sapling]
        };
        self.world.find_nearest(record.position, wanted)
    }

    fn dude_move_to(&mut self, entity: EntityId, target: EntityId) -> bool {
        let Some(position) = self.entity_position(entity) else {
            return false;
        };
        let Some(target_position) = self.entity_position(target) else {
            return false;
        };
        if position.adjacent_to(target_position) {
            if let Some(record) = self.world.entity_mut(target) {
                match &mut record.kind {
                    EntityKind::Tree { health, .. } | EntityKind::Sapling { health } => {
                        *health -= 1;
                    }
                    _ => {}
                }
            }
            true
        } else {
            self.step_toward(entity, target_position, Passability::ThroughStumps);
            false
        }
    }

    /// Arriving at a plant banks one resource; banking the last one swaps in a
    /// carrying dude, and arriving full at a house swaps back to an empty one.
    fn transform_dude(&mut self, entity: EntityId) -> bool {
        let Some(record) = self.world.entity_mut(entity) else {
            return false;
        };
        let id = record.id.clone();
        let position = record.position;
        let EntityKind::Dude {
            animation_period,
            behavior_period,
            resource_count,
            resource_limit,
        } = &mut record.kind
        else {
            return false;
        };
        let animation_period = *animation_period;
        let behavior_period = *behavior_period;
        let limit = *resource_limit;
        if *resource_count < limit {
            *resource_count += 1;
            if *resource_count < limit {
                return false;
            }
            let sprite = self.sprites.get(DUDE_CARRY_KEY);
            let carrying = Entity::dude(
                id,
                position,
                sprite,
                animation_period,
                behavior_period,
                limit,
                limit,
            );
            self.replace_entity(entity, carrying);
        } else {
            let sprite = self.sprites.get(DUDE_KEY);
            let unburdened = Entity::dude(
                id,
                position,
                sprite,
                animation_period,
                behavior_period,
                0,
                limit,
            );
            self.replace_entity(entity, unburdened);
        }
        true
    }

    fn fairy_behavior(&mut self, entity: EntityId) {
        let target = self
            .entity_position(entity)
            .and_then(|position| self.world.find_nearest(position, &[Species::Stump]));
        if let Some(target) = target {
            let stump_id = self.world.entity(target).map(|record| record.id.clone());
            let stump_position = self.entity_position(target);
            if self.fairy_move_to(entity, target) {
                if let (Some(stump_id), Some(position)) = (stump_id, stump_position) {
                    let sapling = Entity::sapling(
                        format!("{SAPLING_KEY}_{stump_id}"),
                        position,
                        self.sprites.get(SAPLING_KEY),
                    );
                    self.spawn(sapling);
                }
            }
        }
        self.reschedule_behavior(entity);
    }

    fn fairy_move_to(&mut self, entity: EntityId, target: EntityId) -> bool {
        let Some(position) = self.entity_position(entity) else {
            return false;
        };
        let Some(target_position) = self.entity_position(target) else {
            return false;
        };
        if position.adjacent_to(target_position) {
            self.world.remove_entity(&mut self.scheduler, target);
            true
        } else {
            self.step_toward(entity, target_position, Passability::Open);
            false
        }
    }

    /// Mushrooms first convert one neighboring grass cell, then seed a new
    /// mushroom on converted ground, one action per tick.
    fn mushroom_behavior(&mut self, entity: EntityId) {
        let Some(record) = self.world.entity(entity) else {
            return;
        };
        let position = record.position;
        let EntityKind::Mushroom { behavior_period } = record.kind else {
            return;
        };

        let mut neighbors = position.cardinal_neighbors().to_vec();
        neighbors.shuffle(&mut self.rng);
        let eligible: Vec<Point> = neighbors
            .into_iter()
            .filter(|&p| {
                self.world.in_bounds(p)
                    && !self.world.is_occupied(p)
                    && self.world.background(p).is_some()
            })
            .collect();

        let grass_cell = eligible
            .iter()
            .copied()
            .find(|&p| self.background_id(p) == Some(GRASS_KEY));
        if let Some(cell) = grass_cell {
            self.world
                .set_background(cell, Background::new(GRASS_MUSHROOMS_KEY));
        } else {
            let spread_cell = eligible
                .iter()
                .copied()
                .find(|&p| self.background_id(p) == Some(GRASS_MUSHROOMS_KEY));
            if let Some(cell) = spread_cell {
                let spawned = Entity::mushroom(
                    MUSHROOM_KEY,
                    cell,
                    self.sprites.get(MUSHROOM_KEY),
                    behavior_period * 4.0,
                );
                self.spawn(spawned);
            }
        }

        self.reschedule_behavior(entity);
    }

    fn sapling_behavior(&mut self, entity: EntityId) {
        if let Some(record) = self.world.entity_mut(entity) {
            if let EntityKind::Sapling { health } = &mut record.kind {
                *health += 1;
            }
        }
        if !self.transform_sapling(entity) {
            self.reschedule_behavior(entity);
        }
    }

    /// Withered saplings leave a stump; grown ones mature into a tree with
    /// randomized periods and health.
    fn transform_sapling(&mut self, entity: EntityId) -> bool {
        let Some(record) = self.world.entity(entity) else {
            return false;
        };
        let EntityKind::Sapling { health } = record.kind else {
            return false;
        };
        if health <= 0 {
            self.replace_with_stump(entity)
        } else if health >= SAPLING_HEALTH_LIMIT {
            let id = format!("{TREE_KEY}_{}", record.id);
            let position = record.position;
            let animation_period = self
                .rng
                .gen_range(TREE_ANIMATION_PERIOD_MIN..TREE_ANIMATION_PERIOD_MAX);
            let behavior_period = self
                .rng
                .gen_range(TREE_BEHAVIOR_PERIOD_MIN..TREE_BEHAVIOR_PERIOD_MAX);
            let health = self.rng.gen_range(TREE_HEALTH_MIN..TREE_HEALTH_MAX);
            let tree = Entity::tree(
                id,
                position,
                self.sprites.get(TREE_KEY),
                animation_period,
                behavior_period,
                health,
            );
            self.replace_entity(entity, tree);
            true
        } else {
            false
        }
    }

    fn tree_behavior(&mut self, entity: EntityId) {
        if !self.transform_tree(entity) {
            self.reschedule_behavior(entity);
        }
    }

    fn transform_tree(&mut self, entity: EntityId) -> bool {
        let Some(record) = self.world.entity(entity) else {
            return false;
        };
        let EntityKind::Tree { health, .. } = record.kind else {
            return false;
        };
        if health <= 0 {
            self.replace_with_stump(entity)
        } else {
            false
        }
    }

    fn replace_with_stump(&mut self, entity: EntityId) -> bool {
        let Some(record) = self.world.entity(entity) else {
            return false;
        };
        let id = format!("{STUMP_KEY}_{}", record.id);
        let position = record.position;
        let stump = Entity::stump(id, position, self.sprites.get(STUMP_KEY));
        self.replace_entity(entity, stump);
        true
    }

    fn bad_dude_behavior(&mut self, entity: EntityId) {
        if let Some(target) = self.bad_dude_target(entity) {
            if self.bad_dude_move_to(entity, target) {
                self.detonate_adjacent_houses(entity);
            }
        }
        self.reschedule_behavior(entity);
    }

    /// Payload carriers hunt houses; the rest chase dudes.
    fn bad_dude_target(&self, entity: EntityId) -> Option<EntityId> {
        let record = self.world.entity(entity)?;
        let EntityKind::BadDude { has_payload, .. } = record.kind else {
            return None;
        };
        let wanted: &[Species] = if has_payload {
            &[Species::House]
        } else {
            &[Species::Dude]
        };
        self.world.find_nearest(record.position, wanted)
    }

    fn bad_dude_move_to(&mut self, entity: EntityId, target: EntityId) -> bool {
        let Some(position) = self.entity_position(entity) else {
            return false;
        };
        let Some(target_position) = self.entity_position(target) else {
            return false;
        };
        if position.adjacent_to(target_position) {
            match self.species_of(target) {
                Some(Species::House) => {
                    if let Some(record) = self.world.entity_mut(entity) {
                        if let EntityKind::BadDude { has_payload, .. } = &mut record.kind {
                            *has_payload = false;
                        }
                    }
                    true
                }
                Some(Species::Dude) => {
                    if let Some(record) = self.world.entity_mut(entity) {
                        if let EntityKind::BadDude { dudes_killed, .. } = &mut record.kind {
                            *dudes_killed += 1;
                        }
                    }
                    self.world.remove_entity(&mut self.scheduler, target);
                    false
                }
                _ => false,
            }
        } else {
            self.step_toward(entity, target_position, Passability::ThroughStumps);
            false
        }
    }

    /// Raze every house on a cardinal neighbor, scorching its cell and paving
    /// the cells around it before leaving an explosion where it stood.
    fn detonate_adjacent_houses(&mut self, entity: EntityId) {
        let Some(position) = self.entity_position(entity) else {
            return;
        };
        for neighbor in position.cardinal_neighbors() {
            let Some(occupant) = self.world.occupant(neighbor) else {
                continue;
            };
            if self.species_of(occupant) != Some(Species::House) {
                continue;
            }
            self.world
                .set_background(neighbor, Background::new(EXPLODED_KEY));
            for road in neighbor.cardinal_neighbors() {
                if self.world.in_bounds(road) {
                    self.world.set_background(road, Background::new(ROAD_KEY));
                }
            }
            self.world.remove_entity(&mut self.scheduler, occupant);
            let explosion =
                Entity::explosion(EXPLOSION_KEY, neighbor, self.sprites.get(EXPLOSION_KEY));
            self.spawn(explosion);
        }
    }

    fn car_behavior(&mut self, entity: EntityId) {
        if let Some(target) = self.car_target(entity) {
            if self.car_move_to(entity, target) {
                self.transform_car(entity);
            }
        }
        self.reschedule_behavior(entity);
    }

    /// Loaded cars look for a mushroom patch; after a drop-off they stalk
    /// houses until the cooldown runs out, and otherwise hunt for a fare.
    fn car_target(&mut self, entity: EntityId) -> Option<EntityId> {
        let record = self.world.entity_mut(entity)?;
        let position = record.position;
        let EntityKind::Car {
            passenger,
            house_cooldown,
            ..
        } = &mut record.kind
        else {
            return None;
        };
        let wanted: &[Species] = if passenger.is_some() {
            &[Species::Mushroom]
        } else if *house_cooldown > 0 {
            *house_cooldown -= 1;
            &[Species::House]
        } else {
            &[Species::Dude]
        };
        self.world.find_nearest(position, wanted)
    }

    fn car_move_to(&mut self, entity: EntityId, target: EntityId) -> bool {
        let Some(position) = self.entity_position(entity) else {
            return false;
        };
        let Some(target_position) = self.entity_position(target) else {
            return false;
        };
        // Cells a passenger could step out onto.
        let clear: Vec<Point> = position
            .cardinal_neighbors()
            .iter()
            .copied()
            .filter(|&p| self.world.in_bounds(p) && !self.world.is_occupied(p))
            .collect();
        if position.adjacent_to(target_position) {
            match self.species_of(target) {
                Some(Species::Dude) if !self.car_is_full(entity) => {
                    self.pick_up_dude(entity, target);
                    false
                }
                Some(Species::Mushroom) if self.car_is_full(entity) && !clear.is_empty() => {
                    if let Some(record) = self.world.entity_mut(entity) {
                        if let EntityKind::Car {
                            passenger: Some(rider),
                            ..
                        } = &mut record.kind
                        {
                            rider.position = clear[0];
                        }
                    }
                    true
                }
                _ => false,
            }
        } else {
            self.step_toward(entity, target_position, Passability::ThroughFairies);
            false
        }
    }

    fn car_is_full(&self, entity: EntityId) -> bool {
        matches!(
            self.world.entity(entity).map(|record| &record.kind),
            Some(EntityKind::Car {
                passenger: Some(_),
                ..
            })
        )
    }

    fn pick_up_dude(&mut self, entity: EntityId, dude: EntityId) {
        let Some(record) = self.world.entity(dude) else {
            return;
        };
        let EntityKind::Dude {
            animation_period,
            behavior_period,
            resource_count,
            resource_limit,
        } = record.kind
        else {
            return;
        };
        let boarded = Passenger {
            id: record.id.clone(),
            animation_period,
            behavior_period,
            resource_count,
            resource_limit,
            position: record.position,
        };
        self.world.remove_entity(&mut self.scheduler, dude);
        if let Some(record) = self.world.entity_mut(entity) {
            if let EntityKind::Car { passenger, .. } = &mut record.kind {
                *passenger = Some(boarded);
            }
        }
    }

    /// Let the passenger out beside the car and start the house-stalking
    /// cooldown.
    fn transform_car(&mut self, entity: EntityId) -> bool {
        let Some(record) = self.world.entity_mut(entity) else {
            return false;
        };
        let EntityKind::Car {
            behavior_period,
            passenger,
            house_cooldown,
            ..
        } = &mut record.kind
        else {
            return false;
        };
        let Some(rider) = passenger.take() else {
            return false;
        };
        *house_cooldown = (1.0 / *behavior_period).trunc() as u32 * 5;
        let sprite = self.sprites.get(DUDE_KEY);
        let dude = Entity::dude(
            rider.id,
            rider.position,
            sprite,
            rider.animation_period,
            rider.behavior_period,
            rider.resource_count,
            rider.resource_limit,
        );
        self.spawn(dude);
        true
    }

    fn explosion_behavior(&mut self, entity: EntityId) {
        let Some(record) = self.world.entity(entity) else {
            return;
        };
        if record.image_index >= EXPLOSION_LAST_FRAME {
            self.world.remove_entity(&mut self.scheduler, entity);
        } else {
            self.reschedule_behavior(entity);
        }
    }

    fn water_trail_behavior(&mut self, entity: EntityId) {
        let Some(record) = self.world.entity(entity) else {
            return;
        };
        if record.image_index >= WATER_TRAIL_LAST_FRAME {
            self.transform_water_trail(entity);
        } else {
            self.reschedule_behavior(entity);
        }
    }

    fn transform_water_trail(&mut self, entity: EntityId) -> bool {
        let Some(position) = self.entity_position(entity) else {
            return false;
        };
        self.world.remove_entity(&mut self.scheduler, entity);
        let water = Entity::water(WATER_KEY, position, self.sprites.get(WATER_TILE_KEY));
        self.spawn(water);
        true
    }

    /// Houses go up the moment a bad dude stands next door.
    fn transform_house(&mut self, entity: EntityId) -> bool {
        let Some(position) = self.entity_position(entity) else {
            return false;
        };
        let threatened = position.cardinal_neighbors().iter().any(|&p| {
            self.world
                .occupant(p)
                .and_then(|occupant| self.species_of(occupant))
                == Some(Species::BadDude)
        });
        if !threatened {
            return false;
        }
        self.world.remove_entity(&mut self.scheduler, entity);
        let explosion =
            Entity::explosion(EXPLOSION_KEY, position, self.sprites.get(EXPLOSION_KEY));
        self.spawn(explosion);
        true
    }
}
