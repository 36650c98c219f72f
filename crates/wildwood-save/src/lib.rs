//! Text world-description parser.
//!
//! A world description is line oriented. `Rows:` and `Cols:` fix the grid
//! dimensions, each `Background:` line appends one row of background keys,
//! and each `Entity:` line places one entity. Lines starting with `#` are
//! comments, and anything else is ignored.

use std::fs;
use std::path::Path;
use thiserror::Error;
use wildwood_core::{entity, Background, Entity, Point, SpriteLibrary, World, WorldError};

/// Reasons a world description fails to load.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unable to read world description")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    World(#[from] WorldError),
    #[error("world dimensions must be positive, got {rows} rows x {cols} cols")]
    NonPositiveDimensions { rows: i32, cols: i32 },
    #[error("{actual} background rows given for a world with {declared} rows")]
    BackgroundOverflow { actual: usize, declared: i32 },
    #[error("unknown entity key `{key}`")]
    UnknownEntityKey { key: String },
    #[error("entity lines must be formatted as `key id x y ...`, got `{line}`")]
    MalformedEntity { line: String },
    #[error("`{key}` takes {expected} properties, got {actual}")]
    PropertyCount {
        key: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{field} must be an integer, got `{value}`")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{field} must be `true` or `false`, got `{value}`")]
    InvalidFlag { field: &'static str, value: String },
    #[error("{field} must be a positive number, got `{value}`")]
    NonPositivePeriod { field: &'static str, value: String },
}

#[derive(Debug, Default, Clone, Copy)]
struct Dimensions {
    rows: i32,
    cols: i32,
}

/// Load a world from a description file on disk.
pub fn load_world_file(
    path: impl AsRef<Path>,
    sprites: &SpriteLibrary,
) -> Result<World, ParseError> {
    let source = fs::read_to_string(path)?;
    load_world(&source, sprites)
}

/// Load a world from an in-memory description.
pub fn load_world(source: &str, sprites: &SpriteLibrary) -> Result<World, ParseError> {
    let mut dimensions = Dimensions::default();
    let mut background_rows: Vec<Vec<Option<Background>>> = Vec::new();
    let mut entities: Vec<Entity> = Vec::new();

    for raw in source.lines() {
        let line = raw.trim();
        if line.starts_with('#') {
            continue;
        }
        let Some((keyword, remainder)) = split_directive(line) else {
            continue;
        };
        match keyword {
            "Rows" => dimensions.rows = parse_int("row count", remainder.trim())?,
            "Cols" => dimensions.cols = parse_int("column count", remainder.trim())?,
            "Background" => {
                background_rows.push(parse_background_row(remainder.trim(), dimensions.cols));
            }
            "Entity" => entities.push(parse_entity(remainder.trim(), sprites)?),
            _ => {}
        }
    }

    if dimensions.rows <= 0 || dimensions.cols <= 0 {
        return Err(ParseError::NonPositiveDimensions {
            rows: dimensions.rows,
            cols: dimensions.cols,
        });
    }
    if background_rows.len() > dimensions.rows as usize {
        return Err(ParseError::BackgroundOverflow {
            actual: background_rows.len(),
            declared: dimensions.rows,
        });
    }

    let mut world = World::new(dimensions.rows, dimensions.cols)?;
    for (y, row) in background_rows.into_iter().enumerate() {
        for (x, cell) in row.into_iter().take(dimensions.cols as usize).enumerate() {
            if let Some(background) = cell {
                world.set_background(Point::new(x as i32, y as i32), background);
            }
        }
    }
    for record in entities {
        world.add_entity(record)?;
    }
    Ok(world)
}

/// Splits `Keyword: remainder`. The colon must be followed by whitespace, or
/// the line is not a directive at all.
fn split_directive(line: &str) -> Option<(&str, &str)> {
    let (keyword, rest) = line.split_once(':')?;
    let remainder = rest.strip_prefix(|c: char| c.is_whitespace())?;
    Some((keyword, remainder))
}

/// One background row. Tokens split on single whitespace characters, so a
/// doubled space leaves that cell without a background; tokens beyond the
/// declared column count are dropped.
fn parse_background_row(parameters: &str, cols: i32) -> Vec<Option<Background>> {
    parameters
        .split(|c: char| c.is_whitespace())
        .map(|key| (!key.is_empty()).then(|| Background::new(key)))
        .take(cols.max(0) as usize)
        .collect()
}

fn parse_entity(parameters: &str, sprites: &SpriteLibrary) -> Result<Entity, ParseError> {
    let args: Vec<&str> = parameters.split(|c: char| c.is_whitespace()).collect();
    if args.len() < 4 {
        return Err(ParseError::MalformedEntity {
            line: parameters.to_string(),
        });
    }
    let key = args[0];
    let id = args[1];
    let position = Point::new(
        parse_int("entity x coordinate", args[2])?,
        parse_int("entity y coordinate", args[3])?,
    );
    let properties = &args[4..];

    match key {
        entity::DUDE_KEY => {
            expect_properties(entity::DUDE_KEY, 3, properties)?;
            let behavior_period = parse_period("dude behavior period", properties[0])?;
            let animation_period = parse_period("dude animation period", properties[1])?;
            let resource_limit = parse_count("dude resource limit", properties[2])?;
            Ok(Entity::dude(
                id,
                position,
                sprites.get(entity::DUDE_KEY),
                animation_period,
                behavior_period,
                0,
                resource_limit,
            ))
        }
        entity::FAIRY_KEY => {
            expect_properties(entity::FAIRY_KEY, 2, properties)?;
            let behavior_period = parse_period("fairy behavior period", properties[0])?;
            let animation_period = parse_period("fairy animation period", properties[1])?;
            Ok(Entity::fairy(
                id,
                position,
                sprites.get(entity::FAIRY_KEY),
                animation_period,
                behavior_period,
            ))
        }
        entity::HOUSE_KEY => {
            expect_properties(entity::HOUSE_KEY, 0, properties)?;
            Ok(Entity::house(id, position, sprites.get(entity::HOUSE_KEY)))
        }
        entity::MUSHROOM_KEY => {
            expect_properties(entity::MUSHROOM_KEY, 1, properties)?;
            let behavior_period = parse_period("mushroom behavior period", properties[0])?;
            Ok(Entity::mushroom(
                id,
                position,
                sprites.get(entity::MUSHROOM_KEY),
                behavior_period,
            ))
        }
        entity::SAPLING_KEY => {
            expect_properties(entity::SAPLING_KEY, 0, properties)?;
            Ok(Entity::sapling(
                id,
                position,
                sprites.get(entity::SAPLING_KEY),
            ))
        }
        entity::STUMP_KEY => {
            expect_properties(entity::STUMP_KEY, 0, properties)?;
            Ok(Entity::stump(id, position, sprites.get(entity::STUMP_KEY)))
        }
        entity::TREE_KEY => {
            expect_properties(entity::TREE_KEY, 3, properties)?;
            let behavior_period = parse_period("tree behavior period", properties[0])?;
            let animation_period = parse_period("tree animation period", properties[1])?;
            let health = parse_int("tree health", properties[2])?;
            Ok(Entity::tree(
                id,
                position,
                sprites.get(entity::TREE_KEY),
                animation_period,
                behavior_period,
                health,
            ))
        }
        entity::WATER_KEY => {
            expect_properties(entity::WATER_KEY, 0, properties)?;
            Ok(Entity::water(id, position, sprites.get(entity::WATER_KEY)))
        }
        entity::BAD_DUDE_KEY => {
            expect_properties(entity::BAD_DUDE_KEY, 3, properties)?;
            let behavior_period = parse_period("bad dude behavior period", properties[0])?;
            let animation_period = parse_period("bad dude animation period", properties[1])?;
            let has_payload = parse_flag("bad dude payload flag", properties[2])?;
            Ok(Entity::bad_dude(
                id,
                position,
                sprites.get(entity::BAD_DUDE_KEY),
                animation_period,
                behavior_period,
                has_payload,
            ))
        }
        entity::CAR_KEY => {
            expect_properties(entity::CAR_KEY, 2, properties)?;
            let behavior_period = parse_period("car behavior period", properties[0])?;
            let animation_period = parse_period("car animation period", properties[1])?;
            Ok(Entity::car(
                id,
                position,
                sprites.get(entity::CAR_KEY),
                animation_period,
                behavior_period,
            ))
        }
        entity::EXPLOSION_KEY => {
            expect_properties(entity::EXPLOSION_KEY, 0, properties)?;
            Ok(Entity::explosion(
                id,
                position,
                sprites.get(entity::EXPLOSION_KEY),
            ))
        }
        entity::WATER_TRAIL_KEY => {
            expect_properties(entity::WATER_TRAIL_KEY, 0, properties)?;
            Ok(Entity::water_trail(
                id,
                position,
                sprites.get(entity::WATER_TRAIL_KEY),
            ))
        }
        _ => Err(ParseError::UnknownEntityKey {
            key: key.to_string(),
        }),
    }
}

fn expect_properties(
    key: &'static str,
    expected: usize,
    properties: &[&str],
) -> Result<(), ParseError> {
    if properties.len() == expected {
        Ok(())
    } else {
        Err(ParseError::PropertyCount {
            key,
            expected,
            actual: properties.len(),
        })
    }
}

fn parse_int(field: &'static str, value: &str) -> Result<i32, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn parse_count(field: &'static str, value: &str) -> Result<u32, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn parse_period(field: &'static str, value: &str) -> Result<f64, ParseError> {
    let period: f64 = value.parse().map_err(|_| ParseError::NonPositivePeriod {
        field,
        value: value.to_string(),
    })?;
    if period > 0.0 {
        Ok(period)
    } else {
        Err(ParseError::NonPositivePeriod {
            field,
            value: value.to_string(),
        })
    }
}

fn parse_flag(field: &'static str, value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidFlag {
            field,
            value: value.to_string(),
        }),
    }
}
