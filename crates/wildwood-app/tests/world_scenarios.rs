//! End-to-end runs of small worlds through the headless driver.
//!
//! Each scenario builds a description string, runs it for a fixed lifetime
//! with the A* strategy, and checks the survivor log.

use anyhow::Result;
use wildwood_app::{PathingChoice, run_headless};
use wildwood_core::WorldError;
use wildwood_save::ParseError;

fn describe(rows: i32, cols: i32, entities: &[&str]) -> String {
    let mut out = format!("Rows: {rows}\nCols: {cols}\n");
    for entity in entities {
        out.push_str("Entity: ");
        out.push_str(entity);
        out.push('\n');
    }
    out
}

fn run(source: &str, lifetime: f64) -> Result<Vec<String>> {
    run_headless(source, lifetime, Some(7), PathingChoice::AStar)
}

#[test]
fn backgrounds_parse_and_an_empty_world_logs_nothing() -> Result<()> {
    let text = "Rows: 3\n\
                Cols: 5\n\
                Background: grass grass grass grass grass\n\
                Background: grass  grass  grass\n\
                Background: grass grass grass grass grass grass\n\
                Entities:\n";

    let log = run(text, 1.0)?;
    assert!(log.is_empty());
    Ok(())
}

#[test]
fn dimensionless_descriptions_are_rejected() {
    for text in ["Entity:", "Background:"] {
        let err = run(text, 1.0).expect_err("missing dimensions must be rejected");
        assert!(matches!(
            err.downcast_ref::<ParseError>(),
            Some(ParseError::NonPositiveDimensions { .. })
        ));
    }
}

#[test]
fn one_cell_world_loads() -> Result<()> {
    let log = run("Rows: 1\nCols: 1\n", 1.0)?;
    assert!(log.is_empty());
    Ok(())
}

#[test]
fn zero_lifetime_reproduces_the_initial_listing() -> Result<()> {
    let text = describe(
        2,
        3,
        &[
            "dude worker 0 0 1.0 1.0 2",
            "tree elm 2 0 1.0 1.0 3",
            "house  1 1",
            "water pond 2 1",
        ],
    );
    let log = run(&text, 0.0)?;
    // The anonymous house stays out of the listing.
    assert_eq!(log, vec!["worker 0 0 0", "elm 2 0 0", "pond 2 1 0"]);
    Ok(())
}

#[test]
fn overlapping_entities_are_rejected() {
    let text = describe(1, 1, &["stump  0 0", "stump  0 0"]);
    let err = run(&text, 1.0).expect_err("double occupancy must be rejected");
    assert!(matches!(
        err.downcast_ref::<ParseError>(),
        Some(ParseError::World(WorldError::Occupied(_)))
    ));
}

#[test]
fn out_of_bounds_entities_are_rejected() {
    let text = describe(9, 4, &["house  4 9"]);
    let err = run(&text, 1.0).expect_err("placement past the edge must be rejected");
    assert!(matches!(
        err.downcast_ref::<ParseError>(),
        Some(ParseError::World(WorldError::OutOfBounds(_)))
    ));
}

#[test]
fn dude_animation_advances_with_the_clock() -> Result<()> {
    let text = describe(1, 1, &["dude test 0 0 1.0 0.1 1"]);
    let log = run(&text, 10.0)?;
    assert_eq!(log, vec!["test 0 0 100"]);
    Ok(())
}

#[test]
fn dude_stops_harvesting_at_its_resource_limit() -> Result<()> {
    let text = describe(
        1,
        6,
        &[
            "dude test 0 0 1.0 100.0 4",
            "tree  1 0 0.1 1.0 1",
            "tree  2 0 0.1 1.0 1",
            "tree  3 0 0.1 1.0 1",
            "tree  4 0 0.1 1.0 1",
            "tree  5 0 0.1 1.0 1",
        ],
    );
    let log = run(&text, 10.0)?;
    assert!(log.iter().any(|line| line == "test 3 0 0"));
    Ok(())
}

#[test]
fn dude_threads_the_water_maze_and_delivers() -> Result<()> {
    let text = describe(
        5,
        4,
        &[
            "dude test 0 0 1.0 100.0 1",
            "water  2 0",
            "water  0 2",
            "water  1 2",
            "water  1 3",
            "water  1 4",
            "stump stump 2 1",
            "tree tree 2 2 0.1 100.0 1",
            "stump stump 2 3",
            "water  3 3",
            "house  2 4",
        ],
    );
    let log = run(&text, 7.0)?;
    assert_eq!(log, vec!["test 2 3 0"]);
    Ok(())
}

#[test]
fn harvesting_dude_approaches_a_fenced_tree() -> Result<()> {
    let text = describe(
        4,
        4,
        &[
            "dude test 0 0 1.0 100.0 1",
            "water  2 0",
            "stump stump 2 1",
            "water  0 2",
            "water  1 2",
            "water  1 3",
            "tree  2 3 0.1 1.0 1",
        ],
    );
    let log = run(&text, 4.0)?;
    assert_eq!(log, vec!["test 2 2 0"]);
    Ok(())
}

#[test]
fn full_dude_tramples_a_stump_en_route() -> Result<()> {
    let text = describe(1, 5, &["dude  0 0 1.0 1.0 0", "stump test 2 0", "house  4 0"]);
    let log = run(&text, 3.0)?;
    assert!(log.is_empty());
    Ok(())
}

#[test]
fn harvesting_dude_tramples_a_stump_en_route() -> Result<()> {
    let text = describe(
        1,
        5,
        &["dude  0 0 1.0 1.0 1", "stump test 2 0", "tree  4 0 1.0 1.0 1"],
    );
    let log = run(&text, 3.0)?;
    assert!(log.is_empty());
    Ok(())
}

#[test]
fn delivered_dude_returns_for_more_wood() -> Result<()> {
    let text = describe(
        2,
        4,
        &[
            "tree  1 0 0.1 100.0 2",
            "water  2 0",
            "house  0 1",
            "dude test 1 1 1.0 100.0 2",
            "tree  3 1 0.1 100.0 100",
        ],
    );
    let log = run(&text, 5.0)?;
    assert!(log.iter().any(|line| line == "test 2 1 0"));
    Ok(())
}

#[test]
fn single_capacity_dude_delivers_immediately() -> Result<()> {
    let text = describe(
        1,
        4,
        &["tree  0 0 0.1 100.0 1", "dude test 1 0 1.0 100.0 1", "house  3 0"],
    );
    let log = run(&text, 5.0)?;
    assert_eq!(log.len(), 2);
    assert!(log.iter().any(|line| line == "test 2 0 0"));
    Ok(())
}

#[test]
fn fairy_animation_advances_with_the_clock() -> Result<()> {
    let text = describe(1, 1, &["fairy test 0 0 1.0 0.1"]);
    let log = run(&text, 10.0)?;
    assert_eq!(log, vec!["test 0 0 100"]);
    Ok(())
}

#[test]
fn fairy_walks_the_long_way_around_water() -> Result<()> {
    let text = describe(
        5,
        4,
        &[
            "fairy test 0 0 1.0 100.0",
            "water  2 0",
            "water  0 2",
            "water  1 2",
            "water  1 3",
            "water  1 4",
            "water  3 3",
            "stump  2 4",
        ],
    );
    let log = run(&text, 7.0)?;
    assert_eq!(log.len(), 2);
    assert!(log.iter().any(|line| line == "test 2 3 0"));
    Ok(())
}

#[test]
fn mushroom_colony_grows_to_seven_and_stalls() -> Result<()> {
    let text = "Rows: 3\n\
                Cols: 3\n\
                Background: grass  grass\n\
                Background: grass grass grass\n\
                Background: grass  grass\n\
                Entity: mushroom mushroom 1 1 1.0\n";

    let log = run(text, 20.0)?;
    assert_eq!(log.len(), 7);
    Ok(())
}

#[test]
fn chopped_sapling_reports_a_partial_growth_frame() -> Result<()> {
    let text = describe(1, 2, &["dude  0 0 3.0 100.0 100", "sapling test 1 0"]);
    let log = run(&text, 11.0)?;
    // Two growth ticks survive the chopping, so the five-frame sheet sits
    // at index 5 * 2 / 5.
    assert_eq!(log, vec!["test 1 0 2"]);
    Ok(())
}

#[test]
fn untouched_sapling_matures_into_a_tree() -> Result<()> {
    let text = describe(1, 1, &["sapling test 0 0"]);
    let log = run(&text, 10.0)?;
    assert_eq!(log, vec!["tree_test 0 0 0"]);
    Ok(())
}

#[test]
fn replanted_stump_grows_back_into_a_tree() -> Result<()> {
    let text = describe(2, 2, &["stump test 0 0", "fairy  1 0 1.0 1.0"]);
    let log = run(&text, 20.0)?;
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].split_whitespace().next(), Some("tree_sapling_test"));
    Ok(())
}

#[test]
fn tree_animation_advances_with_the_clock() -> Result<()> {
    let text = describe(1, 1, &["tree test 0 0 1.0 0.1 1"]);
    let log = run(&text, 10.0)?;
    assert_eq!(log, vec!["test 0 0 100"]);
    Ok(())
}

#[test]
fn overchopped_sapling_collapses_into_a_stump() -> Result<()> {
    let text = describe(2, 2, &["sapling test 0 0", "dude  1 0 0.1 100.0 1"]);
    let log = run(&text, 10.0)?;
    assert_eq!(log, vec!["stump_test 0 0 0"]);
    Ok(())
}

#[test]
fn fairy_turns_a_stump_into_a_sapling() -> Result<()> {
    let text = describe(2, 2, &["fairy  1 0 0.100 100.0", "stump mystump 0 0"]);
    let log = run(&text, 1.0)?;
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].split_whitespace().next(), Some("sapling_mystump"));
    Ok(())
}

#[test]
fn dead_tree_collapses_into_a_stump() -> Result<()> {
    let text = describe(2, 1, &["tree test 0 0 1.0 1.0 0"]);
    let log = run(&text, 1.0)?;
    assert_eq!(log, vec!["stump_test 0 0 0"]);
    Ok(())
}

#[test]
fn bad_dude_razes_the_nearest_house() -> Result<()> {
    let text = describe(
        1,
        4,
        &["bad_dude bomber 0 0 1.0 100.0 true", "house  2 0"],
    );
    let log = run(&text, 10.0)?;
    assert_eq!(log, vec!["bomber 1 0 0"]);
    Ok(())
}

#[test]
fn car_ferries_a_dude_to_the_mushroom_stop() -> Result<()> {
    let text = describe(
        2,
        5,
        &[
            "car cab 4 0 1.0 100.0",
            "dude fare 0 0 100.0 100.0 1",
            "mushroom  2 1 100.0",
        ],
    );
    let log = run(&text, 10.0)?;
    assert_eq!(log.len(), 2);
    assert!(log.iter().any(|line| line == "fare 1 0 0"));
    Ok(())
}

#[test]
fn water_trail_settles_into_open_water() -> Result<()> {
    let text = describe(1, 1, &["water_trail wake 0 0"]);
    let log = run(&text, 2.0)?;
    assert_eq!(log, vec!["water 0 0 0"]);
    Ok(())
}
