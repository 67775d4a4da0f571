//! Legality checks exercised through the public API.
//!
//! - Move-into and move-through truth tables
//! - Commander movement range
//! - Initiative tie-breaks
//! - Legal move search on the standard board

use rust_wargame::board::{Board, BoardShape, Coordinate, Facing, Terrain, UnitPresence};
use rust_wargame::cards::CardRegistry;
use rust_wargame::core::{PlayerMap, PlayerSide, RuleViolation, RulesConfig};
use rust_wargame::rules::{
    can_move_into, can_move_through, classify_engagement, determine_initiative, is_legal_commander_move,
    is_legal_unit_move, legal_unit_moves, EngagementAngle, Ruleset,
};
use rust_wargame::units::{UnitInstance, UnitPlacement, UnitRegistry, UnitType, UnitTypeId};

const NIMBLE: UnitTypeId = UnitTypeId::new(1);
const STIFF: UnitTypeId = UnitTypeId::new(2);

fn c(text: &str) -> Coordinate {
    text.parse().unwrap()
}

fn ruleset() -> Ruleset {
    let mut units = UnitRegistry::new();
    units.register(UnitType::new(NIMBLE, "Nimble").with_flexibility(2));
    units.register(UnitType::new(STIFF, "Stiff").with_flexibility(1));
    Ruleset::new(RulesConfig::default(), units, CardRegistry::new())
}

fn unit(side: PlayerSide, unit_type: UnitTypeId, instance: u8) -> UnitInstance {
    UnitInstance::new(side, unit_type, instance)
}

fn board() -> Board {
    Board::new(BoardShape::STANDARD)
}

#[test]
fn test_move_into_truth_table() {
    let mover = unit(PlayerSide::One, NIMBLE, 1);
    let friend = unit(PlayerSide::One, NIMBLE, 2);
    let enemy = unit(PlayerSide::Two, NIMBLE, 1);
    let engaged = UnitPresence::engaged(
        unit(PlayerSide::One, STIFF, 1),
        Facing::South,
        unit(PlayerSide::Two, STIFF, 1),
        EngagementAngle::Front,
    )
    .unwrap();

    let board = board()
        .with_unit(friend, c("E-5"), Facing::South)
        .with_unit(enemy, c("E-6"), Facing::North)
        .with_presence(c("E-7"), engaged);

    assert_eq!(can_move_into(&mover, &board, c("E-4")), Ok(()));
    assert_eq!(
        can_move_into(&mover, &board, c("E-5")),
        Err(RuleViolation::FriendlyOccupied(c("E-5")))
    );
    assert_eq!(can_move_into(&mover, &board, c("E-6")), Ok(()));
    assert_eq!(
        can_move_into(&mover, &board, c("E-7")),
        Err(RuleViolation::SpaceEngaged(c("E-7")))
    );

    let wet = board.with_terrain(c("E-4"), Terrain::Water);
    assert_eq!(
        can_move_into(&mover, &wet, c("E-4")),
        Err(RuleViolation::Impassable(c("E-4")))
    );
}

#[test]
fn test_move_through_threshold() {
    let rules = ruleset();
    let nimble = unit(PlayerSide::One, NIMBLE, 1);
    let stiff = unit(PlayerSide::One, STIFF, 1);
    let board = board()
        .with_unit(unit(PlayerSide::One, NIMBLE, 2), c("E-5"), Facing::South)
        .with_unit(unit(PlayerSide::One, STIFF, 2), c("E-6"), Facing::South)
        .with_unit(unit(PlayerSide::Two, NIMBLE, 1), c("E-7"), Facing::North);

    // 2 + 2 meets the threshold of 4; 1 + 2 does not.
    assert_eq!(can_move_through(&rules, &nimble, &board, c("E-5")), Ok(()));
    assert_eq!(
        can_move_through(&rules, &stiff, &board, c("E-5")),
        Err(RuleViolation::InsufficientFlexibility {
            combined: 3,
            required: 4
        })
    );
    assert!(can_move_through(&rules, &nimble, &board, c("E-6")).is_err());
    assert_eq!(
        can_move_through(&rules, &nimble, &board, c("E-7")),
        Err(RuleViolation::EnemyOccupied(c("E-7")))
    );
    assert_eq!(can_move_through(&rules, &nimble, &board, c("E-8")), Ok(()));
}

#[test]
fn test_commander_range() {
    let board = board().with_commander_moved(PlayerSide::One, None, c("A-5"));

    assert_eq!(is_legal_commander_move(&board, PlayerSide::One, c("A-5"), c("E-5"), 4), Ok(()));
    assert_eq!(is_legal_commander_move(&board, PlayerSide::One, c("A-5"), c("D-9"), 4), Ok(()));
    assert!(matches!(
        is_legal_commander_move(&board, PlayerSide::One, c("A-5"), c("F-5"), 4),
        Err(RuleViolation::CommanderOutOfRange { .. })
    ));
    assert!(matches!(
        is_legal_commander_move(&board, PlayerSide::One, c("A-6"), c("A-7"), 4),
        Err(RuleViolation::CommanderNotPresent { .. })
    ));
    assert!(is_legal_commander_move(&board, PlayerSide::Two, c("A-5"), c("A-6"), 4).is_err());
}

#[test]
fn test_initiative() {
    let tied = PlayerMap::default().with(PlayerSide::One, 4).with(PlayerSide::Two, 4);
    assert_eq!(determine_initiative(PlayerSide::Two, &tied), PlayerSide::Two);
    assert_eq!(determine_initiative(PlayerSide::One, &tied), PlayerSide::One);

    let low_two = PlayerMap::default().with(PlayerSide::One, 6).with(PlayerSide::Two, 1);
    assert_eq!(determine_initiative(PlayerSide::One, &low_two), PlayerSide::Two);
    assert_eq!(determine_initiative(PlayerSide::Two, &low_two), PlayerSide::Two);
}

#[test]
fn test_engagement_classes() {
    assert_eq!(classify_engagement(Facing::South, Facing::North), EngagementAngle::Front);
    assert_eq!(classify_engagement(Facing::East, Facing::North), EngagementAngle::Flank);
    assert_eq!(classify_engagement(Facing::North, Facing::North), EngagementAngle::Rear);
    assert_eq!(classify_engagement(Facing::NorthEast, Facing::North), EngagementAngle::Rear);
}

#[test]
fn test_legal_moves_on_open_ground() {
    let rules = ruleset();
    let mover = unit(PlayerSide::One, NIMBLE, 1);
    let start = UnitPlacement::new(c("C-9"), Facing::South);
    let board = board().with_unit(mover, c("C-9"), Facing::South);

    let moves = legal_unit_moves(&rules, &board, &mover, start, 0);
    assert!(!moves.contains(&start));
    assert!(moves.contains(&UnitPlacement::new(c("E-9"), Facing::South)));
    assert!(moves.contains(&UnitPlacement::new(c("C-9"), Facing::SouthEast)));
    assert!(!moves.contains(&UnitPlacement::new(c("F-9"), Facing::South)));
    assert!(!moves.contains(&UnitPlacement::new(c("B-9"), Facing::South)));

    for placement in &moves {
        assert_eq!(is_legal_unit_move(&rules, &board, &mover, start, *placement, 0), Ok(()));
    }

    let faster = legal_unit_moves(&rules, &board, &mover, start, 1);
    assert!(faster.is_superset(&moves));
    assert!(faster.contains(&UnitPlacement::new(c("F-9"), Facing::South)));
}

#[test]
fn test_engaged_unit_cannot_move() {
    let rules = ruleset();
    let mover = unit(PlayerSide::One, NIMBLE, 1);
    let engaged = UnitPresence::engaged(
        mover,
        Facing::South,
        unit(PlayerSide::Two, NIMBLE, 1),
        EngagementAngle::Front,
    )
    .unwrap();
    let board = board().with_presence(c("E-5"), engaged);

    let start = UnitPlacement::new(c("E-5"), Facing::South);
    assert!(legal_unit_moves(&rules, &board, &mover, start, 3).is_empty());
}

#[test]
fn test_move_stops_on_enemy() {
    let rules = ruleset();
    let mover = unit(PlayerSide::One, NIMBLE, 1);
    let enemy = unit(PlayerSide::Two, NIMBLE, 1);
    let board = board()
        .with_unit(mover, c("C-9"), Facing::South)
        .with_unit(enemy, c("D-9"), Facing::North);
    let start = UnitPlacement::new(c("C-9"), Facing::South);

    let moves = legal_unit_moves(&rules, &board, &mover, start, 1);
    assert!(moves.contains(&UnitPlacement::new(c("D-9"), Facing::South)));
    // Contact ends the move: no turning on the enemy's space afterwards.
    assert!(!moves.contains(&UnitPlacement::new(c("D-9"), Facing::East)));
    assert!(!moves.contains(&UnitPlacement::new(c("D-9"), Facing::West)));
}
