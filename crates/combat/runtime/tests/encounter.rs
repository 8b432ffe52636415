use std::sync::Arc;

use combat_core::{AttributeKind, Battlefield, Faction, Item, ItemId, Position, Unit, UnitId};
use combat_runtime::{
    Collaborators, CombatStateMachine, Encounter, EncounterOutcome, EncounterSummary,
    NearestTargetIntent, RuntimeConfig,
};

fn fighter(id: u32, faction: Faction, x: i32, z: i32, speed: i32) -> Unit {
    Unit::new(UnitId(id), format!("fighter-{id}"), faction, Position::new(x, z))
        .with_attribute(AttributeKind::Health, 14)
        .with_attribute(AttributeKind::Attack, 5)
        .with_attribute(AttributeKind::Defense, 1)
        .with_attribute(AttributeKind::Movement, 3)
        .with_attribute(AttributeKind::Speed, speed)
}

fn skirmish() -> Encounter {
    let mut field = Battlefield::new(8, 8);
    let spear = Item::new(ItemId(1), "Spear")
        .with_attribute(AttributeKind::Range, 2)
        .with_attribute(AttributeKind::Attack, 1);
    let units = [
        fighter(1, Faction::Player, 1, 1, 6).with_weapon(spear),
        fighter(2, Faction::Player, 2, 1, 4),
        fighter(3, Faction::Player, 1, 2, 3),
        fighter(4, Faction::Enemy, 6, 6, 5),
        fighter(5, Faction::Enemy, 5, 6, 4),
        fighter(6, Faction::Enemy, 6, 5, 2),
    ];
    for unit in units {
        field.spawn(unit).expect("spawn");
    }
    Encounter::new(field)
}

async fn autoplay() -> EncounterSummary {
    let collaborators = Collaborators::default().with_autopilot(Arc::new(NearestTargetIntent));
    let config = RuntimeConfig::default().with_max_turns(200);
    let (mut machine, _handle) = CombatStateMachine::new(skirmish(), collaborators, config);
    machine.run().await.expect("encounter runs to completion")
}

#[tokio::test]
async fn autopilot_encounter_reaches_an_outcome() {
    let summary = autoplay().await;
    let outcome = summary.outcome.expect("outcome");
    assert_ne!(outcome, EncounterOutcome::Aborted);
    assert!(summary.actions > 0);
    assert!(summary.turns <= 200);

    match outcome {
        EncounterOutcome::Victory => assert_eq!(summary.survivors(Faction::Enemy).count(), 0),
        EncounterOutcome::Defeat => assert_eq!(summary.survivors(Faction::Player).count(), 0),
        _ => {}
    }
}

#[tokio::test]
async fn replaying_an_encounter_gives_the_same_digest() {
    let first = autoplay().await;
    let second = autoplay().await;
    assert_eq!(first.digest, second.digest);
    assert_eq!(first, second);
    assert_eq!(hex::encode(first.digest).len(), 64);
}

#[tokio::test]
async fn summary_serializes_to_json() {
    let summary = autoplay().await;
    let json = serde_json::to_value(&summary).expect("serialize");
    assert_eq!(json["units"].as_array().map(Vec::len), Some(6));
    assert!(json["outcome"].is_string());
}
