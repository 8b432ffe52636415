//! The built-in skirmish: three adventurers against three raiders.
use anyhow::{Context, Result};
use combat_core::{
    Ability, AbilityId, AttributeKind, Battlefield, DamageKind, Effect, Faction, Item, ItemId,
    Position, TargetType, Unit, UnitId,
};
use combat_runtime::Encounter;

const HEAL: AbilityId = AbilityId(1);
const FIREBOLT: AbilityId = AbilityId(2);
const WAR_CRY: AbilityId = AbilityId(3);

const POTION: ItemId = ItemId(1);
const SWORD: ItemId = ItemId(10);
const BOW: ItemId = ItemId(11);
const STAFF: ItemId = ItemId(12);

fn base(id: u32, name: &str, faction: Faction, position: Position) -> Unit {
    Unit::new(UnitId(id), name, faction, position)
        .with_attribute(AttributeKind::Mana, 10)
        .with_attribute(AttributeKind::Magic, 2)
        .with_attribute(AttributeKind::Resistance, 1)
}

fn potion() -> Item {
    Item::new(POTION, "Potion")
        .with_effect(Effect::Restore {
            attribute: AttributeKind::Health,
            amount: 8,
        })
        .with_quantity(2)
}

fn roster(width: i32, height: i32) -> Vec<Unit> {
    let (left, right) = (1, width - 2);
    let middle = height / 2;

    let sword = Item::new(SWORD, "Sword").with_attribute(AttributeKind::Attack, 3);
    let bow = Item::new(BOW, "Longbow")
        .with_attribute(AttributeKind::Range, 3)
        .with_attribute(AttributeKind::Attack, 1);
    let staff = Item::new(STAFF, "Staff").with_attribute(AttributeKind::Range, 2);

    let heal = Ability::new(HEAL, "Heal", TargetType::Ally)
        .with_range(3)
        .with_damage_kind(DamageKind::None)
        .with_effect(Effect::Restore {
            attribute: AttributeKind::Health,
            amount: 6,
        });
    let firebolt = Ability::new(FIREBOLT, "Firebolt", TargetType::Area)
        .with_range(3)
        .with_aoe(1)
        .with_damage_kind(DamageKind::Magical)
        .with_power(3);
    let war_cry = Ability::new(WAR_CRY, "War Cry", TargetType::SelfOnly)
        .with_damage_kind(DamageKind::None)
        .with_effect(Effect::Modify {
            attribute: AttributeKind::Attack,
            amount: 2,
            turns: 2,
        });

    vec![
        base(1, "Knight", Faction::Player, Position::new(left, middle))
            .with_attribute(AttributeKind::Health, 30)
            .with_attribute(AttributeKind::Attack, 6)
            .with_attribute(AttributeKind::Defense, 3)
            .with_attribute(AttributeKind::Movement, 3)
            .with_attribute(AttributeKind::Speed, 5)
            .with_weapon(sword)
            .with_ability(war_cry.clone()),
        base(2, "Archer", Faction::Player, Position::new(left, middle - 1))
            .with_attribute(AttributeKind::Health, 20)
            .with_attribute(AttributeKind::Attack, 5)
            .with_attribute(AttributeKind::Defense, 1)
            .with_attribute(AttributeKind::Movement, 3)
            .with_attribute(AttributeKind::Speed, 7)
            .with_weapon(bow)
            .with_item(potion()),
        base(3, "Cleric", Faction::Player, Position::new(left - 1, middle))
            .with_attribute(AttributeKind::Health, 18)
            .with_attribute(AttributeKind::Attack, 3)
            .with_attribute(AttributeKind::Defense, 1)
            .with_attribute(AttributeKind::Magic, 5)
            .with_attribute(AttributeKind::Movement, 2)
            .with_attribute(AttributeKind::Speed, 4)
            .with_weapon(staff.clone())
            .with_ability(heal)
            .with_item(potion()),
        base(4, "Raider", Faction::Enemy, Position::new(right, middle))
            .with_attribute(AttributeKind::Health, 22)
            .with_attribute(AttributeKind::Attack, 6)
            .with_attribute(AttributeKind::Defense, 2)
            .with_attribute(AttributeKind::Movement, 3)
            .with_attribute(AttributeKind::Speed, 6)
            .with_ability(war_cry),
        base(5, "Raider", Faction::Enemy, Position::new(right, middle - 1))
            .with_attribute(AttributeKind::Health, 22)
            .with_attribute(AttributeKind::Attack, 6)
            .with_attribute(AttributeKind::Defense, 2)
            .with_attribute(AttributeKind::Movement, 3)
            .with_attribute(AttributeKind::Speed, 3),
        base(6, "Shaman", Faction::Enemy, Position::new(right + 1, middle))
            .with_attribute(AttributeKind::Health, 16)
            .with_attribute(AttributeKind::Attack, 2)
            .with_attribute(AttributeKind::Defense, 0)
            .with_attribute(AttributeKind::Magic, 6)
            .with_attribute(AttributeKind::Movement, 2)
            .with_attribute(AttributeKind::Speed, 2)
            .with_weapon(staff)
            .with_ability(firebolt),
    ]
}

/// Builds the skirmish on a `width` x `height` board.
pub fn skirmish(width: u32, height: u32) -> Result<Encounter> {
    let mut field = Battlefield::new(width, height);
    for unit in roster(width as i32, height as i32) {
        let name = unit.name.clone();
        field
            .spawn(unit)
            .with_context(|| format!("failed to place {name}"))?;
    }
    Ok(Encounter::new(field))
}
