use crate::ability::{Ability, DamageKind, TargetType};
use crate::attribute::AttributeKind;
use crate::state::Unit;

/// Damage `ability` used by `actor` deals to `target`, never negative.
///
/// Only hostile abilities (single or area) deal damage; self and ally
/// abilities carry effects only.
pub fn ability_damage(ability: &Ability, actor: &Unit, target: &Unit) -> i32 {
    if !matches!(ability.target_type, TargetType::Single | TargetType::Area) {
        return 0;
    }
    let raw = match ability.damage_kind {
        DamageKind::Physical => {
            ability.power + actor.attack_power() - target.attributes.current(AttributeKind::Defense)
        }
        DamageKind::Magical => {
            ability.power + actor.attributes.current(AttributeKind::Magic)
                - target.attributes.current(AttributeKind::Resistance)
        }
        DamageKind::None => 0,
    };
    raw.max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{AbilityId, Item, ItemId};
    use crate::state::{Faction, Position, UnitId};

    fn unit(id: u32, faction: Faction) -> Unit {
        Unit::new(UnitId(id), "u", faction, Position::ORIGIN)
            .with_attribute(AttributeKind::Attack, 6)
            .with_attribute(AttributeKind::Defense, 2)
            .with_attribute(AttributeKind::Magic, 4)
            .with_attribute(AttributeKind::Resistance, 1)
    }

    #[test]
    fn physical_damage_includes_the_weapon() {
        let sword = Item::new(ItemId(1), "Sword").with_attribute(AttributeKind::Attack, 3);
        let actor = unit(1, Faction::Player).with_weapon(sword);
        let target = unit(2, Faction::Enemy);
        assert_eq!(ability_damage(&Ability::basic_attack(), &actor, &target), 7);
    }

    #[test]
    fn magical_damage_uses_magic_and_resistance() {
        let bolt = Ability::new(AbilityId(2), "Bolt", TargetType::Single)
            .with_damage_kind(DamageKind::Magical)
            .with_power(2);
        assert_eq!(ability_damage(&bolt, &unit(1, Faction::Player), &unit(2, Faction::Enemy)), 5);
    }

    #[test]
    fn damage_never_goes_negative() {
        let weak = unit(1, Faction::Player).with_attribute(AttributeKind::Health, 1);
        let armoured = Unit::new(UnitId(2), "Wall", Faction::Enemy, Position::ORIGIN)
            .with_attribute(AttributeKind::Defense, 50);
        assert_eq!(ability_damage(&Ability::basic_attack(), &weak, &armoured), 0);
    }

    #[test]
    fn support_abilities_deal_no_damage() {
        let heal = Ability::new(AbilityId(3), "Heal", TargetType::Ally).with_power(10);
        assert_eq!(ability_damage(&heal, &unit(1, Faction::Player), &unit(2, Faction::Player)), 0);
    }
}
