//! Erosion, item destruction and disenchantment (trap.c, zap.c, wield.c)

use super::obj::{Object, ObjectType};
use super::objclass::{ErodeKind, ObjectClass, worn_mask::*};
use crate::monster::Monster;
use crate::rng::GameRng;

/// Outcome of trying to erode one object (ER_* in C)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErodeResult {
    /// Material is not affected by this kind of erosion
    Nothing,
    /// Grease absorbed the damage
    Greased,
    /// Erosion-proofing or a blessing protected it
    Protected,
    /// Already fully eroded
    Maxed,
    /// Erosion advanced one step
    Damaged,
}

impl ErodeResult {
    /// Whether the object was touched at all, for the armor slot loop
    pub const fn affected(&self) -> bool {
        !matches!(self, ErodeResult::Nothing)
    }
}

/// Try to erode an object (erode_obj in C)
pub fn erode_obj(obj: &mut Object, kind: ErodeKind, rng: &mut GameRng) -> ErodeResult {
    if !kind.affects(obj.material()) {
        return ErodeResult::Nothing;
    }
    if obj.greased {
        if rng.one_in(2) {
            obj.greased = false;
        }
        return ErodeResult::Greased;
    }
    if obj.erodeproof || (obj.is_blessed() && rng.one_in(4)) {
        return ErodeResult::Protected;
    }
    if obj.add_erosion(kind) {
        ErodeResult::Damaged
    } else {
        ErodeResult::Maxed
    }
}

/// Erode one random piece of a monster's armor (erode_armor in C)
///
/// Returns the name of the piece that was hit, with the result.
pub fn erode_armor(
    mon: &mut Monster,
    kind: ErodeKind,
    rng: &mut GameRng,
) -> Option<(&'static str, ErodeResult)> {
    // Slots 0, 2, 3 and 4 retry when empty or unaffected; slot 1 always ends
    // the search. A pinned roll could otherwise retry forever.
    for _ in 0..32 {
        let slot = match rng.rn2(5) {
            0 => W_ARMH,
            1 => return erode_torso(mon, kind, rng),
            2 => W_ARMS,
            3 => W_ARMG,
            _ => W_ARMF,
        };
        if let Some(obj) = mon.worn_in_slot_mut(slot) {
            let result = erode_obj(obj, kind, rng);
            if result.affected() {
                return Some((obj.name(), result));
            }
        }
    }
    erode_torso(mon, kind, rng)
}

fn erode_torso(
    mon: &mut Monster,
    kind: ErodeKind,
    rng: &mut GameRng,
) -> Option<(&'static str, ErodeResult)> {
    for slot in [W_ARMC, W_ARM, W_ARMU] {
        if let Some(obj) = mon.worn_in_slot_mut(slot) {
            let result = erode_obj(obj, kind, rng);
            return Some((obj.name(), result));
        }
    }
    None
}

/// Items destroyed by an elemental attack
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Destroyed {
    /// Name and count of each destroyed stack
    pub stacks: Vec<(&'static str, i32)>,
    /// Total units destroyed, added to the attack's damage
    pub total: i32,
}

/// Destroy items of `class` in a monster's inventory (destroy_mitem in C)
///
/// Each unit of a vulnerable stack is lost with probability 1/3. Worn
/// accessories are spared, as are scrolls of fire against fire.
pub fn destroy_mitem(
    mon: &mut Monster,
    class: ObjectClass,
    kind: Element,
    rng: &mut GameRng,
) -> Destroyed {
    let mut report = Destroyed::default();
    let mut idx = 0;
    while idx < mon.inventory.len() {
        let obj = &mon.inventory[idx];
        if obj.class() != class || obj.is_worn() || !kind.destroys(obj.otyp) {
            idx += 1;
            continue;
        }
        let quantity = obj.quantity.max(0) as u32;
        let lost = (0..quantity).filter(|_| rng.one_in(3)).count() as i32;
        if lost == 0 {
            idx += 1;
            continue;
        }
        report.stacks.push((obj.name(), lost));
        report.total += lost;
        if lost >= mon.inventory[idx].quantity {
            mon.inventory.remove(idx);
        } else {
            mon.inventory[idx].quantity -= lost;
            idx += 1;
        }
    }
    report
}

/// Elements that destroy inventory items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Fire,
    Cold,
    Shock,
}

impl Element {
    fn destroys(&self, otyp: ObjectType) -> bool {
        let class = otyp.def().class;
        match self {
            Element::Fire => match class {
                ObjectClass::Scroll => otyp != ObjectType::ScrollOfFire,
                ObjectClass::Spellbook | ObjectClass::Potion => true,
                _ => false,
            },
            Element::Cold => class == ObjectClass::Potion,
            Element::Shock => matches!(class, ObjectClass::Ring | ObjectClass::Wand),
        }
    }

    /// Classes destroyed before the victim's resistance is checked
    pub const fn classes(&self) -> &'static [ObjectClass] {
        match self {
            Element::Fire => &[ObjectClass::Scroll, ObjectClass::Spellbook],
            Element::Cold => &[],
            Element::Shock => &[ObjectClass::Wand],
        }
    }

    /// Class whose loss hurts even a resistant victim
    pub const fn lingering_class(&self) -> ObjectClass {
        match self {
            Element::Fire | Element::Cold => ObjectClass::Potion,
            Element::Shock => ObjectClass::Ring,
        }
    }
}

/// Remove one point of enchantment (drain_item in C)
pub fn drain_item(obj: &mut Object) -> bool {
    if obj.spe <= 0 || obj.otyp == ObjectType::Corpse {
        return false;
    }
    obj.spe -= 1;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::PmId;
    use crate::rng::RollMode;

    #[test]
    fn test_erode_iron_weapon() {
        let mut rng = GameRng::new(42);
        let mut sword = Object::new(ObjectType::LongSword);
        assert_eq!(erode_obj(&mut sword, ErodeKind::Rust, &mut rng), ErodeResult::Damaged);
        assert_eq!(sword.eroded, 1);
        assert_eq!(erode_obj(&mut sword, ErodeKind::Burn, &mut rng), ErodeResult::Nothing);
    }

    #[test]
    fn test_erodeproof_and_grease() {
        let mut rng = GameRng::new(42);
        let mut sword = Object::new(ObjectType::LongSword);
        sword.erodeproof = true;
        assert_eq!(erode_obj(&mut sword, ErodeKind::Rust, &mut rng), ErodeResult::Protected);

        let mut greasy = Object::new(ObjectType::Mace);
        greasy.greased = true;
        assert_eq!(erode_obj(&mut greasy, ErodeKind::Rust, &mut rng), ErodeResult::Greased);
        assert_eq!(greasy.eroded, 0);
    }

    #[test]
    fn test_erode_maxed() {
        let mut rng = GameRng::new(1);
        let mut sword = Object::new(ObjectType::LongSword);
        sword.eroded = 3;
        assert_eq!(erode_obj(&mut sword, ErodeKind::Rust, &mut rng), ErodeResult::Maxed);
    }

    #[test]
    fn test_erode_armor_falls_back_to_torso() {
        // Pinned low rolls always pick the helmet slot, which is empty
        let mut rng = GameRng::with_mode(3, RollMode::Min);
        let mut mon = Monster::new(PmId::Soldier);
        mon.inventory.push(Object::new(ObjectType::PlateMail).worn_in(W_ARM));
        let (name, result) = erode_armor(&mut mon, ErodeKind::Rust, &mut rng).unwrap();
        assert_eq!(name, "plate mail");
        assert_eq!(result, ErodeResult::Damaged);
    }

    #[test]
    fn test_destroy_mitem_potions() {
        let mut rng = GameRng::with_mode(5, RollMode::Min);
        let mut mon = Monster::new(PmId::Soldier);
        mon.inventory.push(Object::new(ObjectType::PotionOfHealing).with_quantity(3));
        mon.inventory.push(Object::new(ObjectType::ScrollOfFire));
        let report = destroy_mitem(&mut mon, ObjectClass::Potion, Element::Cold, &mut rng);
        assert_eq!(report.total, 3);
        assert_eq!(mon.inventory.len(), 1);

        let report = destroy_mitem(&mut mon, ObjectClass::Scroll, Element::Fire, &mut rng);
        assert_eq!(report.total, 0, "scrolls of fire do not burn");
    }

    #[test]
    fn test_drain_item() {
        let mut sword = Object::new(ObjectType::LongSword).with_spe(1);
        assert!(drain_item(&mut sword));
        assert_eq!(sword.spe, 0);
        assert!(!drain_item(&mut sword));
    }
}
