//! Level state used by combat: monsters, their position index, floor
//! objects and walls

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::error::CombatError;
use crate::monster::{Monster, MonsterId};
use crate::object::{Object, ObjectId};
use crate::rng::GameRng;
use crate::{COLNO, ROWNO};

/// Map position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pos {
    pub x: i8,
    pub y: i8,
}

impl Pos {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance (dist2 in C)
    pub const fn dist2(&self, other: Pos) -> i32 {
        let dx = self.x as i32 - other.x as i32;
        let dy = self.y as i32 - other.y as i32;
        dx * dx + dy * dy
    }

    /// Chebyshev distance (distmin in C)
    pub const fn distmin(&self, other: Pos) -> i32 {
        let dx = (self.x as i32 - other.x as i32).abs();
        let dy = (self.y as i32 - other.y as i32).abs();
        if dx > dy { dx } else { dy }
    }

    pub const fn offset(&self, dx: i8, dy: i8) -> Pos {
        Pos::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    pub const fn is_valid(&self) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as usize) < COLNO && (self.y as usize) < ROWNO
    }
}

/// The eight compass directions as (dx, dy), clockwise from north
pub const DIRECTIONS: [(i8, i8); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// One dungeon level as seen by the combat engine
///
/// Monsters are owned by the level. A monster is indexed by position
/// while it is on the map; killed monsters stay in the list with
/// `state.dead` set until [`Level::purge_dead`] is called.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    monsters: Vec<Monster>,

    /// Position index, one entry per monster on the map
    grid: HashMap<Pos, MonsterId>,

    /// Objects lying on the floor
    floor: HashMap<Pos, Vec<Object>>,

    walls: HashSet<Pos>,

    /// Teleportation is blocked on this level
    pub no_teleport: bool,

    next_monster_id: u32,
    next_object_id: u32,
}

impl Default for Level {
    fn default() -> Self {
        Self::new()
    }
}

impl Level {
    /// Create an empty, open level
    pub fn new() -> Self {
        Self {
            monsters: Vec::new(),
            grid: HashMap::new(),
            floor: HashMap::new(),
            walls: HashSet::new(),
            no_teleport: false,
            next_monster_id: 1,
            next_object_id: 1,
        }
    }

    /// Check if a position is on the map and not a wall
    pub fn is_passable(&self, pos: Pos) -> bool {
        pos.is_valid() && !self.walls.contains(&pos)
    }

    pub fn add_wall(&mut self, pos: Pos) {
        self.walls.insert(pos);
    }

    /// Add a monster at its own position, assigning its id
    pub fn add_monster(&mut self, mut monster: Monster) -> Result<MonsterId, CombatError> {
        let pos = monster.pos;
        if self.grid.contains_key(&pos) {
            return Err(CombatError::PositionOccupied { x: pos.x, y: pos.y });
        }
        let id = MonsterId(self.next_monster_id);
        self.next_monster_id += 1;
        monster.id = id;
        self.grid.insert(pos, id);
        self.monsters.push(monster);
        Ok(id)
    }

    /// Get monster by ID
    pub fn monster(&self, id: MonsterId) -> Option<&Monster> {
        self.monsters.iter().find(|m| m.id == id)
    }

    /// Get mutable monster by ID
    pub fn monster_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        self.monsters.iter_mut().find(|m| m.id == id)
    }

    /// Mutable access to two distinct monsters at once
    pub fn pair_mut(&mut self, a: MonsterId, b: MonsterId) -> Option<(&mut Monster, &mut Monster)> {
        if a == b {
            return None;
        }
        let ia = self.monsters.iter().position(|m| m.id == a)?;
        let ib = self.monsters.iter().position(|m| m.id == b)?;
        if ia < ib {
            let (left, right) = self.monsters.split_at_mut(ib);
            Some((&mut left[ia], &mut right[0]))
        } else {
            let (left, right) = self.monsters.split_at_mut(ia);
            Some((&mut right[0], &mut left[ib]))
        }
    }

    pub fn monsters(&self) -> impl Iterator<Item = &Monster> {
        self.monsters.iter()
    }

    /// Ids of living monsters, in list order
    pub fn living_ids(&self) -> Vec<MonsterId> {
        self.monsters
            .iter()
            .filter(|m| !m.state.dead)
            .map(|m| m.id)
            .collect()
    }

    /// Monster standing at `pos` (m_at in C)
    pub fn monster_at(&self, pos: Pos) -> Option<MonsterId> {
        self.grid.get(&pos).copied()
    }

    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.grid.contains_key(&pos)
    }

    /// Take a monster off the map without removing it from the level
    /// (remove_monster in C)
    pub fn remove_from_map(&mut self, id: MonsterId) {
        if let Some(mon) = self.monster(id) {
            let pos = mon.pos;
            if self.grid.get(&pos) == Some(&id) {
                self.grid.remove(&pos);
            }
        }
    }

    /// Put a monster that is off the map at `pos` (place_monster in C)
    pub fn place_monster(&mut self, id: MonsterId, pos: Pos) -> Result<(), CombatError> {
        if let Some(other) = self.grid.get(&pos) {
            if *other != id {
                return Err(CombatError::PositionOccupied { x: pos.x, y: pos.y });
            }
        }
        let mon = self.monster_mut(id).ok_or(CombatError::MissingCombatant(id))?;
        mon.pos = pos;
        self.grid.insert(pos, id);
        Ok(())
    }

    /// Move a monster, removing it from its old square before placing it
    pub fn relocate(&mut self, id: MonsterId, pos: Pos) -> Result<(), CombatError> {
        if self.grid.get(&pos).is_some_and(|other| *other != id) {
            return Err(CombatError::PositionOccupied { x: pos.x, y: pos.y });
        }
        self.remove_from_map(id);
        self.place_monster(id, pos)
    }

    /// Whether a monster is currently indexed on the map
    pub fn is_on_map(&self, id: MonsterId) -> bool {
        self.monster(id)
            .is_some_and(|m| self.grid.get(&m.pos) == Some(&id))
    }

    /// Whether `pos` can take a monster
    pub fn goodpos(&self, pos: Pos) -> bool {
        self.is_passable(pos) && !self.is_occupied(pos)
    }

    /// Free square nearest to `pos`, picked at random among equally near
    /// ones (enexto in C)
    pub fn enexto(&self, pos: Pos, rng: &mut GameRng) -> Option<Pos> {
        let max_range = COLNO.max(ROWNO) as i8;
        for range in 1..max_range {
            let mut ring = Vec::new();
            for dy in -range..=range {
                for dx in -range..=range {
                    if dx.abs() != range && dy.abs() != range {
                        continue;
                    }
                    let candidate = pos.offset(dx, dy);
                    if self.goodpos(candidate) {
                        ring.push(candidate);
                    }
                }
            }
            if let Some(found) = rng.choose(&ring) {
                return Some(*found);
            }
        }
        None
    }

    /// Teleport a monster to a random free square (rloc in C)
    ///
    /// Returns false when the level forbids teleporting or is full.
    pub fn rloc(&mut self, id: MonsterId, rng: &mut GameRng) -> bool {
        if self.no_teleport {
            return false;
        }
        let Some(from) = self.monster(id).map(|m| m.pos) else {
            return false;
        };
        let mut target = None;
        for _ in 0..500 {
            let pos = Pos::new(rng.rn2(COLNO as u32) as i8, rng.rn2(ROWNO as u32) as i8);
            if pos != from && self.goodpos(pos) {
                target = Some(pos);
                break;
            }
        }
        let target = target.or_else(|| self.enexto(from, rng));
        match target {
            Some(pos) => self.relocate(id, pos).is_ok(),
            None => false,
        }
    }

    /// Bresenham line of sight; walls block but are themselves visible
    pub fn has_line_of_sight(&self, from: Pos, to: Pos) -> bool {
        let mut x = from.x as i32;
        let mut y = from.y as i32;
        let x1 = to.x as i32;
        let y1 = to.y as i32;

        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            if x != from.x as i32 || y != from.y as i32 {
                let here = Pos::new(x as i8, y as i8);
                if !here.is_valid() {
                    return false;
                }
                if self.walls.contains(&here) {
                    return x == x1 && y == y1;
                }
            }

            if x == x1 && y == y1 {
                return true;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Direction from `from` to `to` if they share a row, column or
    /// diagonal within `range` with nothing solid between (linedup in C)
    pub fn lined_up(&self, from: Pos, to: Pos, range: i32) -> Option<(i8, i8)> {
        let tbx = to.x as i32 - from.x as i32;
        let tby = to.y as i32 - from.y as i32;
        if (tbx == 0 && tby == 0) || !(tbx == 0 || tby == 0 || tbx.abs() == tby.abs()) {
            return None;
        }
        if tbx.abs().max(tby.abs()) > range {
            return None;
        }
        if !self.has_line_of_sight(from, to) {
            return None;
        }
        Some((tbx.signum() as i8, tby.signum() as i8))
    }

    /// Drop an object on the floor, assigning its id
    pub fn place_object(&mut self, pos: Pos, mut obj: Object) -> ObjectId {
        let id = ObjectId(self.next_object_id);
        self.next_object_id += 1;
        obj.id = id;
        self.floor.entry(pos).or_default().push(obj);
        id
    }

    pub fn objects_at(&self, pos: Pos) -> &[Object] {
        self.floor.get(&pos).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn objects_at_mut(&mut self, pos: Pos) -> Option<&mut Vec<Object>> {
        self.floor.get_mut(&pos)
    }

    /// Squares holding at least one object, in row-major order
    pub fn floor_positions(&self) -> Vec<Pos> {
        let mut positions: Vec<Pos> = self
            .floor
            .iter()
            .filter(|(_, objs)| !objs.is_empty())
            .map(|(pos, _)| *pos)
            .collect();
        positions.sort_by_key(|pos| (pos.y, pos.x));
        positions
    }

    /// Drop killed monsters from the level, returning them
    pub fn purge_dead(&mut self) -> Vec<Monster> {
        let (dead, alive): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.monsters).into_iter().partition(|m| m.state.dead);
        self.monsters = alive;
        for mon in &dead {
            if self.grid.get(&mon.pos) == Some(&mon.id) {
                self.grid.remove(&mon.pos);
            }
        }
        dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::PmId;
    use crate::object::ObjectType;

    #[test]
    fn test_distances() {
        let a = Pos::new(1, 1);
        assert_eq!(a.dist2(Pos::new(2, 2)), 2);
        assert_eq!(a.dist2(Pos::new(3, 1)), 4);
        assert_eq!(a.distmin(Pos::new(4, 3)), 3);
    }

    #[test]
    fn test_add_monster_rejects_occupied() {
        let mut level = Level::new();
        let id = level.add_monster(Monster::new(PmId::Jackal).at(5, 5)).unwrap();
        assert_eq!(level.monster_at(Pos::new(5, 5)), Some(id));
        let err = level.add_monster(Monster::new(PmId::Newt).at(5, 5)).unwrap_err();
        assert_eq!(err, CombatError::PositionOccupied { x: 5, y: 5 });
    }

    #[test]
    fn test_pair_mut() {
        let mut level = Level::new();
        let a = level.add_monster(Monster::new(PmId::Jackal).at(1, 1)).unwrap();
        let b = level.add_monster(Monster::new(PmId::Newt).at(2, 1)).unwrap();
        {
            let (ma, mb) = level.pair_mut(b, a).unwrap();
            assert_eq!(ma.pm, PmId::Newt);
            mb.hp = 1;
        }
        assert_eq!(level.monster(a).unwrap().hp, 1);
        assert!(level.pair_mut(a, a).is_none());
    }

    #[test]
    fn test_relocate_keeps_index_consistent() {
        let mut level = Level::new();
        let a = level.add_monster(Monster::new(PmId::Jackal).at(1, 1)).unwrap();
        let b = level.add_monster(Monster::new(PmId::Newt).at(3, 1)).unwrap();
        assert!(level.relocate(a, Pos::new(3, 1)).is_err());
        level.relocate(a, Pos::new(2, 1)).unwrap();
        assert_eq!(level.monster_at(Pos::new(1, 1)), None);
        assert_eq!(level.monster_at(Pos::new(2, 1)), Some(a));
        assert_eq!(level.monster_at(Pos::new(3, 1)), Some(b));
        assert_eq!(level.monster(a).unwrap().pos, Pos::new(2, 1));
    }

    #[test]
    fn test_enexto_finds_adjacent() {
        let mut rng = GameRng::new(42);
        let mut level = Level::new();
        level.add_monster(Monster::new(PmId::Jackal).at(5, 5)).unwrap();
        let spot = level.enexto(Pos::new(5, 5), &mut rng).unwrap();
        assert_eq!(spot.distmin(Pos::new(5, 5)), 1);
        assert!(level.goodpos(spot));
    }

    #[test]
    fn test_rloc_respects_no_teleport() {
        let mut rng = GameRng::new(42);
        let mut level = Level::new();
        let id = level.add_monster(Monster::new(PmId::Jackal).at(5, 5)).unwrap();
        level.no_teleport = true;
        assert!(!level.rloc(id, &mut rng));
        level.no_teleport = false;
        assert!(level.rloc(id, &mut rng));
        assert_ne!(level.monster(id).unwrap().pos, Pos::new(5, 5));
        assert!(level.is_on_map(id));
    }

    #[test]
    fn test_line_of_sight_and_lined_up() {
        let mut level = Level::new();
        assert!(level.has_line_of_sight(Pos::new(1, 1), Pos::new(6, 1)));
        assert_eq!(level.lined_up(Pos::new(1, 1), Pos::new(4, 4), 8), Some((1, 1)));
        assert_eq!(level.lined_up(Pos::new(1, 1), Pos::new(4, 2), 8), None);
        assert_eq!(level.lined_up(Pos::new(1, 1), Pos::new(12, 1), 8), None);
        level.add_wall(Pos::new(3, 1));
        assert!(!level.has_line_of_sight(Pos::new(1, 1), Pos::new(6, 1)));
        assert!(level.has_line_of_sight(Pos::new(1, 1), Pos::new(3, 1)));
    }

    #[test]
    fn test_purge_dead() {
        let mut level = Level::new();
        let a = level.add_monster(Monster::new(PmId::Jackal).at(1, 1)).unwrap();
        let b = level.add_monster(Monster::new(PmId::Newt).at(2, 1)).unwrap();
        level.monster_mut(a).unwrap().state.dead = true;
        let dead = level.purge_dead();
        assert_eq!(dead.len(), 1);
        assert!(level.monster(a).is_none());
        assert_eq!(level.living_ids(), vec![b]);
        assert_eq!(level.monster_at(Pos::new(1, 1)), None);
    }

    #[test]
    fn test_floor_objects() {
        let mut level = Level::new();
        let id = level.place_object(Pos::new(4, 4), Object::new(ObjectType::Dagger));
        assert_eq!(id, ObjectId(1));
        assert_eq!(level.objects_at(Pos::new(4, 4)).len(), 1);
        assert!(level.objects_at(Pos::new(0, 0)).is_empty());
    }
}
