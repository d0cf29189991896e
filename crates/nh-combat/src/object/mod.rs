//! Objects carried, worn and wielded by combatants

mod erode;
mod obj;
mod objclass;

pub use erode::{Destroyed, Element, ErodeResult, destroy_mitem, drain_item, erode_armor, erode_obj};
pub use obj::{BucStatus, ObjDef, ObjPowers, Object, ObjectId, ObjectType};
pub use objclass::{ErodeKind, Material, ObjectClass, worn_mask};
