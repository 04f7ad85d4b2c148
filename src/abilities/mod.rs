//! Player abilities.
//!
//! An ability is picked as an `AbilityKind`, bound to a clicked cell as an
//! `AbilityEffect`, then applied:
//! - `RowClear` / `ColumnClear`: the whole line, 1 damage to obstacles
//! - `AreaBomb`: the 3×3 block around the target, 2 damage to obstacles
//! - `ClearAllOfType`: every normal piece of the target's type; obstacles untouched
//!
//! Cost checks belong to the caller (`AbilityDef::is_affordable`). The
//! engine assumes an ability it is asked to apply has been paid for.

mod apply;
mod effect;

pub use apply::{apply_effect, AbilityOutcome};
pub use effect::{AbilityDef, AbilityEffect, AbilityKind};
pub use crate::ledger::ResourceCost;
