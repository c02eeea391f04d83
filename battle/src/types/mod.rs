//! Domain types for battle simulation

mod combatant;
mod conditions;
mod creature_type;
mod field;
mod side;
mod stats;
mod status;

pub use combatant::{Combatant, MoveSlot};
pub use conditions::{SideCondition, SideConditionState, Terrain, Weather};
pub use creature_type::{Effectiveness, Type, TYPE_CHART};
pub use field::{FieldState, TerrainState, WeatherState};
pub use side::SideState;
pub use stats::{Stat, StatBlock, StatStages};
pub use status::{Status, Volatile, VolatileState};
