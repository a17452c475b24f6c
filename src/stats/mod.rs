pub mod narrator;
pub mod power;
pub mod weekly;

pub use narrator::Matchup;
pub use power::{power_index, PowerIndex};
pub use weekly::{hall_of_infamy, HallOfInfamy};
