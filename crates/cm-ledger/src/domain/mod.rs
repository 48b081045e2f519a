pub mod composite_key;
pub mod conflicts;
pub mod entities;
pub mod errors;
pub mod world_state;

pub use composite_key::*;
pub use conflicts::*;
pub use entities::*;
pub use errors::*;
pub use world_state::*;
