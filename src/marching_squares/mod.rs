// Marching squares kernel: corner sampling, case classification, polygon emission.
mod cases;
mod cell_context;
mod primitives;
mod types;
mod validator;
mod vertex;

pub use cases::*;
pub use cell_context::*;
pub use primitives::*;
pub use types::*;
pub use validator::*;
pub use vertex::*;
