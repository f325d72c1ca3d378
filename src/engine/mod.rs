pub mod beam;
pub mod board;
pub mod geometry;
pub mod session;

pub use beam::{trace, Sighting, Trace, TraceEnd};
pub use board::{Board, Cell};
pub use geometry::{Direction, Geometry, Position};
pub use session::{Command, Guess, Outcome, Phase, Session, Trial};
