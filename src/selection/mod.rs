pub mod machine;
pub mod session;
pub mod state;

pub use machine::{Selection, SelectionEvent, Step, Suppression};
pub use session::{Dispatched, Session};
pub use state::{Phase, SelectionState};
