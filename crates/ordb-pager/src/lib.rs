pub mod ansi;
pub mod events;
pub mod pager;
pub mod state;
pub mod terminal;

pub use pager::{Pager, PagerError, PagerOutcome, PagerOverrides};
pub use state::{PageBuffer, PagerState};
