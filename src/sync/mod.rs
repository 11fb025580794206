pub mod clock;
pub mod events;
pub mod synchronizer;
pub mod view;

pub use clock::{days_remaining, time_remaining, SECONDS_PER_BLOCK};
pub use events::SyncEvent;
pub use synchronizer::{SyncHandle, Synchronizer};
pub use view::{ChainView, SharedView};
