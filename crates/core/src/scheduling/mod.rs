mod classify;
mod error;
mod mutation;
mod overlap;
mod requests;
mod roster;
mod scope;
mod shift;
mod types;

pub use classify::{classify, NewEvent};
pub use error::{EventError, MutationError};
pub use mutation::{apply_scoped_delete, apply_scoped_update};
pub use overlap::{events_overlapping, overlaps};
pub use requests::{CreateEventRequest, EventChangeset, EventView};
pub use roster::{normalize_roster, DogParams, DogRoster};
pub use scope::{following_occurrences, DeleteScope, UpdateScope};
pub use shift::{move_event, resize_event, TimeShift};
pub use types::{
    validate_event, Dog, Event, EventSeries, Period, Recurrence, WeekdaySet,
};
