mod event;

pub use event::{
    DeleteQuery, EventPayload, EventsQuery, MoveParams, ResizeParams, UpdateEventPayload,
};
