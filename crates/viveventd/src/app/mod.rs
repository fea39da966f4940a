mod classifier;
mod dispatcher;
mod event;
mod manager;

pub use classifier::{EdgeClassifier, Events, HandState};
pub use dispatcher::{
    DispatchReport, EventDispatcher, Listener, ListenerError, ListenerId,
    ListenerResult,
};
pub use event::{ControllerEvent, EventKind, SwipeDirection};
pub use manager::EventManager;
