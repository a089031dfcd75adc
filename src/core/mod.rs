pub mod accessor;
pub mod collector;
pub mod normalize;
pub mod smoke;

pub use crate::domain::model::{FlightState, PollSummary};
pub use crate::domain::ports::{Connector, FlightPublisher, FlightSource, FlightStore, KeyValueStore};
pub use crate::utils::error::Result;
