mod error;
mod frames;
mod ground_track;
mod observer;
mod propagation;
mod types;

pub use error::PredictError;
pub use ground_track::{ground_track, DEFAULT_MINUTES_AHEAD, DEFAULT_STEP_SECONDS};
pub use observer::GroundStation;
pub use propagation::{
    observe, observer_view, propagate, propagate_many, satellite_state, GeocentricState,
};
pub use types::{GroundTrackPoint, Observation, ObserverView, SatelliteState, Subpoint};
