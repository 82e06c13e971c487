//! Frame filtering: threshold policy, trailing window, and the pull facade.

mod camera;
mod dispatch;
mod threshold;
mod trigger;
mod window;

pub use camera::{Caller, FilterStream, FilteredCamera, Pull};
pub use dispatch::DispatchQueue;
pub use threshold::ThresholdMap;
pub use trigger::TriggerController;
pub use window::{BufferedEntry, WindowBuffer};
