mod classifier;
pub mod config;
mod long_press;
pub mod tasks;
mod types;

pub use classifier::{GestureClassifier, GestureSession};
pub use config::GestureConfig;
pub use long_press::{LongPressTimer, TimerHandle};
pub use tasks::{run_gesture_pipeline, GesturePipeline};
pub use types::{GestureEvent, SwipeDirection, TouchInput, TouchSample};
