use embassy_futures::select::{select, Either};
use embassy_sync::{
    blocking_mutex::raw::RawMutex,
    channel::{Channel, TrySendError},
};
use embassy_time::{Duration, Instant, Timer};
use log::{debug, warn};

use super::{
    classifier::GestureClassifier,
    types::{GestureEvent, TouchInput},
};

/// Ordered touch input in, classified gestures out.
pub struct GesturePipeline<M: RawMutex, const N: usize> {
    inputs: Channel<M, TouchInput, N>,
    events: Channel<M, GestureEvent, N>,
}

impl<M: RawMutex, const N: usize> Default for GesturePipeline<M, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex, const N: usize> GesturePipeline<M, N> {
    pub const fn new() -> Self {
        Self {
            inputs: Channel::new(),
            events: Channel::new(),
        }
    }

    /// Waits for room rather than dropping: losing a move or an end would
    /// misclassify the whole session.
    pub async fn push(&self, input: TouchInput) {
        self.inputs.send(input).await;
    }

    pub fn try_push(&self, input: TouchInput) -> Result<(), TouchInput> {
        self.inputs
            .try_send(input)
            .map_err(|TrySendError::Full(input)| input)
    }

    pub async fn next_event(&self) -> GestureEvent {
        self.events.receive().await
    }

    pub fn try_next_event(&self) -> Option<GestureEvent> {
        self.events.try_receive().ok()
    }

    /// Drops queued input and asks the pipeline task to tear down. Input
    /// pushed concurrently is dropped too; the teardown itself is never lost.
    pub fn request_teardown(&self) {
        loop {
            while self.inputs.try_receive().is_ok() {}
            match self.inputs.try_send(TouchInput::Teardown) {
                Ok(()) => return,
                Err(TrySendError::Full(_)) => {
                    warn!("gesture: teardown_retry reason=queue_refilled");
                }
            }
        }
    }
}

/// Drives `classifier` from the pipeline until a [`TouchInput::Teardown`].
///
/// Sample timestamps are milliseconds since `epoch`; the long-press deadline
/// is turned back into an [`Instant`] against the same epoch. When an input
/// and the deadline are ready together the input wins, so a release racing
/// the timer cancels it instead of producing two gestures.
pub async fn run_gesture_pipeline<M: RawMutex, const N: usize>(
    pipeline: &GesturePipeline<M, N>,
    mut classifier: GestureClassifier,
    epoch: Instant,
) {
    loop {
        let input = match classifier.pending_long_press() {
            Some(handle) => {
                let fire_at = epoch + Duration::from_millis(handle.deadline_ms());
                match select(pipeline.inputs.receive(), Timer::at(fire_at)).await {
                    Either::First(input) => input,
                    Either::Second(()) => {
                        if let Some(event) = classifier.on_long_press_timer(handle) {
                            pipeline.events.send(event).await;
                        }
                        continue;
                    }
                }
            }
            None => pipeline.inputs.receive().await,
        };

        match input {
            TouchInput::Start(sample) => classifier.on_touch_start(sample),
            TouchInput::Move(sample) => classifier.on_touch_move(sample),
            TouchInput::End(sample) => {
                if let Some(event) = classifier.on_touch_end(sample) {
                    pipeline.events.send(event).await;
                }
            }
            TouchInput::Cancel => classifier.on_touch_cancel(),
            TouchInput::Teardown => {
                classifier.teardown();
                while pipeline.events.try_receive().is_ok() {}
                debug!("gesture: pipeline stopped");
                return;
            }
        }
    }
}
