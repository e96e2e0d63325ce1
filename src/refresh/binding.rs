use core::{cell::RefCell, future::Future};

use embassy_sync::blocking_mutex::{raw::RawMutex, Mutex};
use log::{info, warn};

use super::{
    config::PullConfig,
    controller::{PullMove, PullRelease, PullState, PullToRefreshController},
    gate::{Invocation, RefreshGate},
};
use crate::{config::ConfigError, touch::TouchSample};

/// The scrollable view the pull gesture is attached to.
pub trait HostSurface {
    /// Current scroll offset from the top; `<= 0` means at origin.
    fn scroll_offset_top(&self) -> f32;
    /// Suppress native overscroll for the current drag.
    fn prevent_default_scroll(&self);
}

/// Refresh work supplied by the view. Errors are handed back to the caller
/// of [`PullToRefresh::touch_end`].
pub trait RefreshCallback {
    type Error;

    fn refresh(&mut self) -> impl Future<Output = Result<(), Self::Error>>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    Refreshed,
    BelowThreshold,
    /// Release with no pull session, or during a refresh.
    Ignored,
    /// Gate already held by another refresh.
    Dropped,
}

/// Pull-to-refresh attached to one host surface.
///
/// Touch methods take `&self`, so starts and moves keep flowing into the
/// controller while a refresh started by [`Self::touch_end`] is suspended.
pub struct PullToRefresh<M: RawMutex, S: HostSurface> {
    controller: Mutex<M, RefCell<PullToRefreshController>>,
    gate: RefreshGate,
    surface: S,
}

impl<M: RawMutex, S: HostSurface> PullToRefresh<M, S> {
    pub fn new(config: PullConfig, surface: S) -> Result<Self, ConfigError> {
        let controller = PullToRefreshController::new(config)?;
        Ok(Self {
            controller: Mutex::new(RefCell::new(controller)),
            gate: RefreshGate::new(),
            surface,
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn state(&self) -> PullState {
        self.with_controller(|controller| controller.state())
    }

    pub fn is_refresh_in_flight(&self) -> bool {
        self.gate.is_in_flight()
    }

    pub fn touch_start(&self, sample: TouchSample) {
        let scroll_top = self.surface.scroll_offset_top();
        self.with_controller(|controller| controller.on_touch_start(sample, scroll_top));
    }

    pub fn touch_move(&self, sample: TouchSample) -> PullMove {
        let scroll_top = self.surface.scroll_offset_top();
        let movement =
            self.with_controller(|controller| controller.on_touch_move(sample, scroll_top));
        if movement.prevent_default {
            self.surface.prevent_default_scroll();
        }
        movement
    }

    /// Completes the drag. A qualifying release runs `callback` once under
    /// the gate; the controller settles back to idle whether the refresh
    /// succeeds, fails or is cancelled.
    pub async fn touch_end<R: RefreshCallback>(
        &self,
        callback: &mut R,
    ) -> Result<RefreshOutcome, R::Error> {
        match self.with_controller(|controller| controller.on_touch_end()) {
            PullRelease::Reset => return Ok(RefreshOutcome::BelowThreshold),
            PullRelease::Ignored => return Ok(RefreshOutcome::Ignored),
            PullRelease::Refresh => {}
        }

        let _settle = SettleOnDrop { binding: self };
        info!("refresh: start");
        match self.gate.run(move || callback.refresh()).await {
            Ok(Invocation::Completed(())) => {
                info!("refresh: done");
                Ok(RefreshOutcome::Refreshed)
            }
            Ok(Invocation::Dropped) => Ok(RefreshOutcome::Dropped),
            Err(err) => {
                warn!("refresh: failed");
                Err(err)
            }
        }
    }

    /// Detach from the surface. Safe to call more than once.
    pub fn teardown(&self) {
        self.with_controller(|controller| controller.teardown());
    }

    fn with_controller<T>(&self, f: impl FnOnce(&mut PullToRefreshController) -> T) -> T {
        self.controller.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

struct SettleOnDrop<'a, M: RawMutex, S: HostSurface> {
    binding: &'a PullToRefresh<M, S>,
}

impl<M: RawMutex, S: HostSurface> Drop for SettleOnDrop<'_, M, S> {
    fn drop(&mut self) {
        self.binding
            .with_controller(|controller| controller.finish_refresh());
    }
}
