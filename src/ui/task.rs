//! Async driver loop for the menu.
//!
//! One task owns the controller and serializes the two call sources:
//! the refresh ticker and the input channel. Embassy tasks cannot be
//! generic, so the firmware wraps [`menu_task`] in a concrete task:
//!
//! ```ignore
//! static INPUT: InputChannel = InputChannel::new();
//!
//! #[embassy_executor::task]
//! async fn menu(controller: &'static mut Menu) {
//!     menu_task(controller, INPUT.receiver(), |menu| flush(menu)).await
//! }
//! ```

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver};
use embassy_time::{Duration, Ticker};

use super::controller::MenuController;
use super::surface::DisplaySurface;
use super::InputEvent;
use crate::config::INPUT_QUEUE_DEPTH;
use crate::model::ModelStore;
use crate::persist::ConfigStore;

/// Queue from the input dispatcher to the menu task.
pub type InputChannel = Channel<CriticalSectionRawMutex, InputEvent, INPUT_QUEUE_DEPTH>;

/// Run the menu forever.
///
/// Every tick paints one refresh step, then `after_tick` runs (push the
/// frame while refresh is not paused, drain outgoing CC messages).
/// Input events are handled as they arrive, between ticks.
pub async fn menu_task<D, M, C, F, const N: usize>(
    controller: &mut MenuController<D, M, C>,
    events: Receiver<'_, CriticalSectionRawMutex, InputEvent, N>,
    mut after_tick: F,
) -> !
where
    D: DisplaySurface,
    M: ModelStore,
    C: ConfigStore<M>,
    F: FnMut(&mut MenuController<D, M, C>),
{
    let period = Duration::from_millis(controller.config().tick_period_ms.max(1) as u64);
    let mut ticker = Ticker::every(period);

    #[cfg(feature = "defmt")]
    defmt::info!("menu task started, tick {} ms", period.as_millis());

    loop {
        match select(ticker.next(), events.receive()).await {
            Either::First(()) => {
                controller.advance_refresh_step();
                after_tick(controller);
            }
            Either::Second(event) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("menu input: {}", event);
                controller.handle(event);
            }
        }
    }
}
