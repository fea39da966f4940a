use crate::sample::ControllerSample;
use crate::types::Hand;

/// Source of per-tick controller state.
///
/// The host calls [`DeviceProvider::advance`] once per tick and then asks
/// for each hand. A hand without a connected controller yields `None`.
pub trait DeviceProvider {
    /// Move to the next tick. Returns `false` once no more input will arrive.
    fn advance(&mut self) -> bool {
        true
    }

    fn sample(&mut self, hand: Hand) -> Option<ControllerSample>;
}

impl<P: DeviceProvider + ?Sized> DeviceProvider for &mut P {
    fn advance(&mut self) -> bool {
        (**self).advance()
    }

    fn sample(&mut self, hand: Hand) -> Option<ControllerSample> {
        (**self).sample(hand)
    }
}
