//! Back/forward availability.

/// Receives back/forward enablement after every history change.
pub trait Affordances {
    fn set_back_enabled(&mut self, enabled: bool);
    fn set_forward_enabled(&mut self, enabled: bool);
}

impl<T: Affordances + ?Sized> Affordances for Box<T> {
    fn set_back_enabled(&mut self, enabled: bool) {
        (**self).set_back_enabled(enabled);
    }

    fn set_forward_enabled(&mut self, enabled: bool) {
        (**self).set_forward_enabled(enabled);
    }
}

/// Plain record of the two button states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub back: bool,
    pub forward: bool,
}

impl Affordances for ButtonState {
    fn set_back_enabled(&mut self, enabled: bool) {
        self.back = enabled;
    }

    fn set_forward_enabled(&mut self, enabled: bool) {
        self.forward = enabled;
    }
}

/// Whether an older entry exists behind `cursor`.
pub fn can_go_back(len: usize, cursor: usize) -> bool {
    len >= 2 && cursor < len - 1
}

/// Whether a newer entry exists ahead of `cursor`.
pub fn can_go_forward(len: usize, cursor: usize) -> bool {
    len >= 2 && cursor > 0
}

/// Pushes the states for a queue of `len` entries at `cursor` to `buttons`.
pub fn adjust<A: Affordances + ?Sized>(buttons: &mut A, len: usize, cursor: usize) {
    buttons.set_back_enabled(can_go_back(len, cursor));
    buttons.set_forward_enabled(can_go_forward(len, cursor));
}
