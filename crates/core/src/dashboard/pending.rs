use std::sync::Mutex;

/// Settles an issued sequence tag if the future awaiting its result is
/// dropped first (poller aborted, caller gave up on a timeout).
///
/// Call `complete` once the result is in hand; otherwise `abandon` runs on
/// drop so the owner stops reporting work in flight.
pub(crate) struct Pending<'a, S, T: Copy> {
    state: &'a Mutex<S>,
    tag: T,
    abandon: fn(&mut S, T),
    armed: bool,
}

impl<'a, S, T: Copy> Pending<'a, S, T> {
    pub(crate) fn new(state: &'a Mutex<S>, tag: T, abandon: fn(&mut S, T)) -> Self {
        Self {
            state,
            tag,
            abandon,
            armed: true,
        }
    }

    pub(crate) fn complete(mut self) {
        self.armed = false;
    }
}

impl<S, T: Copy> Drop for Pending<'_, S, T> {
    fn drop(&mut self) {
        if self.armed {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            (self.abandon)(&mut state, self.tag);
        }
    }
}
