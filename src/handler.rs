/// Contract for the user-supplied event sink the consumer drives.
///
/// Implementations run exclusively on the consumer's dedicated thread, in
/// published order (`SPEC_FULL.md` §6). A handler that blocks indefinitely
/// stalls the whole queue — there is only one consumer, and nothing else
/// drains the ring while it is inside a call.
pub trait EventHandler<T>: Send {
    /// Invoked once per delivered event when the queue's batch size is `<= 1`.
    fn on_event(&mut self, value: T);

    /// Invoked with up to `batch_size` events at once, in delivery order, when
    /// the queue's batch size is `> 1`. The slice is only valid for the
    /// duration of the call; do not retain it (`SPEC_FULL.md` §6).
    ///
    /// The default forwards each value to [`on_event`](Self::on_event), so a
    /// handler that only cares about per-event delivery can ignore this
    /// method entirely.
    fn on_batch_event(&mut self, values: &[T])
    where
        T: Copy,
    {
        for &value in values {
            self.on_event(value);
        }
    }
}

/// A plain `FnMut(T)` closure is a valid single-event handler; batches fall
/// back to the default per-event forwarding.
impl<T, F> EventHandler<T> for F
where
    F: FnMut(T) + Send,
{
    fn on_event(&mut self, value: T) {
        self(value)
    }
}
