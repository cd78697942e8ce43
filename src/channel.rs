//! Level sample hand-off between the serial receive context and the render
//! loop.
//!
//! A bounded queue built on `critical-section` and `heapless::Deque`, so it
//! can be filled from an interrupt handler and drained from the main loop
//! without an allocator or an async executor.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::input::LevelSample;

/// Channel carrying decoded level samples to the renderer
pub type LevelChannel<const SIZE: usize> = Channel<LevelSample, SIZE>;

/// Producer side of a [`LevelChannel`], owned by the serial receive context
pub type LevelSender<'a, const SIZE: usize> = Sender<'a, LevelSample, SIZE>;

/// Consumer side of a [`LevelChannel`], owned by the renderer
pub type LevelReceiver<'a, const SIZE: usize> = Receiver<'a, LevelSample, SIZE>;

/// Returned by `try_send` when the queue is full; carries the rejected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError<T>(pub T);

/// Returned by `try_receive` when the queue is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// Fixed-capacity queue guarded by a critical section
///
/// Usually placed in a `static` so both sides can borrow it for `'static`.
pub struct Channel<T, const SIZE: usize> {
    queue: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> Channel<T, SIZE> {
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Producer handle
    pub const fn sender(&self) -> Sender<'_, T, SIZE> {
        Sender { channel: self }
    }

    /// Consumer handle
    pub const fn receiver(&self) -> Receiver<'_, T, SIZE> {
        Receiver { channel: self }
    }

    /// Queue a value, handing it back if there is no room left.
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.with_queue(|queue| queue.push_back(value).map_err(TrySendError))
    }

    /// Queue a value, evicting the oldest one when the queue is full.
    ///
    /// Returns the evicted value, or `value` itself if the channel has no
    /// capacity at all.
    pub fn send_overwrite(&self, value: T) -> Option<T> {
        self.with_queue(|queue| {
            let Err(value) = queue.push_back(value) else {
                return None;
            };
            let oldest = queue.pop_front();
            match queue.push_back(value) {
                Ok(()) => oldest,
                Err(value) => Some(value),
            }
        })
    }

    /// Take the oldest queued value.
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        self.with_queue(|queue| queue.pop_front().ok_or(TryReceiveError))
    }

    /// Empty the queue and return the newest value, if any.
    pub fn take_latest(&self) -> Option<T> {
        self.with_queue(|queue| {
            let latest = queue.pop_back();
            queue.clear();
            latest
        })
    }

    /// Number of queued values
    pub fn len(&self) -> usize {
        self.with_queue(|queue| queue.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_queue<R>(&self, f: impl FnOnce(&mut Deque<T, SIZE>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.queue.borrow(cs).borrow_mut()))
    }
}

impl<T, const SIZE: usize> Default for Channel<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer handle of a [`Channel`]
#[derive(Clone, Copy)]
pub struct Sender<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Sender<'_, T, SIZE> {
    /// See [`Channel::try_send`].
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.channel.try_send(value)
    }

    /// See [`Channel::send_overwrite`].
    pub fn send_overwrite(&self, value: T) -> Option<T> {
        self.channel.send_overwrite(value)
    }
}

/// Consumer handle of a [`Channel`]
#[derive(Clone, Copy)]
pub struct Receiver<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Receiver<'_, T, SIZE> {
    /// See [`Channel::try_receive`].
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        self.channel.try_receive()
    }

    /// See [`Channel::take_latest`].
    pub fn take_latest(&self) -> Option<T> {
        self.channel.take_latest()
    }
}
