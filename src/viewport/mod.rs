//! Viewport-dimension observer.
//!
//! The front-end publishes size changes; views hold a subscription and read
//! the latest pair when they render. Dropping the subscription unsubscribes.

use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub width: u16,
    pub height: u16,
}

impl Dimensions {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

pub struct Viewport {
    sender: watch::Sender<Dimensions>,
}

impl Viewport {
    pub fn new(initial: Dimensions) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    pub fn subscribe(&self) -> ViewportSubscription {
        ViewportSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Publish a resize. Subscribers only ever see the latest pair.
    pub fn resize(&self, dimensions: Dimensions) {
        self.sender.send_if_modified(|current| {
            if *current == dimensions {
                false
            } else {
                *current = dimensions;
                true
            }
        });
    }

    pub fn current(&self) -> Dimensions {
        *self.sender.borrow()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Dimensions::default())
    }
}

pub struct ViewportSubscription {
    receiver: watch::Receiver<Dimensions>,
}

impl ViewportSubscription {
    pub fn latest(&self) -> Dimensions {
        *self.receiver.borrow()
    }

    /// Wait for the next resize. Returns `None` once the viewport is gone.
    pub async fn changed(&mut self) -> Option<Dimensions> {
        self.receiver.changed().await.ok()?;
        Some(*self.receiver.borrow_and_update())
    }
}
