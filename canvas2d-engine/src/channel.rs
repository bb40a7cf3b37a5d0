//! Typed message passing between execution contexts.
//!
//! A [`MessageChannel`] yields two entangled ports. Whatever one port posts,
//! the other receives, in order. Bitmaps are moved rather than copied, so
//! after `post_bitmap` returns the sender's handle is closed and exactly one
//! side owns the pixels.

use crate::bitmap::ImageBitmap;
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::image_data::ImageData;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

/// A message carried by a [`MessagePort`].
#[derive(Debug, PartialEq)]
pub enum Message {
    Text(String),
    /// A copy of the posted pixels.
    ImageData(ImageData),
    /// Transferred ownership of an open bitmap.
    Bitmap(ImageBitmap),
}

/// One end of a [`MessageChannel`].
#[derive(Debug)]
pub struct MessagePort {
    outgoing: Sender<Message>,
    incoming: Receiver<Message>,
}

/// Two entangled ports.
#[derive(Debug)]
pub struct MessageChannel {
    pub port1: MessagePort,
    pub port2: MessagePort,
}

impl MessageChannel {
    pub fn new() -> Self {
        let (to_port2, port2_rx) = mpsc::channel();
        let (to_port1, port1_rx) = mpsc::channel();
        Self {
            port1: MessagePort {
                outgoing: to_port2,
                incoming: port1_rx,
            },
            port2: MessagePort {
                outgoing: to_port1,
                incoming: port2_rx,
            },
        }
    }

    /// Split into the two ports, e.g. to move one into another thread.
    pub fn into_ports(self) -> (MessagePort, MessagePort) {
        (self.port1, self.port2)
    }
}

impl Default for MessageChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl MessagePort {
    /// Queue a message for the peer port.
    pub fn post_message(&self, message: Message) -> Canvas2dResult<()> {
        if let Message::Bitmap(bitmap) = &message {
            if bitmap.is_closed() {
                return Err(Canvas2dError::InvalidState(
                    "cannot post a closed ImageBitmap".to_string(),
                ));
            }
        }
        self.outgoing
            .send(message)
            .map_err(|_| Canvas2dError::ChannelClosed)
    }

    pub fn post_text(&self, text: impl Into<String>) -> Canvas2dResult<()> {
        self.post_message(Message::Text(text.into()))
    }

    /// Post a copy of `data`.
    pub fn post_image_data(&self, data: &ImageData) -> Canvas2dResult<()> {
        self.post_message(Message::ImageData(data.clone()))
    }

    /// Transfer `bitmap` to the peer. The caller's handle is closed even if
    /// the peer has gone away.
    pub fn post_bitmap(&self, bitmap: &mut ImageBitmap) -> Canvas2dResult<()> {
        let transferred = bitmap.transfer()?;
        log::debug!(
            target: "canvas",
            "post bitmap {}x{}",
            transferred.width(),
            transferred.height()
        );
        self.post_message(Message::Bitmap(transferred))
    }

    /// Block until a message arrives. Fails once the peer is dropped and
    /// the queue is drained.
    pub fn receive(&self) -> Canvas2dResult<Message> {
        self.incoming.recv().map_err(|_| Canvas2dError::ChannelClosed)
    }

    /// Take a queued message without blocking.
    pub fn try_receive(&self) -> Canvas2dResult<Option<Message>> {
        match self.incoming.try_recv() {
            Ok(message) => Ok(Some(message)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(Canvas2dError::ChannelClosed),
        }
    }

    /// Wait up to `timeout` for a message.
    pub fn receive_timeout(&self, timeout: Duration) -> Canvas2dResult<Option<Message>> {
        match self.incoming.recv_timeout(timeout) {
            Ok(message) => Ok(Some(message)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(Canvas2dError::ChannelClosed),
        }
    }
}
