//! Notifications to the component displaying the tree.

use log::trace;
use tokio::sync::mpsc;

use crate::model::NodeRef;

/// Receiver of structural change notifications.
///
/// The controller calls these after it has released its internal lock, so
/// implementations may read the model back through the controller.
pub trait TreeHost: Send + Sync {
    /// The model changed and should be re-rendered.
    fn model_changed(&self);

    /// The previously active node is no longer active or focused.
    fn node_deactivated(&self, node: &NodeRef);
}

/// A notification forwarded by [`ChannelHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEvent {
    /// See [`TreeHost::model_changed`].
    ModelChanged,
    /// See [`TreeHost::node_deactivated`].
    Deactivated(NodeRef),
}

/// Forwards notifications over an unbounded channel.
///
/// # Example
///
/// ```
/// use lazytree_lib::host::{ChannelHost, TreeEvent, TreeHost};
///
/// let (host, mut events) = ChannelHost::new();
/// host.model_changed();
/// assert_eq!(events.try_recv().ok(), Some(TreeEvent::ModelChanged));
/// ```
#[derive(Debug, Clone)]
pub struct ChannelHost {
    tx: mpsc::UnboundedSender<TreeEvent>,
}

impl ChannelHost {
    /// Creates a host and the receiving end of its events.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TreeEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, event: TreeEvent) {
        if self.tx.send(event).is_err() {
            trace!("tree event dropped: receiver closed");
        }
    }
}

impl TreeHost for ChannelHost {
    fn model_changed(&self) {
        self.send(TreeEvent::ModelChanged);
    }

    fn node_deactivated(&self, node: &NodeRef) {
        self.send(TreeEvent::Deactivated(node.clone()));
    }
}

/// Ignores all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHost;

impl TreeHost for NoopHost {
    fn model_changed(&self) {}

    fn node_deactivated(&self, _node: &NodeRef) {}
}
