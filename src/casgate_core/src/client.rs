//! Ports for the browser side of the logout interception.
//!
//! The rebinding state machine never touches a concrete DOM. A host (a wasm
//! binding, a headless browser driver, a test double) implements these traits
//! and hands the implementation to the poller.

/// A click (or keyboard activation) being dispatched to a listener.
pub trait ActivationEvent {
    /// Cancel the element's default action (following the anchor's `href`).
    fn prevent_default(&mut self);

    /// Stop the event from reaching listeners on ancestor nodes.
    fn stop_propagation(&mut self);

    /// Stop every other listener, including the remaining ones on the same
    /// node, from seeing this event.
    ///
    /// Returns `false` when the host has no such primitive.
    fn stop_immediate_propagation(&mut self) -> bool;
}

/// Sets the browser's location.
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str);
}

/// Listener registered on a resolved node. Ownership moves to the DOM.
pub type ClickListener = Box<dyn FnMut(&mut dyn ActivationEvent) + Send>;

/// The subset of a document the lookup chain needs.
pub trait PageDom: Send {
    /// Handle to an element. Cloning must be cheap.
    type Node: Clone + Send;

    /// Every element matching `selector` below `scope` (the whole document
    /// when `None`), in document order.
    fn query_all(&self, scope: Option<&Self::Node>, selector: &str) -> Vec<Self::Node>;

    /// Register `listener` for clicks on `node`.
    fn add_click_listener(&mut self, node: Self::Node, listener: ClickListener);
}
