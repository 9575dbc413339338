//! Scroll-position tracking for the table of contents
//!
//! The tracker decides which heading is "being read": the last heading whose
//! anchor top has scrolled above the activation line, `offset` pixels below the
//! top of the viewport. Positions come from an [`AnchorResolver`], so the
//! computation runs the same against a real viewport or a synthetic table.
//!
//! Subscription to the scroll signal is explicit. A tracker registers one
//! listener while it has headings to track and releases it when the heading
//! list changes or the consumer goes away.

use crate::markdown::{Heading, HeadingList};

/// Activation line used when none is configured, in pixels
pub const DEFAULT_SCROLL_OFFSET: i32 = 100;

/// Measures the on-screen position of heading anchors
pub trait AnchorResolver {
    /// Viewport-relative top of the first anchor with this id, if one is rendered
    fn anchor_top(&self, id: &str) -> Option<f64>;
}

/// In-memory anchor positions, in document order
///
/// When an id is registered twice, lookups return the first position, the
/// same way a DOM lookup by id returns the first matching element.
#[derive(Debug, Clone, Default)]
pub struct AnchorTable {
    anchors: Vec<(String, f64)>,
}

impl AnchorTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an anchor position
    pub fn insert(&mut self, id: impl Into<String>, top: f64) {
        self.anchors.push((id.into(), top));
    }

    /// Move every anchor by `delta` pixels (negative scrolls the page down)
    pub fn shift(&mut self, delta: f64) {
        for (_, top) in &mut self.anchors {
            *top += delta;
        }
    }

    /// Number of registered anchors
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Check if no anchors are registered
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for AnchorTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (id, top) in iter {
            table.insert(id, top);
        }
        table
    }
}

impl AnchorResolver for AnchorTable {
    fn anchor_top(&self, id: &str) -> Option<f64> {
        self.anchors
            .iter()
            .find(|(anchor_id, _)| anchor_id == id)
            .map(|(_, top)| *top)
    }
}

/// Compute the active heading id for one scroll position
///
/// Headings without a rendered anchor are skipped. The resolved anchors are
/// scanned from the last to the first and the first one whose top is at or
/// above `offset` wins. If every anchor is below the line, the first resolved
/// anchor is used.
///
/// # Returns
/// * `Some(id)` - The heading that should be highlighted
/// * `None` - No heading could be resolved; the caller keeps its current state
pub fn resolve_active_id<R>(items: &[Heading], offset: i32, anchors: &R) -> Option<String>
where
    R: AnchorResolver + ?Sized,
{
    let resolved: Vec<(&str, f64)> = items
        .iter()
        .filter_map(|item| {
            anchors
                .anchor_top(&item.id)
                .map(|top| (item.id.as_str(), top))
        })
        .collect();

    let line = f64::from(offset);
    resolved
        .iter()
        .rev()
        .find(|(_, top)| *top <= line)
        .or_else(|| resolved.first())
        .map(|(id, _)| (*id).to_string())
}

/// Handle for a registered scroll listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registry of scroll listeners, standing in for the viewport scroll event
#[derive(Debug, Default)]
pub struct ScrollSignal {
    next_id: u64,
    listeners: Vec<ListenerId>,
}

impl ScrollSignal {
    /// Create a signal with no listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener
    pub fn add_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(id);
        id
    }

    /// Release a listener, returning whether it was registered
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|listener| *listener != id);
        self.listeners.len() != before
    }

    /// Check whether a listener is still registered
    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners.contains(&id)
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Tracker lifecycle
#[derive(Debug, Default)]
enum TrackerState {
    /// No headings, no listener
    #[default]
    Idle,
    /// Subscribed to the scroll signal for a heading list
    Tracking {
        items: HeadingList,
        listener: ListenerId,
    },
}

/// Publishes the active heading id of the current document
#[derive(Debug)]
pub struct ScrollSpyTracker {
    offset: i32,
    state: TrackerState,
    active_id: Option<String>,
}

impl Default for ScrollSpyTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_OFFSET)
    }
}

impl ScrollSpyTracker {
    /// Create an idle tracker with the given activation offset
    pub fn new(offset: i32) -> Self {
        Self {
            offset,
            state: TrackerState::Idle,
            active_id: None,
        }
    }

    /// Currently active heading id
    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// Activation offset in pixels
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Check whether the tracker holds a scroll listener
    pub fn is_tracking(&self) -> bool {
        matches!(self.state, TrackerState::Tracking { .. })
    }

    /// Listener registered for the current heading list, if any
    pub fn listener(&self) -> Option<ListenerId> {
        match &self.state {
            TrackerState::Tracking { listener, .. } => Some(*listener),
            TrackerState::Idle => None,
        }
    }

    /// Start tracking a heading list
    ///
    /// Supplying the list that is already tracked does nothing. Any other list
    /// releases the previous listener; a non-empty list registers a new one,
    /// defaults the active id to its first heading and immediately resolves
    /// positions so no stale entry from the previous document survives.
    pub fn track<R>(
        &mut self,
        items: &HeadingList,
        signal: &mut ScrollSignal,
        anchors: &R,
    ) -> Option<&str>
    where
        R: AnchorResolver + ?Sized,
    {
        let already_tracked = matches!(
            &self.state,
            TrackerState::Tracking { items: current, .. } if current.same_list(items)
        );
        if already_tracked {
            return self.active_id();
        }

        self.unsubscribe(signal);

        let Some(first) = items.first() else {
            log::debug!("scroll spy idle: no headings to track");
            return None;
        };

        let listener = signal.add_listener();
        self.active_id = Some(first.id.clone());
        self.state = TrackerState::Tracking {
            items: items.clone(),
            listener,
        };
        log::debug!("scroll spy tracking {} headings", items.len());

        self.recompute(anchors);
        self.active_id()
    }

    /// Handle one scroll signal
    ///
    /// Ignored while idle or after the listener has been released.
    pub fn on_scroll<R>(&mut self, signal: &ScrollSignal, anchors: &R) -> Option<&str>
    where
        R: AnchorResolver + ?Sized,
    {
        let subscribed = matches!(
            &self.state,
            TrackerState::Tracking { listener, .. } if signal.is_registered(*listener)
        );
        if subscribed {
            self.recompute(anchors);
        }
        self.active_id()
    }

    /// Change the activation offset and re-resolve immediately
    pub fn set_offset<R>(&mut self, offset: i32, anchors: &R) -> Option<&str>
    where
        R: AnchorResolver + ?Sized,
    {
        self.offset = offset;
        self.recompute(anchors);
        self.active_id()
    }

    /// Release the scroll listener and return to idle
    pub fn unsubscribe(&mut self, signal: &mut ScrollSignal) {
        if let TrackerState::Tracking { listener, .. } = std::mem::take(&mut self.state) {
            signal.remove_listener(listener);
        }
        self.active_id = None;
    }

    fn recompute<R>(&mut self, anchors: &R)
    where
        R: AnchorResolver + ?Sized,
    {
        let TrackerState::Tracking { items, .. } = &self.state else {
            return;
        };

        if let Some(id) = resolve_active_id(items, self.offset, anchors) {
            if self.active_id.as_deref() != Some(id.as_str()) {
                log::debug!("active heading changed to '{}'", id);
            }
            self.active_id = Some(id);
        }
    }
}
