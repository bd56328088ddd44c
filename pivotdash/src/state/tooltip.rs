use pivotdash_core::Trend;
use std::time::{Duration, Instant};

/// Delay between leaving a populated cell and the tooltip disappearing
pub const TOOLTIP_HIDE_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub title: String,
    pub lines: Vec<String>,
    pub trend: Option<Trend>,
}

/// Most recent periods shown in the tooltip trend
pub const TREND_WIDTH: usize = 24;

/// Hover tooltip for the matrix cursor.
///
/// A show takes effect immediately and cancels any pending hide. A hide
/// request only takes effect once the delay has elapsed, and a newer request
/// replaces the older deadline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TooltipState {
    content: Option<TooltipContent>,
    hide_at: Option<Instant>,
}

impl TooltipState {
    pub fn show(&mut self, content: TooltipContent) {
        self.content = Some(content);
        self.hide_at = None;
    }

    pub fn request_hide(&mut self, now: Instant) {
        if self.content.is_some() {
            self.hide_at = Some(now + TOOLTIP_HIDE_DELAY);
        }
    }

    /// Apply a pending hide whose deadline has passed.
    /// Returns true when the tooltip was hidden.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.hide_at {
            Some(deadline) if now >= deadline => {
                self.clear();
                true
            }
            _ => false,
        }
    }

    /// Hide right away, dropping any pending deadline
    pub fn clear(&mut self) {
        self.content = None;
        self.hide_at = None;
    }

    pub fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.content.is_some()
    }

    pub fn hide_pending(&self) -> bool {
        self.hide_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(title: &str) -> TooltipContent {
        TooltipContent {
            title: title.to_string(),
            lines: vec![],
            trend: None,
        }
    }

    #[test]
    fn test_hide_waits_for_delay() {
        let start = Instant::now();
        let mut tooltip = TooltipState::default();
        tooltip.show(content("Sales"));

        tooltip.request_hide(start);
        assert!(!tooltip.expire(start + Duration::from_millis(100)));
        assert!(tooltip.is_visible());

        assert!(tooltip.expire(start + Duration::from_millis(200)));
        assert!(!tooltip.is_visible());
    }

    #[test]
    fn test_show_cancels_pending_hide() {
        let start = Instant::now();
        let mut tooltip = TooltipState::default();
        tooltip.show(content("Sales"));
        tooltip.request_hide(start);

        tooltip.show(content("Costs"));
        assert!(!tooltip.hide_pending());
        assert!(!tooltip.expire(start + Duration::from_secs(1)));
        assert_eq!(tooltip.content().unwrap().title, "Costs");
    }

    #[test]
    fn test_latest_hide_request_wins() {
        let start = Instant::now();
        let mut tooltip = TooltipState::default();
        tooltip.show(content("Sales"));

        tooltip.request_hide(start);
        tooltip.request_hide(start + Duration::from_millis(150));

        assert!(!tooltip.expire(start + Duration::from_millis(250)));
        assert!(tooltip.expire(start + Duration::from_millis(350)));
    }

    #[test]
    fn test_hide_request_without_tooltip_is_ignored() {
        let mut tooltip = TooltipState::default();
        tooltip.request_hide(Instant::now());
        assert!(!tooltip.hide_pending());
    }
}
