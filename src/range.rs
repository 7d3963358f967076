use crate::model::TimeWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowChanged {
    pub from: TimeWindow,
    pub to: TimeWindow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RangeSelector {
    active: TimeWindow,
}

impl RangeSelector {
    pub fn new(initial: TimeWindow) -> Self {
        Self { active: initial }
    }

    pub fn active(&self) -> TimeWindow {
        self.active
    }

    /// Returns `None` when `window` is already active.
    pub fn select(&mut self, window: TimeWindow) -> Option<WindowChanged> {
        if window == self.active {
            return None;
        }
        let from = self.active;
        self.active = window;
        Some(WindowChanged { from, to: window })
    }

    pub fn select_next(&mut self) -> Option<WindowChanged> {
        self.select(self.active.next())
    }

    pub fn select_prev(&mut self) -> Option<WindowChanged> {
        self.select(self.active.prev())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_medium() {
        assert_eq!(RangeSelector::default().active(), TimeWindow::Medium);
    }

    #[test]
    fn selecting_new_window_emits_change() {
        let mut selector = RangeSelector::default();
        let change = selector.select(TimeWindow::Long).expect("change");
        assert_eq!(change.from, TimeWindow::Medium);
        assert_eq!(change.to, TimeWindow::Long);
        assert_eq!(selector.active(), TimeWindow::Long);
    }

    #[test]
    fn reselecting_active_window_is_noop() {
        let mut selector = RangeSelector::new(TimeWindow::Short);
        assert_eq!(selector.select(TimeWindow::Short), None);
        assert_eq!(selector.active(), TimeWindow::Short);
    }

    #[test]
    fn stepping_wraps_around() {
        let mut selector = RangeSelector::new(TimeWindow::Long);
        assert_eq!(selector.select_next().map(|c| c.to), Some(TimeWindow::Short));
        assert_eq!(selector.select_prev().map(|c| c.to), Some(TimeWindow::Long));
    }
}
