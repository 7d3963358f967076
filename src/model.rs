use serde::{Deserialize, Serialize};

/// Historical window the backend aggregates listening statistics over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeWindow {
    Short,
    #[default]
    Medium,
    Long,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 3] = [Self::Short, Self::Medium, Self::Long];

    pub fn label(self) -> &'static str {
        match self {
            Self::Short => "Last 4 Weeks",
            Self::Medium => "Last 6 Months",
            Self::Long => "All Time",
        }
    }

    /// Value sent as the `time_range` query parameter.
    pub fn query_value(self) -> &'static str {
        match self {
            Self::Short => "short_term",
            Self::Medium => "medium_term",
            Self::Long => "long_term",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Short => Self::Medium,
            Self::Medium => Self::Long,
            Self::Long => Self::Short,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Short => Self::Long,
            Self::Medium => Self::Short,
            Self::Long => Self::Medium,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "short" | "short_term" => Some(Self::Short),
            "medium" | "medium_term" => Some(Self::Medium),
            "long" | "long_term" => Some(Self::Long),
            _ => None,
        }
    }
}

/// Raw tally as delivered by the backend. Counts are signed so that
/// malformed upstream values survive decoding and get dropped during
/// aggregation instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreCount {
    pub name: String,
    pub count: i64,
}

impl GenreCount {
    pub fn new(name: impl Into<String>, count: i64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedGenre {
    pub name: String,
    pub count: u128,
    /// 1-based.
    pub rank: usize,
    pub percentage: u32,
    pub intensity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Dark,
    PitchBlack,
    Galaxy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_medium() {
        assert_eq!(TimeWindow::default(), TimeWindow::Medium);
    }

    #[test]
    fn window_cycles_through_all_values() {
        let mut window = TimeWindow::Short;
        for _ in 0..3 {
            window = window.next();
        }
        assert_eq!(window, TimeWindow::Short);
        assert_eq!(TimeWindow::Short.prev(), TimeWindow::Long);
    }

    #[test]
    fn parses_cli_and_wire_names() {
        assert_eq!(TimeWindow::parse("long"), Some(TimeWindow::Long));
        assert_eq!(TimeWindow::parse(" Short_Term "), Some(TimeWindow::Short));
        assert_eq!(TimeWindow::parse("yearly"), None);
        assert_eq!(TimeWindow::Medium.query_value(), "medium_term");
    }
}
