use crate::fetcher::{FetchCompletion, FetchTicket};
use crate::model::{RankedGenre, TimeWindow};
use crate::range::RangeSelector;
use crate::stats::{self, AggregationResult};
use crate::visual::{self, RenderedStyle};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenreLayout {
    #[default]
    Breakdown,
    Cloud,
}

impl GenreLayout {
    pub fn toggle(self) -> Self {
        match self {
            Self::Breakdown => Self::Cloud,
            Self::Cloud => Self::Breakdown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Breakdown => "Breakdown",
            Self::Cloud => "Cloud",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadyGenres {
    pub window: TimeWindow,
    pub result: AggregationResult,
    pub tilt: Vec<i8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewPhase {
    Idle,
    Loading,
    Ready(ReadyGenres),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Ready,
    Failed,
    Stale,
}

pub enum ViewDisplay<'a> {
    Idle,
    Loading,
    Error(&'a str),
    Empty,
    Genres(&'a ReadyGenres),
}

pub struct GenreTile<'a> {
    pub genre: &'a RankedGenre,
    pub style: RenderedStyle,
    pub bar_width_percent: f64,
    pub tilt: i8,
    pub focused: bool,
}

#[derive(Debug)]
pub struct GenreView {
    selector: RangeSelector,
    phase: ViewPhase,
    in_flight: Option<FetchTicket>,
    next_ticket_id: u64,
    pub layout: GenreLayout,
    pub focus: usize,
    pub dirty: bool,
    pub status: String,
}

impl GenreView {
    pub fn new(initial: TimeWindow) -> Self {
        Self {
            selector: RangeSelector::new(initial),
            phase: ViewPhase::Idle,
            in_flight: None,
            next_ticket_id: 0,
            layout: GenreLayout::default(),
            focus: 0,
            dirty: true,
            status: String::from("Ready"),
        }
    }

    pub fn window(&self) -> TimeWindow {
        self.selector.active()
    }

    pub fn phase(&self) -> &ViewPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, ViewPhase::Loading)
    }

    pub fn mount(&mut self) -> FetchTicket {
        self.begin_load()
    }

    pub fn select_window(&mut self, window: TimeWindow) -> Option<FetchTicket> {
        let change = self.selector.select(window)?;
        debug!(
            from = change.from.query_value(),
            to = change.to.query_value(),
            "time window changed"
        );
        Some(self.begin_load())
    }

    pub fn select_next_window(&mut self) -> Option<FetchTicket> {
        self.select_window(self.window().next())
    }

    pub fn select_prev_window(&mut self) -> Option<FetchTicket> {
        self.select_window(self.window().prev())
    }

    pub fn refresh(&mut self) -> FetchTicket {
        self.begin_load()
    }

    fn begin_load(&mut self) -> FetchTicket {
        self.next_ticket_id = self.next_ticket_id.wrapping_add(1);
        let ticket = FetchTicket {
            id: self.next_ticket_id,
            window: self.selector.active(),
        };
        self.in_flight = Some(ticket);
        self.phase = ViewPhase::Loading;
        self.focus = 0;
        self.set_status(&format!("Loading {}...", ticket.window.label()));
        ticket
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.in_flight == Some(ticket) && ticket.window == self.selector.active()
    }

    pub fn complete(&mut self, completion: FetchCompletion) -> Resolution {
        let ticket = completion.ticket;
        if !self.is_current(ticket) {
            debug!(
                id = ticket.id,
                window = ticket.window.query_value(),
                "discarding stale genre response"
            );
            return Resolution::Stale;
        }
        self.in_flight = None;

        match completion.outcome {
            Ok(genres) => {
                let result = stats::aggregate(&genres);
                info!(
                    window = ticket.window.query_value(),
                    genres = result.ranked.len(),
                    total = result.total,
                    "genre statistics loaded"
                );
                let tilt = visual::scatter(result.cloud_set().len());
                let status = if result.is_empty() {
                    format!("No genres for {}", ticket.window.label())
                } else {
                    format!("{} genres, {} tallies", result.ranked.len(), result.total)
                };
                self.phase = ViewPhase::Ready(ReadyGenres {
                    window: ticket.window,
                    result,
                    tilt,
                });
                self.set_status(&status);
                Resolution::Ready
            }
            Err(err) => {
                warn!(window = ticket.window.query_value(), error = %err, "genre fetch failed");
                self.phase = ViewPhase::Failed(format!("Failed to fetch top genres: {err}"));
                self.set_status("Fetch failed");
                Resolution::Failed
            }
        }
    }

    pub fn display(&self) -> ViewDisplay<'_> {
        match &self.phase {
            ViewPhase::Idle => ViewDisplay::Idle,
            ViewPhase::Loading => ViewDisplay::Loading,
            ViewPhase::Failed(message) => ViewDisplay::Error(message),
            ViewPhase::Ready(ready) if ready.result.is_empty() => ViewDisplay::Empty,
            ViewPhase::Ready(ready) => ViewDisplay::Genres(ready),
        }
    }

    pub fn toggle_layout(&mut self) {
        self.layout = self.layout.toggle();
        self.focus = self.focus.min(self.visible_len().saturating_sub(1));
        self.dirty = true;
    }

    fn visible_len(&self) -> usize {
        let ViewPhase::Ready(ready) = &self.phase else {
            return 0;
        };
        match self.layout {
            GenreLayout::Breakdown => ready.result.chart_set().len(),
            GenreLayout::Cloud => ready.result.cloud_set().len(),
        }
    }

    pub fn focus_next(&mut self) {
        let len = self.visible_len();
        if len > 0 && self.focus + 1 < len {
            self.focus += 1;
            self.dirty = true;
        }
    }

    pub fn focus_prev(&mut self) {
        if self.focus > 0 {
            self.focus -= 1;
            self.dirty = true;
        }
    }

    pub fn tiles(&self) -> Vec<GenreTile<'_>> {
        let ViewPhase::Ready(ready) = &self.phase else {
            return Vec::new();
        };
        let visible = match self.layout {
            GenreLayout::Breakdown => ready.result.chart_set(),
            GenreLayout::Cloud => ready.result.cloud_set(),
        };

        visible
            .iter()
            .enumerate()
            .map(|(index, genre)| {
                let base = visual::describe(genre, ready.result.max);
                let focused = index == self.focus;
                GenreTile {
                    genre,
                    style: visual::hovered(focused, &base),
                    bar_width_percent: base.bar_width_percent,
                    tilt: ready.tilt.get(index).copied().unwrap_or(0),
                    focused,
                }
            })
            .collect()
    }

    pub fn set_status(&mut self, message: &str) {
        self.status = message.to_string();
        self.dirty = true;
    }
}
