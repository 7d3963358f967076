use crate::model::{Theme, TimeWindow};
use crate::view::{GenreLayout, GenreTile, GenreView, ReadyGenres, ViewDisplay};
use crate::visual::{Shadow, TextTone};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

const APP_TITLE_WITH_VERSION: &str = "TuneStats v0.1.0  ";
const CHART_LABEL_WIDTH: u16 = 22;
const CHART_VALUE_WIDTH: u16 = 6;
const PX_PER_CELL: f64 = 8.0;

#[derive(Clone, Copy)]
struct ThemePalette {
    bg: Color,
    panel_bg: Color,
    panel_rgb: (u8, u8, u8),
    border: Color,
    text: Color,
    muted: Color,
    accent: Color,
    alert: Color,
    selected_bg: Color,
}

fn palette(theme: Theme) -> ThemePalette {
    match theme {
        Theme::Dark => ThemePalette {
            bg: Color::Rgb(10, 15, 24),
            panel_bg: Color::Rgb(19, 29, 43),
            panel_rgb: (19, 29, 43),
            border: Color::Rgb(69, 121, 176),
            text: Color::Rgb(214, 228, 248),
            muted: Color::Rgb(149, 173, 204),
            accent: Color::Rgb(100, 203, 184),
            alert: Color::Rgb(249, 174, 88),
            selected_bg: Color::Rgb(34, 55, 82),
        },
        Theme::PitchBlack => ThemePalette {
            bg: Color::Rgb(0, 0, 0),
            panel_bg: Color::Rgb(8, 8, 8),
            panel_rgb: (8, 8, 8),
            border: Color::Rgb(74, 74, 74),
            text: Color::Rgb(242, 242, 242),
            muted: Color::Rgb(150, 150, 150),
            accent: Color::Rgb(212, 212, 212),
            alert: Color::Rgb(235, 176, 97),
            selected_bg: Color::Rgb(26, 26, 26),
        },
        Theme::Galaxy => ThemePalette {
            bg: Color::Rgb(7, 8, 23),
            panel_bg: Color::Rgb(18, 16, 44),
            panel_rgb: (18, 16, 44),
            border: Color::Rgb(108, 107, 205),
            text: Color::Rgb(227, 225, 252),
            muted: Color::Rgb(167, 165, 210),
            accent: Color::Rgb(141, 204, 255),
            alert: Color::Rgb(255, 189, 121),
            selected_bg: Color::Rgb(40, 37, 86),
        },
    }
}

pub fn draw(frame: &mut Frame, view: &GenreView, theme: Theme) {
    let colors = palette(theme);
    frame.render_widget(
        Block::default().style(Style::default().bg(colors.bg)),
        frame.area(),
    );

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(header_line(view, &colors)).block(panel_block(
        "Your Top Genres",
        colors.panel_bg,
        colors.text,
        colors.border,
    ));
    frame.render_widget(header, vertical[0]);

    match view.display() {
        ViewDisplay::Idle | ViewDisplay::Loading => draw_notice(
            frame,
            vertical[1],
            "Loading your top genres...",
            colors.muted,
            &colors,
        ),
        ViewDisplay::Error(message) => draw_notice(
            frame,
            vertical[1],
            &format!("Error: {message}"),
            colors.alert,
            &colors,
        ),
        ViewDisplay::Empty => draw_notice(
            frame,
            vertical[1],
            "No genre data available for this time period.",
            colors.muted,
            &colors,
        ),
        ViewDisplay::Genres(ready) => draw_genres(frame, vertical[1], view, ready, &colors),
    }

    let footer = Paragraph::new(Line::from(vec![
        Span::styled(
            "Keys: Left/Right or 1-3 range, Tab layout, Up/Down focus, r refresh, q quit",
            Style::default().fg(colors.muted),
        ),
        Span::styled("  |  ", Style::default().fg(colors.muted)),
        Span::styled(view.status.as_str(), Style::default().fg(colors.text)),
    ]))
    .block(panel_block(
        "Message",
        colors.panel_bg,
        colors.text,
        colors.border,
    ));
    frame.render_widget(footer, vertical[2]);
}

fn header_line(view: &GenreView, colors: &ThemePalette) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            APP_TITLE_WITH_VERSION,
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Time Range: ", Style::default().fg(colors.muted)),
    ];

    for (idx, window) in TimeWindow::ALL.into_iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" -- ", Style::default().fg(colors.muted)));
        }
        let mut style = Style::default().fg(colors.text);
        if window == view.window() {
            style = style
                .fg(colors.alert)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        spans.push(Span::styled(
            format!("{} {}", idx + 1, window.label()),
            style,
        ));
    }

    spans.push(Span::styled("  |  ", Style::default().fg(colors.muted)));
    spans.push(Span::styled(
        view.layout.label(),
        Style::default().fg(colors.accent),
    ));
    Line::from(spans)
}

fn draw_notice(frame: &mut Frame, area: Rect, message: &str, color: Color, colors: &ThemePalette) {
    let notice = Paragraph::new(Span::styled(message.to_string(), Style::default().fg(color)))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(panel_block(
            "Genres",
            colors.panel_bg,
            colors.text,
            colors.border,
        ));
    frame.render_widget(notice, area);
}

fn draw_genres(
    frame: &mut Frame,
    area: Rect,
    view: &GenreView,
    ready: &ReadyGenres,
    colors: &ThemePalette,
) {
    let top_len = ready.result.top_five().len() as u16;
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(top_len + 2), Constraint::Min(4)])
        .split(area);

    let top_lines: Vec<Line> = ready
        .result
        .top_five()
        .iter()
        .map(|genre| {
            let mut name_style = Style::default().fg(colors.text);
            if genre.rank == 1 {
                name_style = name_style.fg(colors.alert).add_modifier(Modifier::BOLD);
            } else if genre.rank <= 3 {
                name_style = name_style.add_modifier(Modifier::BOLD);
            }
            Line::from(vec![
                Span::styled(
                    format!("#{:<3}", genre.rank),
                    Style::default().fg(colors.muted),
                ),
                Span::styled(genre.name.clone(), name_style),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(top_lines).block(panel_block(
            "Top 5",
            colors.panel_bg,
            colors.text,
            colors.border,
        )),
        sections[0],
    );

    let tiles = view.tiles();
    match view.layout {
        GenreLayout::Breakdown => draw_breakdown(frame, sections[1], &tiles, colors),
        GenreLayout::Cloud => draw_cloud(frame, sections[1], &tiles, colors),
    }
}

fn draw_breakdown(frame: &mut Frame, area: Rect, tiles: &[GenreTile], colors: &ThemePalette) {
    let inner_width = area.width.saturating_sub(2);
    let bar_width = inner_width.saturating_sub(CHART_LABEL_WIDTH + CHART_VALUE_WIDTH + 2);

    let lines: Vec<Line> = tiles
        .iter()
        .map(|tile| {
            let (r, g, b) = tile.style.background.over(colors.panel_rgb);
            let filled = bar_cells(tile.bar_width_percent, usize::from(bar_width));
            let mut label_style = Style::default().fg(colors.text);
            if tile.focused {
                label_style = label_style
                    .bg(colors.selected_bg)
                    .add_modifier(Modifier::BOLD);
            }
            Line::from(vec![
                Span::styled(
                    format!(
                        "{:<width$} ",
                        truncate(&tile.genre.name, usize::from(CHART_LABEL_WIDTH)),
                        width = usize::from(CHART_LABEL_WIDTH)
                    ),
                    label_style,
                ),
                Span::styled("█".repeat(filled), Style::default().fg(Color::Rgb(r, g, b))),
                Span::raw(" ".repeat(usize::from(bar_width).saturating_sub(filled))),
                Span::styled(
                    format!(" {:>4}%", tile.genre.percentage),
                    Style::default().fg(colors.muted),
                ),
            ])
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(panel_block(
            "Genre Breakdown",
            colors.panel_bg,
            colors.text,
            colors.border,
        )),
        area,
    );
}

fn draw_cloud(frame: &mut Frame, area: Rect, tiles: &[GenreTile], colors: &ThemePalette) {
    let mut spans = Vec::with_capacity(tiles.len() * 2);
    for tile in tiles {
        spans.push(Span::raw(" ".repeat(tilt_gap(tile.tilt))));

        let (r, g, b) = tile.style.background.over(colors.panel_rgb);
        let fg = match tile.style.text {
            TextTone::Light => Color::Rgb(255, 255, 255),
            TextTone::Dark => Color::Rgb(0, 0, 0),
        };
        let mut modifiers = emphasis(tile.style.font_size);
        if tile.style.shadow == Shadow::Raised {
            modifiers |= Modifier::UNDERLINED | Modifier::BOLD;
        }
        let pad = " ".repeat(padding_cells(
            crate::visual::padding(tile.style.font_size).horizontal_px,
        ));
        spans.push(Span::styled(
            format!("{pad}{}{pad}", tile.genre.name),
            Style::default()
                .bg(Color::Rgb(r, g, b))
                .fg(fg)
                .add_modifier(modifiers),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(panel_block(
                "Genre Cloud",
                colors.panel_bg,
                colors.text,
                colors.border,
            )),
        area,
    );
}

fn panel_block(title: &str, bg: Color, text: Color, border: Color) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(text).add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(bg))
}

fn bar_cells(width_percent: f64, available: usize) -> usize {
    let ratio = (width_percent / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * available as f64).round() as usize;
    // Any non-zero share stays visible.
    if width_percent > 0.0 && available > 0 {
        filled.max(1)
    } else {
        filled
    }
}

fn padding_cells(px: f64) -> usize {
    (px / PX_PER_CELL).round().max(1.0) as usize
}

fn tilt_gap(tilt: i8) -> usize {
    1 + usize::from(tilt.unsigned_abs())
}

fn emphasis(font_size: f64) -> Modifier {
    if font_size >= 30.0 {
        Modifier::BOLD
    } else if font_size < 18.0 {
        Modifier::DIM
    } else {
        Modifier::empty()
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('~');
    out
}
