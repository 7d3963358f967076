use crate::model::RankedGenre;

pub const MIN_FONT_SIZE: f64 = 14.0;
pub const MAX_FONT_SIZE: f64 = 38.0;
pub const BUBBLE_ALPHA: f64 = 0.7;
pub const HOVER_SCALE: f64 = 1.05;
// ~39% of 255.
const LIGHT_TEXT_THRESHOLD: u8 = 100;
const MAX_TILT_DEGREES: i8 = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f64,
}

impl Rgba {
    pub fn over(self, backdrop: (u8, u8, u8)) -> (u8, u8, u8) {
        let mix = |top: u8, bottom: u8| -> u8 {
            let alpha = self.alpha.clamp(0.0, 1.0);
            (f64::from(top) * alpha + f64::from(bottom) * (1.0 - alpha)).round() as u8
        };
        (
            mix(self.r, backdrop.0),
            mix(self.g, backdrop.1),
            mix(self.b, backdrop.2),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTone {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shadow {
    Resting,
    Raised,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudStyle {
    pub font_size: f64,
    pub background: Rgba,
    pub text: TextTone,
    pub bar_width_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubblePadding {
    pub vertical_px: f64,
    pub horizontal_px: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedStyle {
    pub font_size: f64,
    pub background: Rgba,
    pub text: TextTone,
    pub scale: f64,
    pub shadow: Shadow,
}

pub fn describe(genre: &RankedGenre, max: u128) -> CloudStyle {
    let channel = intensity_channel(genre.intensity);
    CloudStyle {
        font_size: font_size(genre.intensity),
        background: background(channel),
        text: text_tone(channel),
        bar_width_percent: bar_width_percent(genre.count, max),
    }
}

pub fn font_size(intensity: f64) -> f64 {
    MIN_FONT_SIZE + intensity.clamp(0.0, 1.0) * (MAX_FONT_SIZE - MIN_FONT_SIZE)
}

pub fn intensity_channel(intensity: f64) -> u8 {
    (intensity.clamp(0.0, 1.0) * 255.0).floor() as u8
}

pub fn background(channel: u8) -> Rgba {
    let level = f64::from(channel);
    Rgba {
        r: (30.0 + level).min(255.0) as u8,
        g: (70.0 + level * 0.5).min(255.0) as u8,
        b: (255.0 - level * 0.7).max(0.0) as u8,
        alpha: BUBBLE_ALPHA,
    }
}

pub fn text_tone(channel: u8) -> TextTone {
    if channel > LIGHT_TEXT_THRESHOLD {
        TextTone::Light
    } else {
        TextTone::Dark
    }
}

pub fn bar_width_percent(count: u128, max: u128) -> f64 {
    if max == 0 {
        return 0.0;
    }
    (count as f64 * 100.0 / max as f64).clamp(0.0, 100.0)
}

pub fn padding(font_size: f64) -> BubblePadding {
    BubblePadding {
        vertical_px: 8.0 + font_size * 0.2,
        horizontal_px: 12.0 + font_size * 0.3,
    }
}

pub fn hovered(is_hovered: bool, base: &CloudStyle) -> RenderedStyle {
    let (scale, shadow) = if is_hovered {
        (HOVER_SCALE, Shadow::Raised)
    } else {
        (1.0, Shadow::Resting)
    };
    RenderedStyle {
        font_size: base.font_size * scale,
        background: base.background,
        text: base.text,
        scale,
        shadow,
    }
}

pub fn scatter(len: usize) -> Vec<i8> {
    (0..len)
        .map(|_| rand::random_range(-MAX_TILT_DEGREES..=MAX_TILT_DEGREES))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genre(count: u128, intensity: f64) -> RankedGenre {
        RankedGenre {
            name: String::from("shoegaze"),
            count,
            rank: 1,
            percentage: 0,
            intensity,
        }
    }

    #[test]
    fn font_size_spans_fixed_range() {
        assert_eq!(font_size(0.0), MIN_FONT_SIZE);
        assert_eq!(font_size(1.0), MAX_FONT_SIZE);
        assert_eq!(font_size(0.5), 26.0);
        assert_eq!(font_size(3.0), MAX_FONT_SIZE);
    }

    #[test]
    fn top_genre_gets_warm_background_and_light_text() {
        let style = describe(&genre(50, 1.0), 50);
        assert_eq!(
            style.background,
            Rgba {
                r: 255,
                g: 197,
                b: 76,
                alpha: BUBBLE_ALPHA
            }
        );
        assert_eq!(style.text, TextTone::Light);
        assert_eq!(style.bar_width_percent, 100.0);
    }

    #[test]
    fn faint_genre_gets_cool_background_and_dark_text() {
        let style = describe(&genre(2, 0.04), 50);
        assert_eq!(style.background.r, 40);
        assert_eq!(style.background.b, 248);
        assert_eq!(style.text, TextTone::Dark);
        assert_eq!(style.bar_width_percent, 4.0);
    }

    #[test]
    fn text_switches_above_channel_threshold() {
        assert_eq!(text_tone(100), TextTone::Dark);
        assert_eq!(text_tone(101), TextTone::Light);
        assert_eq!(intensity_channel(0.5), 127);
    }

    #[test]
    fn bar_width_follows_counts_not_intensity() {
        assert_eq!(bar_width_percent(30, 50), 60.0);
        assert_eq!(bar_width_percent(7, 0), 0.0);
    }

    #[test]
    fn bar_width_handles_counts_past_i64() {
        let max = 3 * i64::MAX as u128;
        assert_eq!(bar_width_percent(max, max), 100.0);
        assert_eq!(bar_width_percent(i64::MAX as u128, max).round(), 33.0);
    }

    #[test]
    fn hover_scales_without_mutating_base() {
        let base = describe(&genre(30, 0.6), 50);
        let resting = hovered(false, &base);
        let lifted = hovered(true, &base);

        assert_eq!(resting.font_size, base.font_size);
        assert_eq!(resting.shadow, Shadow::Resting);
        assert!((lifted.font_size - base.font_size * HOVER_SCALE).abs() < 1e-9);
        assert_eq!(lifted.shadow, Shadow::Raised);
        assert_eq!(lifted.background, base.background);
    }

    #[test]
    fn padding_grows_with_font_size() {
        let small = padding(MIN_FONT_SIZE);
        let large = padding(MAX_FONT_SIZE);
        assert!((small.horizontal_px - 16.2).abs() < 1e-9);
        assert!(large.vertical_px > small.vertical_px);
    }

    #[test]
    fn compositing_blends_toward_backdrop() {
        let color = Rgba {
            r: 200,
            g: 100,
            b: 0,
            alpha: 0.5,
        };
        assert_eq!(color.over((0, 0, 100)), (100, 50, 50));
    }
}
