use crate::model::{GenreCount, RankedGenre};
use std::collections::HashMap;

pub const TOP_GENRES_COUNT: usize = 5;
pub const CHART_GENRES_COUNT: usize = 15;
pub const CLOUD_GENRES_COUNT: usize = 20;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregationResult {
    pub ranked: Vec<RankedGenre>,
    pub total: u128,
    pub max: u128,
}

impl AggregationResult {
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn top_five(&self) -> &[RankedGenre] {
        head(&self.ranked, TOP_GENRES_COUNT)
    }

    pub fn chart_set(&self) -> &[RankedGenre] {
        head(&self.ranked, CHART_GENRES_COUNT)
    }

    pub fn cloud_set(&self) -> &[RankedGenre] {
        head(&self.ranked, CLOUD_GENRES_COUNT)
    }
}

fn head(rows: &[RankedGenre], limit: usize) -> &[RankedGenre] {
    &rows[..rows.len().min(limit)]
}

pub fn aggregate(input: &[GenreCount]) -> AggregationResult {
    let mut tallies = collect_valid(input);
    let total = tallies
        .iter()
        .fold(0_u128, |sum, (_, count)| sum.saturating_add(*count));
    if total == 0 {
        return AggregationResult::default();
    }

    // `sort_by` is stable, so equal counts keep their input order.
    tallies.sort_by(|a, b| b.1.cmp(&a.1));
    let max = tallies.first().map(|(_, count)| *count).unwrap_or(0);

    let ranked = tallies
        .into_iter()
        .enumerate()
        .map(|(index, (name, count))| RankedGenre {
            name: name.to_string(),
            count,
            rank: index + 1,
            percentage: percentage_of(count, total),
            intensity: count as f64 / max as f64,
        })
        .collect();

    AggregationResult { ranked, total, max }
}

pub fn percentage_of(count: u128, total: u128) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u32
}

// Repeated names fold into the slot of their first appearance.
fn collect_valid(input: &[GenreCount]) -> Vec<(&str, u128)> {
    let mut tallies: Vec<(&str, u128)> = Vec::with_capacity(input.len());
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for entry in input {
        let name = entry.name.trim();
        let Ok(count) = u128::try_from(entry.count) else {
            continue;
        };
        if name.is_empty() || count == 0 {
            continue;
        }

        match slots.get(name) {
            Some(&slot) => tallies[slot].1 = tallies[slot].1.saturating_add(count),
            None => {
                slots.insert(name, tallies.len());
                tallies.push((name, count));
            }
        }
    }

    tallies
}
