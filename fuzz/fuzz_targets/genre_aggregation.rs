#![no_main]

use libfuzzer_sys::fuzz_target;
use tunestats::model::GenreCount;
use tunestats::stats::aggregate;

fuzz_target!(|data: &[u8]| {
    let input: Vec<GenreCount> = data
        .chunks(3)
        .map(|chunk| {
            let name = format!("g{}", chunk[0] % 24);
            let count = chunk.get(1).map_or(0, |byte| i64::from(*byte) - 32)
                * chunk.get(2).map_or(1, |byte| i64::from(*byte));
            GenreCount::new(name, count)
        })
        .collect();

    let result = aggregate(&input);

    assert!(result.ranked.windows(2).all(|pair| pair[0].count >= pair[1].count));
    assert_eq!(result.max, result.ranked.first().map_or(0, |top| top.count));
    assert_eq!(result.total == 0, result.ranked.is_empty());
    assert!(result
        .ranked
        .iter()
        .all(|genre| (0.0..=1.0).contains(&genre.intensity)));
    if !result.ranked.is_empty() {
        let sum: i64 = result.ranked.iter().map(|g| i64::from(g.percentage)).sum();
        assert!((sum - 100).abs() <= result.ranked.len() as i64);
    }
});
