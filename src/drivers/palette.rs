/// Stops of the `gist_rainbow` colour map: position, then RGB in 0..1.
const GIST_RAINBOW: [(f64, [f64; 3]); 8] = [
    (0.000, [1.00, 0.00, 0.16]),
    (0.030, [1.00, 0.00, 0.00]),
    (0.215, [1.00, 1.00, 0.00]),
    (0.400, [0.00, 1.00, 0.00]),
    (0.586, [0.00, 1.00, 1.00]),
    (0.770, [0.00, 0.00, 1.00]),
    (0.954, [1.00, 0.00, 1.00]),
    (1.000, [1.00, 0.00, 0.75]),
];
/// Samples the rainbow map at `x` (clamped to 0..=1).
pub fn gist_rainbow(x: f64) -> [u8; 3] {
    let x = x.clamp(0.0, 1.0);
    let upper = GIST_RAINBOW
        .iter()
        .position(|(pos, _)| *pos >= x)
        .unwrap_or(GIST_RAINBOW.len() - 1)
        .max(1);
    let (p0, c0) = GIST_RAINBOW[upper - 1];
    let (p1, c1) = GIST_RAINBOW[upper];
    let t = if p1 > p0 { (x - p0) / (p1 - p0) } else { 0.0 };
    let mut rgb = [0u8; 3];
    for (out, (a, b)) in rgb.iter_mut().zip(c0.iter().zip(c1.iter())) {
        *out = ((a + (b - a) * t) * 255.0).round() as u8;
    }
    rgb
}
/// `count` colours spread evenly over the middle of the rainbow, one per channel.
pub fn channel_palette(count: usize) -> Vec<[u8; 3]> {
    let (lo, hi) = (0.1, 0.9);
    match count {
        0 => Vec::new(),
        1 => vec![gist_rainbow(lo)],
        _ => (0..count)
            .map(|i| gist_rainbow(lo + (hi - lo) * i as f64 / (count - 1) as f64))
            .collect(),
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn map_hits_its_stops() {
        assert_eq!(gist_rainbow(0.03), [255, 0, 0]);
        assert_eq!(gist_rainbow(0.4), [0, 255, 0]);
        assert_eq!(gist_rainbow(0.77), [0, 0, 255]);
        assert_eq!(gist_rainbow(-3.0), [255, 0, 41]);
        assert_eq!(gist_rainbow(7.0), [255, 0, 191]);
    }
    #[test]
    fn palette_spreads_channels() {
        let colors = channel_palette(6);
        assert_eq!(colors.len(), 6);
        assert_eq!(colors[0], gist_rainbow(0.1));
        assert_eq!(colors[5], gist_rainbow(0.9));
        for pair in colors.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
        assert_eq!(channel_palette(1), vec![gist_rainbow(0.1)]);
        assert!(channel_palette(0).is_empty());
    }
}
