use ndarray::ArrayView1;
/// Upper bound on bins per channel histogram.
pub const MAX_BINS: usize = 100;
/// Equal-width histogram of one channel.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    /// `counts.len() + 1` bin edges, ascending.
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
}
impl Histogram {
    /// Bins integer samples with one bin per distinct value, capped at `max_bins`.
    pub fn of_channel(values: ArrayView1<'_, i32>, max_bins: usize) -> Self {
        let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
            return Self {
                edges: Vec::new(),
                counts: Vec::new(),
            };
        };
        let span = i64::from(max) - i64::from(min) + 1;
        let bins = usize::try_from(span).unwrap_or(usize::MAX).min(max_bins.max(1));
        let (lo, hi) = if min == max {
            (f64::from(min) - 0.5, f64::from(max) + 0.5)
        } else {
            (f64::from(min), f64::from(max))
        };
        let width = (hi - lo) / bins as f64;
        let edges = (0..=bins).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0u64; bins];
        for &v in values {
            let idx = ((f64::from(v) - lo) / width) as usize;
            counts[idx.min(bins - 1)] += 1;
        }
        Self { edges, counts }
    }
    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }
    pub fn bin_centers(&self) -> impl Iterator<Item = f64> + '_ {
        self.edges.windows(2).map(|w| (w[0] + w[1]) / 2.0)
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    #[test]
    fn one_bin_per_value_for_narrow_ranges() {
        let values = array![3, 4, 4, 5, 5, 5];
        let hist = Histogram::of_channel(values.view(), MAX_BINS);
        assert_eq!(hist.counts.len(), 3);
        assert_eq!(hist.counts.iter().sum::<u64>(), 6);
        assert_eq!(hist.edges.len(), 4);
        assert_eq!(*hist.counts.last().unwrap(), 3);
    }
    #[test]
    fn wide_ranges_are_capped() {
        let values: ndarray::Array1<i32> = (0..1024).collect();
        let hist = Histogram::of_channel(values.view(), MAX_BINS);
        assert_eq!(hist.counts.len(), MAX_BINS);
        assert_eq!(hist.counts.iter().sum::<u64>(), 1024);
        assert!((hist.edges[0] - 0.0).abs() < 1e-9);
        assert!((hist.edges[MAX_BINS] - 1023.0).abs() < 1e-9);
    }
    #[test]
    fn constant_channel_gets_a_single_centred_bin() {
        let values = array![512, 512, 512];
        let hist = Histogram::of_channel(values.view(), MAX_BINS);
        assert_eq!(hist.counts, vec![3]);
        assert_eq!(hist.edges, vec![511.5, 512.5]);
        assert_eq!(hist.bin_centers().collect::<Vec<_>>(), vec![512.0]);
    }
    #[test]
    fn empty_channel_is_empty_histogram() {
        let values = ndarray::Array1::<i32>::zeros(0);
        let hist = Histogram::of_channel(values.view(), MAX_BINS);
        assert!(hist.counts.is_empty());
        assert_eq!(hist.bin_width(), 0.0);
    }
}
