use ndarray::{s, Array2, ArrayView1, Zip};
use crate::drivers::SampleArchive;
/// Row distance used for the difference signal.
pub const DEFAULT_STRIDE: usize = 16;
/// Level a triggered cell is raised to before the per-channel offset.
pub const ON_LEVEL: f32 = 0.8;
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Thresholds {
    /// A raw value below this counts as pressed.
    pub absolute: i32,
    /// A drop over `stride` rows larger than this counts as pressed.
    pub relative: i32,
}
impl Default for Thresholds {
    fn default() -> Self {
        Self {
            absolute: 400,
            relative: 200,
        }
    }
}
/// Signals derived from an archive for plotting.
#[derive(Clone, Debug)]
pub struct Derived {
    pub stride: usize,
    /// `diff[i] = channels[i] - channels[i + stride]`, `(n - stride) x c`.
    pub diff: Array2<i32>,
    /// Pressed indicator with channel `c` shifted up by `c`.
    pub button_on: Array2<f32>,
}
impl Derived {
    pub fn compute(archive: &SampleArchive, stride: usize, thresholds: Thresholds) -> Self {
        let channels = &archive.channels;
        let (rows, cols) = channels.dim();
        let diff = if rows > stride {
            let mut diff = channels.slice(s![..rows - stride, ..]).to_owned();
            Zip::from(&mut diff)
                .and(channels.slice(s![stride.., ..]))
                .for_each(|d, &later| *d = d.saturating_sub(later));
            diff
        } else {
            log::warn!("{rows} samples is too short for a stride of {stride}; no difference signal");
            Array2::zeros((0, cols))
        };
        let mut button_on = Array2::<f32>::zeros((rows, cols));
        Zip::from(&mut button_on)
            .and(channels)
            .for_each(|on, &raw| {
                if raw < thresholds.absolute {
                    *on = ON_LEVEL;
                }
            });
        if !diff.is_empty() {
            Zip::from(button_on.slice_mut(s![stride.., ..]))
                .and(&diff)
                .for_each(|on, &d| {
                    if d > thresholds.relative {
                        *on = ON_LEVEL;
                    }
                });
        }
        for (c, mut column) in button_on.columns_mut().into_iter().enumerate() {
            column += c as f32;
        }
        log::debug!(
            "derived diff {:?} and indicator {:?} (stride {stride})",
            diff.dim(),
            button_on.dim()
        );
        Self {
            stride,
            diff,
            button_on,
        }
    }
    /// Time axis matching the rows of `diff`.
    pub fn diff_timestamps<'a>(&self, archive: &'a SampleArchive) -> ArrayView1<'a, i32> {
        let start = self.stride.min(archive.len());
        archive.timestamps.slice(s![start..])
    }
}
