use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use crate::drivers::frame::{Frame, CHANNELS};
use crate::drivers::PadError;
/// Full collected run: one timestamp per row of `channels` (rows x channels).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleArchive {
    pub channels: Array2<i32>,
    pub timestamps: Array1<i32>,
}
impl SampleArchive {
    pub fn new(channels: Array2<i32>, timestamps: Array1<i32>) -> Result<Self, PadError> {
        let archive = Self {
            channels,
            timestamps,
        };
        archive.validate().map_err(PadError::Config)?;
        Ok(archive)
    }
    /// Stacks parsed frames into an archive with the board's six channels.
    pub fn from_frames(frames: &[Frame]) -> Self {
        let mut channels = Array2::<i32>::zeros((frames.len(), CHANNELS));
        for (mut row, frame) in channels.rows_mut().into_iter().zip(frames) {
            row.assign(&ndarray::aview1(&frame.values));
        }
        let timestamps = frames.iter().map(|f| f.timestamp).collect();
        Self {
            channels,
            timestamps,
        }
    }
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
    pub fn num_channels(&self) -> usize {
        self.channels.ncols()
    }
    /// Shifts timestamps so the earliest one becomes zero.
    pub fn normalize_timestamps(&mut self) {
        if let Some(&min) = self.timestamps.iter().min() {
            self.timestamps.mapv_inplace(|t| t.wrapping_sub(min));
        }
    }
    pub fn save(&self, path: &Path) -> Result<(), PadError> {
        let persist_err = |reason: String| PadError::Persist {
            path: path.to_path_buf(),
            reason,
        };
        let file = File::create(path).map_err(|e| persist_err(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self).map_err(|e| persist_err(e.to_string()))?;
        writer.flush().map_err(|e| persist_err(e.to_string()))?;
        log::info!("archive with {} samples saved to {}", self.len(), path.display());
        Ok(())
    }
    pub fn load(path: &Path) -> Result<Self, PadError> {
        let load_err = |reason: String| PadError::Load {
            path: path.to_path_buf(),
            reason,
        };
        let file = File::open(path).map_err(|e| load_err(e.to_string()))?;
        let archive: SampleArchive = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| load_err(e.to_string()))?;
        archive.validate().map_err(load_err)?;
        if archive.num_channels() != CHANNELS {
            log::warn!(
                "archive {} holds {} channels, the pad board has {}",
                path.display(),
                archive.num_channels(),
                CHANNELS
            );
        }
        log::info!(
            "loaded {} samples x {} channels from {}",
            archive.len(),
            archive.num_channels(),
            path.display()
        );
        Ok(archive)
    }
    fn validate(&self) -> Result<(), String> {
        if self.channels.nrows() != self.timestamps.len() {
            return Err(format!(
                "{} channel rows but {} timestamps",
                self.channels.nrows(),
                self.timestamps.len()
            ));
        }
        if self.channels.ncols() == 0 {
            return Err("archive has no channels".into());
        }
        Ok(())
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::path::PathBuf;
    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("padscope-{}-{name}", std::process::id()))
    }
    #[test]
    fn frames_become_rows() {
        let frames = [
            Frame {
                timestamp: 5,
                values: [1, 2, 3, 4, 5, 6],
            },
            Frame {
                timestamp: 6,
                values: [7, 8, 9, 10, 11, 12],
            },
        ];
        let archive = SampleArchive::from_frames(&frames);
        assert_eq!(archive.channels.dim(), (2, 6));
        assert_eq!(archive.channels.row(1).to_vec(), vec![7, 8, 9, 10, 11, 12]);
        assert_eq!(archive.timestamps, array![5i32, 6]);
    }
    #[test]
    fn normalization_starts_at_zero() {
        let mut archive = SampleArchive::new(
            Array2::zeros((3, 6)),
            array![1_000_012, 1_000_010, 1_000_015],
        )
        .unwrap();
        archive.normalize_timestamps();
        assert_eq!(archive.timestamps, array![2i32, 0, 5]);
        assert_eq!(archive.timestamps.iter().min(), Some(&0));
    }
    #[test]
    fn save_then_load_is_identical() {
        let path = temp_path("roundtrip.json");
        let archive = SampleArchive::new(
            array![[500, 500, 500, 500, 500, 500], [100, i32::MAX, i32::MIN, -1, 0, 7]],
            array![10, 11],
        )
        .unwrap();
        archive.save(&path).unwrap();
        let loaded = SampleArchive::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, archive);
    }
    #[test]
    fn loads_other_channel_counts() {
        let path = temp_path("two-channels.json");
        let archive = SampleArchive::new(array![[0, 0], [300, 0]], array![0, 1]).unwrap();
        archive.save(&path).unwrap();
        let loaded = SampleArchive::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.num_channels(), 2);
    }
    #[test]
    fn missing_or_corrupt_archive_is_load_error() {
        let missing = temp_path("does-not-exist.json");
        assert!(matches!(
            SampleArchive::load(&missing),
            Err(PadError::Load { .. })
        ));
        let corrupt = temp_path("corrupt.json");
        std::fs::write(&corrupt, b"\x80\x04not an archive").unwrap();
        let result = SampleArchive::load(&corrupt);
        std::fs::remove_file(&corrupt).ok();
        assert!(matches!(result, Err(PadError::Load { .. })));
    }
    #[test]
    fn mismatched_lengths_are_rejected() {
        assert!(SampleArchive::new(Array2::zeros((3, 6)), array![0, 1]).is_err());
        let path = temp_path("mismatched.json");
        std::fs::write(
            &path,
            r#"{"channels":{"v":1,"dim":[2,1],"data":[1,2]},"timestamps":{"v":1,"dim":[3],"data":[0,1,2]}}"#,
        )
        .unwrap();
        let result = SampleArchive::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(PadError::Load { .. })));
    }
    #[test]
    fn unwritable_path_is_persist_error() {
        let archive = SampleArchive::new(Array2::zeros((1, 6)), array![0]).unwrap();
        let path = temp_path("no-such-dir").join("out.json");
        assert!(matches!(
            archive.save(&path),
            Err(PadError::Persist { .. })
        ));
    }
}
