use std::io::{self, BufRead, BufReader, Write};
use std::time::Duration;
use serialport::SerialPort;
use crate::drivers::{Frame, PadError, SampleArchive};
use crate::types::SerialSettings;
/// Anything that yields raw newline-terminated lines from the board.
pub trait LineSource {
    /// Returns one line including its terminator.
    fn read_line(&mut self) -> Result<Vec<u8>, PadError>;
}
/// In-memory source for deterministic playback in tests.
#[cfg(test)]
pub struct ManualSource {
    queue: std::collections::VecDeque<Vec<u8>>,
}
#[cfg(test)]
impl ManualSource {
    pub fn new<L: Into<Vec<u8>>>(lines: impl IntoIterator<Item = L>) -> Self {
        Self {
            queue: lines.into_iter().map(Into::into).collect(),
        }
    }
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}
#[cfg(test)]
impl LineSource for ManualSource {
    fn read_line(&mut self) -> Result<Vec<u8>, PadError> {
        self.queue
            .pop_front()
            .ok_or_else(|| PadError::device("manual", "no more lines"))
    }
}
/// Open serial connection to the pad board. The port closes when this is dropped.
pub struct SerialSource {
    device: String,
    reader: BufReader<Box<dyn SerialPort>>,
}
impl SerialSource {
    pub fn open(settings: &SerialSettings) -> Result<Self, PadError> {
        let port = serialport::new(&settings.device, settings.baud_rate)
            .timeout(settings.read_timeout)
            .open()
            .map_err(|e| PadError::device(&settings.device, e))?;
        log::info!(
            "opened {} at {} baud",
            settings.device,
            settings.baud_rate
        );
        Ok(Self {
            device: settings.device.clone(),
            reader: BufReader::new(port),
        })
    }
}
impl LineSource for SerialSource {
    fn read_line(&mut self) -> Result<Vec<u8>, PadError> {
        let mut line = Vec::with_capacity(64);
        match self.reader.read_until(b'\n', &mut line) {
            Ok(0) => Err(PadError::device(&self.device, "port closed")),
            Ok(_) => Ok(line),
            Err(e) if e.kind() == io::ErrorKind::TimedOut => {
                Err(PadError::device(&self.device, "timed out waiting for a line"))
            }
            Err(e) => Err(PadError::device(&self.device, e)),
        }
    }
}
impl Drop for SerialSource {
    fn drop(&mut self) {
        log::info!("closing {}", self.device);
    }
}
/// Number of samples covering `collection_time` at one per `polling_period`.
pub fn sample_count(polling_period: Duration, collection_time: Duration) -> usize {
    (collection_time.as_secs_f64() / polling_period.as_secs_f64()).floor() as usize
}
/// Reads `n_samples` frames after throwing away the first, possibly partial, line.
///
/// Timestamps of the result start at zero.
pub fn acquire<S: LineSource>(source: &mut S, n_samples: usize) -> Result<SampleArchive, PadError> {
    let first = source.read_line()?;
    log::debug!("discarded first line {:?}", String::from_utf8_lossy(&first));
    let mut progress = Progress::new(n_samples);
    let mut frames = Vec::with_capacity(n_samples);
    for _ in 0..n_samples {
        let line = source.read_line()?;
        frames.push(Frame::parse(&line)?);
        progress.advance();
    }
    progress.finish();
    let mut archive = SampleArchive::from_frames(&frames);
    archive.normalize_timestamps();
    log::info!("collected {} samples", archive.len());
    Ok(archive)
}
/// Opens the board, acquires, and releases the port on every exit path.
pub fn acquire_from_serial(settings: &SerialSettings) -> Result<SampleArchive, PadError> {
    let n_samples = sample_count(settings.polling_period, settings.collection_time);
    let mut port = SerialSource::open(settings)?;
    acquire(&mut port, n_samples)
}
/// Single updating stderr line showing acquisition progress.
struct Progress {
    total: usize,
    done: usize,
    last_percent: usize,
}
impl Progress {
    fn new(total: usize) -> Self {
        Self {
            total,
            done: 0,
            last_percent: usize::MAX,
        }
    }
    fn advance(&mut self) {
        self.done += 1;
        let percent = self.done * 100 / self.total.max(1);
        if percent != self.last_percent {
            self.last_percent = percent;
            let mut err = io::stderr().lock();
            let _ = write!(err, "\racquiring {percent:>3}% ({}/{})", self.done, self.total);
            let _ = err.flush();
        }
    }
    fn finish(&self) {
        if self.total > 0 {
            eprintln!();
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    fn board_lines(timestamps: impl IntoIterator<Item = i32>) -> Vec<String> {
        timestamps
            .into_iter()
            .map(|t| {
                Frame {
                    timestamp: t,
                    values: [500, 510, 520, 530, 540, 550],
                }
                .to_string()
            })
            .collect()
    }
    #[test]
    fn sample_count_floors() {
        assert_eq!(
            sample_count(Duration::from_millis(1), Duration::from_secs(10)),
            10_000
        );
        assert_eq!(
            sample_count(Duration::from_millis(3), Duration::from_millis(10)),
            3
        );
        assert_eq!(
            sample_count(Duration::from_secs(1), Duration::from_millis(999)),
            0
        );
    }
    #[test]
    fn first_line_is_discarded_and_time_zeroed() {
        let mut lines = vec!["3,45,1\r\n".to_owned()];
        lines.extend(board_lines([1007, 1005, 1009]));
        let mut source = ManualSource::new(lines);
        let archive = acquire(&mut source, 3).unwrap();
        assert_eq!(archive.len(), 3);
        assert_eq!(archive.num_channels(), 6);
        assert_eq!(archive.timestamps.to_vec(), vec![2, 0, 4]);
        assert_eq!(archive.timestamps.iter().min(), Some(&0));
        assert_eq!(source.remaining(), 0);
    }
    #[test]
    fn reads_exactly_the_requested_count() {
        let mut source = ManualSource::new(board_lines(0..10));
        let archive = acquire(&mut source, 4).unwrap();
        assert_eq!(archive.len(), 4);
        assert_eq!(source.remaining(), 5);
    }
    #[test]
    fn malformed_line_aborts_acquisition() {
        let mut lines = board_lines(0..3);
        lines.insert(2, "17,1,2,3,4\r\n".to_owned());
        let mut source = ManualSource::new(lines);
        let err = acquire(&mut source, 3).unwrap_err();
        assert!(matches!(err, PadError::Parse { .. }), "{err}");
    }
    #[test]
    fn running_dry_is_device_error() {
        let mut source = ManualSource::new(board_lines(0..3));
        let err = acquire(&mut source, 5).unwrap_err();
        assert!(matches!(err, PadError::Device { .. }), "{err}");
    }
    #[test]
    fn missing_port_is_device_error() {
        let settings = SerialSettings {
            device: "/dev/padscope-does-not-exist".into(),
            ..SerialSettings::default()
        };
        let err = acquire_from_serial(&settings).unwrap_err();
        assert!(matches!(err, PadError::Device { .. }), "{err}");
    }
}
