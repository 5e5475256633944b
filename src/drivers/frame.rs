use std::fmt;
use crate::drivers::PadError;
/// Number of pressure sensors on the pad board.
pub const CHANNELS: usize = 6;
/// Length of the line terminator the board appends (`\r\n`).
const TERMINATOR_LEN: usize = 2;
/// One reading event as reported by the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub timestamp: i32,
    pub values: [i32; CHANNELS],
}
impl Frame {
    /// Parses one raw serial line of the form `t,ch0,...,ch5\r\n`.
    ///
    /// The last two characters are dropped unconditionally, whatever they
    /// are, since the board always terminates with `\r\n`.
    pub fn parse(raw: &[u8]) -> Result<Self, PadError> {
        let text = std::str::from_utf8(raw)
            .map_err(|e| PadError::parse(&String::from_utf8_lossy(raw), e))?;
        let cut = text
            .char_indices()
            .rev()
            .nth(TERMINATOR_LEN - 1)
            .map(|(idx, _)| idx)
            .ok_or_else(|| PadError::parse(text, "line shorter than its terminator"))?;
        let body = &text[..cut];
        let fields: Vec<&str> = body.split(',').collect();
        if fields.len() != CHANNELS + 1 {
            return Err(PadError::parse(
                text,
                format!("expected {} fields, got {}", CHANNELS + 1, fields.len()),
            ));
        }
        let mut numbers = [0i32; CHANNELS + 1];
        for (slot, field) in numbers.iter_mut().zip(&fields) {
            *slot = field
                .trim()
                .parse()
                .map_err(|e| PadError::parse(text, format!("field {field:?}: {e}")))?;
        }
        let mut values = [0i32; CHANNELS];
        values.copy_from_slice(&numbers[1..]);
        Ok(Self {
            timestamp: numbers[0],
            values,
        })
    }
}
/// Formats the frame exactly as the board sends it, terminator included.
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.timestamp)?;
        for v in &self.values {
            write!(f, ",{v}")?;
        }
        f.write_str("\r\n")
    }
}
