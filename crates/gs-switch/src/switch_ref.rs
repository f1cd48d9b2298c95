//! Addressing a switch: one end of one line.

use std::fmt;
use std::str::FromStr;

use gs_core::LineId;
use gs_network::LineEnd;

use crate::error::SwitchError;

/// A switch sits at each end of every line.
///
/// The text form is `<lineId>_<from|to>`. Line ids may themselves contain
/// underscores, so parsing splits at the last one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SwitchRef {
    pub line: LineId,
    pub end: LineEnd,
}

impl SwitchRef {
    pub fn new(line: impl Into<LineId>, end: LineEnd) -> Self {
        Self {
            line: line.into(),
            end,
        }
    }
}

impl fmt::Display for SwitchRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.line, self.end)
    }
}

impl FromStr for SwitchRef {
    type Err = SwitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| SwitchError::InvalidRef {
            input: s.to_string(),
            reason,
        };

        let (line, end) = s
            .rsplit_once('_')
            .ok_or_else(|| invalid("expected <lineId>_<from|to>".to_string()))?;
        if line.is_empty() {
            return Err(invalid("empty line id".to_string()));
        }
        let end = end.parse::<LineEnd>().map_err(invalid)?;

        Ok(Self::new(line, end))
    }
}
