use std::num::ParseIntError;

use thiserror::Error;

use crate::segment::SegmentKind;

/// Errors raised by [`crate::TimeField`].
#[derive(Debug, Error)]
pub enum TimeFieldError {
    /// A segment was read while it did not hold a committed number, which
    /// happens mid-edit when the segment is empty.
    #[error("{segment} segment holds {text:?}, which is not a committed value")]
    UncommittedSegment {
        /// The segment that was read.
        segment: SegmentKind,
        /// Its text at the time of the read.
        text: String,
        /// The underlying parse failure.
        #[source]
        source: ParseIntError,
    },
}
