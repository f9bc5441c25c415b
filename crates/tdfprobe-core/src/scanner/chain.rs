//! One-hop chain validation.
//!
//! A sane header is only trusted if the sibling it points at also looks like
//! a header. The check goes exactly one link deep; the linked header is judged
//! again on its own when the scan reaches its offset.

use crate::header::HeaderCandidate;
use crate::tag::TagCodec;

/// Outcome of following a header's next distance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Link {
    /// Next distance is zero; the header ends its run
    Terminator,
    /// The next header is sane
    Valid { next: usize },
    /// The next header window does not fit in the buffer
    OutOfBounds { next: usize },
    /// The next header window is not sane
    Broken { next: usize },
}

impl Link {
    /// Returns true if the header that produced this link is accepted
    pub(crate) fn is_accepted(self) -> bool {
        matches!(self, Link::Terminator | Link::Valid { .. })
    }
}

/// Follow the next distance of `header`, which was read at `offset` in `data`
pub(crate) fn follow<C: TagCodec + ?Sized>(
    data: &[u8],
    offset: usize,
    header: &HeaderCandidate,
    codec: &C,
) -> Link {
    if header.is_terminator() {
        return Link::Terminator;
    }

    let next = offset + usize::from(header.next_distance());
    match HeaderCandidate::at(data, next, codec) {
        None => Link::OutOfBounds { next },
        Some(linked) if linked.is_sane() => Link::Valid { next },
        Some(_) => Link::Broken { next },
    }
}
