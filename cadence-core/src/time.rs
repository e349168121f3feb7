//! Wrapping timestamp arithmetic
//!
//! Timestamps are free-running `u32` counters (milliseconds or
//! microseconds) that wrap at their width. Durations are always taken as
//! `now - then` modulo 2^32, which stays correct across one wrap as long
//! as the measured interval is shorter than the counter period.

/// Milliseconds since an arbitrary epoch, wrapping
pub type Millis = u32;

/// Microseconds since an arbitrary epoch, wrapping
pub type Micros = u32;

/// Time elapsed from `since` to `now`
#[inline]
pub const fn elapsed(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}
