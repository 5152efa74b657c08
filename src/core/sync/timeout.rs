/*!
 * Timeout Values
 *
 * A single timeout type for all blocking pipe operations. `NoWait` turns a
 * blocking call into a polling one; `Forever` removes the deadline.
 */

use std::time::{Duration, Instant};

/// Timeout for a blocking operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeout {
    /// Fail immediately instead of suspending
    NoWait,

    /// Suspend for at most this long
    After(Duration),

    /// Suspend until explicitly woken
    Forever,
}

impl Timeout {
    /// Bounded timeout from milliseconds
    pub const fn from_millis(ms: u64) -> Self {
        Self::After(Duration::from_millis(ms))
    }

    /// Bounded timeout from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self::After(Duration::from_secs(secs))
    }

    /// Check for the non-blocking special value
    #[inline]
    pub fn is_no_wait(&self) -> bool {
        matches!(self, Self::NoWait)
    }

    /// Absolute deadline for a wait starting now, `None` when unbounded.
    ///
    /// A duration too large to represent as an `Instant` is treated as
    /// unbounded.
    pub fn deadline(&self) -> Option<Instant> {
        match self {
            Self::NoWait => Some(Instant::now()),
            Self::After(d) => Instant::now().checked_add(*d),
            Self::Forever => None,
        }
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Self::Forever
    }
}

impl From<Duration> for Timeout {
    fn from(d: Duration) -> Self {
        Self::After(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_wait_detection() {
        assert!(Timeout::NoWait.is_no_wait());
        assert!(!Timeout::Forever.is_no_wait());
        assert!(!Timeout::from_millis(10).is_no_wait());
    }

    #[test]
    fn test_deadline_bounds() {
        let before = Instant::now();
        let deadline = Timeout::from_millis(50).deadline().unwrap();
        assert!(deadline >= before + Duration::from_millis(50));
        assert!(deadline <= Instant::now() + Duration::from_millis(50));
    }

    #[test]
    fn test_forever_has_no_deadline() {
        assert!(Timeout::Forever.deadline().is_none());
    }

    #[test]
    fn test_huge_duration_is_unbounded() {
        assert!(Timeout::After(Duration::MAX).deadline().is_none());
    }

    #[test]
    fn test_from_duration() {
        let t: Timeout = Duration::from_secs(2).into();
        assert_eq!(t, Timeout::from_secs(2));
    }

    #[test]
    fn test_default_is_forever() {
        assert_eq!(Timeout::default(), Timeout::Forever);
    }
}
