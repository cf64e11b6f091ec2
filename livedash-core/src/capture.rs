//! Frame capture synchronisation
//!
//! Captures one rendered frame per replayed line over exactly one replay
//! cycle. The caller owns the actual capture (file naming, encoding); this
//! only decides when.

use crate::replay::ReplayStatus;

/// What the caller should do after a poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CapturePoll {
    /// Nothing new
    Idle,
    /// Capture the current frame as number `n` (1-based)
    Capture(u32),
    /// The cycle is complete; reported once
    Finished,
}

/// One-cycle frame capture
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameCapture {
    armed: bool,
    target_cycle: u32,
    last_frame: u32,
    counter: u32,
}

impl FrameCapture {
    /// Arm against the current replay cycle
    ///
    /// Returns `None` when replay is not running.
    pub fn begin(status: ReplayStatus) -> Option<Self> {
        if !status.active {
            info!("CAPTURE: disabled, demo replay off");
            return None;
        }
        Some(Self {
            armed: true,
            target_cycle: status.cycle,
            last_frame: 0,
            counter: 0,
        })
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Frames captured so far
    pub fn captured(&self) -> u32 {
        self.counter
    }

    pub fn poll(&mut self, status: ReplayStatus) -> CapturePoll {
        if !self.armed || !status.active {
            return CapturePoll::Idle;
        }
        if status.cycle != self.target_cycle {
            if status.cycle.wrapping_sub(self.target_cycle) < u32::MAX / 2 {
                self.armed = false;
                return CapturePoll::Finished;
            }
            return CapturePoll::Idle;
        }
        if status.frame_index == 0 || status.frame_index == self.last_frame {
            return CapturePoll::Idle;
        }
        self.last_frame = status.frame_index;
        self.counter += 1;
        CapturePoll::Capture(self.counter)
    }

    /// Disarm after a failed capture
    pub fn fail(&mut self) {
        if self.armed {
            warn!("CAPTURE: frame {} failed, stopping", self.counter);
            self.armed = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(frame_index: u32, cycle: u32) -> ReplayStatus {
        ReplayStatus {
            active: true,
            frame_index,
            cycle,
        }
    }

    #[test]
    fn test_requires_active_replay() {
        assert!(FrameCapture::begin(ReplayStatus::default()).is_none());
    }

    #[test]
    fn test_one_capture_per_frame() {
        let mut cap = FrameCapture::begin(status(0, 2)).unwrap();
        assert_eq!(cap.poll(status(0, 2)), CapturePoll::Idle);
        assert_eq!(cap.poll(status(1, 2)), CapturePoll::Capture(1));
        assert_eq!(cap.poll(status(1, 2)), CapturePoll::Idle);
        assert_eq!(cap.poll(status(2, 2)), CapturePoll::Capture(2));
        assert_eq!(cap.poll(status(3, 2)), CapturePoll::Capture(3));
        assert_eq!(cap.poll(status(1, 3)), CapturePoll::Finished);
        assert_eq!(cap.poll(status(2, 3)), CapturePoll::Idle);
        assert!(!cap.is_armed());
        assert_eq!(cap.captured(), 3);
    }

    #[test]
    fn test_stopped_replay_is_idle() {
        let mut cap = FrameCapture::begin(status(0, 0)).unwrap();
        let stopped = ReplayStatus {
            active: false,
            frame_index: 4,
            cycle: 0,
        };
        assert_eq!(cap.poll(stopped), CapturePoll::Idle);
        assert!(cap.is_armed());
    }

    #[test]
    fn test_fail_disarms() {
        let mut cap = FrameCapture::begin(status(0, 0)).unwrap();
        assert_eq!(cap.poll(status(1, 0)), CapturePoll::Capture(1));
        cap.fail();
        assert_eq!(cap.poll(status(2, 0)), CapturePoll::Idle);
    }
}
