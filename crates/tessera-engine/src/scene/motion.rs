use crate::coords::Vec2;

/// Movement state carried by every [`Node`](super::Node).
///
/// Stepped by the owning layer during update. A node either drifts with a constant
/// velocity or travels toward a target at a fixed speed; reaching the target (or an
/// explicit [`stop`](Self::stop)) produces a single "stopped" notification.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Motion {
    kind: MotionKind,
    stop_pending: bool,
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
enum MotionKind {
    #[default]
    Idle,
    /// Pixels per second.
    Drift(Vec2),
    /// Target in world pixels, speed in pixels per second.
    Toward { target: Vec2, speed: f32 },
}

/// What a motion step did to the node position.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub(crate) struct MotionStep {
    pub moved: Option<(Vec2, Vec2)>,
    pub stopped: bool,
}

impl Motion {
    #[inline]
    pub fn is_moving(&self) -> bool {
        !matches!(self.kind, MotionKind::Idle)
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        if velocity == Vec2::zero() {
            self.stop();
        } else {
            self.kind = MotionKind::Drift(velocity);
            self.stop_pending = false;
        }
    }

    pub fn move_towards(&mut self, target: Vec2, speed: f32) {
        self.kind = MotionKind::Toward { target, speed: speed.max(0.0) };
        self.stop_pending = false;
    }

    /// Cancels movement. The stop is reported on the next step.
    pub fn stop(&mut self) {
        if self.is_moving() {
            self.kind = MotionKind::Idle;
            self.stop_pending = true;
        }
    }

    pub(crate) fn step(&mut self, pos: Vec2, diff: u64) -> MotionStep {
        let dt = diff as f32 / 1000.0;
        let mut out = MotionStep { moved: None, stopped: std::mem::take(&mut self.stop_pending) };

        match self.kind {
            MotionKind::Idle => {}
            MotionKind::Drift(v) => {
                if dt > 0.0 {
                    out.moved = Some((pos, pos + v * dt));
                }
            }
            MotionKind::Toward { target, speed } => {
                let dist = pos.distance(target);
                let travel = speed * dt;
                if travel >= dist {
                    if dist > 0.0 {
                        out.moved = Some((pos, target));
                    }
                    self.kind = MotionKind::Idle;
                    out.stopped = true;
                } else if travel > 0.0 {
                    out.moved = Some((pos, pos + (target - pos) * (travel / dist)));
                }
            }
        }

        out
    }
}
