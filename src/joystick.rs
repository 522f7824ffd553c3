//! Draggable stick inside a circular container.
//!
//! The control is a two-state machine (`Idle`, `Dragging`) plus an
//! independent return-to-center motion that the host advances once per frame.

use tracing::{debug, trace};

use crate::config::JoystickConfig;
use crate::geometry::{Point, Rect};
use crate::scene::{DrawCommand, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// `boundary` is the container's bounding box snapshotted at pointer-down
    /// and used for the rest of the gesture.
    Dragging { boundary: Rect },
}

/// Outcome of one animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStep {
    Continue,
    Finished,
}

/// Constant-speed glide back to a fixed target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnToCenter {
    target: Point,
    speed: f64,
    snap_distance: f64,
}

impl ReturnToCenter {
    pub fn new(target: Point, speed: f64, snap_distance: f64) -> Self {
        Self {
            target,
            speed,
            snap_distance,
        }
    }

    /// Moves `position` one frame toward the target.
    ///
    /// Within `snap_distance` the position lands exactly on the target and the
    /// motion finishes. Otherwise it advances `speed` units, never past the
    /// target.
    pub fn step(&self, position: &mut Point) -> FrameStep {
        let delta = self.target - *position;
        let distance = delta.length();
        if !(distance >= self.snap_distance) || self.speed <= 0.0 {
            *position = self.target;
            return FrameStep::Finished;
        }
        let travel = self.speed.min(distance);
        *position = *position + delta * (travel / distance);
        FrameStep::Continue
    }
}

#[derive(Debug, Clone)]
pub struct JoystickControl {
    config: JoystickConfig,
    position: Point,
    drag: DragState,
    returning: Option<ReturnToCenter>,
}

impl JoystickControl {
    pub fn new(config: JoystickConfig) -> Self {
        let position = config.center();
        Self {
            config,
            position,
            drag: DragState::Idle,
            returning: None,
        }
    }

    pub fn config(&self) -> &JoystickConfig {
        &self.config
    }

    /// Stick center in container-local coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn is_returning(&self) -> bool {
        self.returning.is_some()
    }

    /// Top-left corner of the stick's square, container-local.
    pub fn stick_offset(&self) -> Point {
        let r = self.config.stick_radius;
        self.position - Point::new(r, r)
    }

    /// Stick displacement from center as a fraction of the travel radius.
    pub fn deflection(&self) -> (f64, f64) {
        let travel = self.config.size / 2.0 - self.config.stick_radius;
        if travel <= 0.0 {
            return (0.0, 0.0);
        }
        let offset = self.position - self.config.center();
        (
            (offset.x / travel).clamp(-1.0, 1.0),
            (offset.y / travel).clamp(-1.0, 1.0),
        )
    }

    /// Starts a gesture. Cancels any return motion still in flight.
    pub fn pointer_down(&mut self, boundary: Rect) {
        if self.returning.take().is_some() {
            trace!("return to center cancelled by new drag");
        }
        self.drag = DragState::Dragging { boundary };
        debug!(?boundary, "drag started");
    }

    /// Tracks a pointer given in the same coordinate space as the boundary.
    /// Ignored unless dragging.
    pub fn pointer_move(&mut self, pointer: Point) {
        let DragState::Dragging { boundary } = self.drag else {
            return;
        };
        let radius = boundary.width / 2.0;
        if !(radius > 0.0) {
            trace!(?boundary, "degenerate boundary, move ignored");
            return;
        }

        let relative = pointer - boundary.top_left() - Point::new(radius, radius);
        self.position = clamp_to_travel(relative, radius, self.config.stick_radius);
        trace!(x = self.position.x, y = self.position.y, "stick moved");
    }

    /// Ends a gesture and starts the return motion. Ignored unless dragging.
    pub fn pointer_up(&mut self) {
        if !self.is_dragging() {
            return;
        }
        self.drag = DragState::Idle;
        self.returning = Some(ReturnToCenter::new(
            self.config.center(),
            self.config.return_speed,
            self.config.snap_distance,
        ));
        let (dx, dy) = self.deflection();
        debug!(dx, dy, "drag released");
    }

    /// Advances the return motion by one frame. Returns whether another frame
    /// is needed.
    pub fn animate(&mut self) -> bool {
        let Some(motion) = self.returning else {
            return false;
        };
        match motion.step(&mut self.position) {
            FrameStep::Continue => true,
            FrameStep::Finished => {
                self.returning = None;
                debug!("stick centered");
                false
            }
        }
    }

    /// Appends the container and stick with the container's top-left at `origin`.
    pub fn add_to_scene(&self, scene: &mut Scene, origin: Point) {
        let half = self.config.size / 2.0;
        scene.add_command(DrawCommand::Circle {
            center: origin + Point::new(half, half),
            radius: half,
            fill: Some(self.config.base_color),
            stroke: None,
        });
        scene.add_command(DrawCommand::Circle {
            center: origin + self.position,
            radius: self.config.stick_radius,
            fill: Some(self.config.stick_color),
            stroke: None,
        });
    }
}

impl Default for JoystickControl {
    fn default() -> Self {
        Self::new(JoystickConfig::default())
    }
}

/// Maps a pointer offset from the boundary center to a stick position in
/// container-local coordinates, keeping the stick inside the boundary.
pub fn clamp_to_travel(relative: Point, radius: f64, stick_radius: f64) -> Point {
    let travel = radius - stick_radius;
    let center = Point::new(radius, radius);
    if relative.length() <= travel {
        return relative + center;
    }
    Point::on_circle(center, travel, relative.angle())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;
    const CENTER: Point = Point::new(80.0, 80.0);

    fn boundary() -> Rect {
        Rect::new(0.0, 0.0, 160.0, 160.0)
    }

    fn dragging() -> JoystickControl {
        let mut joystick = JoystickControl::default();
        joystick.pointer_down(boundary());
        joystick
    }

    #[test]
    fn starts_idle_and_centered() {
        let joystick = JoystickControl::default();
        assert_eq!(joystick.position(), CENTER);
        assert_eq!(joystick.drag_state(), DragState::Idle);
        assert_eq!(joystick.stick_offset(), Point::new(60.0, 60.0));
        assert!(!joystick.is_returning());
    }

    #[test]
    fn move_outside_travel_is_clamped() {
        let mut joystick = dragging();
        joystick.pointer_move(CENTER + Point::new(100.0, 0.0));
        let p = joystick.position();
        assert!((p.x - 140.0).abs() < EPS);
        assert!((p.y - 80.0).abs() < EPS);
        assert_eq!(joystick.deflection(), (1.0, 0.0));
    }

    #[test]
    fn move_inside_travel_is_unchanged() {
        let mut joystick = dragging();
        joystick.pointer_move(CENTER + Point::new(30.0, 0.0));
        assert_eq!(joystick.position(), Point::new(110.0, 80.0));
    }

    #[test]
    fn boundary_offset_is_subtracted() {
        let mut joystick = JoystickControl::default();
        joystick.pointer_down(Rect::new(160.0, 20.0, 160.0, 160.0));
        joystick.pointer_move(Point::new(240.0 - 10.0, 100.0 + 25.0));
        assert_eq!(joystick.position(), Point::new(70.0, 105.0));
    }

    #[test]
    fn snapshot_is_kept_for_the_gesture() {
        let mut joystick = JoystickControl::default();
        let rect = Rect::new(10.0, 10.0, 160.0, 160.0);
        joystick.pointer_down(rect);
        joystick.pointer_move(Point::new(90.0, 90.0));
        assert_eq!(joystick.drag_state(), DragState::Dragging { boundary: rect });
        assert_eq!(joystick.position(), CENTER);
    }

    #[test]
    fn moves_while_idle_are_ignored() {
        let mut joystick = JoystickControl::default();
        joystick.pointer_move(Point::new(10.0, 10.0));
        assert_eq!(joystick.position(), CENTER);
    }

    #[test]
    fn degenerate_boundary_is_a_no_op() {
        let mut joystick = JoystickControl::default();
        joystick.pointer_down(Rect::new(50.0, 50.0, 0.0, 0.0));
        joystick.pointer_move(Point::new(75.0, 60.0));
        assert_eq!(joystick.position(), CENTER);
        assert!(joystick.is_dragging());
    }

    #[test]
    fn release_returns_to_center_linearly() {
        let mut joystick = dragging();
        joystick.pointer_move(Point::new(140.0, 80.0));
        joystick.pointer_up();
        assert_eq!(joystick.drag_state(), DragState::Idle);
        assert!(joystick.is_returning());

        assert!(joystick.animate());
        assert!((joystick.position().x - 138.0).abs() < EPS);
        assert!((joystick.position().y - 80.0).abs() < EPS);

        let mut frames = 1;
        while joystick.animate() {
            frames += 1;
            assert!(frames < 100, "animation did not settle");
        }
        assert_eq!(joystick.position(), CENTER);
        assert!(!joystick.is_returning());
        // 60 units at 2 per frame, then the snap frame.
        assert_eq!(frames, 30);
    }

    #[test]
    fn release_while_idle_does_nothing() {
        let mut joystick = JoystickControl::default();
        joystick.pointer_up();
        assert!(!joystick.is_returning());
        assert!(!joystick.animate());
    }

    #[test]
    fn new_drag_cancels_return() {
        let mut joystick = dragging();
        joystick.pointer_move(Point::new(20.0, 80.0));
        joystick.pointer_up();
        joystick.animate();
        let before = joystick.position();

        joystick.pointer_down(boundary());
        assert!(!joystick.is_returning());
        assert!(!joystick.animate());
        assert_eq!(joystick.position(), before);
    }

    #[test]
    fn step_snaps_at_exactly_snap_distance_boundary() {
        let motion = ReturnToCenter::new(CENTER, 2.0, 1.0);
        let mut p = CENTER + Point::new(1.0, 0.0);
        assert_eq!(motion.step(&mut p), FrameStep::Continue);
        assert_eq!(p, CENTER);
        assert_eq!(motion.step(&mut p), FrameStep::Finished);
        assert_eq!(p, CENTER);
    }

    #[test]
    fn scene_places_stick_at_position() {
        let mut joystick = dragging();
        joystick.pointer_move(Point::new(100.0, 80.0));
        let mut scene = Scene::new();
        joystick.add_to_scene(&mut scene, Point::new(160.0, 0.0));
        let commands = scene.commands();
        assert_eq!(commands.len(), 2);
        match &commands[1] {
            DrawCommand::Circle { center, radius, .. } => {
                assert_eq!(*center, Point::new(260.0, 80.0));
                assert_eq!(*radius, 20.0);
            }
            other => panic!("expected stick, got {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn inside_travel_position_is_raw_point(
            r in 0.0f64..60.0,
            theta in -std::f64::consts::PI..std::f64::consts::PI,
        ) {
            let relative = Point::new(r * theta.cos(), r * theta.sin());
            let mut joystick = dragging();
            joystick.pointer_move(CENTER + relative);
            let p = joystick.position();
            prop_assert!((p.x - (CENTER.x + relative.x)).abs() < 1e-9);
            prop_assert!((p.y - (CENTER.y + relative.y)).abs() < 1e-9);
        }

        #[test]
        fn outside_travel_lands_on_travel_circle(
            r in 60.001f64..5_000.0,
            theta in -std::f64::consts::PI..std::f64::consts::PI,
        ) {
            let relative = Point::new(r * theta.cos(), r * theta.sin());
            let mut joystick = dragging();
            joystick.pointer_move(CENTER + relative);
            let offset = joystick.position() - CENTER;
            prop_assert!((offset.length() - 60.0).abs() < 1e-6);
            let diff = (offset.angle() - relative.angle()).rem_euclid(std::f64::consts::TAU);
            prop_assert!(diff < 1e-6 || std::f64::consts::TAU - diff < 1e-6);
        }

        #[test]
        fn return_strictly_approaches_and_settles(
            x in -60.0f64..60.0,
            y in -60.0f64..60.0,
        ) {
            let motion = ReturnToCenter::new(CENTER, 2.0, 1.0);
            let mut p = CENTER + Point::new(x, y);
            let mut last = p.distance_to(CENTER);
            let mut frames = 0;
            while motion.step(&mut p) == FrameStep::Continue {
                let d = p.distance_to(CENTER);
                prop_assert!(d < last);
                prop_assert!(last - d <= 2.0 + 1e-9);
                last = d;
                frames += 1;
                prop_assert!(frames <= 60);
            }
            prop_assert_eq!(p, CENTER);
        }
    }
}
