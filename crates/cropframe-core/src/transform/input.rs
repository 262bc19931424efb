//! Interaction handling: pointer drags, zoom slider, wheel, keyboard.
//!
//! Mouse and touch events are normalized into a single [`Point`] before they
//! reach the controller, which only knows the three phases of a drag through
//! [`PointerCapture`].

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

use super::TransformState;

/// Begin / update / end of a single-pointer drag.
pub trait PointerCapture {
    /// A pointer went down at `at` (surface coordinates).
    fn begin(&mut self, at: Point);

    /// The captured pointer moved. Returns true if the state changed.
    fn update(&mut self, at: Point) -> bool;

    /// The pointer was released or the gesture was cancelled.
    fn end(&mut self);
}

/// Which device produced a pointer event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerSource {
    Mouse { x: f64, y: f64 },
    /// Active touch points; the first one drives the drag.
    Touch { touches: Vec<Point> },
}

impl PointerSource {
    /// The device-independent pointer position, if there is one.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerSource::Mouse { x, y } => Some(Point::new(*x, *y)),
            PointerSource::Touch { touches } => touches.first().copied(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// Keyboard shortcuts understood by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyCommand {
    ZoomIn,
    ZoomOut,
    Rotate,
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    Reset,
}

impl KeyCommand {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "+" | "=" => Some(KeyCommand::ZoomIn),
            "-" | "_" => Some(KeyCommand::ZoomOut),
            "r" | "R" => Some(KeyCommand::Rotate),
            "ArrowLeft" => Some(KeyCommand::PanLeft),
            "ArrowRight" => Some(KeyCommand::PanRight),
            "ArrowUp" => Some(KeyCommand::PanUp),
            "ArrowDown" => Some(KeyCommand::PanDown),
            "0" => Some(KeyCommand::Reset),
            _ => None,
        }
    }
}

/// Everything the editor can be told by its host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Pointer {
        phase: PointerPhase,
        source: PointerSource,
    },
    /// Absolute value from the zoom slider.
    ZoomSlider(f64),
    /// Wheel delta; negative zooms in, positive zooms out.
    Wheel(f64),
    RotateButton,
    Key(KeyCommand),
}

/// Step sizes for relative zoom and keyboard panning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSteps {
    pub zoom: f64,
    /// Preview pixels per arrow-key press.
    pub nudge: f64,
}

impl Default for InputSteps {
    fn default() -> Self {
        Self {
            zoom: 0.1,
            nudge: 10.0,
        }
    }
}

/// Owns the session's [`TransformState`] and is the only thing that mutates it.
#[derive(Debug, Clone)]
pub struct InputController {
    state: TransformState,
    steps: InputSteps,
    /// `pointer - pan` at drag start; `None` when no drag is active.
    anchor: Option<Vec2>,
}

impl InputController {
    pub fn new(state: TransformState, steps: InputSteps) -> Self {
        Self {
            state,
            steps,
            anchor: None,
        }
    }

    pub fn state(&self) -> &TransformState {
        &self.state
    }

    /// Returns true if the zoom actually changed.
    pub fn set_zoom(&mut self, value: f64) -> bool {
        let before = self.state.zoom();
        self.state.set_zoom(value) && self.state.zoom() != before
    }

    pub fn rotate90(&mut self) {
        self.state.rotate90();
    }

    /// Record the anchor `pointer - pan`.
    pub fn begin_drag(&mut self, pointer: Point) {
        self.anchor = Some(pointer.to_vec2() - self.state.pan());
    }

    /// Set `pan = pointer - anchor`.
    ///
    /// Recomputed from the anchor on every move so rounding never
    /// accumulates. Without an active drag this is a no-op.
    pub fn drag_to(&mut self, pointer: Point) -> bool {
        let Some(anchor) = self.anchor else {
            return false;
        };
        let pan = pointer.to_vec2() - anchor;
        if pan == self.state.pan() {
            return false;
        }
        self.state.set_pan(pan)
    }

    pub fn end_drag(&mut self) {
        self.anchor = None;
    }

    /// Back to defaults and drop any active drag.
    pub fn reset(&mut self) {
        self.anchor = None;
        self.state.reset();
    }

    /// Dispatch one event. Returns true if the transform changed.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Pointer { phase, source } => self.handle_pointer(*phase, source),
            InputEvent::ZoomSlider(value) => self.set_zoom(*value),
            InputEvent::Wheel(delta) => {
                if *delta == 0.0 || !delta.is_finite() {
                    return false;
                }
                let step = if *delta < 0.0 {
                    self.steps.zoom
                } else {
                    -self.steps.zoom
                };
                self.set_zoom(self.state.zoom() + step)
            }
            InputEvent::RotateButton => {
                self.rotate90();
                true
            }
            InputEvent::Key(command) => self.handle_key(*command),
        }
    }

    fn handle_pointer(&mut self, phase: PointerPhase, source: &PointerSource) -> bool {
        match phase {
            PointerPhase::Up | PointerPhase::Cancel => {
                self.end();
                false
            }
            PointerPhase::Down => {
                if let Some(at) = source.position() {
                    self.begin(at);
                }
                false
            }
            PointerPhase::Move => source.position().is_some_and(|at| self.update(at)),
        }
    }

    fn handle_key(&mut self, command: KeyCommand) -> bool {
        let nudge = self.steps.nudge;
        match command {
            KeyCommand::ZoomIn => self.set_zoom(self.state.zoom() + self.steps.zoom),
            KeyCommand::ZoomOut => self.set_zoom(self.state.zoom() - self.steps.zoom),
            KeyCommand::Rotate => {
                self.rotate90();
                true
            }
            KeyCommand::PanLeft => self.nudge(Vec2::new(-nudge, 0.0)),
            KeyCommand::PanRight => self.nudge(Vec2::new(nudge, 0.0)),
            KeyCommand::PanUp => self.nudge(Vec2::new(0.0, -nudge)),
            KeyCommand::PanDown => self.nudge(Vec2::new(0.0, nudge)),
            KeyCommand::Reset => {
                let changed = !self.state.is_default();
                self.reset();
                changed
            }
        }
    }

    fn nudge(&mut self, by: Vec2) -> bool {
        let pan = self.state.pan() + by;
        self.state.set_pan(pan)
    }
}

impl PointerCapture for InputController {
    fn begin(&mut self, at: Point) {
        self.begin_drag(at);
    }

    fn update(&mut self, at: Point) -> bool {
        self.drag_to(at)
    }

    fn end(&mut self) {
        self.end_drag();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> InputController {
        InputController::new(TransformState::default(), InputSteps::default())
    }

    fn mouse(phase: PointerPhase, x: f64, y: f64) -> InputEvent {
        InputEvent::Pointer {
            phase,
            source: PointerSource::Mouse { x, y },
        }
    }

    fn touch(phase: PointerPhase, touches: Vec<Point>) -> InputEvent {
        InputEvent::Pointer {
            phase,
            source: PointerSource::Touch { touches },
        }
    }

    #[test]
    fn test_drag_sets_pan_from_anchor() {
        let mut input = controller();
        input.begin_drag(Point::new(100.0, 100.0));
        assert!(input.drag_to(Point::new(130.0, 90.0)));
        assert_eq!(input.state().pan(), Vec2::new(30.0, -10.0));

        // Absolute, not incremental: the same pointer position gives the same pan
        assert!(!input.drag_to(Point::new(130.0, 90.0)));
        assert_eq!(input.state().pan(), Vec2::new(30.0, -10.0));
    }

    #[test]
    fn test_second_drag_continues_from_current_pan() {
        let mut input = controller();
        input.begin_drag(Point::new(0.0, 0.0));
        input.drag_to(Point::new(20.0, 20.0));
        input.end_drag();

        input.begin_drag(Point::new(200.0, 200.0));
        input.drag_to(Point::new(205.0, 190.0));
        assert_eq!(input.state().pan(), Vec2::new(25.0, 10.0));
    }

    #[test]
    fn test_many_small_moves_do_not_drift() {
        let mut input = controller();
        input.begin_drag(Point::new(0.0, 0.0));
        for i in 1..=1000 {
            input.drag_to(Point::new(i as f64 * 0.1, -(i as f64) * 0.1));
        }
        let pan = input.state().pan();
        assert!((pan.x - 100.0).abs() < 1e-9);
        assert!((pan.y + 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let mut input = controller();
        assert!(!input.drag_to(Point::new(50.0, 50.0)));
        assert!(!input.handle(&mouse(PointerPhase::Move, 50.0, 50.0)));
        assert_eq!(input.state().pan(), Vec2::ZERO);
    }

    #[test]
    fn test_mouse_and_touch_drive_the_same_drag() {
        let mut by_mouse = controller();
        by_mouse.handle(&mouse(PointerPhase::Down, 10.0, 10.0));
        by_mouse.handle(&mouse(PointerPhase::Move, 40.0, 25.0));
        by_mouse.handle(&mouse(PointerPhase::Up, 40.0, 25.0));

        let mut by_touch = controller();
        by_touch.handle(&touch(PointerPhase::Down, vec![Point::new(10.0, 10.0)]));
        by_touch.handle(&touch(
            PointerPhase::Move,
            vec![Point::new(40.0, 25.0), Point::new(300.0, 300.0)],
        ));
        by_touch.handle(&touch(PointerPhase::Up, vec![]));

        assert_eq!(by_mouse.state(), by_touch.state());
        assert!(!by_mouse.drag_to(Point::new(99.0, 99.0)));
        assert!(!by_touch.drag_to(Point::new(99.0, 99.0)));
    }

    #[test]
    fn test_touch_without_points_is_ignored() {
        let mut input = controller();
        input.handle(&touch(PointerPhase::Down, vec![]));
        assert!(!input.drag_to(Point::new(99.0, 99.0)));
    }

    #[test]
    fn test_cancel_ends_drag() {
        let mut input = controller();
        input.handle(&mouse(PointerPhase::Down, 0.0, 0.0));
        assert!(input.drag_to(Point::new(5.0, 5.0)));
        input.handle(&mouse(PointerPhase::Cancel, 0.0, 0.0));
        assert!(!input.drag_to(Point::new(99.0, 99.0)));
    }

    #[test]
    fn test_slider_clamps() {
        let mut input = controller();
        assert!(input.handle(&InputEvent::ZoomSlider(10.0)));
        assert_eq!(input.state().zoom(), 3.0);
        // Already at max: no change reported
        assert!(!input.handle(&InputEvent::ZoomSlider(4.0)));
        input.handle(&InputEvent::ZoomSlider(0.01));
        assert_eq!(input.state().zoom(), 0.5);
    }

    #[test]
    fn test_wheel_zoom_direction() {
        let mut input = controller();
        assert!(input.handle(&InputEvent::Wheel(-120.0)));
        assert!((input.state().zoom() - 1.1).abs() < 1e-12);
        input.handle(&InputEvent::Wheel(120.0));
        input.handle(&InputEvent::Wheel(120.0));
        assert!((input.state().zoom() - 0.9).abs() < 1e-12);
        assert!(!input.handle(&InputEvent::Wheel(0.0)));
    }

    #[test]
    fn test_rotate_button() {
        let mut input = controller();
        assert!(input.handle(&InputEvent::RotateButton));
        assert_eq!(input.state().rotation().degrees(), 90);
    }

    #[test]
    fn test_keyboard_commands() {
        let mut input = controller();
        input.handle(&InputEvent::Key(KeyCommand::PanRight));
        input.handle(&InputEvent::Key(KeyCommand::PanDown));
        input.handle(&InputEvent::Key(KeyCommand::PanDown));
        assert_eq!(input.state().pan(), Vec2::new(10.0, 20.0));

        input.handle(&InputEvent::Key(KeyCommand::ZoomIn));
        input.handle(&InputEvent::Key(KeyCommand::Rotate));
        assert!(!input.state().is_default());

        assert!(input.handle(&InputEvent::Key(KeyCommand::Reset)));
        assert!(input.state().is_default());
        assert!(!input.handle(&InputEvent::Key(KeyCommand::Reset)));
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(KeyCommand::from_key("+"), Some(KeyCommand::ZoomIn));
        assert_eq!(KeyCommand::from_key("ArrowLeft"), Some(KeyCommand::PanLeft));
        assert_eq!(KeyCommand::from_key("R"), Some(KeyCommand::Rotate));
        assert_eq!(KeyCommand::from_key("Escape"), None);
    }

    #[test]
    fn test_pointer_capture_trait() {
        fn drag(target: &mut impl PointerCapture) {
            target.begin(Point::new(1.0, 1.0));
            target.update(Point::new(4.0, 5.0));
            target.end();
        }

        let mut input = controller();
        drag(&mut input);
        assert_eq!(input.state().pan(), Vec2::new(3.0, 4.0));
        assert!(!input.drag_to(Point::new(99.0, 99.0)));
    }
}
