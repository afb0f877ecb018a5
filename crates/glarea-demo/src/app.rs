use glarea_engine::core::{App, AppControl, FrameCtx, InputCtx};
use glarea_engine::input::{
    InputEvent, InputState, Key, KeyState, MouseButton, MouseButtonState, PointerButtonEvent,
    PointerMoveEvent,
};
use glarea_engine::paint::Color;
use glarea_engine::render::quad::{Quad, QuadRenderer};
use glarea_engine::render::triangle::TriangleRenderer;
use glarea_transform::{
    Axis, ButtonEvent, HeldButtons, MotionSample, PointerButton, ScrollDirection,
    TransformController, TransformInput, ViewHost,
};

use crate::config::DemoConfig;
use crate::controls::AxisSlider;
use crate::layout::{Layout, LayoutMetrics, Region};

/// Who receives pointer motion until every button is up again.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Grab {
    Area,
    Slider(Axis),
}

/// What the runtime should do after an input event.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
struct Response {
    redraw: bool,
    exit: bool,
}

/// Forwards core outputs to the sliders and collects redraw requests.
struct PanelHost<'a> {
    sliders: &'a mut [AxisSlider; Axis::COUNT],
    redraw: bool,
}

impl ViewHost for PanelHost<'_> {
    fn queue_redraw(&mut self) {
        self.redraw = true;
    }

    fn sync_axis(&mut self, axis: Axis, degrees: f32) {
        self.sliders[axis.index()].set_value(degrees);
    }
}

/// Input routing and widget state, independent of the GPU.
struct Panel {
    metrics: LayoutMetrics,
    controller: TransformController,
    sliders: [AxisSlider; Axis::COUNT],
    grab: Option<Grab>,
}

impl Panel {
    fn new(metrics: LayoutMetrics) -> Self {
        Self {
            metrics,
            controller: TransformController::new(),
            sliders: Axis::ALL.map(AxisSlider::new),
            grab: None,
        }
    }

    fn layout(&self, (w, h): (f32, f32)) -> Layout {
        Layout::compute(w, h, self.metrics)
    }

    fn handle(&mut self, event: &InputEvent, input: &InputState, size: (f32, f32)) -> Response {
        let layout = self.layout(size);
        let mut host = PanelHost {
            sliders: &mut self.sliders,
            redraw: false,
        };
        let mut exit = false;

        match event {
            InputEvent::Key { key: Key::Escape, state: KeyState::Pressed, .. } => exit = true,

            InputEvent::Focused(false) => {
                self.controller.cancel_drags();
                for s in host.sliders.iter_mut() {
                    s.release();
                }
                self.grab = None;
                host.redraw = true;
            }

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y }) => {
                match state {
                    MouseButtonState::Pressed => {
                        if self.grab.is_none() {
                            self.grab = match layout.hit(*x, *y) {
                                Some(Region::Area) => Some(Grab::Area),
                                Some(Region::Slider(axis)) if *button == MouseButton::Left => {
                                    let row = layout.slider(axis);
                                    let v = host.sliders[axis.index()].press(row, *x);
                                    self.controller.on_axis_change(axis, v, &mut host);
                                    Some(Grab::Slider(axis))
                                }
                                _ => None,
                            };
                        }
                        if self.grab == Some(Grab::Area) {
                            if let Some(b) = pointer_button(*button) {
                                self.controller.on_button(ButtonEvent::pressed(b), &mut host);
                            }
                        }
                    }
                    MouseButtonState::Released => {
                        // Releases always reach the tracker so no session outlives its button.
                        if let Some(b) = pointer_button(*button) {
                            self.controller.on_button(ButtonEvent::released(b), &mut host);
                        }
                        if let Some(Grab::Slider(axis)) = self.grab {
                            if *button == MouseButton::Left {
                                host.sliders[axis.index()].release();
                                host.redraw = true;
                            }
                        }
                        if !input.any_button_down() {
                            self.grab = None;
                        }
                    }
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => match self.grab {
                Some(Grab::Slider(axis)) => {
                    let row = layout.slider(axis);
                    if let Some(v) = host.sliders[axis.index()].drag_to(row, *x) {
                        self.controller.on_axis_change(axis, v, &mut host);
                    }
                }
                Some(Grab::Area) => {
                    let sample = MotionSample::new(*x, *y, held_buttons(input));
                    self.controller.on_motion(sample, &mut host);
                }
                None => {}
            },

            InputEvent::MouseWheel { delta } => {
                let over_area = input
                    .pointer_pos
                    .is_some_and(|(x, y)| layout.area.contains(x, y));
                let v = delta.vertical();
                if over_area && v != 0.0 {
                    let direction = if v > 0.0 {
                        ScrollDirection::Forward
                    } else {
                        ScrollDirection::Backward
                    };
                    self.controller.on_scroll(direction, &mut host);
                }
            }

            _ => {}
        }

        Response {
            redraw: host.redraw,
            exit,
        }
    }
}

fn pointer_button(b: MouseButton) -> Option<PointerButton> {
    match b {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

fn held_buttons(input: &InputState) -> HeldButtons {
    HeldButtons {
        primary: input.button_down(MouseButton::Left),
        secondary: input.button_down(MouseButton::Right),
        middle: input.button_down(MouseButton::Middle),
    }
}

/// The demo application: a transformable triangle above three axis sliders.
pub struct GlAreaApp {
    panel: Panel,
    clear_color: Color,
    area_color: Color,
    triangle: TriangleRenderer,
    quads: QuadRenderer,
}

impl GlAreaApp {
    pub fn new(config: &DemoConfig) -> Self {
        Self {
            panel: Panel::new(config.layout),
            clear_color: config.clear_color,
            area_color: config.area_color,
            triangle: TriangleRenderer::new(),
            quads: QuadRenderer::new(),
        }
    }
}

impl App for GlAreaApp {
    fn on_input(&mut self, ctx: &mut InputCtx<'_>, event: &InputEvent) -> AppControl {
        let size = ctx.window.logical_size();
        let response = self.panel.handle(event, ctx.input, size);

        if response.exit {
            log::info!("quit requested");
            return AppControl::Exit;
        }
        if response.redraw {
            ctx.request_redraw();
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let layout = self.panel.layout(ctx.window.logical_size());
        let mvp = self.panel.controller.on_redraw().to_cols();

        let background = [Quad::new(layout.area, self.area_color)];
        let controls: Vec<Quad> = self
            .panel
            .sliders
            .iter()
            .flat_map(|s| s.quads(layout.slider(s.axis())))
            .collect();

        self.quads.begin_frame();
        let (triangle, quads) = (&mut self.triangle, &mut self.quads);
        ctx.render(self.clear_color, |rctx, target| {
            quads.render(rctx, target, &background);
            triangle.render(rctx, target, layout.area, mvp);
            quads.render(rctx, target, &controls);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glarea_engine::input::MouseWheelDelta;

    const SIZE: (f32, f32) = (700.0, 800.0);

    struct Harness {
        panel: Panel,
        input: InputState,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                panel: Panel::new(LayoutMetrics::default()),
                input: InputState::default(),
            }
        }

        fn send(&mut self, ev: InputEvent) -> Response {
            self.input.apply_event(&ev);
            self.panel.handle(&ev, &self.input, SIZE)
        }

        fn button(&mut self, button: MouseButton, state: MouseButtonState) -> Response {
            let (x, y) = self.input.pointer_pos.unwrap_or((0.0, 0.0));
            self.send(InputEvent::PointerButton(PointerButtonEvent { button, state, x, y }))
        }

        fn move_to(&mut self, x: f32, y: f32) -> Response {
            self.send(InputEvent::PointerMoved(PointerMoveEvent { x, y }))
        }

        fn wheel(&mut self, y: f32) -> Response {
            self.send(InputEvent::MouseWheel { delta: MouseWheelDelta::Line { x: 0.0, y } })
        }

        fn rotation(&self, axis: Axis) -> f32 {
            self.panel.controller.state().rotation(axis)
        }

        fn slider(&self, axis: Axis) -> &AxisSlider {
            &self.panel.sliders[axis.index()]
        }
    }

    // ── surface drags ─────────────────────────────────────────────────────

    #[test]
    fn primary_drag_rotates_and_syncs_sliders() {
        let mut h = Harness::new();
        h.move_to(100.0, 100.0);
        h.button(MouseButton::Left, MouseButtonState::Pressed);

        assert!(!h.move_to(100.0, 100.0).redraw); // anchor
        let r = h.move_to(130.0, 110.0);

        assert!(r.redraw);
        assert_eq!(h.rotation(Axis::Y), 30.0);
        assert_eq!(h.rotation(Axis::X), 350.0);
        assert_eq!(h.slider(Axis::Y).value(), 30.0);
        assert_eq!(h.slider(Axis::X).value(), 350.0);
    }

    #[test]
    fn secondary_drag_rotates_z_only() {
        let mut h = Harness::new();
        h.move_to(200.0, 200.0);
        h.button(MouseButton::Right, MouseButtonState::Pressed);
        h.move_to(200.0, 200.0);
        h.move_to(215.0, 260.0);

        assert_eq!(h.rotation(Axis::Z), 15.0);
        assert_eq!(h.rotation(Axis::X), 0.0);
        assert_eq!(h.rotation(Axis::Y), 0.0);
    }

    #[test]
    fn drag_continues_outside_the_area_while_grabbed() {
        let mut h = Harness::new();
        h.move_to(100.0, 600.0);
        h.button(MouseButton::Left, MouseButtonState::Pressed);
        h.move_to(100.0, 600.0);
        h.move_to(110.0, 740.0); // over the Y slider row

        assert_eq!(h.rotation(Axis::Y), 10.0);
        assert!(!h.slider(Axis::Y).is_dragging());
    }

    #[test]
    fn release_ends_the_gesture() {
        let mut h = Harness::new();
        h.move_to(100.0, 100.0);
        h.button(MouseButton::Left, MouseButtonState::Pressed);
        h.move_to(100.0, 100.0);
        h.move_to(110.0, 100.0);
        h.button(MouseButton::Left, MouseButtonState::Released);

        h.button(MouseButton::Left, MouseButtonState::Pressed);
        assert!(!h.move_to(300.0, 100.0).redraw);
        assert_eq!(h.rotation(Axis::Y), 10.0);
    }

    #[test]
    fn motion_without_grab_does_nothing() {
        let mut h = Harness::new();
        assert_eq!(h.move_to(100.0, 100.0), Response::default());
        assert_eq!(h.move_to(200.0, 100.0), Response::default());
    }

    #[test]
    fn focus_loss_cancels_drags() {
        let mut h = Harness::new();
        h.move_to(100.0, 100.0);
        h.button(MouseButton::Left, MouseButtonState::Pressed);
        h.move_to(100.0, 100.0);
        h.send(InputEvent::Focused(false));

        // Focus loss cleared the held buttons; a fresh press re-anchors.
        h.button(MouseButton::Left, MouseButtonState::Pressed);
        assert!(!h.move_to(150.0, 100.0).redraw);
        assert_eq!(h.rotation(Axis::Y), 0.0);
    }

    // ── sliders ───────────────────────────────────────────────────────────

    #[test]
    fn slider_press_sets_axis() {
        let mut h = Harness::new();
        let row = Layout::compute(SIZE.0, SIZE.1, LayoutMetrics::default()).slider(Axis::Z);
        // Track spans row.x + 5 .. row.right() - 5: 678 px for 360 degrees.
        h.move_to(row.x + 5.0 + 339.0, row.y + 10.0);
        let r = h.button(MouseButton::Left, MouseButtonState::Pressed);

        assert!(r.redraw);
        assert_eq!(h.rotation(Axis::Z), 180.0);
        assert!(h.slider(Axis::Z).is_dragging());

        h.move_to(row.right(), row.y + 10.0);
        assert_eq!(h.rotation(Axis::Z), 360.0);

        h.button(MouseButton::Left, MouseButtonState::Released);
        assert!(!h.slider(Axis::Z).is_dragging());
    }

    #[test]
    fn right_press_on_slider_is_ignored() {
        let mut h = Harness::new();
        h.move_to(300.0, 740.0);
        let r = h.button(MouseButton::Right, MouseButtonState::Pressed);
        assert!(!r.redraw);
        assert_eq!(h.rotation(Axis::Y), 0.0);
    }

    // ── wheel ─────────────────────────────────────────────────────────────

    #[test]
    fn wheel_over_area_scales() {
        let mut h = Harness::new();
        h.move_to(300.0, 300.0);
        for _ in 0..5 {
            assert!(h.wheel(1.0).redraw);
        }
        assert!((h.panel.controller.state().scale() - 0.5).abs() < 1e-5);

        h.wheel(-1.0);
        assert!((h.panel.controller.state().scale() - 0.6).abs() < 1e-5);
    }

    #[test]
    fn wheel_outside_area_is_ignored() {
        let mut h = Harness::new();
        h.move_to(300.0, 740.0);
        assert!(!h.wheel(1.0).redraw);
        assert_eq!(h.panel.controller.state().scale(), 1.0);
    }

    // ── keys ──────────────────────────────────────────────────────────────

    #[test]
    fn escape_exits() {
        let mut h = Harness::new();
        let press = |key| InputEvent::Key { key, state: KeyState::Pressed, repeat: false };
        assert!(h.send(press(Key::Escape)).exit);
        assert!(!h.send(press(Key::Space)).exit);
    }
}
