use std::collections::HashMap;

use anyhow::{Context, Result};
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, InputCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::InputState;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Logical size of the window when it first opens.
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "OpenGL Area".to_string(),
            initial_size: LogicalSize::new(700.0, 800.0),
        }
    }
}

/// Requests an app can make from inside a callback.
///
/// Buffered and applied once the callback has returned.
#[derive(Default)]
pub struct RuntimeCtx {
    pending: Vec<Request>,
}

impl RuntimeCtx {
    /// Asks for one more frame of `id`. Duplicate requests coalesce.
    pub fn request_redraw(&mut self, id: WindowId) {
        self.pending.push(Request::Redraw(id));
    }

    pub fn close_window(&mut self, id: WindowId) {
        self.pending.push(Request::Close(id));
    }

    pub fn exit(&mut self) {
        self.pending.push(Request::Exit);
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Request {
    Redraw(WindowId),
    Close(WindowId),
    Exit,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and runs the event loop until the app exits or the
    /// window closes.
    ///
    /// Fails if the event loop cannot start or the first window (or its GPU
    /// context) cannot be created.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut driver = Driver::new(config, gpu_init, app);

        event_loop
            .run_app(&mut driver)
            .context("winit event loop terminated with error")?;

        driver.startup_error.map_or(Ok(()), Err)
    }
}

/// A window together with the GPU context bound to it.
#[self_referencing]
struct Slot {
    input: InputState,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

impl Slot {
    fn open(
        event_loop: &ActiveEventLoop,
        config: RuntimeConfig,
        gpu_init: GpuInit,
    ) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title)
            .with_inner_size(config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        SlotTryBuilder {
            input: InputState::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()
    }

    fn redraw_later(&self) {
        self.with_window(|w| w.request_redraw());
    }

    /// Matches the surface to `size` (or the window's current size) and
    /// schedules a frame.
    fn refit(&mut self, size: Option<PhysicalSize<u32>>) {
        let size = size.unwrap_or_else(|| self.with_window(|w| w.inner_size()));
        self.with_gpu_mut(|gpu| gpu.resize(size));
        self.redraw_later();
    }
}

struct Driver<A: App + 'static> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    slots: HashMap<WindowId, Slot>,
    exiting: bool,

    /// Reported from `Runtime::run` once the loop has stopped.
    startup_error: Option<anyhow::Error>,
}

impl<A: App + 'static> Driver<A> {
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            slots: HashMap::new(),
            exiting: false,
            startup_error: None,
        }
    }

    /// Translates `event`, updates the window's input state and hands the
    /// event to the app.
    fn dispatch_input(&mut self, id: WindowId, event: &WindowEvent, runtime: &mut RuntimeCtx) {
        let (app, slots) = (&mut self.app, &mut self.slots);
        let Some(slot) = slots.get_mut(&id) else { return };

        let control = slot.with_mut(|fields| {
            let ev = translate_window_event(fields.window, fields.input, event)?;
            fields.input.apply_event(&ev);

            let mut ctx = InputCtx {
                window: WindowCtx { id, window: fields.window },
                input: fields.input,
                runtime: &mut *runtime,
            };
            Some(app.on_input(&mut ctx, &ev))
        });

        if control == Some(AppControl::Exit) {
            runtime.exit();
        }
    }

    fn draw_frame(&mut self, id: WindowId, runtime: &mut RuntimeCtx) {
        let (app, slots) = (&mut self.app, &mut self.slots);
        let Some(slot) = slots.get_mut(&id) else { return };

        let control = slot.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: WindowCtx { id, window: fields.window },
                gpu: fields.gpu,
                input: fields.input,
                runtime: &mut *runtime,
            };
            app.on_frame(&mut ctx)
        });

        if control == AppControl::Exit {
            runtime.exit();
        }
    }

    fn close(&mut self, id: WindowId) {
        if self.slots.remove(&id).is_some() {
            log::debug!("window {id:?} closed");
        }
    }

    fn apply(&mut self, event_loop: &ActiveEventLoop, runtime: RuntimeCtx) {
        for request in runtime.pending {
            match request {
                // winit folds repeated requests into a single RedrawRequested.
                Request::Redraw(id) => {
                    if let Some(slot) = self.slots.get(&id) {
                        slot.redraw_later();
                    }
                }
                Request::Close(id) => self.close(id),
                Request::Exit => self.exiting = true,
            }
        }

        if self.slots.is_empty() {
            self.exiting = true;
        }
        if self.exiting {
            event_loop.exit();
        }
    }
}

impl<A: App + 'static> ApplicationHandler for Driver<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !self.slots.is_empty() {
            return;
        }

        match Slot::open(event_loop, self.config.clone(), self.gpu_init.clone()) {
            Ok(slot) => {
                let id = slot.with_window(|w| w.id());
                log::info!("window {id:?} ready on {:?}", slot.with_gpu(|gpu| gpu.backend()));
                slot.redraw_later();
                self.slots.insert(id, slot);
            }
            Err(err) => {
                self.startup_error = Some(err.context("failed to create initial window"));
                self.exiting = true;
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exiting {
            event_loop.exit();
            return;
        }

        // No continuous redraw: sleep until input or a requested frame.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if self.exiting {
            event_loop.exit();
            return;
        }

        let mut runtime = RuntimeCtx::default();
        self.dispatch_input(id, &event, &mut runtime);

        match event {
            WindowEvent::CloseRequested => runtime.close_window(id),
            WindowEvent::Resized(size) => {
                if let Some(slot) = self.slots.get_mut(&id) {
                    slot.refit(Some(size));
                }
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(slot) = self.slots.get_mut(&id) {
                    slot.refit(None);
                }
            }
            WindowEvent::RedrawRequested => self.draw_frame(id, &mut runtime),
            _ => {}
        }

        self.apply(event_loop, runtime);
    }
}
