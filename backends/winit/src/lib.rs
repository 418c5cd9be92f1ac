use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Context;
use cursorkit_core::{CursorManager, CursorStyle, CursorSurface, PointerEvent, Size};
use tracing::{debug, trace};
use winit::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{CursorIcon, WindowBuilder},
};

/// Interval between frame ticks while a manager is attached.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// A winit window acting as the platform surface of a [`CursorManager`].
pub struct Window {
    winit_window: winit::window::Window,
}

impl Window {
    /// Open a window, attach `manager` to it and run the event loop until the window is closed.
    ///
    /// The window is the manager's frame clock: every redraw ticks the manager once, then calls `on_frame`.
    pub fn open_blocking<F>(
        title: &str,
        width: u32,
        height: u32,
        manager: CursorManager,
        mut on_frame: F,
    ) -> anyhow::Result<()>
    where
        F: 'static + FnMut(&CursorManager),
    {
        let event_loop = EventLoop::new();
        let winit_window = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(LogicalSize::new(width as f32, height as f32))
            .build(&event_loop)
            .context("failed to create window")?;
        let window = Rc::new(Window { winit_window });

        if !manager.init(Some(window.clone())) {
            anyhow::bail!("cursor manager could not attach to the window");
        }

        event_loop.run(move |event, _, control_flow| {
            match event {
                Event::MainEventsCleared => {
                    // Keep waking up once per frame even when no input arrives
                    *control_flow = frame_control_flow(manager.is_initialized(), Instant::now());
                    if manager.is_initialized() {
                        window.winit_window.request_redraw();
                    }
                }
                Event::RedrawRequested(_) => {
                    manager.tick();
                    on_frame(&manager);
                }
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        debug!("close requested");
                        manager.destroy();
                        *control_flow = ControlFlow::Exit;
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        let position = position.to_logical::<f32>(window.winit_window.scale_factor());
                        manager.dispatch(&PointerEvent::moved(position.x, position.y));
                    }
                    WindowEvent::CursorEntered { .. } => manager.dispatch(&PointerEvent::Entered),
                    WindowEvent::CursorLeft { .. } => manager.dispatch(&PointerEvent::Left),
                    WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                        if let Some(size) = window.viewport_size() {
                            trace!(?size, "viewport resized");
                            manager.set_viewport_size(size.width, size.height);
                        }
                    }
                    _ => (),
                },
                _ => (),
            };
        })
    }
}

impl CursorSurface for Window {
    fn set_cursor(&self, style: &CursorStyle) {
        match cursor_icon(style) {
            Some(icon) => {
                self.winit_window.set_cursor_visible(true);
                self.winit_window.set_cursor_icon(icon);
            }
            None => self.winit_window.set_cursor_visible(false),
        }
    }

    fn viewport_size(&self) -> Option<Size> {
        let size: LogicalSize<f32> = self
            .winit_window
            .inner_size()
            .to_logical(self.winit_window.scale_factor());
        Some(Size::new(size.width, size.height))
    }
}

/// Control flow for the end of a loop iteration: wake up for the next frame while a manager is attached,
/// otherwise sleep until the next OS event.
pub fn frame_control_flow(initialized: bool, now: Instant) -> ControlFlow {
    if initialized {
        ControlFlow::WaitUntil(now + FRAME_INTERVAL)
    } else {
        ControlFlow::Wait
    }
}

/// The winit cursor for a style, or `None` if the cursor should be hidden.
pub fn cursor_icon(style: &CursorStyle) -> Option<CursorIcon> {
    let icon = match style {
        CursorStyle::None => return None,
        CursorStyle::Default => CursorIcon::Default,
        CursorStyle::Pointer => CursorIcon::Hand,
        CursorStyle::Grab => CursorIcon::Grab,
        CursorStyle::Grabbing => CursorIcon::Grabbing,
        CursorStyle::Text => CursorIcon::Text,
        CursorStyle::Crosshair => CursorIcon::Crosshair,
        CursorStyle::Move => CursorIcon::Move,
        CursorStyle::NotAllowed => CursorIcon::NotAllowed,
        CursorStyle::Wait => CursorIcon::Wait,
        CursorStyle::Custom(token) => match token.as_str() {
            "help" => CursorIcon::Help,
            "progress" => CursorIcon::Progress,
            "zoom-in" => CursorIcon::ZoomIn,
            "zoom-out" => CursorIcon::ZoomOut,
            "copy" => CursorIcon::Copy,
            "cell" => CursorIcon::Cell,
            _ => CursorIcon::Default,
        },
    };
    Some(icon)
}
