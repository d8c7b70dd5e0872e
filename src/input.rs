//! Host events the frame driver reacts to.
//!
//! Window-system events are reduced to the handful a backdrop cares about:
//! the drawing area changing size, the pointer moving or leaving, and a
//! request to stop. [`translate`] does that reduction for winit events.

use glam::Vec2;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// An event delivered by the host environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// New drawing area size in physical pixels.
    Resized { width: f32, height: f32 },
    /// Pointer position in physical pixels.
    PointerMoved(Vec2),
    PointerLeft,
    /// Close button or Escape.
    StopRequested,
}

/// Reduce a winit window event to a [`HostEvent`], if it is one we use.
pub fn translate(event: &WindowEvent) -> Option<HostEvent> {
    match event {
        WindowEvent::Resized(size) => Some(HostEvent::Resized {
            width: size.width as f32,
            height: size.height as f32,
        }),
        WindowEvent::CursorMoved { position, .. } => Some(HostEvent::PointerMoved(Vec2::new(
            position.x as f32,
            position.y as f32,
        ))),
        WindowEvent::CursorLeft { .. } => Some(HostEvent::PointerLeft),
        WindowEvent::CloseRequested => Some(HostEvent::StopRequested),
        WindowEvent::KeyboardInput { event, .. }
            if event.state == ElementState::Pressed && is_stop_key(event.physical_key) =>
        {
            Some(HostEvent::StopRequested)
        }
        _ => None,
    }
}

/// Keys that end the animation.
pub fn is_stop_key(key: PhysicalKey) -> bool {
    matches!(key, PhysicalKey::Code(KeyCode::Escape))
}
