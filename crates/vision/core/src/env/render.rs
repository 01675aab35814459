use crate::state::Position;

/// Sink for render-update hints.
///
/// Called exactly once per crossing of the visible/hidden boundary for a cell,
/// in either direction, and never for count changes that stay on one side.
pub trait RenderHints {
    fn set_needs_render_update(&mut self, position: Position, needs_update: bool);
}

/// Hint sink that drops everything, for headless use and restores.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoRenderHints;

impl RenderHints for NoRenderHints {
    fn set_needs_render_update(&mut self, _position: Position, _needs_update: bool) {}
}

impl<T: RenderHints + ?Sized> RenderHints for &mut T {
    fn set_needs_render_update(&mut self, position: Position, needs_update: bool) {
        (**self).set_needs_render_update(position, needs_update);
    }
}
