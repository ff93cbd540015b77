//! Pointer input helpers
//!
//! Browser events arrive in CSS pixels relative to the viewport; the scene
//! wants normalized device coordinates relative to the canvas, y pointing up.

use glam::Vec2;

/// Canvas bounding rectangle in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Map a client-space position to NDC in [-1, 1] over the canvas.
///
/// Positions outside the canvas map outside that range. Returns `None` for a
/// collapsed canvas.
#[inline]
pub fn pointer_ndc(client_x: f32, client_y: f32, rect: CanvasRect) -> Option<Vec2> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let u = (client_x - rect.left) / rect.width;
    let v = (client_y - rect.top) / rect.height;
    Some(Vec2::new(u * 2.0 - 1.0, -(v * 2.0 - 1.0)))
}

#[cfg(target_arch = "wasm32")]
pub fn canvas_rect(canvas: &web_sys::HtmlCanvasElement) -> CanvasRect {
    let rect = canvas.get_bounding_client_rect();
    CanvasRect {
        left: rect.left() as f32,
        top: rect.top() as f32,
        width: rect.width() as f32,
        height: rect.height() as f32,
    }
}

#[cfg(target_arch = "wasm32")]
#[inline]
pub fn event_ndc(ev: &web_sys::MouseEvent, canvas: &web_sys::HtmlCanvasElement) -> Option<Vec2> {
    pointer_ndc(ev.client_x() as f32, ev.client_y() as f32, canvas_rect(canvas))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: CanvasRect = CanvasRect {
        left: 100.0,
        top: 50.0,
        width: 800.0,
        height: 400.0,
    };

    #[test]
    fn corners_and_center() {
        assert_eq!(pointer_ndc(500.0, 250.0, RECT), Some(Vec2::ZERO));
        assert_eq!(pointer_ndc(100.0, 50.0, RECT), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(pointer_ndc(900.0, 450.0, RECT), Some(Vec2::new(1.0, -1.0)));
    }

    #[test]
    fn collapsed_canvas() {
        let rect = CanvasRect { width: 0.0, ..RECT };
        assert_eq!(pointer_ndc(10.0, 10.0, rect), None);
    }
}
