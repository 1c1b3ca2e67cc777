use glam::Vec2;
use web_sys as web;

/// Map a point in element CSS pixels to scene units. The element may be
/// styled larger or smaller than its backing surface; a collapsed element
/// leaves the point unscaled.
#[inline]
pub fn css_to_scene(local: Vec2, css_size: Vec2, scene_size: Vec2) -> Vec2 {
    if css_size.x > 0.0 && css_size.y > 0.0 && scene_size.x > 0.0 && scene_size.y > 0.0 {
        local / css_size * scene_size
    } else {
        local
    }
}

/// Pointer position relative to `el`'s top-left corner, in scene units.
#[inline]
pub fn pointer_scene_px(ev: &web::MouseEvent, el: &web::Element, scene_size: (f32, f32)) -> Vec2 {
    let rect = el.get_bounding_client_rect();
    let local = Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    );
    css_to_scene(
        local,
        Vec2::new(rect.width() as f32, rect.height() as f32),
        Vec2::new(scene_size.0, scene_size.1),
    )
}
