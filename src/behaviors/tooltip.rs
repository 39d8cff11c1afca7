//! Map tooltip placement relative to its positioned container.

pub fn tooltip_position(
    client_x: f64,
    client_y: f64,
    container_left: f64,
    container_top: f64,
    offset_x: f64,
    offset_y: f64,
) -> (f64, f64) {
    (
        client_x - container_left + offset_x,
        client_y - container_top + offset_y,
    )
}

/// CSS pixel length; whole numbers are written without a fraction.
pub fn px(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}px", value as i64)
    } else {
        format!("{value}px")
    }
}
