use crate::options::SideBySideOptions;

/// Divider offset in pixels from the container's left edge.
///
/// A range input keeps its thumb fully inside the track, so the thumb centre
/// travels from `footprint / 2` to `width - footprint / 2` rather than edge to
/// edge. The offset term shifts the linear mapping to follow the thumb.
pub fn divider_position(viewport_width_px: f64, fraction: f64, options: &SideBySideOptions) -> f64 {
    let fraction = fraction.clamp(0.0, 1.0);
    let offset = (0.5 - fraction) * options.thumb_footprint();
    viewport_width_px * fraction + offset
}
