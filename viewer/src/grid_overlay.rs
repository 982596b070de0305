use bevy::prelude::*;

pub const GRID_OVERLAY_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.18);

#[derive(Resource, Clone, Copy, Debug)]
pub struct GridOverlayConfig {
    pub cell_size: f32,
    pub visible_half_cells: i32,
    pub y_offset: f32,
    pub color: Color,
}

impl Default for GridOverlayConfig {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            visible_half_cells: 12,
            y_offset: 0.01,
            color: GRID_OVERLAY_COLOR,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLineSegment {
    pub start: Vec3,
    pub end: Vec3,
}

/// Lines per axis times two axes.
pub fn grid_line_count(visible_half_cells: i32) -> usize {
    let half = visible_half_cells.max(0) as usize;
    if half == 0 {
        return 0;
    }
    (2 * half + 1) * 2
}

/// Flat grid on the ground plane, snapped to whole cells around `center`.
pub fn build_grid_segments(center: Vec3, config: GridOverlayConfig) -> Vec<GridLineSegment> {
    if config.cell_size <= 0.0 {
        return Vec::new();
    }

    let half = config.visible_half_cells.max(0);
    if half == 0 {
        return Vec::new();
    }
    let cx = (center.x / config.cell_size).round() * config.cell_size;
    let cz = (center.z / config.cell_size).round() * config.cell_size;
    let extent = half as f32 * config.cell_size;
    let y = config.y_offset;
    let mut lines = Vec::with_capacity(grid_line_count(half));

    for i in -half..=half {
        let delta = i as f32 * config.cell_size;

        let z_world = cz + delta;
        lines.push(GridLineSegment {
            start: Vec3::new(cx - extent, y, z_world),
            end: Vec3::new(cx + extent, y, z_world),
        });

        let x_world = cx + delta;
        lines.push(GridLineSegment {
            start: Vec3::new(x_world, y, cz - extent),
            end: Vec3::new(x_world, y, cz + extent),
        });
    }

    lines
}

pub fn draw_grid_overlay(gizmos: &mut Gizmos, center: Vec3, config: GridOverlayConfig) {
    for segment in build_grid_segments(center, config) {
        gizmos.line(segment.start, segment.end, config.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grid_for_degenerate_config() {
        let zero_cells = GridOverlayConfig {
            visible_half_cells: 0,
            ..Default::default()
        };
        assert!(build_grid_segments(Vec3::ZERO, zero_cells).is_empty());

        let zero_size = GridOverlayConfig {
            cell_size: 0.0,
            ..Default::default()
        };
        assert!(build_grid_segments(Vec3::ZERO, zero_size).is_empty());
        assert_eq!(grid_line_count(-3), 0);
    }

    #[test]
    fn grid_snaps_to_cells_around_center() {
        let config = GridOverlayConfig {
            cell_size: 1.0,
            visible_half_cells: 2,
            y_offset: 0.0,
            color: GRID_OVERLAY_COLOR,
        };
        let segments = build_grid_segments(Vec3::new(3.4, 1.0, -0.6), config);
        assert_eq!(segments.len(), grid_line_count(2));

        let first = segments[0];
        assert_eq!(first.start, Vec3::new(1.0, 0.0, -3.0));
        assert_eq!(first.end, Vec3::new(5.0, 0.0, -3.0));
        assert!(segments.iter().all(|segment| segment.start.y == 0.0));
    }
}
