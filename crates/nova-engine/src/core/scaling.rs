use glam::Vec2;

/// Converts between the virtual (reference) resolution game logic is written
/// against and the live viewport resolution.
///
/// `scale = current / reference` per axis. A zero reference component yields an
/// infinite or NaN scale; that is a caller error and is not corrected here.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingManager {
    reference_resolution: Vec2,
    current_resolution: Vec2,
    scale: Vec2,
}

impl ScalingManager {
    pub fn new(reference_resolution: Vec2, current_resolution: Vec2) -> Self {
        Self {
            reference_resolution,
            current_resolution,
            scale: current_resolution / reference_resolution,
        }
    }

    /// Recompute the scale for a resized viewport. Calling it twice with the
    /// same size changes nothing.
    pub fn update_scale(&mut self, current_resolution: Vec2) {
        self.current_resolution = current_resolution;
        self.scale = current_resolution / self.reference_resolution;
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn reference_resolution(&self) -> Vec2 {
        self.reference_resolution
    }

    pub fn current_resolution(&self) -> Vec2 {
        self.current_resolution
    }

    pub fn virtual_to_screen(&self, position: Vec2) -> Vec2 {
        position * self.scale
    }

    pub fn screen_to_virtual(&self, position: Vec2) -> Vec2 {
        position / self.scale
    }

    /// Scale a box keeping its aspect ratio, fitted by the constraining axis.
    ///
    /// Two candidates are built: one driven by the x scale and one by the y scale.
    /// The width-driven one wins when it fits inside the height-driven one.
    pub fn box_size_virtual_to_screen(&self, size: Vec2) -> Vec2 {
        let aspect = size.x / size.y;

        let by_width_w = size.x * self.scale.x;
        let by_width_h = by_width_w / aspect;

        let by_height_h = size.y * self.scale.y;
        let by_height_w = by_height_h * aspect;

        if by_width_w <= by_height_w && by_width_h <= by_height_h {
            Vec2::new(by_width_w, by_width_h)
        } else {
            Vec2::new(by_height_w, by_height_h)
        }
    }

    /// Scale a radius by the smaller axis so circles stay round.
    pub fn circle_radius_virtual_to_screen(&self, radius: f32) -> f32 {
        radius * self.scale.x.min(self.scale.y)
    }

    /// Screen position of a world point, given the camera offset that applies
    /// to its object. Renderer, collisions and input hit-testing all go through here.
    pub fn world_to_screen(&self, position: Vec2, camera_offset: Vec2) -> Vec2 {
        self.virtual_to_screen(position) - self.virtual_to_screen(camera_offset)
    }

    /// World position of a screen point. Inverse of [`Self::world_to_screen`].
    pub fn screen_to_world(&self, point: Vec2, camera_offset: Vec2) -> Vec2 {
        self.screen_to_virtual(point) + camera_offset
    }
}

impl Default for ScalingManager {
    fn default() -> Self {
        let resolution = Vec2::new(1920.0, 1080.0);
        Self::new(resolution, resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn half_size() -> ScalingManager {
        ScalingManager::new(Vec2::new(1920.0, 1080.0), Vec2::new(960.0, 540.0))
    }

    #[test]
    fn scale_follows_resize() {
        let mut scaling = half_size();
        assert_eq!(scaling.scale(), Vec2::splat(0.5));
        scaling.update_scale(Vec2::new(3840.0, 1080.0));
        scaling.update_scale(Vec2::new(3840.0, 1080.0));
        assert_eq!(scaling.scale(), Vec2::new(2.0, 1.0));
        assert_eq!(scaling.current_resolution(), Vec2::new(3840.0, 1080.0));
    }

    #[test]
    fn uniform_scale_is_exact_for_circles() {
        let scaling = half_size();
        assert_eq!(scaling.circle_radius_virtual_to_screen(10.0), 5.0);
    }

    #[test]
    fn circle_uses_smaller_axis() {
        let scaling = ScalingManager::new(Vec2::new(100.0, 100.0), Vec2::new(200.0, 50.0));
        assert_eq!(scaling.circle_radius_virtual_to_screen(10.0), 5.0);
    }

    #[test]
    fn box_keeps_aspect_under_non_uniform_scale() {
        // Window twice as wide as tall relative to the reference.
        let scaling = ScalingManager::new(Vec2::new(100.0, 100.0), Vec2::new(200.0, 100.0));
        let size = scaling.box_size_virtual_to_screen(Vec2::new(10.0, 10.0));
        assert_eq!(size, Vec2::new(10.0, 10.0));

        let scaling = ScalingManager::new(Vec2::new(100.0, 100.0), Vec2::new(50.0, 100.0));
        let size = scaling.box_size_virtual_to_screen(Vec2::new(20.0, 10.0));
        assert_eq!(size, Vec2::new(10.0, 5.0));
    }

    #[test]
    fn world_and_screen_are_inverse() {
        let scaling = half_size();
        let camera = Vec2::new(100.0, -40.0);
        let screen = scaling.world_to_screen(Vec2::new(300.0, 200.0), camera);
        assert_eq!(screen, Vec2::new(100.0, 120.0));
        assert_eq!(scaling.screen_to_world(screen, camera), Vec2::new(300.0, 200.0));
    }

    proptest! {
        #[test]
        fn virtual_screen_round_trip(
            x in -10_000.0f32..10_000.0,
            y in -10_000.0f32..10_000.0,
            w in 100.0f32..4000.0,
            h in 100.0f32..4000.0,
        ) {
            let scaling = ScalingManager::new(Vec2::new(1920.0, 1080.0), Vec2::new(w, h));
            let p = Vec2::new(x, y);
            let back = scaling.screen_to_virtual(scaling.virtual_to_screen(p));
            prop_assert!((back - p).abs().max_element() <= 1e-2 + p.abs().max_element() * 1e-5);
        }
    }
}
