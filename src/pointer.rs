//! Pointer tracking
//!
//! Turns host pointer events (screen pixels, y down) into spawn requests in
//! world space. While the button is held, every tick spawns one particle at
//! the pointer, flung with the pointer's own velocity.

use crate::consts::POINTER_SAMPLE_DT;
use crate::screen_to_world;
use crate::sim::SpawnRequest;

/// Pointer state between ticks
#[derive(Debug, Clone)]
pub struct PointerTracker {
    screen_size: f32,
    held: bool,
    x: f32,
    y: f32,
    /// Pixels per second, from the last motion sample
    vx: f32,
    vy: f32,
}

impl PointerTracker {
    pub fn new(screen_size: f32) -> Self {
        Self {
            screen_size,
            held: false,
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
        }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Button down: start spawning here, at rest
    pub fn press(&mut self, x: f32, y: f32) {
        self.held = true;
        self.x = x;
        self.y = y;
        self.vx = 0.0;
        self.vy = 0.0;
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    /// Pointer moved. Samples outside the screen are dropped.
    pub fn motion(&mut self, x: f32, y: f32) {
        let in_bounds =
            (0.0..=self.screen_size).contains(&x) && (0.0..=self.screen_size).contains(&y);
        if !in_bounds {
            return;
        }
        self.vx = (x - self.x) / POINTER_SAMPLE_DT;
        self.vy = (y - self.y) / POINTER_SAMPLE_DT;
        self.x = x;
        self.y = y;
    }

    /// Spawn request for this tick, if the button is held
    pub fn spawn_request(&self) -> Option<SpawnRequest> {
        if !self.held {
            return None;
        }
        let (x, y) = screen_to_world(self.x, self.y, self.screen_size);
        Some(SpawnRequest {
            x,
            y,
            vx: self.vx / self.screen_size * 2.0,
            vy: -self.vy / self.screen_size * 2.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_spawn_until_pressed() {
        let mut pointer = PointerTracker::new(1000.0);
        assert_eq!(pointer.spawn_request(), None);

        pointer.press(500.0, 250.0);
        let req = pointer.spawn_request().unwrap();
        assert_eq!((req.x, req.y), (0.0, 0.5));
        assert_eq!((req.vx, req.vy), (0.0, 0.0));

        pointer.release();
        assert!(!pointer.is_held());
        assert_eq!(pointer.spawn_request(), None);
    }

    #[test]
    fn test_motion_sets_velocity() {
        let mut pointer = PointerTracker::new(1000.0);
        pointer.press(500.0, 500.0);
        // 5 px right, 5 px up on screen in one sample
        pointer.motion(505.0, 495.0);

        let req = pointer.spawn_request().unwrap();
        assert!((req.vx - 2.0).abs() < 1e-5);
        assert!((req.vy - 2.0).abs() < 1e-5);
        assert!((req.x - 0.01).abs() < 1e-6);
        assert!((req.y - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_motion_outside_screen_ignored() {
        let mut pointer = PointerTracker::new(1000.0);
        pointer.press(10.0, 10.0);
        pointer.motion(-5.0, 10.0);
        pointer.motion(10.0, 1200.0);

        let req = pointer.spawn_request().unwrap();
        assert_eq!((req.vx, req.vy), (0.0, 0.0));
        assert!((req.x - -0.98).abs() < 1e-6);
    }

    #[test]
    fn test_press_resets_velocity() {
        let mut pointer = PointerTracker::new(1000.0);
        pointer.press(100.0, 100.0);
        pointer.motion(200.0, 100.0);
        pointer.release();

        pointer.press(300.0, 300.0);
        let req = pointer.spawn_request().unwrap();
        assert_eq!((req.vx, req.vy), (0.0, 0.0));
    }
}
