use glam::Vec3;

use crate::animation::Tween;
use crate::camera::core::{CameraBounds, CameraPose};
use crate::error::CommandError;
use crate::options::{AnimationOptions, CameraOptions, RegionTable};

/// Owns the orbital camera pose and animates it between regions.
///
/// The controller is the only writer of the pose. Region moves start a
/// tween from wherever the camera currently is; a new move replaces any
/// move still in flight, so the most recent region always wins and
/// nothing is queued.
pub struct CameraController {
    pose: CameraPose,
    target: Vec3,
    bounds: CameraBounds,
    animation: AnimationOptions,
    tween: Option<Tween<CameraPose>>,
}

impl CameraController {
    /// Controller at the configured idle pose.
    #[must_use]
    pub fn new(camera: &CameraOptions, animation: AnimationOptions) -> Self {
        Self {
            pose: camera.initial,
            target: Vec3::from_array(camera.target),
            bounds: camera.bounds,
            animation,
            tween: None,
        }
    }

    /// Start animating toward the region named `name`.
    ///
    /// An unknown name leaves the pose and any in-flight move untouched.
    pub fn move_to(
        &mut self,
        regions: &RegionTable,
        name: &str,
    ) -> Result<(), CommandError> {
        let region = regions.lookup(name)?;
        let goal = region.pose();
        if self.tween.is_some() {
            log::debug!("camera: '{name}' replaces the move in flight");
        }
        self.tween = Some(Tween::new(
            self.pose,
            goal,
            self.animation.duration_secs,
            self.animation.easing,
        ));
        log::debug!("camera: moving to '{name}' {goal:?}");
        Ok(())
    }

    /// Advance the in-flight move by `dt` seconds.
    /// Returns true if a move is still in progress.
    pub fn update(&mut self, dt: f32) -> bool {
        let Some(tween) = &mut self.tween else {
            return false;
        };
        self.pose = tween.advance(dt);
        if tween.is_complete() {
            self.tween = None;
            return false;
        }
        true
    }

    /// Jump to `pose` immediately, cancelling any move.
    pub fn snap_to(&mut self, pose: CameraPose) {
        self.tween = None;
        self.pose = pose;
    }

    /// Take over a pose the user orbited to with pointer controls.
    ///
    /// Ignored while a region move is animating; the move owns the camera
    /// until it lands.
    pub fn adopt_user_pose(&mut self, pose: CameraPose) -> bool {
        if self.is_animating() {
            return false;
        }
        self.pose = pose;
        true
    }

    /// Whether a region move is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Current pose.
    #[must_use]
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    /// Pose the in-flight move is heading to, if any.
    #[must_use]
    pub fn destination(&self) -> Option<CameraPose> {
        self.tween.as_ref().map(Tween::target)
    }

    /// Orbit target.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Axis limits handed to the backend camera.
    #[must_use]
    pub fn bounds(&self) -> &CameraBounds {
        &self.bounds
    }

    /// World-space eye position.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.pose.eye(self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Options, Region};
    use crate::util::easing::EasingFunction;

    const FRAME: f32 = 1.0 / 60.0;

    fn run_frames(controller: &mut CameraController, frames: usize) {
        for _ in 0..frames {
            let _ = controller.update(FRAME);
        }
    }

    fn controller() -> (CameraController, RegionTable) {
        let mut options = Options::default();
        options.camera.initial = CameraPose::new(6.0, 1.2, 20.0);
        let regions = RegionTable::new()
            .with("front", Region::new(1.0, 1.0, 10.0))
            .with("back", Region::new(4.0, 0.5, 30.0));
        (
            CameraController::new(&options.camera, options.animation),
            regions,
        )
    }

    #[test]
    fn move_to_front_lands_on_region_pose() {
        let (mut camera, regions) = controller();
        camera.move_to(&regions, "front").unwrap();
        run_frames(&mut camera, 70);
        assert!(!camera.is_animating());
        assert!(camera.pose().max_axis_delta(&CameraPose::new(1.0, 1.0, 10.0)) < 1e-5);
    }

    #[test]
    fn every_region_is_reachable() {
        for options in [Options::robot().unwrap(), Options::chair().unwrap()] {
            for (name, region) in options.regions.iter() {
                let mut camera =
                    CameraController::new(&options.camera, options.animation);
                camera.move_to(&options.regions, name).unwrap();
                run_frames(&mut camera, 90);
                assert!(
                    camera.pose().max_axis_delta(&region.pose()) < 1e-4,
                    "region {name} not reached"
                );
                assert!(
                    options.camera.bounds.contains(&camera.pose()),
                    "region {name} lands out of bounds"
                );
            }
        }
    }

    #[test]
    fn snap_cancels_the_move_in_flight() {
        let (mut camera, regions) = controller();
        camera.move_to(&regions, "front").unwrap();
        run_frames(&mut camera, 10);
        let snapped = CameraPose::new(3.0, 0.8, 15.0);
        camera.snap_to(snapped);

        assert!(!camera.is_animating());
        assert_eq!(camera.destination(), None);
        run_frames(&mut camera, 70);
        assert_eq!(camera.pose(), snapped);
    }

    #[test]
    fn newest_move_wins() {
        let (mut camera, regions) = controller();
        camera.move_to(&regions, "front").unwrap();
        run_frames(&mut camera, 10);
        camera.move_to(&regions, "back").unwrap();
        run_frames(&mut camera, 90);
        assert!(camera.pose().max_axis_delta(&CameraPose::new(4.0, 0.5, 30.0)) < 1e-5);
    }

    #[test]
    fn interrupted_move_restarts_from_current_pose() {
        let (mut camera, regions) = controller();
        camera.move_to(&regions, "front").unwrap();
        run_frames(&mut camera, 15);
        let mid = camera.pose();
        camera.move_to(&regions, "back").unwrap();
        let _ = camera.update(0.0);
        assert!(camera.pose().max_axis_delta(&mid) < 1e-6);
        assert_eq!(camera.destination(), Some(CameraPose::new(4.0, 0.5, 30.0)));
    }

    #[test]
    fn unknown_region_changes_nothing() {
        let (mut camera, regions) = controller();
        camera.move_to(&regions, "front").unwrap();
        run_frames(&mut camera, 5);
        let before = camera.pose();
        let err = camera.move_to(&regions, "nonexistent").unwrap_err();
        assert_eq!(err, CommandError::RegionNotFound("nonexistent".to_owned()));
        assert_eq!(camera.pose(), before);
        assert_eq!(camera.destination(), Some(CameraPose::new(1.0, 1.0, 10.0)));
    }

    #[test]
    fn motion_decelerates_into_target() {
        let (mut camera, regions) = controller();
        camera.move_to(&regions, "front").unwrap();
        let start = camera.pose().alpha;
        let _ = camera.update(0.1);
        let early = (camera.pose().alpha - start).abs();
        run_frames(&mut camera, 48);
        let before_last = camera.pose().alpha;
        let _ = camera.update(0.1);
        let late = (camera.pose().alpha - before_last).abs();
        assert!(early > late);
    }

    #[test]
    fn zero_duration_snaps() {
        let mut options = Options::default();
        options.animation = AnimationOptions {
            duration_secs: 0.0,
            easing: EasingFunction::Linear,
        };
        let regions = RegionTable::new().with("front", Region::new(6.0, 1.0, 10.0));
        let mut camera = CameraController::new(&options.camera, options.animation);
        camera.move_to(&regions, "front").unwrap();
        assert!(!camera.update(0.0));
        assert_eq!(camera.pose(), CameraPose::new(6.0, 1.0, 10.0));
    }

    #[test]
    fn user_orbit_only_adopted_when_idle() {
        let (mut camera, regions) = controller();
        assert!(camera.adopt_user_pose(CameraPose::new(5.0, 1.0, 25.0)));
        assert_eq!(camera.pose(), CameraPose::new(5.0, 1.0, 25.0));

        camera.move_to(&regions, "front").unwrap();
        assert!(!camera.adopt_user_pose(CameraPose::new(5.5, 1.0, 25.0)));
    }
}
