// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod common;

use approx::assert_abs_diff_eq;
use common::*;
use orrery_agents::{FrameOutcome, FramePhase, SchedulerState};
use orrery_core::config::CarouselPolicy;
use orrery_core::xr::{ReferenceSpaceType, SessionFeature, SessionUnavailableError};
use orrery_infra::graphics::headless::FrameCall;
use orrery_infra::xr::simulated::{standing_pose, SimulatedFrame};
use tempfile::tempdir;

#[test]
fn three_images_are_placed_on_a_ring_and_rendered() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let images = write_images(dir.path(), &["a.png", "b.png", "c.png"])?;
    let mut rig = rig(dir.path(), images, &test_config(3, CarouselPolicy::Wrapping));

    rig.scheduler.activate()?;
    assert_eq!(rig.scheduler.state(), SchedulerState::Active);
    assert!(rig.xr.has_pending_frame_request());

    assert!(rig.scheduler.wait_for_loads(LOAD_TIMEOUT));
    let outcome = rig.scheduler.pump().expect("a frame was requested");
    let FrameOutcome::Rendered(stats) = outcome else {
        panic!("expected a rendered frame, got {outcome:?}");
    };
    assert_eq!(stats.panels_drawn, 3);
    assert_eq!(stats.textured_panels, 3);

    let panels = rig.renderer.attached();
    assert_eq!(panels.len(), 3);
    let angles: Vec<f32> = panels
        .iter()
        .map(|p| ring_angle(p.transform.position.x, p.transform.position.z))
        .collect();
    for (angle, expected) in angles.iter().zip([0.0, 120.0, 240.0]) {
        assert_abs_diff_eq!(*angle, expected, epsilon = 1e-2);
    }
    for panel in &panels {
        assert_abs_diff_eq!(panel.transform.position.horizontal_length(), 1.5, epsilon = 1e-4);
        assert_eq!(panel.transform.position.y, 0.0);
    }
    Ok(())
}

#[test]
fn select_swaps_in_the_next_batch() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let images = write_images(dir.path(), &["a.png", "b.png", "c.png"])?;
    let mut rig = rig(dir.path(), images, &test_config(3, CarouselPolicy::Wrapping));
    rig.scheduler.activate()?;
    assert!(rig.scheduler.wait_for_loads(LOAD_TIMEOUT));
    rig.scheduler.pump();
    let first_nodes = rig.scheduler.scene().live().nodes();

    assert!(rig.xr.select());
    assert!(matches!(
        rig.scheduler.pump(),
        Some(FrameOutcome::Rendered(_))
    ));

    assert_eq!(rig.scheduler.stats().selects_handled, 1);
    assert_eq!(rig.scheduler.scene().generation(), 1);
    let panels = rig.renderer.attached();
    assert_eq!(panels.len(), 3);
    assert!(panels.iter().all(|p| !first_nodes.contains(&p.node)));
    assert_eq!(rig.renderer.node_count(), 3);

    assert!(rig.scheduler.wait_for_loads(LOAD_TIMEOUT));
    let Some(FrameOutcome::Rendered(stats)) = rig.scheduler.pump() else {
        panic!("expected a rendered frame");
    };
    assert_eq!(stats.textured_panels, 3);
    assert_eq!(rig.renderer.live_textures(), 3);
    Ok(())
}

#[test]
fn frame_without_pose_is_skipped_but_keeps_the_loop_alive() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let images = write_images(dir.path(), &["a.png", "b.png"])?;
    let mut rig = rig(dir.path(), images, &test_config(2, CarouselPolicy::Wrapping));
    rig.xr.push_tracking_loss(1);
    rig.scheduler.activate()?;
    let camera_before = rig.scheduler.camera().clone();

    assert_eq!(rig.scheduler.pump(), Some(FrameOutcome::Skipped));
    assert_eq!(rig.scheduler.camera(), &camera_before);
    assert_eq!(rig.scheduler.phase(), FramePhase::FramePending);
    assert!(rig.xr.has_pending_frame_request());
    assert_eq!(rig.renderer.frames(), 0);
    assert!(!rig
        .renderer
        .journal()
        .iter()
        .any(|c| matches!(c, FrameCall::Render { .. })));

    assert!(matches!(
        rig.scheduler.pump(),
        Some(FrameOutcome::Rendered(_))
    ));
    assert_eq!(rig.scheduler.camera().revision(), 1);
    let stats = rig.scheduler.stats();
    assert_eq!((stats.frames_skipped, stats.frames_rendered), (1, 1));
    Ok(())
}

#[test]
fn pose_is_applied_before_render() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let images = write_images(dir.path(), &["a.png"])?;
    let mut rig = rig(dir.path(), images, &test_config(1, CarouselPolicy::Wrapping));
    rig.scheduler.activate()?;

    let pose = standing_pose(1.2, 0.7, 16.0 / 9.0);
    let outcome = rig
        .scheduler
        .on_frame(&SimulatedFrame::new(16.0, Some(pose.clone())));
    assert!(matches!(outcome, FrameOutcome::Rendered(_)));

    let journal = rig.renderer.journal();
    assert_eq!(
        journal,
        vec![
            FrameCall::BindFramebuffer(orrery_core::renderer::FramebufferId(1)),
            FrameCall::SetSize(1280, 720),
            FrameCall::Render { camera_revision: 1 },
        ]
    );
    let camera = rig.scheduler.camera();
    assert_eq!(camera.world_matrix(), pose.views[0].transform);
    assert_eq!(camera.projection_matrix(), pose.views[0].projection);
    assert!(!camera.matrix_auto_update());
    Ok(())
}

#[test]
fn render_failure_does_not_stop_the_loop() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let images = write_images(dir.path(), &["a.png"])?;
    let mut rig = rig(dir.path(), images, &test_config(1, CarouselPolicy::Wrapping));
    rig.scheduler.activate()?;
    rig.renderer.fail_renders(1);

    assert!(matches!(
        rig.scheduler.pump(),
        Some(FrameOutcome::RenderFailed(_))
    ));
    assert!(rig.xr.has_pending_frame_request());
    assert!(matches!(
        rig.scheduler.pump(),
        Some(FrameOutcome::Rendered(_))
    ));
    assert_eq!(rig.scheduler.stats().frames_failed, 1);
    Ok(())
}

#[test]
fn broken_image_leaves_a_gap_in_the_ring() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let images = write_images(dir.path(), &["a.png", "broken.png", "c.png"])?;
    let mut rig = rig(dir.path(), images, &test_config(3, CarouselPolicy::Wrapping));
    rig.scheduler.activate()?;
    assert!(rig.scheduler.wait_for_loads(LOAD_TIMEOUT));

    let Some(FrameOutcome::Rendered(stats)) = rig.scheduler.pump() else {
        panic!("expected a rendered frame");
    };
    assert_eq!(stats.panels_drawn, 2);
    assert_eq!(stats.textured_panels, 2);
    assert_eq!(stats.placeholder_panels, 0);
    Ok(())
}

#[test]
fn unsupported_feature_fails_activation() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let images = write_images(dir.path(), &["a.png"])?;
    let mut rig = rig(dir.path(), images, &test_config(1, CarouselPolicy::Wrapping));
    rig.xr.set_supported_features(&[]);

    assert_eq!(
        rig.scheduler.activate(),
        Err(SessionUnavailableError::FeatureUnsupported(
            SessionFeature::HitTest
        ))
    );
    assert_eq!(rig.scheduler.state(), SchedulerState::Uninitialized);
    assert!(rig.renderer.attached().is_empty());
    assert_eq!(rig.scheduler.pump(), None);

    rig.xr.set_supported_features(&[SessionFeature::HitTest]);
    rig.scheduler.activate()?;
    assert_eq!(rig.scheduler.state(), SchedulerState::Active);
    Ok(())
}

#[test]
fn missing_surface_or_space_fails_activation() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let images = write_images(dir.path(), &["a.png"])?;
    let mut rig = rig(dir.path(), images, &test_config(1, CarouselPolicy::Wrapping));

    rig.renderer.set_surface_available(false);
    assert!(matches!(
        rig.scheduler.activate(),
        Err(SessionUnavailableError::SurfaceUnavailable(_))
    ));
    assert_eq!(rig.xr.sessions_granted(), 0);

    rig.renderer.set_surface_available(true);
    rig.xr.set_reference_spaces(&[ReferenceSpaceType::Viewer]);
    assert_eq!(
        rig.scheduler.activate(),
        Err(SessionUnavailableError::ReferenceSpaceUnavailable(
            ReferenceSpaceType::Local
        ))
    );
    assert!(!rig.xr.session_live());
    assert_eq!(rig.scheduler.state(), SchedulerState::Uninitialized);
    Ok(())
}

#[test]
fn activating_twice_is_an_error() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let images = write_images(dir.path(), &["a.png"])?;
    let mut rig = rig(dir.path(), images, &test_config(1, CarouselPolicy::Wrapping));
    rig.scheduler.activate()?;
    assert_eq!(
        rig.scheduler.activate(),
        Err(SessionUnavailableError::AlreadyActive)
    );
    assert_eq!(rig.scheduler.state(), SchedulerState::Active);
    Ok(())
}

#[test]
fn session_end_clears_the_scene() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let images = write_images(dir.path(), &["a.png", "b.png"])?;
    let mut rig = rig(dir.path(), images, &test_config(2, CarouselPolicy::Wrapping));
    rig.scheduler.activate()?;
    rig.scheduler.pump();

    rig.xr.end_session();
    assert_eq!(rig.scheduler.pump(), None);
    assert_eq!(rig.scheduler.state(), SchedulerState::Ended);
    assert!(rig.renderer.attached().is_empty());
    assert_eq!(rig.renderer.live_textures(), 0);
    Ok(())
}

#[test]
fn end_releases_everything() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let images = write_images(dir.path(), &["a.png", "b.png"])?;
    let mut rig = rig(dir.path(), images, &test_config(2, CarouselPolicy::Wrapping));
    rig.scheduler.activate()?;
    assert!(rig.scheduler.wait_for_loads(LOAD_TIMEOUT));
    rig.scheduler.pump();

    rig.scheduler.end();
    assert_eq!(rig.scheduler.state(), SchedulerState::Ended);
    assert!(!rig.xr.session_live());
    assert_eq!(rig.renderer.node_count(), 0);
    assert_eq!(rig.renderer.live_textures(), 0);
    assert_eq!(
        rig.scheduler.on_frame(&SimulatedFrame::new(0.0, None)),
        FrameOutcome::Inactive
    );
    Ok(())
}

#[test]
fn ended_scheduler_cannot_be_reactivated() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let images = write_images(dir.path(), &["a.png", "b.png"])?;
    let mut rig = rig(dir.path(), images, &test_config(2, CarouselPolicy::Wrapping));
    rig.scheduler.activate()?;
    rig.scheduler.end();

    assert_eq!(rig.scheduler.activate(), Err(SessionUnavailableError::Ended));
    assert_eq!(rig.scheduler.state(), SchedulerState::Ended);
    assert_eq!(rig.xr.sessions_granted(), 1);
    assert!(rig.renderer.attached().is_empty());
    Ok(())
}

#[test]
fn truncating_carousel_runs_out_of_images() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let images = write_images(dir.path(), &["a.png", "b.png", "c.png", "d.png"])?;
    let mut rig = rig(dir.path(), images, &test_config(2, CarouselPolicy::Truncating));
    rig.scheduler.activate()?;

    rig.xr.select();
    rig.scheduler.pump();
    assert_eq!(rig.renderer.attached().len(), 2);

    rig.xr.select();
    rig.scheduler.pump();
    assert!(rig.renderer.attached().is_empty());
    assert_eq!(rig.scheduler.stats().selects_handled, 2);
    Ok(())
}
