//! Fixed-tick session driver.
//!
//! Replays a recorded gesture against a trail brush: events due at or before
//! each tick are delivered first, then the brush ticks, then the canvas is
//! flushed. Ticking and presenting never overlap.

use crate::input::PointerAdapter;
use crate::scene::{AppResult, SceneConfig};
use kurbo::Rect;
use ricochet_core::{Brush, BrushState, EdgeBoundary, PaintSurface, PixelCanvas, StampImage, TrailBrush};

/// Summary of a finished session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    /// Ticks run.
    pub ticks: u32,
    /// Dabs stamped over the whole session.
    pub dabs: usize,
    /// Ticks whose flush reported a dirty region.
    pub presented_frames: u32,
    /// Brush state after the last tick.
    pub final_state: BrushState,
}

/// Replay `scene` and return the painted canvas.
pub fn run_scene(scene: &SceneConfig) -> AppResult<(PixelCanvas, SessionReport)> {
    scene.validate()?;

    let mut canvas = PixelCanvas::filled(scene.width, scene.height, scene.background)?;
    let oracle = EdgeBoundary::from_rect(Rect::new(
        0.0,
        0.0,
        scene
            .brush
            .display_extent
            .map_or(scene.width as f64, |extent| extent.width),
        scene
            .brush
            .display_extent
            .map_or(scene.height as f64, |extent| extent.height),
    ));
    let stamp = StampImage::disc(scene.brush.stamp_size)?;
    let mut brush: Box<dyn Brush + '_> = Box::new(TrailBrush::new(
        (scene.width, scene.height),
        &oracle,
        &stamp,
        scene.brush.clone(),
    )?);
    let mut adapter = PointerAdapter::new(scene.canvas_offset);

    let events = scene.ordered_gesture();
    let mut pending = events.iter().peekable();
    let ticks = scene.total_ticks();
    let mut dabs = 0;
    let mut presented_frames = 0;

    log::info!(
        "Replaying {} events over {} ticks on a {}x{} canvas",
        events.len(),
        ticks,
        scene.width,
        scene.height
    );

    for tick in 0..ticks {
        let now_ms = tick as f64 * scene.tick_interval_ms;
        while let Some(event) = pending.next_if(|e| e.time_ms() <= now_ms) {
            adapter.dispatch(brush.as_mut(), event);
        }

        dabs += brush.tick(&mut canvas).len();
        if let Some(region) = canvas.flush() {
            presented_frames += 1;
            log::trace!("Tick {}: presenting {:?}", tick, region);
        }
    }

    let report = SessionReport {
        ticks,
        dabs,
        presented_frames,
        final_state: brush.state(),
    };
    brush.cleanup();
    log::info!("Session finished: {:?}", report);
    Ok((canvas, report))
}
