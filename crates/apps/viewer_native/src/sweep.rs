use foundation::math::Vec2;
use runtime::event_bus::Stamped;
use scene::World;
use scene::camera::{PickCamera, Viewport};
use scene::hover::{GlobeEvent, PickingController};
use tracing::{debug, info};

use crate::config::SweepConfig;

/// Pixel positions of the sweep, row by row, at cell centers.
pub fn sweep_positions(viewport: &Viewport, sweep: &SweepConfig) -> Vec<Vec2> {
    let (rows, cols) = (sweep.rows.max(1), sweep.columns.max(1));
    let mut out = Vec::with_capacity((rows * cols) as usize);
    for row in 0..rows {
        let y = viewport.top + (row as f64 + 0.5) / rows as f64 * viewport.height;
        for col in 0..cols {
            let x = viewport.left + (col as f64 + 0.5) / cols as f64 * viewport.width;
            out.push(Vec2::new(x, y));
        }
    }
    out
}

/// Drive `controller` along the sweep, clicking whenever a new country comes
/// under the pointer, then leave the canvas. Returns every emitted event.
pub fn run_sweep<C>(
    world: &mut World,
    camera: &C,
    viewport: &Viewport,
    controller: &mut PickingController,
    sweep: &SweepConfig,
) -> Vec<Stamped<GlobeEvent>>
where
    C: PickCamera + ?Sized,
{
    let mut log = Vec::new();
    for pos in sweep_positions(viewport, sweep) {
        controller.tick(sweep.frame_dt);
        let before = controller.hovered();
        let state = controller.on_pointer_move(world, camera, viewport, pos);
        if state.country().is_some() && state.country() != before {
            controller.on_click(world);
        }
        upload_dirty(world);
        log.extend(controller.drain_events());
    }

    controller.tick(sweep.frame_dt);
    controller.on_pointer_leave(world);
    upload_dirty(world);
    log.extend(controller.drain_events());

    for stamped in &log {
        info!(frame = stamped.frame_index, event = ?stamped.event, "globe event");
    }
    log
}

/// Stand-in for the renderer's buffer upload: clears dirty flags.
fn upload_dirty(world: &mut World) {
    let ids: Vec<_> = world.iter_countries().map(|(id, _)| id).collect();
    for id in ids {
        let Some(country) = world.country_mut(id) else {
            continue;
        };
        let render = country.render_handle();
        let uploaded = country
            .polylines_mut()
            .iter_mut()
            .map(|line| line.take_dirty())
            .filter(|dirty| *dirty)
            .count();
        if uploaded > 0 {
            debug!(handle = render.raw(), polylines = uploaded, "re-upload borders");
        }
    }
}
