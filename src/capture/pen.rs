//! Pen Capture - Freehand drawing state machine
//!
//! A press anywhere starts a gesture and attaches the gesture's own
//! move/release handlers; the release detaches them again. Samples that land
//! outside every surface are skipped without ending the gesture, so a stroke
//! survives the pointer briefly leaving the page. While capturing, the live
//! preview element is replaced on every sample; it is exclusively owned by
//! this machine for the duration of one gesture.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, trace};

use crate::annotation::{Annotation, Drawing};
use crate::events::{HandlerId, PointerEvent};
use crate::types::{PEN_COLOR, Point};
use crate::view::{GraphicId, NodeId};

use super::EngineCtx;

/// Pen configuration.
///
/// Snapshotted when a gesture starts: changing it mid-stroke affects the
/// next gesture, never the one in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct PenSettings {
    pub width: f32,
    pub color: String,
}

impl Default for PenSettings {
    fn default() -> Self {
        Self { width: 1.0, color: PEN_COLOR.to_owned() }
    }
}

/// Handlers attached by [`arm`]; [`disarm`] removes exactly these.
pub(crate) struct PenBinding {
    press: HandlerId,
    suppress: HandlerId,
}

/// In-progress stroke. Exists only between press and release.
#[derive(Default)]
struct Gesture {
    points: Vec<Point>,
    width: f32,
    color: String,
    preview: Option<(NodeId, GraphicId)>,
    transient: Option<(HandlerId, HandlerId)>,
}

/// Attach the press handler and the selection suppressor for pen mode.
pub(crate) fn arm(ctx: &EngineCtx, settings: Rc<RefCell<PenSettings>>) -> PenBinding {
    let gesture = Rc::new(RefCell::new(Gesture::default()));

    let press = {
        let ctx = ctx.clone();
        ctx.events.clone().on_press(move |_event| start_gesture(&ctx, &gesture, &settings))
    };
    let suppress = ctx.events.suppress_selection();

    debug!("pen mode armed");
    PenBinding { press, suppress }
}

/// Detach what [`arm`] attached.
///
/// A gesture already in flight keeps its transient handlers until its own
/// release fires, then detaches itself.
pub(crate) fn disarm(ctx: &EngineCtx, binding: PenBinding) {
    ctx.events.remove(binding.press);
    ctx.events.remove(binding.suppress);
    debug!("pen mode disarmed");
}

fn start_gesture(ctx: &EngineCtx, gesture: &Rc<RefCell<Gesture>>, settings: &Rc<RefCell<PenSettings>>) {
    {
        let mut g = gesture.borrow_mut();
        let pen = settings.borrow().clone();
        g.points.clear();
        g.width = pen.width;
        g.color = pen.color;

        if let Some((node, id)) = g.preview.take() {
            ctx.view.borrow_mut().remove_graphic(node, id);
        }

        // A second press before the release arrived: the previous gesture's
        // listeners are still attached and keep serving this one.
        if g.transient.is_some() {
            return;
        }
    }

    let move_id = {
        let ctx = ctx.clone();
        let gesture = Rc::clone(gesture);
        ctx.events.clone().on_move(move |event| sample(&ctx, &gesture, event))
    };
    let release_id = {
        let ctx = ctx.clone();
        let gesture = Rc::clone(gesture);
        ctx.events.clone().on_release(move |event| finish_gesture(&ctx, &gesture, event))
    };

    gesture.borrow_mut().transient = Some((move_id, release_id));
    trace!("pen gesture started");
}

fn sample(ctx: &EngineCtx, gesture: &Rc<RefCell<Gesture>>, event: &PointerEvent) {
    let mut view = ctx.view.borrow_mut();

    // Off-surface samples add no point but do not end the gesture.
    let Some(surface) = view.surface_at(event.x, event.y) else {
        return;
    };

    let offset = view.resolve_offset(surface);
    let mut g = gesture.borrow_mut();
    g.points.push(offset.localize(event.x, event.y));

    if g.points.len() < 2 {
        return;
    }

    if let Some((node, id)) = g.preview.take() {
        view.remove_graphic(node, id);
    }
    let element = ctx.renderer.render_path(&Drawing {
        width: g.width,
        color: g.color.clone(),
        lines: g.points.clone(),
    });
    g.preview = Some((surface, view.append_graphic(surface, element)));
}

fn finish_gesture(ctx: &EngineCtx, gesture: &Rc<RefCell<Gesture>>, event: &PointerEvent) {
    let mut g = gesture.borrow_mut();

    if let Some((move_id, release_id)) = g.transient.take() {
        ctx.events.remove(move_id);
        ctx.events.remove(release_id);
    }

    let preview = g.preview.take();
    let mut view = ctx.view.borrow_mut();
    let surface = view.surface_at(event.x, event.y);

    match surface {
        Some(surface) if g.points.len() > 1 => {
            let drawing = Drawing {
                width: g.width,
                color: g.color.clone(),
                lines: std::mem::take(&mut g.points),
            };

            let Some(info) = view.surface_info(surface).cloned() else {
                return;
            };
            ctx.store.borrow_mut().add_annotation(
                &info.document,
                info.page,
                Annotation::Drawing(drawing.clone()),
            );

            // The preview becomes the committed graphic: swap it for a final
            // render on the surface the stroke was committed to.
            if let Some((node, id)) = preview {
                view.remove_graphic(node, id);
            }
            let element = ctx.renderer.render_path(&drawing);
            view.append_graphic(surface, element);

            debug!(
                "committed drawing with {} points to page {} of {}",
                drawing.lines.len(),
                info.page,
                info.document
            );
        }
        _ => {
            if let Some((node, id)) = preview {
                view.remove_graphic(node, id);
            }
            debug!("pen gesture aborted with {} points", g.points.len());
            g.points.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = PenSettings::default();

        assert_eq!(settings.width, 1.0);
        assert_eq!(settings.color, "000000");
    }
}
