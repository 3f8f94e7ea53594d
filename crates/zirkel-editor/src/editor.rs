//! The editor controller
//!
//! Owns everything the construction tool mutates: the scene, the view
//! transform, the pending construction, the cursor, delete mode, and the
//! color cycle. All mutation is routed through its methods, and the scene
//! is persisted after every completed mutation, so a snapshot reader never
//! observes an intermediate state.

use std::sync::Arc;
use std::time::{Duration, Instant};

use glam::Vec2;
use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, info};

use zirkel_core::{
    Scene, SceneEntry, Shape, ViewTransform, find_nearest_entry, find_nearest_point,
};

use crate::colors::ColorCycle;
use crate::config::EditorConfig;
use crate::construct::Construction;
use crate::input::InputEvent;
use crate::persist::{KeyValueStore, MemoryStore, SceneStore};

/// Shared editor handle for the input and rendering collaborators.
pub type SharedEditor = Arc<RwLock<Editor>>;

/// Wrap an editor for sharing.
pub fn create_shared_editor(editor: Editor) -> SharedEditor {
    Arc::new(RwLock::new(editor))
}

/// Editor error types
#[derive(Debug, Error)]
pub enum EditorError {
    /// A scene-reset payload that does not parse. This is the one input
    /// the editor rejects loudly instead of degrading.
    #[error("invalid scene data: {0}")]
    InvalidSceneData(#[from] serde_json::Error),
}

/// Largest wheel step honored per event.
const MAX_WHEEL_DELTA: f32 = 20.0;
/// Zoom speed per wheel delta unit.
const ZOOM_SPEED: f32 = 1.0 / 200.0;

/// Press/drag bookkeeping for click-vs-pan discrimination.
#[derive(Debug, Default)]
struct DragTracker {
    /// World position of the press, while the pointer is down.
    anchor: Option<Vec2>,
    /// Whether a qualifying move happened since the press.
    moving: bool,
    /// Moves before this instant are ignored, so a short press-and-release
    /// with incidental jitter still counts as a click.
    ignore_moves_until: Option<Instant>,
}

/// The construction editor.
pub struct Editor {
    scene: Scene,
    store: SceneStore,
    construction: Option<Construction>,
    /// Snapped cursor, shown to the renderer.
    cursor: Option<Vec2>,
    /// Last unsnapped pointer position, used for pan and zoom anchoring.
    raw_cursor: Option<Vec2>,
    drag: DragTracker,
    deleting: bool,
    colors: ColorCycle,
    config: EditorConfig,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Create an editor on the built-in default scene with an in-memory
    /// store.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_store(config, MemoryStore::new())
    }

    /// Create an editor backed by the given store, restoring the persisted
    /// scene if a usable one exists.
    pub fn with_store(config: EditorConfig, store: impl KeyValueStore + 'static) -> Self {
        let store = SceneStore::new(store);
        let scene = match store.load() {
            Some((scale, offset, shapes)) => {
                Scene::from_parts(scale, offset, shapes, config.default_scale)
            }
            None => Scene::new(config.default_scale),
        };

        Self {
            scene,
            store,
            construction: None,
            cursor: None,
            raw_cursor: None,
            drag: DragTracker::default(),
            deleting: false,
            colors: ColorCycle::default(),
            config,
        }
    }

    // ============== Render Snapshot ==============

    /// Committed entries in insertion order.
    pub fn entries(&self) -> &[SceneEntry] {
        self.scene.entries()
    }

    /// The shape the pending construction would commit, if one is pending.
    /// Derived from the pending state on every call.
    pub fn preview(&self) -> Option<Shape> {
        self.construction
            .as_ref()
            .map(|c| c.preview(self.colors.current()))
    }

    /// The snapped cursor position, if the pointer is over the surface.
    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    /// Current view transform.
    pub fn view(&self) -> ViewTransform {
        self.scene.view()
    }

    /// Whether delete mode is active.
    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// The color the next circle will take.
    pub fn current_color(&self) -> &'static str {
        self.colors.current()
    }

    // ============== Input ==============

    /// Dispatch a semantic input event.
    pub fn handle(&mut self, event: InputEvent) -> Result<(), EditorError> {
        match event {
            InputEvent::PointerDown { pos } => self.pointer_down(pos),
            InputEvent::PointerMove { pos, snap } => self.pointer_move(pos, snap),
            InputEvent::PointerUp {
                pos,
                alternate,
                snap,
            } => self.pointer_up(pos, alternate, snap),
            InputEvent::PointerLeave => self.pointer_leave(),
            InputEvent::Wheel { delta_y } => self.wheel(delta_y),
            InputEvent::Escape => self.escape(),
            InputEvent::Undo => self.undo(),
            InputEvent::NextColor => self.next_color(),
            InputEvent::ToggleDelete => self.toggle_delete(),
            InputEvent::ResetView => self.reset_view(),
            InputEvent::ResetScene { circles } => return self.reset_scene_json(&circles),
        }
        Ok(())
    }

    /// Pointer pressed: arm the drag tracker.
    pub fn pointer_down(&mut self, pos: Vec2) {
        self.raw_cursor = Some(pos);
        self.drag.anchor = Some(pos);
        self.drag.moving = false;
        self.drag.ignore_moves_until =
            Some(Instant::now() + Duration::from_millis(self.config.drag_delay_ms));
    }

    /// Pointer moved: pan while pressed, otherwise track the cursor and the
    /// pending construction.
    pub fn pointer_move(&mut self, pos: Vec2, snap: bool) {
        if let Some(anchor) = self.drag.anchor {
            if let Some(until) = self.drag.ignore_moves_until
                && Instant::now() < until
            {
                return;
            }

            self.scene.move_offset(pos - anchor);
            self.drag.moving = true;
            // The pan puts the anchor back under the pointer.
            self.raw_cursor = Some(anchor);
            self.persist();
        } else {
            self.raw_cursor = Some(pos);
            let snapped = self.snap(pos, snap);
            self.cursor = Some(snapped);
            if let Some(construction) = &mut self.construction {
                construction.set_cursor(snapped);
            }
        }
    }

    /// Pointer released: a press-and-release without a qualifying move is
    /// a click.
    pub fn pointer_up(&mut self, pos: Vec2, alternate: bool, snap: bool) {
        let moved = self.drag.moving;
        let clicked = self.drag.anchor.is_some() && !moved;
        self.drag = DragTracker::default();

        if self.deleting && !moved {
            self.delete_nearest(pos);
            self.set_delete(false);
        } else if clicked {
            self.click(pos, alternate, snap);
        }
    }

    /// Pointer left the surface: drop the cursor and any press in flight.
    pub fn pointer_leave(&mut self) {
        self.drag = DragTracker::default();
        self.cursor = None;
        self.raw_cursor = None;
    }

    /// Zoom by a wheel step, keeping the world point under the cursor
    /// fixed.
    pub fn wheel(&mut self, delta_y: f32) {
        if delta_y == 0.0 {
            return;
        }

        let delta = delta_y.clamp(-MAX_WHEEL_DELTA, MAX_WHEEL_DELTA);
        let old_scale = self.scene.view().scale();
        self.scene.zoom(1.0 - delta * ZOOM_SPEED);
        self.persist();

        // Re-anchor the offset so the cursor's world position survives the
        // scale change; without a known cursor the zoom centers on the
        // screen center, which needs no correction.
        if let Some(cursor) = self.raw_cursor {
            let view = self.scene.view();
            let screen = (cursor + view.offset()) * old_scale;
            let moved = screen / view.scale() - view.offset();
            self.scene.move_offset(moved - cursor);
            self.persist();
        }
    }

    /// Discard the pending construction and leave delete mode. No scene
    /// mutation, nothing to persist.
    pub fn escape(&mut self) {
        self.construction = None;
        self.deleting = false;
    }

    /// Remove the most recently committed entry. A circle's auto-generated
    /// intersection points are stripped one per call, newest first.
    pub fn undo(&mut self) {
        if self.scene.delete_last().is_some() {
            self.persist();
        }
    }

    /// Advance the stroke color; the pending preview picks it up on the
    /// next query.
    pub fn next_color(&mut self) {
        self.colors.advance();
    }

    /// Toggle delete mode.
    pub fn toggle_delete(&mut self) {
        self.deleting = !self.deleting;
    }

    /// Set delete mode.
    pub fn set_delete(&mut self, deleting: bool) {
        self.deleting = deleting;
    }

    /// Set the view scale (clamped).
    pub fn set_scale(&mut self, scale: f32) {
        self.scene.set_scale(scale);
        self.persist();
    }

    /// Translate the view offset.
    pub fn move_offset(&mut self, delta: Vec2) {
        self.scene.move_offset(delta);
        self.persist();
    }

    /// Restore the default view transform.
    pub fn reset_view(&mut self) {
        self.scene.reset_view();
        self.persist();
    }

    /// Replace the whole scene and reset the view; any pending
    /// construction is discarded, since the marks it refers to are gone.
    pub fn reset_scene(&mut self, shapes: Vec<Shape>) {
        info!("scene reset to {} shape(s)", shapes.len());
        self.scene.reset(shapes);
        self.construction = None;
        self.persist();
    }

    /// Replace the whole scene from a raw JSON array of shapes.
    ///
    /// Unlike every other input, malformed data here is a hard error.
    pub fn reset_scene_json(&mut self, json: &str) -> Result<(), EditorError> {
        let shapes: Vec<Shape> = serde_json::from_str(json)?;
        self.reset_scene(shapes);
        Ok(())
    }

    // ============== Internals ==============

    fn click(&mut self, pos: Vec2, alternate: bool, snap: bool) {
        let p = self.snap(pos, snap);

        match &mut self.construction {
            None => {
                debug!("construction started at {p}");
                self.construction = Some(Construction::new(p));
            }
            Some(construction) if alternate && !construction.has_radius_reference() => {
                debug!("radius reference picked at {p}");
                construction.pick_radius_reference(p);
            }
            Some(construction) => {
                let shape = construction.preview(self.colors.current());
                self.construction = None;
                self.scene.commit(shape);
                self.persist();
            }
        }
    }

    fn delete_nearest(&mut self, pos: Vec2) {
        if let Some(id) = find_nearest_entry(pos, self.scene.entries(), self.snap_threshold())
            && self.scene.delete(id)
        {
            self.persist();
        }
    }

    fn snap(&self, pos: Vec2, snap: bool) -> Vec2 {
        if !snap {
            return pos;
        }
        find_nearest_point(pos, self.scene.entries(), self.snap_threshold()).unwrap_or(pos)
    }

    fn snap_threshold(&self) -> f32 {
        self.config.snap_distance / self.scene.view().scale()
    }

    fn persist(&mut self) {
        self.store.save(&self.scene);
    }
}
