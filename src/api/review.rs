//! Grammar review session
//!
//! JavaScript handle around an [`AnnotationController`]. One session per
//! editor pane; every call is synchronous and the returned values are
//! plain JS objects.

use wasm_bindgen::prelude::*;
use crate::api::helpers::{
    annotation_error, annotations_from_js, config_from_js, selection_from_js, serialize,
    validation_error,
};
use crate::api::types::{CommitView, SegmentView};
use crate::models::AnnotationId;
use crate::review::AnnotationController;
use crate::{wasm_info, wasm_log, wasm_warn};

/// Review session over one base text and its grammar annotations
#[wasm_bindgen]
pub struct ReviewSession {
    controller: AnnotationController,
}

#[wasm_bindgen]
impl ReviewSession {
    /// Create a session from a classification result
    ///
    /// # Parameters
    /// - `base_text`: Text the annotations were produced against
    /// - `annotations_js`: Array of annotation objects (`undefined` for none)
    /// - `config_js`: Optional engine config object
    ///
    /// # Returns
    /// The session, or an `AnnotationError:<kind>` error when the
    /// annotations are out of range, overlap, or repeat an id
    #[wasm_bindgen(constructor)]
    pub fn new(
        base_text: String,
        annotations_js: JsValue,
        config_js: JsValue,
    ) -> Result<ReviewSession, JsValue> {
        let config = config_from_js(config_js)?;
        let annotations = annotations_from_js(annotations_js)?;
        wasm_info!(
            "ReviewSession::new: {} annotations, text length {}",
            annotations.len(),
            base_text.len()
        );

        let controller = AnnotationController::from_config(base_text, annotations, &config)
            .map_err(annotation_error)?;
        Ok(ReviewSession { controller })
    }

    #[wasm_bindgen(getter, js_name = baseText)]
    pub fn base_text(&self) -> String {
        self.controller.base_text().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> u32 {
        self.controller.generation()
    }

    #[wasm_bindgen(getter, js_name = annotationCount)]
    pub fn annotation_count(&self) -> usize {
        self.controller.len()
    }

    /// Segments covering the base text, each annotated one with its state
    ///
    /// # Returns
    /// Array of `{ text, start, end, annotation?, state? }`
    #[wasm_bindgen(js_name = segments)]
    pub fn segments(&self) -> Result<JsValue, JsValue> {
        let views: Vec<SegmentView> = self.controller.segments().map(SegmentView::from).collect();
        wasm_log!("segments: {} runs", views.len());
        serialize(&views, "Segment serialization error")
    }

    /// Current review state of one annotation
    #[wasm_bindgen(js_name = stateOf)]
    pub fn state_of(&self, id: &str) -> Result<String, JsValue> {
        self.controller
            .state(&AnnotationId::new(id))
            .map(|state| state.as_str().to_string())
            .map_err(annotation_error)
    }

    /// Mark an annotation accepted (repeating the call changes nothing)
    ///
    /// # Returns
    /// The new state, always `"accepted"`
    #[wasm_bindgen(js_name = toggleAccept)]
    pub fn toggle_accept(&mut self, id: &str) -> Result<String, JsValue> {
        let state = self
            .controller
            .toggle_accept(&AnnotationId::new(id))
            .map_err(annotation_error)?;
        wasm_log!("toggleAccept({}) -> {}", id, state.as_str());
        Ok(state.as_str().to_string())
    }

    /// Mark an annotation rejected (repeating the call changes nothing)
    ///
    /// # Returns
    /// The new state, always `"rejected"`
    #[wasm_bindgen(js_name = toggleReject)]
    pub fn toggle_reject(&mut self, id: &str) -> Result<String, JsValue> {
        let state = self
            .controller
            .toggle_reject(&AnnotationId::new(id))
            .map_err(annotation_error)?;
        wasm_log!("toggleReject({}) -> {}", id, state.as_str());
        Ok(state.as_str().to_string())
    }

    /// Mark every annotation accepted; returns how many changed
    #[wasm_bindgen(js_name = acceptAll)]
    pub fn accept_all(&mut self) -> usize {
        self.controller.accept_all()
    }

    /// Mark every annotation rejected; returns how many changed
    #[wasm_bindgen(js_name = rejectAll)]
    pub fn reject_all(&mut self) -> usize {
        self.controller.reject_all()
    }

    #[wasm_bindgen(js_name = clearDecisions)]
    pub fn clear_decisions(&mut self) -> usize {
        self.controller.clear_decisions()
    }

    #[wasm_bindgen(js_name = undo)]
    pub fn undo(&mut self) -> bool {
        self.controller.undo()
    }

    #[wasm_bindgen(js_name = redo)]
    pub fn redo(&mut self) -> bool {
        self.controller.redo()
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.controller.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.controller.can_redo()
    }

    /// Apply edits to the base text
    ///
    /// # Parameters
    /// - `selection_js`: Optional array of ids. When omitted, every
    ///   accepted annotation is applied.
    ///
    /// # Returns
    /// `{ newText, appliedCount, generation, noOp }`. The session moves to
    /// a new generation with no annotations, even when nothing was applied.
    #[wasm_bindgen(js_name = commit)]
    pub fn commit(&mut self, selection_js: JsValue) -> Result<JsValue, JsValue> {
        let selection = selection_from_js(selection_js)?;
        let outcome = self
            .controller
            .commit(selection.as_deref())
            .map_err(annotation_error)?;

        if outcome.is_noop() {
            wasm_warn!("commit: nothing to apply");
        } else {
            wasm_info!("commit: applied {} edits", outcome.applied_count);
        }

        let view = CommitView::new(outcome, self.controller.generation());
        serialize(&view, "Commit serialization error")
    }

    /// Start a new generation from a fresh classification result
    ///
    /// The current generation is kept when the new annotations are invalid.
    #[wasm_bindgen(js_name = reset)]
    pub fn reset(&mut self, base_text: String, annotations_js: JsValue) -> Result<(), JsValue> {
        let annotations = annotations_from_js(annotations_js)?;
        self.controller
            .reset(base_text, annotations)
            .map_err(annotation_error)
    }

    /// Snapshot of the current generation for the export panel
    #[wasm_bindgen(js_name = report)]
    pub fn report(&self) -> Result<JsValue, JsValue> {
        serialize(&self.controller.report(), "Report serialization error")
    }

    /// Same as `report`, as a JSON string
    #[wasm_bindgen(js_name = reportJson)]
    pub fn report_json(&self) -> Result<String, JsValue> {
        self.controller
            .report()
            .to_json()
            .map_err(|e| validation_error(format!("Report serialization error: {}", e)))
    }
}
