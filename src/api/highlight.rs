//! AI-detection and plagiarism highlighting
//!
//! Read-only handle: segments and a coverage summary, nothing to decide.

use wasm_bindgen::prelude::*;
use crate::api::helpers::{annotation_error, annotations_from_js, config_from_js, serialize};
use crate::api::types::SegmentView;
use crate::highlight::HighlightProjector;
use crate::wasm_info;

#[wasm_bindgen]
pub struct HighlightView {
    projector: HighlightProjector,
}

#[wasm_bindgen]
impl HighlightView {
    /// Create a view from a detection result
    ///
    /// # Parameters
    /// - `base_text`: Text the detector ran on
    /// - `annotations_js`: Array of flag annotations
    /// - `config_js`: Optional engine config (`minConfidence` hides weak flags)
    #[wasm_bindgen(constructor)]
    pub fn new(
        base_text: String,
        annotations_js: JsValue,
        config_js: JsValue,
    ) -> Result<HighlightView, JsValue> {
        let config = config_from_js(config_js)?;
        let annotations = annotations_from_js(annotations_js)?;
        let projector = HighlightProjector::from_config(base_text, annotations, &config)
            .map_err(annotation_error)?;
        wasm_info!(
            "HighlightView::new: {} annotations, threshold {:.2}",
            projector.spans().len(),
            projector.min_confidence()
        );
        Ok(HighlightView { projector })
    }

    #[wasm_bindgen(getter, js_name = baseText)]
    pub fn base_text(&self) -> String {
        self.projector.base_text().to_string()
    }

    /// Segments covering the base text; flags under the threshold are plain
    #[wasm_bindgen(js_name = segments)]
    pub fn segments(&self) -> Result<JsValue, JsValue> {
        let views: Vec<SegmentView> = self.projector.segments().map(SegmentView::from).collect();
        serialize(&views, "Segment serialization error")
    }

    /// `{ totalLength, flaggedLength, coverage, meanConfidence, visible, hidden, byKind }`
    #[wasm_bindgen(js_name = summary)]
    pub fn summary(&self) -> Result<JsValue, JsValue> {
        serialize(&self.projector.summary(), "Summary serialization error")
    }
}
