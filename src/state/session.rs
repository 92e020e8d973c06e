/// Session state and transitions
///
/// One `Session` per app run. It owns everything the controller
/// mutates: the uploaded photo, the selected style, the per-field
/// inputs, the generation result, the loading flag, and the error
/// message. The view derives everything else from here.

use crate::catalog::Catalog;
use crate::media::inline::InlineImage;
use crate::prompt::{self, TemplateInputs};

/// Shown when a failed generation carries no message of its own
const GENERIC_GENERATION_ERROR: &str = "An unknown error occurred during image generation.";

/// Shown when generate is somehow triggered without its preconditions
const PRECONDITION_ERROR: &str = "Please upload an image and select a style template first.";

/// Derived lifecycle stage, for the status line and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Nothing uploaded, nothing selected
    Empty,
    /// Something is missing; generate is disabled
    Incomplete,
    /// All preconditions met; generate is enabled
    Ready,
    /// A generation call is in flight
    Generating,
    /// Last generation produced an image
    Succeeded,
    /// Last generation failed
    Failed,
}

/// What the output pane should show (precedence top to bottom)
#[derive(Debug, PartialEq)]
pub enum OutputView<'a> {
    Loading,
    Error(&'a str),
    Generated(&'a InlineImage),
    Empty,
}

/// All mutable per-session state
#[derive(Debug, Clone, Default)]
pub struct Session {
    uploaded_image: Option<InlineImage>,
    selected_template_id: Option<String>,
    inputs: TemplateInputs,
    generated_image: Option<InlineImage>,
    loading: bool,
    error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    // ========== Accessors ==========

    pub fn uploaded_image(&self) -> Option<&InlineImage> {
        self.uploaded_image.as_ref()
    }

    pub fn generated_image(&self) -> Option<&InlineImage> {
        self.generated_image.as_ref()
    }

    pub fn selected_template_id(&self) -> Option<&str> {
        self.selected_template_id.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Current value for one field input (empty if never edited)
    pub fn input(&self, field_id: &str) -> &str {
        self.inputs
            .get(field_id)
            .map(String::as_str)
            .unwrap_or_default()
    }

    // ========== Transitions ==========

    /// Store a freshly uploaded product photo
    ///
    /// A new upload never clears a previous result or error; only the
    /// next generate action does that.
    pub fn set_uploaded_image(&mut self, image: InlineImage) {
        self.uploaded_image = Some(image);
    }

    /// Select a style template
    ///
    /// Field inputs always belong to the current selection, so they are
    /// cleared even when re-selecting the same template or one that
    /// shares field ids with the previous one.
    pub fn select_template(&mut self, template_id: &str) {
        self.selected_template_id = Some(template_id.to_string());
        self.inputs.clear();
    }

    /// Record a keystroke in one of the template's detail fields
    pub fn set_input(&mut self, field_id: &str, value: String) {
        self.inputs.insert(field_id.to_string(), value);
    }

    /// Whether the generate action is enabled
    ///
    /// Requires an uploaded image, a selected template that exists in
    /// the catalog, all declared fields filled (post-trim), and no
    /// generation already in flight. Validity is derived through the
    /// resolver so the button gate and the generate path agree.
    pub fn can_generate(&self, catalog: &Catalog) -> bool {
        if self.loading || self.uploaded_image.is_none() {
            return false;
        }
        match self.selected_template_id.as_deref().and_then(|id| catalog.get(id)) {
            Some(template) => prompt::resolve(template, &self.inputs).is_ok(),
            None => false,
        }
    }

    /// Start a generate action
    ///
    /// On success, flips to loading, clears the previous error and
    /// result, and hands back the source image plus the resolved
    /// prompt for the client call. Preconditions and validation are
    /// re-checked here even though the button gate should have caught
    /// them; a failure sets a user-visible error and returns None
    /// without touching the loading flag.
    pub fn begin_generate(&mut self, catalog: &Catalog) -> Option<(InlineImage, String)> {
        if self.loading {
            return None;
        }

        let Some(image) = self.uploaded_image.clone() else {
            self.error = Some(PRECONDITION_ERROR.to_string());
            return None;
        };

        let Some(template) = self
            .selected_template_id
            .as_deref()
            .and_then(|id| catalog.get(id))
        else {
            self.error = Some(PRECONDITION_ERROR.to_string());
            return None;
        };

        match prompt::resolve(template, &self.inputs) {
            Ok(resolved) => {
                self.loading = true;
                self.error = None;
                self.generated_image = None;
                Some((image, resolved))
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// Apply a settled generation result
    ///
    /// Success stores the image and clears the error; failure stores
    /// the message and clears the image. The two are never both set.
    pub fn finish_generate(&mut self, result: Result<InlineImage, String>) {
        self.loading = false;
        match result {
            Ok(image) => {
                self.generated_image = Some(image);
                self.error = None;
            }
            Err(message) => {
                self.generated_image = None;
                self.error = Some(if message.trim().is_empty() {
                    GENERIC_GENERATION_ERROR.to_string()
                } else {
                    message
                });
            }
        }
    }

    // ========== Derived views ==========

    /// What the output pane shows: loading beats error beats result
    pub fn output_view(&self) -> OutputView<'_> {
        if self.loading {
            OutputView::Loading
        } else if let Some(error) = self.error.as_deref() {
            OutputView::Error(error)
        } else if let Some(image) = self.generated_image.as_ref() {
            OutputView::Generated(image)
        } else {
            OutputView::Empty
        }
    }

    /// Derived lifecycle stage
    pub fn stage(&self, catalog: &Catalog) -> Stage {
        if self.loading {
            Stage::Generating
        } else if self.error.is_some() {
            Stage::Failed
        } else if self.generated_image.is_some() {
            Stage::Succeeded
        } else if self.can_generate(catalog) {
            Stage::Ready
        } else if self.uploaded_image.is_none() && self.selected_template_id.is_none() {
            Stage::Empty
        } else {
            Stage::Incomplete
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, TemplateField};

    fn catalog() -> Catalog {
        Catalog::builtin()
    }

    fn photo() -> InlineImage {
        InlineImage::new("image/png", vec![1, 2, 3])
    }

    fn result_image() -> InlineImage {
        InlineImage::new("image/png", vec![4, 5, 6])
    }

    /// A two-template catalog whose templates share a field id
    fn overlapping_catalog() -> Catalog {
        let base = catalog().get("luxury-magazine").unwrap().clone();

        let mut first = base.clone();
        first.id = "first".to_string();
        first.prompt = "first {shared}".to_string();
        first.fields = vec![field("shared")];

        let mut second = base;
        second.id = "second".to_string();
        second.prompt = "second {shared}".to_string();
        second.fields = vec![field("shared")];

        Catalog::new(vec![first, second])
    }

    fn field(id: &str) -> TemplateField {
        let template = catalog().get("luxury-magazine").unwrap().clone();
        let mut f = template.fields[0].clone();
        f.id = id.to_string();
        f.label = id.to_string();
        f
    }

    fn ready_session(template_id: &str) -> Session {
        let mut session = Session::new();
        session.set_uploaded_image(photo());
        session.select_template(template_id);
        session
    }

    #[test]
    fn test_fresh_session_is_empty() {
        let session = Session::new();
        assert_eq!(session.stage(&catalog()), Stage::Empty);
        assert_eq!(session.output_view(), OutputView::Empty);
        assert!(!session.can_generate(&catalog()));
    }

    #[test]
    fn test_generate_disabled_without_image() {
        let mut session = Session::new();
        session.select_template("minimalist-stone");
        assert!(!session.can_generate(&catalog()));
        assert_eq!(session.stage(&catalog()), Stage::Incomplete);
    }

    #[test]
    fn test_generate_disabled_without_template() {
        let mut session = Session::new();
        session.set_uploaded_image(photo());
        assert!(!session.can_generate(&catalog()));
        assert_eq!(session.stage(&catalog()), Stage::Incomplete);
    }

    #[test]
    fn test_generate_disabled_with_unknown_template() {
        let mut session = ready_session("minimalist-stone");
        session.select_template("does-not-exist");
        assert!(!session.can_generate(&catalog()));
    }

    #[test]
    fn test_ready_with_fieldless_template() {
        let session = ready_session("minimalist-stone");
        assert!(session.can_generate(&catalog()));
        assert_eq!(session.stage(&catalog()), Stage::Ready);
    }

    #[test]
    fn test_generate_disabled_until_fields_filled() {
        let mut session = ready_session("luxury-magazine");
        assert!(!session.can_generate(&catalog()));

        session.set_input("brand_name", "Acme".to_string());
        session.set_input("product_type", "handbag".to_string());
        session.set_input("magazine_name", "Vogue".to_string());
        assert!(!session.can_generate(&catalog()));

        // Whitespace does not count as filled
        session.set_input("background_color", "   ".to_string());
        assert!(!session.can_generate(&catalog()));

        session.set_input("background_color", "matte black".to_string());
        assert!(session.can_generate(&catalog()));
    }

    #[test]
    fn test_selecting_template_resets_inputs() {
        let overlapping = overlapping_catalog();
        let mut session = Session::new();
        session.set_uploaded_image(photo());
        session.select_template("first");
        session.set_input("shared", "value".to_string());
        assert!(session.can_generate(&overlapping));

        // The new template shares the field id, but the old value must
        // not carry over.
        session.select_template("second");
        assert_eq!(session.input("shared"), "");
        assert!(!session.can_generate(&overlapping));
    }

    #[test]
    fn test_reselecting_same_template_resets_inputs() {
        let mut session = ready_session("luxury-magazine");
        session.set_input("brand_name", "Acme".to_string());

        session.select_template("luxury-magazine");
        assert_eq!(session.input("brand_name"), "");
    }

    #[test]
    fn test_begin_generate_gates_on_loading() {
        let mut session = ready_session("minimalist-stone");
        assert!(session.begin_generate(&catalog()).is_some());
        assert!(session.is_loading());
        assert!(!session.can_generate(&catalog()));

        // A second generate while one is in flight is refused
        assert!(session.begin_generate(&catalog()).is_none());
    }

    #[test]
    fn test_begin_generate_clears_previous_result_and_error() {
        let mut session = ready_session("minimalist-stone");
        session.begin_generate(&catalog());
        session.finish_generate(Err("boom".to_string()));
        assert!(session.error().is_some());

        session.begin_generate(&catalog());
        assert_eq!(session.output_view(), OutputView::Loading);
        assert!(session.error().is_none());
        assert!(session.generated_image().is_none());
    }

    #[test]
    fn test_begin_generate_without_preconditions_sets_error() {
        // Bypass the button gate on purpose
        let mut session = Session::new();
        assert!(session.begin_generate(&catalog()).is_none());
        assert!(!session.is_loading());
        assert_eq!(
            session.error(),
            Some("Please upload an image and select a style template first.")
        );
    }

    #[test]
    fn test_begin_generate_with_unfilled_fields_sets_validation_error() {
        let mut session = ready_session("luxury-magazine");
        assert!(session.begin_generate(&catalog()).is_none());
        assert!(!session.is_loading());
        let error = session.error().unwrap();
        assert!(error.contains("Brand Name"));
    }

    #[test]
    fn test_upload_preserves_previous_result() {
        let mut session = ready_session("minimalist-stone");
        session.begin_generate(&catalog());
        session.finish_generate(Ok(result_image()));
        assert!(session.generated_image().is_some());

        // A fresh upload does not retroactively clear the result
        session.set_uploaded_image(photo());
        assert!(session.generated_image().is_some());
    }

    #[test]
    fn test_result_and_error_are_mutually_exclusive() {
        let mut session = ready_session("minimalist-stone");

        session.begin_generate(&catalog());
        session.finish_generate(Ok(result_image()));
        assert!(session.generated_image().is_some());
        assert!(session.error().is_none());

        session.begin_generate(&catalog());
        session.finish_generate(Err("failed".to_string()));
        assert!(session.generated_image().is_none());
        assert!(session.error().is_some());
    }

    #[test]
    fn test_failure_without_message_gets_fallback() {
        let mut session = ready_session("minimalist-stone");
        session.begin_generate(&catalog());
        session.finish_generate(Err("  ".to_string()));
        assert_eq!(
            session.error(),
            Some("An unknown error occurred during image generation.")
        );
    }

    #[test]
    fn test_scenario_upload_select_generate_success() {
        // Upload, pick a no-fields style, generate with a client that
        // returns image X.
        let mut session = ready_session("minimalist-stone");

        let (source, prompt) = session.begin_generate(&catalog()).unwrap();
        assert_eq!(source, photo());
        assert_eq!(prompt, catalog().get("minimalist-stone").unwrap().prompt);
        assert_eq!(session.stage(&catalog()), Stage::Generating);

        session.finish_generate(Ok(result_image()));
        assert!(!session.is_loading());
        assert_eq!(session.generated_image(), Some(&result_image()));
        assert!(session.error().is_none());
        assert_eq!(session.stage(&catalog()), Stage::Succeeded);
        assert_eq!(session.output_view(), OutputView::Generated(&result_image()));
    }

    #[test]
    fn test_scenario_unfilled_field_blocks_generation() {
        // Fields-bearing template with brand_name left empty: the
        // action is disabled, and a programmatic bypass produces a
        // validation message instead of a call.
        let mut session = ready_session("luxury-magazine");
        session.set_input("product_type", "handbag".to_string());
        session.set_input("magazine_name", "Vogue".to_string());
        session.set_input("background_color", "white".to_string());

        assert!(!session.can_generate(&catalog()));
        assert!(session.begin_generate(&catalog()).is_none());
        assert!(session.error().is_some());
    }

    #[test]
    fn test_scenario_generation_failure_surfaces_message() {
        // Generate with a client failing with "quota exceeded".
        let mut session = ready_session("minimalist-stone");
        session.begin_generate(&catalog()).unwrap();

        session.finish_generate(Err("quota exceeded".to_string()));
        assert!(!session.is_loading());
        assert!(session.generated_image().is_none());
        assert_eq!(session.error(), Some("quota exceeded"));
        assert_eq!(session.stage(&catalog()), Stage::Failed);
        assert_eq!(session.output_view(), OutputView::Error("quota exceeded"));

        // The session survives for a retry: photo and template intact
        assert!(session.uploaded_image().is_some());
        assert_eq!(session.selected_template_id(), Some("minimalist-stone"));
        assert!(session.can_generate(&catalog()));
    }
}
