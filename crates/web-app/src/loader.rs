use web_sys::{Document, Element};

use crate::{UiError, document};

const OVERLAY_ID: &str = "loading-overlay";
const MESSAGE_CLASS: &str = "loading-message";

/// Full-page loading overlay. There is at most one overlay per document; showing it again
/// only replaces its message.
pub struct Loader {
    document: Document,
}

impl Loader {
    /// # Errors
    ///
    /// Returns an error if no document is available.
    pub fn new() -> Result<Self, UiError> {
        Ok(Self::with_document(document()?))
    }

    #[must_use]
    pub fn with_document(document: Document) -> Self {
        Self { document }
    }

    /// # Errors
    ///
    /// Returns an error if the overlay could not be created.
    pub fn show(&self, message: &str) -> Result<(), UiError> {
        if let Some(overlay) = self.overlay() {
            if let Some(text) = overlay.get_elements_by_class_name(MESSAGE_CLASS).item(0) {
                text.set_text_content(Some(message));
            }
            return Ok(());
        }

        let overlay = self.document.create_element("div")?;
        overlay.set_id(OVERLAY_ID);
        overlay.set_class_name("loading-overlay");

        let spinner = self.document.create_element("div")?;
        spinner.set_class_name("loading-spinner");
        overlay.append_child(&spinner)?;

        let text = self.document.create_element("p")?;
        text.set_class_name(MESSAGE_CLASS);
        text.set_text_content(Some(message));
        overlay.append_child(&text)?;

        self.document
            .body()
            .ok_or(UiError::NoBody)?
            .append_child(&overlay)?;
        Ok(())
    }

    pub fn hide(&self) {
        if let Some(overlay) = self.overlay() {
            overlay.remove();
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.overlay().is_some()
    }

    fn overlay(&self) -> Option<Element> {
        self.document.get_element_by_id(OVERLAY_ID)
    }
}
