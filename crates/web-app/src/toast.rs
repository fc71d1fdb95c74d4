use std::{cell::RefCell, rc::Rc};

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::{Config, UiError, document};

const FIRST_OFFSET_PX: usize = 20;
const SPACING_PX: usize = 70;

#[derive(Debug, strum::Display, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

/// Distance from the top of the viewport of the toast in slot `index`.
#[must_use]
pub fn toast_offset(index: usize) -> usize {
    FIRST_OFFSET_PX + index * SPACING_PX
}

/// Occupies the lowest free slot and returns its index.
pub fn take_slot(slots: &mut Vec<bool>) -> usize {
    match slots.iter().position(|occupied| !occupied) {
        Some(index) => {
            slots[index] = true;
            index
        }
        None => {
            slots.push(true);
            slots.len() - 1
        }
    }
}

pub fn release_slot(slots: &mut Vec<bool>, index: usize) {
    if let Some(occupied) = slots.get_mut(index) {
        *occupied = false;
    }
    while slots.last() == Some(&false) {
        slots.pop();
    }
}

/// Transient notifications. Every call creates an independent element that removes itself
/// after the display duration plus the fade-out delay.
#[derive(Clone)]
pub struct Toasts {
    document: Document,
    slots: Rc<RefCell<Vec<bool>>>,
    duration_ms: u32,
    fade_ms: u32,
}

impl Toasts {
    /// # Errors
    ///
    /// Returns an error if no document is available.
    pub fn new(config: &Config) -> Result<Self, UiError> {
        Ok(Self::with_document(document()?, config))
    }

    #[must_use]
    pub fn with_document(document: Document, config: &Config) -> Self {
        Self {
            document,
            slots: Rc::new(RefCell::new(Vec::new())),
            duration_ms: config.toast_duration_ms,
            fade_ms: config.toast_fade_ms,
        }
    }

    #[must_use]
    pub fn visible(&self) -> usize {
        self.slots.borrow().iter().filter(|occupied| **occupied).count()
    }

    /// # Errors
    ///
    /// Returns an error if the toast could not be added to the document.
    pub fn show(&self, message: &str, kind: ToastKind) -> Result<(), UiError> {
        let toast = self
            .document
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| UiError::Dom("toast is not an HTML element".to_string()))?;
        toast.set_class_name(&format!("toast toast-{kind}"));
        toast.set_attribute("role", "status")?;
        toast.set_text_content(Some(message));

        let slot = take_slot(&mut self.slots.borrow_mut());
        if let Err(err) = self.place(&toast, slot) {
            release_slot(&mut self.slots.borrow_mut(), slot);
            return Err(err);
        }

        let slots = Rc::clone(&self.slots);
        let fade_ms = self.fade_ms;
        Timeout::new(self.duration_ms, move || {
            let _ = toast.class_list().add_1("fade-out");
            Timeout::new(fade_ms, move || {
                toast.remove();
                release_slot(&mut slots.borrow_mut(), slot);
            })
            .forget();
        })
        .forget();

        Ok(())
    }

    fn place(&self, toast: &HtmlElement, slot: usize) -> Result<(), UiError> {
        toast
            .style()
            .set_property("top", &format!("{}px", toast_offset(slot)))?;
        self.document
            .body()
            .ok_or(UiError::NoBody)?
            .append_child(toast)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the toast could not be added to the document.
    pub fn success(&self, message: &str) -> Result<(), UiError> {
        self.show(message, ToastKind::Success)
    }

    /// # Errors
    ///
    /// Returns an error if the toast could not be added to the document.
    pub fn error(&self, message: &str) -> Result<(), UiError> {
        self.show(message, ToastKind::Error)
    }
}
