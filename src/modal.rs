use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::observable::Observable;

const DEFAULT_CONFIRM_TEXT: &str = "Yes";
const DEFAULT_CANCEL_TEXT: &str = "Cancel";

/// Configuration accepted by [`ModalService::show`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalOptions {
    /// Whether the dialog offers a confirm button alongside cancel.
    pub show_confirm: bool,
    /// Confirm button label; `None` means "Yes".
    pub confirm_text: Option<String>,
    /// Cancel button label; `None` means "Cancel".
    pub cancel_text: Option<String>,
}

/// Completion handle for a shown modal.
///
/// Resolves exactly once, to `true` via the confirm path or `false` via
/// cancel, or never, if the modal was replaced or force-hidden while still
/// pending. Clones share the same outcome.
#[derive(Debug, Clone)]
pub struct ModalResponse {
    outcome: Rc<Cell<Option<bool>>>,
}

impl ModalResponse {
    /// `Some(choice)` once resolved; `None` while pending (or forever, for
    /// an abandoned handle).
    pub fn result(&self) -> Option<bool> {
        self.outcome.get()
    }

    pub fn is_pending(&self) -> bool {
        self.outcome.get().is_none()
    }
}

/// The dialog currently on screen: display fields plus the two completion
/// callbacks the rendering layer wires to its buttons.
#[derive(Clone)]
pub struct ModalDescriptor {
    pub title: String,
    pub message: String,
    pub show_confirm: bool,
    pub confirm_text: String,
    pub cancel_text: String,
    on_confirm: Rc<dyn Fn()>,
    on_cancel: Rc<dyn Fn()>,
}

impl ModalDescriptor {
    /// Confirm path: clears the current modal and resolves its handle with
    /// `true`.
    pub fn confirm(&self) {
        (self.on_confirm)();
    }

    /// Cancel or dismiss path: clears the current modal and resolves its
    /// handle with `false`.
    pub fn cancel(&self) {
        (self.on_cancel)();
    }
}

impl fmt::Debug for ModalDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalDescriptor")
            .field("title", &self.title)
            .field("message", &self.message)
            .field("show_confirm", &self.show_confirm)
            .field("confirm_text", &self.confirm_text)
            .field("cancel_text", &self.cancel_text)
            .finish_non_exhaustive()
    }
}

/// Holds at most one pending dialog. Showing a new one silently replaces a
/// pending one, whose handle then never resolves.
pub struct ModalService {
    pub current: Observable<Option<ModalDescriptor>>,
}

impl Default for ModalService {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalService {
    pub fn new() -> Self {
        Self {
            current: Observable::new(None),
        }
    }

    /// Installs a dialog and returns its completion handle. Resolution goes
    /// through the descriptor's completion callbacks; whichever fires first
    /// wins, later calls hit the resolve-once guard and change nothing.
    pub fn show(&self, title: &str, message: &str, options: ModalOptions) -> ModalResponse {
        let outcome = Rc::new(Cell::new(None));
        let response = ModalResponse {
            outcome: Rc::clone(&outcome),
        };

        let on_confirm: Rc<dyn Fn()> = {
            let current = self.current.clone();
            let outcome = Rc::clone(&outcome);
            Rc::new(move || {
                current.set(None);
                if outcome.get().is_none() {
                    outcome.set(Some(true));
                }
            })
        };
        let on_cancel: Rc<dyn Fn()> = {
            let current = self.current.clone();
            let outcome = Rc::clone(&outcome);
            Rc::new(move || {
                current.set(None);
                if outcome.get().is_none() {
                    outcome.set(Some(false));
                }
            })
        };

        self.current.set(Some(ModalDescriptor {
            title: title.to_string(),
            message: message.to_string(),
            show_confirm: options.show_confirm,
            confirm_text: options
                .confirm_text
                .unwrap_or_else(|| DEFAULT_CONFIRM_TEXT.to_string()),
            cancel_text: options
                .cancel_text
                .unwrap_or_else(|| DEFAULT_CANCEL_TEXT.to_string()),
            on_confirm,
            on_cancel,
        }));

        response
    }

    /// Notice-only dialog: no confirm button, cancel acts as "dismiss".
    pub fn alert(&self, title: &str, message: &str) -> ModalResponse {
        self.show(
            title,
            message,
            ModalOptions {
                show_confirm: false,
                ..Default::default()
            },
        )
    }

    /// Yes-or-cancel dialog with the default button labels.
    pub fn confirm(&self, title: &str, message: &str) -> ModalResponse {
        self.show(
            title,
            message,
            ModalOptions {
                show_confirm: true,
                ..Default::default()
            },
        )
    }

    /// Force-clears the current dialog without resolving it. A pending
    /// completion handle is abandoned and never resolves.
    pub fn hide(&self) {
        self.current.set(None);
    }
}
