//! Presentation collaborators.
//!
//! The core never owns dialog or page state. It talks to two collaborators:
//! - [`Presenter`] - dialogs and toasts; optional, may be missing or fail
//! - [`Page`] - rendering, navigation and user notices; always present
//!
//! [`OptionalPresenter`] is the capability wrapper the dispatcher queries
//! before relying on dialogs, so fallbacks are decided in one place.

use artvault_observability::StructuredLogger;
use serde::Serialize;
use thiserror::Error;

use crate::view::ShopView;

/// Dialogs the storefront can ask to open or close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialog {
    ProductDetail,
    Cart,
    CallPicker,
}

impl Dialog {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialog::ProductDetail => "product-detail",
            Dialog::Cart => "cart",
            Dialog::CallPicker => "call-picker",
        }
    }
}

/// Transient notification surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Toast {
    CartAdded,
}

impl Toast {
    pub fn message(&self) -> &'static str {
        match self {
            Toast::CartAdded => "Added to your cart",
        }
    }
}

/// Where a hand-off leaves the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Navigation {
    /// Dial a number (`tel:` link).
    Tel(String),
    /// Open an external URL in a new window.
    External(String),
}

impl Navigation {
    pub fn href(&self) -> String {
        match self {
            Navigation::Tel(number) => format!("tel:{}", number),
            Navigation::External(url) => url.clone(),
        }
    }
}

/// Messages surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Notice {
    CheckoutComplete,
    ContactDelivered,
    ContactInvalid,
    PhoneUnavailable,
    WhatsAppUnavailable,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::CheckoutComplete => "Checkout simulated \u{2014} thank you!",
            Notice::ContactDelivered => "Your message has been delivered successfully!",
            Notice::ContactInvalid => "Please fill in all required fields correctly.",
            Notice::PhoneUnavailable => "Phone number not available or invalid.",
            Notice::WhatsAppUnavailable => {
                "Phone number not available or not suitable for WhatsApp (needs country code)."
            }
        }
    }

    /// Blocking notices must be acknowledged before the user continues.
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            Notice::CheckoutComplete | Notice::PhoneUnavailable | Notice::WhatsAppUnavailable
        )
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Notice::ContactInvalid | Notice::PhoneUnavailable | Notice::WhatsAppUnavailable
        )
    }
}

/// Failure reported by a presentation collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct PresentError(pub String);

/// Dialog and toast host.
pub trait Presenter {
    fn show(&mut self, dialog: Dialog) -> Result<(), PresentError>;
    fn hide(&mut self, dialog: Dialog) -> Result<(), PresentError>;
    fn show_toast(&mut self, toast: Toast) -> Result<(), PresentError>;
}

/// The page the storefront is mounted in.
pub trait Page {
    /// Render a freshly projected view.
    fn render(&mut self, view: &ShopView);
    /// Briefly emphasize the cart count badge.
    fn pulse_badge(&mut self);
    /// Leave the page for a hand-off target.
    fn navigate(&mut self, target: &Navigation);
    /// Surface a message to the user.
    fn notify(&mut self, notice: Notice);
}

/// A presenter that may be absent.
///
/// Every call is contained: failures are logged and reported as `false`,
/// never propagated.
pub struct OptionalPresenter {
    inner: Option<Box<dyn Presenter>>,
    logger: StructuredLogger,
}

impl OptionalPresenter {
    pub fn new(inner: Option<Box<dyn Presenter>>, logger: StructuredLogger) -> Self {
        Self { inner, logger }
    }

    /// A wrapper with no presenter behind it.
    pub fn absent(logger: StructuredLogger) -> Self {
        Self::new(None, logger)
    }

    pub fn is_available(&self) -> bool {
        self.inner.is_some()
    }

    /// Open a dialog. Returns whether it actually opened.
    pub fn try_show(&mut self, dialog: Dialog) -> bool {
        let Some(presenter) = self.inner.as_mut() else {
            self.logger.debug_builder("presenter absent").field("dialog", dialog.as_str()).emit();
            return false;
        };
        match presenter.show(dialog) {
            Ok(()) => true,
            Err(e) => {
                self.logger.warn_with("dialog failed to open", &[("dialog", &dialog), ("error", &e.0)]);
                false
            }
        }
    }

    /// Close a dialog. Returns whether it actually closed.
    pub fn try_hide(&mut self, dialog: Dialog) -> bool {
        let Some(presenter) = self.inner.as_mut() else {
            return false;
        };
        match presenter.hide(dialog) {
            Ok(()) => true,
            Err(e) => {
                self.logger.warn_with("dialog failed to close", &[("dialog", &dialog), ("error", &e.0)]);
                false
            }
        }
    }

    /// Show a toast. Returns whether it was shown.
    pub fn try_toast(&mut self, toast: Toast) -> bool {
        let Some(presenter) = self.inner.as_mut() else {
            return false;
        };
        match presenter.show_toast(toast) {
            Ok(()) => true,
            Err(e) => {
                self.logger.warn_with("toast failed", &[("toast", &toast), ("error", &e.0)]);
                false
            }
        }
    }
}

impl std::fmt::Debug for OptionalPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionalPresenter")
            .field("available", &self.is_available())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl Presenter for Broken {
        fn show(&mut self, _dialog: Dialog) -> Result<(), PresentError> {
            Err(PresentError("modal library missing".into()))
        }
        fn hide(&mut self, _dialog: Dialog) -> Result<(), PresentError> {
            Err(PresentError("modal library missing".into()))
        }
        fn show_toast(&mut self, _toast: Toast) -> Result<(), PresentError> {
            Err(PresentError("toast library missing".into()))
        }
    }

    #[test]
    fn test_absent_presenter_reports_false() {
        let mut presenter = OptionalPresenter::absent(StructuredLogger::quiet());
        assert!(!presenter.is_available());
        assert!(!presenter.try_show(Dialog::Cart));
        assert!(!presenter.try_hide(Dialog::Cart));
        assert!(!presenter.try_toast(Toast::CartAdded));
    }

    #[test]
    fn test_failures_are_contained_and_logged() {
        let (logger, lines) = StructuredLogger::quiet()
            .with_min_level(artvault_observability::LogLevel::Warn)
            .capturing();
        let mut presenter = OptionalPresenter::new(Some(Box::new(Broken)), logger);

        assert!(presenter.is_available());
        assert!(!presenter.try_show(Dialog::ProductDetail));
        assert!(!presenter.try_toast(Toast::CartAdded));

        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("dialog failed to open"));
        assert!(lines[0].contains("modal library missing"));
    }

    #[test]
    fn test_navigation_href() {
        assert_eq!(Navigation::Tel("+15550100".into()).href(), "tel:+15550100");
        assert_eq!(
            Navigation::External("https://wa.me/15550100".into()).href(),
            "https://wa.me/15550100"
        );
    }

    #[test]
    fn test_notice_flags() {
        assert!(Notice::PhoneUnavailable.is_blocking());
        assert!(!Notice::ContactDelivered.is_blocking());
        assert!(Notice::ContactInvalid.is_error());
    }
}
