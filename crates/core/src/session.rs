//! Edit-session state machine for a single product form.
//!
//! An [`EditSession`] owns the not-yet-committed values of one product while
//! it is being edited. It is seeded from a [`ProductPage`], mutated by form
//! events, and produces a [`Submission`] once the values pass validation.
//! Dropping the session discards the edit; nothing is persisted from here.
//!
//! # Title display
//!
//! ```text
//!            enter_title_edit()
//!   Display ------------------> Editing
//!      ^                           |
//!      +---------------------------+
//!        exit_title_edit()  (edit mode only)
//! ```
//!
//! A new product starts (and stays) in `Editing`: there is no saved title to
//! display yet.

use crate::types::{FieldErrors, Intent, Mode, ProductDraft, ProductPage, Target, parse_quantity};

/// Prompt shown before a product is deleted.
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this product?";

/// Whether the title is shown as text or as an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TitleState {
    /// Read-only text; activating it switches to `Editing`.
    Display,
    /// Free-text input.
    Editing,
}

impl TitleState {
    /// Starting state for a page in the given mode.
    #[must_use]
    pub const fn initial(mode: Mode) -> Self {
        match mode {
            Mode::New => Self::Editing,
            Mode::Edit => Self::Display,
        }
    }
}

/// A write ready to be sent to the product write handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Save(ProductDraft),
    Delete,
}

impl Submission {
    #[must_use]
    pub const fn intent(&self) -> Intent {
        match self {
            Self::Save(_) => Intent::Save,
            Self::Delete => Intent::Delete,
        }
    }

    /// Form-encoded fields for posting this submission.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("intent", self.intent().as_str().to_owned())];
        if let Self::Save(draft) = self {
            fields.push(("title", draft.title.clone()));
            fields.push(("quantity", draft.quantity.to_string()));
        }
        fields
    }
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    /// Returns `true` if the user accepted.
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// In-progress edit of one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    loaded: ProductPage,
    title: String,
    quantity: i32,
    title_state: TitleState,
    errors: FieldErrors,
}

impl EditSession {
    /// Start a session from freshly loaded page data.
    #[must_use]
    pub fn new(page: ProductPage) -> Self {
        let title_state = TitleState::initial(page.mode());
        Self {
            title: page.product().title.clone(),
            quantity: page.product().quantity,
            loaded: page,
            title_state,
            errors: FieldErrors::default(),
        }
    }

    /// Re-seed from newly loaded page data.
    ///
    /// Title and quantity always snap to the loaded values. When the page is
    /// for a different product the title state and errors go back to their
    /// defaults for the new page's mode; a reload of the same product keeps
    /// them.
    pub fn reload(&mut self, page: ProductPage) {
        if page.target() != self.loaded.target() {
            self.title_state = TitleState::initial(page.mode());
            self.errors = FieldErrors::default();
        }
        self.title.clone_from(&page.product().title);
        self.quantity = page.product().quantity;
        self.loaded = page;
    }

    pub fn on_title_changed(&mut self, value: impl Into<String>) {
        self.title = value.into();
        if self.errors.title.is_some() && FieldErrors::check(&self.title, 0).title.is_none() {
            self.errors.title = None;
        }
    }

    /// Apply raw quantity input; unparsable text counts as 0.
    pub fn on_quantity_changed(&mut self, raw: &str) {
        self.quantity = parse_quantity(raw);
        if self.errors.quantity.is_some() && self.quantity >= 0 {
            self.errors.quantity = None;
        }
    }

    pub const fn enter_title_edit(&mut self) {
        self.title_state = TitleState::Editing;
    }

    /// Leave title editing. Has no effect on a new product.
    pub const fn exit_title_edit(&mut self) {
        if matches!(self.loaded.mode(), Mode::Edit) {
            self.title_state = TitleState::Display;
        }
    }

    /// Validate the current values and produce a save submission.
    ///
    /// # Errors
    ///
    /// Returns the field errors (which also become visible on the session)
    /// if validation fails; nothing is submitted in that case.
    pub fn save(&mut self) -> Result<Submission, FieldErrors> {
        let draft = self.draft();
        self.errors = FieldErrors::check(&draft.title, draft.quantity);
        if self.errors.is_empty() {
            Ok(Submission::Save(draft))
        } else {
            Err(self.errors.clone())
        }
    }

    /// Restore the last loaded values and clear all errors.
    pub fn reset(&mut self) {
        self.title.clone_from(&self.loaded.product().title);
        self.quantity = self.loaded.product().quantity;
        self.errors = FieldErrors::default();
    }

    /// Ask for confirmation and produce a delete submission.
    ///
    /// Returns `None` if the user declines, or if the product was never saved
    /// (there is nothing to delete).
    pub fn delete(&mut self, mut confirm: impl Confirm) -> Option<Submission> {
        if self.loaded.mode().is_new() {
            return None;
        }
        confirm
            .confirm(DELETE_CONFIRMATION)
            .then_some(Submission::Delete)
    }

    /// Current values as a draft.
    #[must_use]
    pub fn draft(&self) -> ProductDraft {
        ProductDraft::new(self.title.clone(), self.quantity)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn quantity(&self) -> i32 {
        self.quantity
    }

    #[must_use]
    pub const fn title_state(&self) -> TitleState {
        self.title_state
    }

    #[must_use]
    pub const fn is_title_editing(&self) -> bool {
        matches!(self.title_state, TitleState::Editing)
    }

    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.loaded.mode()
    }

    #[must_use]
    pub const fn target(&self) -> Target {
        self.loaded.target()
    }

    /// The page this session was last seeded from.
    #[must_use]
    pub const fn loaded(&self) -> &ProductPage {
        &self.loaded
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::types::{Product, ProductId, QUANTITY_NEGATIVE_MESSAGE, TITLE_REQUIRED_MESSAGE};

    fn stored(title: &str, quantity: i32) -> Product {
        Product {
            id: ProductId::generate(),
            title: title.to_owned(),
            quantity,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn edit_session(title: &str, quantity: i32) -> EditSession {
        EditSession::new(ProductPage::existing(&stored(title, quantity)))
    }

    #[test]
    fn test_initial_title_state_follows_mode() {
        let session = EditSession::new(ProductPage::new_product());
        assert_eq!(session.title_state(), TitleState::Editing);
        assert_eq!(session.title(), "");
        assert_eq!(session.quantity(), 0);

        let session = edit_session("Widget", 5);
        assert_eq!(session.title_state(), TitleState::Display);
        assert_eq!(session.title(), "Widget");
        assert_eq!(session.quantity(), 5);
    }

    #[test]
    fn test_save_blocks_blank_title() {
        let mut session = EditSession::new(ProductPage::new_product());

        let errors = session.save().unwrap_err();
        assert_eq!(errors.title.as_deref(), Some(TITLE_REQUIRED_MESSAGE));
        assert_eq!(session.errors().title.as_deref(), Some(TITLE_REQUIRED_MESSAGE));

        session.on_title_changed("Widget");
        assert_eq!(session.errors().title, None);
    }

    #[test]
    fn test_whitespace_title_does_not_clear_error() {
        let mut session = EditSession::new(ProductPage::new_product());
        session.save().unwrap_err();

        session.on_title_changed("   ");
        assert!(session.errors().title.is_some());
    }

    #[test]
    fn test_title_change_without_error_does_not_validate() {
        let mut session = edit_session("Widget", 5);
        session.on_title_changed("");
        assert!(session.errors().is_empty());
    }

    #[test]
    fn test_save_blocks_negative_quantity_and_clears_on_fix() {
        let mut session = edit_session("Widget", 5);
        session.on_quantity_changed("-2");

        let errors = session.save().unwrap_err();
        assert_eq!(errors.quantity.as_deref(), Some(QUANTITY_NEGATIVE_MESSAGE));
        assert_eq!(errors.title, None);

        session.on_quantity_changed("-1");
        assert!(session.errors().quantity.is_some());

        session.on_quantity_changed("0");
        assert_eq!(session.errors().quantity, None);
    }

    #[test]
    fn test_lenient_quantity_parse() {
        let mut session = edit_session("Widget", 5);
        session.on_quantity_changed("abc");
        assert_eq!(session.quantity(), 0);
        assert!(session.errors().is_empty());
    }

    #[test]
    fn test_save_produces_submission() {
        let mut session = EditSession::new(ProductPage::new_product());
        session.on_title_changed("Widget");
        session.on_quantity_changed("5");

        let submission = session.save().unwrap();
        assert_eq!(submission, Submission::Save(ProductDraft::new("Widget", 5)));
        assert_eq!(
            submission.form_fields(),
            vec![
                ("intent", "save".to_owned()),
                ("title", "Widget".to_owned()),
                ("quantity", "5".to_owned()),
            ]
        );
    }

    #[test]
    fn test_reset_restores_loaded_values() {
        let mut session = edit_session("Widget", 5);
        session.enter_title_edit();
        for (title, quantity) in [("a", "1"), ("", "-4"), ("Gizmo", "xyz"), ("  ", "12")] {
            session.on_title_changed(title);
            session.on_quantity_changed(quantity);
        }
        session.save().unwrap_err();

        session.reset();
        assert_eq!(session.title(), "Widget");
        assert_eq!(session.quantity(), 5);
        assert!(session.errors().is_empty());
        assert_eq!(session.title_state(), TitleState::Editing);

        session.reset();
        assert_eq!(session.title(), "Widget");
        assert_eq!(session.quantity(), 5);
    }

    #[test]
    fn test_title_edit_toggle_in_edit_mode() {
        let mut session = edit_session("Widget", 5);
        session.enter_title_edit();
        assert!(session.is_title_editing());
        session.exit_title_edit();
        assert_eq!(session.title_state(), TitleState::Display);
    }

    #[test]
    fn test_new_mode_never_leaves_title_edit() {
        let mut session = EditSession::new(ProductPage::new_product());
        session.exit_title_edit();
        assert_eq!(session.title_state(), TitleState::Editing);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut session = edit_session("Widget", 5);
        session.on_title_changed("Changed");
        let before = session.clone();

        let mut prompts = Vec::new();
        let result = session.delete(|message: &str| {
            prompts.push(message.to_owned());
            false
        });
        assert_eq!(result, None);
        assert_eq!(session, before);
        assert_eq!(prompts, vec![DELETE_CONFIRMATION.to_owned()]);

        let result = session.delete(|_: &str| true);
        assert_eq!(result, Some(Submission::Delete));
        assert_eq!(
            Submission::Delete.form_fields(),
            vec![("intent", "delete".to_owned())]
        );
    }

    #[test]
    fn test_delete_unsaved_product_is_noop() {
        let mut session = EditSession::new(ProductPage::new_product());
        let result = session.delete(|_: &str| -> bool { panic!("should not prompt") });
        assert_eq!(result, None);
    }

    #[test]
    fn test_reload_same_product_keeps_ui_state() {
        let product = stored("Widget", 5);
        let mut session = EditSession::new(ProductPage::existing(&product));
        session.enter_title_edit();
        session.on_quantity_changed("-1");
        session.save().unwrap_err();

        let updated = Product {
            title: "Widget v2".to_owned(),
            quantity: 9,
            ..product
        };
        session.reload(ProductPage::existing(&updated));

        assert_eq!(session.title(), "Widget v2");
        assert_eq!(session.quantity(), 9);
        assert!(session.is_title_editing());
        assert!(session.errors().quantity.is_some());
    }

    #[test]
    fn test_reload_other_product_resets_to_mode_defaults() {
        let mut session = edit_session("Widget", 5);
        session.enter_title_edit();
        session.on_title_changed("");
        session.save().unwrap_err();

        let other = stored("Gadget", 2);
        session.reload(ProductPage::existing(&other));
        assert_eq!(session.title(), "Gadget");
        assert_eq!(session.quantity(), 2);
        assert_eq!(session.title_state(), TitleState::Display);
        assert!(session.errors().is_empty());
        assert_eq!(session.target(), Target::Existing(other.id));

        session.reload(ProductPage::new_product());
        assert_eq!(session.title_state(), TitleState::Editing);
        assert_eq!(session.mode(), Mode::New);

        // reset now restores the newly loaded values
        session.on_title_changed("Draft");
        session.reset();
        assert_eq!(session.title(), "");
    }
}
