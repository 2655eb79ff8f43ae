//! The storefront root.

use artvault_observability::StructuredLogger;

use crate::ack::{AckKind, PendingAcks, Scheduled};
use crate::cart::{Cart, CartChange};
use crate::catalog::Catalog;
use crate::config::ShopConfig;
use crate::contact::{sanitize_tel, tel_target, whatsapp_url, ContactForm};
use crate::dispatch::action::{Action, RawAction};
use crate::error::ShopError;
use crate::ids::ProductId;
use crate::present::{Dialog, Navigation, Notice, OptionalPresenter, Page, Presenter, Toast};
use crate::search::{CategoryFilter, FilterCriteria, SortMode};
use crate::view::{project_view, ShopView, ViewInputs};

/// What dispatch did with an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The action was applied and the page re-rendered.
    Handled,
    /// Unknown, malformed, stale or redundant; nothing changed.
    Ignored,
}

impl Outcome {
    pub fn is_handled(&self) -> bool {
        matches!(self, Outcome::Handled)
    }
}

/// Page used when none is supplied. Drops everything.
struct HeadlessPage;

impl Page for HeadlessPage {
    fn render(&mut self, _view: &ShopView) {}
    fn pulse_badge(&mut self) {}
    fn navigate(&mut self, _target: &Navigation) {}
    fn notify(&mut self, _notice: Notice) {}
}

/// Builder for [`Storefront`].
pub struct StorefrontBuilder {
    catalog: Catalog,
    page: Option<Box<dyn Page>>,
    presenter: Option<Box<dyn Presenter>>,
    config: ShopConfig,
    logger: Option<StructuredLogger>,
}

impl StorefrontBuilder {
    pub fn page(mut self, page: impl Page + 'static) -> Self {
        self.page = Some(Box::new(page));
        self
    }

    pub fn presenter(mut self, presenter: impl Presenter + 'static) -> Self {
        self.presenter = Some(Box::new(presenter));
        self
    }

    pub fn config(mut self, config: ShopConfig) -> Self {
        self.config = config;
        self
    }

    pub fn logger(mut self, logger: StructuredLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Build the storefront and render the initial view.
    pub fn build(self) -> Storefront {
        let logger = self
            .logger
            .unwrap_or_else(StructuredLogger::quiet)
            .for_component("storefront");

        let mut shop = Storefront {
            acks: PendingAcks::new(self.config.ack_delay())
                .with_delay(AckKind::Newsletter, self.config.newsletter_notice()),
            catalog: self.catalog,
            cart: Cart::new(),
            criteria: FilterCriteria::all(),
            detail: None,
            call_picker_open: false,
            page: self.page.unwrap_or_else(|| Box::new(HeadlessPage)),
            presenter: OptionalPresenter::new(self.presenter, logger.for_component("presenter")),
            config: self.config,
            logger,
        };

        shop.logger
            .info_builder("storefront mounted")
            .field_i64("products", shop.catalog.len() as i64)
            .field_bool("dialogs", shop.presenter.is_available())
            .emit();
        shop.refresh();
        shop
    }
}

/// Application root: owns the catalog, the cart, the filter criteria and
/// the collaborators, and routes every user action.
///
/// Dispatch is synchronous and runs to completion, so cart invariants hold
/// between any two actions. The only deferred work is the terminal UI
/// update of a simulated acknowledgment, delivered through
/// [`Storefront::next_ack`] and applied with [`Storefront::complete`].
pub struct Storefront {
    catalog: Catalog,
    cart: Cart,
    criteria: FilterCriteria,
    detail: Option<ProductId>,
    call_picker_open: bool,
    page: Box<dyn Page>,
    presenter: OptionalPresenter,
    config: ShopConfig,
    acks: PendingAcks,
    logger: StructuredLogger,
}

impl Storefront {
    pub fn builder(catalog: Catalog) -> StorefrontBuilder {
        StorefrontBuilder {
            catalog,
            page: None,
            presenter: None,
            config: ShopConfig::default(),
            logger: None,
        }
    }

    /// Route one raw UI event. Never panics and never propagates a
    /// collaborator failure.
    pub fn dispatch(&mut self, raw: &RawAction) -> Outcome {
        let Some(action) = Action::classify(raw) else {
            self.logger
                .debug_builder("ignored action")
                .field("raw", raw.to_string())
                .emit();
            return Outcome::Ignored;
        };
        self.apply(action)
    }

    /// Apply an already classified action.
    pub fn apply(&mut self, action: Action) -> Outcome {
        let name = action.name();
        let outcome = match action {
            Action::ViewDetail(id) => self.view_detail(id),
            Action::AddToCart(id) => self.add_to_cart(id),
            Action::IncreaseQty(index) => {
                let change = self.cart.increment_at(index);
                self.cart_changed(change)
            }
            Action::DecreaseQty(index) => {
                let change = self.cart.decrement_at(index);
                self.cart_changed(change)
            }
            Action::RemoveEntry(index) => {
                let change = self.cart.remove_at(index);
                self.cart_changed(change)
            }
            Action::FilterChanged {
                category,
                sort,
                search,
            } => self.filter_changed(category, sort, search),
            Action::Checkout => self.checkout(),
            Action::OpenCart => {
                self.presenter.try_show(Dialog::Cart);
                Outcome::Handled
            }
            Action::CloseDetail => {
                self.detail = None;
                self.presenter.try_hide(Dialog::ProductDetail);
                Outcome::Handled
            }
            Action::OpenCallPicker => self.open_call_picker(),
            Action::CloseCallPicker => {
                self.close_call_picker();
                Outcome::Handled
            }
            Action::CallPhone => self.call_phone(),
            Action::CallWhatsApp => self.call_whatsapp(),
            Action::SubmitContact(form) => self.submit_contact(form),
            Action::SubscribeNewsletter => {
                // A repeat signup restarts the confirmation timer.
                let scheduled = self.acks.restart(AckKind::Newsletter);
                self.track_ack(AckKind::Newsletter, scheduled)
            }
        };

        self.logger
            .debug_builder("action")
            .field("action", name)
            .field_bool("handled", outcome.is_handled())
            .field_i64("cart_entries", self.cart.len() as i64)
            .emit();

        if outcome.is_handled() {
            self.refresh();
        }
        outcome
    }

    fn view_detail(&mut self, id: ProductId) -> Outcome {
        if !self.catalog.contains(id) {
            return Outcome::Ignored;
        }
        self.detail = Some(id);
        self.presenter.try_show(Dialog::ProductDetail);
        Outcome::Handled
    }

    fn add_to_cart(&mut self, id: ProductId) -> Outcome {
        let change = self.cart.add(&self.catalog, id);
        if !change.is_change() {
            return self.cart_changed(change);
        }
        self.page.pulse_badge();
        if self.config.toast_on_add {
            self.presenter.try_toast(Toast::CartAdded);
        }
        self.cart_changed(change)
    }

    fn cart_changed(&self, change: CartChange) -> Outcome {
        if !change.is_change() {
            self.logger.debug("cart unchanged");
            return Outcome::Ignored;
        }
        self.logger
            .info_builder("cart changed")
            .field("change", format!("{:?}", change))
            .field_i64("entries", self.cart.len() as i64)
            .emit();
        Outcome::Handled
    }

    fn filter_changed(
        &mut self,
        category: Option<String>,
        sort: Option<String>,
        search: Option<String>,
    ) -> Outcome {
        if let Some(category) = category {
            self.criteria.category = CategoryFilter::from_control(&category);
        }
        if let Some(sort) = sort {
            self.criteria.sort = SortMode::from_control(&sort);
        }
        if let Some(search) = search {
            self.criteria.search_text = search.trim().to_string();
        }
        Outcome::Handled
    }

    fn checkout(&mut self) -> Outcome {
        if self.acks.is_pending(AckKind::Checkout) {
            return Outcome::Ignored;
        }
        let change = self.cart.clear();
        if let CartChange::Cleared { removed } = &change {
            self.logger
                .info_builder("checkout")
                .field_i64("entries", removed.len() as i64)
                .emit();
        }
        self.presenter.try_hide(Dialog::Cart);
        self.schedule_ack(AckKind::Checkout)
    }

    fn submit_contact(&mut self, form: ContactForm) -> Outcome {
        if self.acks.is_pending(AckKind::ContactForm) {
            return Outcome::Ignored;
        }
        if let Err(e) = form.validate() {
            self.logger.warn_with("contact form rejected", &[("error", &e)]);
            self.page.notify(Notice::ContactInvalid);
            return Outcome::Handled;
        }
        self.schedule_ack(AckKind::ContactForm)
    }

    fn schedule_ack(&mut self, kind: AckKind) -> Outcome {
        let scheduled = self.acks.schedule(kind);
        self.track_ack(kind, scheduled)
    }

    fn track_ack(&mut self, kind: AckKind, scheduled: Scheduled) -> Outcome {
        match scheduled {
            Scheduled::Deferred(_) => {
                self.logger
                    .info_builder("acknowledgment scheduled")
                    .field("kind", kind.as_str())
                    .duration_ms("delay_ms", self.acks.delay(kind))
                    .emit();
                Outcome::Handled
            }
            Scheduled::Immediate => {
                self.deliver(kind);
                Outcome::Handled
            }
            Scheduled::AlreadyPending => Outcome::Ignored,
        }
    }

    fn contact_phone(&self) -> &str {
        self.config.contact_phone.as_deref().unwrap_or_default()
    }

    fn open_call_picker(&mut self) -> Outcome {
        if self.presenter.try_show(Dialog::CallPicker) {
            self.call_picker_open = true;
            return Outcome::Handled;
        }
        let number = sanitize_tel(self.contact_phone());
        if number.is_empty() {
            self.logger.warn("call picker unavailable and no number to dial");
            return Outcome::Ignored;
        }
        self.page.navigate(&Navigation::Tel(number));
        Outcome::Handled
    }

    fn call_phone(&mut self) -> Outcome {
        match tel_target(self.contact_phone()) {
            Ok(number) => {
                self.close_call_picker();
                self.page.navigate(&Navigation::Tel(number));
            }
            Err(e) => self.reject_hand_off(e, Notice::PhoneUnavailable),
        }
        Outcome::Handled
    }

    fn call_whatsapp(&mut self) -> Outcome {
        match whatsapp_url(self.contact_phone()) {
            Ok(url) => {
                self.close_call_picker();
                self.page.navigate(&Navigation::External(url));
            }
            Err(e) => self.reject_hand_off(e, Notice::WhatsAppUnavailable),
        }
        Outcome::Handled
    }

    fn close_call_picker(&mut self) {
        self.call_picker_open = false;
        self.presenter.try_hide(Dialog::CallPicker);
    }

    fn reject_hand_off(&mut self, error: ShopError, notice: Notice) {
        self.logger.warn_with("hand-off aborted", &[("error", &error)]);
        self.page.notify(notice);
    }

    /// Wait for the next simulated acknowledgment to come due.
    ///
    /// Pends forever when nothing is in flight; use inside `select!`.
    pub async fn next_ack(&mut self) -> Option<AckKind> {
        self.acks.next().await
    }

    /// Apply the terminal UI update for a due acknowledgment. Returns
    /// whether `kind` was actually in flight.
    pub fn complete(&mut self, kind: AckKind) -> bool {
        if !self.acks.finish(kind) {
            return false;
        }
        self.deliver(kind);
        self.refresh();
        true
    }

    /// Wait for the next acknowledgment and apply it.
    pub async fn settle_next(&mut self) -> Option<AckKind> {
        let kind = self.next_ack().await?;
        self.complete(kind).then_some(kind)
    }

    fn deliver(&mut self, kind: AckKind) {
        self.logger
            .info_builder("acknowledged")
            .field("kind", kind.as_str())
            .emit();
        match kind {
            AckKind::Checkout => self.page.notify(Notice::CheckoutComplete),
            AckKind::ContactForm => self.page.notify(Notice::ContactDelivered),
            // The confirmation drops out of the next projection.
            AckKind::Newsletter => {}
        }
    }

    /// Cancel one pending acknowledgment and re-enable its control.
    pub fn cancel_ack(&mut self, kind: AckKind) -> bool {
        let cancelled = self.acks.cancel(kind);
        if cancelled {
            self.refresh();
        }
        cancelled
    }

    /// Tear down: cancel every pending acknowledgment. Returns what was
    /// cancelled.
    pub fn dispose(&mut self) -> Vec<AckKind> {
        let cancelled = self.acks.cancel_all();
        if !cancelled.is_empty() {
            self.logger
                .info_builder("disposed")
                .field_i64("cancelled", cancelled.len() as i64)
                .emit();
            self.refresh();
        }
        cancelled
    }

    /// Project the current state.
    pub fn view(&self) -> Result<ShopView, ShopError> {
        project_view(&ViewInputs {
            catalog: &self.catalog,
            cart: &self.cart,
            criteria: &self.criteria,
            detail: self.detail,
            checkout_pending: self.acks.is_pending(AckKind::Checkout),
            contact_pending: self.acks.is_pending(AckKind::ContactForm),
            newsletter_pending: self.acks.is_pending(AckKind::Newsletter),
            call_picker: self
                .call_picker_open
                .then_some(self.config.contact_phone.as_deref()),
        })
    }

    /// Re-project and render.
    pub fn refresh(&mut self) {
        match self.view() {
            Ok(view) => self.page.render(&view),
            Err(e) => self
                .logger
                .warn_with("projection failed", &[("error", &e)]),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn detail(&self) -> Option<ProductId> {
        self.detail
    }

    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    pub fn is_pending(&self, kind: AckKind) -> bool {
        self.acks.is_pending(kind)
    }

    /// Whether any acknowledgment is still in flight.
    pub fn has_pending(&self) -> bool {
        AckKind::ALL.into_iter().any(|kind| self.acks.is_pending(kind))
    }

    pub fn has_dialogs(&self) -> bool {
        self.presenter.is_available()
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("products", &self.catalog.len())
            .field("cart", &self.cart)
            .field("criteria", &self.criteria)
            .field("detail", &self.detail)
            .field("call_picker_open", &self.call_picker_open)
            .field("presenter", &self.presenter)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_dispatch() {
        let mut shop = Storefront::builder(Catalog::sample()).build();
        assert!(!shop.has_dialogs());

        let add = RawAction::new("add-to-cart").with("id", "1");
        assert_eq!(shop.dispatch(&add), Outcome::Handled);
        assert_eq!(shop.dispatch(&add), Outcome::Handled);
        assert_eq!(shop.cart().quantity_of(ProductId::new(1)), 2);

        let unknown = RawAction::new("add-to-cart").with("id", "999");
        assert_eq!(shop.dispatch(&unknown), Outcome::Ignored);
        assert_eq!(shop.cart().len(), 1);
    }

    #[test]
    fn test_filter_merges_partial_updates() {
        let mut shop = Storefront::builder(Catalog::sample()).build();
        shop.dispatch(&RawAction::new("filter-changed").with("category", "anime"));
        shop.dispatch(&RawAction::new("filter-changed").with("sort", "priceAsc"));

        assert_eq!(shop.criteria().sort, SortMode::PriceAsc);
        let ids: Vec<u64> = shop
            .view()
            .unwrap()
            .products
            .iter()
            .map(|c| c.product_id.get())
            .collect();
        assert_eq!(ids, vec![5, 4]);
    }

    #[test]
    fn test_view_detail_ignores_unknown_product() {
        let mut shop = Storefront::builder(Catalog::sample()).build();
        assert_eq!(
            shop.dispatch(&RawAction::new("view-detail").with("id", "42")),
            Outcome::Ignored
        );
        assert_eq!(shop.detail(), None);

        shop.dispatch(&RawAction::new("view").with("id", "4"));
        assert_eq!(shop.detail(), Some(ProductId::new(4)));
        shop.dispatch(&RawAction::new("close-detail"));
        assert_eq!(shop.detail(), None);
    }

    #[test]
    fn test_checkout_outside_runtime_completes_immediately() {
        let mut shop = Storefront::builder(Catalog::sample()).build();
        shop.dispatch(&RawAction::new("add").with("id", "2"));
        assert_eq!(shop.dispatch(&RawAction::new("checkout")), Outcome::Handled);
        assert!(shop.cart().is_empty());
        assert!(!shop.is_pending(AckKind::Checkout));
        assert!(shop.view().unwrap().cart.checkout.enabled);
    }
}
