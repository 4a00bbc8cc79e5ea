use tracing::{debug, info, instrument, warn};

use super::error::AdminError;
use crate::actor_framework::{reply, Service};
use crate::clients::ApiClient;
use crate::domain::{Product, ProductForm};
use crate::messages::AdminRequest;

/// Whether a save created a new product or replaced the one being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// A deletion waiting for the user's confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDelete {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdminSnapshot {
    pub products: Vec<Product>,
    /// Id of the product loaded into the form, if any.
    pub editing: Option<String>,
}

/// Form-bound CRUD over the product list.
///
/// Create vs update is decided only by `editing`, never by asking the server.
pub struct ProductAdminService {
    api: ApiClient,
    products: Vec<Product>,
    editing: Option<String>,
    pending_delete: Option<PendingDelete>,
}

impl ProductAdminService {
    pub fn new(api: ApiClient) -> Self {
        Self { api, products: Vec::new(), editing: None, pending_delete: None }
    }

    fn find(&self, id: &str) -> Result<&Product, AdminError> {
        self.products
            .iter()
            .find(|product| product.id == id)
            .ok_or_else(|| AdminError::ProductNotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn load_products(&mut self) -> Result<Vec<Product>, AdminError> {
        self.products = self.api.list_products().await?;
        debug!(product_count = self.products.len(), "Products loaded");
        Ok(self.products.clone())
    }

    async fn refresh(&mut self) {
        if let Err(e) = self.load_products().await {
            warn!(error = %e, "Product list refresh failed");
        }
    }

    /// Works on the last-loaded list only. A blank term gives the full list.
    fn filter(&self, term: &str) -> Vec<Product> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.products.clone();
        }
        self.products.iter().filter(|product| product.matches(&needle)).cloned().collect()
    }

    #[instrument(skip(self))]
    fn begin_edit(&mut self, id: String) -> Result<ProductForm, AdminError> {
        let form = ProductForm::from_product(self.find(&id)?);
        self.editing = Some(id);
        Ok(form)
    }

    #[instrument(fields(name = %form.name), skip(self, form))]
    async fn save(&mut self, form: ProductForm) -> Result<SaveOutcome, AdminError> {
        let draft = form.validate()?;

        let outcome = match self.editing.clone() {
            Some(id) => {
                self.api.update_product(id, draft).await?;
                SaveOutcome::Updated
            }
            None => {
                self.api.create_product(draft).await?;
                SaveOutcome::Created
            }
        };
        info!(outcome = ?outcome, "Product saved");

        self.editing = None;
        self.refresh().await;
        Ok(outcome)
    }

    #[instrument(skip(self))]
    fn request_delete(&mut self, id: String) -> Result<PendingDelete, AdminError> {
        let product = self.find(&id)?;
        let pending = PendingDelete { id, name: product.name.clone() };
        self.pending_delete = Some(pending.clone());
        Ok(pending)
    }

    /// Sends the DELETE only for the deletion last requested.
    #[instrument(skip(self))]
    async fn confirm_delete(&mut self, id: String) -> Result<(), AdminError> {
        match self.pending_delete.take() {
            Some(pending) if pending.id == id => {}
            _ => return Err(AdminError::DeleteNotConfirmed(id)),
        }

        self.api.delete_product(id.clone()).await?;
        info!("Product deleted");

        if self.editing.as_deref() == Some(id.as_str()) {
            self.editing = None;
        }
        self.refresh().await;
        Ok(())
    }
}

impl Service for ProductAdminService {
    type Request = AdminRequest;
    const NAME: &'static str = "product_admin";

    async fn handle(&mut self, request: AdminRequest) {
        match request {
            AdminRequest::LoadProducts { respond_to } => reply(respond_to, self.load_products().await),
            AdminRequest::Filter { term, respond_to } => reply(respond_to, Ok(self.filter(&term))),
            AdminRequest::BeginEdit { id, respond_to } => reply(respond_to, self.begin_edit(id)),
            AdminRequest::CancelEdit { respond_to } => {
                self.editing = None;
                reply(respond_to, Ok(()))
            }
            AdminRequest::Save { form, respond_to } => reply(respond_to, self.save(form).await),
            AdminRequest::RequestDelete { id, respond_to } => reply(respond_to, self.request_delete(id)),
            AdminRequest::ConfirmDelete { id, respond_to } => reply(respond_to, self.confirm_delete(id).await),
            AdminRequest::Snapshot { respond_to } => reply(
                respond_to,
                Ok(AdminSnapshot { products: self.products.clone(), editing: self.editing.clone() }),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use tokio::sync::mpsc;

    use super::*;
    use crate::actor_framework::spawn;
    use crate::clients::AdminClient;
    use crate::domain::FormError;
    use crate::messages::ApiRequest;
    use crate::mock_framework::{create_mock_api, expect_list_products, expect_update_product};

    fn products() -> Vec<Product> {
        vec![
            Product::new("P1", "Halo Infinite", Decimal::from(60), 4).with_platform("Xbox").with_genre("Shooter"),
            Product::new("P2", "Zelda", Decimal::from(70), 0).with_platform("Switch"),
        ]
    }

    async fn loaded_admin() -> (AdminClient, mpsc::Receiver<ApiRequest>) {
        let (api, mut api_rx) = create_mock_api(10);
        let (sender, _handle) = spawn(ProductAdminService::new(api), 10);
        let admin = AdminClient::new(sender);

        let client = admin.clone();
        let load = tokio::spawn(async move { client.load_products().await });
        let responder = expect_list_products(&mut api_rx).await.expect("Expected product fetch");
        responder.send(Ok(products())).unwrap();
        load.await.unwrap().unwrap();

        (admin, api_rx)
    }

    #[tokio::test]
    async fn test_filter_is_local_and_blank_term_restores_list() {
        let (admin, mut api_rx) = loaded_admin().await;

        let hits = admin.filter("  SWITCH ".into()).await.unwrap();
        assert_eq!(hits.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(), vec!["P2"]);

        assert!(admin.filter("shooter".into()).await.unwrap().iter().all(|p| p.id == "P1"));
        assert_eq!(admin.filter(String::new()).await.unwrap(), products());
        assert!(api_rx.try_recv().is_err(), "Filtering must not re-fetch");
    }

    #[tokio::test]
    async fn test_invalid_form_sends_nothing() {
        let (admin, mut api_rx) = loaded_admin().await;
        let form = ProductForm { name: "New".into(), price: "-5".into(), stock: "1".into(), ..Default::default() };

        let result = admin.save(form).await;

        assert_eq!(result, Err(AdminError::Validation(FormError::PriceNotPositive)));
        assert!(api_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_save_while_editing_updates_and_refetches() {
        let (admin, mut api_rx) = loaded_admin().await;
        let mut form = admin.begin_edit("P1".into()).await.unwrap();
        assert_eq!(form.name, "Halo Infinite");
        form.stock = "9".into();

        let client = admin.clone();
        let save = tokio::spawn(async move { client.save(form).await });

        let (id, draft, responder) = expect_update_product(&mut api_rx).await.expect("Expected update");
        assert_eq!(id, "P1");
        assert_eq!(draft.available, 9);
        responder.send(Ok(())).unwrap();

        let responder = expect_list_products(&mut api_rx).await.expect("Expected re-fetch");
        responder.send(Ok(products())).unwrap();

        assert_eq!(save.await.unwrap(), Ok(SaveOutcome::Updated));
        assert_eq!(admin.snapshot().await.unwrap().editing, None);
    }

    #[tokio::test]
    async fn test_delete_without_matching_request_is_refused() {
        let (admin, mut api_rx) = loaded_admin().await;

        assert_eq!(
            admin.confirm_delete("P1".into()).await,
            Err(AdminError::DeleteNotConfirmed("P1".into()))
        );

        admin.request_delete("P2".into()).await.unwrap();
        assert_eq!(
            admin.confirm_delete("P1".into()).await,
            Err(AdminError::DeleteNotConfirmed("P1".into()))
        );
        assert!(api_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_unknown_product_cannot_be_edited() {
        let (admin, _api_rx) = loaded_admin().await;
        assert_eq!(admin.begin_edit("P9".into()).await, Err(AdminError::ProductNotFound("P9".into())));
    }
}
