use tracing::{debug, info, instrument};

use super::error::RecordsError;
use crate::actor_framework::{reply, Service};
use crate::clients::ApiClient;
use crate::domain::{Employee, NewSale, Sale, UserAccount};
use crate::messages::RecordsRequest;

/// Sales, users and employees panels. Every mutation answers with the
/// re-fetched list.
pub struct RecordsService {
    api: ApiClient,
}

impl RecordsService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    #[instrument(skip(self))]
    async fn load_sales(&self) -> Result<Vec<Sale>, RecordsError> {
        let sales = self.api.list_sales().await?;
        debug!(sale_count = sales.len(), "Sales loaded");
        Ok(sales)
    }

    #[instrument(fields(product_id = %sale.product_id, quantity = sale.quantity), skip(self, sale))]
    async fn register_sale(&self, sale: NewSale) -> Result<Vec<Sale>, RecordsError> {
        validate_sale(&sale)?;
        self.api.register_sale(sale).await?;
        info!("Sale registered");
        self.load_sales().await
    }

    #[instrument(skip(self))]
    async fn load_users(&self) -> Result<Vec<UserAccount>, RecordsError> {
        Ok(self.api.list_users().await?)
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, id: String) -> Result<Vec<UserAccount>, RecordsError> {
        self.api.delete_user(id).await?;
        info!("User deleted");
        self.load_users().await
    }

    #[instrument(skip(self))]
    async fn load_employees(&self) -> Result<Vec<Employee>, RecordsError> {
        Ok(self.api.list_employees().await?)
    }

    #[instrument(skip(self))]
    async fn delete_employee(&self, id: String) -> Result<Vec<Employee>, RecordsError> {
        self.api.delete_employee(id).await?;
        info!("Employee deleted");
        self.load_employees().await
    }
}

fn validate_sale(sale: &NewSale) -> Result<(), RecordsError> {
    if sale.product_id.trim().is_empty() {
        return Err(RecordsError::InvalidSale("a product is required".to_string()));
    }
    if sale.quantity == 0 {
        return Err(RecordsError::InvalidSale("quantity must be at least 1".to_string()));
    }
    if sale.customer.trim().is_empty() {
        return Err(RecordsError::InvalidSale("a customer is required".to_string()));
    }
    Ok(())
}

impl Service for RecordsService {
    type Request = RecordsRequest;
    const NAME: &'static str = "records_service";

    async fn handle(&mut self, request: RecordsRequest) {
        match request {
            RecordsRequest::LoadSales { respond_to } => reply(respond_to, self.load_sales().await),
            RecordsRequest::RegisterSale { sale, respond_to } => reply(respond_to, self.register_sale(sale).await),
            RecordsRequest::LoadUsers { respond_to } => reply(respond_to, self.load_users().await),
            RecordsRequest::DeleteUser { id, respond_to } => reply(respond_to, self.delete_user(id).await),
            RecordsRequest::LoadEmployees { respond_to } => reply(respond_to, self.load_employees().await),
            RecordsRequest::DeleteEmployee { id, respond_to } => {
                reply(respond_to, self.delete_employee(id).await)
            }
        }
    }
}
