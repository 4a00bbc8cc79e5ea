use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::error::ApiError;
use super::routes::{self, endpoint, item};
use crate::actor_framework::{reply, Service};
use crate::domain::{
    Credentials, Employee, Identity, NewSale, OrderLine, Product, ProductDraft, PurchaseReceipt, Registration,
    Sale, UserAccount,
};
use crate::messages::ApiRequest;

/// Error payload shape; the API is not consistent about the field name.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
    mensaje: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionBody {
    #[serde(rename = "usuario")]
    identity: Option<Identity>,
}

/// The only component that talks HTTP. Holds the cookie jar carrying the
/// server-managed session.
pub struct ApiService {
    http: Client,
    base_url: String,
}

impl ApiService {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { http, base_url: base_url.into() })
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }

    fn item_url(&self, collection: &str, id: &str) -> String {
        item(&self.base_url, collection, id)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        request.send().await.map_err(|e| {
            warn!(error = %e, "Transport failure");
            ApiError::Transport(e.to_string())
        })
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body: ErrorBody = response.json().await.unwrap_or_default();
        let message = body.error.or(body.message).or(body.mensaje);
        warn!(status = status.as_u16(), message = ?message, "Request rejected");
        Err(ApiError::Rejected { status: status.as_u16(), message })
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = Self::check(self.send(request).await?).await?;
        response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn submit(&self, request: RequestBuilder) -> Result<(), ApiError> {
        Self::check(self.send(request).await?).await.map(|_| ())
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let products: Vec<Product> = self.fetch(self.http.get(self.url(routes::PRODUCTS))).await?;
        debug!(product_count = products.len(), "Products fetched");
        Ok(products)
    }

    #[instrument(fields(name = %draft.name), skip(self, draft))]
    async fn create_product(&self, draft: ProductDraft) -> Result<(), ApiError> {
        self.submit(self.http.post(self.url(routes::PRODUCTS)).json(&draft)).await?;
        info!("Product created");
        Ok(())
    }

    #[instrument(fields(product_id = %id), skip(self, draft))]
    async fn update_product(&self, id: String, draft: ProductDraft) -> Result<(), ApiError> {
        self.submit(self.http.put(self.item_url(routes::PRODUCTS, &id)).json(&draft)).await?;
        info!("Product updated");
        Ok(())
    }

    #[instrument(fields(product_id = %id), skip(self))]
    async fn delete_product(&self, id: String) -> Result<(), ApiError> {
        self.submit(self.http.delete(self.item_url(routes::PRODUCTS, &id))).await?;
        info!("Product deleted");
        Ok(())
    }

    #[instrument(fields(product_id = %line.product_id, quantity = line.quantity), skip(self, line))]
    async fn add_to_server_cart(&self, line: OrderLine) -> Result<(), ApiError> {
        self.submit(self.http.post(self.url(routes::SERVER_CART)).json(&line)).await
    }

    #[instrument(skip(self))]
    async fn clear_server_cart(&self) -> Result<(), ApiError> {
        self.submit(self.http.delete(self.url(routes::SERVER_CART))).await
    }

    #[instrument(skip(self))]
    async fn confirm_purchase(&self) -> Result<PurchaseReceipt, ApiError> {
        let receipt: PurchaseReceipt = self.fetch(self.http.post(self.url(routes::CONFIRM_PURCHASE))).await?;
        info!(total = %receipt.total, "Purchase confirmed");
        Ok(receipt)
    }

    #[instrument(fields(email = %credentials.email), skip(self, credentials))]
    async fn login(&self, credentials: Credentials) -> Result<Identity, ApiError> {
        let body: SessionBody = self.fetch(self.http.post(self.url(routes::LOGIN)).json(&credentials)).await?;
        body.identity
            .ok_or_else(|| ApiError::Decode("login response carries no user".to_string()))
    }

    #[instrument(fields(email = %registration.email), skip(self, registration))]
    async fn register(&self, registration: Registration) -> Result<(), ApiError> {
        self.submit(self.http.post(self.url(routes::REGISTER)).json(&registration)).await
    }

    /// `None` when the server says there is no session.
    #[instrument(skip(self))]
    async fn verify_session(&self) -> Result<Option<Identity>, ApiError> {
        let response = self.send(self.http.get(self.url(routes::VERIFY_SESSION))).await?;
        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
        ) {
            debug!(status = response.status().as_u16(), "No active session");
            return Ok(None);
        }
        let response = Self::check(response).await?;
        let body: SessionBody = response.json().await.map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(body.identity)
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<(), ApiError> {
        self.submit(self.http.post(self.url(routes::LOGOUT))).await
    }

    #[instrument(skip(self))]
    async fn list_sales(&self) -> Result<Vec<Sale>, ApiError> {
        self.fetch(self.http.get(self.url(routes::SALES))).await
    }

    #[instrument(fields(product_id = %sale.product_id, quantity = sale.quantity), skip(self, sale))]
    async fn register_sale(&self, sale: NewSale) -> Result<(), ApiError> {
        self.submit(self.http.post(self.url(routes::SALES)).json(&sale)).await
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<UserAccount>, ApiError> {
        self.fetch(self.http.get(self.url(routes::USERS))).await
    }

    #[instrument(fields(user_id = %id), skip(self))]
    async fn delete_user(&self, id: String) -> Result<(), ApiError> {
        self.submit(self.http.delete(self.item_url(routes::USERS, &id))).await
    }

    #[instrument(skip(self))]
    async fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        self.fetch(self.http.get(self.url(routes::EMPLOYEES))).await
    }

    #[instrument(fields(employee_id = %id), skip(self))]
    async fn delete_employee(&self, id: String) -> Result<(), ApiError> {
        self.submit(self.http.delete(self.item_url(routes::EMPLOYEES, &id))).await
    }
}

impl Service for ApiService {
    type Request = ApiRequest;
    const NAME: &'static str = "api_service";

    async fn handle(&mut self, request: ApiRequest) {
        match request {
            ApiRequest::ListProducts { respond_to } => reply(respond_to, self.list_products().await),
            ApiRequest::CreateProduct { draft, respond_to } => reply(respond_to, self.create_product(draft).await),
            ApiRequest::UpdateProduct { id, draft, respond_to } => {
                reply(respond_to, self.update_product(id, draft).await)
            }
            ApiRequest::DeleteProduct { id, respond_to } => reply(respond_to, self.delete_product(id).await),
            ApiRequest::AddToServerCart { line, respond_to } => {
                reply(respond_to, self.add_to_server_cart(line).await)
            }
            ApiRequest::ClearServerCart { respond_to } => reply(respond_to, self.clear_server_cart().await),
            ApiRequest::ConfirmPurchase { respond_to } => reply(respond_to, self.confirm_purchase().await),
            ApiRequest::Login { credentials, respond_to } => reply(respond_to, self.login(credentials).await),
            ApiRequest::Register { registration, respond_to } => {
                reply(respond_to, self.register(registration).await)
            }
            ApiRequest::VerifySession { respond_to } => reply(respond_to, self.verify_session().await),
            ApiRequest::Logout { respond_to } => reply(respond_to, self.logout().await),
            ApiRequest::ListSales { respond_to } => reply(respond_to, self.list_sales().await),
            ApiRequest::RegisterSale { sale, respond_to } => reply(respond_to, self.register_sale(sale).await),
            ApiRequest::ListUsers { respond_to } => reply(respond_to, self.list_users().await),
            ApiRequest::DeleteUser { id, respond_to } => reply(respond_to, self.delete_user(id).await),
            ApiRequest::ListEmployees { respond_to } => reply(respond_to, self.list_employees().await),
            ApiRequest::DeleteEmployee { id, respond_to } => reply(respond_to, self.delete_employee(id).await),
        }
    }
}
