use tokio::sync::mpsc;

use crate::api_actor::ApiError;
use crate::domain::{
    Credentials, Employee, Identity, NewSale, OrderLine, Product, ProductDraft, PurchaseReceipt, Registration,
    Sale, UserAccount,
};
use crate::messages::ApiRequest;

/// Client for the API gateway service.
#[derive(Clone)]
pub struct ApiClient {
    sender: mpsc::Sender<ApiRequest>,
}

impl ApiClient {
    pub fn new(sender: mpsc::Sender<ApiRequest>) -> Self {
        Self { sender }
    }
}

client_method!(ApiClient => fn list_products() -> Vec<Product> as ApiRequest::ListProducts, Error = ApiError);
client_method!(ApiClient => fn create_product(draft: ProductDraft) -> () as ApiRequest::CreateProduct, Error = ApiError);
client_method!(ApiClient => fn update_product(id: String, draft: ProductDraft) -> () as ApiRequest::UpdateProduct, Error = ApiError);
client_method!(ApiClient => fn delete_product(id: String) -> () as ApiRequest::DeleteProduct, Error = ApiError);
client_method!(ApiClient => fn add_to_server_cart(line: OrderLine) -> () as ApiRequest::AddToServerCart, Error = ApiError);
client_method!(ApiClient => fn clear_server_cart() -> () as ApiRequest::ClearServerCart, Error = ApiError);
client_method!(ApiClient => fn confirm_purchase() -> PurchaseReceipt as ApiRequest::ConfirmPurchase, Error = ApiError);
client_method!(ApiClient => fn login(credentials: Credentials) -> Identity as ApiRequest::Login, Error = ApiError);
client_method!(ApiClient => fn register(registration: Registration) -> () as ApiRequest::Register, Error = ApiError);
client_method!(ApiClient => fn verify_session() -> Option<Identity> as ApiRequest::VerifySession, Error = ApiError);
client_method!(ApiClient => fn logout() -> () as ApiRequest::Logout, Error = ApiError);
client_method!(ApiClient => fn list_sales() -> Vec<Sale> as ApiRequest::ListSales, Error = ApiError);
client_method!(ApiClient => fn register_sale(sale: NewSale) -> () as ApiRequest::RegisterSale, Error = ApiError);
client_method!(ApiClient => fn list_users() -> Vec<UserAccount> as ApiRequest::ListUsers, Error = ApiError);
client_method!(ApiClient => fn delete_user(id: String) -> () as ApiRequest::DeleteUser, Error = ApiError);
client_method!(ApiClient => fn list_employees() -> Vec<Employee> as ApiRequest::ListEmployees, Error = ApiError);
client_method!(ApiClient => fn delete_employee(id: String) -> () as ApiRequest::DeleteEmployee, Error = ApiError);
