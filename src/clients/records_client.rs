use tokio::sync::mpsc;

use crate::domain::{Employee, NewSale, Sale, UserAccount};
use crate::messages::RecordsRequest;
use crate::records_actor::RecordsError;

/// Client for the dashboard records service.
#[derive(Clone)]
pub struct RecordsClient {
    sender: mpsc::Sender<RecordsRequest>,
}

impl RecordsClient {
    pub fn new(sender: mpsc::Sender<RecordsRequest>) -> Self {
        Self { sender }
    }
}

client_method!(RecordsClient => fn load_sales() -> Vec<Sale> as RecordsRequest::LoadSales, Error = RecordsError);
client_method!(RecordsClient => fn register_sale(sale: NewSale) -> Vec<Sale> as RecordsRequest::RegisterSale, Error = RecordsError);
client_method!(RecordsClient => fn load_users() -> Vec<UserAccount> as RecordsRequest::LoadUsers, Error = RecordsError);
client_method!(RecordsClient => fn delete_user(id: String) -> Vec<UserAccount> as RecordsRequest::DeleteUser, Error = RecordsError);
client_method!(RecordsClient => fn load_employees() -> Vec<Employee> as RecordsRequest::LoadEmployees, Error = RecordsError);
client_method!(RecordsClient => fn delete_employee(id: String) -> Vec<Employee> as RecordsRequest::DeleteEmployee, Error = RecordsError);
