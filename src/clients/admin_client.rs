use tokio::sync::mpsc;

use crate::admin_actor::{AdminError, AdminSnapshot, PendingDelete, SaveOutcome};
use crate::domain::{Product, ProductForm};
use crate::messages::AdminRequest;

/// Client for the product admin service.
#[derive(Clone)]
pub struct AdminClient {
    sender: mpsc::Sender<AdminRequest>,
}

impl AdminClient {
    pub fn new(sender: mpsc::Sender<AdminRequest>) -> Self {
        Self { sender }
    }
}

client_method!(AdminClient => fn load_products() -> Vec<Product> as AdminRequest::LoadProducts, Error = AdminError);
client_method!(AdminClient => fn filter(term: String) -> Vec<Product> as AdminRequest::Filter, Error = AdminError);
client_method!(AdminClient => fn begin_edit(id: String) -> ProductForm as AdminRequest::BeginEdit, Error = AdminError);
client_method!(AdminClient => fn cancel_edit() -> () as AdminRequest::CancelEdit, Error = AdminError);
client_method!(AdminClient => fn save(form: ProductForm) -> SaveOutcome as AdminRequest::Save, Error = AdminError);
client_method!(AdminClient => fn request_delete(id: String) -> PendingDelete as AdminRequest::RequestDelete, Error = AdminError);
client_method!(AdminClient => fn confirm_delete(id: String) -> () as AdminRequest::ConfirmDelete, Error = AdminError);
client_method!(AdminClient => fn snapshot() -> AdminSnapshot as AdminRequest::Snapshot, Error = AdminError);
