use crate::actor_framework::Response;
use crate::admin_actor::{AdminError, AdminSnapshot, PendingDelete, SaveOutcome};
use crate::api_actor::ApiError;
use crate::cart_actor::{CartError, CartLine, CartSnapshot, QuantityChange};
use crate::domain::{
    Credentials, Employee, GateDecision, Identity, NewSale, OrderLine, Page, Product, ProductDraft,
    ProductForm, PurchaseReceipt, Registration, Sale, UserAccount,
};
use crate::records_actor::RecordsError;
use crate::session_actor::SessionError;

/// Typed message enums for service communication. Each variant carries its
/// parameters and a oneshot channel for the response.

#[derive(Debug)]
pub enum ApiRequest {
    ListProducts {
        respond_to: Response<Vec<Product>, ApiError>,
    },
    CreateProduct {
        draft: ProductDraft,
        respond_to: Response<(), ApiError>,
    },
    UpdateProduct {
        id: String,
        draft: ProductDraft,
        respond_to: Response<(), ApiError>,
    },
    DeleteProduct {
        id: String,
        respond_to: Response<(), ApiError>,
    },
    AddToServerCart {
        line: OrderLine,
        respond_to: Response<(), ApiError>,
    },
    ClearServerCart {
        respond_to: Response<(), ApiError>,
    },
    ConfirmPurchase {
        respond_to: Response<PurchaseReceipt, ApiError>,
    },
    Login {
        credentials: Credentials,
        respond_to: Response<Identity, ApiError>,
    },
    Register {
        registration: Registration,
        respond_to: Response<(), ApiError>,
    },
    VerifySession {
        respond_to: Response<Option<Identity>, ApiError>,
    },
    Logout {
        respond_to: Response<(), ApiError>,
    },
    ListSales {
        respond_to: Response<Vec<Sale>, ApiError>,
    },
    RegisterSale {
        sale: NewSale,
        respond_to: Response<(), ApiError>,
    },
    ListUsers {
        respond_to: Response<Vec<UserAccount>, ApiError>,
    },
    DeleteUser {
        id: String,
        respond_to: Response<(), ApiError>,
    },
    ListEmployees {
        respond_to: Response<Vec<Employee>, ApiError>,
    },
    DeleteEmployee {
        id: String,
        respond_to: Response<(), ApiError>,
    },
}

#[derive(Debug)]
pub enum SessionRequest {
    CheckAccess {
        page: Page,
        respond_to: Response<GateDecision, SessionError>,
    },
    Login {
        credentials: Credentials,
        respond_to: Response<Identity, SessionError>,
    },
    Register {
        registration: Registration,
        respond_to: Response<(), SessionError>,
    },
    Logout {
        respond_to: Response<(), SessionError>,
    },
    CurrentIdentity {
        respond_to: Response<Option<Identity>, SessionError>,
    },
}

#[derive(Debug)]
pub enum CartRequest {
    LoadCatalog {
        respond_to: Response<Vec<Product>, CartError>,
    },
    AddToCart {
        product_id: String,
        respond_to: Response<CartLine, CartError>,
    },
    ChangeQuantity {
        index: usize,
        delta: i64,
        respond_to: Response<QuantityChange, CartError>,
    },
    RemoveLine {
        index: usize,
        respond_to: Response<CartLine, CartError>,
    },
    Checkout {
        identity: Identity,
        respond_to: Response<PurchaseReceipt, CartError>,
    },
    Snapshot {
        respond_to: Response<CartSnapshot, CartError>,
    },
    Clear {
        respond_to: Response<(), CartError>,
    },
}

#[derive(Debug)]
pub enum AdminRequest {
    LoadProducts {
        respond_to: Response<Vec<Product>, AdminError>,
    },
    Filter {
        term: String,
        respond_to: Response<Vec<Product>, AdminError>,
    },
    BeginEdit {
        id: String,
        respond_to: Response<ProductForm, AdminError>,
    },
    CancelEdit {
        respond_to: Response<(), AdminError>,
    },
    Save {
        form: ProductForm,
        respond_to: Response<SaveOutcome, AdminError>,
    },
    RequestDelete {
        id: String,
        respond_to: Response<PendingDelete, AdminError>,
    },
    ConfirmDelete {
        id: String,
        respond_to: Response<(), AdminError>,
    },
    Snapshot {
        respond_to: Response<AdminSnapshot, AdminError>,
    },
}

#[derive(Debug)]
pub enum RecordsRequest {
    LoadSales {
        respond_to: Response<Vec<Sale>, RecordsError>,
    },
    RegisterSale {
        sale: NewSale,
        respond_to: Response<Vec<Sale>, RecordsError>,
    },
    LoadUsers {
        respond_to: Response<Vec<UserAccount>, RecordsError>,
    },
    DeleteUser {
        id: String,
        respond_to: Response<Vec<UserAccount>, RecordsError>,
    },
    LoadEmployees {
        respond_to: Response<Vec<Employee>, RecordsError>,
    },
    DeleteEmployee {
        id: String,
        respond_to: Response<Vec<Employee>, RecordsError>,
    },
}
