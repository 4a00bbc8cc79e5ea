//! # Mock Framework
//!
//! Utilities for testing services without a server.
//!
//! Use [`create_mock_api`] to get an [`ApiClient`] and the receiver behind it.
//! Then use helpers like [`expect_list_products`] or [`expect_add_to_server_cart`]
//! to play the server's part one request at a time.

use tokio::sync::mpsc;

use crate::actor_framework::Response;
use crate::api_actor::ApiError;
use crate::clients::ApiClient;
use crate::domain::{Credentials, Identity, NewSale, OrderLine, Product, ProductDraft, PurchaseReceipt, UserAccount};
use crate::messages::ApiRequest;

/// Creates an API client whose requests land on the returned receiver.
///
/// # Testing Strategy
/// The services under test hold a normal `ApiClient`, so they cannot tell the
/// difference. The test reads each request from `receiver`, checks it, and
/// answers through its `respond_to` channel, which makes success, rejection
/// and transport failure all deterministic.
pub fn create_mock_api(buffer_size: usize) -> (ApiClient, mpsc::Receiver<ApiRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ApiClient::new(sender), receiver)
}

/// Helper to verify that the next message is a product list request
pub async fn expect_list_products(
    receiver: &mut mpsc::Receiver<ApiRequest>,
) -> Option<Response<Vec<Product>, ApiError>> {
    match receiver.recv().await {
        Some(ApiRequest::ListProducts { respond_to }) => Some(respond_to),
        _ => None,
    }
}

pub async fn expect_create_product(
    receiver: &mut mpsc::Receiver<ApiRequest>,
) -> Option<(ProductDraft, Response<(), ApiError>)> {
    match receiver.recv().await {
        Some(ApiRequest::CreateProduct { draft, respond_to }) => Some((draft, respond_to)),
        _ => None,
    }
}

pub async fn expect_update_product(
    receiver: &mut mpsc::Receiver<ApiRequest>,
) -> Option<(String, ProductDraft, Response<(), ApiError>)> {
    match receiver.recv().await {
        Some(ApiRequest::UpdateProduct { id, draft, respond_to }) => Some((id, draft, respond_to)),
        _ => None,
    }
}

pub async fn expect_delete_product(
    receiver: &mut mpsc::Receiver<ApiRequest>,
) -> Option<(String, Response<(), ApiError>)> {
    match receiver.recv().await {
        Some(ApiRequest::DeleteProduct { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message pushes one line to the server cart
pub async fn expect_add_to_server_cart(
    receiver: &mut mpsc::Receiver<ApiRequest>,
) -> Option<(OrderLine, Response<(), ApiError>)> {
    match receiver.recv().await {
        Some(ApiRequest::AddToServerCart { line, respond_to }) => Some((line, respond_to)),
        _ => None,
    }
}

pub async fn expect_clear_server_cart(receiver: &mut mpsc::Receiver<ApiRequest>) -> Option<Response<(), ApiError>> {
    match receiver.recv().await {
        Some(ApiRequest::ClearServerCart { respond_to }) => Some(respond_to),
        _ => None,
    }
}

pub async fn expect_confirm_purchase(
    receiver: &mut mpsc::Receiver<ApiRequest>,
) -> Option<Response<PurchaseReceipt, ApiError>> {
    match receiver.recv().await {
        Some(ApiRequest::ConfirmPurchase { respond_to }) => Some(respond_to),
        _ => None,
    }
}

pub async fn expect_login(
    receiver: &mut mpsc::Receiver<ApiRequest>,
) -> Option<(Credentials, Response<Identity, ApiError>)> {
    match receiver.recv().await {
        Some(ApiRequest::Login { credentials, respond_to }) => Some((credentials, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message asks the server about the session cookie
pub async fn expect_verify_session(
    receiver: &mut mpsc::Receiver<ApiRequest>,
) -> Option<Response<Option<Identity>, ApiError>> {
    match receiver.recv().await {
        Some(ApiRequest::VerifySession { respond_to }) => Some(respond_to),
        _ => None,
    }
}

pub async fn expect_logout(receiver: &mut mpsc::Receiver<ApiRequest>) -> Option<Response<(), ApiError>> {
    match receiver.recv().await {
        Some(ApiRequest::Logout { respond_to }) => Some(respond_to),
        _ => None,
    }
}

pub async fn expect_register_sale(
    receiver: &mut mpsc::Receiver<ApiRequest>,
) -> Option<(NewSale, Response<(), ApiError>)> {
    match receiver.recv().await {
        Some(ApiRequest::RegisterSale { sale, respond_to }) => Some((sale, respond_to)),
        _ => None,
    }
}

pub async fn expect_list_users(
    receiver: &mut mpsc::Receiver<ApiRequest>,
) -> Option<Response<Vec<UserAccount>, ApiError>> {
    match receiver.recv().await {
        Some(ApiRequest::ListUsers { respond_to }) => Some(respond_to),
        _ => None,
    }
}

pub async fn expect_delete_user(
    receiver: &mut mpsc::Receiver<ApiRequest>,
) -> Option<(String, Response<(), ApiError>)> {
    match receiver.recv().await {
        Some(ApiRequest::DeleteUser { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[tokio::test]
    async fn test_mock_api() {
        let (client, mut receiver) = create_mock_api(10);

        let list_task = tokio::spawn(async move { client.list_products().await });

        let responder = expect_list_products(&mut receiver).await.expect("Expected ListProducts request");
        responder.send(Ok(vec![Product::new("P1", "Game A", Decimal::TEN, 2)])).unwrap();

        let result = list_task.await.unwrap().unwrap();
        assert_eq!(result[0].id, "P1");
    }

    #[tokio::test]
    async fn test_unexpected_request_yields_none() {
        let (client, mut receiver) = create_mock_api(10);

        tokio::spawn(async move { client.logout().await });

        assert!(expect_list_products(&mut receiver).await.is_none());
    }
}
