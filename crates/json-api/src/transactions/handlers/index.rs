//! Transaction Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    state::State,
    transactions::{errors::into_status_error, models::TransactionsResponse},
};

/// Transaction Index Handler
///
/// Every purchase, optionally only those made at one shop. Administrators only.
#[endpoint(
    tags("transactions"),
    summary = "List Transactions",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Transactions listed"),
        (status_code = StatusCode::FORBIDDEN, description = "Administrator role required"),
        (status_code = StatusCode::NOT_FOUND, description = "Organization not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Organization is not a shop"),
    ),
)]
pub(crate) async fn handler(
    organization: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<TransactionsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.administrator_or_403()?;

    let transactions = state
        .app
        .transactions
        .list_all(organization.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(transactions.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use lojal_app::{
        auth::Identity,
        domain::transactions::{MockTransactionsService, TransactionsServiceError},
    };

    use crate::{
        test_helpers::{AppMocks, administrator, manager},
        transactions::models::fixtures::make_transaction,
    };

    use super::*;

    fn make_service(transactions: MockTransactionsService, identity: Identity) -> Service {
        AppMocks {
            transactions,
            ..AppMocks::default()
        }
        .service(identity, Router::with_path("transactions").get(handler))
    }

    #[tokio::test]
    async fn test_administrator_lists_every_transaction() -> TestResult {
        let mut transactions = MockTransactionsService::new();

        transactions
            .expect_list_all()
            .once()
            .withf(Option::is_none)
            .return_once(|_| Ok(vec![make_transaction(1, "alice", "Cinema")]));

        let response: TransactionsResponse = TestClient::get("http://example.com/transactions")
            .send(&make_service(transactions, administrator()))
            .await
            .take_json()
            .await?;

        assert_eq!(response.transactions.len(), 1, "expected one transaction");

        Ok(())
    }

    #[tokio::test]
    async fn test_organization_filter_is_forwarded() -> TestResult {
        let mut transactions = MockTransactionsService::new();

        transactions
            .expect_list_all()
            .once()
            .withf(|shop| shop.as_deref() == Some("Cinema"))
            .return_once(|_| Ok(vec![]));

        let res = TestClient::get("http://example.com/transactions?organization=Cinema")
            .send(&make_service(transactions, administrator()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_client_organization_filter_returns_400() -> TestResult {
        let mut transactions = MockTransactionsService::new();

        transactions
            .expect_list_all()
            .once()
            .return_once(|_| Err(TransactionsServiceError::NotAShop));

        let res = TestClient::get("http://example.com/transactions?organization=Acme")
            .send(&make_service(transactions, administrator()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_administrator_gets_403() -> TestResult {
        let mut transactions = MockTransactionsService::new();

        transactions.expect_list_all().never();

        let res = TestClient::get("http://example.com/transactions")
            .send(&make_service(transactions, manager("bob", "Corner Bakery")))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
