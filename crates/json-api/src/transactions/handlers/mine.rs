//! Own Transactions Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    transactions::{errors::into_status_error, models::TransactionsResponse},
};

/// Own Transactions Handler
///
/// Purchase history of the authenticated user.
#[endpoint(
    tags("transactions"),
    summary = "List Own Transactions",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<TransactionsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let transactions = state
        .app
        .transactions
        .list_for_user(&identity.login)
        .await
        .map_err(into_status_error)?;

    Ok(Json(transactions.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use lojal_app::domain::transactions::MockTransactionsService;

    use crate::{
        test_helpers::{AppMocks, worker},
        transactions::models::fixtures::make_transaction,
    };

    use super::*;

    #[tokio::test]
    async fn test_lists_history_of_the_caller() -> TestResult {
        let mut transactions = MockTransactionsService::new();

        transactions
            .expect_list_for_user()
            .once()
            .withf(|login| login == "alice")
            .return_once(|_| {
                Ok(vec![
                    make_transaction(2, "alice", "Cinema"),
                    make_transaction(1, "alice", "Corner Bakery"),
                ])
            });

        let service = AppMocks {
            transactions,
            ..AppMocks::default()
        }
        .service(
            worker("alice", "Acme"),
            Router::with_path("me/transactions").get(handler),
        );

        let response: TransactionsResponse = TestClient::get("http://example.com/me/transactions")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(response.transactions.len(), 2, "expected two transactions");
        assert_eq!(response.transactions[0].id, 2);
        assert_eq!(
            response.transactions[0]
                .discount
                .as_ref()
                .map(|discount| discount.reduction.as_str()),
            Some("20%")
        );

        Ok(())
    }
}
