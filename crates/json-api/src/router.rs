//! App Router

use salvo::Router;

use crate::{auth, discounts, offers, purchases, transactions, users};

pub fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("organizations/{organization}/offers")
                .get(offers::handlers::index::handler),
        )
        .push(
            Router::with_path("offers")
                .post(offers::handlers::create::handler)
                .push(
                    Router::with_path("{offer}")
                        .get(offers::handlers::get::handler)
                        .push(
                            Router::with_path("availability")
                                .get(offers::handlers::availability::handler),
                        )
                        .push(Router::with_path("codes").post(offers::handlers::codes::handler))
                        .push(
                            Router::with_path("discount")
                                .put(discounts::handlers::set::handler)
                                .delete(discounts::handlers::clear::handler),
                        )
                        .push(
                            Router::with_path("purchases")
                                .post(purchases::handlers::create::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("me")
                .push(Router::with_path("balance").get(users::handlers::balance::handler))
                .push(
                    Router::with_path("transactions").get(transactions::handlers::mine::handler),
                ),
        )
        .push(Router::with_path("transactions").get(transactions::handlers::index::handler))
        .push(
            Router::with_path("users/{login}/credits").post(users::handlers::credits::handler),
        )
}
