//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use lojal_app::{
    auth::{Identity, MockAuthService},
    context::AppContext,
    domain::{
        catalog::MockCatalogService, discounts::MockDiscountsService, offers::MockOffersService,
        organizations::MockOrganizationsService, purchases::MockPurchasesService,
        transactions::MockTransactionsService, users::{MockUsersService, records::Role},
    },
};

use crate::state::State;

/// One mock per service. Mocks left at their default reject every call.
#[derive(Default)]
pub(crate) struct AppMocks {
    pub organizations: MockOrganizationsService,
    pub users: MockUsersService,
    pub offers: MockOffersService,
    pub discounts: MockDiscountsService,
    pub catalog: MockCatalogService,
    pub purchases: MockPurchasesService,
    pub transactions: MockTransactionsService,
    pub auth: MockAuthService,
}

impl AppMocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            organizations: Arc::new(self.organizations),
            users: Arc::new(self.users),
            offers: Arc::new(self.offers),
            discounts: Arc::new(self.discounts),
            catalog: Arc::new(self.catalog),
            purchases: Arc::new(self.purchases),
            transactions: Arc::new(self.transactions),
            auth: Arc::new(self.auth),
        })
    }

    /// Serve `route` as `identity`, bypassing bearer authentication.
    pub(crate) fn service(self, identity: Identity, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject(identity))
                .push(route),
        )
    }
}

fn identity(login: &str, organization: &str, role: Role) -> Identity {
    Identity {
        login: login.to_string(),
        role,
        organization: organization.to_string(),
    }
}

pub(crate) fn worker(login: &str, organization: &str) -> Identity {
    identity(login, organization, Role::Worker)
}

pub(crate) fn manager(login: &str, organization: &str) -> Identity {
    identity(login, organization, Role::Manager)
}

pub(crate) fn administrator() -> Identity {
    identity("root", "Lojal", Role::Administrator)
}
