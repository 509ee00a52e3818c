//! Test Helpers

use jiff::{SignedDuration, Timestamp};
use lojal::reductions::Reduction;
use testresult::TestResult;

use crate::{
    domain::{
        discounts::{DiscountsService, data::NewDiscount, models::Discount},
        offers::{
            OffersService,
            data::{NewCode, NewOffer},
            records::{Offer, OfferId},
        },
        organizations::{
            OrganizationsService, OrganizationsServiceError, data::NewOrganization,
            records::{Organization, OrganizationKind},
        },
        users::{
            UsersService,
            data::NewUser,
            records::{Role, User},
        },
    },
    test::TestContext,
};

/// Registers an organization, or returns it if it already exists.
async fn ensure_organization(
    ctx: &TestContext,
    name: &str,
    kind: OrganizationKind,
) -> Result<Organization, OrganizationsServiceError> {
    let result = ctx
        .organizations
        .create_organization(NewOrganization {
            name: name.to_string(),
            kind,
        })
        .await;

    match result {
        Err(OrganizationsServiceError::AlreadyExists) => {
            ctx.organizations.get_organization(name).await
        }
        other => other,
    }
}

pub(crate) async fn create_shop(
    ctx: &TestContext,
    name: &str,
) -> Result<Organization, OrganizationsServiceError> {
    ensure_organization(ctx, name, OrganizationKind::Shop).await
}

/// Creates a worker in a client organization, registering the organization on first use.
pub(crate) async fn create_client_with_user(
    ctx: &TestContext,
    organization: &str,
    login: &str,
    credits: Option<u64>,
) -> TestResult<User> {
    ensure_organization(ctx, organization, OrganizationKind::Client).await?;

    let user = ctx
        .users
        .create_user(NewUser {
            login: login.to_string(),
            organization: organization.to_string(),
            role: Role::Worker,
            credits,
        })
        .await?;

    Ok(user)
}

/// Publishes an active offer, registering the shop on first use.
pub(crate) async fn create_offer(ctx: &TestContext, shop: &str, price: u64) -> TestResult<Offer> {
    create_shop(ctx, shop).await?;

    let offer = ctx
        .offers
        .create_offer(NewOffer {
            organization: shop.to_string(),
            name: format!("Offer at {price}"),
            price,
            category: None,
            active: true,
        })
        .await?;

    Ok(offer)
}

/// Adds one code expiring `expires_in` from now. Negative durations give expired codes.
pub(crate) async fn add_code(
    ctx: &TestContext,
    offer: OfferId,
    code: i64,
    expires_in: SignedDuration,
) -> TestResult<u64> {
    let expiry = Timestamp::now().checked_add(expires_in)?;

    let added = ctx
        .offers
        .add_codes(offer, vec![NewCode { code, expiry }])
        .await?;

    Ok(added)
}

pub(crate) async fn set_discount(
    ctx: &TestContext,
    offer: OfferId,
    reduction: Reduction,
    expires_in: SignedDuration,
) -> TestResult<Discount> {
    let expiry = Timestamp::now().checked_add(expires_in)?;

    let discount = ctx
        .discounts
        .set_discount(
            offer,
            NewDiscount {
                name: None,
                reduction,
                expiry,
            },
        )
        .await?;

    Ok(discount)
}
