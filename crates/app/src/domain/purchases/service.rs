//! Purchases service.

use std::time::Duration;

use async_trait::async_trait;
use jiff::Timestamp;
use lojal::{
    codes::Quantity,
    pricing::{PricingError, Quote, quote},
    purchases::PurchaseState,
};
use mockall::automock;
use smallvec::SmallVec;
use sqlx::{Postgres, Transaction};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    database::Stores,
    domain::{
        discounts::{models::Discount, repository::PgDiscountsRepository},
        offers::{
            records::{Offer, OfferId},
            repository::PgOffersRepository,
        },
        purchases::{
            allocator::CodeAllocator,
            compensation::Compensator,
            data::PurchaseRequest,
            errors::PurchasesServiceError,
            models::{Purchase, PurchasedCode},
            records::{CodeRecord, IntentStatus, IntentUuid, PurchaseIntent},
            repositories::{NewIntent, NewTransaction, PgIntentsRepository, PgReceiptsRepository},
        },
        users::repository::PgUsersRepository,
    },
};

/// Time budget for one purchase unless configured otherwise.
pub const DEFAULT_PURCHASE_TIMEOUT: Duration = Duration::from_secs(10);

type Tx = Transaction<'static, Postgres>;

/// Writes a purchase holds until both stores commit.
struct Held {
    quote: Quote,
    balance: u64,
    codes: SmallVec<[CodeRecord; 4]>,
}

#[derive(Debug, Clone)]
pub struct PgPurchasesService {
    stores: Stores,
    budget: Duration,
    users: PgUsersRepository,
    offers: PgOffersRepository,
    discounts: PgDiscountsRepository,
    intents: PgIntentsRepository,
    receipts: PgReceiptsRepository,
    allocator: CodeAllocator,
    compensator: Compensator,
}

impl PgPurchasesService {
    #[must_use]
    pub fn new(stores: Stores, budget: Duration) -> Self {
        Self {
            compensator: Compensator::new(stores.clone()),
            stores,
            budget,
            users: PgUsersRepository::new(),
            offers: PgOffersRepository::new(),
            discounts: PgDiscountsRepository::new(),
            intents: PgIntentsRepository::new(),
            receipts: PgReceiptsRepository::new(),
            allocator: CodeAllocator::new(),
        }
    }

    async fn execute(
        &self,
        buyer: &str,
        offer: OfferId,
        quantity: Quantity,
    ) -> Result<Purchase, PurchasesServiceError> {
        let mut state = PurchaseState::Validating;

        let mut ledger = self.stores.ledger.begin().await?;

        self.users
            .find_user(&mut ledger, buyer)
            .await?
            .ok_or(PurchasesServiceError::UnknownUser)?;

        ledger.commit().await?;

        let mut inventory = self.stores.inventory.begin().await?;

        let offer = self
            .offers
            .find_offer(&mut inventory, offer)
            .await?
            .filter(|offer| offer.active)
            .ok_or(PurchasesServiceError::UnknownOffer)?;

        inventory.commit().await?;

        let mut ledger = self.stores.ledger.begin().await?;

        let intent = self
            .intents
            .create_intent(
                &mut ledger,
                &NewIntent {
                    uuid: IntentUuid::new(),
                    login: buyer,
                    offer: offer.id,
                    quantity: quantity.get(),
                    created_at: Timestamp::now(),
                },
            )
            .await?;

        ledger.commit().await?;

        advance(&mut state);

        let (mut inventory, mut ledger) = match self.open().await {
            Ok(open) => open,
            Err(error) => return Err(self.abort(&intent, state, error.into()).await),
        };

        let held = match self
            .hold(&mut inventory, &mut ledger, &intent, &offer, quantity, &mut state)
            .await
        {
            Ok(held) => held,
            Err(error) => {
                rollback(inventory, "inventory").await;
                rollback(ledger, "ledger").await;

                return Err(self.abort(&intent, state, error).await);
            }
        };

        if let Err(error) = inventory.commit().await {
            error!(%error, "inventory commit failed");

            rollback(ledger, "ledger").await;
            self.release(intent.uuid).await;

            return Err(error.into());
        }

        if let Err(error) = ledger.commit().await {
            if !self.landed(intent.uuid).await {
                return Err(error.into());
            }

            warn!(%error, "ledger commit reported failure but the intent completed");
        }

        advance(&mut state);

        info!(
            intent = %intent.uuid,
            codes = held.codes.len(),
            total = held.quote.total,
            "purchase completed"
        );

        Ok(Purchase {
            intent: intent.uuid,
            offer: offer.id,
            unit_price: held.quote.unit_price,
            total: held.quote.total,
            balance: held.balance,
            codes: held
                .codes
                .iter()
                .map(|code| PurchasedCode {
                    code: code.code,
                    expiry: code.expiry,
                })
                .collect(),
        })
    }

    /// Inventory first, then ledger.
    async fn open(&self) -> Result<(Tx, Tx), sqlx::Error> {
        let inventory = self.stores.inventory.begin().await?;
        let ledger = self.stores.ledger.begin().await?;

        Ok((inventory, ledger))
    }

    /// Prices, allocates, debits and writes the receipt without committing.
    async fn hold(
        &self,
        inventory: &mut Tx,
        ledger: &mut Tx,
        intent: &PurchaseIntent,
        offer: &Offer,
        quantity: Quantity,
        state: &mut PurchaseState,
    ) -> Result<Held, PurchasesServiceError> {
        let now = Timestamp::now();

        let discount = self
            .discounts
            .find_active_discount(inventory, offer.id, now)
            .await?
            .map(Discount::try_from)
            .transpose()?;

        let quote = quote(
            offer.price,
            discount.as_ref().map(|discount| &discount.reduction),
            quantity,
        )?;

        advance(state);

        let codes = self
            .allocator
            .allocate(inventory, offer.id, quantity, intent.uuid, now)
            .await?;

        advance(state);

        let buyer = match self
            .users
            .debit_credits(ledger, &intent.login, signed(quote.total, &quote)?, now)
            .await?
        {
            Some(buyer) => buyer,
            None => {
                let balance = self
                    .users
                    .find_user(ledger, &intent.login)
                    .await?
                    .ok_or(PurchasesServiceError::UnknownUser)?
                    .balance();

                return Err(PurchasesServiceError::InsufficientCredits {
                    required: quote.total,
                    balance,
                });
            }
        };

        advance(state);

        self.receipts
            .copy_offer(ledger, offer, signed(offer.price, &quote)?, now)
            .await?;

        if let Some(discount) = &discount {
            self.receipts.copy_discount(ledger, discount, now).await?;
        }

        let unit_price = signed(quote.unit_price, &quote)?;

        for code in &codes {
            self.receipts
                .copy_code(
                    ledger,
                    offer.id,
                    code.code,
                    discount.as_ref().map(|discount| discount.id),
                    code.expiry,
                )
                .await?;

            self.receipts
                .record_transaction(
                    ledger,
                    &NewTransaction {
                        login: &intent.login,
                        shop: &offer.organization,
                        offer: offer.id,
                        code: code.code,
                        price: unit_price,
                        intent: intent.uuid,
                        created_at: now,
                    },
                )
                .await?;
        }

        let numbers: Vec<i64> = codes.iter().map(|code| code.code).collect();

        // A claimed intent belongs to the reconciler now.
        if !self
            .intents
            .complete_intent(ledger, intent.uuid, &numbers, now)
            .await?
        {
            return Err(PurchasesServiceError::TimedOut);
        }

        advance(state);

        Ok(Held {
            quote,
            balance: buyer.balance(),
            codes,
        })
    }

    /// Marks an intent aborted after both transactions rolled back.
    async fn abort(
        &self,
        intent: &PurchaseIntent,
        state: PurchaseState,
        error: PurchasesServiceError,
    ) -> PurchasesServiceError {
        warn!(intent = %intent.uuid, %state, %error, "purchase aborted");

        let marked = async {
            let mut ledger = self.stores.ledger.begin().await?;
            let marked = self
                .intents
                .abort_intent(&mut ledger, intent.uuid, Timestamp::now())
                .await?;
            ledger.commit().await?;

            Ok::<_, sqlx::Error>(marked)
        }
        .await;

        if let Err(mark_error) = marked {
            warn!(intent = %intent.uuid, error = %mark_error, "could not mark intent aborted");
        }

        error
    }

    /// Whether a ledger commit that reported failure actually completed the intent.
    ///
    /// When it did not, the intent's inventory codes are released straight away. When the
    /// intent cannot be read, it stays unsettled for the reconciler.
    async fn landed(&self, intent: IntentUuid) -> bool {
        let status = async {
            let mut ledger = self.stores.ledger.begin().await?;
            let found = self.intents.find_intent(&mut ledger, intent).await?;
            ledger.commit().await?;

            Ok::<_, sqlx::Error>(found.map(|found| found.status))
        }
        .await;

        match status {
            Ok(Some(IntentStatus::Completed)) => true,
            Ok(_) => {
                self.release(intent).await;
                false
            }
            Err(error) => {
                error!(%intent, %error, "intent unreadable, leaving it to the reconciler");
                false
            }
        }
    }

    async fn release(&self, intent: IntentUuid) {
        if let Err(error) = self.compensator.compensate(intent).await {
            error!(%intent, %error, "compensation failed, leaving it to the reconciler");
        }
    }
}

fn advance(state: &mut PurchaseState) {
    let next = state.next();

    debug!(from = %state, to = %next, "purchase advanced");

    *state = next;
}

async fn rollback(tx: Tx, store: &'static str) {
    if let Err(error) = tx.rollback().await {
        debug!(store, %error, "rollback failed");
    }
}

/// Credits as stored. Anything within a valid quote fits.
fn signed(amount: u64, quote: &Quote) -> Result<i64, PricingError> {
    i64::try_from(amount).map_err(|_| PricingError::TotalOverflow {
        unit_price: quote.unit_price,
        quantity: quote.quantity.get(),
    })
}

#[async_trait]
impl PurchasesService for PgPurchasesService {
    #[instrument(
        skip(self, request),
        fields(buyer = %request.buyer, offer = %request.offer, quantity = request.quantity)
    )]
    async fn purchase(&self, request: PurchaseRequest) -> Result<Purchase, PurchasesServiceError> {
        let quantity = Quantity::from_signed(request.quantity)?;

        let Ok(result) = tokio::time::timeout(
            self.budget,
            self.execute(&request.buyer, request.offer, quantity),
        )
        .await
        else {
            warn!(budget = ?self.budget, "purchase timed out");

            return Err(PurchasesServiceError::TimedOut);
        };

        result
    }
}

#[automock]
#[async_trait]
pub trait PurchasesService: Send + Sync {
    /// Buys codes of an offer for the requesting user.
    ///
    /// Either the buyer is debited, the codes are redeemed and the receipt is written, or none
    /// of it happens.
    async fn purchase(&self, request: PurchaseRequest) -> Result<Purchase, PurchasesServiceError>;
}
