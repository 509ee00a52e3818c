//! Organizations Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::organizations::{
    data::NewOrganization,
    records::{Organization, OrganizationKind},
};

const FIND_ORGANIZATION_SQL: &str = include_str!("sql/find_organization.sql");
const CREATE_ORGANIZATION_SQL: &str = include_str!("sql/create_organization.sql");
const MIRROR_SHOP_SQL: &str = include_str!("sql/mirror_shop.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrganizationsRepository;

impl PgOrganizationsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Ledger lookup.
    pub(crate) async fn find_organization(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
    ) -> Result<Option<Organization>, sqlx::Error> {
        query_as::<Postgres, Organization>(FIND_ORGANIZATION_SQL)
            .bind(name)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Ledger insert.
    pub(crate) async fn create_organization(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organization: &NewOrganization,
    ) -> Result<Organization, sqlx::Error> {
        query_as::<Postgres, Organization>(CREATE_ORGANIZATION_SQL)
            .bind(&organization.name)
            .bind(organization.kind.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Inventory insert so offers can reference the shop.
    pub(crate) async fn mirror_shop(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
    ) -> Result<(), sqlx::Error> {
        query(MIRROR_SHOP_SQL).bind(name).execute(&mut **tx).await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for Organization {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind: String = row.try_get("kind")?;

        let kind = kind
            .parse::<OrganizationKind>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "kind".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            name: row.try_get("name")?,
            kind,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
