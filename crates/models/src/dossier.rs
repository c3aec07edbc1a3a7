use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{document, errors, scope};

const ENTITY: &str = "dossier";

/// A legislative procedure, keyed by its procedure reference.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dossier")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub data: Json,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

/// Natural key of a dossier document: `procedure.reference`.
///
/// Only strings qualify: postgres renders numbers through `#>>` differently
/// from serde_json, so a numeric reference could not be looked up again.
pub fn reference_of(data: &Json) -> Result<String, errors::ModelError> {
    match document::value_at(data, &["procedure", "reference"]) {
        Some(Json::String(r)) if !r.trim().is_empty() => Ok(r.clone()),
        _ => Err(errors::ModelError::MissingKey { entity: ENTITY, path: "procedure.reference" }),
    }
}

fn by_reference(reference: &str) -> Select<Entity> {
    Entity::find().filter(Expr::cust_with_values("data #>> '{procedure,reference}' = $1", [reference.to_owned()]))
}

fn by_source(source: &str) -> Select<Entity> {
    Entity::find().filter(Expr::cust_with_values("data #>> '{meta,source}' = $1", [source.to_owned()]))
}

pub async fn get_by_id<'a, C>(db: &C, id: impl Into<Option<&'a str>>) -> Result<Option<Model>, errors::ModelError>
where
    C: TransactionTrait,
{
    let Some(id) = document::present(id.into()) else { return Ok(None) };
    let txn = scope::begin(db, "get_by_id", ENTITY).await?;
    let res = by_reference(id).one(&txn).await;
    scope::settle(txn, "get_by_id", ENTITY, id, res).await
}

/// First dossier whose `meta.source` equals `src`.
pub async fn get_by_src<'a, C>(db: &C, src: impl Into<Option<&'a str>>) -> Result<Option<Model>, errors::ModelError>
where
    C: TransactionTrait,
{
    let Some(src) = document::present(src.into()) else { return Ok(None) };
    let txn = scope::begin(db, "get_by_src", ENTITY).await?;
    let res = by_source(src).one(&txn).await;
    scope::settle(txn, "get_by_src", ENTITY, src, res).await
}

/// Insert the dossier, or replace the stored payload of the one with the same reference.
pub async fn upsert<C>(db: &C, data: Json) -> Result<Model, errors::ModelError>
where
    C: TransactionTrait,
{
    let reference = reference_of(&data)?;
    let am = ActiveModel { id: Set(reference.clone()), data: Set(data) };
    let txn = scope::begin(db, "upsert", ENTITY).await?;
    let res = Entity::insert(am)
        .on_conflict(OnConflict::column(Column::Id).update_column(Column::Data).to_owned())
        .exec_with_returning(&txn)
        .await;
    let saved = scope::settle(txn, "upsert", ENTITY, &reference, res).await?;
    debug!(entity = ENTITY, key = %saved.id, "upserted");
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, QueryTrait};
    use serde_json::json;

    fn sample() -> Model {
        Model {
            id: "2024/0001".into(),
            data: json!({"procedure": {"reference": "2024/0001"}, "meta": {"source": "EP"}}),
        }
    }

    #[test]
    fn reference_lookup_filters_on_document_path() {
        let sql = by_reference("2024/0001").build(DatabaseBackend::Postgres).to_string();
        assert!(sql.contains("FROM \"dossier\""), "{sql}");
        assert!(sql.contains("data #>> '{procedure,reference}' = '2024/0001'"), "{sql}");
    }

    #[test]
    fn source_lookup_filters_on_document_path() {
        let sql = by_source("EP").build(DatabaseBackend::Postgres).to_string();
        assert!(sql.contains("data #>> '{meta,source}' = 'EP'"), "{sql}");
    }

    #[test]
    fn reference_is_required_for_upsert() {
        assert_eq!(reference_of(&json!({"procedure": {"reference": "2024/0001"}})).unwrap(), "2024/0001");
        for bad in [
            json!({}),
            json!({"procedure": {}}),
            json!({"procedure": {"reference": ""}}),
            json!({"procedure": {"reference": null}}),
            json!({"procedure": {"reference": 1e20}}),
            json!({"procedure": {"reference": 20240001}}),
        ] {
            assert!(matches!(reference_of(&bad), Err(errors::ModelError::MissingKey { entity: "dossier", .. })), "{bad}");
        }
    }

    #[tokio::test]
    async fn absent_or_blank_keys_never_reach_the_store() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        assert_eq!(get_by_id(&db, None::<&str>).await.unwrap(), None);
        assert_eq!(get_by_id(&db, "").await.unwrap(), None);
        assert_eq!(get_by_src(&db, None::<&str>).await.unwrap(), None);
        assert_eq!(get_by_src(&db, " ").await.unwrap(), None);
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn lookups_return_stored_document() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample()], vec![sample()], Vec::<Model>::new()])
            .into_connection();

        let by_id = get_by_id(&db, "2024/0001").await.unwrap().unwrap();
        assert_eq!(by_id.data, sample().data);
        let by_src = get_by_src(&db, "EP").await.unwrap().unwrap();
        assert_eq!(by_src.id, "2024/0001");
        assert_eq!(get_by_src(&db, "XX").await.unwrap(), None);
    }

    #[tokio::test]
    async fn upsert_is_a_single_conflict_aware_insert() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample()]])
            .into_connection();

        let saved = upsert(&db, sample().data).await.unwrap();
        assert_eq!(saved, sample());

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("INSERT INTO"), "{log}");
        assert!(log.contains("ON CONFLICT"), "{log}");
        assert!(log.contains("DO UPDATE SET"), "{log}");
        assert!(log.contains("RETURNING"), "{log}");
    }

    #[tokio::test]
    async fn upsert_without_reference_does_not_write() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let err = upsert(&db, json!({"meta": {"source": "EP"}})).await.unwrap_err();
        assert!(matches!(err, errors::ModelError::MissingKey { .. }));
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn failed_lookup_leaves_handle_usable() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset by peer".into())])
            .append_query_results([vec![sample()]])
            .into_connection();

        let err = get_by_id(&db, "2024/0001").await.unwrap_err();
        assert!(matches!(err, errors::ModelError::Db(ref m) if m.contains("connection reset")));
        assert!(errors::or_log(Err::<Option<Model>, _>(err)).is_none());

        let found = get_by_id(&db, "2024/0001").await.unwrap();
        assert_eq!(found, Some(sample()));
    }
}
