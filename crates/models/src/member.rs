use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{DatabaseTransaction, PaginatorTrait, QuerySelect, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::{document, errors, scope};

const ENTITY: &str = "member";

/// A member of parliament. The row id mirrors the document's `UserID`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "mep")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    #[sea_orm(column_type = "JsonBinary")]
    pub data: Json,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn user_id_of(data: &Json) -> Result<i64, errors::ModelError> {
    document::integer_at(data, &["UserID"]).ok_or(errors::ModelError::MissingKey { entity: ENTITY, path: "UserID" })
}

// The row id mirrors `UserID`, so the key column is authoritative even when
// the document spells the id as a string ("043", " 43 ").
fn by_user_id(user_id: i64) -> Select<Entity> {
    Entity::find_by_id(user_id)
}

fn by_alias(name: &str) -> Select<Entity> {
    Entity::find().filter(Expr::cust_with_values("data -> 'Name' -> 'aliases' @> $1", [json!([name])]))
}

pub async fn get_by_id<C>(db: &C, user_id: impl Into<Option<i64>>) -> Result<Option<Model>, errors::ModelError>
where
    C: TransactionTrait,
{
    let Some(user_id) = user_id.into() else { return Ok(None) };
    let key = user_id.to_string();
    let txn = scope::begin(db, "get_by_id", ENTITY).await?;
    let res = by_user_id(user_id).one(&txn).await;
    scope::settle(txn, "get_by_id", ENTITY, &key, res).await
}

/// At most two candidate rows, plus the full match count when there is more than one.
async fn alias_matches(txn: &DatabaseTransaction, name: &str) -> Result<(Vec<Model>, Option<u64>), DbErr> {
    let found = by_alias(name).limit(2_u64).all(txn).await?;
    if found.len() < 2 {
        return Ok((found, None));
    }
    let total = by_alias(name).count(txn).await?;
    Ok((found, Some(total)))
}

/// Member whose `Name.aliases` array contains `name`.
///
/// More than one match is reported as [`errors::ModelError::Ambiguous`];
/// no candidate is picked.
pub async fn get_by_name<'a, C>(db: &C, name: impl Into<Option<&'a str>>) -> Result<Option<Model>, errors::ModelError>
where
    C: TransactionTrait,
{
    let Some(name) = document::present(name.into()) else { return Ok(None) };
    let txn = scope::begin(db, "get_by_name", ENTITY).await?;
    let res = alias_matches(&txn, name).await;
    let (mut found, total) = scope::settle(txn, "get_by_name", ENTITY, name, res).await?;
    if let Some(matches) = total {
        let ids: Vec<i64> = found.iter().map(|m| m.id).collect();
        warn!(entity = ENTITY, key = name, matches, ?ids, "alias shared by several members");
        return Err(errors::ModelError::Ambiguous { entity: ENTITY, key: name.to_string(), matches: matches as usize });
    }
    Ok(found.pop())
}

/// Insert the member, or replace the stored payload of the one with the same `UserID`.
pub async fn upsert<C>(db: &C, data: Json) -> Result<Model, errors::ModelError>
where
    C: TransactionTrait,
{
    let user_id = user_id_of(&data)?;
    let key = user_id.to_string();
    let am = ActiveModel { id: Set(user_id), data: Set(data) };
    let txn = scope::begin(db, "upsert", ENTITY).await?;
    let res = Entity::insert(am)
        .on_conflict(OnConflict::column(Column::Id).update_column(Column::Data).to_owned())
        .exec_with_returning(&txn)
        .await;
    let saved = scope::settle(txn, "upsert", ENTITY, &key, res).await?;
    debug!(entity = ENTITY, key = saved.id, "upserted");
    Ok(saved)
}
