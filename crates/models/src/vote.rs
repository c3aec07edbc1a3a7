use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, NotSet, Set, TransactionTrait};
use serde::{Deserialize, Serialize};

use crate::{errors, scope};

const ENTITY: &str = "vote";

/// A roll-call vote. No natural key: rows are only ever created, with a store-assigned id.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vote")]
pub struct Model {
    #[sea_orm(primary_key)]
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

pub async fn insert<C>(db: &C, data: Json) -> Result<Model, errors::ModelError>
where
    C: TransactionTrait,
{
    let am = ActiveModel { id: NotSet, data: Set(data) };
    let txn = scope::begin(db, "insert", ENTITY).await?;
    let res = am.insert(&txn).await;
    scope::settle(txn, "insert", ENTITY, "new", res).await
}

pub async fn find<C>(db: &C, id: i64) -> Result<Option<Model>, errors::ModelError>
where
    C: TransactionTrait,
{
    let key = id.to_string();
    let txn = scope::begin(db, "find", ENTITY).await?;
    let res = Entity::find_by_id(id).one(&txn).await;
    scope::settle(txn, "find", ENTITY, &key, res).await
}
