use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

// Slug uniqueness is scoped per owner, not global; the (user_id, slug)
// unique index lives in the migration because the column derive cannot
// express a composite constraint.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "custom_lists")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub user_id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub cover_color: Option<String>,
    pub is_public: bool,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
