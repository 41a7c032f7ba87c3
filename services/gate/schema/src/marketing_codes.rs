use sea_orm::entity::prelude::*;

/// Stored marketing code, one row per role (`current` / `next`).
/// Written by deploy tooling or the rotate endpoint; the resolver reads the
/// freshest row per role.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "marketing_codes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code_type: String,
    pub code: String,
    pub commit_hash: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
