use sea_orm::entity::prelude::*;

/// Per-browser visitor record. Created on first sighting, visit counter
/// incremented on each gate submission, never deleted by the service.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "visitors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub visitor_id: String,
    pub first_visit_at: chrono::DateTime<chrono::Utc>,
    pub last_visit_at: chrono::DateTime<chrono::Utc>,
    pub last_access_code: Option<String>,
    pub total_visits: i32,
    pub has_used_code: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
