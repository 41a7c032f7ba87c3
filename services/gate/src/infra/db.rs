use anyhow::Context as _;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use gatehouse_gate_schema::{access_events, marketing_codes, visitors};

use crate::domain::repository::{CodeSource, CodeStore, UsageLedger};
use crate::domain::types::{AccessEvent, CodeRole, Visitor};
use crate::error::GateServiceError;

// ── Code repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCodeRepository {
    pub db: DatabaseConnection,
}

impl CodeSource for DbCodeRepository {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn fetch(&self, role: CodeRole) -> Result<Option<String>, GateServiceError> {
        let model = marketing_codes::Entity::find()
            .filter(marketing_codes::Column::CodeType.eq(role.as_str()))
            .order_by_desc(marketing_codes::Column::UpdatedAt)
            .one(&self.db)
            .await
            .context("fetch marketing code")?;
        Ok(model.map(|m| m.code))
    }
}

impl CodeStore for DbCodeRepository {
    async fn rotate(&self, current: &str, next: &str) -> Result<(), GateServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let current = current.to_owned();
                let next = next.to_owned();
                Box::pin(async move {
                    upsert_code(txn, CodeRole::Current, &current).await?;
                    upsert_code(txn, CodeRole::Next, &next).await?;
                    Ok(())
                })
            })
            .await
            .context("rotate marketing codes")?;
        Ok(())
    }
}

async fn upsert_code(
    txn: &DatabaseTransaction,
    role: CodeRole,
    code: &str,
) -> Result<(), sea_orm::DbErr> {
    let model = marketing_codes::ActiveModel {
        code_type: Set(role.as_str().to_owned()),
        code: Set(code.to_owned()),
        commit_hash: Set(None),
        updated_at: Set(Utc::now()),
    };
    marketing_codes::Entity::insert(model)
        .on_conflict(
            OnConflict::column(marketing_codes::Column::CodeType)
                .update_columns([
                    marketing_codes::Column::Code,
                    marketing_codes::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec(txn)
        .await?;
    Ok(())
}

// ── Usage ledger ──────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUsageLedger {
    pub db: DatabaseConnection,
}

impl UsageLedger for DbUsageLedger {
    async fn get_or_create_visitor(&self, visitor_id: &str) -> Result<Visitor, GateServiceError> {
        let now = Utc::now();
        let existing = visitors::Entity::find_by_id(visitor_id.to_owned())
            .one(&self.db)
            .await
            .context("find visitor")?;

        let model = match existing {
            Some(v) => {
                let visits = v.total_visits + 1;
                let mut active: visitors::ActiveModel = v.into();
                active.total_visits = Set(visits);
                active.last_visit_at = Set(now);
                active.update(&self.db).await.context("update visitor")?
            }
            None => visitors::ActiveModel {
                visitor_id: Set(visitor_id.to_owned()),
                first_visit_at: Set(now),
                last_visit_at: Set(now),
                last_access_code: Set(None),
                total_visits: Set(1),
                has_used_code: Set(false),
            }
            .insert(&self.db)
            .await
            .context("create visitor")?,
        };
        Ok(visitor_from_model(model))
    }

    async fn record_use(&self, event: &AccessEvent) -> Result<(), GateServiceError> {
        access_events::ActiveModel {
            id: Set(event.id),
            visitor_id: Set(event.visitor_id.clone()),
            code: Set(event.code.clone()),
            success: Set(event.success),
            user_agent: Set(event.user_agent.clone()),
            created_at: Set(event.created_at),
        }
        .insert(&self.db)
        .await
        .context("record access event")?;

        if event.success {
            visitors::ActiveModel {
                visitor_id: Set(event.visitor_id.clone()),
                last_access_code: Set(Some(event.code.clone())),
                has_used_code: Set(true),
                ..Default::default()
            }
            .update(&self.db)
            .await
            .context("update visitor last access code")?;
        }
        Ok(())
    }

    async fn history_for(
        &self,
        visitor_id: &str,
        limit: u64,
    ) -> Result<Vec<AccessEvent>, GateServiceError> {
        let models = access_events::Entity::find()
            .filter(access_events::Column::VisitorId.eq(visitor_id))
            .order_by_desc(access_events::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list access events for visitor")?;
        Ok(models.into_iter().map(event_from_model).collect())
    }

    async fn recent_events(&self, limit: u64) -> Result<Vec<AccessEvent>, GateServiceError> {
        let models = access_events::Entity::find()
            .order_by_desc(access_events::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list recent access events")?;
        Ok(models.into_iter().map(event_from_model).collect())
    }
}

fn visitor_from_model(model: visitors::Model) -> Visitor {
    Visitor {
        visitor_id: model.visitor_id,
        first_visit_at: model.first_visit_at,
        last_visit_at: model.last_visit_at,
        last_access_code: model.last_access_code,
        total_visits: model.total_visits,
        has_used_code: model.has_used_code,
    }
}

fn event_from_model(model: access_events::Model) -> AccessEvent {
    AccessEvent {
        id: model.id,
        visitor_id: model.visitor_id,
        code: model.code,
        success: model.success,
        user_agent: model.user_agent,
        created_at: model.created_at,
    }
}
