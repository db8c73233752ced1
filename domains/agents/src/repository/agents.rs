//! Agent repository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Agent, AgentKind};
use crate::repository::AgentStore;
use aurora_common::Result;

#[derive(Clone)]
pub struct AgentRepository {
    pool: PgPool,
}

impl AgentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AgentStore for AgentRepository {
    /// Find agent by ID
    async fn find(&self, id: Uuid) -> Result<Option<Agent>> {
        let agent = sqlx::query_as::<_, Agent>(
            r#"
            SELECT id, name, kind, system_prompt, is_active,
                   created_at, updated_at
            FROM agents
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(agent)
    }

    /// Find the first agent of a given kind
    async fn find_by_kind(&self, kind: AgentKind) -> Result<Option<Agent>> {
        let agent = sqlx::query_as::<_, Agent>(
            r#"
            SELECT id, name, kind, system_prompt, is_active,
                   created_at, updated_at
            FROM agents
            WHERE kind = $1
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(kind)
        .fetch_optional(&self.pool)
        .await?;

        Ok(agent)
    }

    /// List active agents, newest first
    async fn list_active(&self) -> Result<Vec<Agent>> {
        let agents = sqlx::query_as::<_, Agent>(
            r#"
            SELECT id, name, kind, system_prompt, is_active,
                   created_at, updated_at
            FROM agents
            WHERE is_active = TRUE
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(agents)
    }

    /// Create a new agent
    async fn create(&self, agent: &Agent) -> Result<Agent> {
        let created = sqlx::query_as::<_, Agent>(
            r#"
            INSERT INTO agents (
                id, name, kind, system_prompt, is_active,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, kind, system_prompt, is_active,
                      created_at, updated_at
            "#,
        )
        .bind(agent.id)
        .bind(&agent.name)
        .bind(agent.kind)
        .bind(&agent.system_prompt)
        .bind(agent.is_active)
        .bind(agent.created_at)
        .bind(agent.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}
