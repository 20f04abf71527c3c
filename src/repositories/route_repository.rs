use crate::models::route::{RouteStop, RouteWithStops};
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

/// Read-only access to routes and the stop sequence of their current
/// version. Route CRUD and versioning belong to another subsystem; this
/// repository only serves fare calculation.
pub struct RouteRepository {
    pool: PgPool,
}

impl RouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Route with the ordered stops of its current version, or `None`
    /// when the route is absent or has no current version.
    pub async fn get_route_with_current_stops(
        &self,
        route_id: Uuid,
    ) -> Result<Option<RouteWithStops>, AppError> {
        let route: Option<(Uuid, Uuid)> = sqlx::query_as(
            r#"
            SELECT id, company_id FROM routes
            WHERE id = $1 AND current_version_id IS NOT NULL
            "#,
        )
        .bind(route_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some((id, company_id)) = route else {
            return Ok(None);
        };

        let stops = sqlx::query_as::<_, RouteStop>(
            r#"
            SELECT s.stop_id, s.sequence_number
            FROM route_version_stops s
            JOIN routes r ON s.route_version_id = r.current_version_id
            WHERE r.id = $1
            ORDER BY s.sequence_number ASC
            "#,
        )
        .bind(route_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(RouteWithStops {
            route_id: id,
            company_id,
            stops,
        }))
    }
}
