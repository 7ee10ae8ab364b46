use crate::core::AppError;
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use sha2::{Digest, Sha256};
use sqlx::MySqlPool;
use std::future::{ready, Ready};
use std::rc::Rc;

/// API Key authentication middleware
///
/// Callers present `X-API-Key`; the key is hashed with SHA-256 and looked up
/// in the `api_keys` table. The settings-admin variant additionally requires
/// the `can_manage_settings` permission.
pub struct ApiKeyAuth {
    pool: MySqlPool,
    require_settings_permission: bool,
}

impl ApiKeyAuth {
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            pool,
            require_settings_permission: false,
        }
    }

    /// Gate for the admin configuration surface
    pub fn settings_admin(pool: MySqlPool) -> Self {
        Self {
            pool,
            require_settings_permission: true,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiKeyAuthMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyAuthMiddleware {
            service: Rc::new(service),
            pool: self.pool.clone(),
            require_settings_permission: self.require_settings_permission,
        }))
    }
}

pub struct ApiKeyAuthMiddleware<S> {
    service: Rc<S>,
    pool: MySqlPool,
    require_settings_permission: bool,
}

impl<S, B> Service<ServiceRequest> for ApiKeyAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let pool = self.pool.clone();
        let require_settings_permission = self.require_settings_permission;

        Box::pin(async move {
            // Extract API key from X-API-Key header
            let api_key = req
                .headers()
                .get("X-API-Key")
                .and_then(|h| h.to_str().ok())
                .ok_or_else(|| Error::from(AppError::unauthorized("Missing X-API-Key header")))?
                .to_string();

            // Validate API key against database
            let api_key_record = validate_api_key(&pool, &api_key).await.map_err(Error::from)?;

            if require_settings_permission && !api_key_record.can_manage_settings {
                return Err(Error::from(AppError::forbidden(
                    "API key lacks the settings management permission",
                )));
            }

            // Store the key record in request extensions for use in handlers
            req.extensions_mut().insert(api_key_record);

            // Continue to the next middleware/handler
            svc.call(req).await
        })
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApiKeyRecord {
    pub id: i64,
    pub name: String,
    pub can_manage_settings: bool,
    pub is_active: bool,
}

async fn validate_api_key(pool: &MySqlPool, api_key: &str) -> crate::core::Result<ApiKeyRecord> {
    let record = sqlx::query_as::<_, ApiKeyRecord>(
        r#"
        SELECT id, name, can_manage_settings, is_active
        FROM api_keys
        WHERE key_hash = ?
        LIMIT 1
        "#,
    )
    .bind(hash_api_key(api_key))
    .fetch_optional(pool)
    .await
    .map_err(AppError::Database)?
    .ok_or_else(|| AppError::unauthorized("Invalid API key"))?;

    if !record.is_active {
        return Err(AppError::unauthorized("API key is inactive"));
    }

    // Update last_used_at timestamp (fire and forget)
    let _ = sqlx::query("UPDATE api_keys SET last_used_at = NOW() WHERE id = ?")
        .bind(record.id)
        .execute(pool)
        .await;

    Ok(record)
}

/// SHA-256 digest of an API key, hex encoded, as stored in `api_keys.key_hash`
pub fn hash_api_key(api_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hex::encode(hasher.finalize())
}
