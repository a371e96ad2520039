use super::dto::{AuthResponse, LoginRequest, RegisterRequest, TokenClaims, UserResponse};
use super::model::User;
use super::repository::AuthRepository;
use crate::common::error::{AppError, AppResult};
use crate::common::security;
use crate::state::AppState;
use jsonwebtoken::{EncodingKey, Header, encode, get_current_timestamp};
use redis::AsyncCommands;
use uuid::Uuid;

const ACCESS_TOKEN_TTL_SECS: usize = 15 * 60;
const REFRESH_TOKEN_TTL_SECS: u64 = 7 * 24 * 60 * 60;

pub struct AuthService;

impl AuthService {
    pub async fn register(state: AppState, req: RegisterRequest) -> AppResult<UserResponse> {
        if AuthRepository::find_user_by_email(&state.db, &req.email)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest("Email already exists".to_string()));
        }

        if AuthRepository::find_user_by_username(&state.db, &req.username)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest("Username already exists".to_string()));
        }

        let password_hash = security::hash_password(&req.password)?;

        let user = AuthRepository::create_user(
            &state.db,
            &req.username,
            &req.email,
            &password_hash,
            &req.full_name,
        )
        .await?;

        Ok(Self::user_response(user))
    }

    pub async fn login(state: AppState, req: LoginRequest) -> AppResult<(AuthResponse, String)> {
        let user = AuthRepository::find_user_by_email(&state.db, &req.email)
            .await?
            .ok_or(AppError::Unauthorized)?;

        security::verify_password(&req.password, &user.password_hash)
            .map_err(|_| AppError::Unauthorized)?;

        let access_token = Self::create_access_token(&state, user.id)?;
        // Format: user_id:random_uuid
        let refresh_token = format!("{}:{}", user.id, Uuid::new_v4());

        let mut redis_conn = state.redis.get_conn().await?;
        AuthRepository::store_refresh_token(
            &mut redis_conn,
            user.id,
            &refresh_token,
            REFRESH_TOKEN_TTL_SECS,
        )
        .await?;

        Ok((
            AuthResponse {
                access_token,
                user: Self::user_response(user),
            },
            refresh_token,
        ))
    }

    pub async fn logout(state: AppState, user_id: Uuid) -> AppResult<()> {
        let mut redis_conn = state.redis.get_conn().await?;
        AuthRepository::delete_refresh_token(&mut redis_conn, user_id).await?;
        Ok(())
    }

    pub async fn block_token(state: AppState, token: String, ttl: u64) -> AppResult<()> {
        let mut redis_conn = state.redis.get_conn().await?;
        let key = format!("blocked_token:{token}");
        redis_conn.set_ex::<_, _, ()>(key, "blocked", ttl).await?;
        Ok(())
    }

    pub async fn refresh_access(
        state: AppState,
        refresh_token: String,
        user_id: Uuid,
    ) -> AppResult<(AuthResponse, String)> {
        let mut redis_conn = state.redis.get_conn().await?;

        let stored = AuthRepository::get_refresh_token(&mut redis_conn, user_id).await?;
        match stored {
            Some(token) if token == refresh_token => {}
            _ => return Err(AppError::Unauthorized),
        }

        let user = AuthRepository::find_user_by_id(&state.db, user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let access_token = Self::create_access_token(&state, user.id)?;

        // Rotate the refresh token on every use.
        let new_refresh_token = format!("{}:{}", user.id, Uuid::new_v4());
        AuthRepository::store_refresh_token(
            &mut redis_conn,
            user.id,
            &new_refresh_token,
            REFRESH_TOKEN_TTL_SECS,
        )
        .await?;

        Ok((
            AuthResponse {
                access_token,
                user: Self::user_response(user),
            },
            new_refresh_token,
        ))
    }

    pub async fn me(state: AppState, user_id: Uuid) -> AppResult<UserResponse> {
        let user = AuthRepository::find_user_by_id(&state.db, user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;
        Ok(Self::user_response(user))
    }

    fn create_access_token(state: &AppState, user_id: Uuid) -> AppResult<String> {
        let now = get_current_timestamp() as usize;
        let claims = TokenClaims {
            sub: user_id,
            exp: now + ACCESS_TOKEN_TTL_SECS,
            iat: now,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(state.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to sign token: {e}")))
    }

    fn user_response(user: User) -> UserResponse {
        UserResponse {
            id: user.id,
            email: user.email,
            username: user.username,
            full_name: user.full_name,
        }
    }
}
