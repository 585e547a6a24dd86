//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use kernel::context::RequestUser;
use kernel::error::app_error::AppResult;
use kernel::id::UserId;
use kernel::response::ApiResponse;
use platform::jwt::JwtManager;
use platform::mailer::MailSender;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::IdentityConfig;
use crate::application::{
    AccountUseCase, CreateUserInput, EmailVerificationUseCase, LoginInput, LoginUseCase,
    PasswordResetUseCase, RegisterInput, RegisterUseCase, UpdateProfileInput, UpdateUserInput,
};
use crate::domain::repository::UserRepository;
use crate::presentation::dto::{
    AuthResponse, ChangePasswordRequest, CreateUserRequest, ForgotPasswordRequest, LoginRequest,
    RegisterRequest, ResetPasswordRequest, UpdateProfileRequest, UpdateUserRequest,
    UserResponse, VerifyEmailRequest, VerifyResetTokenRequest, VerifyResetTokenResponse,
};

/// Shared state for identity handlers
#[derive(Clone)]
pub struct IdentityAppState<R, M>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MailSender + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub jwt: Arc<JwtManager>,
    pub config: Arc<IdentityConfig>,
}

// ============================================================================
// Auth endpoints
// ============================================================================

/// POST /api/auth/login
pub async fn login<R, M>(
    State(state): State<IdentityAppState<R, M>>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MailSender + Clone + Send + Sync + 'static,
{
    req.validate()?;

    let use_case = LoginUseCase::new(state.repo.clone(), state.jwt.clone(), state.config.clone());
    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(ApiResponse::ok(
        "Login successful",
        AuthResponse {
            user: UserResponse::from_entity(&output.user),
            access_token: output.access_token,
        },
    )))
}

/// POST /api/auth/register
pub async fn register<R, M>(
    State(state): State<IdentityAppState<R, M>>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MailSender + Clone + Send + Sync + 'static,
{
    req.validate()?;

    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.mailer.clone(),
        state.jwt.clone(),
        state.config.clone(),
    );
    let output = use_case
        .execute(RegisterInput {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            phone: req.phone,
        })
        .await?;

    Ok(Json(ApiResponse::ok(
        "Registration successful. Please verify your email address.",
        AuthResponse {
            user: UserResponse::from_entity(&output.user),
            access_token: output.access_token,
        },
    )))
}

/// GET /api/auth/me
pub async fn me<R, M>(
    State(state): State<IdentityAppState<R, M>>,
    user: RequestUser,
) -> AppResult<Json<ApiResponse<UserResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MailSender + Clone + Send + Sync + 'static,
{
    let use_case = AccountUseCase::new(state.repo.clone(), state.config.clone());
    let account = use_case.get(&user.user_id).await?;

    Ok(Json(ApiResponse::ok(
        "User retrieved successfully",
        UserResponse::from_entity(&account),
    )))
}

/// POST /api/auth/forgot-password
pub async fn forgot_password<R, M>(
    State(state): State<IdentityAppState<R, M>>,
    Json(req): Json<ForgotPasswordRequest>,
) -> AppResult<Json<ApiResponse<()>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MailSender + Clone + Send + Sync + 'static,
{
    req.validate()?;

    let use_case =
        PasswordResetUseCase::new(state.repo.clone(), state.mailer.clone(), state.config.clone());
    use_case.request(&req.email).await?;

    // Same answer whether or not the account exists
    Ok(Json(ApiResponse::ok_empty(
        "If the email exists, a password reset link has been sent",
    )))
}

/// POST /api/auth/verify-reset-token
pub async fn verify_reset_token<R, M>(
    State(state): State<IdentityAppState<R, M>>,
    Json(req): Json<VerifyResetTokenRequest>,
) -> AppResult<Json<ApiResponse<VerifyResetTokenResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MailSender + Clone + Send + Sync + 'static,
{
    req.validate()?;

    let use_case =
        PasswordResetUseCase::new(state.repo.clone(), state.mailer.clone(), state.config.clone());
    let valid = use_case.verify(&req.token).await?;

    Ok(Json(ApiResponse::ok(
        "Token verification completed",
        VerifyResetTokenResponse { valid },
    )))
}

/// POST /api/auth/reset-password
pub async fn reset_password<R, M>(
    State(state): State<IdentityAppState<R, M>>,
    Json(req): Json<ResetPasswordRequest>,
) -> AppResult<Json<ApiResponse<()>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MailSender + Clone + Send + Sync + 'static,
{
    req.validate()?;

    let use_case =
        PasswordResetUseCase::new(state.repo.clone(), state.mailer.clone(), state.config.clone());
    use_case.reset(&req.token, req.new_password).await?;

    Ok(Json(ApiResponse::ok_empty("Password reset successfully")))
}

/// POST /api/auth/verify-email
pub async fn verify_email<R, M>(
    State(state): State<IdentityAppState<R, M>>,
    Json(req): Json<VerifyEmailRequest>,
) -> AppResult<Json<ApiResponse<()>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MailSender + Clone + Send + Sync + 'static,
{
    req.validate()?;

    let use_case = EmailVerificationUseCase::new(state.repo.clone(), state.mailer.clone());
    use_case.verify(&req.token).await?;

    Ok(Json(ApiResponse::ok_empty("Email verified successfully")))
}

/// POST /api/auth/resend-verification-email
pub async fn resend_verification_email<R, M>(
    State(state): State<IdentityAppState<R, M>>,
    Json(req): Json<ForgotPasswordRequest>,
) -> AppResult<Json<ApiResponse<()>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MailSender + Clone + Send + Sync + 'static,
{
    req.validate()?;

    let use_case = EmailVerificationUseCase::new(state.repo.clone(), state.mailer.clone());
    use_case.resend(&req.email).await?;

    Ok(Json(ApiResponse::ok_empty(
        "If the email exists, a verification link has been sent",
    )))
}

// ============================================================================
// User endpoints
// ============================================================================

/// POST /api/users (admin)
pub async fn create_user<R, M>(
    State(state): State<IdentityAppState<R, M>>,
    user: RequestUser,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MailSender + Clone + Send + Sync + 'static,
{
    user.require_admin()?;
    req.validate()?;

    let use_case = AccountUseCase::new(state.repo.clone(), state.config.clone());
    let created = use_case
        .create(CreateUserInput {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            phone: req.phone,
            role: req.role,
            avatar: req.avatar,
        })
        .await?;

    Ok(Json(ApiResponse::ok(
        "User created successfully",
        UserResponse::from_entity(&created),
    )))
}

/// GET /api/users (admin)
pub async fn list_users<R, M>(
    State(state): State<IdentityAppState<R, M>>,
    user: RequestUser,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MailSender + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let use_case = AccountUseCase::new(state.repo.clone(), state.config.clone());
    let users = use_case.list().await?;

    Ok(Json(ApiResponse::ok(
        "Users retrieved successfully",
        users.iter().map(UserResponse::from_entity).collect(),
    )))
}

/// GET /api/users/profile
pub async fn get_profile<R, M>(
    State(state): State<IdentityAppState<R, M>>,
    user: RequestUser,
) -> AppResult<Json<ApiResponse<UserResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MailSender + Clone + Send + Sync + 'static,
{
    let use_case = AccountUseCase::new(state.repo.clone(), state.config.clone());
    let account = use_case.get(&user.user_id).await?;

    Ok(Json(ApiResponse::ok(
        "Profile retrieved successfully",
        UserResponse::from_entity(&account),
    )))
}

/// PATCH /api/users/profile
pub async fn update_profile<R, M>(
    State(state): State<IdentityAppState<R, M>>,
    user: RequestUser,
    Json(req): Json<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MailSender + Clone + Send + Sync + 'static,
{
    let use_case = AccountUseCase::new(state.repo.clone(), state.config.clone());
    let updated = use_case
        .update_profile(
            &user.user_id,
            UpdateProfileInput {
                first_name: req.first_name,
                last_name: req.last_name,
                phone: req.phone,
                avatar: req.avatar,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(
        "Profile updated successfully",
        UserResponse::from_entity(&updated),
    )))
}

/// POST /api/users/change-password
pub async fn change_password<R, M>(
    State(state): State<IdentityAppState<R, M>>,
    user: RequestUser,
    Json(req): Json<ChangePasswordRequest>,
) -> AppResult<Json<ApiResponse<()>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MailSender + Clone + Send + Sync + 'static,
{
    req.validate()?;

    let use_case = AccountUseCase::new(state.repo.clone(), state.config.clone());
    use_case
        .change_password(&user.user_id, req.current_password, req.new_password)
        .await?;

    Ok(Json(ApiResponse::ok_empty("Password changed successfully")))
}

/// GET /api/users/:id (admin)
pub async fn get_user<R, M>(
    State(state): State<IdentityAppState<R, M>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<UserResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MailSender + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let use_case = AccountUseCase::new(state.repo.clone(), state.config.clone());
    let account = use_case.get(&UserId::from_uuid(id)).await?;

    Ok(Json(ApiResponse::ok(
        "User retrieved successfully",
        UserResponse::from_entity(&account),
    )))
}

/// PATCH /api/users/:id (admin)
pub async fn update_user<R, M>(
    State(state): State<IdentityAppState<R, M>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MailSender + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let use_case = AccountUseCase::new(state.repo.clone(), state.config.clone());
    let updated = use_case
        .update(
            &UserId::from_uuid(id),
            UpdateUserInput {
                first_name: req.first_name,
                last_name: req.last_name,
                phone: req.phone,
                role: req.role,
                avatar: req.avatar,
                is_active: req.is_active,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(
        "User updated successfully",
        UserResponse::from_entity(&updated),
    )))
}

/// DELETE /api/users/:id (admin)
pub async fn delete_user<R, M>(
    State(state): State<IdentityAppState<R, M>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MailSender + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let use_case = AccountUseCase::new(state.repo.clone(), state.config.clone());
    use_case.remove(&UserId::from_uuid(id)).await?;

    Ok(Json(ApiResponse::ok_empty("User deleted successfully")))
}

/// POST /api/users/:id/deactivate (admin)
pub async fn deactivate_user<R, M>(
    State(state): State<IdentityAppState<R, M>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<UserResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MailSender + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let use_case = AccountUseCase::new(state.repo.clone(), state.config.clone());
    let updated = use_case.set_active(&UserId::from_uuid(id), false).await?;

    Ok(Json(ApiResponse::ok(
        "User deactivated successfully",
        UserResponse::from_entity(&updated),
    )))
}

/// POST /api/users/:id/activate (admin)
pub async fn activate_user<R, M>(
    State(state): State<IdentityAppState<R, M>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<UserResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MailSender + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let use_case = AccountUseCase::new(state.repo.clone(), state.config.clone());
    let updated = use_case.set_active(&UserId::from_uuid(id), true).await?;

    Ok(Json(ApiResponse::ok(
        "User activated successfully",
        UserResponse::from_entity(&updated),
    )))
}
