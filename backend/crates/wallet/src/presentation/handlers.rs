//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use kernel::context::RequestUser;
use kernel::error::app_error::AppResult;
use kernel::response::ApiResponse;
use std::sync::Arc;

use crate::application::WalletService;
use crate::domain::entities::CryptoType;
use crate::domain::repository::WalletRepository;
use crate::error::WalletError;
use crate::presentation::dto::{
    AllWalletsResponse, CryptoTypeResponse, UpdateWalletAddressRequest, WalletResponse,
};

/// Shared state for wallet handlers
#[derive(Clone)]
pub struct WalletAppState<R>
where
    R: WalletRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

/// GET /api/wallets
pub async fn get_all_wallets<R>(
    State(state): State<WalletAppState<R>>,
    user: RequestUser,
) -> AppResult<Json<ApiResponse<AllWalletsResponse>>>
where
    R: WalletRepository + Clone + Send + Sync + 'static,
{
    let service = WalletService::new(state.repo.clone());
    let (wallets, total_balance_usd) = service.get_all(&user.user_id).await?;

    Ok(Json(ApiResponse::ok(
        "Wallets retrieved successfully",
        AllWalletsResponse {
            wallets: wallets.iter().map(WalletResponse::from_entity).collect(),
            total_balance_usd,
        },
    )))
}

/// GET /api/wallets/crypto-types
pub async fn crypto_types<R>(
    State(_state): State<WalletAppState<R>>,
) -> Json<ApiResponse<Vec<CryptoTypeResponse>>>
where
    R: WalletRepository + Clone + Send + Sync + 'static,
{
    let types = CryptoType::ALL
        .into_iter()
        .map(|crypto_type| CryptoTypeResponse {
            crypto_type,
            info: crypto_type.info(),
        })
        .collect();

    Json(ApiResponse::ok("Crypto types retrieved", types))
}

/// GET /api/wallets/:cryptoType
pub async fn get_wallet<R>(
    State(state): State<WalletAppState<R>>,
    user: RequestUser,
    Path(crypto_type): Path<String>,
) -> AppResult<Json<ApiResponse<WalletResponse>>>
where
    R: WalletRepository + Clone + Send + Sync + 'static,
{
    let crypto_type = CryptoType::from_code(&crypto_type)
        .ok_or_else(|| WalletError::UnsupportedCrypto(crypto_type.clone()))?;

    let service = WalletService::new(state.repo.clone());
    let wallet = service.get(&user.user_id, crypto_type).await?;

    Ok(Json(ApiResponse::ok(
        "Wallet retrieved successfully",
        WalletResponse::from_entity(&wallet),
    )))
}

/// PUT /api/wallets/address
pub async fn update_wallet_address<R>(
    State(state): State<WalletAppState<R>>,
    user: RequestUser,
    Json(req): Json<UpdateWalletAddressRequest>,
) -> AppResult<Json<ApiResponse<WalletResponse>>>
where
    R: WalletRepository + Clone + Send + Sync + 'static,
{
    req.validate()?;

    let service = WalletService::new(state.repo.clone());
    let wallet = service
        .update_address(&user.user_id, req.crypto_type, req.wallet_address)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Wallet address updated successfully",
        WalletResponse::from_entity(&wallet),
    )))
}
