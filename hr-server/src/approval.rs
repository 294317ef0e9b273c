//! Approval workflow
//!
//! ```text
//! register ──▶ pending ──decide──▶ approved ──▶ login issues tokens
//!                         └──────▶ rejected
//! ```
//!
//! Only `approved` accounts receive a token. `decide` never moves an
//! account back to `pending`; it may switch between approved and rejected.

use shared::error::{AppError, ErrorCode};
use shared::models::{Account, AccountProfile, ApprovalStatus, RegisterRequest, Role};
use shared::util::now_millis;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{Identity, TokenService};
use crate::db::{AccountStore, NewAccount, StoreError};
use crate::error::ServiceResult;
use crate::security_log;
use crate::util::{hash_password_blocking, verify_password_blocking};

/// Store a new `pending` account.
///
/// The email pre-check is only a fast path; the store's uniqueness guard
/// decides concurrent submissions.
pub async fn register(store: &dyn AccountStore, req: RegisterRequest) -> ServiceResult<Account> {
    let req = req.normalized();
    req.validate()?;

    if store.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::new(ErrorCode::EmailAlreadyRegistered).into());
    }

    let account = Account {
        id: Uuid::new_v4().to_string(),
        email: req.email,
        full_name: req.full_name,
        role: req.role.unwrap_or_default(),
        status: ApprovalStatus::Pending,
        profile: req.profile,
        created_at: now_millis(),
    };
    let password_hash = hash_password_blocking(req.password).await?;

    match store
        .insert(NewAccount {
            account,
            password_hash,
        })
        .await
    {
        Ok(account) => {
            tracing::info!(account_id = %account.id, role = %account.role, "Account registered");
            Ok(account)
        }
        Err(StoreError::Duplicate(_)) => Err(AppError::new(ErrorCode::EmailAlreadyRegistered).into()),
        Err(e) => Err(e.into()),
    }
}

/// Check credentials and issue a token.
///
/// Default order: unknown email (404), not approved (403), wrong password
/// (401). With `uniform_errors` every failure is `InvalidCredentials`.
pub async fn login(
    store: &dyn AccountStore,
    tokens: &TokenService,
    email: &str,
    password: &str,
    uniform_errors: bool,
) -> ServiceResult<String> {
    let email = email.trim();
    let fail = |code: ErrorCode| -> AppError {
        if uniform_errors {
            AppError::invalid_credentials()
        } else {
            AppError::new(code)
        }
    };

    let Some(record) = store.find_by_email(email).await? else {
        security_log!("WARN", "login_failed", reason = "unknown_email");
        return Err(fail(ErrorCode::AccountNotFound).into());
    };

    if !record.account.status.can_login() {
        security_log!(
            "WARN",
            "login_failed",
            reason = "not_approved",
            account_id = record.account.id.clone(),
            status = record.account.status.as_str()
        );
        return Err(fail(ErrorCode::AccountNotApproved).into());
    }

    if !verify_password_blocking(password.to_string(), record.password_hash).await? {
        security_log!(
            "WARN",
            "login_failed",
            reason = "bad_password",
            account_id = record.account.id.clone()
        );
        return Err(AppError::invalid_credentials().into());
    }

    let token = tokens
        .issue(&Identity::from(&record.account))
        .map_err(|e| AppError::internal(format!("token signing failed: {e}")))?;

    security_log!(
        "INFO",
        "login_success",
        account_id = record.account.id.clone(),
        role = record.account.role.as_str()
    );
    Ok(token)
}

/// Accounts awaiting a decision, oldest first
pub async fn list_pending(store: &dyn AccountStore) -> ServiceResult<Vec<Account>> {
    Ok(store.list_by_status(ApprovalStatus::Pending).await?)
}

/// Approve or reject an account. `outcome` must be `approved` or
/// `rejected`; anything else (including `pending`) is `InvalidStatus`.
pub async fn decide(
    store: &dyn AccountStore,
    decided_by: &Identity,
    account_id: &str,
    outcome: &str,
) -> ServiceResult<Account> {
    let status = ApprovalStatus::parse_decision(outcome.trim())
        .ok_or_else(|| AppError::new(ErrorCode::InvalidStatus).with_detail("status", outcome))?;

    let account = store
        .set_status(account_id, status)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::AccountNotFound))?;

    security_log!(
        "INFO",
        "account_decision",
        account_id = account.id.clone(),
        status = status.as_str(),
        decided_by = decided_by.account_id.clone()
    );
    Ok(account)
}

/// The caller's own account
pub async fn me(store: &dyn AccountStore, identity: &Identity) -> ServiceResult<Account> {
    store
        .find_by_id(&identity.account_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::AccountNotFound).into())
}

/// Create an approved admin so the first approval can happen. Returns
/// `false` when the email is already registered.
pub async fn bootstrap_admin(
    store: &dyn AccountStore,
    email: &str,
    password: &str,
) -> ServiceResult<bool> {
    if store.find_by_email(email).await?.is_some() {
        return Ok(false);
    }

    let account = Account {
        id: Uuid::new_v4().to_string(),
        email: email.to_string(),
        full_name: "Administrator".into(),
        role: Role::Admin,
        status: ApprovalStatus::Approved,
        profile: AccountProfile::default(),
        created_at: now_millis(),
    };
    let password_hash = hash_password_blocking(password.to_string()).await?;

    match store
        .insert(NewAccount {
            account,
            password_hash,
        })
        .await
    {
        Ok(account) => {
            tracing::info!(account_id = %account.id, "Bootstrap admin created");
            Ok(true)
        }
        Err(StoreError::Duplicate(_)) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::error::ServiceError;

    fn request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.into(),
            password: password.into(),
            full_name: "U".into(),
            role: None,
            profile: AccountProfile::default(),
        }
    }

    fn code(err: ServiceError) -> ErrorCode {
        AppError::from(err).code
    }

    fn hr() -> Identity {
        Identity {
            account_id: "hr-1".into(),
            email: "hr@x.com".into(),
            role: Role::Hr,
            name: "HR".into(),
        }
    }

    #[tokio::test]
    async fn test_login_only_after_approval() {
        let store = MemoryStore::new();
        let tokens = TokenService::new("s");
        let account = register(&store, request("a@x.com", "secret1")).await.unwrap();
        assert_eq!(account.status, ApprovalStatus::Pending);
        assert_eq!(account.role, Role::Employee);

        let err = login(&store, &tokens, "a@x.com", "secret1", false)
            .await
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::AccountNotApproved);

        decide(&store, &hr(), &account.id, "approved").await.unwrap();
        let token = login(&store, &tokens, "a@x.com", "secret1", false)
            .await
            .unwrap();
        let identity = tokens.verify(&token).unwrap();
        assert_eq!(identity.account_id, account.id);
        assert_eq!(identity.role, Role::Employee);
    }

    #[tokio::test]
    async fn test_login_error_order() {
        let store = MemoryStore::new();
        let tokens = TokenService::new("s");
        let account = register(&store, request("a@x.com", "secret1")).await.unwrap();

        let err = login(&store, &tokens, "nobody@x.com", "secret1", false)
            .await
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::AccountNotFound);

        // Approval is checked before the password
        let err = login(&store, &tokens, "a@x.com", "wrong", false)
            .await
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::AccountNotApproved);

        decide(&store, &hr(), &account.id, "approved").await.unwrap();
        let err = login(&store, &tokens, "a@x.com", "wrong", false)
            .await
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_uniform_login_errors() {
        let store = MemoryStore::new();
        let tokens = TokenService::new("s");
        register(&store, request("a@x.com", "secret1")).await.unwrap();

        for (email, password) in [("nobody@x.com", "secret1"), ("a@x.com", "secret1")] {
            let err = login(&store, &tokens, email, password, true)
                .await
                .unwrap_err();
            assert_eq!(code(err), ErrorCode::InvalidCredentials);
        }
    }

    #[tokio::test]
    async fn test_rejected_account_cannot_login() {
        let store = MemoryStore::new();
        let tokens = TokenService::new("s");
        let account = register(&store, request("a@x.com", "secret1")).await.unwrap();
        decide(&store, &hr(), &account.id, "rejected").await.unwrap();
        let err = login(&store, &tokens, "a@x.com", "secret1", false)
            .await
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::AccountNotApproved);
    }

    #[tokio::test]
    async fn test_duplicate_registration() {
        let store = MemoryStore::new();
        register(&store, request("a@x.com", "secret1")).await.unwrap();
        let err = register(&store, request("a@x.com", "other12"))
            .await
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::EmailAlreadyRegistered);
        assert_eq!(list_pending(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_register_validates() {
        let store = MemoryStore::new();
        let err = register(&store, request("a@x.com", "12345")).await.unwrap_err();
        assert_eq!(code(err), ErrorCode::ValidationFailed);
        let err = register(&store, request("not-an-email", "secret1"))
            .await
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn test_decide_rejects_other_outcomes() {
        let store = MemoryStore::new();
        let account = register(&store, request("a@x.com", "secret1")).await.unwrap();
        for outcome in ["pending", "APPROVED", "maybe", ""] {
            let err = decide(&store, &hr(), &account.id, outcome)
                .await
                .unwrap_err();
            assert_eq!(code(err), ErrorCode::InvalidStatus);
        }
        let err = decide(&store, &hr(), "missing", "approved")
            .await
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::AccountNotFound);
    }

    #[tokio::test]
    async fn test_decide_is_idempotent() {
        let store = MemoryStore::new();
        let account = register(&store, request("a@x.com", "secret1")).await.unwrap();
        let first = decide(&store, &hr(), &account.id, "approved").await.unwrap();
        let second = decide(&store, &hr(), &account.id, "approved").await.unwrap();
        assert_eq!(first, second);
        assert!(list_pending(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bootstrap_admin_once() {
        let store = MemoryStore::new();
        let tokens = TokenService::new("s");
        assert!(bootstrap_admin(&store, "admin@x.com", "admin123").await.unwrap());
        assert!(!bootstrap_admin(&store, "admin@x.com", "admin123").await.unwrap());

        let token = login(&store, &tokens, "admin@x.com", "admin123", false)
            .await
            .unwrap();
        assert_eq!(tokens.verify(&token).unwrap().role, Role::Admin);
    }
}
