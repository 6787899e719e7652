//! Privileged user management: creation, deletion, and role edits.

use crate::directory::{
    domain::{
        DirectoryDomainError, EmailAddress, NewIdentity, Profile, ProfileName, Role, SectorId,
        UserId,
    },
    ports::{DirectoryRepository, DirectoryRepositoryError, IdentityError, IdentityProvider},
};
use crate::session::SessionContext;
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for creating a user.
#[derive(Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    /// Login e-mail.
    pub email: String,
    /// Initial password, handed to the identity provider only.
    pub password: String,
    /// Display name; the e-mail is used when blank.
    pub name: Option<String>,
    /// Role; defaults to employee.
    pub role: Option<Role>,
    /// Optional sector membership.
    pub sector_id: Option<SectorId>,
}

impl std::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("sector_id", &self.sector_id)
            .finish()
    }
}

/// A profile together with its role, as listed on the users page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    /// The user's profile.
    pub profile: Profile,
    /// The user's role, if any.
    pub role: Option<Role>,
}

/// Errors returned by [`UserAdminService`].
#[derive(Debug, Error)]
pub enum UserAdminError {
    /// No valid bearer token was presented.
    #[error("Não autorizado")]
    Unauthorized,
    /// The caller is authenticated but not an administrator.
    #[error("Não autorizado")]
    Forbidden,
    /// The target user identifier is missing.
    #[error("user_id é obrigatório")]
    MissingUserId,
    /// An administrator tried to delete their own account.
    #[error("Você não pode excluir a si mesmo")]
    SelfDeletion,
    /// The target user has no profile.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] DirectoryDomainError),
    /// The identity provider failed or refused the request.
    #[error(transparent)]
    Identity(#[from] IdentityError),
    /// Directory persistence failed.
    #[error(transparent)]
    Directory(#[from] DirectoryRepositoryError),
    /// Task activity persistence failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
}

/// Result type for user administration.
pub type UserAdminResult<T> = Result<T, UserAdminError>;

/// Outcome of checking the caller of a privileged function.
enum Caller {
    Admin(UserId),
    Bootstrap,
}

/// Privileged user administration service.
#[derive(Clone)]
pub struct UserAdminService<D, T, I, C>
where
    D: DirectoryRepository,
    T: TaskRepository,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    directory: Arc<D>,
    tasks: Arc<T>,
    identity: Arc<I>,
    clock: Arc<C>,
}

impl<D, T, I, C> UserAdminService<D, T, I, C>
where
    D: DirectoryRepository,
    T: TaskRepository,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    /// Creates a new user administration service.
    #[must_use]
    pub const fn new(directory: Arc<D>, tasks: Arc<T>, identity: Arc<I>, clock: Arc<C>) -> Self {
        Self {
            directory,
            tasks,
            identity,
            clock,
        }
    }

    /// Creates an identity with a role and a profile.
    ///
    /// Administrators may always create users. Anyone else, including
    /// callers with a missing or unresolvable token, may only create the
    /// first user while no role assignment exists.
    ///
    /// # Errors
    ///
    /// Returns [`UserAdminError::Unauthorized`] or [`UserAdminError::Forbidden`]
    /// when the caller may not create users, [`UserAdminError::Domain`] for
    /// invalid input, or [`UserAdminError::Identity`] when the identity
    /// provider refuses the request.
    pub async fn create_user(
        &self,
        bearer: Option<&str>,
        request: CreateUserRequest,
    ) -> UserAdminResult<UserId> {
        let caller = self.authorize_creation(bearer).await?;

        let email = EmailAddress::new(request.email)?;
        let display_name = request
            .name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| email.as_str().to_owned());
        let profile_name = ProfileName::new(display_name.as_str())?;
        if let Some(sector_id) = request.sector_id {
            self.require_sector(sector_id).await?;
        }
        let identity = NewIdentity::new(email, request.password, display_name)?;

        let user_id = self.identity.create_identity(&identity).await?;
        let role = request.role.unwrap_or_default();
        if let Err(err) = self
            .store_directory_entry(user_id, role, profile_name, request.sector_id)
            .await
        {
            self.rollback_identity(user_id).await;
            return Err(err);
        }

        match caller {
            Caller::Admin(admin) => {
                info!(user_id = %user_id, admin_id = %admin, role = %role, "user created");
            }
            Caller::Bootstrap => {
                info!(user_id = %user_id, role = %role, "bootstrap user created");
            }
        }
        Ok(user_id)
    }

    /// Deletes a user together with their task activity, role, profile, and
    /// identity.
    ///
    /// Every check runs before anything is removed.
    ///
    /// # Errors
    ///
    /// Returns [`UserAdminError::Unauthorized`] without a valid token,
    /// [`UserAdminError::Forbidden`] for non-administrators,
    /// [`UserAdminError::MissingUserId`] without a target, and
    /// [`UserAdminError::SelfDeletion`] when the target is the caller.
    pub async fn delete_user(
        &self,
        bearer: Option<&str>,
        user_id: Option<UserId>,
    ) -> UserAdminResult<()> {
        let token = bearer.ok_or(UserAdminError::Unauthorized)?;
        let caller = self
            .identity
            .resolve_bearer(token)
            .await?
            .ok_or(UserAdminError::Unauthorized)?;
        if self.directory.find_role(caller).await? != Some(Role::Admin) {
            warn!(user_id = %caller, "user deletion rejected: caller is not an admin");
            return Err(UserAdminError::Forbidden);
        }
        let target = user_id.ok_or(UserAdminError::MissingUserId)?;
        if target == caller {
            return Err(UserAdminError::SelfDeletion);
        }

        self.tasks.purge_user_activity(target).await?;
        self.directory.purge_user(target).await?;
        self.identity.delete_identity(target).await?;
        info!(user_id = %target, admin_id = %caller, "user deleted");
        Ok(())
    }

    /// Changes the role and sector of a user.
    ///
    /// # Errors
    ///
    /// Returns [`UserAdminError::Forbidden`] for non-administrators and
    /// [`UserAdminError::UserNotFound`] when the user has no profile.
    pub async fn update_user(
        &self,
        session: &SessionContext,
        user_id: UserId,
        role: Role,
        sector_id: Option<SectorId>,
    ) -> UserAdminResult<Profile> {
        require_admin(session)?;
        let mut profile = self
            .directory
            .find_profile(user_id)
            .await?
            .ok_or(UserAdminError::UserNotFound(user_id))?;
        if let Some(id) = sector_id {
            self.require_sector(id).await?;
        }

        self.directory.set_role(user_id, role).await?;
        profile.assign_sector(sector_id, &*self.clock);
        self.directory.upsert_profile(&profile).await?;
        info!(user_id = %user_id, admin_id = %session.user_id(), role = %role, "user updated");
        Ok(profile)
    }

    /// Lists every profile with its role.
    ///
    /// # Errors
    ///
    /// Returns [`UserAdminError::Forbidden`] for non-administrators.
    pub async fn list_users(&self, session: &SessionContext) -> UserAdminResult<Vec<UserSummary>> {
        require_admin(session)?;
        let profiles = self.directory.list_profiles().await?;
        let roles = self.directory.list_roles().await?;
        Ok(profiles
            .into_iter()
            .map(|profile| {
                let role = roles
                    .iter()
                    .find(|(user_id, _)| *user_id == profile.user_id())
                    .map(|(_, role)| *role);
                UserSummary { profile, role }
            })
            .collect())
    }

    async fn authorize_creation(&self, bearer: Option<&str>) -> UserAdminResult<Caller> {
        let caller = match bearer {
            Some(token) => self.identity.resolve_bearer(token).await?,
            None => None,
        };
        if let Some(user_id) = caller
            && self.directory.find_role(user_id).await? == Some(Role::Admin)
        {
            return Ok(Caller::Admin(user_id));
        }
        if self.directory.count_roles().await? == 0 {
            return Ok(Caller::Bootstrap);
        }
        if caller.is_some() {
            warn!("user creation rejected: caller is not an admin");
            Err(UserAdminError::Forbidden)
        } else {
            warn!("user creation rejected: no valid bearer token");
            Err(UserAdminError::Unauthorized)
        }
    }

    async fn require_sector(&self, sector_id: SectorId) -> UserAdminResult<()> {
        self.directory
            .find_sector(sector_id)
            .await?
            .ok_or(DirectoryRepositoryError::SectorNotFound(sector_id))?;
        Ok(())
    }

    async fn store_directory_entry(
        &self,
        user_id: UserId,
        role: Role,
        name: ProfileName,
        sector_id: Option<SectorId>,
    ) -> UserAdminResult<()> {
        self.directory.set_role(user_id, role).await?;
        let mut profile = Profile::new(user_id, name, &*self.clock);
        if sector_id.is_some() {
            profile.assign_sector(sector_id, &*self.clock);
        }
        self.directory.upsert_profile(&profile).await?;
        Ok(())
    }

    async fn rollback_identity(&self, user_id: UserId) {
        if let Err(err) = self.directory.purge_user(user_id).await {
            warn!(user_id = %user_id, error = %err, "failed to purge partial directory entry");
        }
        if let Err(err) = self.identity.delete_identity(user_id).await {
            warn!(user_id = %user_id, error = %err, "failed to roll back identity");
        }
    }
}

fn require_admin(session: &SessionContext) -> UserAdminResult<()> {
    if session.is_admin() {
        Ok(())
    } else {
        warn!(user_id = %session.user_id(), "admin operation rejected");
        Err(UserAdminError::Forbidden)
    }
}
