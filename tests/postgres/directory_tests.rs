//! Directory persistence against `PostgreSQL`.

use super::helpers::{BoxError, prepared_repos};
use itinerary::directory::{
    domain::{Profile, ProfileName, Role, Sector, SectorName, UserId},
    ports::{DirectoryRepository, DirectoryRepositoryError},
};
use mockable::DefaultClock;

#[tokio::test(flavor = "multi_thread")]
async fn profiles_and_roles_round_trip() -> Result<(), BoxError> {
    let Some(repos) = prepared_repos().await? else {
        return Ok(());
    };
    let user_id = UserId::new();
    let mut profile = Profile::new(user_id, ProfileName::new("Ana Souza")?, &DefaultClock);

    repos.directory.upsert_profile(&profile).await?;
    repos.directory.set_role(user_id, Role::Employee).await?;
    repos.directory.set_role(user_id, Role::TaskApplier).await?;
    profile.rename(ProfileName::new("Ana S.")?, &DefaultClock);
    repos.directory.upsert_profile(&profile).await?;

    let stored = repos
        .directory
        .find_profile(user_id)
        .await?
        .ok_or("profile missing")?;
    assert_eq!(stored.name().as_str(), "Ana S.");
    assert_eq!(
        repos.directory.find_role(user_id).await?,
        Some(Role::TaskApplier)
    );
    assert_eq!(repos.directory.count_roles().await?, 1);

    repos.directory.purge_user(user_id).await?;
    assert!(repos.directory.find_profile(user_id).await?.is_none());
    assert_eq!(repos.directory.count_roles().await?, 0);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn sector_names_are_unique() -> Result<(), BoxError> {
    let Some(repos) = prepared_repos().await? else {
        return Ok(());
    };
    let first = Sector::new(SectorName::new("Campo")?, &DefaultClock);
    let second = Sector::new(SectorName::new("Campo")?, &DefaultClock);

    repos.directory.store_sector(&first).await?;
    let result = repos.directory.store_sector(&second).await;

    assert!(matches!(
        result,
        Err(DirectoryRepositoryError::DuplicateSectorName(_))
    ));
    assert_eq!(repos.directory.list_sectors().await?.len(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_sector_clears_memberships() -> Result<(), BoxError> {
    let Some(repos) = prepared_repos().await? else {
        return Ok(());
    };
    let sector = Sector::new(SectorName::new("Oficina")?, &DefaultClock);
    repos.directory.store_sector(&sector).await?;
    let user_id = UserId::new();
    let mut profile = Profile::new(user_id, ProfileName::new("Bruno")?, &DefaultClock);
    profile.assign_sector(Some(sector.id()), &DefaultClock);
    repos.directory.upsert_profile(&profile).await?;

    repos.directory.delete_sector(sector.id()).await?;

    let stored = repos
        .directory
        .find_profile(user_id)
        .await?
        .ok_or("profile missing")?;
    assert_eq!(stored.sector_id(), None);
    assert!(repos.directory.find_sector(sector.id()).await?.is_none());
    Ok(())
}
