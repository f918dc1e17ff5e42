//! Profile lifecycle: creation with dual-system enrichment, listing,
//! partial updates with conditional recomputation, and soft deletion.

use std::sync::Arc;

use astro_core::{BirthInput, Calculator};
use database::models::{NewProfile, Profile, ProfileChanges};
use database::{account, profile, settings, Database};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::enrichment;
use crate::error::{Result, ServiceError};
use crate::validation;

/// Payload for creating a profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProfile {
    pub firstname: String,
    pub middlename: Option<String>,
    pub lastname: Option<String>,
    pub gender: String,
    pub date_of_birth: String,
    pub time_of_birth: String,
    pub place_of_birth: String,
    /// Make this the primary profile even when others exist.
    #[serde(default)]
    pub set_as_primary: bool,
}

/// Partial update payload. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfile {
    pub firstname: Option<String>,
    pub middlename: Option<String>,
    pub lastname: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<String>,
    pub time_of_birth: Option<String>,
    pub place_of_birth: Option<String>,
}

impl UpdateProfile {
    /// Whether any birth-data field changed, requiring recomputation.
    fn touches_birth_data(&self) -> bool {
        self.date_of_birth.is_some()
            || self.time_of_birth.is_some()
            || self.place_of_birth.is_some()
    }
}

/// A profile as returned to callers, with its primary flag resolved from
/// the account's settings.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub profile: Profile,
    pub is_primary: bool,
}

/// Profile operations, scoped to the calling account.
#[derive(Clone)]
pub struct ProfileService {
    db: Database,
    calculator: Arc<dyn Calculator>,
}

impl ProfileService {
    pub fn new(db: Database, calculator: Arc<dyn Calculator>) -> Self {
        Self { db, calculator }
    }

    /// Create a profile: validate, compute both systems, persist, attach to
    /// the account. The account's first profile becomes primary
    /// automatically; later profiles only on request.
    pub async fn create_profile(
        &self,
        user_id: &str,
        email: Option<&str>,
        req: CreateProfile,
    ) -> Result<ProfileView> {
        let firstname = validation::require_text(&req.firstname, "firstname")?;
        let gender = validation::require_text(&req.gender, "gender")?;
        let place = validation::require_text(&req.place_of_birth, "place_of_birth")?;
        let date = validation::parse_birth_date(&req.date_of_birth)?;
        let time = validation::parse_birth_time(&req.time_of_birth)?;

        let account = account::get_or_create_account(self.db.pool(), user_id, email).await?;

        let input = BirthInput::new(date, time, place.clone());
        let fields = enrichment::compute_both(&self.calculator, &input).await?;

        let existing = profile::count_memberships(self.db.pool(), account.account_id).await?;

        let row = profile::insert_profile(
            self.db.pool(),
            &NewProfile {
                firstname,
                middlename: req.middlename,
                lastname: req.lastname,
                gender,
                date_of_birth: input.date_arg(),
                time_of_birth: input.time_arg(),
                place_of_birth: place,
                timezone: Some(fields.timezone.clone()),
                western_sun_sign: Some(fields.western_sun_sign),
                western_moon_sign: Some(fields.western_moon_sign),
                vedic_rasi: Some(fields.vedic_rasi),
                vedic_nakshatra: Some(fields.vedic_nakshatra),
                vedic_lagna: Some(fields.vedic_lagna),
            },
        )
        .await?;
        profile::add_membership(self.db.pool(), account.account_id, row.profile_id).await?;

        let is_primary = existing == 0 || req.set_as_primary;
        if is_primary {
            settings::set_primary_profile(
                self.db.pool(),
                account.account_id,
                Some(row.profile_id),
            )
            .await?;
        }

        info!(
            account_id = account.account_id,
            profile_id = row.profile_id,
            is_primary,
            "profile created"
        );
        Ok(ProfileView {
            profile: row,
            is_primary,
        })
    }

    /// List the account's non-deleted profiles.
    pub async fn list_profiles(
        &self,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProfileView>> {
        let (limit, offset) = validation::clamp_page(limit, offset);
        let account = account::get_or_create_account(self.db.pool(), user_id, None).await?;
        let primary = settings::get_settings(self.db.pool(), account.account_id)
            .await?
            .primary_profile;

        let rows =
            profile::list_profiles(self.db.pool(), account.account_id, limit, offset).await?;
        Ok(rows
            .into_iter()
            .map(|p| ProfileView {
                is_primary: primary == Some(p.profile_id),
                profile: p,
            })
            .collect())
    }

    /// Get one of the account's profiles by id.
    pub async fn get_profile(&self, user_id: &str, profile_id: i64) -> Result<ProfileView> {
        let account = account::get_or_create_account(self.db.pool(), user_id, None).await?;
        let row = self.owned_profile(account.account_id, profile_id).await?;

        let primary = settings::get_settings(self.db.pool(), account.account_id)
            .await?
            .primary_profile;
        Ok(ProfileView {
            is_primary: primary == Some(row.profile_id),
            profile: row,
        })
    }

    /// The account's primary profile, when one is set and not deleted.
    pub async fn get_primary(&self, account_id: i64) -> Result<Option<Profile>> {
        let primary = settings::get_settings(self.db.pool(), account_id)
            .await?
            .primary_profile;
        let Some(profile_id) = primary else {
            return Ok(None);
        };
        let row = profile::get_profile(self.db.pool(), profile_id).await?;
        Ok((!row.is_deleted).then_some(row))
    }

    /// Apply a partial update. When birth data changes, both systems are
    /// recomputed from the merged values before anything is persisted.
    pub async fn update_profile(
        &self,
        user_id: &str,
        profile_id: i64,
        req: UpdateProfile,
    ) -> Result<ProfileView> {
        let account = account::get_or_create_account(self.db.pool(), user_id, None).await?;
        let current = self.owned_profile(account.account_id, profile_id).await?;

        let firstname = req
            .firstname
            .as_deref()
            .map(|v| validation::require_text(v, "firstname"))
            .transpose()?;
        let gender = req
            .gender
            .as_deref()
            .map(|v| validation::require_text(v, "gender"))
            .transpose()?;
        let place = req
            .place_of_birth
            .as_deref()
            .map(|v| validation::require_text(v, "place_of_birth"))
            .transpose()?;

        let touches_birth_data = req.touches_birth_data();

        let mut changes = ProfileChanges {
            firstname,
            middlename: req.middlename,
            lastname: req.lastname,
            gender,
            place_of_birth: place,
            ..Default::default()
        };

        if touches_birth_data {
            // Merge incoming values over stored ones, then recompute.
            let date = validation::parse_birth_date(
                req.date_of_birth.as_deref().unwrap_or(&current.date_of_birth),
            )?;
            let time = validation::parse_birth_time(
                req.time_of_birth.as_deref().unwrap_or(&current.time_of_birth),
            )?;
            let place = changes
                .place_of_birth
                .clone()
                .unwrap_or_else(|| current.place_of_birth.clone());

            let input = BirthInput::new(date, time, place);
            let fields = enrichment::compute_both(&self.calculator, &input).await?;

            changes.date_of_birth = Some(input.date_arg());
            changes.time_of_birth = Some(input.time_arg());
            changes.timezone = Some(fields.timezone);
            changes.western_sun_sign = Some(fields.western_sun_sign);
            changes.western_moon_sign = Some(fields.western_moon_sign);
            changes.vedic_rasi = Some(fields.vedic_rasi);
            changes.vedic_nakshatra = Some(fields.vedic_nakshatra);
            changes.vedic_lagna = Some(fields.vedic_lagna);
        }

        let updated = profile::update_profile(self.db.pool(), profile_id, &changes).await?;

        let primary = settings::get_settings(self.db.pool(), account.account_id)
            .await?
            .primary_profile;
        Ok(ProfileView {
            is_primary: primary == Some(updated.profile_id),
            profile: updated,
        })
    }

    /// Soft-delete a profile. The primary profile is protected; reassign
    /// first, then delete. Deleting an already-deleted profile fails.
    pub async fn delete_profile(&self, user_id: &str, profile_id: i64) -> Result<()> {
        let account = account::get_or_create_account(self.db.pool(), user_id, None).await?;

        if !profile::has_any_membership(self.db.pool(), account.account_id, profile_id).await? {
            return Err(ServiceError::not_found(format!(
                "profile {profile_id} not found"
            )));
        }
        let row = profile::get_profile(self.db.pool(), profile_id).await?;
        if row.is_deleted {
            return Err(ServiceError::validation("profile is already deleted"));
        }

        let primary = settings::get_settings(self.db.pool(), account.account_id)
            .await?
            .primary_profile;
        if primary == Some(profile_id) {
            return Err(ServiceError::validation(
                "cannot delete the primary profile; set another profile as primary first",
            ));
        }

        profile::soft_delete_profile(self.db.pool(), profile_id).await?;
        Ok(())
    }

    /// Make one of the account's profiles the primary.
    pub async fn set_primary(&self, user_id: &str, profile_id: i64) -> Result<()> {
        let account = account::get_or_create_account(self.db.pool(), user_id, None).await?;
        self.owned_profile(account.account_id, profile_id).await?;
        settings::set_primary_profile(self.db.pool(), account.account_id, Some(profile_id))
            .await?;
        Ok(())
    }

    /// Fetch a profile the account owns; deleted or foreign rows read as
    /// not found, without revealing which.
    async fn owned_profile(&self, account_id: i64, profile_id: i64) -> Result<Profile> {
        if !profile::has_membership(self.db.pool(), account_id, profile_id).await? {
            return Err(ServiceError::not_found(format!(
                "profile {profile_id} not found"
            )));
        }
        let row = profile::get_profile(self.db.pool(), profile_id).await?;
        if row.is_deleted {
            return Err(ServiceError::not_found(format!(
                "profile {profile_id} not found"
            )));
        }
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::test_support::StubCalculator;

    async fn service() -> ProfileService {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        ProfileService::new(db, Arc::new(StubCalculator::ok()))
    }

    fn create_req(firstname: &str) -> CreateProfile {
        CreateProfile {
            firstname: firstname.to_string(),
            gender: "FEMALE".to_string(),
            date_of_birth: "1990-05-15".to_string(),
            time_of_birth: "10:30".to_string(),
            place_of_birth: "Chennai, India".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_enriches_both_systems() {
        let svc = service().await;
        let view = svc
            .create_profile("subject-1", None, create_req("Asha"))
            .await
            .unwrap();

        assert_eq!(view.profile.vedic_rasi.as_deref(), Some("Mesha"));
        assert_eq!(view.profile.western_sun_sign.as_deref(), Some("Taurus"));
        assert_eq!(view.profile.timezone.as_deref(), Some("Asia/Kolkata"));
        assert!(view.is_primary);
    }

    #[tokio::test]
    async fn test_second_profile_not_primary_by_default() {
        let svc = service().await;
        let first = svc
            .create_profile("subject-1", None, create_req("Asha"))
            .await
            .unwrap();
        let second = svc
            .create_profile("subject-1", None, create_req("Ravi"))
            .await
            .unwrap();

        assert!(first.is_primary);
        assert!(!second.is_primary);

        let listed = svc.list_profiles("subject-1", 50, 0).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].is_primary);
        assert!(!listed[1].is_primary);
    }

    #[tokio::test]
    async fn test_set_as_primary_on_create() {
        let svc = service().await;
        svc.create_profile("subject-1", None, create_req("Asha"))
            .await
            .unwrap();
        let second = svc
            .create_profile(
                "subject-1",
                None,
                CreateProfile {
                    set_as_primary: true,
                    ..create_req("Ravi")
                },
            )
            .await
            .unwrap();
        assert!(second.is_primary);

        let listed = svc.list_profiles("subject-1", 50, 0).await.unwrap();
        let primary: Vec<_> = listed.iter().filter(|p| p.is_primary).collect();
        assert_eq!(primary.len(), 1);
        assert_eq!(primary[0].profile.firstname, "Ravi");
    }

    #[tokio::test]
    async fn test_list_normalizes_paging_values() {
        let svc = service().await;
        svc.create_profile("subject-1", None, create_req("Asha"))
            .await
            .unwrap();

        // Negative paging values read as the smallest page, not unbounded.
        let listed = svc.list_profiles("subject-1", -1, -3).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_calculation_failure_persists_nothing() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        let svc = ProfileService::new(db.clone(), Arc::new(StubCalculator::failing()));

        let err = svc
            .create_profile("subject-1", None, create_req("Asha"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Calculation(_)));

        let listed = svc.list_profiles("subject-1", 50, 0).await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_validation_rejections() {
        let svc = service().await;

        let mut req = create_req("");
        assert!(matches!(
            svc.create_profile("s", None, req).await.unwrap_err(),
            ServiceError::Validation(_)
        ));

        req = create_req("Asha");
        req.date_of_birth = "2999-01-01".to_string();
        assert!(matches!(
            svc.create_profile("s", None, req).await.unwrap_err(),
            ServiceError::Validation(_)
        ));

        req = create_req("Asha");
        req.time_of_birth = "25:99".to_string();
        assert!(matches!(
            svc.create_profile("s", None, req).await.unwrap_err(),
            ServiceError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn test_update_without_birth_data_keeps_signs() {
        let svc = service().await;
        let created = svc
            .create_profile("subject-1", None, create_req("Asha"))
            .await
            .unwrap();

        let updated = svc
            .update_profile(
                "subject-1",
                created.profile.profile_id,
                UpdateProfile {
                    firstname: Some("Asha Devi".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.profile.firstname, "Asha Devi");
        assert_eq!(updated.profile.vedic_rasi.as_deref(), Some("Mesha"));
        assert_eq!(updated.profile.date_of_birth, "1990-05-15");
    }

    #[tokio::test]
    async fn test_update_birth_data_merges_and_recomputes() {
        let svc = service().await;
        let created = svc
            .create_profile("subject-1", None, create_req("Asha"))
            .await
            .unwrap();

        // Only the time changes; stored date and place feed the recompute.
        let updated = svc
            .update_profile(
                "subject-1",
                created.profile.profile_id,
                UpdateProfile {
                    time_of_birth: Some("23:45".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.profile.time_of_birth, "23:45");
        assert_eq!(updated.profile.date_of_birth, "1990-05-15");
        assert_eq!(updated.profile.vedic_rasi.as_deref(), Some("Mesha"));
    }

    #[tokio::test]
    async fn test_cannot_touch_foreign_profile() {
        let svc = service().await;
        let created = svc
            .create_profile("subject-1", None, create_req("Asha"))
            .await
            .unwrap();

        let err = svc
            .get_profile("subject-2", created.profile.profile_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let err = svc
            .delete_profile("subject-2", created.profile.profile_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_primary_profile_is_delete_protected() {
        let svc = service().await;
        let first = svc
            .create_profile("subject-1", None, create_req("Asha"))
            .await
            .unwrap();
        let second = svc
            .create_profile("subject-1", None, create_req("Ravi"))
            .await
            .unwrap();

        let err = svc
            .delete_profile("subject-1", first.profile.profile_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        // Reassign primary, then the old primary can go.
        svc.set_primary("subject-1", second.profile.profile_id)
            .await
            .unwrap();
        svc.delete_profile("subject-1", first.profile.profile_id)
            .await
            .unwrap();

        // Deleting the same profile again fails.
        let err = svc
            .delete_profile("subject-1", first.profile.profile_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_primary_skips_deleted() {
        let svc = service().await;
        let first = svc
            .create_profile("subject-1", None, create_req("Asha"))
            .await
            .unwrap();

        let account = database::account::get_or_create_account(svc.db.pool(), "subject-1", None)
            .await
            .unwrap();
        let primary = svc.get_primary(account.account_id).await.unwrap();
        assert_eq!(
            primary.map(|p| p.profile_id),
            Some(first.profile.profile_id)
        );
    }
}
