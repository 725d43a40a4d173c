//! User service for profile management and admin user operations.

use log::{debug, info, warn};
use mongodb::bson::{doc, oid::ObjectId};
use std::sync::Arc;

use crate::config::CONFIG;
use crate::constants::{ERR_CANNOT_DEMOTE_SELF, ERR_INVALID_USER_ID, ERR_USER_NOT_FOUND};
use crate::errors::ApiError;
use crate::models::{Role, UpdateMeRequest, User, UserResponse};
use crate::repositories::UserRepository;
use crate::utils::log_sanitizer::mask_phone;

pub struct UserService {
    repository: Arc<UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<UserRepository>) -> Self {
        Self { repository }
    }

    /// Find the user with this phone, creating a fresh one on first sign-in.
    ///
    /// Phones listed in the admins config receive the admin role.
    pub async fn find_or_create_by_phone(&self, phone: &str) -> Result<User, ApiError> {
        if let Some(user) = self.repository.find_by_phone(phone).await? {
            return Ok(user);
        }

        let role = if CONFIG.admins.phones.iter().any(|p| p == phone) {
            Role::Admin
        } else {
            Role::Customer
        };

        let now = mongodb::bson::DateTime::now();
        let user = User {
            id: None,
            phone: phone.to_string(),
            name: None,
            role,
            telegram_id: None,
            is_active: true,
            created_at: now,
            updated_at: now,
            last_sign_in: None,
        };

        let id = self.repository.insert(&user).await?;
        info!("Created user {} for {}", id, mask_phone(phone));

        Ok(User {
            id: Some(id),
            ..user
        })
    }

    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<User>, ApiError> {
        debug!("Fetching user by ID: {}", id);
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| ApiError::BadRequest(ERR_INVALID_USER_ID.to_string()))?;

        self.repository.find_by_id(object_id).await
    }

    pub async fn update_last_sign_in(&self, id: ObjectId) -> Result<(), ApiError> {
        self.repository.update_last_sign_in(id).await
    }

    /// Update the current user's own profile.
    pub async fn update_me(&self, id: &str, update: UpdateMeRequest) -> Result<User, ApiError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| ApiError::BadRequest(ERR_INVALID_USER_ID.to_string()))?;

        let mut set = doc! { "updated_at": mongodb::bson::DateTime::now() };
        if let Some(name) = update.name {
            set.insert("name", name);
        }
        self.repository.update(object_id, set).await?;

        self.repository
            .find_by_id(object_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(ERR_USER_NOT_FOUND.to_string()))
    }

    /// Admin listing with role/active filters and free-text search.
    pub async fn get_all_users(
        &self,
        page: u64,
        per_page: u64,
        role_filter: Option<&str>,
        active_filter: Option<bool>,
        search_query: Option<&str>,
    ) -> Result<(Vec<UserResponse>, u64), ApiError> {
        let mut filter = doc! {};

        if let Some(role) = role_filter {
            filter.insert("role", role.to_lowercase());
        }

        if let Some(is_active) = active_filter {
            filter.insert("is_active", is_active);
        }

        if let Some(search) = search_query {
            if !search.trim().is_empty() {
                let search_regex = mongodb::bson::Regex {
                    pattern: regex::escape(search.trim()),
                    options: "i".to_string(),
                };
                filter.insert(
                    "$or",
                    vec![
                        doc! { "phone": { "$regex": &search_regex } },
                        doc! { "name": { "$regex": &search_regex } },
                    ],
                );
            }
        }

        debug!("Fetching users with filter: {:?}", filter);

        let total = self.repository.count(filter.clone()).await?;
        let skip = (page - 1) * per_page;

        let users = self
            .repository
            .find_with_filter(filter, skip, per_page as i64)
            .await?;

        Ok((users.into_iter().map(|u| u.into()).collect(), total))
    }

    /// Change a user's role. Admins cannot demote themselves.
    pub async fn update_role(
        &self,
        actor_id: &str,
        target_id: &str,
        role: &str,
    ) -> Result<User, ApiError> {
        let object_id = ObjectId::parse_str(target_id)
            .map_err(|_| ApiError::BadRequest(ERR_INVALID_USER_ID.to_string()))?;

        let role = Role::from_str(role);
        if actor_id == target_id && !role.is_admin() {
            warn!("Admin {} attempted to demote themselves", actor_id);
            return Err(ApiError::BadRequest(ERR_CANNOT_DEMOTE_SELF.to_string()));
        }

        let user = self
            .repository
            .find_by_id(object_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(ERR_USER_NOT_FOUND.to_string()))?;

        self.repository
            .update_role(object_id, &role.to_string())
            .await?;
        info!("Role of user {} changed to {}", target_id, role);

        Ok(User { role, ..user })
    }
}
