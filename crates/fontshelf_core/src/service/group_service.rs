//! Font group create/update/delete/list workflows.
//!
//! # Responsibility
//! - Enforce group membership rules before any store mutation.
//! - Delegate each accepted change to one repository unit of work.
//!
//! # Invariants
//! - A group is only written with at least two distinct, existing fonts.
//! - Font existence is checked before the write transaction opens; a font
//!   deleted in between is caught only by the store's foreign key.

use crate::model::font_group::{FontGroup, FontGroupRecord, MIN_GROUP_FONTS};
use crate::repo::font_group_repo::FontGroupRepository;
use crate::repo::font_repo::FontRepository;
use crate::repo::RepoError;
use crate::service::error::{ServiceError, ServiceResult};
use log::{error, info};
use serde::Deserialize;
use std::collections::HashSet;

const MSG_NAME_REQUIRED: &str = "Group name is required";
const MSG_TOO_FEW_FONTS: &str = "At least two fonts must be selected";
const MSG_GROUP_EXISTS: &str = "Font group with this name already exists";
const MSG_UNKNOWN_FONT: &str = "One or more selected fonts do not exist";
const MSG_TOO_FEW_DISTINCT: &str = "At least two different fonts must be selected";
const MSG_GROUP_NOT_FOUND: &str = "Font group not found";
const MSG_CREATE_FAILED: &str = "Failed to create font group";
const MSG_UPDATE_FAILED: &str = "Failed to update font group";
const MSG_DELETE_FAILED: &str = "Failed to delete font group";
const MSG_LIST_FAILED: &str = "Failed to load font groups";
const MSG_LOOKUP_FAILED: &str = "Failed to check existing names";

/// Create/update request body: `{name, fonts: [{name}, ...]}`.
///
/// Fields are optional so that missing values surface as validation
/// messages rather than parse errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GroupRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fonts: Option<Vec<FontRef>>,
}

/// One selected font inside a group request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FontRef {
    #[serde(default)]
    pub name: Option<String>,
}

impl GroupRequest {
    /// Builds a request from a group name and font names.
    pub fn new<I, S>(name: impl Into<String>, fonts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: Some(name.into()),
            fonts: Some(
                fonts
                    .into_iter()
                    .map(|font| FontRef {
                        name: Some(font.into()),
                    })
                    .collect(),
            ),
        }
    }
}

/// Validated group write: trimmed name and distinct font names in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
struct GroupDraft {
    name: String,
    font_names: Vec<String>,
}

/// Group workflow facade over group and font repositories.
pub struct GroupService<G: FontGroupRepository, F: FontRepository> {
    groups: G,
    fonts: F,
}

impl<G: FontGroupRepository, F: FontRepository> GroupService<G, F> {
    pub fn new(groups: G, fonts: F) -> Self {
        Self { groups, fonts }
    }

    /// Creates a group from at least two distinct existing fonts.
    pub fn create_group(&self, request: &GroupRequest) -> ServiceResult<FontGroup> {
        let draft = self.validate(request, None)?;
        let group = self
            .groups
            .create_group(&draft.name, &draft.font_names)
            .map_err(|err| translate_write_error("group_create", err, MSG_CREATE_FAILED))?;

        info!(
            "event=group_create module=service status=ok id={} fonts={}",
            group.id,
            draft.font_names.len()
        );
        Ok(group)
    }

    /// Renames and/or replaces the membership of the group called `old_name`.
    pub fn update_group(&self, old_name: &str, request: &GroupRequest) -> ServiceResult<()> {
        let draft = self.validate(request, Some(old_name))?;
        self.groups
            .update_group(old_name, &draft.name, &draft.font_names)
            .map_err(|err| translate_write_error("group_update", err, MSG_UPDATE_FAILED))?;

        info!(
            "event=group_update module=service status=ok renamed={} fonts={}",
            draft.name != old_name,
            draft.font_names.len()
        );
        Ok(())
    }

    /// Deletes a group together with all of its memberships.
    pub fn delete_group(&self, name: &str) -> ServiceResult<()> {
        self.groups
            .delete_group(name)
            .map_err(|err| translate_write_error("group_delete", err, MSG_DELETE_FAILED))?;
        info!("event=group_delete module=service status=ok");
        Ok(())
    }

    /// Lists all groups newest first with their member fonts.
    pub fn list_groups(&self) -> ServiceResult<Vec<FontGroupRecord>> {
        self.groups.list_groups().map_err(|err| {
            error!("event=group_list module=service status=error error={err}");
            ServiceError::Store(MSG_LIST_FAILED.to_string())
        })
    }

    /// Runs the shared create/update validation pipeline.
    ///
    /// `current_name` is the group being updated; keeping its own name is not
    /// a conflict.
    fn validate(
        &self,
        request: &GroupRequest,
        current_name: Option<&str>,
    ) -> ServiceResult<GroupDraft> {
        let name = request
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ServiceError::Validation(MSG_NAME_REQUIRED.to_string()))?;

        let fonts = request
            .fonts
            .as_deref()
            .filter(|fonts| fonts.len() >= MIN_GROUP_FONTS)
            .ok_or_else(|| ServiceError::Validation(MSG_TOO_FEW_FONTS.to_string()))?;

        if current_name != Some(name) && self.groups.group_exists(name).map_err(lookup_error)? {
            return Err(ServiceError::Conflict(MSG_GROUP_EXISTS.to_string()));
        }

        let mut seen = HashSet::new();
        let mut font_names = Vec::with_capacity(fonts.len());
        for font_name in fonts.iter().filter_map(|font| font.name.as_deref()) {
            if font_name.trim().is_empty() {
                continue;
            }
            if !self.fonts.font_exists(font_name).map_err(lookup_error)? {
                return Err(ServiceError::Validation(MSG_UNKNOWN_FONT.to_string()));
            }
            if seen.insert(font_name) {
                font_names.push(font_name.to_string());
            }
        }

        if font_names.len() < MIN_GROUP_FONTS {
            return Err(ServiceError::Validation(MSG_TOO_FEW_DISTINCT.to_string()));
        }

        Ok(GroupDraft {
            name: name.to_string(),
            font_names,
        })
    }
}

fn lookup_error(err: RepoError) -> ServiceError {
    error!("event=group_validate module=service status=error error={err}");
    ServiceError::Store(MSG_LOOKUP_FAILED.to_string())
}

fn translate_write_error(event: &str, err: RepoError, fallback: &str) -> ServiceError {
    match err {
        RepoError::DuplicateName(_) => ServiceError::Conflict(MSG_GROUP_EXISTS.to_string()),
        RepoError::GroupNotFound(_) => ServiceError::NotFound(MSG_GROUP_NOT_FOUND.to_string()),
        other => {
            error!("event={event} module=service status=error error_code=rolled_back error={other}");
            ServiceError::Transaction(fallback.to_string())
        }
    }
}
