//! Per-request security context and session defaulting.
//!
//! The context is built once before assembly starts and handed by reference
//! into every assembler call; nothing in the engine mutates it.

use crate::{
    error::{ErrorOrigin, InternalError},
    model::Id,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Language used when the request does not name one.
pub const DEFAULT_LANGUAGE: &str = "en_US";

///
/// RequestContext
///
/// Identity of the current actor plus session preferences.
/// Preference keys are matched case-insensitively by `preference`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RequestContext {
    pub role_id: Id,
    pub user_id: Id,
    #[serde(default)]
    pub client_id: Id,
    #[serde(default)]
    pub org_id: Id,
    #[serde(default)]
    pub warehouse_id: Option<Id>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub preferences: BTreeMap<String, String>,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl RequestContext {
    #[must_use]
    pub fn new(role_id: impl Into<Id>, user_id: impl Into<Id>) -> Self {
        Self {
            role_id: role_id.into(),
            user_id: user_id.into(),
            client_id: Id::default(),
            org_id: Id::default(),
            warehouse_id: None,
            language: default_language(),
            preferences: BTreeMap::new(),
        }
    }

    /// Build a context from resolved session defaults.
    #[must_use]
    pub fn from_session(session: &SessionDefaults, language: impl Into<String>) -> Self {
        Self {
            role_id: session.role_id.clone(),
            user_id: session.user_id.clone(),
            client_id: session.client_id.clone(),
            org_id: session.org_id.clone(),
            warehouse_id: session.warehouse_id.clone(),
            language: language.into(),
            preferences: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    #[must_use]
    pub fn with_org(mut self, org_id: impl Into<Id>) -> Self {
        self.org_id = org_id.into();
        self
    }

    #[must_use]
    pub fn with_preference(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.preferences.insert(name.into(), value.into());
        self
    }

    /// Look up a session value by name.
    ///
    /// The built-in session keys (`AD_Role_ID`, `AD_User_ID`, `AD_Client_ID`,
    /// `AD_Org_ID`, `M_Warehouse_ID`, `AD_Language`) win over stored
    /// preferences of the same name.
    #[must_use]
    pub fn preference(&self, name: &str) -> Option<String> {
        let builtin = match name.to_ascii_uppercase().as_str() {
            "AD_ROLE_ID" => Some(self.role_id.to_string()),
            "AD_USER_ID" => Some(self.user_id.to_string()),
            "AD_CLIENT_ID" => Some(self.client_id.to_string()),
            "AD_ORG_ID" => Some(self.org_id.to_string()),
            "M_WAREHOUSE_ID" => self.warehouse_id.as_ref().map(ToString::to_string),
            "AD_LANGUAGE" => Some(self.language.clone()),
            _ => None,
        };

        builtin.or_else(|| {
            self.preferences
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.clone())
        })
    }
}

///
/// OrgGrant
/// One organization reachable through a role, with its warehouses in order.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct OrgGrant {
    pub org_id: Id,
    #[serde(default)]
    pub warehouses: Vec<Id>,
}

///
/// RoleGrant
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RoleGrant {
    pub role_id: Id,
    #[serde(default)]
    pub client_id: Id,
    #[serde(default)]
    pub organizations: Vec<OrgGrant>,
}

impl OrgGrant {
    fn warehouse(&self, warehouse_id: &Id) -> Option<&Id> {
        self.warehouses.iter().find(|id| *id == warehouse_id)
    }
}

impl RoleGrant {
    fn organization(&self, org_id: &Id) -> Option<&OrgGrant> {
        self.organizations.iter().find(|org| &org.org_id == org_id)
    }
}

///
/// UserGrants
/// The user's granted roles and stored defaults.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct UserGrants {
    pub user_id: Id,
    #[serde(default)]
    pub roles: Vec<RoleGrant>,
    #[serde(default)]
    pub default_ws_role: Option<Id>,
    #[serde(default)]
    pub default_role: Option<Id>,
    #[serde(default)]
    pub default_org: Option<Id>,
    #[serde(default)]
    pub default_warehouse: Option<Id>,
}

impl UserGrants {
    fn role(&self, role_id: &Id) -> Option<&RoleGrant> {
        self.roles.iter().find(|role| &role.role_id == role_id)
    }
}

///
/// SessionRequest
/// What the caller asked for; every part is optional.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SessionRequest {
    pub role: Option<Id>,
    pub org: Option<Id>,
    pub warehouse: Option<Id>,
}

///
/// SessionDefaults
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SessionDefaults {
    pub user_id: Id,
    pub client_id: Id,
    pub role_id: Id,
    pub org_id: Id,
    pub warehouse_id: Option<Id>,
}

/// Choose role, organization and warehouse for a new session.
///
/// Role: the requested role (must be granted), else the web-service default,
/// else the user default, else the first granted role.
/// Organization: the requested one (must belong to the role), else the user
/// default when the chosen role is the user's default role, else the role's
/// first organization.
/// Warehouse: the requested one (must belong to the organization), else the
/// user default when the organization holds it, else the organization's first
/// warehouse.
pub fn resolve_session_defaults(
    request: &SessionRequest,
    grants: &UserGrants,
) -> Result<SessionDefaults, InternalError> {
    let role = select_role(request, grants)?;
    let org = select_org(request, grants, role)?;

    let warehouse_id = select_warehouse(request, grants, org)?;

    Ok(SessionDefaults {
        user_id: grants.user_id.clone(),
        client_id: role.client_id.clone(),
        role_id: role.role_id.clone(),
        org_id: org.org_id.clone(),
        warehouse_id,
    })
}

// Pick the role, rejecting a requested role the user does not hold.
fn select_role<'a>(
    request: &SessionRequest,
    grants: &'a UserGrants,
) -> Result<&'a RoleGrant, InternalError> {
    if let Some(requested) = &request.role {
        return grants.role(requested).ok_or_else(|| {
            InternalError::unauthorized(
                ErrorOrigin::Session,
                format!("role {requested} is not granted to user {}", grants.user_id),
            )
        });
    }

    [&grants.default_ws_role, &grants.default_role]
        .into_iter()
        .flatten()
        .find_map(|id| grants.role(id))
        .or_else(|| grants.roles.first())
        .ok_or_else(|| {
            InternalError::unauthorized(
                ErrorOrigin::Session,
                format!("user {} has no roles", grants.user_id),
            )
        })
}

// Pick the organization within the selected role.
fn select_org<'a>(
    request: &SessionRequest,
    grants: &UserGrants,
    role: &'a RoleGrant,
) -> Result<&'a OrgGrant, InternalError> {
    if let Some(requested) = &request.org {
        return role.organization(requested).ok_or_else(|| {
            InternalError::unauthorized(
                ErrorOrigin::Session,
                format!("organization {requested} is not granted to role {}", role.role_id),
            )
        });
    }

    let selected_is_default = grants.default_role.as_ref() == Some(&role.role_id);
    let default_org = grants
        .default_org
        .as_ref()
        .filter(|_| selected_is_default)
        .and_then(|id| role.organization(id));

    default_org
        .or_else(|| role.organizations.first())
        .ok_or_else(|| {
            InternalError::unauthorized(
                ErrorOrigin::Session,
                format!("role {} has no organizations", role.role_id),
            )
        })
}

// Pick the warehouse within the selected organization.
fn select_warehouse(
    request: &SessionRequest,
    grants: &UserGrants,
    org: &OrgGrant,
) -> Result<Option<Id>, InternalError> {
    if let Some(requested) = &request.warehouse {
        return org.warehouse(requested).cloned().map(Some).ok_or_else(|| {
            InternalError::unauthorized(
                ErrorOrigin::Session,
                format!("warehouse {requested} does not belong to organization {}", org.org_id),
            )
        });
    }

    Ok(grants
        .default_warehouse
        .as_ref()
        .and_then(|id| org.warehouse(id))
        .or_else(|| org.warehouses.first())
        .cloned())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn grants() -> UserGrants {
        UserGrants {
            user_id: Id::from("U1"),
            roles: vec![
                RoleGrant {
                    role_id: Id::from("R1"),
                    client_id: Id::from("C1"),
                    organizations: vec![
                        OrgGrant {
                            org_id: Id::from("O1"),
                            warehouses: vec![Id::from("W1")],
                        },
                        OrgGrant {
                            org_id: Id::from("O2"),
                            warehouses: vec![],
                        },
                    ],
                },
                RoleGrant {
                    role_id: Id::from("R2"),
                    client_id: Id::from("C2"),
                    organizations: vec![OrgGrant {
                        org_id: Id::from("O3"),
                        warehouses: vec![Id::from("W3"), Id::from("W4")],
                    }],
                },
            ],
            ..UserGrants::default()
        }
    }

    #[test]
    fn empty_request_falls_back_to_first_grants() {
        let session = resolve_session_defaults(&SessionRequest::default(), &grants()).unwrap();

        assert_eq!(session.role_id, Id::from("R1"));
        assert_eq!(session.client_id, Id::from("C1"));
        assert_eq!(session.org_id, Id::from("O1"));
        assert_eq!(session.warehouse_id, Some(Id::from("W1")));
    }

    #[test]
    fn web_service_default_beats_default_role() {
        let mut grants = grants();
        grants.default_ws_role = Some(Id::from("R2"));
        grants.default_role = Some(Id::from("R1"));

        let session = resolve_session_defaults(&SessionRequest::default(), &grants).unwrap();

        assert_eq!(session.role_id, Id::from("R2"));
        assert_eq!(session.org_id, Id::from("O3"));
        assert_eq!(session.warehouse_id, Some(Id::from("W3")));
    }

    #[test]
    fn default_org_applies_only_to_default_role() {
        let mut grants = grants();
        grants.default_role = Some(Id::from("R1"));
        grants.default_org = Some(Id::from("O2"));

        let on_default = resolve_session_defaults(&SessionRequest::default(), &grants).unwrap();
        assert_eq!(on_default.org_id, Id::from("O2"));
        assert_eq!(on_default.warehouse_id, None);

        let request = SessionRequest {
            role: Some(Id::from("R2")),
            ..SessionRequest::default()
        };
        let on_other = resolve_session_defaults(&request, &grants).unwrap();
        assert_eq!(on_other.org_id, Id::from("O3"));
    }

    #[test]
    fn ungranted_role_is_unauthorized() {
        let request = SessionRequest {
            role: Some(Id::from("R9")),
            ..SessionRequest::default()
        };

        let err = resolve_session_defaults(&request, &grants()).unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.origin, ErrorOrigin::Session);
    }

    #[test]
    fn org_outside_role_is_unauthorized() {
        let request = SessionRequest {
            role: Some(Id::from("R1")),
            org: Some(Id::from("O3")),
            warehouse: None,
        };

        let err = resolve_session_defaults(&request, &grants()).unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn requested_warehouse_wins() {
        let mut grants = grants();
        grants.default_warehouse = Some(Id::from("W4"));
        let request = SessionRequest {
            role: Some(Id::from("R2")),
            warehouse: Some(Id::from("W3")),
            ..SessionRequest::default()
        };

        let session = resolve_session_defaults(&request, &grants).unwrap();
        assert_eq!(session.warehouse_id, Some(Id::from("W3")));
    }

    #[test]
    fn warehouse_outside_org_is_unauthorized() {
        let request = SessionRequest {
            warehouse: Some(Id::from("W3")),
            ..SessionRequest::default()
        };

        let err = resolve_session_defaults(&request, &grants()).unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.origin, ErrorOrigin::Session);
    }

    #[test]
    fn default_warehouse_applies_only_inside_its_org() {
        let mut grants = grants();
        grants.default_warehouse = Some(Id::from("W4"));

        let first = resolve_session_defaults(&SessionRequest::default(), &grants).unwrap();
        assert_eq!(first.org_id, Id::from("O1"));
        assert_eq!(first.warehouse_id, Some(Id::from("W1")));

        let request = SessionRequest {
            role: Some(Id::from("R2")),
            ..SessionRequest::default()
        };
        let holding = resolve_session_defaults(&request, &grants).unwrap();
        assert_eq!(holding.warehouse_id, Some(Id::from("W4")));
    }

    #[test]
    fn builtin_preferences_shadow_stored_ones() {
        let ctx = RequestContext::new("R1", "U1")
            .with_org("O1")
            .with_preference("ad_org_id", "ignored")
            .with_preference("ShowAudit", "Y");

        assert_eq!(ctx.preference("#AD_Org_ID".trim_start_matches('#')), Some("O1".into()));
        assert_eq!(ctx.preference("showaudit"), Some("Y".into()));
        assert_eq!(ctx.preference("missing"), None);
        assert_eq!(ctx.preference("M_Warehouse_ID"), None);
    }
}
