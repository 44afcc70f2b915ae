//! Wire representation of Thruk configuration objects
//!
//! Server-reserved metadata uses colon-prefixed keys (`:FILE`, `:ID`,
//! `:PEER_KEY`, `:READONLY`, `:TYPE`); everything else is a plain
//! lower-snake-case attribute. Unset attributes are omitted from the
//! serialized JSON, never sent as `null` or `""`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An attribute that the server reports either as a scalar or as a list
///
/// `host_name` is a single name on hosts and a list on services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    One(String),
    Many(Vec<String>),
}

impl AttrValue {
    pub fn is_empty(&self) -> bool {
        match self {
            AttrValue::One(value) => value.is_empty(),
            AttrValue::Many(values) => values.is_empty(),
        }
    }

    /// First value, if any
    pub fn first(&self) -> Option<&str> {
        match self {
            AttrValue::One(value) if !value.is_empty() => Some(value),
            AttrValue::One(_) => None,
            AttrValue::Many(values) => values.first().map(String::as_str),
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            AttrValue::One(value) if value.is_empty() => Vec::new(),
            AttrValue::One(value) => vec![value],
            AttrValue::Many(values) => values,
        }
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::One(value)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(values: Vec<String>) -> Self {
        AttrValue::Many(values)
    }
}

pub(crate) fn is_unset(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

fn is_unset_attr(value: &Option<AttrValue>) -> bool {
    value.as_ref().is_none_or(AttrValue::is_empty)
}

/// Identity shared by every configuration object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMeta {
    /// Config file, relative on create; the server reports `path:line`
    pub file: String,
    pub id: Option<String>,
    pub peer_key: Option<String>,
    pub readonly: Option<i32>,
    pub object_type: String,
}

/// Generic configuration object as exchanged with the Thruk API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigObject {
    #[serde(rename = ":FILE")]
    pub file: String,
    #[serde(rename = ":ID", skip_serializing_if = "is_unset")]
    pub id: Option<String>,
    #[serde(rename = ":PEER_KEY", skip_serializing_if = "is_unset")]
    pub peer_key: Option<String>,
    #[serde(rename = ":READONLY", skip_serializing_if = "Option::is_none")]
    pub readonly: Option<i32>,
    #[serde(rename = ":TYPE")]
    pub object_type: String,

    // Names
    #[serde(skip_serializing_if = "is_unset")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "is_unset_attr")]
    pub host_name: Option<AttrValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hostgroup_name: Vec<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub service_description: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub servicegroup_name: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub timeperiod_name: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub command_name: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub command_line: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub address: Option<String>,
    #[serde(rename = "use", skip_serializing_if = "Vec::is_empty")]
    pub use_templates: Vec<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub register: Option<String>,

    // Membership
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hostgroups: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub servicegroups: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub servicegroup_members: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contacts: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contact_groups: Vec<String>,

    // Checks
    #[serde(skip_serializing_if = "is_unset")]
    pub check_command: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub check_interval: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub retry_interval: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub max_check_attempts: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub check_period: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub active_checks_enabled: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub passive_checks_enabled: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub check_freshness: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub freshness_threshold: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub is_volatile: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub initial_state: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub obsess_over_host: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub obsess_over_service: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub process_perf_data: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub failure_prediction_enabled: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub retain_status_information: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub retain_nonstatus_information: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stalking_options: Vec<String>,

    // Event handling and flapping
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub event_handler: Vec<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub event_handler_enabled: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub flap_detection_enabled: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub flap_detection_options: Vec<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub low_flap_threshold: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub high_flap_threshold: Option<String>,

    // Notifications
    #[serde(skip_serializing_if = "is_unset")]
    pub notifications_enabled: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub notification_interval: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notification_options: Vec<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub notification_period: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub first_notification_delay: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub host_notification_commands: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub host_notification_options: Vec<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub host_notification_period: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub service_notification_commands: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub service_notification_options: Vec<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub service_notification_period: Option<String>,

    // Time periods
    #[serde(skip_serializing_if = "is_unset")]
    pub monday: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub tuesday: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub wednesday: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub thursday: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub friday: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub saturday: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub sunday: Option<String>,

    // Presentation
    #[serde(skip_serializing_if = "is_unset")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub notes_url: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub action_url: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub icon_image: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub icon_image_alt: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub statusmap_image: Option<String>,
    #[serde(skip_serializing_if = "is_unset")]
    pub vrml_image: Option<String>,
    #[serde(rename = "2d_coords", skip_serializing_if = "is_unset")]
    pub coords_2d: Option<String>,
    #[serde(rename = "3d_coords", skip_serializing_if = "is_unset")]
    pub coords_3d: Option<String>,

    /// Worker (mod-gearman) custom variable
    #[serde(rename = "_WORKER", skip_serializing_if = "is_unset")]
    pub worker: Option<String>,

    /// Attributes without a dedicated field, e.g. other custom variables
    #[serde(flatten)]
    pub custom: BTreeMap<String, serde_json::Value>,
}

impl ConfigObject {
    /// Empty object of the given type stored in `file`
    pub fn new(object_type: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            object_type: object_type.into(),
            ..Default::default()
        }
    }

    pub fn meta(&self) -> ObjectMeta {
        ObjectMeta {
            file: self.file.clone(),
            id: self.id.clone(),
            peer_key: self.peer_key.clone(),
            readonly: self.readonly,
            object_type: self.object_type.clone(),
        }
    }

    pub(crate) fn from_meta(meta: ObjectMeta) -> Self {
        Self {
            file: meta.file,
            id: meta.id,
            peer_key: meta.peer_key,
            readonly: meta.readonly,
            object_type: meta.object_type,
            ..Default::default()
        }
    }

    /// Names of the identity fields a create request cannot do without
    pub fn missing_identity(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.file.is_empty() {
            missing.push("file");
        }
        if self.object_type.is_empty() {
            missing.push("type");
        }
        missing
    }
}

/// Response to a create request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateResponse {
    pub count: u64,
    pub message: String,
    pub objects: Vec<ConfigObject>,
}

/// Per-peer outcome of a reload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReloadResult {
    pub failed: bool,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub peer_key: String,
}

/// Per-peer outcome of a configuration check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub failed: bool,
    #[serde(default)]
    pub output: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub peer_key: String,
}
