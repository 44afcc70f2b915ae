//! Typed views over [`ConfigObject`]
//!
//! Hosts, services, commands and service groups are not separate remote
//! resources. Each view is a narrower shape of the same record, selected by
//! the `:TYPE` discriminator, and converts to and from [`ConfigObject`].

use std::fmt;

use crate::object::{is_unset, AttrValue, ConfigObject, ObjectMeta};

/// Object types with a typed view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Host,
    Service,
    Command,
    Servicegroup,
}

impl ObjectKind {
    /// Value of the `:TYPE` discriminator
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Host => "host",
            ObjectKind::Service => "service",
            ObjectKind::Command => "command",
            ObjectKind::Servicegroup => "servicegroup",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ObjectMeta {
    /// Identity for a new object of `kind` stored in `file`
    pub fn for_kind(kind: ObjectKind, file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            object_type: kind.as_str().to_string(),
            ..Default::default()
        }
    }
}

/// A typed projection of a configuration object
pub trait ConfigView: From<ConfigObject> + Into<ConfigObject> + Send {
    /// Discriminator used to filter lookups
    const KIND: ObjectKind;

    fn meta(&self) -> &ObjectMeta;

    /// Fields that must be set before the object can be created
    fn missing_fields(&self) -> Vec<&'static str>;
}

/// Field conversion between a view and the generic record
trait Reshape<T> {
    fn reshape(self) -> T;
}

impl<T> Reshape<T> for T {
    fn reshape(self) -> T {
        self
    }
}

impl Reshape<Option<String>> for Option<AttrValue> {
    fn reshape(self) -> Option<String> {
        self.and_then(|value| value.first().map(str::to_string))
    }
}

impl Reshape<Option<AttrValue>> for Option<String> {
    fn reshape(self) -> Option<AttrValue> {
        self.map(AttrValue::One)
    }
}

impl Reshape<Vec<String>> for Option<AttrValue> {
    fn reshape(self) -> Vec<String> {
        self.map(AttrValue::into_vec).unwrap_or_default()
    }
}

impl Reshape<Option<AttrValue>> for Vec<String> {
    fn reshape(self) -> Option<AttrValue> {
        if self.is_empty() {
            None
        } else {
            Some(AttrValue::Many(self))
        }
    }
}

macro_rules! config_view {
    (
        $(#[$attr:meta])*
        $view:ident ($kind:expr, required = [$($required:ident),*]) {
            $( $(#[$field_attr:meta])* $field:ident: $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $view {
            pub meta: ObjectMeta,
            $( $(#[$field_attr])* pub $field: $ty, )*
        }

        impl From<ConfigObject> for $view {
            fn from(object: ConfigObject) -> Self {
                Self {
                    meta: object.meta(),
                    $( $field: object.$field.reshape(), )*
                }
            }
        }

        impl From<$view> for ConfigObject {
            fn from(view: $view) -> Self {
                Self {
                    $( $field: view.$field.reshape(), )*
                    ..ConfigObject::from_meta(view.meta)
                }
            }
        }

        impl ConfigView for $view {
            const KIND: ObjectKind = $kind;

            fn meta(&self) -> &ObjectMeta {
                &self.meta
            }

            fn missing_fields(&self) -> Vec<&'static str> {
                let mut missing = Vec::new();
                if self.meta.file.is_empty() {
                    missing.push("file");
                }
                if self.meta.object_type.is_empty() {
                    missing.push("type");
                }
                $(
                    if is_unset(&self.$required) {
                        missing.push(stringify!($required));
                    }
                )*
                missing
            }
        }
    };
}

config_view! {
    /// A monitored host
    Host (ObjectKind::Host, required = []) {
        name: Option<String>,
        host_name: Option<String>,
        alias: Option<String>,
        display_name: Option<String>,
        address: Option<String>,
        use_templates: Vec<String>,
        register: Option<String>,
        parents: Vec<String>,
        hostgroups: Vec<String>,
        contacts: Vec<String>,
        contact_groups: Vec<String>,
        check_command: Option<String>,
        check_interval: Option<String>,
        retry_interval: Option<String>,
        max_check_attempts: Option<String>,
        check_period: Option<String>,
        active_checks_enabled: Option<String>,
        passive_checks_enabled: Option<String>,
        check_freshness: Option<String>,
        freshness_threshold: Option<String>,
        initial_state: Option<String>,
        obsess_over_host: Option<String>,
        process_perf_data: Option<String>,
        failure_prediction_enabled: Option<String>,
        retain_status_information: Option<String>,
        retain_nonstatus_information: Option<String>,
        stalking_options: Vec<String>,
        event_handler_enabled: Option<String>,
        flap_detection_enabled: Option<String>,
        flap_detection_options: Vec<String>,
        low_flap_threshold: Option<String>,
        high_flap_threshold: Option<String>,
        notifications_enabled: Option<String>,
        notification_interval: Option<String>,
        notification_options: Vec<String>,
        notification_period: Option<String>,
        first_notification_delay: Option<String>,
        notes: Option<String>,
        notes_url: Option<String>,
        action_url: Option<String>,
        icon_image: Option<String>,
        icon_image_alt: Option<String>,
        statusmap_image: Option<String>,
        vrml_image: Option<String>,
        coords_2d: Option<String>,
        coords_3d: Option<String>,
        worker: Option<String>,
    }
}

config_view! {
    /// A service attached to one or more hosts or host groups
    Service (ObjectKind::Service, required = []) {
        name: Option<String>,
        service_description: Option<String>,
        display_name: Option<String>,
        host_name: Vec<String>,
        hostgroup_name: Vec<String>,
        use_templates: Vec<String>,
        register: Option<String>,
        parents: Vec<String>,
        servicegroups: Vec<String>,
        contacts: Vec<String>,
        contact_groups: Vec<String>,
        check_command: Option<String>,
        check_interval: Option<String>,
        retry_interval: Option<String>,
        max_check_attempts: Option<String>,
        check_period: Option<String>,
        active_checks_enabled: Option<String>,
        passive_checks_enabled: Option<String>,
        check_freshness: Option<String>,
        freshness_threshold: Option<String>,
        is_volatile: Option<String>,
        initial_state: Option<String>,
        obsess_over_service: Option<String>,
        process_perf_data: Option<String>,
        failure_prediction_enabled: Option<String>,
        retain_status_information: Option<String>,
        retain_nonstatus_information: Option<String>,
        stalking_options: Vec<String>,
        event_handler: Vec<String>,
        event_handler_enabled: Option<String>,
        flap_detection_enabled: Option<String>,
        flap_detection_options: Vec<String>,
        low_flap_threshold: Option<String>,
        high_flap_threshold: Option<String>,
        notifications_enabled: Option<String>,
        notification_interval: Option<String>,
        notification_options: Vec<String>,
        notification_period: Option<String>,
        first_notification_delay: Option<String>,
        notes: Option<String>,
        notes_url: Option<String>,
        action_url: Option<String>,
        icon_image: Option<String>,
        icon_image_alt: Option<String>,
        worker: Option<String>,
    }
}

config_view! {
    /// A check or notification command definition
    Command (ObjectKind::Command, required = [command_name]) {
        command_name: Option<String>,
        command_line: Option<String>,
    }
}

config_view! {
    /// A named group of services
    Servicegroup (ObjectKind::Servicegroup, required = []) {
        name: Option<String>,
        servicegroup_name: Option<String>,
        alias: Option<String>,
        members: Vec<String>,
        servicegroup_members: Vec<String>,
        use_templates: Vec<String>,
        register: Option<String>,
        notes: Option<String>,
        notes_url: Option<String>,
        action_url: Option<String>,
    }
}

impl Host {
    pub fn new(file: impl Into<String>, host_name: impl Into<String>) -> Self {
        Self {
            meta: ObjectMeta::for_kind(ObjectKind::Host, file),
            host_name: Some(host_name.into()),
            ..Default::default()
        }
    }
}

impl Service {
    pub fn new(
        file: impl Into<String>,
        host_name: impl Into<String>,
        service_description: impl Into<String>,
    ) -> Self {
        Self {
            meta: ObjectMeta::for_kind(ObjectKind::Service, file),
            host_name: vec![host_name.into()],
            service_description: Some(service_description.into()),
            ..Default::default()
        }
    }
}

impl Command {
    pub fn new(
        file: impl Into<String>,
        command_name: impl Into<String>,
        command_line: impl Into<String>,
    ) -> Self {
        Self {
            meta: ObjectMeta::for_kind(ObjectKind::Command, file),
            command_name: Some(command_name.into()),
            command_line: Some(command_line.into()),
        }
    }
}

impl Servicegroup {
    pub fn new(file: impl Into<String>, servicegroup_name: impl Into<String>) -> Self {
        Self {
            meta: ObjectMeta::for_kind(ObjectKind::Servicegroup, file),
            servicegroup_name: Some(servicegroup_name.into()),
            ..Default::default()
        }
    }
}
