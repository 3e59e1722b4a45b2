//! Destinations for resolved values.

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

use crate::errors::Result;

/// Receives resolved values by logical name.
pub trait ValueSink {
    fn set_value(&mut self, name: &str, value: &str) -> Result<()>;
}

impl ValueSink for HashMap<String, String> {
    fn set_value(&mut self, name: &str, value: &str) -> Result<()> {
        self.insert(name.to_string(), value.to_string());
        Ok(())
    }
}

impl ValueSink for BTreeMap<String, String> {
    fn set_value(&mut self, name: &str, value: &str) -> Result<()> {
        self.insert(name.to_string(), value.to_string());
        Ok(())
    }
}

/// Keeps values in the order they were resolved
impl ValueSink for IndexMap<String, String> {
    fn set_value(&mut self, name: &str, value: &str) -> Result<()> {
        self.insert(name.to_string(), value.to_string());
        Ok(())
    }
}

/// A struct whose slots are declared up front together with their tags.
///
/// Normally implemented through [`tagged_config!`](crate::tagged_config).
pub trait TaggedConfig: ValueSink {
    /// `(slot name, tag string)` for every declared slot, in declaration order
    fn field_tags() -> &'static [(&'static str, &'static str)];
}

/// Declare a config struct filled by [`load`](crate::loader::load).
///
/// Every slot is an `Option<String>` that stays `None` until loaded. The
/// generated type has no `Debug` impl so resolved secrets are not printed by
/// accident.
///
/// ```rust,ignore
/// opconnect::tagged_config! {
///     pub struct DatabaseConfig {
///         pub username => "opitem:Database opfield:.username",
///         pub password => "opitem:Database opfield:credentials.password opvault:Shared",
///     }
/// }
/// ```
#[macro_export]
macro_rules! tagged_config {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident => $tag:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Default, PartialEq, Eq)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: ::std::option::Option<::std::string::String>,
            )*
        }

        impl $crate::loader::ValueSink for $name {
            fn set_value(&mut self, name: &str, value: &str) -> $crate::errors::Result<()> {
                match name {
                    $(
                        stringify!($field) => {
                            self.$field = ::std::option::Option::Some(value.to_string());
                            Ok(())
                        }
                    )*
                    _ => Err($crate::errors::ConnectError::unknown_target(name)),
                }
            }
        }

        impl $crate::loader::TaggedConfig for $name {
            fn field_tags() -> &'static [(&'static str, &'static str)] {
                &[$((stringify!($field), $tag)),*]
            }
        }
    };
}
