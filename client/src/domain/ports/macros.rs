//! `define_port_error!`: port error enums with message templates, one
//! `Into`-taking constructor per variant and a stable variant name.
//!
//! Every variant carries named fields. The generated constructor is the
//! variant name in snake case, so `NotFound { message }` gains
//! `not_found(message: impl Into<String>)`; [`kind`](#method.kind) returns
//! that same name for structured logs.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),+ },
            )+
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = "Build the `" $variant "` variant."]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                        Self::$variant { $($field: $field.into()),+ }
                    }
                )+

                /// Snake-case variant name, e.g. for a `kind` log field.
                pub fn kind(&self) -> &'static str {
                    match self {
                        $(Self::$variant { .. } => stringify!([<$variant:snake>]),)+
                    }
                }
            }
        }
    };
}

pub(crate) use define_port_error;
