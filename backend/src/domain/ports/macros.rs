//! Helper macro for declaring port error enums.
//!
//! Every port error is a `thiserror` enum. The macro also emits one
//! snake_case constructor per variant whose fields accept `impl Into<_>`, so
//! adapters can write `RecipePersistenceError::query(err.to_string())`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };

    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Build the `", stringify!($variant), "` variant.")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* }) => {
        ::paste::paste! {
            #[doc = concat!("Build the `", stringify!($variant), "` variant.")]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for the generated constructors.
    define_port_error! {
        pub enum SamplePortError {
            Offline => "store offline",
            Query { message: String } => "query failed: {message}",
            Conflict { key: String, attempts: u32 } => "conflict on {key} after {attempts}",
        }
    }

    #[test]
    fn unit_variant_constructor() {
        assert_eq!(SamplePortError::offline(), SamplePortError::Offline);
        assert_eq!(SamplePortError::offline().to_string(), "store offline");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = SamplePortError::query("timeout");
        assert_eq!(err.to_string(), "query failed: timeout");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = SamplePortError::conflict("username", 2_u32);
        assert_eq!(err.to_string(), "conflict on username after 2");
    }
}
