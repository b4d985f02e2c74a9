//! Macros for ergonomic machine construction.

/// Generate a closed, fieldless enum usable as state or event names.
///
/// The enum derives everything an [`Identifier`](crate::Identifier) needs
/// plus serde support, and gets `ALL`, `as_str` and `Display`.
///
/// # Example
///
/// ```
/// use reactive_fsm::name_enum;
///
/// name_enum! {
///     pub enum Light {
///         Red,
///         Yellow,
///         Green,
///     }
/// }
///
/// assert_eq!(Light::ALL.len(), 3);
/// assert_eq!(Light::Green.as_str(), "Green");
/// assert_eq!(Light::Red.to_string(), "Red");
/// ```
#[macro_export]
macro_rules! name_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every name, in declaration order.
            #[allow(dead_code)]
            pub const ALL: &'static [$name] = &[$(Self::$variant),*];

            #[allow(dead_code)]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}
