//! Declarative macros for the catalog crates.

/// Generates string conversions for a fieldless enum that travels as text.
///
/// ```ignore
/// enum_str! {
///     impl PricingType {
///         pub fn as_str(&self) -> &'static str;
///         pub fn parse_str(raw: &str) -> Option<Self>;
///         variants {
///             Fixed => ["FIXED_PRICING", "fixed"],
///             Variable => ["VARIABLE_PRICING", "variable"],
///         }
///     }
/// }
/// ```
///
/// Expands to:
/// - `ALL`, every variant in declaration order
/// - `as_str(&self)`, the first (canonical) spelling of the variant
/// - `parse_str(&str)`, which trims its input and accepts any spelling,
///   ignoring ASCII case
/// - a `Display` impl that writes the canonical spelling
#[macro_export]
macro_rules! enum_str {
    (
        impl $name:ident {
            $as_vis:vis fn as_str(&self) -> &'static str;
            $parse_vis:vis fn parse_str($raw:ident : &str) -> Option<Self>;
            variants {
                $($variant:ident => [$first:expr $(, $alias:expr)*]),+ $(,)?
            }
        }
    ) => {
        impl $name {
            #[allow(dead_code)]
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            $as_vis fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $first,)+
                }
            }

            #[allow(dead_code)]
            $parse_vis fn parse_str($raw: &str) -> Option<Self> {
                let needle = $raw.trim();
                $(
                    if [$first $(, $alias)*]
                        .iter()
                        .any(|spelling: &&str| spelling.eq_ignore_ascii_case(needle))
                    {
                        return Some(Self::$variant);
                    }
                )+
                None
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}
