/// Declares a fieldless enum together with static lookup tables indexed by
/// the variant ordinal.
///
/// Each variant may carry a display text (`Variant => "text"`); variants
/// without one display as their own name.
macro_rules! ordinal_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident $(=> $text:literal)?),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(u16)]
        $vis enum $name {
            $($variant),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            const NAMES: &'static [&'static str] = &[$(stringify!($variant)),*];

            const TEXTS: &'static [&'static str] = &[$(ordinal_enum!(@text $variant $(, $text)?)),*];

            pub fn name(self) -> &'static str {
                Self::NAMES[self as usize]
            }

            pub fn text(self) -> &'static str {
                Self::TEXTS[self as usize]
            }

            pub fn ordinal(self) -> usize {
                self as usize
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.text())
            }
        }
    };
    (@text $variant:ident) => { stringify!($variant) };
    (@text $variant:ident, $text:literal) => { $text };
}
