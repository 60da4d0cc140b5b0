//! Declaration helpers.

/// Declare a marker qualifier: a unit struct retained at runtime and
/// declared as a binding qualifier.
///
/// ```ignore
/// bindery_qualifier::marker_qualifier! {
///     /// The primary database.
///     pub struct Primary;
/// }
/// ```
#[macro_export]
macro_rules! marker_qualifier {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::Qualifier for $name {
            const INFO: &'static $crate::QualifierInfo = &$crate::QualifierInfo::marker(
                concat!(module_path!(), "::", stringify!($name)),
            );
        }
    };
}
