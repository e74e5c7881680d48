/// Declare a provider struct.
///
/// Plain fields are handed out by cloning. A nested provider (`..field: Type
/// { ... }`) is asked for the listed types instead, which is how the CLI
/// keeps all values derived from `config.toml` in a single `ConfigProvider`:
///
/// ```ignore
/// provider! {
///     pub Provider {
///         storage: FileStorage,
///         ..config: ConfigProvider {
///             ContactFeatureConfig,
///             ContactSpamGuardConfig,
///         }
///     }
/// }
/// ```
///
/// Every service whose dependencies can be provided this way (see
/// [`Build`](crate::Build)) is available through
/// [`Provide::provide`](crate::Provide::provide).
#[macro_export]
macro_rules! provider {
    ($(#[doc=$doc:literal])* $vis:vis $ident:ident {
        $( $field:ident: $ty:ty, )*
        $( .. $bfield:ident: $base:ty { $($ity:ty,)* $(,)? } )*
    }) => {
        $(#[doc=$doc])*
        $vis struct $ident {
            _cache: $crate::TypeMap,
            $( $field: $ty, )*
            $( $bfield: $base, )*
        }

        impl $crate::Provider for $ident {
            fn cache(&mut self) -> &mut $crate::TypeMap {
                &mut self._cache
            }
        }

        $(
            impl $crate::Build<$ident> for $ty {
                fn build(provider: &mut $ident) -> Self {
                    ::core::clone::Clone::clone(&provider.$field)
                }
            }
        )*

        $($(
            impl $crate::Build<$ident> for $ity {
                fn build(provider: &mut $ident) -> Self {
                    $crate::Provide::provide(&mut provider.$bfield)
                }
            }
        )*)*
    };
}
