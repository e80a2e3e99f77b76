//--------------------------------------------------------------------------------------------------
// Macros
//--------------------------------------------------------------------------------------------------

/// A macro for defining a [`RuleProvider`][crate::RuleProvider] from a table of rules.
///
/// Each line is `METHOD "template" => "permission"` optionally followed by `, OPTIONS` where
/// `OPTIONS` is one of the [`RuleOptions`][crate::RuleOptions] constants. The macro evaluates to a
/// `RuleResult<RuleProvider>`.
///
/// ```
/// use gatehouse_rules::rules;
///
/// let provider = rules! {
///     "key" => {
///         POST "/key/create" => "create:key", SKIP_NAMESPACE;
///         GET "/key/read/(.*)" => "read:key", SKIP_NAMESPACE;
///     }
/// }
/// .unwrap();
///
/// assert_eq!(provider.len(), 2);
/// ```
#[macro_export]
macro_rules! rules {
    (@options) => { $crate::RuleOptions::NONE };
    (@options $options:ident) => { $crate::RuleOptions::$options };
    {
        $name:expr => {
            $( $method:ident $template:literal => $permission:literal $(, $options:ident)? );* $(;)?
        }
    } => {
        (|| -> $crate::RuleResult<$crate::RuleProvider> {
            #[allow(unused_mut)]
            let mut provider = $crate::RuleProvider::new($name);
            $(
                provider.register_rule(
                    $template,
                    $crate::Method::$method,
                    $permission,
                    $crate::rules!(@options $($options)?),
                )?;
            )*
            ::std::result::Result::Ok(provider)
        })()
    };
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
