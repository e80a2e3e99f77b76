use std::fmt::Display;

use gatehouse_path::PathPattern;
use serde::{Deserialize, Serialize};

use crate::{Method, Permission, RuleError, RuleResult};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// An immutable binding of an HTTP method and a route pattern to the permission a caller needs.
///
/// A rule without a permission must set [`RuleOptions::allow_unauthorized`]. Such a rule can still be
/// built so the registry can report it, but the engine refuses to decide on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    method: Method,
    pattern: PathPattern,
    permission: Option<Permission>,
    #[serde(flatten)]
    options: RuleOptions,
}

/// Per-rule access options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleOptions {
    /// Use the permission as is instead of appending the request's namespace.
    #[serde(default)]
    pub skip_namespace: bool,

    /// Grant access without looking at the caller's identity.
    #[serde(default)]
    pub allow_unauthorized: bool,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Rule {
    /// Creates a rule from a route template and a permission template.
    ///
    /// An empty `permission` means the rule requires none. A permission that already names a
    /// namespace is only accepted together with `skip_namespace`, since another namespace would be
    /// appended otherwise.
    pub fn new(
        template: impl AsRef<str>,
        method: Method,
        permission: impl AsRef<str>,
        options: RuleOptions,
    ) -> RuleResult<Self> {
        let pattern = PathPattern::compile(template)?;
        let permission = match permission.as_ref() {
            "" => None,
            scope => Some(scope.parse::<Permission>()?),
        };

        if let Some(permission) = &permission {
            if permission.is_namespaced() && !options.skip_namespace {
                return Err(RuleError::InvalidPermission(permission.to_string()));
            }
        }

        Ok(Self {
            method,
            pattern,
            permission,
            options,
        })
    }

    /// Gets the HTTP method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Gets the route pattern.
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Gets the permission template, `None` if the rule requires none.
    pub fn permission(&self) -> Option<&Permission> {
        self.permission.as_ref()
    }

    /// Gets the options.
    pub fn options(&self) -> RuleOptions {
        self.options
    }

    /// Returns whether the permission is used without a namespace suffix.
    pub fn skip_namespace(&self) -> bool {
        self.options.skip_namespace
    }

    /// Returns whether the rule grants access without an identity.
    pub fn allow_unauthorized(&self) -> bool {
        self.options.allow_unauthorized
    }

    /// Returns whether the rule can never be decided on.
    pub fn is_misconfigured(&self) -> bool {
        self.permission.is_none() && !self.options.allow_unauthorized
    }

    /// Returns whether both rules apply to exactly the same requests.
    pub fn same_route(&self, other: &Rule) -> bool {
        self.method == other.method && self.pattern.same_shape(&other.pattern)
    }

    /// Returns whether this rule, registered earlier, takes every request `later` would match.
    pub fn shadows(&self, later: &Rule) -> bool {
        self.method == later.method && self.pattern.covers(&later.pattern)
    }

    /// Returns the method and template, e.g. `POST /key/create`.
    pub fn route(&self) -> String {
        format!("{} {}", self.method, self.pattern)
    }

    /// Returns the permission template as a string, empty if the rule requires none.
    pub fn permission_str(&self) -> String {
        self.permission
            .as_ref()
            .map(Permission::to_string)
            .unwrap_or_default()
    }
}

impl RuleOptions {
    /// No options: a permission with the request's namespace appended is required.
    pub const NONE: RuleOptions = RuleOptions {
        skip_namespace: false,
        allow_unauthorized: false,
    };

    /// The permission is required as is.
    pub const SKIP_NAMESPACE: RuleOptions = RuleOptions {
        skip_namespace: true,
        allow_unauthorized: false,
    };

    /// No identity is required.
    pub const PUBLIC: RuleOptions = RuleOptions {
        skip_namespace: true,
        allow_unauthorized: true,
    };
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let permission = match &self.permission {
            Some(permission) => permission.to_string(),
            None => "<none>".to_owned(),
        };

        write!(f, "{} -> {}", self.route(), permission)?;
        if self.options.skip_namespace {
            write!(f, " [skip-namespace]")?;
        }
        if self.options.allow_unauthorized {
            write!(f, " [allow-unauthorized]")?;
        }

        Ok(())
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
