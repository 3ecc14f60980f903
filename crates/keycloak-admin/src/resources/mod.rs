//! Resource accessors
//!
//! One accessor per admin API area. Accessors are cheap values borrowing the
//! client; `.realm(..)` and `.with_config(..)` re-target a single accessor
//! without touching the client.

/// Declares an accessor struct wrapping a `Scope`, with the `realm` and
/// `with_config` builders every accessor shares.
macro_rules! accessor {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name<'a> {
            scope: crate::resource::Scope<'a>,
        }

        impl<'a> $name<'a> {
            pub(crate) fn new(client: &'a crate::client::KeycloakAdminClient) -> Self {
                Self {
                    scope: crate::resource::Scope::new(client),
                }
            }

            /// Target `realm` instead of the client's current realm.
            pub fn realm(mut self, realm: impl Into<String>) -> Self {
                self.scope.set_realm(realm.into());
                self
            }

            /// Method-level request overrides for calls made through this accessor.
            pub fn with_config(mut self, config: request_config::RequestConfig) -> Self {
                self.scope.set_config(config);
                self
            }
        }
    };
}

mod authentication_management;
mod client_scopes;
mod clients;
mod components;
mod groups;
mod identity_providers;
mod protocol_mappers;
mod realms;
mod role_mappings;
mod roles;
mod server_info;
mod users;
mod whoami;

pub use authentication_management::AuthenticationManagement;
pub use client_scopes::ClientScopes;
pub use clients::Clients;
pub use components::Components;
pub use groups::Groups;
pub use identity_providers::IdentityProviders;
pub use protocol_mappers::ProtocolMappers;
pub use realms::Realms;
pub use role_mappings::RoleMappings;
pub use roles::Roles;
pub use server_info::ServerInfo;
pub use users::Users;
pub use whoami::WhoAmI;
