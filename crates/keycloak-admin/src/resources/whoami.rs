//! `/admin/{realm}/console/whoami`

use crate::dto::WhoAmIRepresentation;
use crate::error::Result;

accessor!(
    /// Identity and admin permissions of the current token holder, as seen
    /// by the admin console of the target realm.
    WhoAmI
);

impl<'a> WhoAmI<'a> {
    pub async fn find(&self) -> Result<WhoAmIRepresentation> {
        let realm = self.scope.realm_name();
        self.scope
            .get(&self.scope.admin_path(&[realm, "console", "whoami"]))
            .await
    }
}
