use crate::model::{AdminId, LedgerTransaction, SiteId};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    #[error("administrator {admin} has no access to site {site}")]
    SiteOutOfScope { admin: String, site: String },
}

/// Contexte explicite de l'appelant : qui agit, et sur quelles résidences.
/// `site_scope == None` : toutes les résidences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActingContext {
    pub admin: AdminId,
    pub site_scope: Option<BTreeSet<SiteId>>,
}

impl ActingContext {
    pub fn new(admin: AdminId) -> Self {
        Self {
            admin,
            site_scope: None,
        }
    }

    pub fn scoped<I: IntoIterator<Item = SiteId>>(admin: AdminId, sites: I) -> Self {
        Self {
            admin,
            site_scope: Some(sites.into_iter().collect()),
        }
    }

    pub fn covers(&self, site: &SiteId) -> bool {
        self.site_scope.as_ref().map_or(true, |scope| scope.contains(site))
    }

    pub fn ensure_site(&self, site: &SiteId) -> Result<(), ScopeError> {
        if self.covers(site) {
            return Ok(());
        }
        Err(ScopeError::SiteOutOfScope {
            admin: self.admin.as_str().to_string(),
            site: site.as_str().to_string(),
        })
    }

    /// Renseigne l'auteur d'une transaction avant son enregistrement.
    pub fn stamp(&self, tx: LedgerTransaction) -> LedgerTransaction {
        tx.recorded_by(self.admin.clone())
    }
}
