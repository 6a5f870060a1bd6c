//! Launch strategies, in the order the engine tries them.

use crate::domain::{AppName, AttemptFailure, LaunchTarget};
use crate::platform::ApplicationCatalog;

/// One way of starting an application
pub trait LaunchStrategy {
    fn name(&self) -> &'static str;

    fn attempt(
        &self,
        app: &AppName,
        catalog: &dyn ApplicationCatalog,
    ) -> Result<LaunchTarget, AttemptFailure>;
}

/// Installed application whose display name contains the app name
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogMatch;

impl LaunchStrategy for CatalogMatch {
    fn name(&self) -> &'static str {
        "catalog_match"
    }

    fn attempt(
        &self,
        app: &AppName,
        catalog: &dyn ApplicationCatalog,
    ) -> Result<LaunchTarget, AttemptFailure> {
        let entry = catalog
            .find_by_name_substring(app)?
            .ok_or(AttemptFailure::NoMatch)?;
        catalog.launch_by_identifier(&entry.id)?;
        Ok(LaunchTarget::Catalog {
            id: entry.id,
            display_name: entry.display_name,
        })
    }
}

/// Program literally named after the app
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectName;

impl LaunchStrategy for DirectName {
    fn name(&self) -> &'static str {
        "direct_name"
    }

    fn attempt(
        &self,
        app: &AppName,
        catalog: &dyn ApplicationCatalog,
    ) -> Result<LaunchTarget, AttemptFailure> {
        launch_program(catalog, app.as_str().to_string())
    }
}

/// Program named after the app plus the executable suffix
#[derive(Debug, Clone, Default)]
pub struct ExecutableSuffix {
    suffix: String,
}

impl ExecutableSuffix {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }
}

impl LaunchStrategy for ExecutableSuffix {
    fn name(&self) -> &'static str {
        "executable_suffix"
    }

    fn attempt(
        &self,
        app: &AppName,
        catalog: &dyn ApplicationCatalog,
    ) -> Result<LaunchTarget, AttemptFailure> {
        launch_program(catalog, app.with_suffix(&self.suffix))
    }
}

fn launch_program(
    catalog: &dyn ApplicationCatalog,
    program: String,
) -> Result<LaunchTarget, AttemptFailure> {
    catalog.launch_literal(&program)?;
    Ok(LaunchTarget::Program { name: program })
}
