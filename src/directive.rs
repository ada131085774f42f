//! Resolution of `start-world` options into a single [`StartDirective`].

use reqwest::Url;

use crate::error::{ControlError, Outcome};

/// What the host should start: a builtin template or a stored world record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartDirective {
    ByTemplateName(String),
    ByRecordLocator(Url),
}

impl StartDirective {
    /// Build the directive from the raw option values.
    ///
    /// Exactly one of `template` and `url` must be given; a blank template
    /// name counts as absent. The argument parser enforces the same rule, so
    /// reaching either error here means it was bypassed.
    pub fn resolve(template: Option<&str>, url: Option<&Url>) -> Outcome<Self> {
        let template = template.map(str::trim).filter(|name| !name.is_empty());

        match (template, url) {
            (Some(name), None) => Ok(StartDirective::ByTemplateName(name.to_string())),
            (None, Some(url)) => Ok(StartDirective::ByRecordLocator(url.clone())),
            (Some(_), Some(_)) => Err(ControlError::Configuration(
                "--template and --url are mutually exclusive; pass only one".into(),
            )),
            (None, None) => Err(ControlError::Configuration(
                "nothing to start; pass --template <NAME> or --url <URL>".into(),
            )),
        }
    }
}
