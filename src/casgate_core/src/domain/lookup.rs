use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::client::PageDom;

#[derive(Debug, Error, PartialEq)]
pub enum LookupChainError {
    #[error("Lookup chain has no steps")]
    Empty,
    #[error("Lookup step {0} has a blank selector")]
    BlankSelector(usize),
}

/// One hop of a lookup chain: the `index`-th match of `selector`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupStep {
    pub selector: String,
    #[serde(default)]
    pub index: usize,
}

impl LookupStep {
    pub fn new(selector: impl Into<String>, index: usize) -> Self {
        Self {
            selector: selector.into(),
            index,
        }
    }
}

/// The step of a chain that did not resolve on this attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupMiss {
    pub step: usize,
    pub selector: String,
}

/// Ordered DOM lookups leading to the host's logout control.
///
/// Each step searches inside the element found by the previous one, so a chain
/// can describe deeply nested menus without relying on global selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LookupStep>", into = "Vec<LookupStep>")]
pub struct LookupChain(Vec<LookupStep>);

impl LookupChain {
    pub fn new(steps: Vec<LookupStep>) -> Result<Self, LookupChainError> {
        if steps.is_empty() {
            return Err(LookupChainError::Empty);
        }
        if let Some(position) = steps.iter().position(|s| s.selector.trim().is_empty()) {
            return Err(LookupChainError::BlankSelector(position));
        }

        Ok(Self(steps))
    }

    pub fn steps(&self) -> &[LookupStep] {
        &self.0
    }

    /// Walk the chain against `dom`.
    ///
    /// A miss is the normal state while the host is still rendering.
    pub fn resolve<D: PageDom>(&self, dom: &D) -> Result<D::Node, LookupMiss> {
        let mut scope: Option<D::Node> = None;

        for (position, step) in self.0.iter().enumerate() {
            let node = dom
                .query_all(scope.as_ref(), &step.selector)
                .into_iter()
                .nth(step.index)
                .ok_or_else(|| LookupMiss {
                    step: position,
                    selector: step.selector.clone(),
                })?;
            scope = Some(node);
        }

        // `new` guarantees at least one step
        scope.ok_or_else(|| LookupMiss {
            step: 0,
            selector: String::new(),
        })
    }
}

impl TryFrom<Vec<LookupStep>> for LookupChain {
    type Error = LookupChainError;

    fn try_from(steps: Vec<LookupStep>) -> Result<Self, Self::Error> {
        Self::new(steps)
    }
}

impl From<LookupChain> for Vec<LookupStep> {
    fn from(chain: LookupChain) -> Self {
        chain.0
    }
}

/// Host page layouts with a known path to the logout control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostLayout {
    /// A plain anchor pointing at the host's logout route.
    #[default]
    LogoutLink,
    /// Account dropdown in the global navigation bar; logout is its second entry.
    NavbarDropdown,
    /// Account popup in the global navigation bar; logout is its first entry.
    PopupMenu,
}

impl HostLayout {
    pub fn lookup_chain(self) -> LookupChain {
        let steps = match self {
            HostLayout::LogoutLink => vec![LookupStep::new("a[href*='sessions/logout']", 0)],
            HostLayout::NavbarDropdown => vec![
                LookupStep::new("#global-navigation", 0),
                LookupStep::new(".navbar-right", 0),
                LookupStep::new(".dropdown-menu", 0),
                LookupStep::new("a", 1),
            ],
            HostLayout::PopupMenu => vec![
                LookupStep::new("#global-navigation", 0),
                LookupStep::new(".popup", 0),
                LookupStep::new("a", 0),
            ],
        };
        LookupChain(steps)
    }
}
