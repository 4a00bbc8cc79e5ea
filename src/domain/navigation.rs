use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::identity::{Identity, Role};

/// A screen of the storefront. Each one stands in for a page of the web front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Login and registration.
    Entry,
    /// Catalog and cart, for customers.
    Shop,
    /// Product administration, for employees.
    Inventory,
    /// Sales, users and employees panels, for employees.
    Dashboard,
}

impl Page {
    pub fn required_role(self) -> Option<Role> {
        match self {
            Page::Entry => None,
            Page::Shop => Some(Role::Customer),
            Page::Inventory | Page::Dashboard => Some(Role::Employee),
        }
    }
}

impl Role {
    /// Where an account of this role lands after login.
    pub fn home_page(self) -> Page {
        match self {
            Role::Employee => Page::Inventory,
            Role::Customer => Page::Shop,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Page::Entry => "entry",
            Page::Shop => "shop",
            Page::Inventory => "inventory",
            Page::Dashboard => "dashboard",
        };
        f.write_str(name)
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "entry" | "login" => Ok(Page::Entry),
            "shop" | "compra" => Ok(Page::Shop),
            "inventory" | "productos" => Ok(Page::Inventory),
            "dashboard" => Ok(Page::Dashboard),
            other => Err(format!("unknown page '{other}'")),
        }
    }
}

/// Outcome of the session gate for one page load.
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    /// The page may load for this identity.
    Granted(Identity),
    /// The entry page with nobody logged in.
    Anonymous,
    /// Show `notice`, wait `after`, then go to `to`.
    Redirect { notice: String, to: Page, after: Duration },
}
