//! Calendar-wide options.

use serde::{Deserialize, Serialize};

use crate::error::{IcsError, IcsResult};

static DEFAULT_UID_DOMAIN: &str = "evildvl";
static DEFAULT_PROD_ID: &str = "vueICS";
static DEFAULT_LINE_ENDING: &str = "\r\n";

fn default_uid_domain() -> String {
    DEFAULT_UID_DOMAIN.to_string()
}

fn default_prod_id() -> String {
    DEFAULT_PROD_ID.to_string()
}

fn default_line_ending() -> String {
    DEFAULT_LINE_ENDING.to_string()
}

/// Options fixed for the lifetime of an [`IcsCalendar`](crate::IcsCalendar).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IcsOptions {
    /// Domain part of every generated UID (`<id>@<uid_domain>`)
    #[serde(default = "default_uid_domain")]
    pub uid_domain: String,

    /// Value of the calendar's PRODID line
    #[serde(default = "default_prod_id")]
    pub prod_id: String,

    /// Separator between content lines. RFC 5545 requires CRLF.
    #[serde(default = "default_line_ending")]
    pub line_ending: String,
}

impl Default for IcsOptions {
    fn default() -> Self {
        IcsOptions {
            uid_domain: default_uid_domain(),
            prod_id: default_prod_id(),
            line_ending: default_line_ending(),
        }
    }
}

impl IcsOptions {
    /// Reject options that would produce unreadable output.
    pub fn validate(&self) -> IcsResult<()> {
        if self.line_ending.is_empty() || !self.line_ending.chars().all(|c| c == '\r' || c == '\n')
        {
            return Err(IcsError::Config(format!(
                "line_ending must consist of CR/LF characters, got {:?}",
                self.line_ending
            )));
        }

        if self.uid_domain.trim().is_empty() {
            return Err(IcsError::Config("uid_domain must not be empty".into()));
        }

        if self.prod_id.trim().is_empty() {
            return Err(IcsError::Config("prod_id must not be empty".into()));
        }

        Ok(())
    }
}
