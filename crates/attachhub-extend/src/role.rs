//! The three fixed extension points.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use attachhub_core::error::AppError;

/// One of the three fixed extension points a behavior bundle can be
/// attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The attachment interface mixed into host model records.
    Attachment,
    /// The attacher that moves files through their lifecycle.
    Attacher,
    /// The uploaded file representation.
    UploadedFile,
}

impl Role {
    /// All recognized roles.
    pub const ALL: [Role; 3] = [Role::Attachment, Role::Attacher, Role::UploadedFile];

    /// The canonical name of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attachment => "attachment",
            Self::Attacher => "attacher",
            Self::UploadedFile => "uploaded_file",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attachment" => Ok(Self::Attachment),
            "attacher" => Ok(Self::Attacher),
            "uploaded_file" => Ok(Self::UploadedFile),
            other => Err(AppError::configuration(format!(
                "'{other}' does not name a recognized role"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attachhub_core::error::ErrorKind;

    #[test]
    fn test_round_trip_all_roles() {
        for role in Role::ALL {
            let parsed: Role = role.as_str().parse().expect("should parse");
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_unrecognized_role_is_configuration_error() {
        let err = "widget".parse::<Role>().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
