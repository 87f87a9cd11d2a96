use std::fmt;

/// Errors from the Steam Community client
#[derive(Debug)]
pub enum CommunityError {
    Http(reqwest::Error),
    Xml(quick_xml::DeError),
}

impl fmt::Display for CommunityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "Steam Community HTTP error: {e}"),
            Self::Xml(e) => write!(f, "Steam Community XML parse error: {e}"),
        }
    }
}

impl std::error::Error for CommunityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Xml(e) => Some(e),
        }
    }
}

impl From<reqwest::Error> for CommunityError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

impl From<quick_xml::DeError> for CommunityError {
    fn from(err: quick_xml::DeError) -> Self {
        Self::Xml(err)
    }
}

pub type Result<T> = std::result::Result<T, CommunityError>;
